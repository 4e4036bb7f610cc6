//! Session repository port.
//!
//! Keyed, time-limited storage of per-channel conversation state.
//!
//! # Design
//!
//! - **Load-or-create**: a miss (or an expired entry) is a new conversation,
//!   never an error
//! - **Write-through**: every change to a session must be followed by `put`
//! - **Idle TTL**: `put` refreshes the expiry of the entry

use async_trait::async_trait;

use crate::domain::conversation::Session;
use crate::domain::foundation::ChannelId;

/// Errors raised by a session store backend.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Repository port for per-channel sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Returns the live session of `channel_id`.
    ///
    /// A missing or expired entry is replaced by a fresh, stored session
    /// that the caller has not yet marked initialized.
    async fn get(&self, channel_id: ChannelId) -> Result<Session, SessionStoreError>;

    /// Overwrites the session of `channel_id` and refreshes its TTL.
    async fn put(&self, channel_id: ChannelId, session: &Session) -> Result<(), SessionStoreError>;
}

/// Clears a session after the user confirmed a restart.
///
/// The decision snapshot and intent context are discarded. The channel id
/// and initialized flag survive; a pending edit target does not.
pub fn reset_session(session: &Session) -> Session {
    let mut fresh = Session::new(session.channel_id());
    fresh.initialized = session.initialized;
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::{IntentContext, IntentKind};
    use crate::domain::foundation::MessageId;

    fn busy_session() -> Session {
        let mut session = Session::new(ChannelId::new(99));
        session.initialized = true;
        session.decision_snapshot.items = vec!["A".to_string(), "B".to_string()];
        session.decision_snapshot.criteria = vec!["price".to_string()];
        session.enter(IntentKind::RankItemPairs, IntentContext::for_intent(IntentKind::RankItemPairs));
        session.channel_context.pending_edit_message_id = Some(MessageId::new(5));
        session
    }

    #[test]
    fn reset_preserves_channel_identity() {
        let reset = reset_session(&busy_session());
        assert_eq!(reset.channel_id(), ChannelId::new(99));
        assert!(reset.initialized);
    }

    #[test]
    fn reset_clears_model_and_context() {
        let reset = reset_session(&busy_session());
        assert!(reset.decision_snapshot.items.is_empty());
        assert!(reset.decision_snapshot.criteria.is_empty());
        assert_eq!(reset.active_intent, IntentKind::SelectMenu);
        assert_eq!(reset.intent_context, IntentContext::for_intent(IntentKind::SelectMenu));
        assert!(reset.channel_context.pending_edit_message_id.is_none());
    }

    #[test]
    fn store_error_messages() {
        let err = SessionStoreError::Unavailable("connection refused".to_string());
        assert!(err.to_string().contains("unavailable"));
    }
}
