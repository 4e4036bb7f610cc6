//! DispatchUpdateHandler - Entry point for every inbound chat update.
//!
//! Loads the channel's session, greets first-time channels, and hands the
//! update to the intent runtime. Every session change is persisted by the
//! runtime before this handler returns.

use std::fmt;
use std::sync::Arc;

use crate::application::intents::{ContextSeed, IntentError, IntentRuntime};
use crate::config::AppConfig;
use crate::domain::conversation::{AnswerResolver, IntentKind, Update};
use crate::domain::foundation::ChannelId;
use crate::ports::{
    Channel, DecisionEngine, SendOptions, SessionRepository, SessionStoreError,
};

/// Command to process one inbound update.
#[derive(Debug, Clone)]
pub struct DispatchUpdateCommand {
    pub channel_id: ChannelId,
    pub update: Update,
}

/// Result of processing an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchUpdateResult {
    /// Intent waiting for the next update.
    pub active_intent: IntentKind,
    /// True if this update started the conversation.
    pub new_session: bool,
}

/// Errors from update dispatch.
#[derive(Debug, Clone)]
pub enum DispatchUpdateError {
    /// Outbound message could not be delivered.
    Channel(String),
    /// Session could not be loaded or stored.
    SessionStore(String),
    /// The update kept switching intents without waiting for input.
    TransitionLimit(usize),
    /// Neither the requested intent nor AutoAdvance is registered.
    IntentUnavailable(IntentKind),
}

impl fmt::Display for DispatchUpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchUpdateError::Channel(msg) => write!(f, "Channel error: {}", msg),
            DispatchUpdateError::SessionStore(msg) => write!(f, "Session store error: {}", msg),
            DispatchUpdateError::TransitionLimit(limit) => {
                write!(f, "Update exceeded {} intent transitions", limit)
            }
            DispatchUpdateError::IntentUnavailable(kind) => {
                write!(f, "No intent registered for {}", kind)
            }
        }
    }
}

impl std::error::Error for DispatchUpdateError {}

impl From<SessionStoreError> for DispatchUpdateError {
    fn from(err: SessionStoreError) -> Self {
        DispatchUpdateError::SessionStore(err.to_string())
    }
}

impl From<IntentError> for DispatchUpdateError {
    fn from(err: IntentError) -> Self {
        match err {
            IntentError::Channel(e) => DispatchUpdateError::Channel(e.to_string()),
            IntentError::SessionStore(e) => DispatchUpdateError::SessionStore(e.to_string()),
            IntentError::TransitionLimit(limit) => DispatchUpdateError::TransitionLimit(limit),
            IntentError::Unregistered(kind) => DispatchUpdateError::IntentUnavailable(kind),
        }
    }
}

/// Handler for inbound updates.
pub struct DispatchUpdateHandler {
    sessions: Arc<dyn SessionRepository>,
    channel: Arc<dyn Channel>,
    runtime: IntentRuntime,
}

impl DispatchUpdateHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        channel: Arc<dyn Channel>,
        engine: Arc<dyn DecisionEngine>,
    ) -> Self {
        let runtime = IntentRuntime::new(sessions.clone(), channel.clone(), engine);
        Self {
            sessions,
            channel,
            runtime,
        }
    }

    /// Builds a handler whose answer resolver uses the configured thresholds.
    pub fn from_config(
        config: &AppConfig,
        sessions: Arc<dyn SessionRepository>,
        channel: Arc<dyn Channel>,
        engine: Arc<dyn DecisionEngine>,
    ) -> Self {
        let mut handler = Self::new(sessions, channel, engine);
        handler.runtime = handler
            .runtime
            .with_resolver(AnswerResolver::from_config(&config.resolver));
        handler
    }

    pub async fn handle(
        &self,
        cmd: DispatchUpdateCommand,
    ) -> Result<DispatchUpdateResult, DispatchUpdateError> {
        let DispatchUpdateCommand { channel_id, update } = cmd;

        // 1. Load (or create) the channel's session
        let mut session = self.sessions.get(channel_id).await?;
        let new_session = !session.initialized;

        if new_session {
            // 2a. First contact: greet and show the menu
            session.initialized = true;
            self.sessions.put(channel_id, &session).await?;

            tracing::info!(
                channel_id = %channel_id,
                message_id = ?update.message_id,
                "Starting conversation"
            );
            self.channel
                .send_message(channel_id, &welcome(update.sender_name.as_deref()), &SendOptions::plain())
                .await
                .map_err(|e| DispatchUpdateError::Channel(e.to_string()))?;

            self.runtime
                .open(IntentKind::SelectMenu, Some(&update), &mut session, ContextSeed::Defaults)
                .await?;
        } else {
            // 2b. Ongoing conversation: route to the active intent
            tracing::debug!(
                channel_id = %channel_id,
                message_id = ?update.message_id,
                intent = %session.active_intent,
                "Dispatching update"
            );
            self.runtime.forward(None, &update, &mut session).await?;
        }

        Ok(DispatchUpdateResult {
            active_intent: session.active_intent,
            new_session,
        })
    }
}

fn welcome(sender_name: Option<&str>) -> String {
    match sender_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Hello {}! Welcome to use the AHP bot.", name),
        None => "Hello! Welcome to use the AHP bot.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySessionRepository, MockDecisionEngine, RecordingChannel};
    use crate::domain::foundation::MessageId;
    use crate::ports::ChannelError;
    use crate::domain::conversation::Session;
    use async_trait::async_trait;

    const CHANNEL: i64 = 42;

    struct Fixture {
        sessions: Arc<InMemorySessionRepository>,
        channel: Arc<RecordingChannel>,
        handler: DispatchUpdateHandler,
    }

    fn fixture_with(channel: RecordingChannel) -> Fixture {
        let sessions = Arc::new(InMemorySessionRepository::default());
        let channel = Arc::new(channel);
        let handler = DispatchUpdateHandler::new(
            sessions.clone(),
            channel.clone(),
            Arc::new(MockDecisionEngine::new()),
        );
        Fixture {
            sessions,
            channel,
            handler,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingChannel::new())
    }

    fn command(update: Update) -> DispatchUpdateCommand {
        DispatchUpdateCommand {
            channel_id: ChannelId::new(CHANNEL),
            update,
        }
    }

    fn text(body: &str) -> Update {
        Update::text(MessageId::new(1), body)
    }

    mod first_contact {
        use super::*;

        #[tokio::test]
        async fn greets_by_name_and_shows_the_menu() {
            let f = fixture();

            let result = f
                .handler
                .handle(command(text("/start").with_sender("Ada")))
                .await
                .unwrap();

            assert!(result.new_session);
            assert_eq!(result.active_intent, IntentKind::SelectMenu);
            assert_eq!(
                f.channel.texts(),
                vec![
                    "Hello Ada! Welcome to use the AHP bot.".to_string(),
                    "Can I help you?".to_string()
                ]
            );
            let stored = f.sessions.get(ChannelId::new(CHANNEL)).await.unwrap();
            assert!(stored.initialized);
        }

        #[tokio::test]
        async fn greets_anonymously_without_a_name() {
            let f = fixture();

            f.handler.handle(command(text("hi"))).await.unwrap();

            assert_eq!(f.channel.texts()[0], "Hello! Welcome to use the AHP bot.");
        }

        fn assert_send<T: Send>(_: &T) {}

        #[tokio::test]
        async fn handling_future_is_send() {
            let f = fixture();

            let pending = f.handler.handle(command(text("hi")));
            assert_send(&pending);
            pending.await.unwrap();

            let pending = f.handler.handle(command(text("Add Options")));
            assert_send(&pending);
            pending.await.unwrap();
        }

        #[tokio::test]
        async fn first_text_is_not_interpreted() {
            let f = fixture();

            f.handler.handle(command(text("Restart session"))).await.unwrap();

            assert_eq!(f.channel.texts().len(), 2);
        }
    }

    mod ongoing {
        use super::*;

        #[tokio::test]
        async fn second_update_is_routed_to_the_active_intent() {
            let f = fixture();
            f.handler.handle(command(text("/start"))).await.unwrap();

            let result = f
                .handler
                .handle(command(text("Add Options")))
                .await
                .unwrap();

            assert!(!result.new_session);
            assert_eq!(result.active_intent, IntentKind::CollectItems);
        }

        #[tokio::test]
        async fn channel_failure_is_reported() {
            let f = fixture_with(
                RecordingChannel::new().with_failure(ChannelError::DeliveryFailed("offline".to_string())),
            );

            let err = f.handler.handle(command(text("/start"))).await.unwrap_err();

            assert!(matches!(err, DispatchUpdateError::Channel(_)));
        }
    }

    mod errors {
        use super::*;

        struct BrokenStore;

        #[async_trait]
        impl SessionRepository for BrokenStore {
            async fn get(&self, _channel_id: ChannelId) -> Result<Session, SessionStoreError> {
                Err(SessionStoreError::Unavailable("down".to_string()))
            }

            async fn put(&self, _channel_id: ChannelId, _session: &Session) -> Result<(), SessionStoreError> {
                Err(SessionStoreError::Unavailable("down".to_string()))
            }
        }

        #[tokio::test]
        async fn store_failure_is_reported() {
            let handler = DispatchUpdateHandler::new(
                Arc::new(BrokenStore),
                Arc::new(RecordingChannel::new()),
                Arc::new(MockDecisionEngine::new()),
            );

            let err = handler.handle(command(text("hi"))).await.unwrap_err();

            assert!(matches!(err, DispatchUpdateError::SessionStore(_)));
        }

        #[test]
        fn intent_errors_map_onto_dispatch_errors() {
            assert!(matches!(
                DispatchUpdateError::from(IntentError::TransitionLimit(16)),
                DispatchUpdateError::TransitionLimit(16)
            ));
            assert_eq!(
                DispatchUpdateError::TransitionLimit(16).to_string(),
                "Update exceeded 16 intent transitions"
            );
        }
    }

    #[test]
    fn welcome_ignores_blank_names() {
        assert_eq!(welcome(Some("  ")), "Hello! Welcome to use the AHP bot.");
        assert_eq!(welcome(Some("Bo")), "Hello Bo! Welcome to use the AHP bot.");
    }
}
