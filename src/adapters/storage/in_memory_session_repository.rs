//! In-Memory Session Repository Adapter
//!
//! Stores sessions in memory with an idle TTL. Expired entries behave as
//! missing and are replaced on the next `get`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::SessionConfig;
use crate::domain::conversation::Session;
use crate::domain::foundation::{ChannelId, Timestamp};
use crate::ports::{SessionRepository, SessionStoreError};

#[derive(Debug, Clone)]
struct StoredSession {
    session: Session,
    expires_at: Timestamp,
}

impl StoredSession {
    fn is_live(&self, now: &Timestamp) -> bool {
        self.expires_at.is_after(now)
    }
}

/// In-memory storage for per-channel sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<ChannelId, StoredSession>>>,
    ttl: Duration,
}

impl InMemorySessionRepository {
    /// Create a repository whose entries expire `ttl` after their last write
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.ttl())
    }

    /// Drop every expired entry
    pub async fn evict_expired(&self) -> usize {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| stored.is_live(&now));
        before - sessions.len()
    }

    /// Get the number of stored sessions, expired or not
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    fn expiry_from(&self, now: &Timestamp) -> Timestamp {
        now.plus_secs(self.ttl.as_secs())
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, channel_id: ChannelId) -> Result<Session, SessionStoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;

        if let Some(stored) = sessions.get(&channel_id) {
            if stored.is_live(&now) {
                return Ok(stored.session.clone());
            }
            tracing::debug!(channel_id = %channel_id, "Session expired");
        }

        let session = Session::new(channel_id);
        sessions.insert(
            channel_id,
            StoredSession {
                session: session.clone(),
                expires_at: self.expiry_from(&now),
            },
        );
        Ok(session)
    }

    async fn put(&self, channel_id: ChannelId, session: &Session) -> Result<(), SessionStoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            channel_id,
            StoredSession {
                session: session.clone(),
                expires_at: self.expiry_from(&now),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::IntentKind;

    fn hour() -> Duration {
        Duration::from_secs(3600)
    }

    #[tokio::test]
    async fn get_creates_fresh_session_on_miss() {
        let repo = InMemorySessionRepository::new(hour());
        let session = repo.get(ChannelId::new(1)).await.unwrap();

        assert!(!session.initialized);
        assert_eq!(session.channel_id(), ChannelId::new(1));
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn put_then_get_returns_stored_session() {
        let repo = InMemorySessionRepository::new(hour());
        let mut session = repo.get(ChannelId::new(1)).await.unwrap();
        session.initialized = true;
        session.active_intent = IntentKind::Run;
        repo.put(ChannelId::new(1), &session).await.unwrap();

        let loaded = repo.get(ChannelId::new(1)).await.unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn channels_are_independent() {
        let repo = InMemorySessionRepository::new(hour());
        let mut first = repo.get(ChannelId::new(1)).await.unwrap();
        first.initialized = true;
        repo.put(ChannelId::new(1), &first).await.unwrap();

        let second = repo.get(ChannelId::new(2)).await.unwrap();
        assert!(!second.initialized);
    }

    #[tokio::test]
    async fn expired_session_is_recreated() {
        let repo = InMemorySessionRepository::new(Duration::ZERO);
        let mut session = repo.get(ChannelId::new(1)).await.unwrap();
        session.initialized = true;
        repo.put(ChannelId::new(1), &session).await.unwrap();

        let loaded = repo.get(ChannelId::new(1)).await.unwrap();
        assert!(!loaded.initialized);
    }

    #[tokio::test]
    async fn oversized_ttl_keeps_session_alive() {
        let repo = InMemorySessionRepository::new(Duration::from_secs(u64::MAX));
        let mut session = repo.get(ChannelId::new(1)).await.unwrap();
        session.initialized = true;
        repo.put(ChannelId::new(1), &session).await.unwrap();

        let loaded = repo.get(ChannelId::new(1)).await.unwrap();
        assert!(loaded.initialized);
    }

    #[tokio::test]
    async fn evict_expired_drops_stale_entries() {
        let repo = InMemorySessionRepository::new(Duration::ZERO);
        repo.get(ChannelId::new(1)).await.unwrap();
        repo.get(ChannelId::new(2)).await.unwrap();

        assert_eq!(repo.evict_expired().await, 2);
        assert_eq!(repo.session_count().await, 0);
    }

    #[tokio::test]
    async fn from_config_uses_ttl() {
        let repo = InMemorySessionRepository::from_config(&SessionConfig { ttl_secs: 60 });
        assert_eq!(repo.ttl, Duration::from_secs(60));
    }
}
