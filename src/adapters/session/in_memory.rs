//! In-Memory Session Store Adapter
//!
//! Keeps toolkit session data in process memory. With a TTL, an entry
//! expires that long after its last save; expired entries are dropped on
//! the next load of that key or the next save of any key.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::foundation::SessionKey;
use crate::domain::provider::SessionData;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
struct Entry {
    data: SessionData,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory storage for toolkit session data
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, Entry>>>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    /// Create a store whose entries never expire
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose entries expire `ttl` after their last save
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl: Some(ttl),
        }
    }

    /// Get the number of stored sessions, expired ones not yet evicted included
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<SessionData>, SessionStoreError> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.data.clone())),
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write().await;
        if sessions.get(key).is_some_and(|entry| entry.is_expired(now)) {
            sessions.remove(key);
        }
        Ok(None)
    }

    async fn save(&self, key: &SessionKey, data: &SessionData) -> Result<(), SessionStoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| !entry.is_expired(now));
        sessions.insert(
            *key,
            Entry {
                data: data.clone(),
                expires_at: self.ttl.map(|ttl| now + ttl),
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(key);
        Ok(())
    }
}
