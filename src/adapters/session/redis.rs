//! Redis-backed session store for multi-server deployments.
//!
//! Each session is a single string key written with `SET ... EX`, so
//! abandoned login flows expire on their own.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::foundation::SessionKey;
use crate::domain::provider::SessionData;
use crate::ports::{SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "social_auth:session:";

/// Redis key holding the session data for `key`.
pub fn session_key(key: &SessionKey) -> String {
    format!("{}{}", KEY_PREFIX, key)
}

/// Redis-backed session store.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl RedisSessionStore {
    /// Create a store over an existing connection.
    pub fn new(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self { conn, ttl }
    }

    /// Open a connection to `url` and create a store over it.
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(unavailable)?;
        tracing::info!(ttl_secs = ttl.as_secs(), "Connected to Redis session store");
        Ok(Self::new(conn, ttl))
    }

    fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs().max(1)
    }
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    tracing::error!(error = %e, "Redis session store error");
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<SessionData>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(session_key(key)).await.map_err(unavailable)?;
        Ok(value.map(SessionData::new))
    }

    async fn save(&self, key: &SessionKey, data: &SessionData) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(session_key(key), data.as_str(), self.ttl_secs())
            .await
            .map_err(unavailable)
    }

    async fn remove(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(session_key(key)).await.map_err(unavailable)
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn session_key_is_prefixed_uuid() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let key = SessionKey::from_uuid(uuid);

        assert_eq!(
            session_key(&key),
            "social_auth:session:67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
    }

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let result = RedisSessionStore::connect("not a url", Duration::from_secs(60)).await;
        assert!(matches!(result, Err(SessionStoreError::Unavailable(_))));
    }

    #[tokio::test]
    #[ignore = "requires a running Redis at REDIS_URL"]
    async fn round_trips_against_live_redis() {
        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string());
        let store = RedisSessionStore::connect(&url, Duration::from_secs(30))
            .await
            .unwrap();
        let key = SessionKey::new();

        store.save(&key, &SessionData::new("blob")).await.unwrap();
        assert_eq!(
            store.load(&key).await.unwrap(),
            Some(SessionData::new("blob"))
        );

        store.remove(&key).await.unwrap();
        assert_eq!(store.load(&key).await.unwrap(), None);
    }
}
