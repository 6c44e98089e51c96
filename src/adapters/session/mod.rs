//! Session store adapters.
//!
//! Implementations of the `SessionStore` port:
//!
//! - `in_memory` - Process-local storage for tests and single-instance hosts
//! - `redis` - Shared storage for multi-server deployments
//!
//! Both expire entries after the configured TTL.

mod in_memory;
mod redis;

pub use self::in_memory::InMemorySessionStore;
pub use self::redis::{session_key, RedisSessionStore};

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::ports::{SessionStore, SessionStoreError};

/// Builds the store selected by `config`.
///
/// Connects to Redis when `redis_url` is set, otherwise keeps sessions in
/// process memory. Either way entries live for `ttl_secs`.
pub async fn session_store_from_config(
    config: &SessionConfig,
) -> Result<Arc<dyn SessionStore>, SessionStoreError> {
    match config.redis_url.as_deref() {
        Some(url) => Ok(Arc::new(RedisSessionStore::connect(url, config.ttl()).await?)),
        None => Ok(Arc::new(InMemorySessionStore::with_ttl(config.ttl()))),
    }
}
