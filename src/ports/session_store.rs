//! Session Store Port - Interface for persisting toolkit session state.
//!
//! The toolkit's session data must survive between the request that sends
//! the browser to a provider and the callback request that comes back.
//! The host decides where that lives; this port is the seam.

use async_trait::async_trait;

use crate::domain::foundation::SessionKey;
use crate::domain::provider::SessionData;

/// Errors that can occur during session store operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored session data is corrupted: {0}")]
    Corrupted(String),
}

/// Port for persisting and loading toolkit session data
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session data stored under `key`.
    ///
    /// # Returns
    /// `None` if nothing is stored for the key
    async fn load(&self, key: &SessionKey) -> Result<Option<SessionData>, SessionStoreError>;

    /// Store session data under `key`, replacing any previous value.
    async fn save(&self, key: &SessionKey, data: &SessionData) -> Result<(), SessionStoreError>;

    /// Remove whatever is stored under `key`.
    async fn remove(&self, key: &SessionKey) -> Result<(), SessionStoreError>;
}
