//! Social auth client port - the multi-provider login toolkit.
//!
//! The toolkit runs the OAuth/OpenID flows; the bridge only asks it to
//! authenticate a provider, to hand out already-connected adapters, and to
//! export or import its session state.
//!
//! # Example
//!
//! ```ignore
//! match client.authenticate(&provider, &params).await? {
//!     AuthenticationOutcome::Connected(adapter) => { /* wrap the adapter */ }
//!     AuthenticationOutcome::Redirect(url) => { /* send the browser away */ }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;

use crate::domain::foundation::{ProviderError, ProviderName};
use crate::domain::provider::SessionData;

use super::ProviderAdapter;

/// Result of asking the toolkit to authenticate a provider.
pub enum AuthenticationOutcome {
    /// The user is connected; the adapter is ready for profile calls.
    Connected(Box<dyn ProviderAdapter>),

    /// The user must visit the provider first (authorization endpoint).
    Redirect(String),
}

impl AuthenticationOutcome {
    /// Returns true if the provider is connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, AuthenticationOutcome::Connected(_))
    }

    /// Extracts the adapter, if connected.
    pub fn into_adapter(self) -> Option<Box<dyn ProviderAdapter>> {
        match self {
            AuthenticationOutcome::Connected(adapter) => Some(adapter),
            AuthenticationOutcome::Redirect(_) => None,
        }
    }
}

impl fmt::Debug for AuthenticationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthenticationOutcome::Connected(adapter) => f
                .debug_tuple("Connected")
                .field(&adapter.id().as_str())
                .finish(),
            AuthenticationOutcome::Redirect(url) => f.debug_tuple("Redirect").field(url).finish(),
        }
    }
}

/// The multi-provider login toolkit.
///
/// One instance serves one browser session: its connected-provider set and
/// session data belong to a single user.
///
/// # Contract
///
/// Implementations must:
/// - Return `Redirect` when the user still has to authorize at the provider
/// - Return `Connected` once the provider callback has been processed
/// - Report failures and cancellations as `ProviderError`
#[async_trait]
pub trait SocialAuthClient: Send + Sync {
    /// Authenticates the user with `provider`, or resumes a pending flow.
    ///
    /// `params` are extra provider-specific authorization parameters.
    async fn authenticate(
        &self,
        provider: &ProviderName,
        params: &BTreeMap<String, String>,
    ) -> Result<AuthenticationOutcome, ProviderError>;

    /// Returns true if the toolkit holds a live session for `provider`.
    fn is_connected_with(&self, provider: &ProviderName) -> bool;

    /// Returns the adapter for an already-connected provider.
    fn adapter(&self, provider: &ProviderName) -> Result<Box<dyn ProviderAdapter>, ProviderError>;

    /// Lists every provider the user is connected with.
    fn connected_providers(&self) -> Vec<ProviderName>;

    /// Exports the toolkit's session state.
    fn session_data(&self) -> SessionData;

    /// Imports session state previously exported by `session_data`.
    fn restore_session_data(&self, data: &SessionData) -> Result<(), ProviderError>;
}
