//! Provider map - routes requests to identity providers.
//!
//! Holds the configured `{provider → check path}` registrations and the
//! toolkit client used to talk to those providers. The client is built on
//! first use and then reused for the life of the map.
//!
//! ```text
//! GET /login/check-google ─► resolve_by_path ─► "google"
//!                                                   │
//!                             authenticate("google")▼
//!                     client (built once) ─► Connected(adapter) | Redirect(url)
//! ```
//!
//! A map holds per-user toolkit state once session data is restored into
//! it, so hosts build one map per request (see `SocialAuthFirewall`).

use std::collections::BTreeSet;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::ClientConfig;
use crate::domain::foundation::{AccountNotConnected, ProviderError, ProviderName};
use crate::domain::provider::{
    ProviderRegistration, ProviderRegistrations, RegistrationError, SessionData,
};
use crate::ports::{
    AuthenticationOutcome, ProviderAdapter, SocialAuthClient, SocialAuthClientFactory,
};

/// Resolves requests and provider names to live provider sessions.
pub struct ProviderMap {
    registrations: ProviderRegistrations,
    client_config: Arc<ClientConfig>,
    client_factory: Arc<dyn SocialAuthClientFactory>,
    client: OnceCell<Arc<dyn SocialAuthClient>>,
}

impl ProviderMap {
    /// Creates a map over already-validated registrations.
    pub fn new(
        registrations: ProviderRegistrations,
        client_config: Arc<ClientConfig>,
        client_factory: Arc<dyn SocialAuthClientFactory>,
    ) -> Self {
        Self {
            registrations,
            client_config,
            client_factory,
            client: OnceCell::new(),
        }
    }

    /// Validates raw registrations and creates a map.
    ///
    /// # Errors
    ///
    /// Fails if two registrations share a check path or a name, or if the
    /// list is empty.
    pub fn from_registrations(
        registrations: Vec<ProviderRegistration>,
        client_config: Arc<ClientConfig>,
        client_factory: Arc<dyn SocialAuthClientFactory>,
    ) -> Result<Self, RegistrationError> {
        let registrations = ProviderRegistrations::new(registrations)?;
        Ok(Self::new(registrations, client_config, client_factory))
    }

    pub fn registrations(&self) -> &ProviderRegistrations {
        &self.registrations
    }

    /// Provider whose check path matches `path`.
    ///
    /// Registrations are scanned in configured order; the first match wins.
    pub fn resolve_by_path(&self, path: &str) -> Option<&ProviderName> {
        self.registrations.find_by_path(path).map(|r| &r.name)
    }

    /// Provider whose check path matches the request's path.
    pub fn resolve_by_request<B>(&self, request: &http::Request<B>) -> Option<&ProviderName> {
        self.resolve_by_path(request.uri().path())
    }

    /// Authenticates the user with `provider`, or resumes a pending flow.
    ///
    /// Returns `Ok(None)` when `provider` is absent from the client
    /// configuration; no client call is made in that case.
    ///
    /// # Errors
    ///
    /// Any toolkit failure, including failing to build the client, is
    /// returned as `AccountNotConnected` tagged with `provider`.
    pub async fn authenticate(
        &self,
        provider: &ProviderName,
    ) -> Result<Option<AuthenticationOutcome>, AccountNotConnected> {
        if !self.client_config.is_configured(provider) {
            return Ok(None);
        }

        let params = self.client_config.auth_params(provider);
        let client = self.client().map_err(|e| not_connected(provider, e))?;
        client
            .authenticate(provider, &params)
            .await
            .map(Some)
            .map_err(|e| not_connected(provider, e))
    }

    /// Resolves the request path and authenticates the matching provider.
    ///
    /// Returns `Ok(None)` when no check path matches or the matched
    /// provider is not configured.
    pub async fn authenticate_path(
        &self,
        path: &str,
    ) -> Result<Option<AuthenticationOutcome>, AccountNotConnected> {
        match self.resolve_by_path(path) {
            Some(provider) => self.authenticate(provider).await,
            None => Ok(None),
        }
    }

    /// Resolves the request and authenticates the matching provider.
    pub async fn authenticate_request<B>(
        &self,
        request: &http::Request<B>,
    ) -> Result<Option<AuthenticationOutcome>, AccountNotConnected> {
        self.authenticate_path(request.uri().path()).await
    }

    /// Adapter for `provider` if the client already holds a live session.
    ///
    /// Never starts a new authentication flow.
    pub fn resolve_connected(
        &self,
        provider: &ProviderName,
    ) -> Result<Option<Box<dyn ProviderAdapter>>, AccountNotConnected> {
        if !self.client_config.is_configured(provider) {
            return Ok(None);
        }

        let client = self.client().map_err(|e| not_connected(provider, e))?;
        if !client.is_connected_with(provider) {
            return Ok(None);
        }
        client
            .adapter(provider)
            .map(Some)
            .map_err(|e| not_connected(provider, e))
    }

    /// Providers the user is currently connected with.
    pub fn list_connected(&self) -> Result<BTreeSet<ProviderName>, ProviderError> {
        Ok(self.client()?.connected_providers().into_iter().collect())
    }

    /// Logs out every connected provider and returns their names.
    pub fn logout_all(&self) -> Result<Vec<ProviderName>, ProviderError> {
        let client = self.client()?;
        let mut logged_out = Vec::new();
        for provider in client.connected_providers() {
            client.adapter(&provider)?.logout();
            logged_out.push(provider);
        }
        Ok(logged_out)
    }

    /// Exports the client's session state for the host to persist.
    pub fn session_state(&self) -> Result<SessionData, ProviderError> {
        Ok(self.client()?.session_data())
    }

    /// Restores session state previously exported by `session_state`.
    pub fn restore_session_state(&self, data: &SessionData) -> Result<(), ProviderError> {
        self.client()?.restore_session_data(data)
    }

    /// The toolkit client, built with the stored configuration on first call.
    ///
    /// Later calls return the same instance. If building fails nothing is
    /// cached and the next call tries again.
    pub fn client(&self) -> Result<&Arc<dyn SocialAuthClient>, ProviderError> {
        self.client
            .get_or_try_init(|| self.client_factory.create(&self.client_config))
    }

    /// Returns true once the client has been built.
    pub fn is_client_initialized(&self) -> bool {
        self.client.get().is_some()
    }
}

impl std::fmt::Debug for ProviderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderMap")
            .field("registrations", &self.registrations)
            .field("client_initialized", &self.is_client_initialized())
            .finish_non_exhaustive()
    }
}

fn not_connected(provider: &ProviderName, error: ProviderError) -> AccountNotConnected {
    AccountNotConnected::new(provider.clone(), error)
}
