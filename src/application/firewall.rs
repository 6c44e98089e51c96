//! SocialAuthFirewall - one configured instance of the social login glue.
//!
//! Owns the validated configuration and the injected collaborators, and
//! runs each request against a fresh `ProviderMap` so toolkit state never
//! leaks between concurrent users.
//!
//! ```text
//! request(session key, path)
//!     │
//!     ├─ load session data ──► ProviderMap::restore_session_state
//!     ├─ SocialAuthenticator::authenticate
//!     └─ save session data ◄── ProviderMap::session_state
//! ```

use std::path::Path;
use std::sync::Arc;

use super::{AuthenticationResult, ProviderMap, SocialAuthError, SocialAuthenticator};
use crate::config::{ClientConfig, SocialAuthConfig};
use crate::domain::foundation::{AuthError, ProviderErrorCode, ProviderName, SessionKey};
use crate::domain::provider::ProviderRegistrations;
use crate::ports::{SessionStore, SessionStoreError, SocialAuthClientFactory, SocialUserProvider};

/// Social login firewall with its dependencies wired in.
pub struct SocialAuthFirewall {
    registrations: ProviderRegistrations,
    client_config: Arc<ClientConfig>,
    client_factory: Arc<dyn SocialAuthClientFactory>,
    session_store: Arc<dyn SessionStore>,
    authenticator: SocialAuthenticator,
    login_path: String,
    cookie_name: String,
}

impl SocialAuthFirewall {
    /// Validates `config` and assembles the firewall.
    pub fn new(
        config: &SocialAuthConfig,
        client_factory: Arc<dyn SocialAuthClientFactory>,
        user_provider: Arc<dyn SocialUserProvider>,
        session_store: Arc<dyn SessionStore>,
    ) -> Result<Self, SocialAuthError> {
        config.validate()?;
        let registrations = config.firewall.registrations()?;
        let user_provider_service = config.firewall.user_provider_service()?;
        for provider in config.unconfigured_providers()? {
            tracing::warn!(%provider, "Check path registered for a provider missing from client.providers");
        }

        tracing::info!(
            providers = registrations.len(),
            login_path = %config.firewall.login_path,
            user_provider = user_provider_service,
            "Social auth firewall configured"
        );

        Ok(Self {
            registrations,
            client_config: Arc::new(config.client.clone()),
            client_factory,
            session_store,
            authenticator: SocialAuthenticator::new(user_provider),
            login_path: config.firewall.login_path.clone(),
            cookie_name: config.session.cookie_name.clone(),
        })
    }

    /// Loads the configuration file at `path` and assembles the firewall.
    pub fn from_file(
        path: impl AsRef<Path>,
        client_factory: Arc<dyn SocialAuthClientFactory>,
        user_provider: Arc<dyn SocialUserProvider>,
        session_store: Arc<dyn SessionStore>,
    ) -> Result<Self, SocialAuthError> {
        let config = SocialAuthConfig::load(path)?;
        Self::new(&config, client_factory, user_provider, session_store)
    }

    /// A fresh provider map with no client built yet.
    pub fn provider_map(&self) -> ProviderMap {
        ProviderMap::new(
            self.registrations.clone(),
            Arc::clone(&self.client_config),
            Arc::clone(&self.client_factory),
        )
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Returns true if `path` is one of the configured check paths.
    pub fn is_check_path(&self, path: &str) -> bool {
        self.registrations.find_by_path(path).is_some()
    }

    /// Handles a request for `path` within the session `key`.
    ///
    /// Requests outside the check paths are `NotHandled` without touching
    /// the session store.
    pub async fn handle(
        &self,
        key: &SessionKey,
        path: &str,
    ) -> Result<AuthenticationResult, AuthError> {
        if !self.is_check_path(path) {
            return Ok(AuthenticationResult::NotHandled);
        }

        let map = self.provider_map();
        self.restore(&map, key).await?;
        let result = self.authenticator.authenticate(&map, path).await;
        self.persist(&map, key).await?;
        result
    }

    /// Logs the session out of every connected provider and drops its
    /// stored session data.
    ///
    /// Returns the providers that were logged out.
    pub async fn logout(&self, key: &SessionKey) -> Result<Vec<ProviderName>, AuthError> {
        let map = self.provider_map();
        self.restore(&map, key).await?;

        let logged_out = if map.is_client_initialized() {
            map.logout_all().map_err(|e| {
                tracing::warn!(error = %e, "Provider logout failed");
                AuthError::InvalidSession
            })?
        } else {
            Vec::new()
        };
        for provider in &logged_out {
            tracing::debug!(%provider, "Logged out of provider");
        }

        self.session_store.remove(key).await.map_err(store_error)?;
        Ok(logged_out)
    }

    async fn restore(&self, map: &ProviderMap, key: &SessionKey) -> Result<(), AuthError> {
        let Some(data) = self.session_store.load(key).await.map_err(store_error)? else {
            return Ok(());
        };
        if data.is_empty() {
            return Ok(());
        }

        map.restore_session_state(&data).map_err(|e| {
            if e.code == ProviderErrorCode::Configuration {
                tracing::error!(error = %e, "Social auth client could not be built");
                AuthError::service_unavailable(e.to_string())
            } else {
                tracing::warn!(session = %key, error = %e, "Discarding unusable session data");
                AuthError::InvalidSession
            }
        })
    }

    async fn persist(&self, map: &ProviderMap, key: &SessionKey) -> Result<(), AuthError> {
        if !map.is_client_initialized() {
            return Ok(());
        }
        let data = map
            .session_state()
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        self.session_store
            .save(key, &data)
            .await
            .map_err(store_error)
    }
}

impl std::fmt::Debug for SocialAuthFirewall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialAuthFirewall")
            .field("registrations", &self.registrations)
            .field("login_path", &self.login_path)
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}

fn store_error(e: SessionStoreError) -> AuthError {
    tracing::error!(error = %e, "Session store failure");
    AuthError::service_unavailable(e.to_string())
}
