//! SocialAuthenticator - turns a check-path request into an application login.

use std::sync::Arc;

use serde::Serialize;

use super::{ProviderMap, SocialAuthResponse};
use crate::domain::foundation::{AuthError, AuthenticatedUser, ProviderName};
use crate::domain::profile::NormalizedProfile;
use crate::ports::{AuthenticationOutcome, SocialUserProvider};

/// Proof of a completed social login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialAuthToken {
    pub user: AuthenticatedUser,
    pub provider: ProviderName,
    pub profile: NormalizedProfile,
}

/// What the authenticator did with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResult {
    /// The path is not a check path, or its provider is not configured.
    NotHandled,

    /// The user must continue at the provider.
    Redirect(String),

    /// The user is logged in.
    Authenticated(SocialAuthToken),
}

impl AuthenticationResult {
    pub fn token(&self) -> Option<&SocialAuthToken> {
        match self {
            AuthenticationResult::Authenticated(token) => Some(token),
            _ => None,
        }
    }
}

/// Authenticates check-path requests against providers.
pub struct SocialAuthenticator {
    user_provider: Arc<dyn SocialUserProvider>,
}

impl SocialAuthenticator {
    pub fn new(user_provider: Arc<dyn SocialUserProvider>) -> Self {
        Self { user_provider }
    }

    /// Runs the login flow for `path` using the given map.
    ///
    /// # Errors
    ///
    /// `AuthError::AccountNotConnected` when the provider interaction fails,
    /// or whatever the user provider returns when loading the user.
    pub async fn authenticate(
        &self,
        map: &ProviderMap,
        path: &str,
    ) -> Result<AuthenticationResult, AuthError> {
        // 1. Route the request
        let Some(provider) = map.resolve_by_path(path) else {
            return Ok(AuthenticationResult::NotHandled);
        };
        tracing::debug!(%provider, path, "Check path matched");

        // 2. Authenticate or resume the provider flow
        let outcome = match map.authenticate(provider).await {
            Ok(Some(outcome)) => outcome,
            Ok(None) => {
                tracing::warn!(%provider, "Provider has a check path but no client configuration");
                return Ok(AuthenticationResult::NotHandled);
            }
            Err(e) => {
                tracing::warn!(%provider, code = %e.code(), error = %e, "Provider authentication failed");
                return Err(e.into());
            }
        };

        let adapter = match outcome {
            AuthenticationOutcome::Redirect(url) => {
                tracing::debug!(%provider, "Redirecting to provider");
                return Ok(AuthenticationResult::Redirect(url));
            }
            AuthenticationOutcome::Connected(adapter) => adapter,
        };

        // 3. Fetch the profile
        let response = SocialAuthResponse::new(adapter).await.map_err(|e| {
            tracing::warn!(%provider, code = %e.code(), error = %e, "Profile request failed");
            AuthError::from(e)
        })?;

        // 4. Load the application user
        let profile = response.normalized_profile().clone();
        let user = self
            .user_provider
            .load_user_by_profile(&profile)
            .await
            .map_err(|e| {
                tracing::warn!(%provider, identifier = %profile.identifier, error = %e, "User lookup failed");
                e
            })?;

        tracing::debug!(%provider, user_id = %user.id, "Social login succeeded");
        Ok(AuthenticationResult::Authenticated(SocialAuthToken {
            user,
            provider: provider.clone(),
            profile,
        }))
    }
}
