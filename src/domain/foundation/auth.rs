//! Authentication types for the domain layer.
//!
//! These types describe the outcome of a social login from the application's
//! point of view. They have **no toolkit dependencies**: whichever social
//! login library backs the ports, results are expressed with these types.
//!
//! # Design Decisions
//!
//! - `AccountNotConnected` is the single failure type for provider
//!   interactions, always tagged with the provider that failed
//! - `AuthError` is application-centric, not provider-specific
//! - Types are `Clone` for easy use in request handlers

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ProviderError, ProviderErrorCode, ProviderName, UserId};

/// Application user resolved from a social login.
///
/// Produced by the `SocialUserProvider` port once a provider profile has
/// been fetched, then injected into request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The application's identifier for this user.
    pub id: UserId,

    /// Username, usually the cleaned provider display name.
    pub username: String,

    /// Email address if the provider shared one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, username: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email,
        }
    }
}

/// A third-party provider interaction failed or was cancelled.
///
/// Built once at the raise site with every field set. Callers branch on
/// [`provider`](Self::provider) instead of parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Account not connected with {provider}: {source}")]
pub struct AccountNotConnected {
    provider: ProviderName,
    code: ProviderErrorCode,
    #[source]
    source: ProviderError,
}

impl AccountNotConnected {
    /// Wraps a toolkit failure for the given provider.
    pub fn new(provider: ProviderName, source: ProviderError) -> Self {
        Self {
            provider,
            code: source.code,
            source,
        }
    }

    /// The provider whose interaction failed.
    pub fn provider(&self) -> &ProviderName {
        &self.provider
    }

    /// The toolkit error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// The underlying toolkit error.
    pub fn cause(&self) -> &ProviderError {
        &self.source
    }
}

/// Authentication errors surfaced to the HTTP layer.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The provider interaction failed or the user cancelled it.
    #[error(transparent)]
    AccountNotConnected(#[from] AccountNotConnected),

    /// The provider profile does not map to any application user.
    #[error("User not found")]
    UserNotFound,

    /// The stored session state could not be used.
    #[error("Invalid session")]
    InvalidSession,

    /// A backing service (session store, user lookup) is unavailable.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the user should be sent back to the login page.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::AccountNotConnected(_) | AuthError::UserNotFound | AuthError::InvalidSession
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }

    /// The provider involved, if the error concerns one.
    pub fn provider(&self) -> Option<&ProviderName> {
        match self {
            AuthError::AccountNotConnected(e) => Some(e.provider()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn facebook() -> ProviderName {
        ProviderName::new("Facebook").unwrap()
    }

    #[test]
    fn authenticated_user_new_keeps_fields() {
        let user = AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            "JohnDoe",
            Some("john@example.com".to_string()),
        );

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.username, "JohnDoe");
        assert_eq!(user.email.as_deref(), Some("john@example.com"));
    }

    #[test]
    fn account_not_connected_carries_all_fields() {
        let err = AccountNotConnected::new(
            facebook(),
            ProviderError::authentication_failed("User cancelled"),
        );

        assert_eq!(err.provider().as_str(), "Facebook");
        assert_eq!(err.code(), ProviderErrorCode::AuthenticationFailed);
        assert_eq!(err.cause().message, "User cancelled");
    }

    #[test]
    fn account_not_connected_exposes_source() {
        let err = AccountNotConnected::new(
            facebook(),
            ProviderError::profile_request_failed("timeout"),
        );

        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "[PROFILE_REQUEST_FAILED] timeout");
    }

    #[test]
    fn account_not_connected_displays_provider() {
        let err = AccountNotConnected::new(
            facebook(),
            ProviderError::authentication_failed("denied"),
        );
        assert_eq!(
            err.to_string(),
            "Account not connected with Facebook: [AUTHENTICATION_FAILED] denied"
        );
    }

    #[test]
    fn auth_error_requires_reauthentication() {
        let not_connected = AuthError::from(AccountNotConnected::new(
            facebook(),
            ProviderError::authentication_failed("denied"),
        ));

        assert!(not_connected.requires_reauthentication());
        assert!(AuthError::UserNotFound.requires_reauthentication());
        assert!(AuthError::InvalidSession.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }

    #[test]
    fn auth_error_is_transient_for_service_errors() {
        assert!(AuthError::service_unavailable("timeout").is_transient());
        assert!(!AuthError::UserNotFound.is_transient());
    }

    #[test]
    fn auth_error_provider_only_for_provider_failures() {
        let err = AuthError::from(AccountNotConnected::new(
            facebook(),
            ProviderError::authentication_failed("denied"),
        ));
        assert_eq!(err.provider(), Some(&facebook()));
        assert_eq!(AuthError::UserNotFound.provider(), None);
    }
}
