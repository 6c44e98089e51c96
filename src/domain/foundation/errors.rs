//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Failure categories reported by the social login toolkit.
///
/// The numeric values follow the toolkit's own error catalogue so codes
/// survive a round trip through logs and session data unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    Unspecified,
    Configuration,
    ProviderMisconfigured,
    UnknownOrDisabledProvider,
    MissingCredentials,
    AuthenticationFailed,
    ProfileRequestFailed,
    UserNotConnected,
    FeatureNotSupported,
}

impl ProviderErrorCode {
    /// Numeric code as used by the toolkit.
    pub fn as_u16(&self) -> u16 {
        match self {
            ProviderErrorCode::Unspecified => 0,
            ProviderErrorCode::Configuration => 1,
            ProviderErrorCode::ProviderMisconfigured => 2,
            ProviderErrorCode::UnknownOrDisabledProvider => 3,
            ProviderErrorCode::MissingCredentials => 4,
            ProviderErrorCode::AuthenticationFailed => 5,
            ProviderErrorCode::ProfileRequestFailed => 6,
            ProviderErrorCode::UserNotConnected => 7,
            ProviderErrorCode::FeatureNotSupported => 8,
        }
    }

    /// Maps a toolkit numeric code back to a category.
    ///
    /// Unknown codes collapse to `Unspecified`.
    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => ProviderErrorCode::Configuration,
            2 => ProviderErrorCode::ProviderMisconfigured,
            3 => ProviderErrorCode::UnknownOrDisabledProvider,
            4 => ProviderErrorCode::MissingCredentials,
            5 => ProviderErrorCode::AuthenticationFailed,
            6 => ProviderErrorCode::ProfileRequestFailed,
            7 => ProviderErrorCode::UserNotConnected,
            8 => ProviderErrorCode::FeatureNotSupported,
            _ => ProviderErrorCode::Unspecified,
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderErrorCode::Unspecified => "UNSPECIFIED",
            ProviderErrorCode::Configuration => "CONFIGURATION",
            ProviderErrorCode::ProviderMisconfigured => "PROVIDER_MISCONFIGURED",
            ProviderErrorCode::UnknownOrDisabledProvider => "UNKNOWN_OR_DISABLED_PROVIDER",
            ProviderErrorCode::MissingCredentials => "MISSING_CREDENTIALS",
            ProviderErrorCode::AuthenticationFailed => "AUTHENTICATION_FAILED",
            ProviderErrorCode::ProfileRequestFailed => "PROFILE_REQUEST_FAILED",
            ProviderErrorCode::UserNotConnected => "USER_NOT_CONNECTED",
            ProviderErrorCode::FeatureNotSupported => "FEATURE_NOT_SUPPORTED",
        };
        write!(f, "{}", s)
    }
}

/// An error raised by the social login toolkit.
///
/// This is the raw failure coming out of a port implementation. Failures
/// tied to one provider (authenticate, profile, contacts, activity) are
/// wrapped into [`AccountNotConnected`](super::AccountNotConnected) with
/// that provider. Map-wide operations of `ProviderMap` (`client`,
/// `list_connected`, `logout_all`, `session_state`,
/// `restore_session_state`) return it bare since no single provider is
/// at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    pub message: String,
}

impl ProviderError {
    /// Creates a new toolkit error.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for an authentication failure (denied or cancelled).
    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationFailed, message)
    }

    /// Shorthand for a failed profile request.
    pub fn profile_request_failed(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ProfileRequestFailed, message)
    }
}
