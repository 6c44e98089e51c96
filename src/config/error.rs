//! Configuration error types

use thiserror::Error;

use crate::domain::provider::RegistrationError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration parsing failed: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Login path must start with '/'")]
    InvalidLoginPath,

    #[error("Invalid provider entry #{index}: {reason}")]
    InvalidProviderEntry { index: usize, reason: String },

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("You should configure (only) one of: 'service'")]
    InvalidUserProvider,

    #[error("Invalid client base URL format")]
    InvalidBaseUrl,

    #[error("Session cookie name cannot be empty")]
    InvalidCookieName,

    #[error("Session TTL must be greater than zero")]
    InvalidSessionTtl,
}
