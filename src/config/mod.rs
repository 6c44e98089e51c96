//! Bridge configuration module
//!
//! Configuration is read from a YAML file and then overridden by environment
//! variables with the `SOCIAL_AUTH` prefix, nested values separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use social_auth_bridge::config::SocialAuthConfig;
//!
//! let config = SocialAuthConfig::load("config/social_auth.yaml")
//!     .expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```
//!
//! ```yaml
//! firewall:
//!   login_path: /login
//!   providers_check_path:
//!     - { name: facebook, check_path: /login/check-facebook }
//!     - { name: google, check_path: /login/check-google }
//!   user_provider:
//!     service: app.social_user_provider
//! client:
//!   base_url: https://example.com/auth/endpoint
//!   providers:
//!     facebook: { keys: { id: "...", secret: "..." }, scope: email }
//!     google: { keys: { id: "...", secret: "..." } }
//! ```

mod client;
mod error;
mod firewall;
mod session;

pub use client::{ClientConfig, ProviderKeys, ProviderSettings};
pub use error::{ConfigError, ValidationError};
pub use firewall::{FirewallConfig, ProviderCheckPathEntry};
pub use session::SessionConfig;

use serde::Deserialize;
use std::path::Path;

use crate::domain::foundation::ProviderName;

/// Root bridge configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SocialAuthConfig {
    /// Firewall: login path, check paths, user provider
    pub firewall: FirewallConfig,

    /// Toolkit configuration
    pub client: ClientConfig,

    /// Session persistence
    #[serde(default)]
    pub session: SessionConfig,
}

impl SocialAuthConfig {
    /// Load configuration from a YAML file plus environment overrides
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the YAML file at `path`
    /// 3. Applies environment variables with `SOCIAL_AUTH` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SOCIAL_AUTH__FIREWALL__LOGIN_PATH=/signin` -> `firewall.login_path`
    /// - `SOCIAL_AUTH__CLIENT__BASE_URL=...` -> `client.base_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or values cannot be
    /// parsed into expected types.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).format(config::FileFormat::Yaml))
            .add_source(
                config::Environment::default()
                    .prefix("SOCIAL_AUTH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Parse configuration from a YAML document, without environment overrides
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.firewall.validate()?;
        self.client.validate()?;
        self.session.validate()?;
        Ok(())
    }

    /// Check-path providers with no entry under `client.providers`.
    ///
    /// Such providers never authenticate: the provider map reports them as
    /// unconfigured and the request falls through.
    pub fn unconfigured_providers(&self) -> Result<Vec<ProviderName>, ValidationError> {
        Ok(self
            .firewall
            .registrations()?
            .iter()
            .filter(|r| !self.client.is_configured(&r.name))
            .map(|r| r.name.clone())
            .collect())
    }
}
