//! Session persistence configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// How toolkit session data is tied to the browser and kept
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Cookie carrying the session key
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Lifetime of stored session data in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Redis connection URL; `session_store_from_config` keeps sessions in
    /// memory when unset
    pub redis_url: Option<String>,
}

impl SessionConfig {
    /// Get TTL as Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cookie_name.trim().is_empty() {
            return Err(ValidationError::InvalidCookieName);
        }
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_secs: default_ttl(),
            redis_url: None,
        }
    }
}

fn default_cookie_name() -> String {
    "social_auth_session".to_string()
}

fn default_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "social_auth_session");
        assert_eq!(config.ttl(), Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_ttl() {
        let config = SessionConfig {
            ttl_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSessionTtl)
        ));
    }

    #[test]
    fn test_validation_rejects_blank_cookie_name() {
        let config = SessionConfig {
            cookie_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
