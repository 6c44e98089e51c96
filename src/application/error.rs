//! Errors raised while assembling the social login firewall.

use thiserror::Error;

use crate::config::{ConfigError, ValidationError};

/// Setup failures for `SocialAuthFirewall`.
#[derive(Debug, Error)]
pub enum SocialAuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid social auth configuration: {0}")]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_names_the_problem() {
        let err = SocialAuthError::from(ValidationError::InvalidUserProvider);
        assert_eq!(
            err.to_string(),
            "Invalid social auth configuration: You should configure (only) one of: 'service'"
        );
    }
}
