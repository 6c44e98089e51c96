//! Social user provider port - maps a provider profile to an application user.
//!
//! This is the "service" the firewall configuration names under
//! `user_provider.service`. The application decides how a social identity
//! becomes one of its users (lookup by provider identifier, auto-registration,
//! linking by email, ...).

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::profile::NormalizedProfile;

/// Loads the application user behind a social login.
///
/// # Contract
///
/// Implementations must:
/// - Return the user if the profile maps to one
/// - Return `AuthError::UserNotFound` if it does not
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SocialUserProvider: Send + Sync {
    /// Loads the user for a normalized provider profile.
    async fn load_user_by_profile(
        &self,
        profile: &NormalizedProfile,
    ) -> Result<AuthenticatedUser, AuthError>;
}
