//! Provider adapter port - one live connection to one identity provider.
//!
//! The social login toolkit hands out an adapter per provider once the user
//! has authenticated (or an earlier authentication was resumed from session
//! data). The bridge owns the adapter exclusively while it adapts the
//! response and releases it with [`ProviderAdapter::logout`].

use async_trait::async_trait;

use crate::domain::foundation::{ProviderError, ProviderName};
use crate::domain::profile::{UserActivity, UserContact, UserProfile};

/// A connected session with a single external provider.
///
/// # Contract
///
/// Implementations must:
/// - Return the provider's configured name from `id()`
/// - Report remote failures as `ProviderError` with a toolkit code
/// - Make `logout()` local and infallible (it only drops stored tokens)
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// The provider this adapter is connected to.
    fn id(&self) -> &ProviderName;

    /// Fetches the user's profile from the provider.
    async fn user_profile(&self) -> Result<UserProfile, ProviderError>;

    /// Fetches the user's contact list.
    async fn user_contacts(&self) -> Result<Vec<UserContact>, ProviderError>;

    /// Fetches the user's recent activity stream.
    async fn user_activity(&self) -> Result<Vec<UserActivity>, ProviderError>;

    /// Forgets the provider tokens held for this user.
    fn logout(&self);
}
