//! Provider adapter wrapper - one successful provider connection.
//!
//! `SocialAuthResponse` fetches the user's profile as soon as it is built
//! and exposes it through the normalized accessors the host needs.
//!
//! # Lifecycle
//!
//! ```text
//! new(adapter) ──profile ok──► SocialAuthResponse ──drop / logout()──► adapter.logout()
//!      │
//!      └──profile failed──► adapter.logout(), Err(AccountNotConnected)
//! ```
//!
//! The provider session is released exactly once, whichever path ends it.

use chrono::NaiveDate;

use crate::domain::foundation::{AccountNotConnected, ProviderError, ProviderErrorCode, ProviderName};
use crate::domain::profile::{NormalizedProfile, UserActivity, UserContact, UserProfile};
use crate::ports::ProviderAdapter;

/// A connected provider session together with the fetched user profile.
pub struct SocialAuthResponse {
    adapter: Option<Box<dyn ProviderAdapter>>,
    profile: UserProfile,
    normalized: NormalizedProfile,
}

impl SocialAuthResponse {
    /// Wraps a connected adapter, fetching its user profile immediately.
    ///
    /// # Errors
    ///
    /// If the profile cannot be fetched the adapter is logged out and an
    /// `AccountNotConnected` tagged with the adapter's provider is returned.
    pub async fn new(adapter: Box<dyn ProviderAdapter>) -> Result<Self, AccountNotConnected> {
        match adapter.user_profile().await {
            Ok(profile) => {
                let normalized = NormalizedProfile::from_profile(adapter.id().clone(), &profile);
                Ok(Self {
                    adapter: Some(adapter),
                    profile,
                    normalized,
                })
            }
            Err(e) => {
                adapter.logout();
                Err(AccountNotConnected::new(adapter.id().clone(), e))
            }
        }
    }

    /// The provider's identifier for the user.
    pub fn identifier(&self) -> &str {
        &self.normalized.identifier
    }

    /// Display name restricted to `[A-Za-z0-9_]`.
    pub fn username(&self) -> &str {
        &self.normalized.username
    }

    pub fn email(&self) -> Option<&str> {
        self.normalized.email.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.normalized.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.normalized.last_name.as_deref()
    }

    /// Birth date, when the provider supplied a complete and valid one.
    pub fn birthday(&self) -> Option<NaiveDate> {
        self.normalized.birthday
    }

    /// The raw profile as returned by the provider.
    pub fn user_profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn provider_name(&self) -> &ProviderName {
        &self.normalized.provider
    }

    pub fn normalized_profile(&self) -> &NormalizedProfile {
        &self.normalized
    }

    /// The user's contacts at the provider.
    pub async fn user_contacts(&self) -> Result<Vec<UserContact>, AccountNotConnected> {
        let adapter = self.adapter()?;
        adapter
            .user_contacts()
            .await
            .map_err(|e| AccountNotConnected::new(self.provider_name().clone(), e))
    }

    /// The user's recent activity at the provider.
    pub async fn user_activity(&self) -> Result<Vec<UserActivity>, AccountNotConnected> {
        let adapter = self.adapter()?;
        adapter
            .user_activity()
            .await
            .map_err(|e| AccountNotConnected::new(self.provider_name().clone(), e))
    }

    /// Ends the provider session now instead of at drop.
    pub fn logout(mut self) {
        self.release();
    }

    fn adapter(&self) -> Result<&dyn ProviderAdapter, AccountNotConnected> {
        self.adapter.as_deref().ok_or_else(|| {
            AccountNotConnected::new(
                self.provider_name().clone(),
                ProviderError::new(
                    ProviderErrorCode::UserNotConnected,
                    "Provider session already released",
                ),
            )
        })
    }

    fn release(&mut self) {
        if let Some(adapter) = self.adapter.take() {
            adapter.logout();
        }
    }
}

impl Drop for SocialAuthResponse {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for SocialAuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialAuthResponse")
            .field("provider", self.provider_name())
            .field("identifier", &self.identifier())
            .field("released", &self.adapter.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::social::{AdapterCalls, MockProviderAdapter};
    use crate::domain::foundation::ProviderErrorCode;

    fn facebook() -> ProviderName {
        ProviderName::new("facebook").unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile::new("fb-42")
            .with_display_name("Jöhn Doe!")
            .with_email("john@example.com")
            .with_names("John", "Doe")
            .with_birth_date(5, 7, 1990)
    }

    fn adapter(calls: &AdapterCalls) -> MockProviderAdapter {
        MockProviderAdapter::new(facebook(), profile()).with_calls(calls.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn new_fetches_profile_once() {
        let calls = AdapterCalls::new();

        let response = SocialAuthResponse::new(Box::new(adapter(&calls))).await.unwrap();

        assert_eq!(calls.profile_request_count(), 1);
        assert_eq!(response.identifier(), "fb-42");
        assert_eq!(calls.logout_count(), 0);
    }

    #[tokio::test]
    async fn failed_profile_fetch_logs_out_once_and_tags_provider() {
        let calls = AdapterCalls::new();
        let adapter = adapter(&calls)
            .with_profile_error(ProviderError::profile_request_failed("token revoked"));

        let err = SocialAuthResponse::new(Box::new(adapter)).await.unwrap_err();

        assert_eq!(err.provider(), &facebook());
        assert_eq!(err.code(), ProviderErrorCode::ProfileRequestFailed);
        assert_eq!(calls.logout_count(), 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn accessors_expose_normalized_fields() {
        let calls = AdapterCalls::new();
        let response = SocialAuthResponse::new(Box::new(adapter(&calls))).await.unwrap();

        assert_eq!(response.username(), "JhnDoe");
        assert_eq!(response.email(), Some("john@example.com"));
        assert_eq!(response.first_name(), Some("John"));
        assert_eq!(response.last_name(), Some("Doe"));
        assert_eq!(response.birthday(), NaiveDate::from_ymd_opt(1990, 7, 5));
        assert_eq!(response.provider_name(), &facebook());
        assert_eq!(response.user_profile().display_name.as_deref(), Some("Jöhn Doe!"));
        assert_eq!(response.normalized_profile().identifier, "fb-42");
    }

    #[tokio::test]
    async fn birthday_is_none_when_a_part_is_missing() {
        let mut partial = profile();
        partial.birth_year = None;
        let adapter = MockProviderAdapter::new(facebook(), partial);

        let response = SocialAuthResponse::new(Box::new(adapter)).await.unwrap();

        assert_eq!(response.birthday(), None);
    }

    #[tokio::test]
    async fn contacts_and_activity_delegate_to_adapter() {
        let adapter = MockProviderAdapter::new(facebook(), profile()).with_contacts(Ok(vec![
            UserContact {
                identifier: "friend-1".to_string(),
                ..Default::default()
            },
        ]));

        let response = SocialAuthResponse::new(Box::new(adapter)).await.unwrap();

        assert_eq!(response.user_contacts().await.unwrap().len(), 1);
        assert!(response.user_activity().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn contacts_failure_is_wrapped_with_provider() {
        let adapter = MockProviderAdapter::new(facebook(), profile()).with_contacts(Err(
            ProviderError::new(ProviderErrorCode::FeatureNotSupported, "no contacts API"),
        ));

        let response = SocialAuthResponse::new(Box::new(adapter)).await.unwrap();
        let err = response.user_contacts().await.unwrap_err();

        assert_eq!(err.provider(), &facebook());
        assert_eq!(err.code(), ProviderErrorCode::FeatureNotSupported);
    }

    #[tokio::test]
    async fn activity_failure_is_wrapped_with_provider() {
        let adapter = MockProviderAdapter::new(facebook(), profile())
            .with_activity(Err(ProviderError::new(ProviderErrorCode::Unspecified, "boom")));

        let response = SocialAuthResponse::new(Box::new(adapter)).await.unwrap();

        assert_eq!(
            response.user_activity().await.unwrap_err().provider(),
            &facebook()
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Teardown
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn drop_logs_out_exactly_once() {
        let calls = AdapterCalls::new();
        let response = SocialAuthResponse::new(Box::new(adapter(&calls))).await.unwrap();

        drop(response);

        assert_eq!(calls.logout_count(), 1);
    }

    #[tokio::test]
    async fn explicit_logout_does_not_double_release() {
        let calls = AdapterCalls::new();
        let response = SocialAuthResponse::new(Box::new(adapter(&calls))).await.unwrap();

        response.logout();

        assert_eq!(calls.logout_count(), 1);
    }

    #[tokio::test]
    async fn debug_output_names_provider() {
        let response = SocialAuthResponse::new(Box::new(MockProviderAdapter::new(
            facebook(),
            profile(),
        )))
        .await
        .unwrap();

        let debug = format!("{:?}", response);
        assert!(debug.contains("facebook"));
        assert!(debug.contains("released: false"));
    }
}
