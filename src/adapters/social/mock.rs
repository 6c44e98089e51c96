//! Mock social login adapters for testing.
//!
//! These adapters implement the toolkit and host ports so the bridge can be
//! exercised without contacting a real identity provider.
//!
//! # Example
//!
//! ```ignore
//! use social_auth_bridge::adapters::social::{MockClientFactory, MockSocialAuthClient, ProviderBehavior};
//! use social_auth_bridge::domain::profile::UserProfile;
//!
//! let factory = MockClientFactory::new(|| {
//!     MockSocialAuthClient::new().with_provider(
//!         "facebook",
//!         ProviderBehavior::connect(UserProfile::new("fb-1").with_display_name("Ada")),
//!     )
//! });
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::domain::foundation::{
    AuthError, AuthenticatedUser, ProviderError, ProviderErrorCode, ProviderName, UserId,
};
use crate::domain::profile::{NormalizedProfile, UserActivity, UserContact, UserProfile};
use crate::domain::provider::SessionData;
use crate::ports::{
    AuthenticationOutcome, ProviderAdapter, SocialAuthClient, SocialAuthClientFactory,
    SocialUserProvider,
};

// ════════════════════════════════════════════════════════════════════════════════
// Call tracking
// ════════════════════════════════════════════════════════════════════════════════

/// Shared counters recording what adapters were asked to do.
///
/// Clones share the same counters, so a test can keep one while the
/// adapter it was handed to is moved away.
#[derive(Debug, Clone, Default)]
pub struct AdapterCalls {
    logouts: Arc<AtomicUsize>,
    profile_requests: Arc<AtomicUsize>,
}

impl AdapterCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `logout()` calls observed.
    pub fn logout_count(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }

    /// Number of `user_profile()` calls observed.
    pub fn profile_request_count(&self) -> usize {
        self.profile_requests.load(Ordering::SeqCst)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// MockProviderAdapter
// ════════════════════════════════════════════════════════════════════════════════

type ConnectedSet = Arc<RwLock<BTreeSet<ProviderName>>>;

/// Mock provider adapter with scripted responses.
pub struct MockProviderAdapter {
    id: ProviderName,
    profile: Result<UserProfile, ProviderError>,
    contacts: Result<Vec<UserContact>, ProviderError>,
    activity: Result<Vec<UserActivity>, ProviderError>,
    calls: AdapterCalls,
    connected: Option<ConnectedSet>,
}

impl MockProviderAdapter {
    /// Creates an adapter that returns `profile` and empty contact/activity lists.
    pub fn new(id: ProviderName, profile: UserProfile) -> Self {
        Self {
            id,
            profile: Ok(profile),
            contacts: Ok(Vec::new()),
            activity: Ok(Vec::new()),
            calls: AdapterCalls::new(),
            connected: None,
        }
    }

    /// Makes the profile request fail.
    pub fn with_profile_error(mut self, error: ProviderError) -> Self {
        self.profile = Err(error);
        self
    }

    /// Sets the contacts response.
    pub fn with_contacts(mut self, contacts: Result<Vec<UserContact>, ProviderError>) -> Self {
        self.contacts = contacts;
        self
    }

    /// Sets the activity response.
    pub fn with_activity(mut self, activity: Result<Vec<UserActivity>, ProviderError>) -> Self {
        self.activity = activity;
        self
    }

    /// Records calls into the given counters.
    pub fn with_calls(mut self, calls: AdapterCalls) -> Self {
        self.calls = calls;
        self
    }

    /// Counters for this adapter.
    pub fn calls(&self) -> AdapterCalls {
        self.calls.clone()
    }

    fn attached_to(mut self, connected: ConnectedSet) -> Self {
        self.connected = Some(connected);
        self
    }
}

#[async_trait]
impl ProviderAdapter for MockProviderAdapter {
    fn id(&self) -> &ProviderName {
        &self.id
    }

    async fn user_profile(&self) -> Result<UserProfile, ProviderError> {
        self.calls.profile_requests.fetch_add(1, Ordering::SeqCst);
        self.profile.clone()
    }

    async fn user_contacts(&self) -> Result<Vec<UserContact>, ProviderError> {
        self.contacts.clone()
    }

    async fn user_activity(&self) -> Result<Vec<UserActivity>, ProviderError> {
        self.activity.clone()
    }

    fn logout(&self) {
        self.calls.logouts.fetch_add(1, Ordering::SeqCst);
        if let Some(connected) = &self.connected {
            connected.write().unwrap().remove(&self.id);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// MockSocialAuthClient
// ════════════════════════════════════════════════════════════════════════════════

/// How a scripted provider reacts to `authenticate`.
#[derive(Debug, Clone)]
pub enum ProviderBehavior {
    /// Connects immediately.
    Connect {
        profile: UserProfile,
        profile_error: Option<ProviderError>,
    },

    /// First call redirects to `url`; the next call (the callback) connects.
    RedirectThenConnect { url: String, profile: UserProfile },

    /// Authentication fails with the given error.
    Fail(ProviderError),
}

impl ProviderBehavior {
    pub fn connect(profile: UserProfile) -> Self {
        ProviderBehavior::Connect {
            profile,
            profile_error: None,
        }
    }

    /// Connects, but the profile request afterwards fails.
    pub fn connect_with_profile_error(error: ProviderError) -> Self {
        ProviderBehavior::Connect {
            profile: UserProfile::default(),
            profile_error: Some(error),
        }
    }

    pub fn redirect_then_connect(url: impl Into<String>, profile: UserProfile) -> Self {
        ProviderBehavior::RedirectThenConnect {
            url: url.into(),
            profile,
        }
    }

    pub fn fail(error: ProviderError) -> Self {
        ProviderBehavior::Fail(error)
    }

    fn profile(&self) -> Option<(&UserProfile, Option<&ProviderError>)> {
        match self {
            ProviderBehavior::Connect {
                profile,
                profile_error,
            } => Some((profile, profile_error.as_ref())),
            ProviderBehavior::RedirectThenConnect { profile, .. } => Some((profile, None)),
            ProviderBehavior::Fail(_) => None,
        }
    }
}

/// Session state exported by the mock client.
#[derive(Debug, Default, Serialize, Deserialize)]
struct MockSessionState {
    connected: BTreeSet<ProviderName>,
    pending: BTreeSet<ProviderName>,
}

/// Mock multi-provider client.
///
/// Tracks connected and pending providers, and exports them as JSON
/// session data so a flow can span several client instances.
#[derive(Default)]
pub struct MockSocialAuthClient {
    behaviors: HashMap<ProviderName, ProviderBehavior>,
    connected: ConnectedSet,
    pending: RwLock<BTreeSet<ProviderName>>,
    calls: AdapterCalls,
    authenticate_requests: RwLock<Vec<(ProviderName, BTreeMap<String, String>)>>,
}

impl MockSocialAuthClient {
    /// Creates a client with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the behavior of a provider.
    ///
    /// # Panics
    ///
    /// Panics if `name` is blank.
    pub fn with_provider(mut self, name: &str, behavior: ProviderBehavior) -> Self {
        self.behaviors
            .insert(ProviderName::new(name).expect("valid provider name"), behavior);
        self
    }

    /// Marks a provider as already connected.
    pub fn with_connected(self, name: &str) -> Self {
        self.connected
            .write()
            .unwrap()
            .insert(ProviderName::new(name).expect("valid provider name"));
        self
    }

    /// Shares call counters with every adapter this client issues.
    pub fn with_calls(mut self, calls: AdapterCalls) -> Self {
        self.calls = calls;
        self
    }

    /// Every `(provider, params)` pair passed to `authenticate`.
    pub fn authenticate_requests(&self) -> Vec<(ProviderName, BTreeMap<String, String>)> {
        self.authenticate_requests.read().unwrap().clone()
    }

    fn issue_adapter(&self, name: &ProviderName) -> Result<Box<dyn ProviderAdapter>, ProviderError> {
        let (profile, profile_error) = self
            .behaviors
            .get(name)
            .and_then(ProviderBehavior::profile)
            .ok_or_else(|| {
                ProviderError::new(
                    ProviderErrorCode::UnknownOrDisabledProvider,
                    format!("Unknown or disabled provider {}", name),
                )
            })?;

        let mut adapter = MockProviderAdapter::new(name.clone(), profile.clone())
            .with_calls(self.calls.clone())
            .attached_to(Arc::clone(&self.connected));
        if let Some(error) = profile_error {
            adapter = adapter.with_profile_error(error.clone());
        }
        Ok(Box::new(adapter))
    }

    fn connect(&self, name: &ProviderName) -> Result<AuthenticationOutcome, ProviderError> {
        self.pending.write().unwrap().remove(name);
        self.connected.write().unwrap().insert(name.clone());
        self.issue_adapter(name).map(AuthenticationOutcome::Connected)
    }
}

#[async_trait]
impl SocialAuthClient for MockSocialAuthClient {
    async fn authenticate(
        &self,
        provider: &ProviderName,
        params: &BTreeMap<String, String>,
    ) -> Result<AuthenticationOutcome, ProviderError> {
        self.authenticate_requests
            .write()
            .unwrap()
            .push((provider.clone(), params.clone()));

        if self.is_connected_with(provider) {
            return self.issue_adapter(provider).map(AuthenticationOutcome::Connected);
        }

        match self.behaviors.get(provider) {
            None => Err(ProviderError::new(
                ProviderErrorCode::UnknownOrDisabledProvider,
                format!("Unknown or disabled provider {}", provider),
            )),
            Some(ProviderBehavior::Fail(error)) => Err(error.clone()),
            Some(ProviderBehavior::Connect { .. }) => self.connect(provider),
            Some(ProviderBehavior::RedirectThenConnect { url, .. }) => {
                if self.pending.read().unwrap().contains(provider) {
                    self.connect(provider)
                } else {
                    self.pending.write().unwrap().insert(provider.clone());
                    Ok(AuthenticationOutcome::Redirect(url.clone()))
                }
            }
        }
    }

    fn is_connected_with(&self, provider: &ProviderName) -> bool {
        self.connected.read().unwrap().contains(provider)
    }

    fn adapter(&self, provider: &ProviderName) -> Result<Box<dyn ProviderAdapter>, ProviderError> {
        if !self.is_connected_with(provider) {
            return Err(ProviderError::new(
                ProviderErrorCode::UserNotConnected,
                format!("User not connected with {}", provider),
            ));
        }
        self.issue_adapter(provider)
    }

    fn connected_providers(&self) -> Vec<ProviderName> {
        self.connected.read().unwrap().iter().cloned().collect()
    }

    fn session_data(&self) -> SessionData {
        let state = MockSessionState {
            connected: self.connected.read().unwrap().clone(),
            pending: self.pending.read().unwrap().clone(),
        };
        SessionData::new(serde_json::to_string(&state).unwrap_or_default())
    }

    fn restore_session_data(&self, data: &SessionData) -> Result<(), ProviderError> {
        let state: MockSessionState = serde_json::from_str(data.as_str())
            .map_err(|e| ProviderError::new(ProviderErrorCode::Unspecified, e.to_string()))?;
        *self.connected.write().unwrap() = state.connected;
        *self.pending.write().unwrap() = state.pending;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// MockClientFactory
// ════════════════════════════════════════════════════════════════════════════════

type ClientBuilder = dyn Fn() -> MockSocialAuthClient + Send + Sync;

/// Mock client factory counting how many clients it built.
pub struct MockClientFactory {
    build: Box<ClientBuilder>,
    built: RwLock<Vec<Arc<MockSocialAuthClient>>>,
    force_error: RwLock<Option<ProviderError>>,
}

impl MockClientFactory {
    /// Creates a factory that builds clients with `build`.
    pub fn new<F>(build: F) -> Self
    where
        F: Fn() -> MockSocialAuthClient + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
            built: RwLock::new(Vec::new()),
            force_error: RwLock::new(None),
        }
    }

    /// Forces every `create` to fail with the given error.
    pub fn with_error(self, error: ProviderError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Number of clients built so far.
    pub fn create_count(&self) -> usize {
        self.built.read().unwrap().len()
    }

    /// The most recently built client.
    pub fn last_client(&self) -> Option<Arc<MockSocialAuthClient>> {
        self.built.read().unwrap().last().cloned()
    }
}

impl SocialAuthClientFactory for MockClientFactory {
    fn create(&self, _config: &ClientConfig) -> Result<Arc<dyn SocialAuthClient>, ProviderError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }
        let client = Arc::new((self.build)());
        self.built.write().unwrap().push(Arc::clone(&client));
        Ok(client)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// MockUserProvider
// ════════════════════════════════════════════════════════════════════════════════

/// Mock user provider keyed by `provider:identifier`.
#[derive(Debug, Default)]
pub struct MockUserProvider {
    users: RwLock<HashMap<String, AuthenticatedUser>>,
    auto_register: bool,
    force_error: RwLock<Option<AuthError>>,
}

impl MockUserProvider {
    /// Creates a provider that knows no users.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a provider identity to a user.
    pub fn with_user(self, provider: &str, identifier: &str, user: AuthenticatedUser) -> Self {
        self.users
            .write()
            .unwrap()
            .insert(format!("{}:{}", provider, identifier), user);
        self
    }

    /// Builds a user for any unknown profile instead of failing.
    pub fn with_auto_register(mut self) -> Self {
        self.auto_register = true;
        self
    }

    /// Forces all lookups to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Returns the number of known users.
    pub fn user_count(&self) -> usize {
        self.users.read().unwrap().len()
    }
}

#[async_trait]
impl SocialUserProvider for MockUserProvider {
    async fn load_user_by_profile(
        &self,
        profile: &NormalizedProfile,
    ) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        let key = format!("{}:{}", profile.provider, profile.identifier);
        if let Some(user) = self.users.read().unwrap().get(&key) {
            return Ok(user.clone());
        }
        if !self.auto_register {
            return Err(AuthError::UserNotFound);
        }

        let id = UserId::new(key.clone()).map_err(|_| AuthError::UserNotFound)?;
        let user = AuthenticatedUser::new(id, profile.username.clone(), profile.email.clone());
        self.users.write().unwrap().insert(key, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ProviderName {
        ProviderName::new(s).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile::new("fb-1").with_display_name("Ada Lovelace")
    }

    // ════════════════════════════════════════════════════════════════════════════
    // MockProviderAdapter Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn mock_adapter_returns_profile_and_counts_requests() {
        let adapter = MockProviderAdapter::new(name("facebook"), profile());
        let calls = adapter.calls();

        let result = adapter.user_profile().await;

        assert_eq!(result.unwrap().identifier, "fb-1");
        assert_eq!(calls.profile_request_count(), 1);
    }

    #[tokio::test]
    async fn mock_adapter_with_profile_error_fails() {
        let adapter = MockProviderAdapter::new(name("facebook"), profile())
            .with_profile_error(ProviderError::profile_request_failed("boom"));

        assert!(adapter.user_profile().await.is_err());
    }

    #[test]
    fn mock_adapter_counts_logouts() {
        let adapter = MockProviderAdapter::new(name("facebook"), profile());
        let calls = adapter.calls();

        adapter.logout();
        adapter.logout();

        assert_eq!(calls.logout_count(), 2);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // MockSocialAuthClient Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn mock_client_connects_immediately() {
        let client =
            MockSocialAuthClient::new().with_provider("facebook", ProviderBehavior::connect(profile()));

        let outcome = client
            .authenticate(&name("facebook"), &BTreeMap::new())
            .await
            .unwrap();

        assert!(outcome.is_connected());
        assert!(client.is_connected_with(&name("facebook")));
    }

    #[tokio::test]
    async fn mock_client_redirects_then_connects() {
        let client = MockSocialAuthClient::new().with_provider(
            "google",
            ProviderBehavior::redirect_then_connect("https://accounts.example/authorize", profile()),
        );

        let first = client.authenticate(&name("google"), &BTreeMap::new()).await.unwrap();
        assert!(matches!(first, AuthenticationOutcome::Redirect(_)));
        assert!(!client.is_connected_with(&name("google")));

        let second = client.authenticate(&name("google"), &BTreeMap::new()).await.unwrap();
        assert!(second.is_connected());
    }

    #[tokio::test]
    async fn mock_client_fail_behavior_returns_error() {
        let client = MockSocialAuthClient::new().with_provider(
            "twitter",
            ProviderBehavior::fail(ProviderError::authentication_failed("cancelled")),
        );

        let result = client.authenticate(&name("twitter"), &BTreeMap::new()).await;

        assert_eq!(
            result.unwrap_err().code,
            ProviderErrorCode::AuthenticationFailed
        );
    }

    #[tokio::test]
    async fn mock_client_session_data_round_trips_pending_state() {
        let behavior =
            ProviderBehavior::redirect_then_connect("https://accounts.example/authorize", profile());
        let first = MockSocialAuthClient::new().with_provider("google", behavior.clone());
        first.authenticate(&name("google"), &BTreeMap::new()).await.unwrap();

        let second = MockSocialAuthClient::new().with_provider("google", behavior);
        second.restore_session_data(&first.session_data()).unwrap();
        let outcome = second.authenticate(&name("google"), &BTreeMap::new()).await.unwrap();

        assert!(outcome.is_connected());
    }

    #[test]
    fn mock_client_rejects_corrupted_session_data() {
        let client = MockSocialAuthClient::new();
        assert!(client
            .restore_session_data(&SessionData::new("not json"))
            .is_err());
    }

    #[test]
    fn mock_client_adapter_logout_disconnects() {
        let client = MockSocialAuthClient::new()
            .with_provider("facebook", ProviderBehavior::connect(profile()))
            .with_connected("facebook");

        let adapter = client.adapter(&name("facebook")).unwrap();
        adapter.logout();

        assert!(client.connected_providers().is_empty());
    }

    #[test]
    fn mock_client_adapter_requires_connection() {
        let client =
            MockSocialAuthClient::new().with_provider("facebook", ProviderBehavior::connect(profile()));

        let err = client.adapter(&name("facebook")).err().unwrap();
        assert_eq!(err.code, ProviderErrorCode::UserNotConnected);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // MockClientFactory Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn mock_factory_counts_creations() {
        let factory = MockClientFactory::new(MockSocialAuthClient::new);

        factory.create(&ClientConfig::default()).unwrap();
        factory.create(&ClientConfig::default()).unwrap();

        assert_eq!(factory.create_count(), 2);
    }

    #[test]
    fn mock_factory_with_error_fails() {
        let factory = MockClientFactory::new(MockSocialAuthClient::new).with_error(
            ProviderError::new(ProviderErrorCode::Configuration, "bad config"),
        );

        assert!(factory.create(&ClientConfig::default()).is_err());
        assert_eq!(factory.create_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // MockUserProvider Tests
    // ════════════════════════════════════════════════════════════════════════════

    fn normalized() -> NormalizedProfile {
        NormalizedProfile::from_profile(name("facebook"), &profile())
    }

    #[tokio::test]
    async fn mock_user_provider_returns_mapped_user() {
        let user = AuthenticatedUser::new(UserId::new("user-1").unwrap(), "Ada", None);
        let provider = MockUserProvider::new().with_user("facebook", "fb-1", user.clone());

        assert_eq!(provider.load_user_by_profile(&normalized()).await.unwrap(), user);
    }

    #[tokio::test]
    async fn mock_user_provider_unknown_is_not_found() {
        let provider = MockUserProvider::new();

        let result = provider.load_user_by_profile(&normalized()).await;

        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn mock_user_provider_auto_registers() {
        let provider = MockUserProvider::new().with_auto_register();

        let user = provider.load_user_by_profile(&normalized()).await.unwrap();

        assert_eq!(user.id.as_str(), "facebook:fb-1");
        assert_eq!(user.username, "AdaLovelace");
        assert_eq!(provider.user_count(), 1);
    }

    #[tokio::test]
    async fn mock_user_provider_with_error_forces_error() {
        let provider = MockUserProvider::new()
            .with_auto_register()
            .with_error(AuthError::service_unavailable("db down"));

        let result = provider.load_user_by_profile(&normalized()).await;

        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));
    }
}
