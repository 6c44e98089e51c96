//! Social login toolkit configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::error::ValidationError;
use crate::domain::foundation::ProviderName;

/// Configuration handed to the toolkit when a client is built
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    /// Callback endpoint the toolkit uses for provider redirects
    pub base_url: String,

    /// Per-provider settings, keyed by provider name
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderSettings>,

    /// Enables the toolkit's own debug output
    #[serde(default)]
    pub debug_mode: bool,
}

/// Settings for a single provider
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub keys: ProviderKeys,

    /// Requested permission scope
    pub scope: Option<String>,

    /// Extra parameters passed along with the authorization request
    #[serde(default)]
    pub auth_params: BTreeMap<String, String>,
}

/// Application credentials registered with a provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderKeys {
    /// OAuth2 client id
    pub id: Option<String>,

    /// OAuth1 consumer key
    pub key: Option<String>,

    pub secret: Option<SecretString>,
}

impl ClientConfig {
    /// Returns true if the provider appears in the toolkit configuration.
    ///
    /// Presence is what counts; a disabled provider is still configured
    /// and the toolkit itself reports it as disabled.
    pub fn is_configured(&self, provider: &ProviderName) -> bool {
        self.settings(provider).is_some()
    }

    /// Settings for a provider, if configured.
    ///
    /// An exact key wins. Otherwise the first key equal to the name ignoring
    /// ASCII case is used, since the file loader lowercases map keys.
    pub fn settings(&self, provider: &ProviderName) -> Option<&ProviderSettings> {
        let name = provider.as_str();
        self.providers.get(name).or_else(|| {
            self.providers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, settings)| settings)
        })
    }

    /// Extra authorization parameters for a provider.
    pub fn auth_params(&self, provider: &ProviderName) -> BTreeMap<String, String> {
        self.settings(provider)
            .map(|s| s.auth_params.clone())
            .unwrap_or_default()
    }

    /// Validate toolkit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("CLIENT_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

fn default_enabled() -> bool {
    true
}
