//! Client factory port - builds a toolkit client from configuration.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::domain::foundation::ProviderError;

use super::SocialAuthClient;

/// Constructs [`SocialAuthClient`] instances.
///
/// Called lazily: a provider map invokes the factory at most once, on the
/// first operation that needs the client.
pub trait SocialAuthClientFactory: Send + Sync {
    /// Builds a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` with code `Configuration` when the toolkit
    /// rejects the configuration.
    fn create(&self, config: &ClientConfig) -> Result<Arc<dyn SocialAuthClient>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn SocialAuthClientFactory) {}
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<Arc<dyn SocialAuthClientFactory>>();
    }
}
