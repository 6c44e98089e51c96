//! Social login adapters.
//!
//! Implementations of the toolkit and host ports:
//!
//! - `mock` - Test implementations that don't contact real providers
//! - (future) a production client backed by a concrete OAuth toolkit

mod mock;

pub use mock::{
    AdapterCalls, MockClientFactory, MockProviderAdapter, MockSocialAuthClient, MockUserProvider,
    ProviderBehavior,
};
