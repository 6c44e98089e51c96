//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the bridge and the outside world. Adapters implement these ports.
//!
//! ## Toolkit Ports
//!
//! - `SocialAuthClient` - The multi-provider login toolkit
//! - `ProviderAdapter` - One connected provider session
//! - `SocialAuthClientFactory` - Lazy client construction
//!
//! ## Host Ports
//!
//! - `SocialUserProvider` - Maps provider profiles to application users
//! - `SessionStore` - Persists toolkit session data between requests

mod client_factory;
mod provider_adapter;
mod session_store;
mod social_auth_client;
mod user_provider;

pub use client_factory::SocialAuthClientFactory;
pub use provider_adapter::ProviderAdapter;
pub use session_store::{SessionStore, SessionStoreError};
pub use social_auth_client::{AuthenticationOutcome, SocialAuthClient};
pub use user_provider::SocialUserProvider;
