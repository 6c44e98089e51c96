//! Application layer - provider routing and the social login flow.
//!
//! - `ProviderMap` resolves check paths to providers and owns the lazily
//!   built toolkit client
//! - `SocialAuthResponse` wraps one connected provider session
//! - `SocialAuthenticator` turns a connected session into an application user
//! - `SocialAuthFirewall` wires configuration, ports and session persistence

mod authenticator;
mod error;
mod firewall;
mod provider_map;
mod response;

pub use authenticator::{AuthenticationResult, SocialAuthToken, SocialAuthenticator};
pub use error::SocialAuthError;
pub use firewall::SocialAuthFirewall;
pub use provider_map::ProviderMap;
pub use response::SocialAuthResponse;
