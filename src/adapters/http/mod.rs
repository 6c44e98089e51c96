//! HTTP adapters - axum glue for the social login firewall.

pub mod handlers;
pub mod middleware;

pub use handlers::{entry_point_response, logout_handler};
pub use middleware::{social_auth_middleware, OptionalAuth, RequireAuth, SocialAuthState};
