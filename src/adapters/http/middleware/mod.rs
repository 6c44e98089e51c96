//! HTTP middleware for axum.
//!
//! - `auth` - Social login middleware and extractors

pub mod auth;

pub use auth::{
    session_key_from_headers, social_auth_middleware, AuthRejection, OptionalAuth, RequireAuth,
    SocialAuthState,
};
