//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, error types and authentication results that form
//! the vocabulary of the social auth bridge.

mod auth;
mod errors;
mod ids;

pub use auth::{AccountNotConnected, AuthError, AuthenticatedUser};
pub use errors::{ProviderError, ProviderErrorCode, ValidationError};
pub use ids::{CheckPath, ProviderName, SessionKey, UserId};
