//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the bridge to external systems:
//! - `http` - axum middleware, extractors and endpoints
//! - `session` - Session store implementations (in-memory, Redis)
//! - `social` - Mock toolkit and user provider implementations

pub mod http;
pub mod session;
pub mod social;

pub use session::{session_store_from_config, InMemorySessionStore, RedisSessionStore};
