//! Domain layer containing the bridge's types and pure logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, errors, auth results)
//! - `profile` - Raw provider profiles and their normalized view
//! - `provider` - Check-path registrations and opaque session state

pub mod foundation;
pub mod profile;
pub mod provider;
