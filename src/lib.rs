//! Social Auth Bridge - social login for axum applications
//!
//! This crate connects a multi-provider social login toolkit to an HTTP
//! security layer: it maps check paths to identity providers, runs the
//! provider redirect flow, wraps the connected provider session and turns
//! the provider's profile into an application user.
//!
//! - `domain` - Provider names, check paths, profiles and auth errors
//! - `ports` - Toolkit, user provider and session store interfaces
//! - `application` - `ProviderMap`, `SocialAuthResponse` and the firewall
//! - `adapters` - axum middleware, session stores and mocks
//! - `config` - YAML and environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
