//! Provider module - check-path registrations and opaque session state.

mod registration;
mod session_data;

pub use registration::{ProviderRegistration, ProviderRegistrations, RegistrationError};
pub use session_data::SessionData;
