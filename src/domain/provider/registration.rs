//! Provider registrations: which check path triggers which provider.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{CheckPath, ProviderName};

/// A single `{name, check_path}` pair from the firewall configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRegistration {
    pub name: ProviderName,
    pub check_path: CheckPath,
}

impl ProviderRegistration {
    /// Creates a registration.
    pub fn new(name: ProviderName, check_path: CheckPath) -> Self {
        Self { name, check_path }
    }
}

/// Errors raised when a set of registrations is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("At least one provider must be registered")]
    Empty,

    #[error("Each provider should have a unique check_path: '{path}' is used by both {first} and {second}")]
    DuplicateCheckPath {
        path: CheckPath,
        first: ProviderName,
        second: ProviderName,
    },

    #[error("Provider {0} is registered more than once")]
    DuplicateProviderName(ProviderName),
}

/// Ordered, validated set of provider registrations.
///
/// Invariants: non-empty, provider names unique, check paths unique.
/// Iteration order is the configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistrations(Vec<ProviderRegistration>);

impl ProviderRegistrations {
    /// Validates and wraps the registrations, keeping their order.
    pub fn new(registrations: Vec<ProviderRegistration>) -> Result<Self, RegistrationError> {
        if registrations.is_empty() {
            return Err(RegistrationError::Empty);
        }

        for (index, registration) in registrations.iter().enumerate() {
            for earlier in &registrations[..index] {
                if earlier.name == registration.name {
                    return Err(RegistrationError::DuplicateProviderName(
                        registration.name.clone(),
                    ));
                }
                if earlier.check_path == registration.check_path {
                    return Err(RegistrationError::DuplicateCheckPath {
                        path: registration.check_path.clone(),
                        first: earlier.name.clone(),
                        second: registration.name.clone(),
                    });
                }
            }
        }

        Ok(Self(registrations))
    }

    /// First registration whose check path matches `request_path`.
    pub fn find_by_path(&self, request_path: &str) -> Option<&ProviderRegistration> {
        self.0.iter().find(|r| r.check_path.matches(request_path))
    }

    /// Iterates registrations in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderRegistration> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
