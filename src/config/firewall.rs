//! Firewall configuration: login path, check paths and user provider

use serde::Deserialize;
use std::collections::BTreeMap;

use super::error::ValidationError;
use crate::domain::foundation::{CheckPath, ProviderName};
use crate::domain::provider::{ProviderRegistration, ProviderRegistrations};

/// The only user provider kind currently supported.
const SERVICE_USER_PROVIDER: &str = "service";

/// One `providers_check_path` entry, as written in configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProviderCheckPathEntry {
    pub name: String,
    pub check_path: String,
}

impl ProviderCheckPathEntry {
    pub fn new(name: impl Into<String>, check_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            check_path: check_path.into(),
        }
    }
}

/// Social auth firewall configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FirewallConfig {
    /// Where unauthenticated users are sent
    pub login_path: String,

    /// Provider check paths, in matching order
    pub providers_check_path: Vec<ProviderCheckPathEntry>,

    /// User provider selection, e.g. `{ service: my_user_provider }`
    #[serde(alias = "hybridauth_user_provider")]
    pub user_provider: BTreeMap<String, String>,
}

impl FirewallConfig {
    /// Builds the validated, ordered provider registrations.
    pub fn registrations(&self) -> Result<ProviderRegistrations, ValidationError> {
        let registrations = self
            .providers_check_path
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let name = ProviderName::new(entry.name.as_str()).map_err(|e| {
                    ValidationError::InvalidProviderEntry {
                        index,
                        reason: e.to_string(),
                    }
                })?;
                let check_path = CheckPath::new(entry.check_path.as_str()).map_err(|e| {
                    ValidationError::InvalidProviderEntry {
                        index,
                        reason: e.to_string(),
                    }
                })?;
                Ok(ProviderRegistration::new(name, check_path))
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(ProviderRegistrations::new(registrations)?)
    }

    /// Name of the user provider service.
    ///
    /// The selection must hold exactly one entry, keyed `service`, with a
    /// non-empty value.
    pub fn user_provider_service(&self) -> Result<&str, ValidationError> {
        if self.user_provider.len() != 1 {
            return Err(ValidationError::InvalidUserProvider);
        }
        match self.user_provider.get(SERVICE_USER_PROVIDER) {
            Some(service) if !service.trim().is_empty() => Ok(service),
            _ => Err(ValidationError::InvalidUserProvider),
        }
    }

    /// Validate firewall configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.login_path.is_empty() {
            return Err(ValidationError::MissingRequired("LOGIN_PATH"));
        }
        if !self.login_path.starts_with('/') {
            return Err(ValidationError::InvalidLoginPath);
        }
        self.registrations()?;
        self.user_provider_service()?;
        Ok(())
    }
}
