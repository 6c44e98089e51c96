//! Normalized, provider-agnostic view of a social profile.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UserProfile;
use crate::domain::foundation::ProviderName;

/// Identity data derived from a provider's raw [`UserProfile`].
///
/// Read-only: built once from the raw profile and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProfile {
    pub provider: ProviderName,
    pub identifier: String,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl NormalizedProfile {
    /// Derives the normalized view of `profile` for `provider`.
    pub fn from_profile(provider: ProviderName, profile: &UserProfile) -> Self {
        Self {
            provider,
            identifier: profile.identifier.clone(),
            username: clean_username(profile.display_name.as_deref().unwrap_or_default()),
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            birthday: compose_birthday(profile),
        }
    }
}

/// Removes every character outside `[A-Za-z0-9_]`.
///
/// Characters are deleted, never substituted: downstream username columns
/// may only accept that charset.
pub fn clean_username(display_name: &str) -> String {
    display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Builds a birth date when day, month and year are all present.
///
/// Zero counts as absent. A combination that is not a real calendar date
/// (e.g. 31 February) also yields `None`.
pub fn compose_birthday(profile: &UserProfile) -> Option<NaiveDate> {
    let day = profile.birth_day.filter(|d| *d != 0)?;
    let month = profile.birth_month.filter(|m| *m != 0)?;
    let year = profile.birth_year.filter(|y| *y != 0)?;
    NaiveDate::from_ymd_opt(year, month, day)
}
