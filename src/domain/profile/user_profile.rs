//! Raw profile records as delivered by the social login toolkit.
//!
//! Every field is optional: providers share wildly different subsets of
//! the user's data, and an absent field is not an error.

use serde::{Deserialize, Serialize};

/// User profile fetched from a connected provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Provider-side unique user identifier.
    pub identifier: String,
    pub profile_url: Option<String>,
    pub web_site_url: Option<String>,
    pub photo_url: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub language: Option<String>,
    pub age: Option<u32>,
    pub birth_day: Option<u32>,
    pub birth_month: Option<u32>,
    pub birth_year: Option<i32>,
    pub email: Option<String>,
    pub email_verified: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
}

impl UserProfile {
    /// Creates a profile with only the identifier set.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets first and last name.
    pub fn with_names(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Sets the birth date parts.
    pub fn with_birth_date(mut self, day: u32, month: u32, year: i32) -> Self {
        self.birth_day = Some(day);
        self.birth_month = Some(month);
        self.birth_year = Some(year);
        self
    }
}

/// One entry of the user's contact list on a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserContact {
    pub identifier: String,
    pub web_site_url: Option<String>,
    pub profile_url: Option<String>,
    pub photo_url: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
}

/// Author of an activity entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityAuthor {
    pub identifier: String,
    pub display_name: Option<String>,
    pub profile_url: Option<String>,
    pub photo_url: Option<String>,
}

/// One entry of the user's activity stream (timeline, feed) on a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserActivity {
    pub id: String,
    /// Unix timestamp as reported by the provider.
    pub date: Option<i64>,
    pub text: Option<String>,
    pub user: ActivityAuthor,
}
