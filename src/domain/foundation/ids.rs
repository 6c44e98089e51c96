//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Name of an external identity provider (e.g. "Facebook", "Google").
///
/// Names are compared exactly and never normalized. Looking a name up in
/// the client configuration ignores ASCII case; see `ClientConfig::settings`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderName(String);

impl ProviderName {
    /// Creates a new ProviderName, returning error if empty or blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("provider_name"));
        }
        Ok(Self(name))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProviderName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderName> for String {
    fn from(name: ProviderName) -> Self {
        name.0
    }
}

impl AsRef<str> for ProviderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// URL path that triggers authentication against one provider.
///
/// Must be an absolute path (leading `/`). Matching against a request is
/// exact and ignores the query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CheckPath(String);

impl CheckPath {
    /// Creates a new CheckPath.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the path is empty
    /// - `InvalidFormat` if the path does not start with `/`
    pub fn new(path: impl Into<String>) -> Result<Self, ValidationError> {
        let path = path.into();
        if path.is_empty() {
            return Err(ValidationError::empty_field("check_path"));
        }
        if !path.starts_with('/') {
            return Err(ValidationError::invalid_format(
                "check_path",
                format!("'{}' must start with '/'", path),
            ));
        }
        Ok(Self(path))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the given request path targets this check path.
    ///
    /// Any query string on `request_path` is ignored.
    pub fn matches(&self, request_path: &str) -> bool {
        let path = request_path
            .split_once('?')
            .map_or(request_path, |(path, _)| path);
        path == self.0
    }
}

impl fmt::Display for CheckPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CheckPath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CheckPath> for String {
    fn from(path: CheckPath) -> Self {
        path.0
    }
}

/// Key under which a browser session's toolkit state is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(Uuid);

impl SessionKey {
    /// Creates a new random SessionKey.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SessionKey from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionKey {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Application user identifier, as returned by the user provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_name_rejects_blank() {
        assert!(ProviderName::new("").is_err());
        assert!(ProviderName::new("   ").is_err());
    }

    #[test]
    fn provider_name_keeps_case() {
        let name = ProviderName::new("Facebook").unwrap();
        assert_eq!(name.as_str(), "Facebook");
        assert_ne!(name, ProviderName::new("facebook").unwrap());
    }

    #[test]
    fn provider_name_deserializes_with_validation() {
        let name: ProviderName = serde_json::from_str("\"Google\"").unwrap();
        assert_eq!(name.to_string(), "Google");

        let result: Result<ProviderName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn check_path_requires_leading_slash() {
        assert!(CheckPath::new("/login/check-facebook").is_ok());
        assert!(matches!(
            CheckPath::new("login/check-facebook"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            CheckPath::new(""),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn check_path_matches_exact_path() {
        let path = CheckPath::new("/login/b").unwrap();
        assert!(path.matches("/login/b"));
        assert!(!path.matches("/login/b/"));
        assert!(!path.matches("/login/bb"));
        assert!(!path.matches("/login"));
    }

    #[test]
    fn check_path_ignores_query_string() {
        let path = CheckPath::new("/login/b").unwrap();
        assert!(path.matches("/login/b?code=abc&state=xyz"));
    }

    #[test]
    fn session_key_round_trips_through_string() {
        let key = SessionKey::new();
        let parsed: SessionKey = key.to_string().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn session_key_rejects_garbage() {
        assert!("not-a-uuid".parse::<SessionKey>().is_err());
    }

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert_eq!(UserId::new("u-1").unwrap().as_str(), "u-1");
    }
}
