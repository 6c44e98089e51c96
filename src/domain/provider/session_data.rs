//! Opaque toolkit session state.

use serde::{Deserialize, Serialize};

/// Serialized session state of the social login toolkit.
///
/// The bridge never looks inside: it is read from the client after a
/// request and handed back verbatim on the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData(String);

impl SessionData {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_data_is_transparent_in_json() {
        let data = SessionData::new("a:2:{opaque}");
        assert_eq!(serde_json::to_string(&data).unwrap(), "\"a:2:{opaque}\"");
    }

    #[test]
    fn default_session_data_is_empty() {
        assert!(SessionData::default().is_empty());
    }
}
