//! Model identifier value object

use serde::{Deserialize, Serialize};

/// Identifier of a downstream text-generation model (Value Object)
///
/// Opaque to the domain: whatever string the provider expects. The defaults
/// below are only used when configuration does not name a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Default model for the primary (framing / synthesizing) agent
    pub const DEFAULT_PRIMARY: &'static str = "claude-sonnet-4-5";

    /// Default model for peer agents
    pub const DEFAULT_PEER: &'static str = "claude-haiku-4-5";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn default_primary() -> Self {
        Self::new(Self::DEFAULT_PRIMARY)
    }

    pub fn default_peer() -> Self {
        Self::new(Self::DEFAULT_PEER)
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::default_primary()
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_as_str() {
        let id = ModelId::new("some-model");
        assert_eq!(id.as_str(), "some-model");
        assert_eq!(id.to_string(), "some-model");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ModelId::new("m1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m1\"");
        let back: ModelId = serde_json::from_str("\"m2\"").unwrap();
        assert_eq!(back, ModelId::new("m2"));
    }

    #[test]
    fn test_default_is_primary() {
        assert_eq!(ModelId::default(), ModelId::default_primary());
    }
}
