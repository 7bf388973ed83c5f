//! Behavior configuration from TOML (`[behavior]` section)

use super::ConfigValidationError;
use parley_application::CouncilParams;
use parley_domain::CouncilMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    pub peer_timeout_seconds: u64,
    pub synthesis_timeout_seconds: u64,
    pub peer_max_tokens: u32,
    pub synthesis_max_tokens: u32,
    /// Fetch sources for time-sensitive requests
    pub fetch_evidence: bool,
    /// Seed for deterministic phrase selection; round-robin when unset
    pub phrase_seed: Option<u64>,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            peer_timeout_seconds: 8,
            synthesis_timeout_seconds: 15,
            peer_max_tokens: 600,
            synthesis_max_tokens: 1200,
            fetch_evidence: true,
            phrase_seed: None,
        }
    }
}

impl FileBehaviorConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.peer_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("behavior.peer_timeout_seconds"));
        }
        if self.synthesis_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "behavior.synthesis_timeout_seconds",
            ));
        }
        Ok(())
    }

    pub fn to_council_params(&self, mode: CouncilMode) -> CouncilParams {
        CouncilParams::default()
            .with_peer_timeout(Duration::from_secs(self.peer_timeout_seconds))
            .with_synthesis_timeout(Duration::from_secs(self.synthesis_timeout_seconds))
            .with_peer_max_tokens(self.peer_max_tokens)
            .with_synthesis_max_tokens(self.synthesis_max_tokens)
            .with_fetch_evidence(self.fetch_evidence)
            .with_mode(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_council_params() {
        let params = FileBehaviorConfig::default().to_council_params(CouncilMode::Auto);
        assert_eq!(params, CouncilParams::default());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = FileBehaviorConfig {
            synthesis_timeout_seconds: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout("behavior.synthesis_timeout_seconds"))
        ));
    }

    #[test]
    fn test_partial_section() {
        let toml_str = r#"
[behavior]
peer_timeout_seconds = 3
phrase_seed = 42
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.behavior.peer_timeout_seconds, 3);
        assert_eq!(config.behavior.synthesis_timeout_seconds, 15);
        assert_eq!(config.behavior.phrase_seed, Some(42));
        let params = config.behavior.to_council_params(CouncilMode::Normal);
        assert_eq!(params.peer_timeout, Duration::from_secs(3));
    }
}
