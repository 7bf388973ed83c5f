//! Evidence configuration from TOML (`[evidence]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvidenceConfig {
    pub enabled: bool,
    /// Instant Answer endpoint
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for FileEvidenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.duckduckgo.com/".to_string(),
            timeout_seconds: 5,
        }
    }
}
