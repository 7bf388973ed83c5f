//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod behavior;
mod council;
mod evidence;
mod output;
mod provider;

pub use behavior::FileBehaviorConfig;
pub use council::{FileCouncilConfig, FilePeerConfig};
pub use evidence::FileEvidenceConfig;
pub use output::{FileLoggingConfig, FileOutputConfig};
pub use provider::FileProviderConfig;

use parley_application::CouncilParams;
use parley_domain::CouncilMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("model name cannot be empty ({0})")]
    EmptyModelName(String),

    #[error("peer name cannot be empty")]
    EmptyPeerName,

    #[error("at least one peer must be configured")]
    NoPeers,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Primary model, peers and sub-mode
    pub council: FileCouncilConfig,
    /// Timeouts, token limits and evidence switch
    pub behavior: FileBehaviorConfig,
    /// Text generation backend
    pub provider: FileProviderConfig,
    /// Evidence source
    pub evidence: FileEvidenceConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.council.validate()?;
        self.behavior.validate()?;
        if self.evidence.enabled && self.evidence.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout("evidence.timeout_seconds"));
        }
        Ok(())
    }

    /// Council parameters from `[behavior]`, with the `[evidence]` timeout.
    pub fn to_council_params(&self, mode: CouncilMode) -> CouncilParams {
        self.behavior
            .to_council_params(mode)
            .with_evidence_timeout(Duration::from_secs(self.evidence.timeout_seconds))
    }
}
