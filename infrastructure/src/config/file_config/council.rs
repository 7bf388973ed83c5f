//! Council configuration from TOML (`[council]` section)

use super::ConfigValidationError;
use parley_domain::{AgentIdentity, CouncilMode, CouncilRoster, ModelId};
use serde::{Deserialize, Serialize};

/// One configured peer agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePeerConfig {
    pub name: String,
    pub model: String,
}

/// Raw council configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Model used for the primary agent (frame and synthesis)
    pub primary: String,
    /// Peer agents, in slot order
    pub peers: Vec<FilePeerConfig>,
    /// `auto`, `normal` or `work`
    pub mode: CouncilMode,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            primary: ModelId::default_primary().as_str().to_string(),
            peers: CouncilRoster::DEFAULT_PEER_NAMES
                .iter()
                .map(|name| FilePeerConfig {
                    name: name.to_string(),
                    model: ModelId::default_peer().as_str().to_string(),
                })
                .collect(),
            mode: CouncilMode::Auto,
        }
    }
}

impl FileCouncilConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.primary.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName("council.primary".to_string()));
        }
        if self.peers.is_empty() {
            return Err(ConfigValidationError::NoPeers);
        }
        for peer in &self.peers {
            if peer.name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyPeerName);
            }
            if peer.model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName(format!(
                    "council.peers.{}",
                    peer.name
                )));
            }
        }
        Ok(())
    }

    /// Build the roster. The primary keeps the default agent name.
    pub fn to_roster(&self) -> Result<CouncilRoster, ConfigValidationError> {
        self.validate()?;
        let peers = self
            .peers
            .iter()
            .map(|p| AgentIdentity::peer(p.name.trim(), p.model.trim()))
            .collect();
        CouncilRoster::new(
            AgentIdentity::primary(CouncilRoster::DEFAULT_PRIMARY_NAME, self.primary.trim()),
            peers,
        )
        .map_err(|_| ConfigValidationError::NoPeers)
    }
}
