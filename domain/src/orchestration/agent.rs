//! Council membership: who frames, who advises.

use super::lens::Lens;
use crate::core::error::DomainError;
use crate::core::model::ModelId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Opens the transcript and, in work mode, synthesizes it.
    Primary,
    /// Contributes one independent perspective.
    Peer,
}

/// One council member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub name: String,
    pub model: ModelId,
    pub role: AgentRole,
}

impl AgentIdentity {
    pub fn primary(name: impl Into<String>, model: impl Into<ModelId>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            role: AgentRole::Primary,
        }
    }

    pub fn peer(name: impl Into<String>, model: impl Into<ModelId>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            role: AgentRole::Peer,
        }
    }
}

/// The configured council: one primary and at least one peer.
///
/// Read-only after construction and shared across concurrent runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouncilRoster {
    primary: AgentIdentity,
    peers: Vec<AgentIdentity>,
}

impl CouncilRoster {
    pub const DEFAULT_PRIMARY_NAME: &'static str = "lead";
    pub const DEFAULT_PEER_NAMES: [&'static str; 3] = ["advisor-a", "advisor-b", "advisor-c"];

    pub fn new(primary: AgentIdentity, peers: Vec<AgentIdentity>) -> Result<Self, DomainError> {
        if peers.is_empty() {
            return Err(DomainError::NoPeers);
        }
        Ok(Self { primary, peers })
    }

    pub fn primary(&self) -> &AgentIdentity {
        &self.primary
    }

    pub fn peers(&self) -> &[AgentIdentity] {
        &self.peers
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Peers paired with their slot lens, in roster order.
    pub fn peers_with_lenses(&self) -> impl Iterator<Item = (&AgentIdentity, Lens)> {
        self.peers
            .iter()
            .enumerate()
            .map(|(slot, peer)| (peer, Lens::for_peer_slot(slot)))
    }
}

impl Default for CouncilRoster {
    fn default() -> Self {
        Self {
            primary: AgentIdentity::primary(Self::DEFAULT_PRIMARY_NAME, ModelId::default_primary()),
            peers: Self::DEFAULT_PEER_NAMES
                .iter()
                .map(|name| AgentIdentity::peer(*name, ModelId::default_peer()))
                .collect(),
        }
    }
}
