//! Analytical lenses assigned to council members in structured mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed analytical focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lens {
    Risk,
    Relationship,
    Strategy,
    Execution,
}

/// Lenses handed out to peers by roster slot, cycling for larger councils.
const PEER_LENSES: [Lens; 3] = [Lens::Risk, Lens::Relationship, Lens::Strategy];

impl Lens {
    /// The synthesis role always works through this lens.
    pub const SYNTHESIS: Lens = Lens::Execution;

    /// Lens for the peer at `slot` (0-based roster position).
    pub fn for_peer_slot(slot: usize) -> Lens {
        PEER_LENSES[slot % PEER_LENSES.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Lens::Risk => "Risk",
            Lens::Relationship => "Relationship",
            Lens::Strategy => "Strategy",
            Lens::Execution => "Execution",
        }
    }

    pub fn focus(&self) -> &'static str {
        match self {
            Lens::Risk => "what could go wrong, how badly, and what is hard to undo",
            Lens::Relationship => "how the people involved will feel and respond",
            Lens::Strategy => "longer-term position, leverage and the options this opens or closes",
            Lens::Execution => "the concrete next step, its timing and how to carry it out",
        }
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_slots_cycle() {
        assert_eq!(Lens::for_peer_slot(0), Lens::Risk);
        assert_eq!(Lens::for_peer_slot(1), Lens::Relationship);
        assert_eq!(Lens::for_peer_slot(2), Lens::Strategy);
        assert_eq!(Lens::for_peer_slot(3), Lens::Risk);
    }

    #[test]
    fn test_peers_never_get_execution() {
        for slot in 0..10 {
            assert_ne!(Lens::for_peer_slot(slot), Lens::SYNTHESIS);
        }
    }
}
