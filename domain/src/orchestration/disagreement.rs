//! Cross-peer disagreement heuristic.
//!
//! Each live peer reply is scored by the density of cautious versus urgent
//! language. When at least one peer leans cautious and another leans urgent,
//! every leaning peer contributes a [`Disagreement`] point. With fewer than
//! two live peers there is nothing to compare and the list is empty.

use super::lens::Lens;
use super::transcript::AgentCallResult;
use crate::core::string::preview;
use crate::core::text::{count_terms, word_count};
use serde::Serialize;

const CAUTIOUS_TERMS: &[&str] = &[
    "wait",
    "careful",
    "carefully",
    "caution",
    "risk",
    "risky",
    "slow down",
    "hold off",
    "pause",
    "not yet",
    "avoid",
    "protect",
    "document",
    "verify",
    "reconsider",
    "gradual",
    "first check",
];

const URGENT_TERMS: &[&str] = &[
    "now",
    "immediately",
    "asap",
    "today",
    "right away",
    "quickly",
    "move fast",
    "don't wait",
    "do not wait",
    "urgent",
    "decisive",
    "decisively",
    "go ahead",
    "act",
    "before it's too late",
];

const POINT_MAX_LEN: usize = 160;

/// One peer's position that conflicts with another's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disagreement {
    pub agent: String,
    pub lens: Lens,
    pub point: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Cautious,
    Urgent,
    Neutral,
}

fn polarity(text: &str) -> Polarity {
    let lower = text.to_lowercase();
    let words = word_count(&lower).max(1) as f64;
    let cautious = count_terms(&lower, CAUTIOUS_TERMS) as f64 / words;
    let urgent = count_terms(&lower, URGENT_TERMS) as f64 / words;
    if cautious > urgent {
        Polarity::Cautious
    } else if urgent > cautious {
        Polarity::Urgent
    } else {
        Polarity::Neutral
    }
}

/// First sentence of a reply, shortened for a bullet.
fn headline(text: &str) -> String {
    let first = text
        .split_inclusive(['.', '!', '?', '\n'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("");
    preview(first, POINT_MAX_LEN)
}

/// Extract disagreements from peer results (live ones only).
///
/// Peers without a lens are compared under their slot position's lens.
pub fn extract_disagreements(peers: &[AgentCallResult]) -> Vec<Disagreement> {
    let live: Vec<(usize, &AgentCallResult)> =
        peers.iter().enumerate().filter(|(_, p)| p.live).collect();
    if live.len() < 2 {
        return Vec::new();
    }

    let scored: Vec<(usize, &AgentCallResult, Polarity)> = live
        .into_iter()
        .map(|(slot, p)| (slot, p, polarity(&p.content)))
        .collect();
    let has_cautious = scored.iter().any(|(_, _, pol)| *pol == Polarity::Cautious);
    let has_urgent = scored.iter().any(|(_, _, pol)| *pol == Polarity::Urgent);
    if !(has_cautious && has_urgent) {
        return Vec::new();
    }

    scored
        .into_iter()
        .filter_map(|(slot, peer, pol)| {
            let leaning = match pol {
                Polarity::Cautious => "Leans toward caution",
                Polarity::Urgent => "Leans toward acting quickly",
                Polarity::Neutral => return None,
            };
            Some(Disagreement {
                agent: peer.agent_name.clone(),
                lens: peer.lens.unwrap_or_else(|| Lens::for_peer_slot(slot)),
                point: format!("{}: {}", leaning, headline(&peer.content)),
            })
        })
        .collect()
}
