//! Disclosure strings: short, user-visible notes on what a reply was built from.
//!
//! Purely presentational. Nothing in the pipeline branches on these.

use crate::contract::decision::{ContractDecision, ContractMode};
use crate::core::utterance::Utterance;
use crate::evidence::EvidenceBundle;
use crate::orchestration::{Provider, SubMode, Transcript};

/// Collects disclosure lines in a fixed order.
#[derive(Debug, Default)]
pub struct DisclosureBuilder {
    lines: Vec<String>,
}

impl DisclosureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context the caller supplied.
    pub fn context(mut self, utterance: &Utterance) -> Self {
        if utterance.has_previous_context() {
            self.lines.push("Used our earlier conversation for context.".to_string());
        }
        if utterance.has_attachments() {
            self.lines.push("Used the files you attached.".to_string());
        }
        self
    }

    /// Evidence outcome. An unavailable bundle is always disclosed.
    pub fn evidence(mut self, evidence: Option<&EvidenceBundle>) -> Self {
        let Some(bundle) = evidence else {
            return self;
        };
        if bundle.ok() {
            let count = bundle.sources().len();
            let newest = bundle
                .sources()
                .iter()
                .map(|s| s.retrieved_at.as_str())
                .max()
                .unwrap_or("");
            self.lines.push(format!(
                "Checked {} {} (retrieved {}).",
                count,
                if count == 1 { "source" } else { "sources" },
                newest
            ));
        } else if let Some(note) = bundle.limits_note() {
            self.lines.push(note.to_string());
        }
        self
    }

    /// Mode-specific notes.
    pub fn decision(mut self, decision: &ContractDecision) -> Self {
        match decision.mode() {
            ContractMode::ConfirmRequired => {
                self.lines.push("Nothing happens until you confirm.".to_string());
            }
            ContractMode::CannotDoYet => {
                self.lines.push("No connected accounts were used.".to_string());
            }
            ContractMode::Answer | ContractMode::Clarify => {}
        }
        self
    }

    /// Council run summary.
    pub fn transcript(mut self, transcript: Option<&Transcript>) -> Self {
        let Some(t) = transcript else {
            return self;
        };
        if t.provider() == Provider::Template {
            self.lines.push(
                "Live perspectives were unreachable, so this uses prepared guidance.".to_string(),
            );
            return self;
        }
        let total = t.peer_results().count();
        let live = t.live_peer_count();
        if live == total {
            self.lines.push(format!("Gathered {} independent perspectives.", total));
        } else {
            self.lines.push(format!(
                "Asked for {} independent perspectives; {} responded.",
                total, live
            ));
        }
        if t.sub_mode() == SubMode::Work {
            if t.brief().is_some() {
                self.lines.push("Combined them into a decision brief.".to_string());
            } else {
                self.lines.push("Combined them into one recommendation.".to_string());
            }
        }
        self
    }

    pub fn build(self) -> Vec<String> {
        self.lines
    }
}
