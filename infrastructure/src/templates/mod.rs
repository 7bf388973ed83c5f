//! Static offline templates
//!
//! Fixed wording for placeholders and the offline transcript. Every string
//! is plain user-facing language with no mention of how replies are made.

use parley_application::{OfflineTemplateStore, TemplateScenario};

const FRAME: &str =
    "I couldn't reach the other perspectives just now, so here is some general guidance to start with.";
const PEER_UNAVAILABLE: &str = "This perspective isn't available right now.";
const SYNTHESIS_UNAVAILABLE: &str =
    "I couldn't pull the perspectives together this time. The individual views above still stand.";
const OFFLINE_ANSWER: &str = "Start by writing down the outcome you want and one next step you can take today. \
     If you share more detail, I can give more specific help.";
const OFFLINE_STRESS_TEST: &str = "Before deciding, list what could go wrong, who else is affected, and whether the choice can be undone. \
     Then take the smallest step you could still reverse.";
const EVIDENCE_UNAVAILABLE: &str =
    "I couldn't check current sources, so anything time-sensitive may be out of date.";

/// Template store backed by constants.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticTemplateStore;

impl StaticTemplateStore {
    pub fn new() -> Self {
        Self
    }
}

impl OfflineTemplateStore for StaticTemplateStore {
    fn get(&self, scenario: TemplateScenario) -> &str {
        match scenario {
            TemplateScenario::Frame => FRAME,
            TemplateScenario::PeerUnavailable => PEER_UNAVAILABLE,
            TemplateScenario::SynthesisUnavailable => SYNTHESIS_UNAVAILABLE,
            TemplateScenario::OfflineAnswer => OFFLINE_ANSWER,
            TemplateScenario::OfflineStressTest => OFFLINE_STRESS_TEST,
            TemplateScenario::EvidenceUnavailable => EVIDENCE_UNAVAILABLE,
        }
    }
}
