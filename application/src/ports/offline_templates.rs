//! Offline template port
//!
//! Fixed wording used for placeholders and for the deterministic transcript
//! when the primary backend cannot be reached.

/// Lookup key for a template string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateScenario {
    /// Opening line of an offline run.
    Frame,
    /// Content of a peer entry with no live reply.
    PeerUnavailable,
    /// Content of a synthesis entry with no live reply.
    SynthesisUnavailable,
    /// Offline closing guidance for ordinary requests.
    OfflineAnswer,
    /// Offline closing guidance for consequential decisions.
    OfflineStressTest,
    /// Note shown when evidence could not be gathered.
    EvidenceUnavailable,
}

impl TemplateScenario {
    pub const ALL: [TemplateScenario; 6] = [
        TemplateScenario::Frame,
        TemplateScenario::PeerUnavailable,
        TemplateScenario::SynthesisUnavailable,
        TemplateScenario::OfflineAnswer,
        TemplateScenario::OfflineStressTest,
        TemplateScenario::EvidenceUnavailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateScenario::Frame => "frame",
            TemplateScenario::PeerUnavailable => "peer_unavailable",
            TemplateScenario::SynthesisUnavailable => "synthesis_unavailable",
            TemplateScenario::OfflineAnswer => "offline_answer",
            TemplateScenario::OfflineStressTest => "offline_stress_test",
            TemplateScenario::EvidenceUnavailable => "evidence_unavailable",
        }
    }
}

/// Keyed lookup returning one deterministic string per scenario.
pub trait OfflineTemplateStore: Send + Sync {
    fn get(&self, scenario: TemplateScenario) -> &str;
}
