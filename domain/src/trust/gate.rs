//! Trust gate: the three pre-generation checks bundled together.

use super::consequence::ConsequenceDetector;
use super::evidence::EvidenceClassifier;
use super::no_assumptions::{AssumptionCheck, NoAssumptionsCheck};
use crate::core::utterance::Utterance;
use serde::Serialize;

/// Outcome of all three trust checks for one utterance.
///
/// The checks are independent: a request can need evidence, be
/// consequential, both, or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustAssessment {
    pub assumptions: AssumptionCheck,
    pub needs_evidence: bool,
    pub consequential: bool,
}

impl TrustAssessment {
    /// Whether the no-assumptions check stopped the pipeline.
    pub fn is_blocked(&self) -> bool {
        !self.assumptions.is_ok()
    }

    /// Evidence is fetched only when required and the gate is not blocked.
    pub fn should_fetch_evidence(&self) -> bool {
        self.needs_evidence && !self.is_blocked()
    }
}

/// Runs the no-assumptions, evidence-necessity and consequence checks.
pub struct TrustGate;

impl TrustGate {
    pub fn assess(utterance: &Utterance) -> TrustAssessment {
        TrustAssessment {
            assumptions: NoAssumptionsCheck::check(utterance),
            needs_evidence: EvidenceClassifier::requires_evidence(utterance.text()),
            consequential: ConsequenceDetector::detect(utterance.text()),
        }
    }
}
