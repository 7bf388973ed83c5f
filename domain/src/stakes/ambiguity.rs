//! Ambiguity detection.
//!
//! Flags requests that bundle several questions, hedge, contradict
//! themselves, or offer multiple alternatives. Used only as an input signal
//! to the contract engine's agent-suggestion overlay.

use crate::core::text::{contains_any, count_occurrences, fold_lower};
use serde::{Deserialize, Serialize};

const UNCERTAINTY_MARKERS: &[&str] = &[
    "not sure",
    "unsure",
    "maybe",
    "perhaps",
    "i think",
    "i guess",
    "don't know",
    "dont know",
    "no idea",
    "kind of",
    "sort of",
    "possibly",
    "can't decide",
];

const CONTRADICTION_MARKERS: &[&str] = &[
    "but also",
    "on the other hand",
    "at the same time",
    "torn between",
    "conflicted",
    "but i don't want",
    "but i also",
    "although",
];

const DISJUNCTION_MARKER: &str = "or";

/// Which ambiguity signals fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguitySignals {
    pub multiple_questions: bool,
    pub uncertainty: bool,
    pub contradiction: bool,
    pub disjunctions: bool,
}

impl AmbiguitySignals {
    pub fn is_ambiguous(&self) -> bool {
        self.multiple_questions || self.uncertainty || self.contradiction || self.disjunctions
    }
}

/// Stateless ambiguity detector.
pub struct AmbiguityDetector;

impl AmbiguityDetector {
    /// Inspect the text and report every signal.
    pub fn signals(text: &str) -> AmbiguitySignals {
        let lower = fold_lower(text);
        AmbiguitySignals {
            multiple_questions: lower.matches('?').count() > 1,
            uncertainty: contains_any(&lower, UNCERTAINTY_MARKERS),
            contradiction: contains_any(&lower, CONTRADICTION_MARKERS),
            disjunctions: count_occurrences(&lower, DISJUNCTION_MARKER) >= 2,
        }
    }

    /// `true` if any ambiguity signal fires.
    pub fn detect(text: &str) -> bool {
        Self::signals(text).is_ambiguous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_request_not_ambiguous() {
        assert!(!AmbiguityDetector::detect("Fix the grammar in this sentence"));
    }

    #[test]
    fn test_multiple_questions() {
        let s = AmbiguityDetector::signals("Should I go? Or stay?");
        assert!(s.multiple_questions);
        assert!(s.is_ambiguous());
    }

    #[test]
    fn test_uncertainty_marker() {
        assert!(AmbiguityDetector::detect("I'm not sure how to approach my manager"));
    }

    #[test]
    fn test_contradiction_marker() {
        assert!(AmbiguityDetector::detect(
            "I want the promotion but I don't want more hours"
        ));
    }

    #[test]
    fn test_single_or_is_not_enough() {
        assert!(!AmbiguityDetector::detect("Tea or coffee for the guests"));
    }

    #[test]
    fn test_two_disjunctions() {
        let s = AmbiguityDetector::signals("Email them, call them, or wait, or do nothing");
        assert!(s.disjunctions);
    }
}
