//! Stakes classification.
//!
//! [`StakesClassifier::classify`] scores one utterance into a [`StakesLevel`]
//! using ordered keyword precedence. It is a pure function of the text.
//!
//! # Precedence
//!
//! | Step | Condition | Result |
//! |------|-----------|--------|
//! | 1 | simple informational question, < 100 chars | Low |
//! | 2 | ≥ 2 high terms; 1 high term and not a question; > 500 chars and ≥ 1 high term | High |
//! | 3 | ≥ 2 medium terms; > 200 chars and ≥ 1 medium term | Medium |
//! | 4 | simple-task marker, < 200 chars | Low |
//! | 5 | otherwise | Low |
//!
//! Questions are down-weighted on purpose: "What's the best way to fire
//! someone nicely?" carries a high-stakes word but reads as informational.

use crate::core::text::{contains_any, fold_lower, matched_terms};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Assessed risk tier of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakesLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl StakesLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StakesLevel::Low => "low",
            StakesLevel::Medium => "medium",
            StakesLevel::High => "high",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, StakesLevel::High)
    }

    pub fn is_low(&self) -> bool {
        matches!(self, StakesLevel::Low)
    }
}

impl fmt::Display for StakesLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stakes tier plus the tags that produced it.
///
/// Reason tags are for logs and diagnostics, never shown verbatim to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakesAssessment {
    pub level: StakesLevel,
    pub reasons: Vec<String>,
}

impl StakesAssessment {
    fn new(level: StakesLevel, reasons: Vec<String>) -> Self {
        Self { level, reasons }
    }
}

/// Conflict, legal, termination, money/negotiation, crisis and strong-emotion vocabulary.
pub const HIGH_STAKES_TERMS: &[&str] = &[
    "fire",
    "fired",
    "firing",
    "terminate",
    "terminated",
    "termination",
    "lay off",
    "layoff",
    "layoffs",
    "laid off",
    "resign",
    "resignation",
    "quit",
    "quitting",
    "sue",
    "suing",
    "lawsuit",
    "lawyer",
    "attorney",
    "legal",
    "harassment",
    "discrimination",
    "fraud",
    "breach",
    "severance",
    "salary",
    "raise",
    "negotiate",
    "negotiation",
    "debt",
    "bankruptcy",
    "investment",
    "crisis",
    "emergency",
    "conflict",
    "confrontation",
    "divorce",
    "furious",
    "angry",
    "devastated",
    "panicking",
    "betrayed",
    "humiliated",
];

/// Professional, business, team and process vocabulary.
pub const MEDIUM_STAKES_TERMS: &[&str] = &[
    "meeting",
    "team",
    "project",
    "deadline",
    "client",
    "customer",
    "manager",
    "boss",
    "colleague",
    "coworker",
    "stakeholder",
    "stakeholders",
    "proposal",
    "presentation",
    "feedback",
    "performance review",
    "budget",
    "strategy",
    "process",
    "workflow",
    "hiring",
    "interview",
    "quarterly",
    "report",
    "launch",
    "roadmap",
    "vendor",
    "partner",
    "deal",
    "business",
    "department",
    "policy",
];

/// Leading verbs of small, self-contained editing or explanation tasks.
const SIMPLE_TASK_VERBS: &[&str] = &[
    "rewrite",
    "rephrase",
    "fix",
    "proofread",
    "correct",
    "explain",
    "define",
    "summarize",
    "translate",
    "shorten",
    "format",
];

const SIMPLE_TASK_TERMS: &[&str] = &["grammar", "typo", "typos", "spelling", "punctuation"];

const QUESTION_OPENERS: &[&str] = &[
    "should", "can", "could", "would", "will", "is", "are", "do", "does", "did", "what", "what's",
    "how", "why", "when", "where", "who", "which",
];

static INFORMATIONAL_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:what|who|when|where|which)(?:'s|\s+(?:is|are|was|were|does|do|did))\b|how\s+(?:does|do|is|are|many|much|long)\b|define\b|what\s+does\s+.+\s+mean\b)",
    )
    .expect("informational question pattern is valid")
});

/// Rule-based, stateless stakes classifier.
pub struct StakesClassifier;

impl StakesClassifier {
    const INFORMATIONAL_MAX_LEN: usize = 100;
    const SIMPLE_TASK_MAX_LEN: usize = 200;
    const MEDIUM_LENGTH_THRESHOLD: usize = 200;
    const HIGH_LENGTH_THRESHOLD: usize = 500;

    /// Classify an utterance's text.
    pub fn classify(text: &str) -> StakesAssessment {
        let lower = fold_lower(text.trim());
        let len = lower.chars().count();

        // 1. Short informational question
        if len < Self::INFORMATIONAL_MAX_LEN && Self::is_informational_question(&lower) {
            return StakesAssessment::new(
                StakesLevel::Low,
                vec!["informational_question".to_string()],
            );
        }

        // 2. High-stakes vocabulary
        let high = matched_terms(&lower, HIGH_STAKES_TERMS);
        let is_question = Self::is_question(&lower);
        if !high.is_empty() {
            let tag = format!("high_terms:{}", high.join(","));
            if high.len() >= 2 {
                return StakesAssessment::new(StakesLevel::High, vec![tag, "multiple_high".to_string()]);
            }
            if !is_question {
                return StakesAssessment::new(StakesLevel::High, vec![tag, "statement".to_string()]);
            }
            if len > Self::HIGH_LENGTH_THRESHOLD {
                return StakesAssessment::new(StakesLevel::High, vec![tag, "long_text".to_string()]);
            }
        }

        // 3. Medium-stakes vocabulary
        let medium = matched_terms(&lower, MEDIUM_STAKES_TERMS);
        if medium.len() >= 2 || (len > Self::MEDIUM_LENGTH_THRESHOLD && !medium.is_empty()) {
            return StakesAssessment::new(
                StakesLevel::Medium,
                vec![format!("medium_terms:{}", medium.join(","))],
            );
        }

        // 4. Simple task
        if len < Self::SIMPLE_TASK_MAX_LEN && Self::is_simple_task(&lower, is_question) {
            return StakesAssessment::new(StakesLevel::Low, vec!["simple_task".to_string()]);
        }

        // 5. Default
        let mut reasons = vec!["default".to_string()];
        if !high.is_empty() {
            reasons.push("high_term_in_question".to_string());
        }
        StakesAssessment::new(StakesLevel::Low, reasons)
    }

    /// Convenience: the level only.
    pub fn level(text: &str) -> StakesLevel {
        Self::classify(text).level
    }

    fn is_informational_question(lower: &str) -> bool {
        INFORMATIONAL_QUESTION.is_match(lower) && (lower.ends_with('?') || lower.starts_with("define"))
    }

    /// Question mark at the end, or a question-word opener.
    pub(crate) fn is_question(lower: &str) -> bool {
        if lower.trim_end().ends_with('?') {
            return true;
        }
        lower
            .split_whitespace()
            .next()
            .map(|first| QUESTION_OPENERS.contains(&first.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')))
            .unwrap_or(false)
    }

    fn is_simple_task(lower: &str, is_question: bool) -> bool {
        let first = lower
            .split_whitespace()
            .next()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .unwrap_or("");
        SIMPLE_TASK_VERBS.contains(&first) || contains_any(lower, SIMPLE_TASK_TERMS) || is_question
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_fix_is_low() {
        let a = StakesClassifier::classify("Fix the grammar in this sentence");
        assert_eq!(a.level, StakesLevel::Low);
        assert!(a.reasons.contains(&"simple_task".to_string()));
    }

    #[test]
    fn test_informational_question_short_circuits() {
        let a = StakesClassifier::classify("What's the best way to fire someone nicely?");
        assert_eq!(a.level, StakesLevel::Low);
        assert_eq!(a.reasons, vec!["informational_question".to_string()]);
    }

    #[test]
    fn test_curly_apostrophe_question_short_circuits() {
        let a = StakesClassifier::classify("What\u{2019}s the best way to fire someone nicely?");
        assert_eq!(a.level, StakesLevel::Low);
        assert_eq!(a.reasons, vec!["informational_question".to_string()]);
    }

    #[test]
    fn test_single_high_term_in_question_is_not_high() {
        assert_eq!(StakesClassifier::level("Should I fire him?"), StakesLevel::Low);
    }

    #[test]
    fn test_single_high_term_statement_is_high() {
        assert_eq!(
            StakesClassifier::level("I need to fire my assistant tomorrow."),
            StakesLevel::High
        );
    }

    #[test]
    fn test_two_high_terms_is_high_even_as_question() {
        assert_eq!(
            StakesClassifier::level("Should I sue them after they fired me?"),
            StakesLevel::High
        );
    }

    #[test]
    fn test_long_question_with_high_term_is_high() {
        let text = format!("{} Should I resign?", "Context about my job. ".repeat(30));
        assert!(text.chars().count() > 500);
        assert_eq!(StakesClassifier::level(&text), StakesLevel::High);
    }

    #[test]
    fn test_two_medium_terms_is_medium() {
        assert_eq!(
            StakesClassifier::level("Help me prepare for the client meeting"),
            StakesLevel::Medium
        );
    }

    #[test]
    fn test_long_text_with_one_medium_term_is_medium() {
        let text = format!("{} and it involves the budget.", "Some neutral words here. ".repeat(10));
        assert!(text.chars().count() > 200);
        assert_eq!(StakesClassifier::level(&text), StakesLevel::Medium);
    }

    #[test]
    fn test_default_is_low() {
        assert_eq!(StakesClassifier::level("Tell me a story about dragons"), StakesLevel::Low);
    }

    #[test]
    fn test_pure_function() {
        let text = "Should I negotiate my salary before the offer expires?";
        let first = StakesClassifier::classify(text);
        for _ in 0..5 {
            assert_eq!(StakesClassifier::classify(text), first);
        }
    }

    #[test]
    fn test_level_ordering_and_display() {
        assert!(StakesLevel::High > StakesLevel::Medium);
        assert!(StakesLevel::Medium > StakesLevel::Low);
        assert_eq!(StakesLevel::High.to_string(), "high");
        assert_eq!(serde_json::to_string(&StakesLevel::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_is_question() {
        assert!(StakesClassifier::is_question("should i fire him"));
        assert!(StakesClassifier::is_question("tell me?"));
        assert!(!StakesClassifier::is_question("i fired him."));
    }
}
