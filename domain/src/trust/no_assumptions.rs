//! No-assumptions check.
//!
//! Blocks requests whose shape implies required content is missing, so the
//! assistant asks instead of guessing. Long, detailed requests and requests
//! with prior context or attachments supply their own context and pass.

use crate::contract::decision::ClarifyingQuestions;
use crate::core::text::{contains_any, word_count};
use crate::core::utterance::Utterance;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Result of the no-assumptions check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssumptionCheck {
    Satisfied,
    Blocked(ClarifyingQuestions),
}

impl AssumptionCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, AssumptionCheck::Satisfied)
    }

    pub fn questions(&self) -> &[String] {
        match self {
            AssumptionCheck::Satisfied => &[],
            AssumptionCheck::Blocked(questions) => questions.as_slice(),
        }
    }
}

impl Serialize for AssumptionCheck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AssumptionCheck", 2)?;
        state.serialize_field("ok", &self.is_ok())?;
        state.serialize_field("questions", self.questions())?;
        state.end()
    }
}

const DETAILED_MIN_CHARS: usize = 160;
const DETAILED_MIN_WORDS: usize = 25;
const DECISION_QUESTION_MAX_WORDS: usize = 10;

const BARE_HELP: &[&str] = &[
    "help",
    "help me",
    "help please",
    "please help",
    "please help me",
    "i need help",
    "can you help",
    "can you help me",
    "could you help",
    "could you help me",
    "need help",
];

const REWRITE_VERBS: &[&str] = &[
    "rewrite",
    "rephrase",
    "reword",
    "edit",
    "proofread",
    "polish",
    "improve",
    "shorten",
    "translate",
    "summarize",
    "fix",
];

const DEICTIC_OBJECTS: &[&str] = &["this", "that", "it", "my", "the", "our", "his", "her", "their"];

const DECISION_OPENERS: &[&str] = &[
    "should i",
    "should we",
    "do i",
    "is it worth",
    "what should i do",
    "what's the best move",
    "what is the best move",
];

const CRITERIA_MARKERS: &[&str] = &[
    "because",
    "since",
    "but",
    "if",
    "unless",
    "my goal",
    "i want",
    "i care",
    "priority",
    "budget",
    "deadline",
    "worried",
    "option",
    "options",
    "versus",
    "vs",
    "or",
    "after",
    "given",
];

const Q_HELP_TOPIC: &str = "What would you like help with?";
const Q_HELP_OUTCOME: &str = "What would a good result look like for you?";
const Q_PASTE_TEXT: &str = "Could you paste the text you want me to work on?";
const Q_TONE: &str = "Is there a tone or length you are aiming for?";
const Q_OUTCOME: &str = "What outcome matters most to you here?";
const Q_BACKGROUND: &str = "What has happened so far that led to this?";
const Q_CONSTRAINTS: &str = "Are there constraints I should keep in mind, such as timing, money, or relationships?";

/// Stateless no-assumptions check.
pub struct NoAssumptionsCheck;

impl NoAssumptionsCheck {
    pub fn check(utterance: &Utterance) -> AssumptionCheck {
        if utterance.has_supporting_context() {
            return AssumptionCheck::Satisfied;
        }

        let lower = utterance.normalized();
        if is_detailed(&lower) {
            return AssumptionCheck::Satisfied;
        }

        let candidates: &[&str] = if is_bare_help(&lower) {
            &[Q_HELP_TOPIC, Q_HELP_OUTCOME]
        } else if is_rewrite_without_subject(&lower) {
            &[Q_PASTE_TEXT, Q_TONE]
        } else if is_decision_without_criteria(&lower) {
            &[Q_OUTCOME, Q_BACKGROUND, Q_CONSTRAINTS]
        } else {
            return AssumptionCheck::Satisfied;
        };

        match ClarifyingQuestions::new(candidates.iter().map(|q| q.to_string())) {
            Some(questions) => AssumptionCheck::Blocked(questions),
            None => AssumptionCheck::Satisfied,
        }
    }
}

fn is_detailed(lower: &str) -> bool {
    lower.chars().count() >= DETAILED_MIN_CHARS || word_count(lower) >= DETAILED_MIN_WORDS
}

fn strip_punctuation(lower: &str) -> String {
    lower
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_bare_help(lower: &str) -> bool {
    BARE_HELP.contains(&strip_punctuation(lower).as_str())
}

/// "Rewrite this", "Proofread my cover letter": an editing verb whose object
/// is a short reference to text that was never supplied.
fn is_rewrite_without_subject(lower: &str) -> bool {
    if lower.contains(':') || lower.contains('"') || lower.contains('\n') {
        return false;
    }
    let cleaned = strip_punctuation(lower);
    let cleaned = cleaned
        .strip_prefix("please ")
        .or_else(|| cleaned.strip_prefix("can you "))
        .or_else(|| cleaned.strip_prefix("could you "))
        .unwrap_or(&cleaned);

    let mut words = cleaned.split_whitespace();
    let Some(verb) = words.next() else {
        return false;
    };
    if !REWRITE_VERBS.contains(&verb) {
        return false;
    }
    let rest: Vec<&str> = words.collect();
    match rest.first() {
        None => true,
        Some(first) => rest.len() <= 3 && DEICTIC_OBJECTS.contains(first),
    }
}

fn is_decision_without_criteria(lower: &str) -> bool {
    let starts_with_decision = DECISION_OPENERS.iter().any(|opener| lower.starts_with(opener));
    starts_with_decision
        && word_count(lower) <= DECISION_QUESTION_MAX_WORDS
        && !contains_any(lower, CRITERIA_MARKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> AssumptionCheck {
        NoAssumptionsCheck::check(&Utterance::new(text))
    }

    #[test]
    fn test_decision_without_criteria_blocks() {
        let result = check("Should I fire him?");
        assert!(!result.is_ok());
        assert!((1..=3).contains(&result.questions().len()));
    }

    #[test]
    fn test_decision_with_criteria_passes() {
        assert!(check("Should I fire him because he missed three deadlines?").is_ok());
        assert!(check("Should I take the Berlin offer or stay?").is_ok());
    }

    #[test]
    fn test_bare_help_blocks() {
        assert!(!check("help").is_ok());
        assert!(!check("Can you help me?").is_ok());
        assert!(check("Help me plan a birthday dinner for six").is_ok());
    }

    #[test]
    fn test_rewrite_without_text_blocks() {
        assert!(!check("Rewrite this").is_ok());
        assert!(!check("Please proofread my cover letter").is_ok());
        assert_eq!(check("rewrite").questions()[0], Q_PASTE_TEXT);
    }

    #[test]
    fn test_rewrite_with_text_passes() {
        assert!(check("Rewrite this: we was late to the meeting").is_ok());
        assert!(check("Fix the grammar in this sentence").is_ok());
    }

    #[test]
    fn test_supporting_context_passes() {
        let u = Utterance::new("Rewrite this").with_attachments(true);
        assert!(NoAssumptionsCheck::check(&u).is_ok());
        let u = Utterance::new("Should I fire him?").with_previous_context(true);
        assert!(NoAssumptionsCheck::check(&u).is_ok());
    }

    #[test]
    fn test_long_detailed_request_passes() {
        let text = "Should I fire him? He has been late for every standup for two months, \
                    I have raised it twice in one-on-ones, and the rest of the team is now \
                    picking up his work.";
        assert!(check(text).is_ok());
    }

    #[test]
    fn test_serialize_flat() {
        let json = serde_json::to_value(check("help")).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["questions"].as_array().unwrap().len(), 2);
    }
}
