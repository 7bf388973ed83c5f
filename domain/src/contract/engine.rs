//! Contract engine: picks the response mode for one utterance.
//!
//! The engine is stateless per call: it computes the terminal mode directly
//! from the utterance, its stakes assessment and ambiguity signals.
//!
//! # Decision order
//!
//! 1. Declared intent needs an integration the caller marked unavailable
//!    → [`ContractDecision::CannotDoYet`] (terminal).
//! 2. Information needed to act safely is missing → [`ContractDecision::Clarify`].
//! 3. Low stakes → [`ContractDecision::Answer`].
//! 4. Medium / high stakes → [`ContractDecision::ConfirmRequired`].
//! 5. Overlay on 3 and 4: high stakes, a complex-decision intent or an
//!    ambiguous request appends the add-agents suggestion.
//!
//! Every outgoing string is linted before return.

use super::decision::{ClarifyingQuestions, ContractDecision};
use super::lint::lint_message;
use super::phrases::{
    AGENT_SUGGESTIONS, ANSWER_OPENERS, CLARIFY_INTROS, CONFIRM_OPENERS, PROCEED_PROMPTS,
    PhrasePicker, RoundRobinPicker,
};
use crate::core::error::DomainError;
use crate::core::intent::Intent;
use crate::core::text::contains_any;
use crate::core::utterance::Utterance;
use crate::stakes::{AmbiguityDetector, AmbiguitySignals, StakesAssessment, StakesClassifier};
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Execution requests shorter than this are too thin to act on.
const MIN_EXECUTION_LEN: usize = 20;

const SEND_VERBS: &[&str] = &[
    "send", "email", "tell", "notify", "forward", "reply", "invite", "ping", "remind",
];

const POLITE_PREFIXES: &[&str] = &[
    "please ",
    "can you ",
    "could you ",
    "would you ",
    "will you ",
];

const RECIPIENT_PRONOUNS: &[&str] = &["him", "her", "them", "me", "us", "everyone", "everybody"];

const INTEGRATION_TERMS: &[&str] = &[
    "email", "emails", "inbox", "calendar", "meetings", "crm", "contacts", "leads", "deals",
];

const UNQUALIFIED_SCOPE_TERMS: &[&str] = &["all", "every", "everyone", "everybody"];

static RECIPIENT_PREPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:to|with|cc)\s+\w+").expect("recipient pattern is valid")
});

static SCOPE_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:all|every|everyone|everybody)\s+(?:\w+\s+){0,2}(?:from|in|who|that|since|before|after|with|tagged|named|on|about|at)\b",
    )
    .expect("scope qualifier pattern is valid")
});

const Q_WHAT_TO_DO: &str = "What exactly would you like me to do?";
const Q_DETAILS: &str = "Is there anything specific I should include or avoid?";
const Q_RECIPIENT: &str = "Who should this go to?";
const Q_MESSAGE: &str = "What should the message say?";
const Q_SCOPE: &str =
    "Which ones exactly? For example, from a particular person, in a date range, or with a specific label.";

/// Stateless mode selector.
///
/// Holds only the phrase picker used to vary boilerplate wording.
#[derive(Clone)]
pub struct ContractEngine {
    phrases: Arc<dyn PhrasePicker>,
}

impl ContractEngine {
    pub fn new(phrases: Arc<dyn PhrasePicker>) -> Self {
        Self { phrases }
    }

    /// Classify and decide in one step.
    pub fn decide(&self, utterance: &Utterance) -> Result<ContractDecision, DomainError> {
        let stakes = StakesClassifier::classify(utterance.text());
        let ambiguity = AmbiguityDetector::signals(utterance.text());
        self.decide_with(utterance, &stakes, ambiguity)
    }

    /// Decide from precomputed classifier outputs.
    pub fn decide_with(
        &self,
        utterance: &Utterance,
        stakes: &StakesAssessment,
        ambiguity: AmbiguitySignals,
    ) -> Result<ContractDecision, DomainError> {
        let intent = utterance.intent_or_general();

        // 1. Integration unavailable
        if let Some(capability) = intent.required_capability()
            && !utterance.capabilities().is_available(capability)
        {
            let decision = ContractDecision::CannotDoYet {
                message: format!(
                    "I can't connect to your {} yet, so I can't do that directly.",
                    capability.display_name()
                ),
                capability,
                fallback: capability.fallback_workflow().to_string(),
            };
            return lint_decision(decision);
        }

        // 2. Missing information
        if let Some(questions) = ClarifyingQuestions::new(missing_information(utterance, intent)) {
            let decision = ContractDecision::Clarify {
                message: self.phrases.pick(CLARIFY_INTROS).to_string(),
                questions,
            };
            return lint_decision(decision);
        }

        let suggestion = (stakes.level.is_high()
            || intent.is_complex_decision()
            || ambiguity.is_ambiguous())
        .then(|| self.phrases.pick(AGENT_SUGGESTIONS).to_string());

        // 3. / 4. Answer or confirm, with the overlay appended
        let decision = if stakes.level.is_low() {
            ContractDecision::Answer {
                message: with_suggestion(self.phrases.pick(ANSWER_OPENERS), suggestion.as_deref()),
                suggestion,
            }
        } else {
            let base = format!(
                "{} {}",
                self.phrases.pick(CONFIRM_OPENERS),
                self.phrases.pick(PROCEED_PROMPTS)
            );
            ContractDecision::ConfirmRequired {
                message: with_suggestion(&base, suggestion.as_deref()),
                suggestion,
            }
        };
        lint_decision(decision)
    }

    /// Build a `clarify` decision from questions raised by the trust gate.
    pub fn clarify_from_gate(
        &self,
        questions: ClarifyingQuestions,
    ) -> Result<ContractDecision, DomainError> {
        lint_decision(ContractDecision::Clarify {
            message: self.phrases.pick(CLARIFY_INTROS).to_string(),
            questions,
        })
    }
}

impl Default for ContractEngine {
    fn default() -> Self {
        Self::new(Arc::new(RoundRobinPicker::new()))
    }
}

impl std::fmt::Debug for ContractEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractEngine").finish_non_exhaustive()
    }
}

fn with_suggestion(base: &str, suggestion: Option<&str>) -> String {
    match suggestion {
        Some(line) => format!("{}\n{}", base, line),
        None => base.to_string(),
    }
}

fn lint_decision(decision: ContractDecision) -> Result<ContractDecision, DomainError> {
    lint_message(decision.assistant_message(), "assistant_message")?;
    for question in decision.questions() {
        lint_message(question, "questions")?;
    }
    if let Some(step) = decision.suggested_next_step() {
        lint_message(step, "suggested_next_step")?;
    }
    Ok(decision)
}

/// Candidate clarifying questions; empty when nothing is missing.
fn missing_information(utterance: &Utterance, intent: Intent) -> Vec<String> {
    let lower = utterance.normalized();
    let mut questions = Vec::new();

    if intent.is_execution() && utterance.char_len() < MIN_EXECUTION_LEN {
        questions.push(Q_WHAT_TO_DO.to_string());
        questions.push(Q_DETAILS.to_string());
    }

    if applies_send_check(&lower, intent)
        && let Some(rest) = after_send_verb(utterance.text().trim())
        && !has_recipient(rest)
    {
        questions.push(Q_RECIPIENT.to_string());
        if rest.split_whitespace().count() < 3 {
            questions.push(Q_MESSAGE.to_string());
        }
    }

    let integration_scoped =
        intent.required_capability().is_some() || contains_any(&lower, INTEGRATION_TERMS);
    if integration_scoped
        && contains_any(&lower, UNQUALIFIED_SCOPE_TERMS)
        && !SCOPE_QUALIFIER.is_match(&lower)
    {
        questions.push(Q_SCOPE.to_string());
    }

    questions
}

fn applies_send_check(lower: &str, intent: Intent) -> bool {
    !matches!(
        intent,
        Intent::Explain | Intent::Rewrite | Intent::Summarize | Intent::Analyze
    ) && !StakesClassifier::is_question(lower)
}

/// Text following a leading send/communicate verb, original case preserved.
fn after_send_verb(text: &str) -> Option<&str> {
    let mut rest = text;
    for prefix in POLITE_PREFIXES {
        if rest.len() >= prefix.len()
            && rest.is_char_boundary(prefix.len())
            && rest[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            rest = rest[prefix.len()..].trim_start();
            break;
        }
    }

    let verb_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let verb = rest[..verb_end]
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if SEND_VERBS.contains(&verb.as_str()) {
        Some(rest[verb_end..].trim())
    } else {
        None
    }
}

fn has_recipient(rest: &str) -> bool {
    if rest.contains('@') {
        return true;
    }
    let lower = rest.to_lowercase();
    if RECIPIENT_PREPOSITION.is_match(&lower) {
        return true;
    }

    let mut words = rest.split_whitespace();
    let Some(first) = words.next() else {
        return false;
    };
    let first_clean: String = first
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    let first_lower = first_clean.to_lowercase();

    if RECIPIENT_PRONOUNS.contains(&first_lower.as_str()) {
        return true;
    }
    if matches!(first_lower.as_str(), "my" | "our") && words.next().is_some() {
        return true;
    }
    first_clean.chars().next().is_some_and(char::is_uppercase)
}
