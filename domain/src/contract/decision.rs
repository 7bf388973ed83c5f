//! Contract decision: the terminal response mode for one utterance.

use crate::core::intent::Capability;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// `suggested_next_step` value set by the add-agents overlay.
pub const ADD_AGENTS_STEP: &str = "add_agents";

/// One of the four terminal response strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractMode {
    Answer,
    Clarify,
    ConfirmRequired,
    CannotDoYet,
}

impl ContractMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractMode::Answer => "answer",
            ContractMode::Clarify => "clarify",
            ContractMode::ConfirmRequired => "confirm_required",
            ContractMode::CannotDoYet => "cannot_do_yet",
        }
    }

    /// Modes that allow downstream generation / orchestration.
    pub fn permits_generation(&self) -> bool {
        matches!(self, ContractMode::Answer | ContractMode::ConfirmRequired)
    }
}

impl fmt::Display for ContractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Between one and three clarifying questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClarifyingQuestions(Vec<String>);

impl ClarifyingQuestions {
    pub const MAX: usize = 3;

    /// Build from candidate questions: blanks and duplicates are dropped and
    /// the list is capped at [`Self::MAX`]. Returns `None` if nothing is left.
    pub fn new(questions: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut kept: Vec<String> = Vec::new();
        for q in questions {
            let q = q.trim().to_string();
            if q.is_empty() || kept.contains(&q) {
                continue;
            }
            kept.push(q);
            if kept.len() == Self::MAX {
                break;
            }
        }
        if kept.is_empty() { None } else { Some(Self(kept)) }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Contract decision for one utterance (immutable once built).
///
/// Mode-specific data only exists on the variant where it is meaningful;
/// the flat view (`questions`, `requires_confirmation`,
/// `suggested_next_step`) is derived through accessors and is what gets
/// serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractDecision {
    Answer {
        message: String,
        /// Add-agents line already appended to `message`, if the overlay fired.
        suggestion: Option<String>,
    },
    Clarify {
        message: String,
        questions: ClarifyingQuestions,
    },
    ConfirmRequired {
        message: String,
        suggestion: Option<String>,
    },
    CannotDoYet {
        message: String,
        capability: Capability,
        fallback: String,
    },
}

impl ContractDecision {
    pub fn mode(&self) -> ContractMode {
        match self {
            ContractDecision::Answer { .. } => ContractMode::Answer,
            ContractDecision::Clarify { .. } => ContractMode::Clarify,
            ContractDecision::ConfirmRequired { .. } => ContractMode::ConfirmRequired,
            ContractDecision::CannotDoYet { .. } => ContractMode::CannotDoYet,
        }
    }

    pub fn assistant_message(&self) -> &str {
        match self {
            ContractDecision::Answer { message, .. }
            | ContractDecision::Clarify { message, .. }
            | ContractDecision::ConfirmRequired { message, .. }
            | ContractDecision::CannotDoYet { message, .. } => message,
        }
    }

    pub fn questions(&self) -> &[String] {
        match self {
            ContractDecision::Clarify { questions, .. } => questions.as_slice(),
            _ => &[],
        }
    }

    pub fn requires_confirmation(&self) -> bool {
        match self {
            ContractDecision::ConfirmRequired { .. } => true,
            ContractDecision::Answer { suggestion, .. } => suggestion.is_some(),
            _ => false,
        }
    }

    pub fn suggested_next_step(&self) -> Option<&str> {
        match self {
            ContractDecision::Answer { suggestion: Some(_), .. }
            | ContractDecision::ConfirmRequired { suggestion: Some(_), .. } => Some(ADD_AGENTS_STEP),
            ContractDecision::CannotDoYet { fallback, .. } => Some(fallback),
            _ => None,
        }
    }

    /// The add-agents line, when the overlay fired.
    pub fn agent_suggestion(&self) -> Option<&str> {
        match self {
            ContractDecision::Answer { suggestion, .. }
            | ContractDecision::ConfirmRequired { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }

    /// Every user-visible string carried by this decision.
    pub fn user_visible_texts(&self) -> Vec<&str> {
        let mut texts = vec![self.assistant_message()];
        texts.extend(self.questions().iter().map(String::as_str));
        if let ContractDecision::CannotDoYet { fallback, .. } = self {
            texts.push(fallback);
        }
        texts
    }

    fn view(&self) -> ContractDecisionView<'_> {
        ContractDecisionView {
            mode: self.mode(),
            assistant_message: self.assistant_message(),
            questions: self.questions(),
            requires_confirmation: self.requires_confirmation(),
            suggested_next_step: self.suggested_next_step(),
        }
    }
}

#[derive(Serialize)]
struct ContractDecisionView<'a> {
    mode: ContractMode,
    assistant_message: &'a str,
    questions: &'a [String],
    requires_confirmation: bool,
    suggested_next_step: Option<&'a str>,
}

impl Serialize for ContractDecision {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}
