//! Interaction contract: response-mode selection and message hygiene.
//!
//! - [`engine::ContractEngine`] picks one of four terminal modes per utterance
//! - [`decision::ContractDecision`] is the mode-tagged result
//! - [`lint`] keeps meta-language out of everything user-visible
//! - [`phrases`] holds the fixed wording catalogs and pickers

pub mod decision;
pub mod engine;
pub mod lint;
pub mod phrases;

pub use decision::{ADD_AGENTS_STEP, ClarifyingQuestions, ContractDecision, ContractMode};
pub use engine::ContractEngine;
pub use lint::{FORBIDDEN_PHRASES, find_forbidden_phrase, lint_all, lint_message, redact_forbidden};
pub use phrases::{FirstPicker, PhrasePicker, RoundRobinPicker, SeededPicker};
