//! Domain layer for parley
//!
//! This crate contains the core decision logic and value objects.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O: every classifier is deterministic and stateless per call.
//!
//! # Core Concepts
//!
//! ## Contract
//!
//! Before anything is generated, each utterance gets a response mode:
//!
//! - **answer**: low stakes, go ahead
//! - **clarify**: required information is missing, ask 1 to 3 questions
//! - **confirm_required**: medium/high stakes, ask before acting
//! - **cannot_do_yet**: the needed integration is not connected
//!
//! ## Trust gate
//!
//! No-assumptions, evidence-necessity and consequence checks decide whether
//! to ask, fetch sources first, or stress-test the decision.
//!
//! ## Council
//!
//! Several independent peer agents each give one perspective through a fixed
//! lens; in work mode a primary agent synthesizes them, producing a
//! [`StressTestBrief`] for consequential decisions.

pub mod config;
pub mod contract;
pub mod core;
pub mod disclosure;
pub mod evidence;
pub mod orchestration;
pub mod prompt;
pub mod stakes;
pub mod trust;

// Re-export commonly used types
pub use config::OutputFormat;
pub use contract::{
    ADD_AGENTS_STEP, ClarifyingQuestions, ContractDecision, ContractEngine, ContractMode,
    FirstPicker, PhrasePicker, RoundRobinPicker, SeededPicker, find_forbidden_phrase,
    lint_message, redact_forbidden,
};
pub use core::{
    error::DomainError,
    intent::{Capability, CapabilityMap, Intent},
    model::ModelId,
    utterance::Utterance,
};
pub use disclosure::DisclosureBuilder;
pub use evidence::{EmptyReason, EvidenceBundle, Fact, Source};
pub use orchestration::{
    AgentCallResult, AgentIdentity, AgentRole, CouncilMode, CouncilRoster, Disagreement, Lens,
    Provider, StressTestBrief, SubMode, SynthesisEntry, SynthesisOutput, Transcript,
    TranscriptEntry, UnavailableReason, extract_disagreements, parse_synthesis,
};
pub use prompt::PromptTemplate;
pub use stakes::{AmbiguityDetector, AmbiguitySignals, StakesAssessment, StakesClassifier, StakesLevel};
pub use trust::{
    AssumptionCheck, ConsequenceDetector, EvidenceClassifier, NoAssumptionsCheck, TrustAssessment,
    TrustGate,
};
