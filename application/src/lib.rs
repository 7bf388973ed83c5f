//! Application layer for parley
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CouncilParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    evidence_provider::{DisabledEvidence, EvidenceError, EvidenceProvider},
    offline_templates::{OfflineTemplateStore, TemplateScenario},
    progress::{CouncilPhase, NoProgress, ProgressNotifier},
    text_generation::{Availability, GenerationError, GenerationRequest, TextGenerationClient},
};
pub use use_cases::respond::{RespondError, RespondInput, RespondOutput, RespondUseCase};
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
