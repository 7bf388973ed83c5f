//! Council orchestration domain
//!
//! Value objects and pure helpers for multi-agent runs. The concurrent
//! fan-out itself lives in the application layer.

pub mod agent;
pub mod brief;
pub mod disagreement;
pub mod lens;
pub mod submode;
pub mod synthesis;
pub mod transcript;

pub use agent::{AgentIdentity, AgentRole, CouncilRoster};
pub use brief::{Alternatives, BriefEvidence, MAX_TOP_RISKS, StressTestBrief};
pub use disagreement::{Disagreement, extract_disagreements};
pub use lens::Lens;
pub use submode::{CouncilMode, SubMode};
pub use synthesis::{StructuredSynthesis, SynthesisOutput, parse_synthesis};
pub use transcript::{
    AgentCallResult, Provider, SynthesisEntry, Transcript, TranscriptEntry, UnavailableReason,
};
