//! Stakes and ambiguity signals.
//!
//! Both detectors are pure functions over the utterance text and feed the
//! [`ContractEngine`](crate::contract::engine::ContractEngine).

pub mod ambiguity;
pub mod classifier;

pub use ambiguity::{AmbiguityDetector, AmbiguitySignals};
pub use classifier::{StakesAssessment, StakesClassifier, StakesLevel};
