//! Trust gate checks run before any downstream generation.
//!
//! - [`no_assumptions`] blocks requests missing required content
//! - [`evidence`] decides whether external evidence must be fetched
//! - [`consequence`] flags consequential, hard-to-reverse decisions
//! - [`gate`] bundles the three into a [`TrustAssessment`]

pub mod consequence;
pub mod evidence;
pub mod gate;
pub mod no_assumptions;

pub use consequence::ConsequenceDetector;
pub use evidence::EvidenceClassifier;
pub use gate::{TrustAssessment, TrustGate};
pub use no_assumptions::{AssumptionCheck, NoAssumptionsCheck};
