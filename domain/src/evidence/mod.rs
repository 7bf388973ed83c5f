//! Evidence gathered from an external provider before generation.

pub mod bundle;

pub use bundle::{
    EVIDENCE_UNAVAILABLE_NOTE, EmptyReason, EvidenceBundle, Fact, MAX_FACTS, MAX_SOURCES, Source,
    domain_of,
};
