//! Evidence provider port
//!
//! Fetches sourced facts for a query. Implementations build the bundle with
//! [`EvidenceBundle::new`], which enforces the fact and source caps.

use async_trait::async_trait;
use parley_domain::{EmptyReason, EvidenceBundle};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvidenceError {
    #[error("Evidence request failed: {0}")]
    Request(String),

    #[error("Could not parse evidence response: {0}")]
    Parse(String),

    #[error("Evidence request timed out")]
    Timeout,
}

#[async_trait]
pub trait EvidenceProvider: Send + Sync {
    /// Fetch facts for `query`. An empty result is `Ok` with `empty_reason`
    /// set; `Err` is reserved for transport and parse failures.
    async fn fetch(&self, query: &str) -> Result<EvidenceBundle, EvidenceError>;
}

/// Provider used when evidence fetching is switched off.
pub struct DisabledEvidence;

#[async_trait]
impl EvidenceProvider for DisabledEvidence {
    async fn fetch(&self, _query: &str) -> Result<EvidenceBundle, EvidenceError> {
        Ok(EvidenceBundle::unavailable(EmptyReason::Disabled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_evidence_is_unavailable() {
        let bundle = DisabledEvidence.fetch("latest rates").await.unwrap();
        assert!(!bundle.ok());
        assert_eq!(bundle.empty_reason(), Some(EmptyReason::Disabled));
        assert!(bundle.limits_note().is_some());
    }
}
