//! Council parameters: per-call limits and sub-mode selection.
//!
//! These control how [`RunCouncilUseCase`](crate::use_cases::run_council::RunCouncilUseCase)
//! and [`RespondUseCase`](crate::use_cases::respond::RespondUseCase) drive the
//! backend. They are application concerns, not domain policy.

use parley_domain::CouncilMode;
use std::time::Duration;

/// Limits applied to every council call.
///
/// Timeouts are per call; there is no pipeline-wide deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouncilParams {
    pub peer_timeout: Duration,
    pub synthesis_timeout: Duration,
    pub peer_max_tokens: u32,
    pub synthesis_max_tokens: u32,
    pub mode: CouncilMode,
    /// Fetch evidence when a request needs it. When off, the bundle is
    /// reported as disabled.
    pub fetch_evidence: bool,
    /// Upper bound on one evidence fetch. On expiry the bundle is reported
    /// as a provider error.
    pub evidence_timeout: Duration,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            peer_timeout: Duration::from_secs(8),
            synthesis_timeout: Duration::from_secs(15),
            peer_max_tokens: 600,
            synthesis_max_tokens: 1200,
            mode: CouncilMode::Auto,
            fetch_evidence: true,
            evidence_timeout: Duration::from_secs(5),
        }
    }
}

impl CouncilParams {
    // ==================== Builder Methods ====================

    pub fn with_peer_timeout(mut self, timeout: Duration) -> Self {
        self.peer_timeout = timeout;
        self
    }

    pub fn with_synthesis_timeout(mut self, timeout: Duration) -> Self {
        self.synthesis_timeout = timeout;
        self
    }

    pub fn with_peer_max_tokens(mut self, max: u32) -> Self {
        self.peer_max_tokens = max;
        self
    }

    pub fn with_synthesis_max_tokens(mut self, max: u32) -> Self {
        self.synthesis_max_tokens = max;
        self
    }

    pub fn with_mode(mut self, mode: CouncilMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_fetch_evidence(mut self, enabled: bool) -> Self {
        self.fetch_evidence = enabled;
        self
    }

    pub fn with_evidence_timeout(mut self, timeout: Duration) -> Self {
        self.evidence_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = CouncilParams::default();
        assert_eq!(params.peer_timeout, Duration::from_secs(8));
        assert_eq!(params.synthesis_timeout, Duration::from_secs(15));
        assert_eq!(params.peer_max_tokens, 600);
        assert_eq!(params.synthesis_max_tokens, 1200);
        assert_eq!(params.mode, CouncilMode::Auto);
        assert!(params.fetch_evidence);
        assert_eq!(params.evidence_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_chain() {
        let params = CouncilParams::default()
            .with_peer_timeout(Duration::from_millis(50))
            .with_mode(CouncilMode::Work)
            .with_fetch_evidence(false)
            .with_evidence_timeout(Duration::from_secs(2));
        assert_eq!(params.peer_timeout, Duration::from_millis(50));
        assert_eq!(params.evidence_timeout, Duration::from_secs(2));
        assert_eq!(params.mode, CouncilMode::Work);
        assert!(!params.fetch_evidence);
    }
}
