//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Insufficient input and missing integrations are *not* errors: they are
/// modelled as [`ContractDecision`](crate::contract::ContractDecision)
/// variants. What remains here are programming defects and cancellation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An outgoing message contains a forbidden phrase.
    ///
    /// The message-construction logic itself is broken; callers must not
    /// strip the phrase and continue.
    #[error("Contract violation: forbidden phrase \"{phrase}\" in {context}")]
    ContractViolation { phrase: String, context: String },

    #[error("Invalid utterance: {0}")]
    InvalidUtterance(String),

    #[error("No peer agents configured for the council")]
    NoPeers,

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }

    /// Check if this error is a message-linting defect
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, DomainError::ContractViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_contract_violation_display() {
        let error = DomainError::ContractViolation {
            phrase: "my reasoning".to_string(),
            context: "assistant_message".to_string(),
        };
        assert!(error.to_string().contains("my reasoning"));
        assert!(error.to_string().contains("assistant_message"));
        assert!(error.is_contract_violation());
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::NoPeers.is_cancelled());
        assert!(!DomainError::InvalidUtterance("x".to_string()).is_cancelled());
    }
}
