//! Port for structured transcript logging.
//!
//! Operational diagnostics go through `tracing`. This port records the
//! pipeline's decisions and agent results as machine-readable events
//! (one record per event, e.g. a JSONL line).

use serde_json::Value;

/// Event type identifiers emitted by the use cases.
pub mod event_types {
    pub const CONTRACT_DECISION: &str = "contract_decision";
    pub const TRUST_GATE: &str = "trust_gate";
    pub const EVIDENCE_FETCHED: &str = "evidence_fetched";
    pub const PEER_RESULT: &str = "peer_result";
    pub const SYNTHESIS_RESULT: &str = "synthesis_result";
    pub const FALLBACK: &str = "fallback";
}

/// One structured event. The adapter adds the timestamp when it writes.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub event_type: &'static str,
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for [`ConversationEvent`]s.
///
/// `log` is synchronous and infallible for the caller; write failures stay
/// inside the adapter.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
