//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod evidence_provider;
pub mod offline_templates;
pub mod progress;
pub mod text_generation;
