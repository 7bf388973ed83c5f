//! Core domain concepts shared across all subdomains.
//!
//! - [`utterance::Utterance`] - a single user request with its context flags
//! - [`intent::Intent`] / [`intent::Capability`] - declared intent and integrations
//! - [`model::ModelId`] - downstream text-generation model identifier
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod intent;
pub mod model;
pub mod string;
pub mod text;
pub mod utterance;
