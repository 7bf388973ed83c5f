//! Text generation port
//!
//! Defines the interface for calling a hosted model. One call, one reply:
//! no streaming and no retries.

use async_trait::async_trait;
use parley_domain::{ModelId, UnavailableReason};
use std::time::Duration;
use thiserror::Error;

/// Errors reported by a [`TextGenerationClient`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Generation failed: {0}")]
    Other(String),
}

impl GenerationError {
    /// The single bucket this failure is reported under.
    pub fn unavailable_reason(&self) -> UnavailableReason {
        match self {
            GenerationError::RateLimited(_) => UnavailableReason::RateLimited,
            GenerationError::NotFound(_) => UnavailableReason::NotFound,
            GenerationError::Timeout => UnavailableReason::Timeout,
            GenerationError::Http { .. } => UnavailableReason::HttpError,
            GenerationError::Other(_) => UnavailableReason::Exception,
        }
    }
}

/// Inputs for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub model: ModelId,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// Whether the backend can be called at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    /// Not callable for this run (e.g. `"missing_api_key"`).
    Unreachable(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// Gateway to a text generation backend
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    /// Send one prompt and return the reply text.
    ///
    /// Implementations should honour `request.timeout`; callers also bound
    /// the call themselves.
    async fn call(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Checked once per run before any call is made.
    fn availability(&self) -> Availability {
        Availability::Available
    }
}
