//! Infrastructure layer for parley
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod evidence;
pub mod logging;
pub mod providers;
pub mod templates;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBehaviorConfig, FileConfig, FileCouncilConfig,
    FileEvidenceConfig, FileLoggingConfig, FileOutputConfig, FilePeerConfig, FileProviderConfig,
};
pub use evidence::DuckDuckGoEvidenceProvider;
pub use logging::JsonlTranscriptLogger;
pub use providers::AnthropicTextClient;
pub use templates::StaticTemplateStore;
