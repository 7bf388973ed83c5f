//! Transcript logging: append-only JSONL records of pipeline events.

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;
