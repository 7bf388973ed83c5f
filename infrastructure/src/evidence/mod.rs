//! Evidence providers

mod duckduckgo;

pub use duckduckgo::DuckDuckGoEvidenceProvider;
