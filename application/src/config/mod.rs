//! Application configuration types

pub mod council_params;

pub use council_params::CouncilParams;
