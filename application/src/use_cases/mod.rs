//! Use cases for the application layer

pub mod respond;
pub mod run_council;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
