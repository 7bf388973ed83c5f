//! Text generation backends

mod anthropic;

pub use anthropic::AnthropicTextClient;
