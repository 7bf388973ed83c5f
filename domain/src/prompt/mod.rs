//! Prompt domain
//!
//! Templates for peer, synthesis and framing messages in a council run.

mod template;

pub use template::PromptTemplate;
