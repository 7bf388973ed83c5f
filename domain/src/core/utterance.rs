//! Utterance value object

use super::intent::{CapabilityMap, Intent};
use super::text::fold_lower;
use serde::{Deserialize, Serialize};

/// A single user request (Value Object)
///
/// Immutable once built; created per request and never persisted by the
/// decision pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intent: Option<Intent>,
    #[serde(default)]
    has_previous_context: bool,
    #[serde(default)]
    has_attachments: bool,
    #[serde(default)]
    capabilities: CapabilityMap,
}

impl Utterance {
    /// Create a new utterance
    ///
    /// # Panics
    /// Panics if the text is empty or only whitespace
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(!text.trim().is_empty(), "Utterance cannot be empty");
        Self::from_text(text)
    }

    /// Try to create a new utterance, returning None if the text is blank
    pub fn try_new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self::from_text(text))
        }
    }

    fn from_text(text: String) -> Self {
        Self {
            text,
            intent: None,
            has_previous_context: false,
            has_attachments: false,
            capabilities: CapabilityMap::default(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_previous_context(mut self, has_previous_context: bool) -> Self {
        self.has_previous_context = has_previous_context;
        self
    }

    pub fn with_attachments(mut self, has_attachments: bool) -> Self {
        self.has_attachments = has_attachments;
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilityMap) -> Self {
        self.capabilities = capabilities;
        self
    }

    // ==================== Accessors ====================

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text trimmed, lowercased and with curly quotes folded: the form every
    /// classifier matches against.
    pub fn normalized(&self) -> String {
        fold_lower(self.text.trim())
    }

    pub fn intent(&self) -> Option<Intent> {
        self.intent
    }

    /// Declared intent, or [`Intent::General`] when none was declared.
    pub fn intent_or_general(&self) -> Intent {
        self.intent.unwrap_or_default()
    }

    pub fn has_previous_context(&self) -> bool {
        self.has_previous_context
    }

    pub fn has_attachments(&self) -> bool {
        self.has_attachments
    }

    /// Whether the caller supplied any context beyond the text itself.
    pub fn has_supporting_context(&self) -> bool {
        self.has_previous_context || self.has_attachments
    }

    pub fn capabilities(&self) -> &CapabilityMap {
        &self.capabilities
    }

    /// Length in characters (not bytes), used by the length thresholds.
    pub fn char_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

impl std::fmt::Display for Utterance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Utterance {
    fn from(s: &str) -> Self {
        Utterance::new(s)
    }
}

impl From<String> for Utterance {
    fn from(s: String) -> Self {
        Utterance::new(s)
    }
}
