//! Declared intent and integration capabilities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// External integration an intent may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Email,
    Calendar,
    Crm,
}

impl Capability {
    /// Key used in the caller-supplied [`CapabilityMap`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Email => "email",
            Capability::Calendar => "calendar",
            Capability::Crm => "crm",
        }
    }

    /// User-facing name of the integration.
    pub fn display_name(&self) -> &'static str {
        match self {
            Capability::Email => "email",
            Capability::Calendar => "calendar",
            Capability::Crm => "CRM",
        }
    }

    /// What the user can do by hand while the integration is unavailable.
    pub fn fallback_workflow(&self) -> &'static str {
        match self {
            Capability::Email => {
                "I can draft the email here so you can paste it into your mail client and send it yourself."
            }
            Capability::Calendar => {
                "I can write up the meeting details and a short invite message you can add to your calendar."
            }
            Capability::Crm => {
                "I can prepare the record updates as a checklist you can enter into the CRM."
            }
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Integration availability supplied by the caller per request.
///
/// Capabilities absent from the map are treated as unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityMap(BTreeMap<String, bool>);

impl CapabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, available: bool) -> Self {
        self.0.insert(name.into(), available);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, available: bool) {
        self.0.insert(name.into(), available);
    }

    pub fn is_available(&self, capability: Capability) -> bool {
        self.0.get(capability.as_str()).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, bool)> for CapabilityMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What the user declared they want done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Explain,
    Rewrite,
    Draft,
    Summarize,
    Decide,
    Plan,
    Negotiate,
    Analyze,
    Execute,
    SendEmail,
    ScheduleMeeting,
    UpdateCrm,
    #[default]
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Explain => "explain",
            Intent::Rewrite => "rewrite",
            Intent::Draft => "draft",
            Intent::Summarize => "summarize",
            Intent::Decide => "decide",
            Intent::Plan => "plan",
            Intent::Negotiate => "negotiate",
            Intent::Analyze => "analyze",
            Intent::Execute => "execute",
            Intent::SendEmail => "send_email",
            Intent::ScheduleMeeting => "schedule_meeting",
            Intent::UpdateCrm => "update_crm",
            Intent::General => "general",
        }
    }

    /// The integration this intent cannot be carried out without.
    pub fn required_capability(&self) -> Option<Capability> {
        match self {
            Intent::SendEmail => Some(Capability::Email),
            Intent::ScheduleMeeting => Some(Capability::Calendar),
            Intent::UpdateCrm => Some(Capability::Crm),
            _ => None,
        }
    }

    /// Whether the intent asks the assistant to *do* something rather than
    /// produce text for the user.
    pub fn is_execution(&self) -> bool {
        matches!(
            self,
            Intent::Execute | Intent::SendEmail | Intent::ScheduleMeeting | Intent::UpdateCrm
        )
    }

    /// Intents that warrant suggesting additional perspectives.
    pub fn is_complex_decision(&self) -> bool {
        matches!(
            self,
            Intent::Decide | Intent::Plan | Intent::Negotiate | Intent::Analyze
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "explain" => Ok(Intent::Explain),
            "rewrite" | "edit" => Ok(Intent::Rewrite),
            "draft" | "write" => Ok(Intent::Draft),
            "summarize" | "summarise" => Ok(Intent::Summarize),
            "decide" | "decision" => Ok(Intent::Decide),
            "plan" => Ok(Intent::Plan),
            "negotiate" => Ok(Intent::Negotiate),
            "analyze" | "analyse" => Ok(Intent::Analyze),
            "execute" | "do" => Ok(Intent::Execute),
            "send_email" | "email" => Ok(Intent::SendEmail),
            "schedule_meeting" | "calendar" => Ok(Intent::ScheduleMeeting),
            "update_crm" | "crm" => Ok(Intent::UpdateCrm),
            "general" => Ok(Intent::General),
            _ => Err(format!("Invalid Intent: {}", s)),
        }
    }
}
