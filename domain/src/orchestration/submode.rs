//! Council sub-modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a council run ends.
///
/// - `Normal`: frame + peer replies, no synthesis call
/// - `Work`: frame + peer replies + one synthesis call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubMode {
    #[default]
    Normal,
    Work,
}

impl SubMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubMode::Normal => "normal",
            SubMode::Work => "work",
        }
    }

    pub fn has_synthesis(&self) -> bool {
        matches!(self, SubMode::Work)
    }
}

impl fmt::Display for SubMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configured sub-mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouncilMode {
    /// Work when the request is consequential or carries evidence.
    #[default]
    Auto,
    Normal,
    Work,
}

impl CouncilMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouncilMode::Auto => "auto",
            CouncilMode::Normal => "normal",
            CouncilMode::Work => "work",
        }
    }

    pub fn resolve(&self, consequential: bool, has_evidence: bool) -> SubMode {
        match self {
            CouncilMode::Normal => SubMode::Normal,
            CouncilMode::Work => SubMode::Work,
            CouncilMode::Auto if consequential || has_evidence => SubMode::Work,
            CouncilMode::Auto => SubMode::Normal,
        }
    }
}

impl fmt::Display for CouncilMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CouncilMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(CouncilMode::Auto),
            "normal" | "chat" => Ok(CouncilMode::Normal),
            "work" | "structured" => Ok(CouncilMode::Work),
            _ => Err(format!("Invalid CouncilMode: {}", s)),
        }
    }
}
