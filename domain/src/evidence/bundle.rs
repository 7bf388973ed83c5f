//! Evidence bundle value objects.
//!
//! An [`EvidenceBundle`] always satisfies: at most [`MAX_FACTS`] facts, at
//! most [`MAX_SOURCES`] sources, and every fact's `source_id` names a source
//! in the bundle. The constructor enforces this; there is no other way in.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_FACTS: usize = 10;
pub const MAX_SOURCES: usize = 8;

/// Neutral note used whenever evidence could not be gathered.
pub const EVIDENCE_UNAVAILABLE_NOTE: &str =
    "Up-to-date sources could not be checked, so time-sensitive details may be out of date.";

/// Why a bundle has no facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    NoResults,
    ProviderError,
    Disabled,
}

impl EmptyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmptyReason::NoResults => "no_results",
            EmptyReason::ProviderError => "provider_error",
            EmptyReason::Disabled => "disabled",
        }
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One sourced statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub text: String,
    pub source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl Fact {
    pub fn new(text: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_id: source_id.into(),
            published_at: None,
        }
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }
}

/// Where facts came from. `retrieved_at` is an ISO-8601 UTC timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub title: String,
    pub domain: String,
    pub url: String,
    pub retrieved_at: String,
}

impl Source {
    /// Build a source, deriving `domain` from the URL host.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        retrieved_at: impl Into<String>,
    ) -> Self {
        let url = url.into();
        Self {
            id: id.into(),
            title: title.into(),
            domain: domain_of(&url),
            url,
            retrieved_at: retrieved_at.into(),
        }
    }
}

/// Host part of a URL without a leading `www.`; empty if there is none.
pub fn domain_of(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("")
        .rsplit('@')
        .next()
        .unwrap_or("");
    let host = host.split(':').next().unwrap_or("");
    host.strip_prefix("www.").unwrap_or(host).to_lowercase()
}

/// Facts and sources gathered for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceBundle {
    ok: bool,
    facts: Vec<Fact>,
    sources: Vec<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limits_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    empty_reason: Option<EmptyReason>,
}

impl EvidenceBundle {
    /// Build a bundle, enforcing caps and referential integrity.
    ///
    /// Sources are deduplicated by id and URL and capped first; facts that
    /// reference a missing source are dropped before the fact cap applies.
    /// An empty result is `ok = false` with `empty_reason = no_results`.
    pub fn new(facts: Vec<Fact>, sources: Vec<Source>) -> Self {
        let mut kept_sources: Vec<Source> = Vec::new();
        for source in sources {
            if kept_sources.len() == MAX_SOURCES {
                break;
            }
            let duplicate = kept_sources
                .iter()
                .any(|s| s.id == source.id || (!s.url.is_empty() && s.url == source.url));
            if !duplicate {
                kept_sources.push(source);
            }
        }

        let kept_facts: Vec<Fact> = facts
            .into_iter()
            .filter(|f| !f.text.trim().is_empty())
            .filter(|f| kept_sources.iter().any(|s| s.id == f.source_id))
            .take(MAX_FACTS)
            .collect();

        if kept_facts.is_empty() {
            return Self::unavailable(EmptyReason::NoResults);
        }

        Self {
            ok: true,
            facts: kept_facts,
            sources: kept_sources,
            limits_note: None,
            empty_reason: None,
        }
    }

    /// An empty bundle carrying the neutral "evidence unavailable" note.
    pub fn unavailable(reason: EmptyReason) -> Self {
        Self {
            ok: false,
            facts: Vec::new(),
            sources: Vec::new(),
            limits_note: Some(EVIDENCE_UNAVAILABLE_NOTE.to_string()),
            empty_reason: Some(reason),
        }
    }

    pub fn with_limits_note(mut self, note: impl Into<String>) -> Self {
        self.limits_note = Some(note.into());
        self
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn limits_note(&self) -> Option<&str> {
        self.limits_note.as_deref()
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        self.empty_reason
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }
}
