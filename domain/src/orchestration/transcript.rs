//! Council transcript value objects.
//!
//! A [`Transcript`] is built fresh per request: one frame entry, one
//! [`AgentCallResult`] per configured peer (roster order), and in work mode
//! one synthesis entry.

use super::brief::StressTestBrief;
use super::lens::Lens;
use super::submode::SubMode;
use super::synthesis::SynthesisOutput;
use crate::core::model::ModelId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a call produced no usable content. Exactly one bucket per failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    RateLimited,
    NotFound,
    Timeout,
    HttpError,
    Exception,
}

impl UnavailableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnavailableReason::RateLimited => "rate_limited",
            UnavailableReason::NotFound => "not_found",
            UnavailableReason::Timeout => "timeout",
            UnavailableReason::HttpError => "http_error",
            UnavailableReason::Exception => "exception",
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one peer call.
///
/// `live == false` always carries a neutral placeholder as `content` and an
/// `unavailable_reason`; never fabricated advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCallResult {
    pub agent_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<ModelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lens: Option<Lens>,
    pub content: String,
    pub live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<UnavailableReason>,
}

impl AgentCallResult {
    pub fn live(agent_name: impl Into<String>, model_id: ModelId, content: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            model_id: Some(model_id),
            lens: None,
            content: content.into(),
            live: true,
            unavailable_reason: None,
        }
    }

    pub fn unavailable(
        agent_name: impl Into<String>,
        reason: UnavailableReason,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            model_id: None,
            lens: None,
            content: placeholder.into(),
            live: false,
            unavailable_reason: Some(reason),
        }
    }

    pub fn with_lens(mut self, lens: Lens) -> Self {
        self.lens = Some(lens);
        self
    }

    pub fn is_live(&self) -> bool {
        self.live
    }
}

/// The primary agent's closing entry in work mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesisEntry {
    pub agent_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<ModelId>,
    pub lens: Lens,
    /// User-facing text: the model's reply, or a neutral placeholder.
    pub content: String,
    pub live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<UnavailableReason>,
    /// Parsed form of a live reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<SynthesisOutput>,
    /// Present whenever a stress test was due, even if the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<StressTestBrief>,
}

impl SynthesisEntry {
    pub fn live(
        agent_name: impl Into<String>,
        model_id: ModelId,
        content: impl Into<String>,
        output: SynthesisOutput,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            model_id: Some(model_id),
            lens: Lens::SYNTHESIS,
            content: content.into(),
            live: true,
            unavailable_reason: None,
            output: Some(output),
            brief: None,
        }
    }

    pub fn unavailable(
        agent_name: impl Into<String>,
        reason: UnavailableReason,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            model_id: None,
            lens: Lens::SYNTHESIS,
            content: placeholder.into(),
            live: false,
            unavailable_reason: Some(reason),
            output: None,
            brief: None,
        }
    }

    pub fn with_brief(mut self, brief: StressTestBrief) -> Self {
        self.brief = Some(brief);
        self
    }
}

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptEntry {
    Frame { agent_name: String, content: String },
    Peer(AgentCallResult),
    Synthesis(SynthesisEntry),
}

impl TranscriptEntry {
    pub fn agent_name(&self) -> &str {
        match self {
            TranscriptEntry::Frame { agent_name, .. } => agent_name,
            TranscriptEntry::Peer(result) => &result.agent_name,
            TranscriptEntry::Synthesis(entry) => &entry.agent_name,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            TranscriptEntry::Frame { content, .. } => content,
            TranscriptEntry::Peer(result) => &result.content,
            TranscriptEntry::Synthesis(entry) => &entry.content,
        }
    }

    pub fn is_live(&self) -> bool {
        match self {
            TranscriptEntry::Frame { .. } => true,
            TranscriptEntry::Peer(result) => result.live,
            TranscriptEntry::Synthesis(entry) => entry.live,
        }
    }
}

/// Backend that produced the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Live,
    Template,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Live => "live",
            Provider::Template => "template",
        }
    }
}

/// Ordered record of one council run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    sub_mode: SubMode,
    entries: Vec<TranscriptEntry>,
    peers_unavailable: bool,
    provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<String>,
}

impl Transcript {
    /// Transcript from the live backend.
    ///
    /// `peers_unavailable` is set when every peer entry failed. The provider
    /// stays `live` in that case: the frame is deterministic and the primary
    /// is still reachable.
    pub fn live(sub_mode: SubMode, entries: Vec<TranscriptEntry>) -> Self {
        let mut peers = entries.iter().filter_map(|e| match e {
            TranscriptEntry::Peer(result) => Some(result),
            _ => None,
        });
        let peers_unavailable = match peers.next() {
            Some(first) => !first.live && peers.all(|p| !p.live),
            None => false,
        };
        Self {
            sub_mode,
            entries,
            peers_unavailable,
            provider: Provider::Live,
            fallback_reason: None,
        }
    }

    /// Deterministic offline transcript used when the primary is unreachable.
    pub fn offline(
        sub_mode: SubMode,
        entries: Vec<TranscriptEntry>,
        fallback_reason: impl Into<String>,
    ) -> Self {
        Self {
            sub_mode,
            entries,
            peers_unavailable: true,
            provider: Provider::Template,
            fallback_reason: Some(fallback_reason.into()),
        }
    }

    pub fn sub_mode(&self) -> SubMode {
        self.sub_mode
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn peers_unavailable(&self) -> bool {
        self.peers_unavailable
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    pub fn frame(&self) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            TranscriptEntry::Frame { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn peer_results(&self) -> impl Iterator<Item = &AgentCallResult> {
        self.entries.iter().filter_map(|e| match e {
            TranscriptEntry::Peer(result) => Some(result),
            _ => None,
        })
    }

    pub fn live_peer_count(&self) -> usize {
        self.peer_results().filter(|p| p.live).count()
    }

    pub fn synthesis(&self) -> Option<&SynthesisEntry> {
        self.entries.iter().find_map(|e| match e {
            TranscriptEntry::Synthesis(entry) => Some(entry),
            _ => None,
        })
    }

    pub fn brief(&self) -> Option<&StressTestBrief> {
        self.synthesis().and_then(|s| s.brief.as_ref())
    }

    /// Closing message: the synthesis if present, else the last live peer.
    pub fn closing_message(&self) -> Option<&str> {
        if let Some(synthesis) = self.synthesis() {
            return Some(&synthesis.content);
        }
        self.peer_results()
            .filter(|p| p.live)
            .last()
            .map(|p| p.content.as_str())
    }

    /// Every user-visible string in the transcript.
    pub fn user_visible_texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = self.entries.iter().map(TranscriptEntry::content).collect();
        if let Some(brief) = self.brief() {
            texts.extend(brief.user_visible_texts());
        }
        texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> TranscriptEntry {
        TranscriptEntry::Frame {
            agent_name: "lead".to_string(),
            content: "Gathering a few views.".to_string(),
        }
    }

    fn down(name: &str) -> TranscriptEntry {
        TranscriptEntry::Peer(AgentCallResult::unavailable(
            name,
            UnavailableReason::Timeout,
            "Not available right now.",
        ))
    }

    fn up(name: &str, text: &str) -> TranscriptEntry {
        TranscriptEntry::Peer(AgentCallResult::live(name, ModelId::new("m"), text))
    }

    #[test]
    fn test_all_peers_down_sets_flag_but_stays_live() {
        let t = Transcript::live(SubMode::Normal, vec![frame(), down("a"), down("b")]);
        assert!(t.peers_unavailable());
        assert_eq!(t.provider(), Provider::Live);
        assert!(t.fallback_reason().is_none());
        assert_eq!(t.closing_message(), None);
    }

    #[test]
    fn test_partial_failure() {
        let t = Transcript::live(
            SubMode::Normal,
            vec![frame(), down("a"), up("b", "Talk first."), down("c")],
        );
        assert!(!t.peers_unavailable());
        assert_eq!(t.len(), 4);
        assert_eq!(t.live_peer_count(), 1);
        assert_eq!(t.closing_message(), Some("Talk first."));
        assert!(t.synthesis().is_none());
    }

    #[test]
    fn test_offline() {
        let t = Transcript::offline(SubMode::Normal, vec![frame()], "missing_api_key");
        assert_eq!(t.provider(), Provider::Template);
        assert_eq!(t.fallback_reason(), Some("missing_api_key"));
    }

    #[test]
    fn test_unavailable_result_shape() {
        let r = AgentCallResult::unavailable("a", UnavailableReason::RateLimited, "n/a");
        assert!(!r.is_live());
        assert!(r.model_id.is_none());
        assert_eq!(r.unavailable_reason, Some(UnavailableReason::RateLimited));
    }

    #[test]
    fn test_entry_serializes_with_kind_tag() {
        let json = serde_json::to_value(up("a", "hi")).unwrap();
        assert_eq!(json["kind"], "peer");
        assert_eq!(json["live"], true);
        let json = serde_json::to_value(frame()).unwrap();
        assert_eq!(json["kind"], "frame");
    }
}
