//! Stress-test brief: the structured synthesis form for consequential decisions.

use super::disagreement::Disagreement;
use super::lens::Lens;
use super::synthesis::SynthesisOutput;
use super::transcript::AgentCallResult;
use crate::contract::lint::redact_forbidden;
use crate::core::string::preview;
use crate::core::text::contains_any;
use crate::evidence::EvidenceBundle;
use serde::Serialize;

pub const MAX_TOP_RISKS: usize = 5;

const DECISION_MAX_LEN: usize = 200;
const RISK_MAX_LEN: usize = 200;
const BEST_MOVE_MAX_LEN: usize = 240;

const DEFAULT_DECISION: &str = "The decision you described";
const DEFAULT_RISKS: &[&str] = &[
    "The decision may be hard to undo once acted on.",
    "Key facts or other people's positions may not be fully known yet.",
];
const DEFAULT_BEST_MOVE: &str =
    "Take one small, reversible step first and confirm how it lands before committing fully.";
const DEFAULT_SAFER: &str = "Pause, gather the missing facts, and revisit the decision in a few days.";
const DEFAULT_BOLDER: &str = "Commit now and communicate the decision clearly to everyone affected.";

const EMAIL_TERMS: &[&str] = &["email", "message", "tell", "write to", "reply", "letter"];
const MEETING_TERMS: &[&str] = &["meet", "meeting", "talk to", "conversation", "call", "sit down"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternatives {
    pub safer: String,
    pub bolder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BriefEvidence {
    pub used: bool,
    /// Source URLs the brief relied on.
    pub sources: Vec<String>,
}

/// Structured decision brief.
///
/// `disagreements` may be empty (consensus) but is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StressTestBrief {
    pub decision_being_tested: String,
    pub top_risks: Vec<String>,
    pub disagreements: Vec<Disagreement>,
    pub best_move: String,
    pub alternatives: Alternatives,
    pub execution_tool: String,
    pub evidence: BriefEvidence,
}

impl StressTestBrief {
    /// Assemble a brief from whatever the run produced.
    ///
    /// Fields missing from the synthesis fall back to live peer replies
    /// (risk lens first) and then to fixed neutral wording, so a brief can be
    /// built even when the synthesis call failed.
    pub fn build(
        request: &str,
        synthesis: Option<&SynthesisOutput>,
        peers: &[AgentCallResult],
        disagreements: Vec<Disagreement>,
        evidence: Option<&EvidenceBundle>,
    ) -> Self {
        let structured = synthesis.and_then(SynthesisOutput::structured);

        let decision_being_tested = structured
            .and_then(|s| s.decision.as_deref())
            .map(|d| preview(d, DECISION_MAX_LEN))
            .unwrap_or_else(|| decision_from_request(request));

        let mut top_risks: Vec<String> = structured
            .map(|s| s.risks.iter().map(|r| preview(r, RISK_MAX_LEN)).collect())
            .unwrap_or_default();
        if top_risks.is_empty() {
            top_risks = risks_from_peers(peers);
        }
        if top_risks.is_empty() {
            top_risks = DEFAULT_RISKS.iter().map(|r| r.to_string()).collect();
        }
        top_risks.truncate(MAX_TOP_RISKS);

        let best_move = structured
            .and_then(|s| s.recommendation.clone())
            .or_else(|| match synthesis {
                Some(SynthesisOutput::Unstructured { interpretation }) if !interpretation.is_empty() => {
                    Some(preview(interpretation, BEST_MOVE_MAX_LEN))
                }
                _ => None,
            })
            .unwrap_or_else(|| DEFAULT_BEST_MOVE.to_string());

        let alternatives = Alternatives {
            safer: structured
                .and_then(|s| s.safer.clone())
                .unwrap_or_else(|| DEFAULT_SAFER.to_string()),
            bolder: structured
                .and_then(|s| s.bolder.clone())
                .unwrap_or_else(|| DEFAULT_BOLDER.to_string()),
        };

        let execution_tool = execution_tool_for(&format!("{} {}", request, best_move)).to_string();

        let evidence = match evidence {
            Some(bundle) if bundle.ok() => BriefEvidence {
                used: true,
                sources: bundle.sources().iter().map(|s| s.url.clone()).collect(),
            },
            _ => BriefEvidence {
                used: false,
                sources: Vec::new(),
            },
        };

        Self {
            decision_being_tested,
            top_risks,
            disagreements,
            best_move,
            alternatives,
            execution_tool,
            evidence,
        }
    }

    pub fn is_consensus(&self) -> bool {
        self.disagreements.is_empty()
    }

    /// Every user-visible string in the brief.
    pub fn user_visible_texts(&self) -> Vec<&str> {
        let mut texts = vec![self.decision_being_tested.as_str()];
        texts.extend(self.top_risks.iter().map(String::as_str));
        texts.extend(self.disagreements.iter().map(|d| d.point.as_str()));
        texts.push(&self.best_move);
        texts.push(&self.alternatives.safer);
        texts.push(&self.alternatives.bolder);
        texts.push(&self.execution_tool);
        texts
    }
}

/// The request as the decision under test, with forbidden phrases removed.
fn decision_from_request(request: &str) -> String {
    let (clean, _) = redact_forbidden(request);
    let clean = preview(&clean, DECISION_MAX_LEN);
    if clean.is_empty() {
        DEFAULT_DECISION.to_string()
    } else {
        clean
    }
}

/// First sentence of each live peer reply, risk-lens peers first.
fn risks_from_peers(peers: &[AgentCallResult]) -> Vec<String> {
    let mut live: Vec<(usize, &AgentCallResult)> =
        peers.iter().enumerate().filter(|(_, p)| p.live).collect();
    live.sort_by_key(|(slot, p)| {
        let lens = p.lens.unwrap_or_else(|| Lens::for_peer_slot(*slot));
        (lens != Lens::Risk, *slot)
    });
    live.into_iter()
        .filter_map(|(_, p)| {
            let first = p
                .content
                .split_inclusive(['.', '!', '?', '\n'])
                .map(str::trim)
                .find(|s| !s.is_empty())?;
            Some(preview(first, RISK_MAX_LEN))
        })
        .collect()
}

/// The kind of artifact that would carry out the recommended move.
fn execution_tool_for(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if contains_any(&lower, MEETING_TERMS) {
        "meeting agenda"
    } else if contains_any(&lower, EMAIL_TERMS) {
        "email draft"
    } else {
        "step-by-step checklist"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::lint::find_forbidden_phrase;
    use crate::core::model::ModelId;
    use crate::evidence::{Fact, Source};
    use crate::orchestration::synthesis::parse_synthesis;
    use crate::orchestration::transcript::UnavailableReason;

    fn live(name: &str, text: &str) -> AgentCallResult {
        AgentCallResult::live(name, ModelId::new("m"), text)
    }

    #[test]
    fn test_from_structured_synthesis() {
        let synthesis = parse_synthesis(
            "Decision: Take the offer\nRisks:\n- Pay cut\n- Long commute\nRecommendation: Ask for a start date in May.\nSafer: Stay another year.\nBolder: Resign tomorrow.",
        );
        let brief = StressTestBrief::build("Should I take the offer?", Some(&synthesis), &[], Vec::new(), None);
        assert_eq!(brief.decision_being_tested, "Take the offer");
        assert_eq!(brief.top_risks, vec!["Pay cut", "Long commute"]);
        assert_eq!(brief.best_move, "Ask for a start date in May.");
        assert_eq!(brief.alternatives.safer, "Stay another year.");
        assert_eq!(brief.alternatives.bolder, "Resign tomorrow.");
        assert!(brief.is_consensus());
        assert!(!brief.evidence.used);
    }

    #[test]
    fn test_without_synthesis_uses_peers_then_defaults() {
        let peers = vec![
            live("a", "He may retaliate. Keep records."),
            AgentCallResult::unavailable("b", UnavailableReason::Timeout, "n/a"),
        ];
        let brief = StressTestBrief::build("Should I fire him?", None, &peers, Vec::new(), None);
        assert_eq!(brief.decision_being_tested, "Should I fire him?");
        assert_eq!(brief.top_risks, vec!["He may retaliate."]);
        assert_eq!(brief.best_move, DEFAULT_BEST_MOVE);

        let brief = StressTestBrief::build("Should I fire him?", None, &[], Vec::new(), None);
        assert_eq!(brief.top_risks.len(), DEFAULT_RISKS.len());
    }

    #[test]
    fn test_unstructured_synthesis_best_move_is_shortened() {
        let synthesis = SynthesisOutput::Unstructured {
            interpretation: format!("Talk to your manager first.\n\n{}", "More detail here. ".repeat(40)),
        };
        let brief = StressTestBrief::build("Should I take the offer?", Some(&synthesis), &[], Vec::new(), None);
        assert!(brief.best_move.len() <= BEST_MOVE_MAX_LEN);
        assert!(brief.best_move.starts_with("Talk to your manager first. More detail"));
        assert!(brief.best_move.ends_with("..."));
        assert!(!brief.best_move.contains('\n'));
    }

    #[test]
    fn test_risks_capped() {
        let synthesis = parse_synthesis("Risks:\n- 1\n- 2\n- 3\n- 4\n- 5\n- 6\n- 7");
        let brief = StressTestBrief::build("x", Some(&synthesis), &[], Vec::new(), None);
        assert_eq!(brief.top_risks.len(), MAX_TOP_RISKS);
    }

    #[test]
    fn test_evidence_sources_listed() {
        let bundle = EvidenceBundle::new(
            vec![Fact::new("Rates rose", "s1")],
            vec![Source::new("s1", "Bank", "https://bank.example/rates", "2026-01-01T00:00:00.000Z")],
        );
        let brief = StressTestBrief::build("x", None, &[], Vec::new(), Some(&bundle));
        assert!(brief.evidence.used);
        assert_eq!(brief.evidence.sources, vec!["https://bank.example/rates"]);
    }

    #[test]
    fn test_execution_tool() {
        assert_eq!(execution_tool_for("talk to her in a meeting"), "meeting agenda");
        assert_eq!(execution_tool_for("send a short email"), "email draft");
        assert_eq!(execution_tool_for("sell the car"), "step-by-step checklist");
    }

    #[test]
    fn test_defaults_are_lint_clean() {
        let brief = StressTestBrief::build("Should I move?", None, &[], Vec::new(), None);
        for text in brief.user_visible_texts() {
            assert!(find_forbidden_phrase(text).is_none(), "{}", text);
        }
    }

    #[test]
    fn test_request_echo_is_redacted() {
        let brief = StressTestBrief::build("Claude?", None, &[], Vec::new(), None);
        assert_eq!(brief.decision_being_tested, DEFAULT_DECISION);
    }

    #[test]
    fn test_serializes_empty_disagreements_as_list() {
        let brief = StressTestBrief::build("x", None, &[], Vec::new(), None);
        let json = serde_json::to_value(&brief).unwrap();
        assert!(json["disagreements"].as_array().unwrap().is_empty());
    }
}
