//! Console output formatter for parley responses

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use parley_application::RespondOutput;
use parley_domain::{ContractMode, EvidenceBundle, StressTestBrief, Transcript, TranscriptEntry};

/// Formats responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors off (or back to terminal detection)
    pub fn set_color(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    /// The reply, the council's closing message and disclosures
    pub fn format_text(output: &RespondOutput) -> String {
        let mut out = String::new();

        Self::push_decision(&mut out, output);

        if let Some(transcript) = &output.transcript {
            if let Some(closing) = transcript.closing_message() {
                out.push('\n');
                out.push_str(closing);
                out.push('\n');
            } else if let Some(frame) = transcript.frame() {
                out.push('\n');
                out.push_str(frame);
                out.push('\n');
            }
            if let Some(brief) = transcript.brief() {
                out.push_str(&Self::format_brief(brief));
            }
        }

        Self::push_disclosures(&mut out, &output.disclosures);
        out
    }

    /// Every stage of the pipeline
    pub fn format_full(output: &RespondOutput) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("parley"));
        out.push('\n');

        out.push_str(&format!(
            "{} {}   {} {}\n",
            "Mode:".cyan().bold(),
            Self::mode_label(output.decision.mode()),
            "Stakes:".cyan().bold(),
            output.stakes.level.as_str()
        ));

        out.push_str(&Self::section_header("Reply"));
        Self::push_decision(&mut out, output);

        if let Some(evidence) = &output.evidence {
            out.push_str(&Self::section_header("Sources"));
            out.push_str(&Self::format_evidence(evidence));
        }

        if let Some(transcript) = &output.transcript {
            out.push_str(&Self::section_header(&format!(
                "Council ({})",
                transcript.sub_mode()
            )));
            out.push_str(&Self::format_transcript(transcript));
            if let Some(brief) = transcript.brief() {
                out.push_str(&Self::format_brief(brief));
            }
        }

        if !output.disclosures.is_empty() {
            out.push_str(&Self::section_header("Notes"));
            for line in &output.disclosures {
                out.push_str(&format!("  * {}\n", line));
            }
        }

        out.push_str(&Self::footer());
        out
    }

    /// Format as JSON
    pub fn format_json(output: &RespondOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    fn push_decision(out: &mut String, output: &RespondOutput) {
        let decision = &output.decision;
        out.push_str(decision.assistant_message());
        out.push('\n');

        for (i, question) in decision.questions().iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, question));
        }

        if decision.mode() == ContractMode::CannotDoYet
            && let Some(step) = decision.suggested_next_step()
        {
            out.push_str(&format!("{} {}\n", "Meanwhile:".yellow().bold(), step));
        }
    }

    fn push_disclosures(out: &mut String, disclosures: &[String]) {
        if disclosures.is_empty() {
            return;
        }
        out.push('\n');
        for line in disclosures {
            out.push_str(&format!("{}\n", line.dimmed()));
        }
    }

    fn format_transcript(transcript: &Transcript) -> String {
        let mut out = String::new();
        for entry in transcript.entries() {
            let (title, live, reason) = match entry {
                TranscriptEntry::Frame { agent_name, .. } => (agent_name.clone(), true, None),
                TranscriptEntry::Peer(peer) => (
                    match peer.lens {
                        Some(lens) => format!("{} ({})", peer.agent_name, lens),
                        None => peer.agent_name.clone(),
                    },
                    peer.live,
                    peer.unavailable_reason,
                ),
                TranscriptEntry::Synthesis(synthesis) => (
                    format!("{} ({})", synthesis.agent_name, synthesis.lens),
                    synthesis.live,
                    synthesis.unavailable_reason,
                ),
            };

            let heading = format!("── {} ──", title);
            if live {
                out.push_str(&format!("\n{}\n", heading.yellow().bold()));
            } else {
                let reason = reason.map(|r| r.as_str()).unwrap_or("unavailable");
                out.push_str(&format!(
                    "\n{} {}\n",
                    heading.red().bold(),
                    format!("[{}]", reason).dimmed()
                ));
            }
            out.push_str(entry.content());
            out.push('\n');
        }
        out
    }

    fn format_evidence(evidence: &EvidenceBundle) -> String {
        let mut out = String::new();
        if !evidence.ok() {
            if let Some(note) = evidence.limits_note() {
                out.push_str(&format!("{}\n", note.dimmed()));
            }
            return out;
        }
        for fact in evidence.facts() {
            let domain = evidence
                .source(&fact.source_id)
                .map(|s| s.domain.as_str())
                .unwrap_or("");
            out.push_str(&format!("  * {} {}\n", fact.text, format!("({})", domain).dimmed()));
        }
        for source in evidence.sources() {
            out.push_str(&format!(
                "  [{}] {} {}\n",
                source.id,
                source.title,
                source.url.dimmed()
            ));
        }
        out
    }

    fn format_brief(brief: &StressTestBrief) -> String {
        let mut out = String::new();
        out.push_str(&format!("\n{}\n", "Decision brief".cyan().bold()));
        out.push_str(&format!(
            "{} {}\n",
            "Deciding:".bold(),
            brief.decision_being_tested
        ));

        if !brief.top_risks.is_empty() {
            out.push_str(&format!("{}\n", "Top risks:".bold()));
            for risk in &brief.top_risks {
                out.push_str(&format!("  * {}\n", risk));
            }
        }

        if brief.is_consensus() {
            out.push_str(&format!("{}\n", "The perspectives broadly agree.".green()));
        } else {
            out.push_str(&format!("{}\n", "Where views differ:".yellow().bold()));
            for d in &brief.disagreements {
                out.push_str(&format!("  * {} ({}): {}\n", d.agent, d.lens, d.point));
            }
        }

        out.push_str(&format!("{} {}\n", "Best move:".green().bold(), brief.best_move));
        out.push_str(&format!("{} {}\n", "Safer:".bold(), brief.alternatives.safer));
        out.push_str(&format!("{} {}\n", "Bolder:".bold(), brief.alternatives.bolder));
        out.push_str(&format!("{} {}\n", "To act on it:".bold(), brief.execution_tool));

        if brief.evidence.used {
            out.push_str(&format!(
                "{} {}\n",
                "Sources:".bold(),
                brief.evidence.sources.join(", ")
            ));
        }
        out
    }

    fn mode_label(mode: ContractMode) -> String {
        match mode {
            ContractMode::Answer => mode.as_str().green().to_string(),
            ContractMode::Clarify | ContractMode::ConfirmRequired => {
                mode.as_str().yellow().to_string()
            }
            ContractMode::CannotDoYet => mode.as_str().red().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_text(&self, output: &RespondOutput) -> String {
        Self::format_text(output)
    }

    fn format_full(&self, output: &RespondOutput) -> String {
        Self::format_full(output)
    }

    fn format_json(&self, output: &RespondOutput) -> String {
        Self::format_json(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_domain::{
        AgentCallResult, ClarifyingQuestions, ContractDecision, EmptyReason, Lens, ModelId,
        OutputFormat, StakesAssessment, StakesLevel, SubMode, SynthesisEntry, UnavailableReason,
    };

    fn plain() {
        colored::control::set_override(false);
    }

    fn stakes(level: StakesLevel) -> StakesAssessment {
        StakesAssessment {
            level,
            reasons: Vec::new(),
        }
    }

    fn council_output() -> RespondOutput {
        let peers = vec![
            AgentCallResult::live("advisor-a", ModelId::new("m"), "Protect your savings first.")
                .with_lens(Lens::Risk),
            AgentCallResult::unavailable(
                "advisor-b",
                UnavailableReason::Timeout,
                "This perspective isn't available right now.",
            )
            .with_lens(Lens::Relationship),
        ];
        let brief = StressTestBrief::build("Take the offer", None, &peers, Vec::new(), None);
        let mut entries = vec![TranscriptEntry::Frame {
            agent_name: "lead".to_string(),
            content: "Asking two advisors.".to_string(),
        }];
        entries.extend(peers.into_iter().map(TranscriptEntry::Peer));
        entries.push(TranscriptEntry::Synthesis(
            SynthesisEntry::unavailable(
                "lead",
                UnavailableReason::Exception,
                "A combined view is not available right now.",
            )
            .with_brief(brief),
        ));

        RespondOutput {
            decision: ContractDecision::ConfirmRequired {
                message: "Before I go further, is this what you want?".to_string(),
                suggestion: None,
            },
            stakes: stakes(StakesLevel::High),
            trust: None,
            evidence: Some(EvidenceBundle::unavailable(EmptyReason::ProviderError)),
            transcript: Some(Transcript::live(SubMode::Work, entries)),
            disclosures: vec!["Asked for 2 independent perspectives; 1 responded.".to_string()],
        }
    }

    #[test]
    fn test_text_lists_clarifying_questions() {
        plain();
        let output = RespondOutput {
            decision: ContractDecision::Clarify {
                message: "A couple of quick questions first.".to_string(),
                questions: ClarifyingQuestions::new(vec![
                    "Who is this about?".to_string(),
                    "What outcome do you want?".to_string(),
                ])
                .unwrap(),
            },
            stakes: stakes(StakesLevel::High),
            trust: None,
            evidence: None,
            transcript: None,
            disclosures: Vec::new(),
        };

        let text = ConsoleFormatter::format_text(&output);
        assert!(text.starts_with("A couple of quick questions first.\n"));
        assert!(text.contains("  1. Who is this about?\n"));
        assert!(text.contains("  2. What outcome do you want?\n"));
    }

    #[test]
    fn test_text_shows_closing_brief_and_disclosures() {
        plain();
        let text = ConsoleFormatter::format_text(&council_output());
        assert!(text.contains("A combined view is not available right now."));
        assert!(text.contains("Decision brief"));
        assert!(text.contains("Best move:"));
        assert!(text.contains("1 responded."));
    }

    #[test]
    fn test_full_marks_unavailable_entries() {
        plain();
        let full = ConsoleFormatter::format_full(&council_output());
        assert!(full.contains("── advisor-a (Risk) ──"));
        assert!(full.contains("── advisor-b (Relationship) ── [timeout]"));
        assert!(full.contains("Council (work)"));
        assert!(full.contains("Stakes: high"));
    }

    #[test]
    fn test_json_is_flat_decision_view() {
        let json = ConsoleFormatter.render(&council_output(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["decision"]["mode"], "confirm_required");
        assert_eq!(value["decision"]["requires_confirmation"], true);
        assert_eq!(value["stakes"]["level"], "high");
        assert_eq!(value["evidence"]["ok"], false);
        assert!(value.get("trust").is_none());
    }
}
