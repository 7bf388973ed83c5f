//! Prompt templates for the council flow

use crate::evidence::EvidenceBundle;
use crate::orchestration::{AgentCallResult, Lens, SubMode};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a peer advisor working through one lens
    pub fn peer_system(lens: Lens) -> String {
        format!(
            r#"You are one of several independent advisors helping a person with a request.
Your lens is {}: focus on {}.
Give one clear perspective in at most five sentences. Speak directly to the person.
Do not describe how you arrived at the answer, do not mention other advisors, and do not refer to yourself as software."#,
            lens.name(),
            lens.focus()
        )
    }

    /// User prompt for a peer advisor
    pub fn peer_user(request: &str, evidence: Option<&EvidenceBundle>) -> String {
        let mut prompt = format!("Request:\n{}\n", request);
        Self::push_evidence(&mut prompt, evidence);
        prompt.push_str("\nGive your perspective.");
        prompt
    }

    /// System prompt for the synthesis call
    pub fn synthesis_system(stress_test: bool) -> String {
        let mut prompt = format!(
            r#"You combine several advisors' perspectives into one answer for the person who asked.
Your lens is {}: focus on {}.
Do not describe how you arrived at the answer and do not refer to yourself as software.
"#,
            Lens::SYNTHESIS.name(),
            Lens::SYNTHESIS.focus()
        );

        if stress_test {
            prompt.push_str(
                r#"The person is weighing a consequential decision. Reply using exactly these labelled sections:
Decision: one sentence naming the decision being tested
Risks: up to five bullet points
Evidence: what the sources say, or "none"
Recommendation: the single best move
Safer: a more cautious alternative
Bolder: a more ambitious alternative"#,
            );
        } else {
            prompt.push_str(
                r#"Reply using these labelled sections:
Interpretation: what the person needs, in one or two sentences
Evidence: what the sources say, or "none"
Recommendation: what to do next"#,
            );
        }
        prompt
    }

    /// User prompt for synthesis; unavailable peers are left out
    pub fn synthesis_user(
        request: &str,
        peers: &[AgentCallResult],
        evidence: Option<&EvidenceBundle>,
    ) -> String {
        let mut prompt = format!("Request:\n{}\n\nAdvisor perspectives:\n", request);

        let mut any = false;
        for (slot, peer) in peers.iter().enumerate().filter(|(_, p)| p.live) {
            let lens = peer.lens.unwrap_or_else(|| Lens::for_peer_slot(slot));
            prompt.push_str(&format!("\n--- {} ({}) ---\n{}\n", peer.agent_name, lens, peer.content));
            any = true;
        }
        if !any {
            prompt.push_str("\n(no advisor perspectives were available)\n");
        }

        Self::push_evidence(&mut prompt, evidence);
        prompt
    }

    /// Deterministic opening line from the primary agent (no network call)
    pub fn frame_message(peer_count: usize, sub_mode: SubMode) -> String {
        match sub_mode {
            SubMode::Normal => format!(
                "I'm asking {} advisors for their independent take on this.",
                peer_count
            ),
            SubMode::Work => format!(
                "I'm asking {} advisors to look at this from different angles, then I'll pull their views together.",
                peer_count
            ),
        }
    }

    fn push_evidence(prompt: &mut String, evidence: Option<&EvidenceBundle>) {
        let Some(bundle) = evidence else {
            return;
        };
        if bundle.ok() {
            prompt.push_str("\nSourced facts:\n");
            for fact in bundle.facts() {
                let title = bundle
                    .source(&fact.source_id)
                    .map(|s| s.title.as_str())
                    .unwrap_or("");
                prompt.push_str(&format!("- {} [{}]\n", fact.text, title));
            }
        } else if let Some(note) = bundle.limits_note() {
            prompt.push_str(&format!("\nNote: {}\n", note));
        }
    }
}
