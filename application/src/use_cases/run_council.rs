//! Run Council use case
//!
//! Frames the request, asks every peer for an independent perspective
//! concurrently, then in work mode has the primary agent combine them.
//! Individual peer failures are recorded in the transcript; only an
//! unreachable primary switches the whole run to offline templates.

use crate::config::CouncilParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::offline_templates::{OfflineTemplateStore, TemplateScenario};
use crate::ports::progress::{CouncilPhase, NoProgress, ProgressNotifier};
use crate::ports::text_generation::{
    Availability, GenerationError, GenerationRequest, TextGenerationClient,
};
use crate::use_cases::shared::is_cancelled;
use parley_domain::contract::lint_all;
use parley_domain::{
    AgentCallResult, CouncilRoster, DomainError, EvidenceBundle, Lens, ModelId, PromptTemplate,
    StressTestBrief, SubMode, SynthesisEntry, Transcript, TranscriptEntry, UnavailableReason,
    extract_disagreements, lint_message, parse_synthesis, redact_forbidden,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a council run
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("No peer agents configured")]
    NoPeers,

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Contract(DomainError),
}

impl RunCouncilError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunCouncilError::Cancelled)
    }
}

impl From<DomainError> for RunCouncilError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NoPeers => RunCouncilError::NoPeers,
            DomainError::Cancelled => RunCouncilError::Cancelled,
            other => RunCouncilError::Contract(other),
        }
    }
}

/// Input for one council run
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    pub request: String,
    pub roster: CouncilRoster,
    pub sub_mode: SubMode,
    /// Attach a [`StressTestBrief`] to the synthesis entry. Only applies in
    /// work mode.
    pub stress_test: bool,
    pub evidence: Option<EvidenceBundle>,
}

impl RunCouncilInput {
    pub fn new(request: impl Into<String>, roster: CouncilRoster) -> Self {
        Self {
            request: request.into(),
            roster,
            sub_mode: SubMode::Normal,
            stress_test: false,
            evidence: None,
        }
    }

    pub fn with_sub_mode(mut self, sub_mode: SubMode) -> Self {
        self.sub_mode = sub_mode;
        self
    }

    pub fn with_stress_test(mut self, stress_test: bool) -> Self {
        self.stress_test = stress_test;
        self
    }

    pub fn with_evidence(mut self, evidence: Option<EvidenceBundle>) -> Self {
        self.evidence = evidence;
        self
    }
}

/// Use case for running a council of peer agents
pub struct RunCouncilUseCase<C: TextGenerationClient + 'static> {
    client: Arc<C>,
    templates: Arc<dyn OfflineTemplateStore>,
    params: CouncilParams,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<C: TextGenerationClient + 'static> RunCouncilUseCase<C> {
    pub fn new(
        client: Arc<C>,
        templates: Arc<dyn OfflineTemplateStore>,
        params: CouncilParams,
    ) -> Self {
        Self {
            client,
            templates,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Abort in-flight calls and return [`RunCouncilError::Cancelled`] once
    /// `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &CouncilParams {
        &self.params
    }

    /// Execute the council run
    pub async fn execute(&self, input: RunCouncilInput) -> Result<Transcript, RunCouncilError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the council run with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunCouncilInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Transcript, RunCouncilError> {
        if is_cancelled(&self.cancellation_token) {
            return Err(RunCouncilError::Cancelled);
        }

        info!(
            "Starting council: {} peers, {} mode",
            input.roster.peer_count(),
            input.sub_mode.as_str()
        );

        if let Availability::Unreachable(reason) = self.client.availability() {
            warn!("Primary backend unreachable ({}), using offline transcript", reason);
            return self.offline_transcript(&input, &reason);
        }

        let primary = input.roster.primary();

        progress.on_phase_start(CouncilPhase::Frame, 1);
        let frame = PromptTemplate::frame_message(input.roster.peer_count(), input.sub_mode);
        lint_message(&frame, "frame")?;
        progress.on_task_complete(CouncilPhase::Frame, &primary.name, true);
        progress.on_phase_complete(CouncilPhase::Frame);

        let peers = self.run_peers(&input, progress).await?;
        if peers.iter().all(|p| !p.live) {
            warn!("All {} peers unavailable", peers.len());
        }

        let synthesis = if input.sub_mode.has_synthesis() {
            Some(self.run_synthesis(&input, &peers, progress).await?)
        } else {
            None
        };

        let mut entries = Vec::with_capacity(peers.len() + 2);
        entries.push(TranscriptEntry::Frame {
            agent_name: primary.name.clone(),
            content: frame,
        });
        entries.extend(peers.into_iter().map(TranscriptEntry::Peer));
        entries.extend(synthesis.map(TranscriptEntry::Synthesis));

        let transcript = Transcript::live(input.sub_mode, entries);
        lint_all(transcript.user_visible_texts(), "transcript")?;

        info!(
            "Council complete: {}/{} peers live",
            transcript.live_peer_count(),
            input.roster.peer_count()
        );
        Ok(transcript)
    }

    /// Query every peer concurrently. Results come back in roster order.
    async fn run_peers(
        &self,
        input: &RunCouncilInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<AgentCallResult>, RunCouncilError> {
        let peer_count = input.roster.peer_count();
        progress.on_phase_start(CouncilPhase::Peers, peer_count);

        let placeholder = self.templates.get(TemplateScenario::PeerUnavailable);
        lint_message(placeholder, "peer_placeholder")?;

        let user_message = PromptTemplate::peer_user(&input.request, input.evidence.as_ref());
        let timeout = self.params.peer_timeout;
        let mut join_set = JoinSet::new();

        for (slot, (peer, lens)) in input.roster.peers_with_lenses().enumerate() {
            let client = Arc::clone(&self.client);
            let request = GenerationRequest {
                system_prompt: PromptTemplate::peer_system(lens),
                user_message: user_message.clone(),
                model: peer.model.clone(),
                max_tokens: self.params.peer_max_tokens,
                timeout,
            };
            let name = peer.name.clone();
            debug!("Querying {} ({}) through the {} lens", name, request.model, lens);

            join_set.spawn(async move {
                let result = match tokio::time::timeout(timeout, client.call(&request)).await {
                    Ok(result) => result,
                    Err(_) => Err(GenerationError::Timeout),
                };
                (slot, name, request.model, lens, result)
            });
        }

        let mut slots: Vec<Option<AgentCallResult>> = vec![None; peer_count];

        loop {
            let joined = if let Some(ref token) = self.cancellation_token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        join_set.abort_all();
                        return Err(RunCouncilError::Cancelled);
                    }
                    joined = join_set.join_next() => joined,
                }
            } else {
                join_set.join_next().await
            };
            let Some(joined) = joined else { break };

            match joined {
                Ok((slot, name, model, lens, result)) => {
                    let entry = peer_entry(name, model, lens, result, placeholder);
                    progress.on_task_complete(CouncilPhase::Peers, &entry.agent_name, entry.live);
                    self.log_peer(&entry);
                    slots[slot] = Some(entry);
                }
                Err(e) => {
                    warn!("Peer task failed: {}", e);
                }
            }
        }

        progress.on_phase_complete(CouncilPhase::Peers);

        // A task that panicked leaves its slot empty
        let results = slots
            .into_iter()
            .zip(input.roster.peers_with_lenses())
            .map(|(slot, (peer, lens))| {
                slot.unwrap_or_else(|| {
                    AgentCallResult::unavailable(&peer.name, UnavailableReason::Exception, placeholder)
                        .with_lens(lens)
                })
            })
            .collect();
        Ok(results)
    }

    /// One primary call over all peer outputs. Failure keeps the entry with
    /// a placeholder; the brief is still built when due.
    async fn run_synthesis(
        &self,
        input: &RunCouncilInput,
        peers: &[AgentCallResult],
        progress: &dyn ProgressNotifier,
    ) -> Result<SynthesisEntry, RunCouncilError> {
        let primary = input.roster.primary();
        progress.on_phase_start(CouncilPhase::Synthesis, 1);

        let placeholder = self.templates.get(TemplateScenario::SynthesisUnavailable);
        lint_message(placeholder, "synthesis_placeholder")?;

        let request = GenerationRequest {
            system_prompt: PromptTemplate::synthesis_system(input.stress_test),
            user_message: PromptTemplate::synthesis_user(
                &input.request,
                peers,
                input.evidence.as_ref(),
            ),
            model: primary.model.clone(),
            max_tokens: self.params.synthesis_max_tokens,
            timeout: self.params.synthesis_timeout,
        };
        debug!("Synthesizing with {}", request.model);

        let call = tokio::time::timeout(request.timeout, self.client.call(&request));
        let result = if let Some(ref token) = self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(RunCouncilError::Cancelled),
                result = call => result,
            }
        } else {
            call.await
        };
        let result = result
            .unwrap_or(Err(GenerationError::Timeout))
            .and_then(|text| clean_reply(&primary.name, text));

        let mut entry = match result {
            Ok(content) => {
                let output = parse_synthesis(&content);
                info!(
                    "Synthesis complete ({})",
                    if output.structured().is_some() { "structured" } else { "unstructured" }
                );
                SynthesisEntry::live(&primary.name, primary.model.clone(), content, output)
            }
            Err(e) => {
                let reason = e.unavailable_reason();
                warn!("Synthesis unavailable ({}): {}", reason, e);
                SynthesisEntry::unavailable(&primary.name, reason, placeholder)
            }
        };

        progress.on_task_complete(CouncilPhase::Synthesis, &primary.name, entry.live);
        progress.on_phase_complete(CouncilPhase::Synthesis);

        if input.stress_test {
            let disagreements = extract_disagreements(peers);
            debug!("Found {} disagreement(s) between peers", disagreements.len());
            let brief = StressTestBrief::build(
                &input.request,
                entry.output.as_ref(),
                peers,
                disagreements,
                input.evidence.as_ref(),
            );
            entry = entry.with_brief(brief);
        }

        self.conversation_logger.log(ConversationEvent::new(
            event_types::SYNTHESIS_RESULT,
            json!({
                "agent": entry.agent_name,
                "model": entry.model_id,
                "live": entry.live,
                "unavailable_reason": entry.unavailable_reason,
                "structured": entry.output.as_ref().is_some_and(|o| o.structured().is_some()),
                "brief": entry.brief.is_some(),
                "disagreements": entry.brief.as_ref().map_or(0, |b| b.disagreements.len()),
            }),
        ));

        Ok(entry)
    }

    /// Deterministic transcript built only from templates. No calls are made.
    fn offline_transcript(
        &self,
        input: &RunCouncilInput,
        reason: &str,
    ) -> Result<Transcript, RunCouncilError> {
        let primary = input.roster.primary();
        let placeholder = self.templates.get(TemplateScenario::PeerUnavailable);
        let closing = self.templates.get(if input.stress_test {
            TemplateScenario::OfflineStressTest
        } else {
            TemplateScenario::OfflineAnswer
        });
        let frame = self.templates.get(TemplateScenario::Frame);

        // Without a synthesis entry the frame carries the closing guidance
        let frame = match input.sub_mode {
            SubMode::Normal => format!("{}\n\n{}", frame, closing),
            SubMode::Work => frame.to_string(),
        };

        let mut entries = vec![TranscriptEntry::Frame {
            agent_name: primary.name.clone(),
            content: frame,
        }];
        entries.extend(input.roster.peers_with_lenses().map(|(peer, lens)| {
            TranscriptEntry::Peer(
                AgentCallResult::unavailable(&peer.name, UnavailableReason::Exception, placeholder)
                    .with_lens(lens),
            )
        }));

        if input.sub_mode.has_synthesis() {
            let mut synthesis =
                SynthesisEntry::unavailable(&primary.name, UnavailableReason::Exception, closing);
            if input.stress_test {
                synthesis = synthesis.with_brief(StressTestBrief::build(
                    &input.request,
                    None,
                    &[],
                    Vec::new(),
                    input.evidence.as_ref(),
                ));
            }
            entries.push(TranscriptEntry::Synthesis(synthesis));
        }

        let transcript = Transcript::offline(input.sub_mode, entries, reason);
        lint_all(transcript.user_visible_texts(), "offline_transcript")?;

        self.conversation_logger.log(ConversationEvent::new(
            event_types::FALLBACK,
            json!({
                "reason": reason,
                "sub_mode": input.sub_mode.as_str(),
            }),
        ));
        Ok(transcript)
    }

    fn log_peer(&self, entry: &AgentCallResult) {
        self.conversation_logger.log(ConversationEvent::new(
            event_types::PEER_RESULT,
            json!({
                "agent": entry.agent_name,
                "model": entry.model_id,
                "lens": entry.lens,
                "live": entry.live,
                "unavailable_reason": entry.unavailable_reason,
                "content": entry.content,
            }),
        ));
    }
}

fn peer_entry(
    name: String,
    model: ModelId,
    lens: Lens,
    result: Result<String, GenerationError>,
    placeholder: &str,
) -> AgentCallResult {
    match result.and_then(|text| clean_reply(&name, text)) {
        Ok(content) => {
            info!("{} responded", name);
            AgentCallResult::live(name, model, content).with_lens(lens)
        }
        Err(e) => {
            let reason = e.unavailable_reason();
            warn!("{} unavailable ({}): {}", name, reason, e);
            AgentCallResult::unavailable(name, reason, placeholder).with_lens(lens)
        }
    }
}

/// Drop sentences with forbidden phrases from model output. Nothing left
/// counts as a failed call.
fn clean_reply(agent: &str, text: String) -> Result<String, GenerationError> {
    let (clean, removed) = redact_forbidden(&text);
    if removed > 0 {
        warn!("Removed {} sentence(s) with forbidden phrases from {}", removed, agent);
    }
    if clean.trim().is_empty() {
        return Err(GenerationError::Other("empty reply".to_string()));
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        MockClient, MockTemplates, PRIMARY_MODEL, RecordingLogger, Script, roster,
    };
    use std::time::{Duration, Instant};

    fn use_case(client: MockClient) -> (Arc<MockClient>, RunCouncilUseCase<MockClient>) {
        let client = Arc::new(client);
        let params = CouncilParams::default()
            .with_peer_timeout(Duration::from_millis(50))
            .with_synthesis_timeout(Duration::from_millis(50));
        let use_case = RunCouncilUseCase::new(Arc::clone(&client), Arc::new(MockTemplates), params);
        (client, use_case)
    }

    fn peer(transcript: &Transcript, index: usize) -> &AgentCallResult {
        transcript.peer_results().nth(index).unwrap()
    }

    #[tokio::test]
    async fn test_normal_mode_two_timeouts_one_success() {
        let (client, use_case) = use_case(
            MockClient::new()
                .script("model-a", Script::Hang)
                .script("model-b", Script::Hang)
                .script("model-c", Script::Reply("Talk to them first.")),
        );

        let transcript = use_case
            .execute(RunCouncilInput::new("Should I move teams?", roster()))
            .await
            .unwrap();

        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.provider(), parley_domain::Provider::Live);
        assert!(!transcript.peers_unavailable());
        assert_eq!(transcript.live_peer_count(), 1);
        for index in 0..2 {
            let result = peer(&transcript, index);
            assert!(!result.live);
            assert_eq!(result.unavailable_reason, Some(UnavailableReason::Timeout));
            assert_eq!(result.content, "This perspective is not available right now.");
        }
        let live = peer(&transcript, 2);
        assert!(live.live);
        assert_eq!(live.model_id, Some(ModelId::new("model-c")));
        assert!(transcript.synthesis().is_none());
        // no synthesis call in normal mode
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn test_results_in_roster_order() {
        let (_, use_case) = use_case(
            MockClient::new()
                .script("model-a", Script::Delay(30, "Slow but sure."))
                .script("model-b", Script::Delay(10, "Middle."))
                .script("model-c", Script::Reply("Fast.")),
        );

        let transcript = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap();

        let names: Vec<&str> = transcript.peer_results().map(|p| p.agent_name.as_str()).collect();
        assert_eq!(names, vec!["advisor-a", "advisor-b", "advisor-c"]);
        assert_eq!(peer(&transcript, 0).content, "Slow but sure.");
        assert_eq!(transcript.entries()[0].agent_name(), "lead");
    }

    #[tokio::test]
    async fn test_peers_run_concurrently() {
        let client = Arc::new(
            MockClient::new()
                .script("model-a", Script::Delay(200, "First view."))
                .script("model-b", Script::Delay(200, "Second view."))
                .script("model-c", Script::Delay(200, "Third view.")),
        );
        let params = CouncilParams::default().with_peer_timeout(Duration::from_secs(2));
        let use_case = RunCouncilUseCase::new(Arc::clone(&client), Arc::new(MockTemplates), params);

        let started = Instant::now();
        let transcript = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert_eq!(transcript.live_peer_count(), 3);
        // sequential calls would take at least 600ms
        assert!(elapsed < Duration::from_millis(450), "took {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_peer_lenses_follow_slots() {
        let (client, use_case) = use_case(MockClient::new());
        let transcript = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap();

        let lenses: Vec<Option<Lens>> = transcript.peer_results().map(|p| p.lens).collect();
        assert_eq!(
            lenses,
            vec![Some(Lens::Risk), Some(Lens::Relationship), Some(Lens::Strategy)]
        );

        let seen = client.seen();
        let risk = seen.iter().find(|r| r.model.as_str() == "model-a").unwrap();
        assert!(risk.system_prompt.contains(Lens::Risk.name()));
        assert_eq!(risk.timeout, Duration::from_millis(50));
        assert_eq!(risk.max_tokens, 600);
    }

    #[tokio::test]
    async fn test_failures_classified_per_peer() {
        let (_, use_case) = use_case(
            MockClient::new()
                .script("model-a", Script::Fail(GenerationError::RateLimited("429".into())))
                .script("model-b", Script::Fail(GenerationError::NotFound("gone".into())))
                .script("model-c", Script::Fail(GenerationError::Other("reset".into()))),
        );

        let transcript = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap();

        let reasons: Vec<_> = transcript
            .peer_results()
            .map(|p| p.unavailable_reason)
            .collect();
        assert_eq!(
            reasons,
            vec![
                Some(UnavailableReason::RateLimited),
                Some(UnavailableReason::NotFound),
                Some(UnavailableReason::Exception),
            ]
        );
    }

    #[tokio::test]
    async fn test_all_peers_failing_stays_live() {
        let http = GenerationError::Http {
            status: 500,
            message: "boom".into(),
        };
        let (_, use_case) = use_case(
            MockClient::new()
                .script("model-a", Script::Fail(http.clone()))
                .script("model-b", Script::Fail(http.clone()))
                .script("model-c", Script::Fail(http)),
        );

        let transcript = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap();

        assert_eq!(transcript.len(), 4);
        assert!(transcript.peers_unavailable());
        assert_eq!(transcript.provider(), parley_domain::Provider::Live);
        assert!(transcript.fallback_reason().is_none());
        assert!(
            transcript
                .peer_results()
                .all(|p| p.unavailable_reason == Some(UnavailableReason::HttpError))
        );
    }

    #[tokio::test]
    async fn test_work_mode_adds_synthesis() {
        let (client, use_case) = use_case(MockClient::new().script(
            PRIMARY_MODEL,
            Script::Reply("Interpretation: You want a calmer week.\nRecommendation: Block two mornings."),
        ));

        let transcript = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()).with_sub_mode(SubMode::Work))
            .await
            .unwrap();

        assert_eq!(transcript.len(), 5);
        let synthesis = transcript.synthesis().unwrap();
        assert!(synthesis.live);
        assert_eq!(synthesis.lens, Lens::Execution);
        let structured = synthesis.output.as_ref().unwrap().structured().unwrap();
        assert_eq!(structured.recommendation.as_deref(), Some("Block two mornings."));
        assert!(synthesis.brief.is_none());
        assert_eq!(client.calls(), 4);

        let synthesis_call = client
            .seen()
            .into_iter()
            .find(|r| r.model.as_str() == PRIMARY_MODEL)
            .unwrap();
        assert!(synthesis_call.user_message.contains("advisor-a"));
        assert_eq!(synthesis_call.max_tokens, 1200);
    }

    #[tokio::test]
    async fn test_stress_test_brief_from_synthesis() {
        let (_, use_case) = use_case(MockClient::new().script(
            PRIMARY_MODEL,
            Script::Reply(
                "Decision: Accept the offer\nRisks:\n- Longer commute\nRecommendation: Negotiate one remote day.\nSafer: Ask for a month to decide.\nBolder: Accept today.",
            ),
        ));

        let input = RunCouncilInput::new("Should I accept the offer?", roster())
            .with_sub_mode(SubMode::Work)
            .with_stress_test(true);
        let transcript = use_case.execute(input).await.unwrap();

        let brief = transcript.brief().unwrap();
        assert_eq!(brief.decision_being_tested, "Accept the offer");
        assert_eq!(brief.top_risks, vec!["Longer commute"]);
        assert_eq!(brief.best_move, "Negotiate one remote day.");
        assert_eq!(brief.alternatives.safer, "Ask for a month to decide.");
        assert_eq!(brief.alternatives.bolder, "Accept today.");
    }

    #[tokio::test]
    async fn test_synthesis_failure_keeps_entry_and_brief() {
        let (_, use_case) = use_case(
            MockClient::new()
                .script("model-a", Script::Reply("He may push back hard. Keep notes."))
                .script(PRIMARY_MODEL, Script::Hang),
        );

        let input = RunCouncilInput::new("Should I fire him?", roster())
            .with_sub_mode(SubMode::Work)
            .with_stress_test(true);
        let transcript = use_case.execute(input).await.unwrap();

        assert_eq!(transcript.len(), 5);
        let synthesis = transcript.synthesis().unwrap();
        assert!(!synthesis.live);
        assert_eq!(synthesis.unavailable_reason, Some(UnavailableReason::Timeout));
        assert_eq!(synthesis.content, "A combined view is not available right now.");
        let brief = synthesis.brief.as_ref().unwrap();
        assert_eq!(brief.top_risks[0], "He may push back hard.");
    }

    #[tokio::test]
    async fn test_forbidden_phrases_removed_from_replies() {
        let (_, use_case) = use_case(
            MockClient::new()
                .script(
                    "model-a",
                    Script::Reply("As an AI, I can only guess. Keep records of everything."),
                )
                .script("model-b", Script::Reply("Claude.")),
        );

        let transcript = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap();

        assert_eq!(peer(&transcript, 0).content, "Keep records of everything.");
        let emptied = peer(&transcript, 1);
        assert!(!emptied.live);
        assert_eq!(emptied.unavailable_reason, Some(UnavailableReason::Exception));
    }

    #[tokio::test]
    async fn test_offline_when_primary_unreachable() {
        let (client, use_case) = use_case(MockClient::new().unreachable("missing_api_key"));

        let first = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap();
        let second = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(client.calls(), 0);
        assert_eq!(first.provider(), parley_domain::Provider::Template);
        assert_eq!(first.fallback_reason(), Some("missing_api_key"));
        assert_eq!(first.len(), 4);
        assert_eq!(first.frame(), Some("Offline frame.\n\nOffline answer."));
    }

    #[tokio::test]
    async fn test_offline_work_mode_stress_test() {
        let (_, use_case) = use_case(MockClient::new().unreachable("missing_api_key"));

        let input = RunCouncilInput::new("Should I sell the house?", roster())
            .with_sub_mode(SubMode::Work)
            .with_stress_test(true);
        let transcript = use_case.execute(input).await.unwrap();

        assert_eq!(transcript.len(), 5);
        let synthesis = transcript.synthesis().unwrap();
        assert_eq!(synthesis.content, "Offline stress test.");
        assert!(synthesis.brief.is_some());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let (client, use_case) = use_case(MockClient::new());
        let token = CancellationToken::new();
        token.cancel();
        let use_case = use_case.with_cancellation(token);

        let err = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_mid_flight_aborts_peers() {
        let client = Arc::new(
            MockClient::new()
                .script("model-a", Script::Hang)
                .script("model-b", Script::Hang)
                .script("model-c", Script::Hang),
        );
        let params = CouncilParams::default().with_peer_timeout(Duration::from_secs(20));
        let token = CancellationToken::new();
        let use_case = RunCouncilUseCase::new(client, Arc::new(MockTemplates), params)
            .with_cancellation(token.clone());

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let err = use_case
            .execute(RunCouncilInput::new("Plan my week", roster()))
            .await
            .unwrap_err();
        assert!(matches!(err, RunCouncilError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_logs_peer_and_synthesis_events() {
        let (_, use_case) = use_case(MockClient::new());
        let logger = Arc::new(RecordingLogger::default());
        let use_case = use_case.with_conversation_logger(logger.clone());

        use_case
            .execute(RunCouncilInput::new("Plan my week", roster()).with_sub_mode(SubMode::Work))
            .await
            .unwrap();

        let types = logger.event_types();
        assert_eq!(types.iter().filter(|t| **t == event_types::PEER_RESULT).count(), 3);
        assert_eq!(types.last(), Some(&event_types::SYNTHESIS_RESULT));
    }

    #[test]
    fn test_domain_errors_map_to_council_errors() {
        assert!(matches!(
            RunCouncilError::from(DomainError::NoPeers),
            RunCouncilError::NoPeers
        ));
        assert!(RunCouncilError::from(DomainError::Cancelled).is_cancelled());
        assert!(matches!(
            RunCouncilError::from(DomainError::InvalidUtterance("empty".into())),
            RunCouncilError::Contract(_)
        ));
    }
}
