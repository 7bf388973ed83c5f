//! Respond use case: the full decision pipeline for one utterance.
//!
//! Stakes and ambiguity feed the contract engine. Modes that permit
//! generation then pass the trust gate, which may ask for clarification,
//! fetch evidence, or mark the request for a stress test. The council runs
//! last, if requested, and disclosures summarise what the reply used.

use crate::config::CouncilParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, event_types,
};
use crate::ports::evidence_provider::EvidenceProvider;
use crate::ports::offline_templates::{OfflineTemplateStore, TemplateScenario};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::text_generation::TextGenerationClient;
use crate::use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
use crate::use_cases::shared::is_cancelled;
use parley_domain::contract::lint_all;
use parley_domain::{
    AmbiguityDetector, AssumptionCheck, ContractDecision, ContractEngine, CouncilRoster,
    DisclosureBuilder, DomainError, EmptyReason, EvidenceBundle, StakesAssessment,
    StakesClassifier, Transcript, TrustAssessment, TrustGate, Utterance,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum RespondError {
    #[error(transparent)]
    Contract(DomainError),

    #[error(transparent)]
    Council(RunCouncilError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl RespondError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RespondError::Cancelled)
    }
}

impl From<DomainError> for RespondError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Cancelled => RespondError::Cancelled,
            other => RespondError::Contract(other),
        }
    }
}

impl From<RunCouncilError> for RespondError {
    fn from(err: RunCouncilError) -> Self {
        match err {
            RunCouncilError::Cancelled => RespondError::Cancelled,
            other => RespondError::Council(other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RespondInput {
    pub utterance: Utterance,
    /// Run the multi-agent council when the request gets that far.
    pub council: bool,
}

impl RespondInput {
    pub fn new(utterance: Utterance) -> Self {
        Self {
            utterance,
            council: false,
        }
    }

    pub fn with_council(mut self, council: bool) -> Self {
        self.council = council;
        self
    }
}

/// Everything the presentation layer needs for one reply.
///
/// `trust` is absent when the contract stopped before the gate ran;
/// `evidence` and `transcript` are absent when not fetched or not run.
#[derive(Debug, Clone, Serialize)]
pub struct RespondOutput {
    pub decision: ContractDecision,
    pub stakes: StakesAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<TrustAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceBundle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
    pub disclosures: Vec<String>,
}

impl RespondOutput {
    /// Whether the no-assumptions check turned this into a clarify reply.
    pub fn blocked_by_gate(&self) -> bool {
        self.trust.as_ref().is_some_and(TrustAssessment::is_blocked)
    }
}

pub struct RespondUseCase<C, E>
where
    C: TextGenerationClient + 'static,
    E: EvidenceProvider + 'static,
{
    engine: ContractEngine,
    council: RunCouncilUseCase<C>,
    evidence: Arc<E>,
    templates: Arc<dyn OfflineTemplateStore>,
    roster: CouncilRoster,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<C, E> RespondUseCase<C, E>
where
    C: TextGenerationClient + 'static,
    E: EvidenceProvider + 'static,
{
    pub fn new(
        client: Arc<C>,
        evidence: Arc<E>,
        templates: Arc<dyn OfflineTemplateStore>,
        roster: CouncilRoster,
        params: CouncilParams,
    ) -> Self {
        Self {
            engine: ContractEngine::default(),
            council: RunCouncilUseCase::new(client, Arc::clone(&templates), params),
            evidence,
            templates,
            roster,
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_engine(mut self, engine: ContractEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.council = self.council.with_conversation_logger(Arc::clone(&logger));
        self.conversation_logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.council = self.council.with_cancellation(token.clone());
        self.cancellation_token = Some(token);
        self
    }

    pub async fn execute(&self, input: RespondInput) -> Result<RespondOutput, RespondError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RespondInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<RespondOutput, RespondError> {
        if is_cancelled(&self.cancellation_token) {
            return Err(RespondError::Cancelled);
        }
        let utterance = &input.utterance;

        let stakes = StakesClassifier::classify(utterance.text());
        debug!("Stakes: {} [{}]", stakes.level.as_str(), stakes.reasons.join(", "));
        let ambiguity = AmbiguityDetector::signals(utterance.text());

        let decision = self.engine.decide_with(utterance, &stakes, ambiguity)?;
        info!("Contract mode: {}", decision.mode());
        self.log_decision(&decision);

        if !decision.mode().permits_generation() {
            return self.finish(utterance, decision, stakes, None, None, None);
        }

        let trust = TrustGate::assess(utterance);
        info!(
            "Trust gate: blocked={}, needs_evidence={}, consequential={}",
            trust.is_blocked(),
            trust.needs_evidence,
            trust.consequential
        );
        self.conversation_logger.log(ConversationEvent::new(
            event_types::TRUST_GATE,
            json!(trust),
        ));

        if let AssumptionCheck::Blocked(questions) = &trust.assumptions {
            info!("Asking {} clarifying question(s) before answering", questions.len());
            let decision = self.engine.clarify_from_gate(questions.clone())?;
            self.log_decision(&decision);
            return self.finish(utterance, decision, stakes, Some(trust), None, None);
        }

        let evidence = if trust.should_fetch_evidence() {
            Some(self.gather_evidence(utterance.text()).await?)
        } else {
            None
        };

        let transcript = if input.council {
            let has_evidence = evidence.as_ref().is_some_and(EvidenceBundle::ok);
            let sub_mode = self
                .council
                .params()
                .mode
                .resolve(trust.consequential, has_evidence);
            let council_input = RunCouncilInput::new(utterance.text(), self.roster.clone())
                .with_sub_mode(sub_mode)
                .with_stress_test(trust.consequential)
                .with_evidence(evidence.clone());
            Some(self.council.execute_with_progress(council_input, progress).await?)
        } else {
            None
        };

        self.finish(utterance, decision, stakes, Some(trust), evidence, transcript)
    }

    /// Fetch evidence. Provider failures become an unavailable bundle.
    async fn gather_evidence(&self, query: &str) -> Result<EvidenceBundle, RespondError> {
        if !self.council.params().fetch_evidence {
            debug!("Evidence fetching disabled");
            return Ok(EvidenceBundle::unavailable(EmptyReason::Disabled));
        }

        let limit = self.council.params().evidence_timeout;
        let fetch = tokio::time::timeout(limit, self.evidence.fetch(query));
        let result = if let Some(ref token) = self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Err(RespondError::Cancelled),
                result = fetch => result,
            }
        } else {
            fetch.await
        };

        let bundle = match result {
            Ok(Ok(bundle)) => bundle,
            Ok(Err(e)) => {
                warn!("Evidence fetch failed: {}", e);
                self.evidence_unavailable()
            }
            Err(_) => {
                warn!("Evidence fetch timed out after {:?}", limit);
                self.evidence_unavailable()
            }
        };

        info!(
            "Evidence: {} fact(s) from {} source(s)",
            bundle.facts().len(),
            bundle.sources().len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            event_types::EVIDENCE_FETCHED,
            json!({
                "ok": bundle.ok(),
                "facts": bundle.facts().len(),
                "sources": bundle.sources().iter().map(|s| s.url.as_str()).collect::<Vec<_>>(),
                "empty_reason": bundle.empty_reason(),
            }),
        ));
        Ok(bundle)
    }

    fn evidence_unavailable(&self) -> EvidenceBundle {
        EvidenceBundle::unavailable(EmptyReason::ProviderError)
            .with_limits_note(self.templates.get(TemplateScenario::EvidenceUnavailable))
    }

    fn finish(
        &self,
        utterance: &Utterance,
        decision: ContractDecision,
        stakes: StakesAssessment,
        trust: Option<TrustAssessment>,
        evidence: Option<EvidenceBundle>,
        transcript: Option<Transcript>,
    ) -> Result<RespondOutput, RespondError> {
        let disclosures = DisclosureBuilder::new()
            .context(utterance)
            .evidence(evidence.as_ref())
            .decision(&decision)
            .transcript(transcript.as_ref())
            .build();
        lint_all(disclosures.iter().map(String::as_str), "disclosures")?;

        Ok(RespondOutput {
            decision,
            stakes,
            trust,
            evidence,
            transcript,
            disclosures,
        })
    }

    fn log_decision(&self, decision: &ContractDecision) {
        self.conversation_logger.log(ConversationEvent::new(
            event_types::CONTRACT_DECISION,
            json!(decision),
        ));
    }
}
