//! Scripted adapters shared by the use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::evidence_provider::{EvidenceError, EvidenceProvider};
use crate::ports::offline_templates::{OfflineTemplateStore, TemplateScenario};
use crate::ports::text_generation::{
    Availability, GenerationError, GenerationRequest, TextGenerationClient,
};
use async_trait::async_trait;
use parley_domain::{AgentIdentity, CouncilRoster, EvidenceBundle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const PRIMARY_MODEL: &str = "primary-model";

#[derive(Clone)]
pub enum Script {
    Reply(&'static str),
    Delay(u64, &'static str),
    Fail(GenerationError),
    Hang,
}

/// Text generation client answering per model id.
pub struct MockClient {
    scripts: HashMap<String, Script>,
    availability: Availability,
    calls: AtomicUsize,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            availability: Availability::Available,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn script(mut self, model: &str, script: Script) -> Self {
        self.scripts.insert(model.to_string(), script);
        self
    }

    pub fn unreachable(mut self, reason: &str) -> Self {
        self.availability = Availability::Unreachable(reason.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationClient for MockClient {
    async fn call(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        let script = self
            .scripts
            .get(request.model.as_str())
            .cloned()
            .unwrap_or(Script::Reply("Keep it simple and start small."));
        match script {
            Script::Reply(text) => Ok(text.to_string()),
            Script::Delay(ms, text) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok(text.to_string())
            }
            Script::Fail(error) => Err(error),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok("Too late.".to_string())
            }
        }
    }

    fn availability(&self) -> Availability {
        self.availability.clone()
    }
}

pub struct MockTemplates;

impl OfflineTemplateStore for MockTemplates {
    fn get(&self, scenario: TemplateScenario) -> &str {
        match scenario {
            TemplateScenario::Frame => "Offline frame.",
            TemplateScenario::PeerUnavailable => "This perspective is not available right now.",
            TemplateScenario::SynthesisUnavailable => "A combined view is not available right now.",
            TemplateScenario::OfflineAnswer => "Offline answer.",
            TemplateScenario::OfflineStressTest => "Offline stress test.",
            TemplateScenario::EvidenceUnavailable => "Sources could not be checked.",
        }
    }
}

/// Evidence provider that records each query.
pub struct RecordingEvidence {
    result: Result<EvidenceBundle, EvidenceError>,
    hang: bool,
    queries: Mutex<Vec<String>>,
}

impl RecordingEvidence {
    pub fn returning(result: Result<EvidenceBundle, EvidenceError>) -> Self {
        Self {
            result,
            hang: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Records the query, then never resolves.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::returning(Err(EvidenceError::Timeout))
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvidenceProvider for RecordingEvidence {
    async fn fetch(&self, query: &str) -> Result<EvidenceBundle, EvidenceError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.result.clone()
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.event_type).collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// `lead` on the primary model plus advisor-a/b/c on model-a/b/c.
pub fn roster() -> CouncilRoster {
    CouncilRoster::new(
        AgentIdentity::primary("lead", PRIMARY_MODEL),
        vec![
            AgentIdentity::peer("advisor-a", "model-a"),
            AgentIdentity::peer("advisor-b", "model-b"),
            AgentIdentity::peer("advisor-c", "model-c"),
        ],
    )
    .unwrap()
}
