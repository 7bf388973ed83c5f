//! DuckDuckGo Instant Answer evidence provider.
//!
//! The Instant Answer API needs no key and returns abstracts, direct
//! answers, definitions and related topics rather than full result listings.
//! Each populated field becomes a [`Fact`] tied to the [`Source`] it came
//! from. Caps and empty handling are left to [`EvidenceBundle::new`].

use crate::config::FileEvidenceConfig;
use async_trait::async_trait;
use parley_application::{EvidenceError, EvidenceProvider};
use parley_domain::{EvidenceBundle, Fact, Source};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("parley/", env!("CARGO_PKG_VERSION"));
const TOPIC_TITLE_MAX: usize = 80;

pub struct DuckDuckGoEvidenceProvider {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl DuckDuckGoEvidenceProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config(config: &FileEvidenceConfig) -> Self {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_seconds))
    }
}

#[async_trait]
impl EvidenceProvider for DuckDuckGoEvidenceProvider {
    async fn fetch(&self, query: &str) -> Result<EvidenceBundle, EvidenceError> {
        debug!("Fetching evidence for {:?}", query);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .header("User-Agent", USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        if !response.status().is_success() {
            return Err(EvidenceError::Request(format!(
                "evidence API returned {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(|e| transport_error(&e))?;
        let retrieved_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        parse_instant_answer(&body, &retrieved_at)
    }
}

fn transport_error(error: &reqwest::Error) -> EvidenceError {
    if error.is_timeout() {
        EvidenceError::Timeout
    } else {
        EvidenceError::Request(error.to_string())
    }
}

/// Collects facts while giving each distinct URL one source id.
struct Collector<'a> {
    retrieved_at: &'a str,
    facts: Vec<Fact>,
    sources: Vec<Source>,
}

impl<'a> Collector<'a> {
    fn new(retrieved_at: &'a str) -> Self {
        Self {
            retrieved_at,
            facts: Vec::new(),
            sources: Vec::new(),
        }
    }

    fn add(&mut self, text: &str, title: &str, url: &str) {
        let text = text.trim();
        let url = url.trim();
        if text.is_empty() || url.is_empty() {
            return;
        }
        let id = match self.sources.iter().find(|s| s.url == url) {
            Some(source) => source.id.clone(),
            None => {
                let id = format!("s{}", self.sources.len() + 1);
                let title = if title.trim().is_empty() { url } else { title.trim() };
                self.sources
                    .push(Source::new(id.clone(), title, url, self.retrieved_at));
                id
            }
        };
        self.facts.push(Fact::new(text, id));
    }

    fn finish(self) -> EvidenceBundle {
        EvidenceBundle::new(self.facts, self.sources)
    }
}

/// Turn an Instant Answer response body into a bundle.
fn parse_instant_answer(body: &str, retrieved_at: &str) -> Result<EvidenceBundle, EvidenceError> {
    let data: Value =
        serde_json::from_str(body).map_err(|e| EvidenceError::Parse(e.to_string()))?;
    if !data.is_object() {
        return Err(EvidenceError::Parse("expected a JSON object".to_string()));
    }

    let mut collector = Collector::new(retrieved_at);

    let abstract_title = match (field(&data, "Heading"), field(&data, "AbstractSource")) {
        ("", source) => source.to_string(),
        (heading, "") => heading.to_string(),
        (heading, source) => format!("{} ({})", heading, source),
    };
    collector.add(field(&data, "AbstractText"), &abstract_title, field(&data, "AbstractURL"));

    // Direct answers carry no URL of their own
    let answer_url = if field(&data, "AbstractURL").is_empty() {
        field(&data, "DefinitionURL")
    } else {
        field(&data, "AbstractURL")
    };
    collector.add(field(&data, "Answer"), &abstract_title, answer_url);

    collector.add(
        field(&data, "Definition"),
        field(&data, "DefinitionSource"),
        field(&data, "DefinitionURL"),
    );

    for topic in related_topics(&data["RelatedTopics"]) {
        let text = topic["Text"].as_str().unwrap_or("");
        let title: String = text
            .split(" - ")
            .next()
            .unwrap_or(text)
            .chars()
            .take(TOPIC_TITLE_MAX)
            .collect();
        collector.add(text, &title, topic["FirstURL"].as_str().unwrap_or(""));
    }

    Ok(collector.finish())
}

fn field<'a>(data: &'a Value, key: &str) -> &'a str {
    data[key].as_str().unwrap_or("")
}

/// Topics in order, with grouped topics flattened.
fn related_topics(value: &Value) -> Vec<&Value> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .flat_map(|item| match item["Topics"].as_array() {
            Some(group) => group.iter().collect::<Vec<_>>(),
            None => vec![item],
        })
        .collect()
}
