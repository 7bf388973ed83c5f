//! Anthropic Messages API adapter for [`TextGenerationClient`].
//!
//! One non-streaming request per call. Failures are classified into the
//! port's [`GenerationError`] variants; nothing is retried here.

use crate::config::FileProviderConfig;
use async_trait::async_trait;
use parley_application::{
    Availability, GenerationError, GenerationRequest, TextGenerationClient,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MISSING_API_KEY: &str = "missing_api_key";
const MAX_ERROR_BODY: usize = 300;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// HTTP client for the Messages API
pub struct AnthropicTextClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_version: String,
}

impl AnthropicTextClient {
    /// Build from config; the key is read from `api_key_env`.
    pub fn from_config(config: &FileProviderConfig) -> Self {
        Self::new(&config.base_url, config.api_key(), &config.api_version)
    }

    pub fn new(base_url: &str, api_key: Option<String>, api_version: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_version: api_version.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl TextGenerationClient for AnthropicTextClient {
    async fn call(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationError::Other(MISSING_API_KEY.to_string()));
        };

        let body = MessagesRequest {
            model: request.model.as_str(),
            max_tokens: request.max_tokens,
            system: &request.system_prompt,
            messages: [Message {
                role: "user",
                content: &request.user_message,
            }],
        };

        debug!("POST {} (model {})", self.endpoint(), request.model);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| classify_transport(&e))?;
        if !(200..300).contains(&status) {
            return Err(classify_status(status, &text));
        }

        extract_text(&text)
    }

    fn availability(&self) -> Availability {
        match self.api_key {
            Some(_) => Availability::Available,
            None => Availability::Unreachable(MISSING_API_KEY.to_string()),
        }
    }
}

/// Map a non-2xx status onto the port's error kinds.
fn classify_status(status: u16, body: &str) -> GenerationError {
    let message: String = body.chars().take(MAX_ERROR_BODY).collect();
    match status {
        429 => GenerationError::RateLimited(message),
        404 => GenerationError::NotFound(message),
        _ => GenerationError::Http { status, message },
    }
}

fn classify_transport(error: &reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Other(error.to_string())
    }
}

/// Concatenate the text blocks of a successful response.
fn extract_text(body: &str) -> Result<String, GenerationError> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Other(format!("invalid response: {}", e)))?;

    let text = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return Err(GenerationError::Other("empty response".to_string()));
    }
    Ok(text)
}
