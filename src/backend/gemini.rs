// Google Gemini generateContent implementation.
//
// One POST per check: a single user turn carrying the prompt, no streaming,
// no system instruction. The API key travels in the x-goog-api-key header
// so it never shows up in URLs or request logs.
//
// API docs: https://ai.google.dev/api/generate-content

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{BackendError, GrammarBackend};

/// Default public endpoint for the Generative Language API.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for grammar checks.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Thin reqwest wrapper around `models/{model}:generateContent`.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for `model` at `base_url`. Every call is bounded by
    /// `timeout` so a hung upstream can't pin a request task forever.
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gramcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GrammarBackend for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, BackendError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("Gemini API request timed out")
                } else {
                    anyhow::Error::new(e).context("Gemini API request failed")
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let envelope = serde_json::from_str::<ErrorEnvelope>(&body).ok();
            if is_quota_error(status, envelope.as_ref()) {
                return Err(BackendError::RateLimited);
            }
            let message = envelope
                .map(|e| e.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(body);
            return Err(anyhow!("Gemini API returned {}: {}", status, message).into());
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        let text = result.text();
        debug!(
            model = %self.model,
            candidates = result.candidates.len(),
            response_chars = text.chars().count(),
            "Gemini completion received"
        );

        if text.is_empty() {
            let reason = result
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!(" (blocked: {r})"))
                .unwrap_or_default();
            return Err(anyhow!("Gemini returned no candidates{reason}").into());
        }
        Ok(text)
    }
}

/// Quota exhaustion shows up as HTTP 429, and on some gateways only as the
/// RESOURCE_EXHAUSTED status inside the error body.
fn is_quota_error(status: StatusCode, envelope: Option<&ErrorEnvelope>) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || envelope.is_some_and(|e| e.error.status.as_deref() == Some("RESOURCE_EXHAUSTED"))
}

// --- Gemini API request/response types ---

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

/// Present when the prompt itself was rejected, e.g. by a safety filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or an empty string when
    /// there is none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect::<String>())
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
}
