// GrammarChecker — one check = one key from the pool + one backend call.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::extract::{extract_verdict, ExtractError};
use super::prompt::{build_prompt, Language};
use crate::backend::gemini::GeminiClient;
use crate::backend::traits::{BackendError, GrammarBackend};
use crate::config::Config;
use crate::rotator::KeyPool;

/// Normalised outcome of a successful check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Words the model flagged, in the order it returned them.
    #[serde(rename = "wrong")]
    pub wrong_words: Vec<String>,
    /// Fully corrected text. Falls back to the input when the model
    /// didn't provide one.
    #[serde(rename = "corrected")]
    pub corrected_text: String,
    /// 0-based slot of the key that served this check.
    #[serde(rename = "keyIndex")]
    pub source_slot: usize,
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("No text provided")]
    InvalidInput,

    #[error("Quota exceeded on key slot {slot}")]
    QuotaExceeded { slot: usize },

    #[error("Invalid AI response format")]
    MalformedResponse(#[source] ExtractError),

    #[error("{0}")]
    Upstream(String),
}

/// The correction proxy: owns the key pool and the backend.
pub struct GrammarChecker {
    pool: KeyPool,
    backend: Arc<dyn GrammarBackend>,
    retry_on_quota: bool,
}

impl GrammarChecker {
    pub fn new(pool: KeyPool, backend: Arc<dyn GrammarBackend>) -> Self {
        Self {
            pool,
            backend,
            retry_on_quota: false,
        }
    }

    /// Wire up the Gemini backend and key pool described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let backend = GeminiClient::new(&config.api_url, &config.model, config.upstream_timeout)?;
        let pool = KeyPool::new(config.api_keys.clone())?;
        Ok(Self::new(pool, Arc::new(backend)).with_retry_on_quota(config.retry_on_quota))
    }

    /// On quota exhaustion, retry once with the next slot before giving up.
    /// Has no effect with a single-slot pool.
    pub fn with_retry_on_quota(mut self, enabled: bool) -> Self {
        self.retry_on_quota = enabled;
        self
    }

    pub fn slot_count(&self) -> usize {
        self.pool.len()
    }

    /// Check `text` and return the flagged words plus a corrected version.
    pub async fn check(&self, text: &str, language: Language) -> Result<CheckResult, CheckError> {
        if text.is_empty() {
            return Err(CheckError::InvalidInput);
        }

        let prompt = build_prompt(language, text);

        match self.attempt(&prompt, text).await {
            Err(CheckError::QuotaExceeded { slot })
                if self.retry_on_quota && self.pool.len() > 1 =>
            {
                warn!(
                    slot = slot + 1,
                    "Quota exceeded, retrying once with the next key"
                );
                self.attempt(&prompt, text).await
            }
            other => other,
        }
    }

    async fn attempt(&self, prompt: &str, text: &str) -> Result<CheckResult, CheckError> {
        let slot = self.pool.next_slot();
        info!(
            slot = slot.index + 1,
            slots = self.pool.len(),
            "Using grammar API key #{}",
            slot.index + 1
        );

        let raw = self
            .backend
            .generate(slot.credential, prompt)
            .await
            .map_err(|e| match e {
                BackendError::RateLimited => CheckError::QuotaExceeded { slot: slot.index },
                BackendError::Other(err) => {
                    let message = format!("{err:#}");
                    warn!(slot = slot.index + 1, error = %message, "Grammar backend call failed");
                    CheckError::Upstream(message)
                }
            })?;

        let verdict = extract_verdict(&raw).map_err(|e| {
            warn!(
                slot = slot.index + 1,
                error = %e,
                "Model reply did not contain a usable JSON object"
            );
            CheckError::MalformedResponse(e)
        })?;

        Ok(CheckResult {
            wrong_words: verdict.wrong.unwrap_or_default(),
            corrected_text: verdict
                .corrected
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| text.to_string()),
            source_slot: slot.index,
        })
    }
}
