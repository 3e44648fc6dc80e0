// Generation backend trait — the seam between the checker and the LLM.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a generation backend.
///
/// Rate limiting is split out so the checker can surface it as a distinct,
/// retryable condition. Everything else is carried as an anyhow chain.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The provider rejected the call because the key's quota is exhausted.
    #[error("upstream quota exceeded")]
    RateLimited,

    /// Transport, auth, timeout or any other provider failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single-shot, non-streaming text completion provider.
#[async_trait]
pub trait GrammarBackend: Send + Sync {
    /// Generate a completion for `prompt`, authenticating with `api_key`.
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, BackendError>;
}
