use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::backend::gemini::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Number of key slots read when GRAMCHECK_KEY_SLOTS is unset.
pub const DEFAULT_KEY_SLOTS: usize = 10;

/// Upstream call bound when GRAMCHECK_UPSTREAM_TIMEOUT_SECS is unset.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// One Gemini API key per slot, in slot order (GEMINI_API_KEY1..N).
    pub api_keys: Vec<String>,
    /// Model identifier passed to generateContent.
    pub model: String,
    /// Generative Language API base URL (override for proxies or tests).
    pub api_url: String,
    /// Upper bound on a single upstream call.
    pub upstream_timeout: Duration,
    /// Retry once with the next key when a key's quota is exhausted.
    pub retry_on_quota: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_keys", &format_args!("<{} redacted>", self.api_keys.len()))
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("retry_on_quota", &self.retry_on_quota)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Every slot from 1 to GRAMCHECK_KEY_SLOTS must hold a non-empty key.
    /// A missing slot fails here instead of rotating through an undefined
    /// credential at request time.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = match lookup("GRAMCHECK_KEY_SLOTS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("GRAMCHECK_KEY_SLOTS must be a number, got {raw:?}"))?,
            None => DEFAULT_KEY_SLOTS,
        };
        if slots == 0 {
            anyhow::bail!("GRAMCHECK_KEY_SLOTS must be at least 1.");
        }

        let mut api_keys = Vec::with_capacity(slots);
        let mut missing = Vec::new();
        for slot in 1..=slots {
            let name = format!("GEMINI_API_KEY{slot}");
            match lookup(&name).map(|k| k.trim().to_string()) {
                Some(key) if !key.is_empty() => api_keys.push(key),
                _ => missing.push(name),
            }
        }
        if !missing.is_empty() {
            anyhow::bail!(
                "{} of {slots} API key slots not set: {}\n\
                 Add them to your .env file, or lower GRAMCHECK_KEY_SLOTS.",
                missing.len(),
                missing.join(", ")
            );
        }

        let upstream_timeout = match lookup("GRAMCHECK_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().with_context(|| {
                    format!("GRAMCHECK_UPSTREAM_TIMEOUT_SECS must be a number, got {raw:?}")
                })?;
                if secs == 0 {
                    anyhow::bail!("GRAMCHECK_UPSTREAM_TIMEOUT_SECS must be at least 1.");
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let retry_on_quota = matches!(
            lookup("GRAMCHECK_RETRY_ON_QUOTA")
                .map(|v| v.trim().to_ascii_lowercase())
                .as_deref(),
            Some("1") | Some("true") | Some("yes")
        );

        Ok(Self {
            api_keys,
            model: lookup("GEMINI_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_url: lookup("GEMINI_API_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            upstream_timeout,
            retry_on_quota,
        })
    }
}
