// Shared test fixtures: a scripted GrammarBackend and checker builders.
//
// No network access. Each call to the backend pops the next scripted reply
// and records which key and prompt it was called with.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use gramcheck::backend::traits::{BackendError, GrammarBackend};
use gramcheck::proxy::GrammarChecker;
use gramcheck::rotator::KeyPool;

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    RateLimited,
    Fail(String),
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }
}

/// Backend that replays canned replies. Once the script runs out, the last
/// reply repeats.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Keys used, in call order.
    pub fn keys_used(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, prompt)| prompt.clone())
    }
}

#[async_trait]
impl GrammarBackend for ScriptedBackend {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), prompt.to_string()));

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            match replies.pop_front() {
                Some(reply) => {
                    *last = Some(reply.clone());
                    reply
                }
                None => last
                    .clone()
                    .unwrap_or_else(|| Reply::Fail("no scripted reply".to_string())),
            }
        };

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::RateLimited => Err(BackendError::RateLimited),
            Reply::Fail(message) => Err(BackendError::Other(anyhow!(message))),
        }
    }
}

pub fn keys(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("key-{i}")).collect()
}

pub fn checker(slots: usize, backend: Arc<ScriptedBackend>) -> GrammarChecker {
    GrammarChecker::new(KeyPool::new(keys(slots)).unwrap(), backend)
}
