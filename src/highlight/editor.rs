// Editor model — the editable surface plus its one-slot correction cache.
//
// Mirrors what the browser client keeps in memory: the source text the
// user typed (sent on the next check), the rendered content currently on
// screen, and the most recent successful correction waiting to be applied.

use super::{apply_highlights, Marker};
use crate::proxy::CheckResult;

/// Holds at most one corrected text, replaced by every successful check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionCache {
    corrected: Option<String>,
}

impl CorrectionCache {
    pub fn store(&mut self, corrected: String) {
        self.corrected = Some(corrected);
    }

    pub fn get(&self) -> Option<&str> {
        self.corrected.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.corrected.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    source: String,
    rendered: String,
    cache: CorrectionCache,
}

impl Editor {
    pub fn new(text: impl Into<String>) -> Self {
        let source = text.into();
        Self {
            rendered: source.clone(),
            source,
            cache: CorrectionCache::default(),
        }
    }

    /// Text sent with the next check.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// What the surface currently shows.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn cache(&self) -> &CorrectionCache {
        &self.cache
    }

    /// Replace the user's text, as when they type.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.source = text.into();
        self.rendered = self.source.clone();
    }

    /// Render the source with `words` marked. Only the rendered content
    /// changes; the source used for later checks is left alone.
    pub fn show_highlights(&mut self, words: &[String], marker: &dyn Marker) {
        self.rendered = apply_highlights(&self.source, words, marker);
    }

    /// Take in a successful check: highlight its flagged words and cache
    /// its corrected text, replacing any earlier correction.
    pub fn record(&mut self, result: &CheckResult, marker: &dyn Marker) {
        self.show_highlights(&result.wrong_words, marker);
        self.cache.store(result.corrected_text.clone());
    }

    /// Replace the visible content with the cached correction.
    ///
    /// Returns `false` and changes nothing when no check has succeeded yet.
    pub fn apply_correction(&mut self) -> bool {
        let Some(corrected) = self.cache.get() else {
            return false;
        };
        self.source = corrected.to_string();
        self.rendered = self.source.clone();
        true
    }
}
