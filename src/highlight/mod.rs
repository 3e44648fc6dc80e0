// Flagged-word highlighting — pure text rewriting, no UI dependencies.
//
// Every flagged word is escaped to a literal pattern and the whole list is
// compiled into one alternation, longest word first. A single left-to-right
// pass then wraps each match in a marker. Resolution for overlapping words:
// the leftmost match wins, and at the same start the longest word wins.
// Matches never nest, so surrounding text is copied through untouched.

pub mod editor;

use regex_lite::Regex;
use tracing::warn;

pub use editor::{CorrectionCache, Editor};

/// How matched and unmatched text is written to the output.
pub trait Marker {
    /// Write text that is not a flagged word.
    fn plain(&self, text: &str, out: &mut String);
    /// Write one occurrence of a flagged word.
    fn mark(&self, word: &str, out: &mut String);
}

/// Wraps flagged words in `<span class="highlight">`. All text is
/// HTML-escaped, so neither the user's text nor the model's word list can
/// inject markup into the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMarker;

impl Marker for HtmlMarker {
    fn plain(&self, text: &str, out: &mut String) {
        escape_html_into(text, out);
    }

    fn mark(&self, word: &str, out: &mut String) {
        out.push_str(r#"<span class="highlight">"#);
        escape_html_into(word, out);
        out.push_str("</span>");
    }
}

/// Wraps flagged words in fixed delimiters, e.g. `[[teh]]`.
#[derive(Debug, Clone, Copy)]
pub struct DelimiterMarker {
    pub open: &'static str,
    pub close: &'static str,
}

impl Default for DelimiterMarker {
    fn default() -> Self {
        Self {
            open: "[[",
            close: "]]",
        }
    }
}

impl Marker for DelimiterMarker {
    fn plain(&self, text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn mark(&self, word: &str, out: &mut String) {
        out.push_str(self.open);
        out.push_str(word);
        out.push_str(self.close);
    }
}

/// Escape a flagged word into a pattern that matches only its literal text.
pub fn escape(word: &str) -> String {
    regex_lite::escape(word)
}

/// Build the combined matcher for a word list, or `None` if there is
/// nothing to match. Empty words are dropped and duplicates collapse.
fn build_matcher(words: &[String]) -> Option<Regex> {
    let mut unique: Vec<&str> = Vec::with_capacity(words.len());
    for word in words {
        if !word.is_empty() && !unique.contains(&word.as_str()) {
            unique.push(word);
        }
    }
    if unique.is_empty() {
        return None;
    }

    // Stable sort keeps list order among words of equal length.
    unique.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

    let pattern = unique
        .iter()
        .map(|w| escape(w))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(error = %e, words = unique.len(), "Could not compile highlight pattern");
            None
        }
    }
}

/// Rewrite `text` with every literal occurrence of each flagged word marked.
pub fn apply_highlights(text: &str, words: &[String], marker: &dyn Marker) -> String {
    let mut out = String::with_capacity(text.len() + words.len() * 32);

    let Some(matcher) = build_matcher(words) else {
        marker.plain(text, &mut out);
        return out;
    };

    let mut last = 0;
    for m in matcher.find_iter(text) {
        marker.plain(&text[last..m.start()], &mut out);
        marker.mark(m.as_str(), &mut out);
        last = m.end();
    }
    marker.plain(&text[last..], &mut out);
    out
}

fn escape_html_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
