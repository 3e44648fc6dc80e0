// Two-stage extraction of the model's JSON verdict.
//
// Models wrap their JSON in chatter ("Sure! ... Thanks.") or markdown
// fences despite being told not to. Stage one finds the first balanced
// {...} span, tracking nesting depth and skipping braces inside string
// literals. Stage two parses that span with serde_json and nothing else.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in model response")]
    NoObject,

    #[error("model response contains invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// The model's verdict as parsed, before normalisation.
///
/// Both fields are optional: the model may omit either, and `null` is
/// treated the same as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVerdict {
    #[serde(default)]
    pub wrong: Option<Vec<String>>,
    #[serde(default)]
    pub corrected: Option<String>,
}

/// Byte range of the first balanced `{...}` span in `raw`.
///
/// A `{` that never closes is skipped, so `"{ {\"a\": 1}"` yields the inner
/// object. One pass with a stack of open positions; string literals are
/// tracked from the first `{` onwards, quotes in leading prose are ignored.
pub fn find_object_span(raw: &str) -> Option<(usize, usize)> {
    let mut opens: Vec<usize> = Vec::new();
    let mut first: Option<(usize, usize)> = None;
    let mut in_string = false;
    let mut escaped = false;

    // Braces and quotes are ASCII, so byte scanning never splits a
    // multi-byte character boundary we care about.
    for (i, b) in raw.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if !opens.is_empty() => in_string = true,
            b'{' => opens.push(i),
            b'}' => {
                let Some(open) = opens.pop() else { continue };
                if first.map_or(true, |(start, _)| open < start) {
                    first = Some((open, i + 1));
                }
                // Nothing earlier is still open, so no later span can win.
                if opens.is_empty() {
                    return first;
                }
            }
            _ => {}
        }
    }
    first
}

/// Locate and strictly parse the first JSON object in a model response.
pub fn extract_verdict(raw: &str) -> Result<RawVerdict, ExtractError> {
    let (start, end) = find_object_span(raw).ok_or(ExtractError::NoObject)?;
    Ok(serde_json::from_str(&raw[start..end])?)
}
