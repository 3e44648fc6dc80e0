// POST /check (and /api/check) — run one grammar check.
//
// Returns 200 {wrong, corrected, keyIndex} on success.
// Returns 400 when text is missing or empty, 429 when the key's quota is
// exhausted, and 500 for a malformed model reply or any upstream failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::output::truncate_chars;
use crate::proxy::Language;
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// "ku" (or "primary") for Sorani; anything else is English.
    #[serde(default)]
    pub language: Option<String>,
}

pub async fn check(
    State(state): State<AppState>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let language = Language::from_tag(request.language.as_deref());
    let text = request.text.unwrap_or_default();

    debug!(
        language = language.tag(),
        text_preview = %truncate_chars(&text, 50),
        "Check requested"
    );

    match state.checker.check(&text, language).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => e.into_response(),
    }
}
