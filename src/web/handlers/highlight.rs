// POST /api/highlight — render flagged words as HTML for the editor.
//
// The client swaps the editor's innerHTML for the returned markup. All text
// is escaped server-side, so the page never injects raw model output.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::highlight::{apply_highlights, HtmlMarker};
use crate::web::api_error;

#[derive(Debug, Deserialize)]
pub struct HighlightRequest {
    pub text: String,
    #[serde(default)]
    pub words: Vec<String>,
}

pub async fn highlight(body: Result<Json<HighlightRequest>, JsonRejection>) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return api_error(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };

    let html = apply_highlights(&request.text, &request.words, &HtmlMarker);
    Json(serde_json::json!({ "html": html })).into_response()
}
