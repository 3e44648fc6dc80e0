// Web server — Axum-based grammar checker backend.
//
// The server embeds the single-page client at compile time via include_dir!.
// POST /check and /api/* routes serve JSON; all other paths serve the
// client's index.html.
//
// No auth and no sessions: the only state is the checker, whose key pool
// rotation cursor is shared by every request task.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use include_dir::{include_dir, Dir};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::proxy::{CheckError, GrammarChecker};

pub mod handlers;

// Embed the client at compile time.
static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/web/static");

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<GrammarChecker>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(checker: GrammarChecker, port: u16, bind: &str) -> Result<()> {
    let slots = checker.slot_count();
    let state = AppState {
        checker: Arc::new(checker),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!(slots, "gramcheck listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/check", post(handlers::check::check))
        .route("/api/check", post(handlers::check::check))
        .route("/api/highlight", post(handlers::highlight::highlight))
        .route("/health", get(health));

    Router::new()
        .merge(api)
        .fallback(serve_spa)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always 200 once the server is up, with the slot count.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "ok",
            "slots": state.checker.slot_count(),
        })),
    )
}

/// Serve the embedded client for all non-API paths.
/// Falls back to index.html for any path not found in the asset dir.
async fn serve_spa(uri: Uri) -> impl IntoResponse {
    let path = uri.path().trim_start_matches('/');

    if let Some(file) = ASSETS.get_file(path) {
        return asset_response(file.contents(), path);
    }

    match ASSETS.get_file("index.html") {
        Some(index) => asset_response(index.contents(), "index.html"),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain")],
            Body::from("Web assets not found."),
        )
            .into_response(),
    }
}

fn asset_response(contents: &'static [u8], path: &str) -> Response {
    let mime = mime_type(path);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(mime))
        .body(Body::from(contents))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "css" => "text/css",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        match self {
            CheckError::InvalidInput => api_error(StatusCode::BAD_REQUEST, "No text provided"),
            CheckError::QuotaExceeded { .. } => {
                api_error(StatusCode::TOO_MANY_REQUESTS, "Quota exceeded")
            }
            CheckError::MalformedResponse(_) => {
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Invalid AI response format")
            }
            CheckError::Upstream(message) => {
                api_error(StatusCode::INTERNAL_SERVER_ERROR, &message)
            }
        }
    }
}
