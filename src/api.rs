//! HTTP interface to the batch analyzer.
//!
//! ```text
//! GET /?urls=https://a.example/1,https://b.example/2
//! GET /health
//! ```
//!
//! The analysis response is a JSON array with one `{url, status, rate,
//! words_count}` record per requested URL, in request order. Requests over the
//! configured URL limit, or without `urls`, get a 400 with an `error` message.
//!
//! Each request owns a cancellation token. It fires when the client goes
//! away (the handler future is dropped) or when the optional request deadline
//! passes; unfinished articles then end with `TIMEOUT_ERROR`.

use crate::error::AppError;
use crate::models::OutcomeRecord;
use crate::pipeline::Analyzer;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub max_urls: usize,
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub urls: Option<String>,
}

/// Request-level validation failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("urls query parameter is required")]
    MissingUrls,

    #[error("too many urls in request, should be {limit} or less")]
    TooManyUrls { limit: usize },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Split the comma-separated `urls` parameter, trimming entries and
/// dropping empty ones.
pub fn parse_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

#[instrument(level = "info", skip_all)]
async fn analyze_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<Vec<OutcomeRecord>>, ApiError> {
    let urls = params
        .urls
        .as_deref()
        .map(parse_urls)
        .filter(|urls| !urls.is_empty())
        .ok_or(ApiError::MissingUrls)?;
    if urls.len() > state.max_urls {
        warn!(requested = urls.len(), limit = state.max_urls, "Rejected oversized request");
        return Err(ApiError::TooManyUrls {
            limit: state.max_urls,
        });
    }
    info!(urls = urls.len(), "Analyze request");

    let cancel = CancellationToken::new();
    let _cancel_on_disconnect = cancel.clone().drop_guard();
    if let Some(limit) = state.request_timeout {
        let deadline = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = deadline.cancelled() => {}
                _ = tokio::time::sleep(limit) => {
                    warn!(?limit, "Request deadline passed; cancelling unfinished articles");
                    deadline.cancel();
                }
            }
        });
    }

    let outcomes = state.analyzer.analyze(urls, &cancel).await;
    Ok(Json(outcomes.iter().map(OutcomeRecord::public).collect()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(analyze_handler))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
#[instrument(level = "info", skip(state))]
pub async fn serve(state: AppState, addr: &str) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
