//! JSON API and static UI, mounted over the analysis engine.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/analyze` | Body: `{"query": "<login, URL, or email>"}` |
//! | `GET`  | `/api/rate-limit` | Mirror of GitHub's reported quota |
//! | `GET`  | `/api/cache/stats` | Valid vs total cached analyses |
//! | `POST` | `/api/cache/clear` | Drops every cached analysis |
//! | `GET`  | `/health` | Liveness probe |

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::analysis::ProfileAnalyzer;
use crate::error::Error;
use crate::models::{CacheStats, ProfileAnalysis, RateLimitSnapshot};

/// Builds the full application router: JSON API under `/api`, the browser
/// UI from `static_dir` at `/`.
pub fn router(analyzer: Arc<ProfileAnalyzer>, static_dir: &Path) -> Router {
    Router::new()
        .nest("/api", api_router(analyzer))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .layer(TraceLayer::new_for_http())
}

pub fn api_router(analyzer: Arc<ProfileAnalyzer>) -> Router<()> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/rate-limit", get(rate_limit))
        .route("/cache/stats", get(cache_stats))
        .route("/cache/clear", post(cache_clear))
        .with_state(analyzer)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    pub query: String,
}

/// `POST /api/analyze` — body: `{"query": "torvalds"}`
async fn analyze(
    State(analyzer): State<Arc<ProfileAnalyzer>>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<ProfileAnalysis>, ApiError> {
    let analysis = analyzer.analyze(&body.query).await?;
    Ok(Json(analysis))
}

/// `GET /api/rate-limit`
async fn rate_limit(State(analyzer): State<Arc<ProfileAnalyzer>>) -> Json<RateLimitSnapshot> {
    Json(analyzer.rate_limit().await)
}

/// `GET /api/cache/stats`
async fn cache_stats(State(analyzer): State<Arc<ProfileAnalyzer>>) -> Json<CacheStats> {
    Json(analyzer.cache().stats().await)
}

/// `POST /api/cache/clear`
async fn cache_clear(State(analyzer): State<Arc<ProfileAnalyzer>>) -> impl IntoResponse {
    let cleared = analyzer.cache().clear().await;
    tracing::info!("Cache cleared: {} entries dropped", cleared);
    Json(json!({ "cleared": cleared }))
}

/// `GET /health`
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Engine errors mapped onto HTTP statuses. The body carries only the error
/// kind's human-readable reason, never internal state.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::UserNotFound(_) => StatusCode::NOT_FOUND,
            Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Error::Upstream(_) | Error::Network(_) => StatusCode::BAD_GATEWAY,
            Error::MalformedResponse(_) | Error::Config(_) | Error::InvalidHeader(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_expected_statuses() {
        let cases = [
            (Error::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (Error::UserNotFound("x".into()), StatusCode::NOT_FOUND),
            (
                Error::RateLimited { reset_at: None },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (Error::Upstream("x".into()), StatusCode::BAD_GATEWAY),
            (
                Error::MalformedResponse("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
