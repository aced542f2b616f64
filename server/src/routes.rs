//! Route handlers.

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use profile_readme::{RateLimitInfo, ReadmeGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<ReadmeGenerator>,
}

impl AppState {
    /// Wraps a generator for sharing across requests.
    pub fn new(generator: ReadmeGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

/// Body of `POST /api/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Profile URL or username.
    #[serde(default)]
    pub profile_url: Option<String>,
}

/// Successful response of `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Sanitized README markdown.
    pub readme: String,
}

/// Response of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` once the GitHub rate limit is used up.
    pub status: &'static str,

    /// Crate version.
    pub version: &'static str,

    /// Core GitHub rate limit, or `null` if it could not be read.
    pub github_rate_limit: Option<RateLimitInfo>,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/generate", post(generate))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected generate request body");
        ApiError::from(rejection)
    })?;
    let profile_url = request.profile_url.unwrap_or_default();

    match state.generator.generate(&profile_url).await {
        Ok(readme) => {
            info!(profile_url = %profile_url.trim(), "README generated");
            Ok(Json(GenerateResponse { readme }))
        }
        Err(e) => {
            let api_error = ApiError::from(e);
            if api_error.status().is_server_error() {
                error!(error = %api_error.message(), "Failed to generate README");
            } else {
                warn!(error = %api_error.message(), "Rejected generate request");
            }
            Err(api_error)
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let github_rate_limit = match state.generator.github().rate_limit().await {
        Ok(info) => Some(info),
        Err(e) => {
            warn!(error = %e, "Failed to read GitHub rate limit");
            None
        }
    };

    let status = match &github_rate_limit {
        Some(info) if info.is_exhausted() => "degraded",
        _ => "ok",
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        github_rate_limit,
    })
}
