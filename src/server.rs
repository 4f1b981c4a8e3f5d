//! HTTP front end.
//!
//!   POST /solve   `{"image": "<base64>", "type": "image"|"audio"}`
//!                 → `{"success": bool, "text": str, "method": str}`
//!   GET  /health  liveness and strategy listing

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::chain::Solver;
use crate::config::ServerConfig;
use crate::consts::VERSION;
use crate::error::{RequestError, SolveError};
use crate::strategy::{ChallengePayload, PayloadKind, RecognitionOutcome};

/// Shared by all handlers. Nothing in here is mutable.
#[derive(Clone)]
pub struct AppState {
    solver: Arc<Solver>,
    started: Instant,
}

/// Wire shape of a solve request.
#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    #[serde(alias = "audio")]
    pub image: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub image_strategies: Vec<String>,
    pub audio_strategies: Vec<String>,
}

/// Everything a handler can fail with. Unsolved challenges are not here.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(RequestError),
    Internal(SolveError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            ApiError::Internal(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

/// Validate and decode a raw request body. Runs before any strategy.
pub fn decode_request(body: &[u8]) -> Result<ChallengePayload, RequestError> {
    let req: SolveRequest = serde_json::from_slice(body)?;
    let kind: PayloadKind = req.kind.parse()?;

    // Accept `data:<mime>;base64,<data>` as sent by browsers.
    let encoded = match req.image.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => req.image.as_str(),
    };
    let bytes = STANDARD.decode(encoded.trim())?;
    if bytes.is_empty() {
        return Err(RequestError::EmptyPayload);
    }

    Ok(ChallengePayload::new(kind, bytes))
}

async fn solve(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecognitionOutcome>, ApiError> {
    let payload = decode_request(&body).map_err(|e| {
        warn!(error = %e, "rejected solve request");
        ApiError::BadRequest(e)
    })?;

    let outcome = state
        .solver
        .solve(&payload)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(outcome))
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let names = |kind: PayloadKind| -> Vec<String> {
        state
            .solver
            .chain(kind)
            .names()
            .into_iter()
            .map(String::from)
            .collect()
    };
    Json(HealthReport {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        uptime_seconds: state.started.elapsed().as_secs(),
        image_strategies: names(PayloadKind::Image),
        audio_strategies: names(PayloadKind::Audio),
    })
}

/// Build the application router.
pub fn router(solver: Arc<Solver>, config: &ServerConfig) -> Router {
    let state = AppState {
        solver,
        started: Instant::now(),
    };
    Router::new()
        .route("/solve", post(solve))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

/// Bind to the configured address and serve until Ctrl+C.
pub async fn run(config: &ServerConfig, solver: Arc<Solver>) -> Result<()> {
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "challenge solver listening");

    let app = router(solver, config);
    serve(listener, app, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    })
    .await
}
