//! HTTP API — axum router over a TCP listener.
//!
//! Thin plumbing around the parsers: each handler validates input, asks the
//! [`ControlTool`] for raw text, parses it, and serializes the record. Every
//! failure is converted to a fixed small set of JSON error responses at this
//! boundary; raw stderr and raw malformed output go to the log, never to
//! the client.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::client::{ClientError, ControlTool};
use crate::model::{DaemonStatus, DaemonVersion, JailStatus};
use crate::parse::{self, ParseError};
use crate::validate::is_valid_jail_name;

/// Shared state accessible to all route handlers.
pub struct ApiState {
    pub tool: Arc<dyn ControlTool>,
}

/// Service liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Generic error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler-level failure, already logged with full context at the point of
/// construction. Only the fixed message below reaches the wire.
enum ApiError {
    InvalidJailName,
    Invoke,
    Parse,
}

impl ApiError {
    fn invoke(err: ClientError) -> Self {
        match &err {
            ClientError::ExecutionFailed { code, stderr } => {
                error!(code, %stderr, "control tool failed");
            }
            other => error!(error = %other, "control tool invocation failed"),
        }
        Self::Invoke
    }

    fn parse(err: ParseError) -> Self {
        error!(error = %err, raw = err.raw(), "failed to parse control tool output");
        Self::Parse
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidJailName => (StatusCode::BAD_REQUEST, "invalid jail name"),
            Self::Invoke => (StatusCode::INTERNAL_SERVER_ERROR, "failed to query fail2ban"),
            Self::Parse => (StatusCode::INTERNAL_SERVER_ERROR, "data validation error"),
        };
        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the axum router with all API routes.
pub fn router(state: Arc<ApiState>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(handle_health))
        .route("/status", get(handle_status))
        .route("/status/{jail_name}", get(handle_jail_status))
        .route("/version", get(handle_version))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Start the HTTP server on the given address.
///
/// Runs until ctrl-c, then shuts down gracefully.
pub async fn serve(addr: SocketAddr, state: Arc<ApiState>) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("HTTP API shutting down");
        })
        .await
}

/// Log method, path, status, and latency for every request.
async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request handled"
    );
    response
}

// ── Route handlers ──────────────────────────────────────────────────────

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn handle_status(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DaemonStatus>, ApiError> {
    let raw = state.tool.daemon_status().await.map_err(ApiError::invoke)?;
    let status = parse::parse_daemon_status(&raw).map_err(ApiError::parse)?;
    Ok(Json(status))
}

async fn handle_jail_status(
    State(state): State<Arc<ApiState>>,
    Path(jail_name): Path<String>,
) -> Result<Json<JailStatus>, ApiError> {
    // Security boundary: the name reaches the command line only past this check.
    if !is_valid_jail_name(&jail_name) {
        warn!(%jail_name, "rejected invalid jail name");
        return Err(ApiError::InvalidJailName);
    }

    let raw = state
        .tool
        .jail_status(&jail_name)
        .await
        .map_err(ApiError::invoke)?;
    let status = parse::parse_jail_status(&raw, &jail_name).map_err(ApiError::parse)?;
    Ok(Json(status))
}

async fn handle_version(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DaemonVersion>, ApiError> {
    let raw = state.tool.version().await.map_err(ApiError::invoke)?;
    Ok(Json(parse::parse_version(&raw)))
}
