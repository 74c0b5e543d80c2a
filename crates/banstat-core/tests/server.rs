//! Router-level tests driving the HTTP API through a stubbed control tool.
//!
//! These live as integration tests (not a `#[cfg(test)]` module in
//! `src/server.rs`) because `banstat-test-utils` links the lib build of
//! `banstat-core`; a unit-test build would be a second copy of the crate and
//! its `ControlTool` trait would not unify with the stub's impl.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use banstat_core::model::{DaemonStatus, DaemonVersion, JailStatus};
use banstat_core::server::{ApiState, ErrorResponse, HealthResponse, router};
use banstat_test_utils::fixtures;
use banstat_test_utils::stub::{StubControlTool, StubOutcome};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn app(tool: StubControlTool) -> axum::Router {
    router(Arc::new(ApiState {
        tool: Arc::new(tool),
    }))
}

async fn get_json<T: serde::de::DeserializeOwned>(
    app: axum::Router,
    path: &str,
    expected: StatusCode,
) -> T {
    let req = Request::get(path).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), expected);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[test_log::test(tokio::test)]
async fn health_endpoint() {
    let health: HealthResponse =
        get_json(app(StubControlTool::healthy()), "/health", StatusCode::OK).await;
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[test_log::test(tokio::test)]
async fn status_endpoint_returns_parsed_record() {
    let status: DaemonStatus =
        get_json(app(StubControlTool::healthy()), "/status", StatusCode::OK).await;
    assert_eq!(status.jail_count, 3);
    assert_eq!(status.jail_names, vec!["sshd", "apache", "nginx"]);
}

#[test_log::test(tokio::test)]
async fn jail_status_endpoint_returns_parsed_record() {
    let status: JailStatus = get_json(
        app(StubControlTool::healthy()),
        "/status/sshd",
        StatusCode::OK,
    )
    .await;
    assert_eq!(status.jail_name, "sshd");
    assert_eq!(status.filter.total_failed, 10);
    assert_eq!(status.actions.banned_ips.len(), 2);
}

#[test_log::test(tokio::test)]
async fn jail_status_rejects_unsafe_name_before_invocation() {
    let tool = StubControlTool::healthy();
    let calls = tool.calls();
    let err: ErrorResponse = get_json(
        app(tool),
        "/status/sshd;reboot",
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert_eq!(err.error, "invalid jail name");
    // The invoker must never have run.
    assert!(calls.lock().unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn version_endpoint_trims_output() {
    let tool = StubControlTool::healthy().with_version("  1.1.0\n");
    let version: DaemonVersion = get_json(app(tool), "/version", StatusCode::OK).await;
    assert_eq!(version.version, "1.1.0");
}

#[test_log::test(tokio::test)]
async fn tool_failure_is_a_generic_500() {
    let tool = StubControlTool::failing(1, "ERROR: /var/run/fail2ban/fail2ban.sock missing");
    let err: ErrorResponse =
        get_json(app(tool), "/status", StatusCode::INTERNAL_SERVER_ERROR).await;
    // stderr stays in the log, never in the body
    assert_eq!(err.error, "failed to query fail2ban");
}

#[test_log::test(tokio::test)]
async fn tool_unavailable_is_a_generic_500() {
    let err: ErrorResponse = get_json(
        app(StubControlTool::unavailable()),
        "/version",
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    assert_eq!(err.error, "failed to query fail2ban");
}

#[test_log::test(tokio::test)]
async fn timeout_is_a_generic_500() {
    let tool = StubControlTool::healthy().with_outcome(StubOutcome::TimedOut);
    let err: ErrorResponse =
        get_json(app(tool), "/status", StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(err.error, "failed to query fail2ban");
}

#[test_log::test(tokio::test)]
async fn malformed_output_is_a_data_validation_error() {
    let tool = StubControlTool::healthy().with_daemon_status("no labels here");
    let err: ErrorResponse =
        get_json(app(tool), "/status", StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(err.error, "data validation error");
}

#[test_log::test(tokio::test)]
async fn malformed_jail_output_is_a_data_validation_error() {
    let tool = StubControlTool::healthy().with_jail_status("|- Currently failed:\tNaN");
    let err: ErrorResponse =
        get_json(app(tool), "/status/sshd", StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(err.error, "data validation error");
}

#[test_log::test(tokio::test)]
async fn fixtures_round_trip_through_the_stack() {
    let status: DaemonStatus = get_json(
        app(StubControlTool::healthy().with_daemon_status(fixtures::DAEMON_STATUS)),
        "/status",
        StatusCode::OK,
    )
    .await;
    assert_eq!(status.jail_count as usize, status.jail_names.len());
}
