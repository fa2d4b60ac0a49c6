//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/readyz`  : readiness (503 when draining, or before the first snapshot if configured)
//! - `/status`  : admission cache status (JSON)
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::app_state::AppState;
use crate::cache::CacheState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        return (StatusCode::SERVICE_UNAVAILABLE, "draining");
    }
    if state.cfg().server.ready_requires_snapshot
        && state.cache().status().state == CacheState::Empty
    {
        return (StatusCode::SERVICE_UNAVAILABLE, "empty");
    }
    (StatusCode::OK, "ready")
}

pub async fn status(State(state): State<AppState>) -> Response {
    Json(state.cache().status()).into_response()
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let extra = state.metrics_extra();
    let body = state.metrics().render(&extra);

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
