//! Axum router wiring.
//!
//! `POST /` answers admission decisions; everything else is operational.
//! The decision route caps request bodies at `server.max_body_bytes` before
//! buffering.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.cfg().server.max_body_bytes;

    Router::new()
        .route(
            "/",
            post(transport::admit::admit).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/status", get(ops::status))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
