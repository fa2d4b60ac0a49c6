//! `POST /` admission decision handler.
//!
//! Decode once (size-bounded), ask the admission cache, answer `{"Allow": ..}`.
//! Malformed requests are rejected here and never reach the cache.

use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use nodegate_core::error::NodeGateError;
use nodegate_core::protocol::{decode_admit_request, AdmitResponse};

use crate::app_state::AppState;
use crate::transport::error::ApiError;

pub async fn admit(
    State(app): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AdmitResponse>, ApiError> {
    let req = body
        .map_err(body_error)
        .and_then(|b| decode_admit_request(&b, app.cfg().server.max_body_bytes))
        .map_err(|e| {
            app.metrics()
                .request_errors
                .inc(&[("code", e.client_code().as_str())]);
            tracing::debug!(error = %e, "rejecting admit request");
            ApiError(e)
        })?;

    let allow = app.cache().is_admitted(&req.node_public).await;

    if allow {
        app.metrics().decisions.inc(&[("result", "allow")]);
        tracing::info!(node = %req.node_public, source = ?req.source, "allowed");
    } else {
        app.metrics().decisions.inc(&[("result", "deny")]);
        tracing::debug!(node = %req.node_public, source = ?req.source, "denied");
    }

    Ok(Json(AdmitResponse { allow }))
}

// The body limit layer surfaces as a buffering rejection; keep the JSON error shape.
fn body_error(rejection: BytesRejection) -> NodeGateError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        NodeGateError::PayloadTooLarge
    } else {
        NodeGateError::BadRequest(format!("read body failed: {}", rejection.body_text()))
    }
}
