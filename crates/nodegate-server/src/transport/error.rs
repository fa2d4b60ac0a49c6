//! HTTP mapping for request-level errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use nodegate_core::error::{ClientCode, NodeGateError};

/// `NodeGateError` rendered as a JSON error response.
#[derive(Debug)]
pub struct ApiError(pub NodeGateError);

impl From<NodeGateError> for ApiError {
    fn from(e: NodeGateError) -> Self {
        Self(e)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest | ClientCode::InvalidKey | ClientCode::UnsupportedVersion => {
            StatusCode::BAD_REQUEST
        }
        ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ClientCode::FetchFailed | ClientCode::DecodeFailed => StatusCode::BAD_GATEWAY,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status_for(code), body).into_response()
    }
}
