//! DERP admit-client request/response (JSON).
//!
//! Field names follow the relay's wire contract (`NodePublic`, `Source`,
//! `Allow`). Unknown request fields are ignored so newer relays keep working.

use std::net::IpAddr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, NodeGateError};
use crate::key::NodeIdentity;

/// Default request body limit (8 KiB).
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1 << 13;

/// Admission request sent by the relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdmitRequest {
    /// Key of the node asking to connect.
    #[serde(rename = "NodePublic")]
    pub node_public: NodeIdentity,
    /// Client address as seen by the relay. Logging only.
    #[serde(
        rename = "Source",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<IpAddr>,
}

/// Admission decision returned to the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdmitResponse {
    #[serde(rename = "Allow")]
    pub allow: bool,
}

/// Decode an admit request, rejecting bodies over `max_bytes`.
pub fn decode_admit_request(body: &[u8], max_bytes: usize) -> Result<AdmitRequest> {
    if body.len() > max_bytes {
        return Err(NodeGateError::PayloadTooLarge);
    }
    serde_json::from_slice(body)
        .map_err(|e| NodeGateError::BadRequest(format!("invalid admit request: {e}")))
}

// The relay sends "" for an unknown source address.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<IpAddr>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
