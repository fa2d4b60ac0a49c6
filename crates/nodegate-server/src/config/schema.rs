use serde::Deserialize;
use nodegate_core::error::{Result, NodeGateError};
use nodegate_core::protocol::DEFAULT_MAX_REQUEST_BYTES;

use crate::cache::DEFAULT_REFRESH_INTERVAL;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeGateConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub allowlist: AllowlistSection,
}

impl NodeGateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(NodeGateError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.allowlist.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Report not-ready until the first snapshot has loaded.
    #[serde(default)]
    pub ready_requires_snapshot: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
            ready_requires_snapshot: false,
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.trim().is_empty() {
            return Err(NodeGateError::BadRequest("server.listen must not be empty".into()));
        }
        if !(1..=1_048_576).contains(&self.max_body_bytes) {
            return Err(NodeGateError::BadRequest(
                "server.max_body_bytes must be between 1 and 1048576".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllowlistSection {
    /// JSON file holding the admitted node keys.
    pub path: String,

    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    #[serde(default = "default_warm_on_start")]
    pub warm_on_start: bool,
}

impl AllowlistSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(NodeGateError::BadRequest("allowlist.path must not be empty".into()));
        }
        if !(1000..=86_400_000).contains(&self.refresh_interval_ms) {
            return Err(NodeGateError::BadRequest(
                "allowlist.refresh_interval_ms must be between 1000 and 86400000".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "127.0.0.1:3000".into()
}
fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BYTES
}
fn default_refresh_interval_ms() -> u64 {
    DEFAULT_REFRESH_INTERVAL.as_millis() as u64
}
fn default_warm_on_start() -> bool {
    true
}
