//! Server config loader (strict parsing).

pub mod schema;

use std::fs;

use nodegate_core::error::{Result, NodeGateError};

pub use schema::{AllowlistSection, NodeGateConfig, ServerSection};

/// Env var consulted when no config path is passed on the command line.
pub const CONFIG_ENV: &str = "NODEGATE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "nodegate.yaml";

/// Resolve the config path: explicit argument, then `NODEGATE_CONFIG`, then default.
pub fn resolve_path(arg: Option<String>) -> String {
    resolve_path_from(arg, std::env::var(CONFIG_ENV).ok())
}

/// `resolve_path` with the environment value passed in. Blank values count as unset.
pub fn resolve_path_from(arg: Option<String>, env: Option<String>) -> String {
    let set = |p: &String| !p.trim().is_empty();
    arg.filter(set)
        .or_else(|| env.filter(set))
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_from_file(path: &str) -> Result<NodeGateConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| NodeGateError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<NodeGateConfig> {
    let cfg: NodeGateConfig = serde_yaml::from_str(s)
        .map_err(|e| NodeGateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
