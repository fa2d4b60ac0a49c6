use std::path::PathBuf;

use async_trait::async_trait;

use nodegate_core::error::{Result, NodeGateError};
use nodegate_core::{NodeIdentity, Snapshot};

use super::Fetcher;

/// Reads a JSON array of `nodekey:` strings from disk.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self) -> Result<Snapshot> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            NodeGateError::Fetch(format!("read {} failed: {e}", self.path.display()))
        })?;

        let nodes: Vec<NodeIdentity> = serde_json::from_slice(&raw).map_err(|e| {
            NodeGateError::Decode(format!("{}: {e}", self.path.display()))
        })?;

        Ok(Snapshot::from(nodes))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
