//! Allow-list sources.
//!
//! A `Fetcher` returns the complete current allow-list or an error, never a
//! partial result. It holds no cached data; caching and refresh policy live
//! in the admission cache.

pub mod file;

use async_trait::async_trait;

use nodegate_core::{Result, Snapshot};

pub use file::FileFetcher;

/// Retrieves a full replacement snapshot from an external source.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// `Fetch`/`Decode` errors only; the result is all-or-nothing.
    async fn fetch(&self) -> Result<Snapshot>;

    /// Source locator for log lines.
    fn describe(&self) -> String;
}
