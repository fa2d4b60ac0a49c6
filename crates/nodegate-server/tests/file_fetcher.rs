//! File-backed allow-list source.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use nodegate_core::NodeIdentity;
use nodegate_server::cache::{AdmissionCache, ManualClock};
use nodegate_server::fetcher::{FileFetcher, Fetcher};

const K1: &str = "nodekey:0101010101010101010101010101010101010101010101010101010101010101";
const K2: &str = "nodekey:0202020202020202020202020202020202020202020202020202020202020202";

#[tokio::test]
async fn reads_key_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nodes.json");
    fs::write(&path, format!("[\"{K1}\", \"{K2}\", \"{K1}\"]")).unwrap();

    let snap = FileFetcher::new(&path).fetch().await.unwrap();
    assert_eq!(snap.len(), 2);
    assert!(snap.contains(&NodeIdentity::parse(K1).unwrap()));
    assert!(snap.contains(&NodeIdentity::parse(K2).unwrap()));
}

#[tokio::test]
async fn empty_array_is_valid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nodes.json");
    fs::write(&path, "[]").unwrap();

    let snap = FileFetcher::new(&path).fetch().await.unwrap();
    assert!(snap.is_empty());
}

#[tokio::test]
async fn missing_file_is_fetch_error() {
    let dir = TempDir::new().unwrap();
    let fetcher = FileFetcher::new(dir.path().join("absent.json"));

    let err = fetcher.fetch().await.expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "FETCH_FAILED");
    assert!(fetcher.describe().starts_with("file:"));
}

#[tokio::test]
async fn malformed_payload_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nodes.json");
    let fetcher = FileFetcher::new(&path);

    for bad in [
        "{\"nodes\": []}".to_string(),
        "[\"nodekey:abc\"]".to_string(),
        format!("[\"{K1}\", 7]"),
        format!("[\"{K1}\""),
    ] {
        fs::write(&path, &bad).unwrap();
        let err = fetcher.fetch().await.expect_err(&bad);
        assert_eq!(err.client_code().as_str(), "DECODE_FAILED", "payload={bad}");
    }
}

#[tokio::test]
async fn cache_picks_up_file_changes_after_interval() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nodes.json");
    fs::write(&path, format!("[\"{K1}\"]")).unwrap();

    let clock = Arc::new(ManualClock::new(0));
    let cache = AdmissionCache::new(Arc::new(FileFetcher::new(&path)), Duration::from_secs(60))
        .with_clock(clock.clone());
    let (k1, k2) = (NodeIdentity::parse(K1).unwrap(), NodeIdentity::parse(K2).unwrap());

    assert!(cache.is_admitted(&k1).await);
    fs::write(&path, format!("[\"{K2}\"]")).unwrap();
    assert!(cache.is_admitted(&k1).await);

    clock.advance(Duration::from_secs(61));
    assert!(cache.is_admitted(&k2).await);
    assert!(!cache.is_admitted(&k1).await);

    // Corrupt file: keep serving the last good list.
    fs::write(&path, "not json").unwrap();
    clock.advance(Duration::from_secs(61));
    assert!(cache.is_admitted(&k2).await);
    assert_eq!(cache.status().refresh_failed, 1);
}
