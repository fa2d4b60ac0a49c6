//! nodegate server library entry.
//!
//! This crate wires config loading, the allow-list fetcher, the admission
//! cache, metrics, and the HTTP transport into one admission service. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod cache;
pub mod config;
pub mod fetcher;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
