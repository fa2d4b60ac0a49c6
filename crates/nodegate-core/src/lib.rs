//! nodegate core: transport-agnostic admission primitives and error types.
//!
//! This crate defines the node identity, the immutable allow-list snapshot,
//! the admit request/response wire types, and the error surface shared by the
//! server and tooling. It carries no runtime or transport dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed keys and payloads surface as `NodeGateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod key;
pub mod protocol;
pub mod snapshot;

/// Shared result type.
pub use error::{Result, NodeGateError};
pub use key::NodeIdentity;
pub use snapshot::Snapshot;
