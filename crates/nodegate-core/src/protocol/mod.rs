//! Wire protocol for admission decisions.
//!
//! One request carries one node key (plus optional origin metadata); one
//! response carries one boolean. Decoding is panic-free and size-bounded:
//! malformed input is reported as `NodeGateError` and never reaches the
//! admission cache.

pub mod admit;

pub use admit::{decode_admit_request, AdmitRequest, AdmitResponse, DEFAULT_MAX_REQUEST_BYTES};
