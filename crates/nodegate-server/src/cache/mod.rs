//! Admission cache (refresh policy + concurrent lookup).
//!
//! Holds one immutable `Snapshot` behind an `Arc` that is swapped whole on a
//! successful refresh. Refresh is driven by request traffic and throttled to
//! at most one attempt per interval; fetch failures keep the previous snapshot.

pub mod admission;
pub mod clock;

pub use admission::{AdmissionCache, CacheState, CacheStatus, DEFAULT_REFRESH_INTERVAL};
pub use clock::{Clock, ManualClock, MonotonicClock};
