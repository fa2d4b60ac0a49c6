//! Top-level facade crate for nodegate.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use nodegate_core::*;
}

pub mod server {
    pub use nodegate_server::*;
}
