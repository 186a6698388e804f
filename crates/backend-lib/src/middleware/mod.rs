// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `CareerFlow` admin server.

pub mod admin_gate;

pub use admin_gate::{admin_gate, is_protected};
