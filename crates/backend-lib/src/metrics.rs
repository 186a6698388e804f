// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const LOGIN_SUCCESS: &str = "auth.login.success";
pub const LOGIN_FAILURE: &str = "auth.login.failure";
pub const LOGOUT: &str = "auth.logout";
pub const SESSION_ISSUED: &str = "auth.session.issued";
pub const GATE_DENIED: &str = "auth.gate.denied";
