// ============================
// crates/backend-lib/src/middleware/mod.rs
// ============================
//! Request middleware: bearer authentication and login throttling.

pub mod auth;
pub mod throttle;
