// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod throttle;
pub mod token;

pub use password::{hash_password, verify_password};
pub use throttle::{Decision, ThrottleGuard};
pub use token::{Claims, TokenIssuer};
