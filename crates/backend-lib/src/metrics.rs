// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_REGISTERED: &str = "auth.registered";
pub const AUTH_LOGIN_SUCCESS: &str = "auth.login.success";
pub const AUTH_LOGIN_FAILED: &str = "auth.login.failed";
pub const AUTH_DELAYED: &str = "auth.delayed";
pub const AUTH_THROTTLED: &str = "auth.throttled";
pub const TOKEN_REJECTED: &str = "token.rejected";
pub const PAYMENT_CREATED: &str = "payment.created";
pub const PAYMENT_VERIFIED: &str = "payment.verified";
pub const PAYMENT_SUBMITTED: &str = "payment.submitted";
