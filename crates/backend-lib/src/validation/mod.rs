// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Field validation module.
//!
//! Pure shape checks over request fields. Deterministic, no I/O, and error
//! values carry the field name only, never the rejected input.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Common validation constants
const MIN_LOGIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;
const MIN_STRONG_PASSWORD_LENGTH: usize = 10;
const MIN_PAYEE_LENGTH: usize = 2;
const MAX_PAYEE_LENGTH: usize = 100;

/// Currencies the gateway will accept
pub const CURRENCIES: [&str; 7] = ["USD", "EUR", "GBP", "ZAR", "JPY", "AUD", "CAD"];

// Regex patterns for validation
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").unwrap());
// Digits only, 6-18. Authoritative rule; see DESIGN.md for the rejected
// alphanumeric variant.
static ACCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6,18}$").unwrap());
// At most 9 integer digits and 2 fractional digits, upper bound 999,999,999
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,9}(?:\.\d{1,2})?$").unwrap());
// 8 or 11 character BIC. Authoritative rule; see DESIGN.md.
static SWIFT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{8}(?:[A-Z0-9]{3})?$").unwrap());
static PAYEE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").unwrap());

/// Possible validation errors. Messages are generic on purpose.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid username")]
    InvalidUsername,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Password does not meet strength policy")]
    WeakPassword,

    #[error("Invalid account number")]
    InvalidAccountNumber,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid currency")]
    InvalidCurrency,

    #[error("Invalid SWIFT code")]
    InvalidSwift,

    #[error("Invalid payee")]
    InvalidPayee,
}

impl ValidationError {
    /// Machine-readable field name for the boundary response
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidUsername => "username",
            ValidationError::InvalidPassword | ValidationError::WeakPassword => "password",
            ValidationError::InvalidAccountNumber => "accountNumber",
            ValidationError::InvalidAmount => "amount",
            ValidationError::InvalidCurrency => "currency",
            ValidationError::InvalidSwift => "swift",
            ValidationError::InvalidPayee => "payee",
        }
    }
}

/// Result type for validation operations
pub type ValidationResult = Result<(), ValidationError>;

/// Validate a username: 3-32 chars from `[A-Za-z0-9_.-]`
pub fn validate_username(username: &str) -> ValidationResult {
    if !USERNAME_RE.is_match(username) {
        return Err(ValidationError::InvalidUsername);
    }
    Ok(())
}

/// Validate a login password: length only.
///
/// Strength is enforced at registration, not at login, so credentials
/// created under an older policy can still sign in.
pub fn validate_login_password(password: &str) -> ValidationResult {
    let len = password.chars().count();
    if len < MIN_LOGIN_PASSWORD_LENGTH || len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(())
}

/// Validate a registration password against the strong policy:
/// at least 10 chars with upper, lower, digit, and symbol.
pub fn validate_strong_password(password: &str) -> ValidationResult {
    let len = password.chars().count();
    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::WeakPassword);
    }
    let has_uppercase = password.chars().any(char::is_uppercase);
    let has_lowercase = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if len < MIN_STRONG_PASSWORD_LENGTH
        || !(has_uppercase && has_lowercase && has_digit && has_special)
    {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

/// Validate an account number: digits only, 6-18 long
pub fn validate_account_number(account: &str) -> ValidationResult {
    if !ACCOUNT_RE.is_match(account) {
        return Err(ValidationError::InvalidAccountNumber);
    }
    Ok(())
}

/// Validate an amount: positive decimal, at most 9 integer digits and
/// 2 fractional digits
pub fn validate_amount(amount: &str) -> ValidationResult {
    if !AMOUNT_RE.is_match(amount) {
        return Err(ValidationError::InvalidAmount);
    }
    // the regex admits "0" and "0.00"; a payment of nothing is not a payment
    if amount.chars().all(|c| c == '0' || c == '.') {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(())
}

/// Validate a currency against the fixed accepted set
pub fn validate_currency(currency: &str) -> ValidationResult {
    if !CURRENCIES.contains(&currency) {
        return Err(ValidationError::InvalidCurrency);
    }
    Ok(())
}

/// Validate a SWIFT/BIC code: 8 or 11 uppercase alphanumerics
pub fn validate_swift(swift: &str) -> ValidationResult {
    if !SWIFT_RE.is_match(swift) {
        return Err(ValidationError::InvalidSwift);
    }
    Ok(())
}

/// Validate a payee name: letters, spaces, hyphens, apostrophes, 2-100 chars
pub fn validate_payee(payee: &str) -> ValidationResult {
    let len = payee.trim().chars().count();
    if len < MIN_PAYEE_LENGTH || len > MAX_PAYEE_LENGTH {
        return Err(ValidationError::InvalidPayee);
    }
    if !PAYEE_RE.is_match(payee) {
        return Err(ValidationError::InvalidPayee);
    }
    Ok(())
}
