// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! shared between the payments gateway server and its clients.
//! This module defines the HTTP request/response bodies and supporting types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff role attached to a credential record and carried in token claims.
///
/// Flat enum: there is no hierarchy and no path for a caller to change
/// their own role after registration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Employee,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Employee => write!(f, "EMPLOYEE"),
        }
    }
}

/// Body of `POST /auth/register`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful registration
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterResponse {
    pub ok: bool,
}

/// Body of `POST /auth/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of a successful login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    /// Signed bearer token, valid until its embedded expiry
    pub token: String,
    pub role: Role,
}

/// Lifecycle state of a payment record
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Submitted,
}

/// Body of `POST /payments`
///
/// All fields are strings on the wire; the server validates shape before
/// anything else touches them. `amount` stays a string end to end so no
/// float rounding can change what the customer typed.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub account_number: String,
    pub amount: String,
    pub currency: String,
    pub swift: String,
    pub payee: String,
}

/// A payment record as stored and as returned to staff clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub account_number: String,
    pub amount: String,
    pub currency: String,
    pub swift: String,
    pub payee: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_screaming() {
        let json = serde_json::to_string(&Role::Employee).unwrap();
        assert_eq!(json, "\"EMPLOYEE\"");
    }

    #[test]
    fn payment_round_trips_camel_case() {
        let payment = Payment {
            id: Uuid::new_v4(),
            account_number: "123456789".to_string(),
            amount: "150.00".to_string(),
            currency: "ZAR".to_string(),
            swift: "ABSAZAJJ".to_string(),
            payee: "Jane Doe".to_string(),
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            verified_at: None,
            submitted_at: None,
        };
        let json = serde_json::to_string(&payment).unwrap();
        assert!(json.contains("\"accountNumber\""));
        assert!(json.contains("\"PENDING\""));
        let back: Payment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payment);
    }
}
