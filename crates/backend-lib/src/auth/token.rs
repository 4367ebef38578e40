// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Bearer token issuing and verification.
//!
//! Tokens are stateless HS256 JWTs over a process-wide secret. Validity is
//! exactly: signature ok AND now before expiry. There is no refresh and no
//! revocation list; rotating the secret invalidates everything outstanding.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use payments_common::Role;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the credential record id
    pub sub: String,
    pub username: String,
    pub role: Role,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Signs and verifies access tokens
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, lifetime_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::seconds(lifetime_secs as i64),
        }
    }

    /// Issue a token for an authenticated identity, expiring at
    /// `now + lifetime`
    pub fn issue(
        &self,
        sub: &str,
        username: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: sub.to_string(),
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("token signing: {e}")))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails closed: bad signature, garbled claims, and expiry all collapse
    /// into the same generic error, with zero clock leeway.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}
