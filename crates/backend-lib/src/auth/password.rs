// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::HashCost;

/// Hash a password with argon2id under the configured work factor.
///
/// The PHC output string self-describes its parameters, so the cost can be
/// raised later without invalidating hashes already on disk.
pub fn hash_password(plain: &str, cost: &HashCost) -> anyhow::Result<String> {
    let params = Params::new(cost.m_cost, cost.t_cost, cost.p_cost, None)
        .map_err(|e| anyhow::anyhow!("argon2 params: {e}"))?;
    let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("argon2 hashing: {e}"))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored PHC hash.
///
/// Returns false on a malformed hash rather than erroring; the verifier
/// itself compares in constant time. Parameters come from the hash string,
/// so records hashed under older costs still verify.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_cost() -> HashCost {
        // keep the test suite fast; production floor is enforced in config
        HashCost {
            m_cost: 8 * 1024,
            t_cost: 1,
            p_cost: 1,
        }
    }

    #[test]
    fn test_hash_then_verify_round_trips() {
        let hash = hash_password("Tr0ub4dor&3!", &cheap_cost()).unwrap();
        assert_ne!(hash, "Tr0ub4dor&3!");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "Tr0ub4dor&3!"));
        assert!(!verify_password(&hash, "wrong"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let cost = cheap_cost();
        let a = hash_password("P@ssw0rd!123", &cost).unwrap();
        let b = hash_password("P@ssw0rd!123", &cost).unwrap();
        assert_ne!(a, b);
        assert!(verify_password(&a, "P@ssw0rd!123"));
        assert!(verify_password(&b, "P@ssw0rd!123"));
    }

    #[test]
    fn test_malformed_hash_returns_false_never_panics() {
        assert!(!verify_password("", "anything"));
        assert!(!verify_password("not-a-phc-string", "anything"));
        assert!(!verify_password("$argon2id$v=19$garbage", "anything"));
    }

    #[test]
    fn test_tampered_hash_fails() {
        let hash = hash_password("Tr0ub4dor&3!", &cheap_cost()).unwrap();
        let mut tampered = hash.into_bytes();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(!verify_password(&tampered, "Tr0ub4dor&3!"));
    }
}
