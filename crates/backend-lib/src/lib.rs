// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the secure payments gateway.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod store;
pub mod validation;

use crate::auth::{ThrottleGuard, TokenIssuer};
use crate::config::Settings;
use crate::store::Store;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Settings captured at startup; nothing re-reads the environment
    pub settings: Settings,
    /// Storage backend
    pub store: S,
    /// Token issuer/verifier
    pub tokens: TokenIssuer,
    /// Login throttle
    pub throttle: ThrottleGuard,
    /// Fixed hash verified against for unknown usernames, so a failed
    /// login costs the same whether or not the identity exists
    pub(crate) dummy_hash: String,
}

impl<S: Store> AppState<S> {
    /// Create a new application state.
    ///
    /// Must run inside a tokio runtime: spawns the background task that
    /// prunes expired throttle buckets.
    pub fn new(store: S, settings: Settings) -> anyhow::Result<Self> {
        settings.validate()?;
        let tokens = TokenIssuer::new(&settings.token_secret, settings.token_lifetime_secs);
        let throttle = ThrottleGuard::from_settings(&settings.throttle);
        tokio::spawn(throttle.clone().cleanup_task());
        let dummy_hash =
            auth::hash_password("placeholder-never-a-real-password", &settings.hash_cost)?;
        Ok(Self {
            settings,
            store,
            tokens,
            throttle,
            dummy_hash,
        })
    }
}
