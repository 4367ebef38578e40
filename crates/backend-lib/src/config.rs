// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application settings.
///
/// Loaded once at startup and captured in `AppState`; nothing reads the
/// process environment after that point.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Allowed CORS origin for the staff frontend
    pub cors_origin: String,
    /// Whether `POST /auth/register` is open at all
    pub registration_enabled: bool,
    /// Symmetric token-signing secret. Rotating it invalidates every
    /// outstanding token.
    pub token_secret: String,
    /// Token lifetime in seconds
    pub token_lifetime_secs: u64,
    /// Password hashing cost
    pub hash_cost: HashCost,
    /// Login throttle thresholds
    pub throttle: ThrottleSettings,
}

/// Argon2id work-factor parameters. Stored hashes self-describe their
/// parameters, so raising these later leaves old hashes verifiable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HashCost {
    /// Memory cost in KiB
    pub m_cost: u32,
    /// Iterations
    pub t_cost: u32,
    /// Lanes
    pub p_cost: u32,
}

/// Sliding-window throttle thresholds for the `/auth` routes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThrottleSettings {
    /// Window length in seconds
    pub window_secs: u64,
    /// Requests within the window before the delay stage kicks in
    pub delay_after: u32,
    /// Artificial delay applied past `delay_after`, in milliseconds
    pub delay_ms: u64,
    /// Requests within the window before outright rejection
    pub block_after: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("static addr"),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            cors_origin: "https://localhost:5173".to_string(),
            registration_enabled: false,
            // dev-only default; deployments must override via config or env
            token_secret: "dev-only-secret-change-me-0123456789abcdef".to_string(),
            token_lifetime_secs: 8 * 60 * 60,
            hash_cost: HashCost::default(),
            throttle: ThrottleSettings::default(),
        }
    }
}

impl Default for HashCost {
    fn default() -> Self {
        // argon2 crate defaults (19 MiB, 2 passes, 1 lane)
        Self {
            m_cost: 19_456,
            t_cost: 2,
            p_cost: 1,
        }
    }
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            window_secs: 60,
            delay_after: 3,
            delay_ms: 500,
            block_after: 5,
        }
    }
}

impl Settings {
    /// Load settings from config files, then the environment
    pub fn load() -> Result<Self> {
        let settings: Settings = Figment::new()
            .merge(Toml::file("config.toml"))
            .merge(Yaml::file("config.yaml"))
            .merge(Json::file("config.json"))
            .merge(Env::prefixed("PAYMENTS_").split("__"))
            .extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an explicit file path, then the environment
    pub fn load_from(path: &str) -> Result<Self> {
        let settings: Settings = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("PAYMENTS_").split("__"))
            .extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations that cannot work
    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.as_str()) {
            bail!("log_level must be one of {LEVELS:?}");
        }
        if self.token_secret.len() < 32 {
            bail!("token_secret must be at least 32 bytes");
        }
        if self.token_lifetime_secs == 0 {
            bail!("token_lifetime_secs must be positive");
        }
        if self.hash_cost.m_cost < 8 * 1024 || self.hash_cost.t_cost == 0 || self.hash_cost.p_cost == 0 {
            bail!("hash_cost below the supported floor");
        }
        if self.throttle.window_secs == 0 {
            bail!("throttle.window_secs must be positive");
        }
        if self.throttle.delay_after >= self.throttle.block_after {
            bail!("throttle.delay_after must be below throttle.block_after");
        }
        Ok(())
    }
}
