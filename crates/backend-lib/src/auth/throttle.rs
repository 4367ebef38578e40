// ============================
// crates/backend-lib/src/auth/throttle.rs
// ============================
//! Sliding-window throttle for authentication attempts.
//!
//! Two independent thresholds per key over one window: past the first,
//! requests are slowed by a fixed artificial delay; past the second, they
//! are rejected outright. Counts are in-memory only and reset when the
//! window elapses or the process restarts.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::ThrottleSettings;

/// What the guard decided for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    /// Process the request after this delay
    Delay(Duration),
    /// Reject with a rate-limit error
    Block,
}

/// One throttle bucket: recent request count plus window start
#[derive(Debug)]
struct Bucket {
    count: u32,
    window_start: Instant,
}

/// Per-key request throttle.
///
/// Cloning is cheap and clones share the same bucket map, so a clone can be
/// handed to a background cleanup task.
#[derive(Debug, Clone)]
pub struct ThrottleGuard {
    buckets: Arc<DashMap<String, Bucket>>,
    window: Duration,
    delay_after: u32,
    delay: Duration,
    block_after: u32,
}

impl ThrottleGuard {
    pub fn new(window: Duration, delay_after: u32, delay: Duration, block_after: u32) -> Self {
        Self {
            buckets: Arc::new(DashMap::new()),
            window,
            delay_after,
            delay,
            block_after,
        }
    }

    pub fn from_settings(settings: &ThrottleSettings) -> Self {
        Self::new(
            Duration::from_secs(settings.window_secs),
            settings.delay_after,
            Duration::from_millis(settings.delay_ms),
            settings.block_after,
        )
    }

    /// Count one request against `key` and decide its fate.
    ///
    /// The increment happens under the bucket's map entry, so concurrent
    /// requests for the same key cannot undercount.
    pub fn check(&self, key: &str) -> Decision {
        let mut bucket = self.buckets.entry(key.to_string()).or_insert_with(|| Bucket {
            count: 0,
            window_start: Instant::now(),
        });

        if bucket.window_start.elapsed() >= self.window {
            bucket.count = 0;
            bucket.window_start = Instant::now();
        }

        bucket.count += 1;

        if bucket.count > self.block_after {
            Decision::Block
        } else if bucket.count > self.delay_after {
            Decision::Delay(self.delay)
        } else {
            Decision::Proceed
        }
    }

    /// Retry hint for rejected callers: the worst case is a full window
    pub fn retry_after_secs(&self) -> u64 {
        self.window.as_secs()
    }

    /// Drop buckets whose window has elapsed
    pub fn cleanup(&self) {
        self.buckets
            .retain(|_, bucket| bucket.window_start.elapsed() < self.window);
    }

    /// Run [`cleanup`](Self::cleanup) once per window until the task is
    /// dropped. Spawned when the application state is built.
    pub async fn cleanup_task(self) {
        loop {
            tokio::time::sleep(self.window).await;
            self.cleanup();
        }
    }
}
