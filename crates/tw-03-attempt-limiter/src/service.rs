//! Attempt Limiter Service
//!
//! One bucket per identity. The map is sharded by `DashMap`; each bucket
//! carries its own mutex so that two calls for the same identity are
//! serialized while different identities proceed in parallel.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{AttemptWindow, RateLimitConfig};
use crate::ports::{Clock, SystemClock};

/// Process-wide attempt limiter.
pub struct AttemptLimiter {
    buckets: DashMap<String, Mutex<AttemptWindow>>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
}

impl AttemptLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            buckets: DashMap::new(),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Admit and record an attempt for `identity`, or deny it.
    ///
    /// Denied attempts are not recorded, so a caller hammering the limiter
    /// does not extend its own lockout.
    pub fn allow(&self, identity: &str) -> bool {
        let now = self.clock.now();
        let bucket = self
            .buckets
            .entry(identity.to_owned())
            .or_insert_with(|| {
                debug!(identity = %identity, "Creating new attempt bucket");
                Mutex::default()
            })
            .downgrade();

        let mut window = bucket.lock();
        if window.try_record(now, self.config.window(), self.config.max_attempts) {
            debug!(
                identity = %identity,
                remaining = window.remaining(self.config.max_attempts),
                "Attempt admitted"
            );
            true
        } else {
            let retry_ms = window
                .retry_after(now, self.config.window(), self.config.max_attempts)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default();
            warn!(identity = %identity, retry_after_ms = retry_ms, "Attempt limit exceeded");
            false
        }
    }

    /// Attempts `identity` may still make in the current window.
    pub fn remaining(&self, identity: &str) -> u32 {
        let max = self.config.max_attempts;
        match self.buckets.get(identity) {
            Some(bucket) => {
                let mut window = bucket.lock();
                window.prune(self.clock.now(), self.config.window());
                window.remaining(max)
            }
            None => max,
        }
    }

    /// Time until `identity` is admitted again; `None` when it is admitted now.
    pub fn retry_after(&self, identity: &str) -> Option<Duration> {
        let bucket = self.buckets.get(identity)?;
        let now = self.clock.now();
        let mut window = bucket.lock();
        window.prune(now, self.config.window());
        window.retry_after(now, self.config.window(), self.config.max_attempts)
    }

    /// Drop buckets that no longer hold any in-window attempt.
    pub fn prune(&self) {
        let now = self.clock.now();
        let window = self.config.window();
        self.buckets.retain(|identity, bucket| {
            let bucket = bucket.get_mut();
            bucket.prune(now, window);
            if bucket.is_empty() {
                debug!(identity = %identity, "Removing idle attempt bucket");
                false
            } else {
                true
            }
        });
    }

    /// Number of tracked identities.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

/// Background task pruning idle buckets every `interval`.
pub async fn prune_task(limiter: Arc<AttemptLimiter>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        limiter.prune();
    }
}
