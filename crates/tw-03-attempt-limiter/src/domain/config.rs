//! Limiter configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Attempts allowed per identity within a sliding window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Attempts admitted per window.
    pub max_attempts: u32,
    /// Window length in milliseconds.
    pub attempt_window_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_window_ms: 300_000,
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            attempt_window_ms: u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.attempt_window_ms)
    }
}
