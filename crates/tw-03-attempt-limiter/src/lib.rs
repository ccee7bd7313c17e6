//! # Attempt Limiter
//!
//! **Component:** 3
//!
//! ## Purpose
//!
//! Bounds how many wipe attempts one requester identity may start within a
//! sliding window (default: 3 per 300 000 ms).
//!
//! ## Algorithm
//!
//! ```text
//! allow(identity):
//!   drop timestamps with now - t >= window
//!   if len < max_attempts: push now, admit
//!   else: deny (nothing recorded)
//! ```
//!
//! Buckets live in a `DashMap<String, Mutex<AttemptWindow>>`. Idle buckets
//! are removed by [`AttemptLimiter::prune`], which the runtime calls
//! periodically through [`prune_task`].

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{AttemptWindow, RateLimitConfig};
pub use ports::{Clock, ManualClock, SystemClock};
pub use service::{prune_task, AttemptLimiter};
