//! Ports for the attempt limiter.

pub mod outbound;

pub use outbound::{Clock, ManualClock, SystemClock};
