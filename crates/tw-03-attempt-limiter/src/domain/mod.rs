//! Limiter domain: configuration and the per-identity window.

pub mod config;
pub mod window;

pub use config::RateLimitConfig;
pub use window::AttemptWindow;
