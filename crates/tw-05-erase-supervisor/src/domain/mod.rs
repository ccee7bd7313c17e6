//! Supervisor domain: executor registry, events, outcome classification.

pub mod classify;
pub mod config;
pub mod errors;
pub mod events;
pub mod executor;

pub use classify::{classify, scrub_secret, ExitInfo};
pub use config::SupervisorConfig;
pub use errors::SupervisorError;
pub use events::SupervisorEvent;
pub use executor::{ArgStyle, ExecutorRegistry, ExecutorSpec, ResolvedExecutor};
