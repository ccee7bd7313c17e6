//! # TrustWipe Runtime
//!
//! Library half of the `trustwipe` binary: configuration loading, tracing
//! setup, subsystem wiring and terminal rendering.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line
//! 2. Install tracing (`TW_LOG_LEVEL`, `TW_JSON_LOGS`)
//! 3. Load `trustwipe.toml`, or defaults when absent
//! 4. Wire catalog, supervisor, audit file and terminal prompt into the engine
//! 5. Run the requested operation

pub mod cli;
pub mod config;
pub mod render;
pub mod telemetry;
pub mod wiring;

pub use cli::{Cli, Command};
pub use config::{ConfigError, LoadedConfig, DEFAULT_CONFIG_PATH};
pub use telemetry::{init_tracing, TelemetryConfig, TelemetryError};
pub use wiring::{build_engine, build_terminal_engine, WiringError};
