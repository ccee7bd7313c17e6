//! TOML configuration loading.
//!
//! ```toml
//! [rate_limit]
//! max_attempts = 3
//! attempt_window_ms = 300000
//!
//! [supervisor]
//! timeout_secs = 3600
//! scripts_dir = "/opt/trustwipe/scripts"
//!
//! [audit]
//! file = "/var/log/trustwipe/app.log"
//! min_level = "INFO"
//! ```
//!
//! A missing file is not an error: the engine runs on defaults and reports
//! `config_loaded = false`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use tw_07_orchestrator::EngineConfig;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "trustwipe.toml";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot read {path}: {error}")]
    Io { path: String, error: String },

    #[error("cannot parse configuration: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub engine: EngineConfig,
    /// A file was found and parsed.
    pub loaded: bool,
}

impl LoadedConfig {
    /// Load `path`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No configuration file, using defaults");
                return Ok(Self {
                    engine: EngineConfig::default(),
                    loaded: false,
                });
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    error: e.to_string(),
                })
            }
        };

        let engine = Self::parse(&content)?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(Self {
            engine,
            loaded: true,
        })
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(content: &str) -> Result<EngineConfig, ConfigError> {
        let engine: EngineConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        engine
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(engine)
    }
}
