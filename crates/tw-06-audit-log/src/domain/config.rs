//! Audit configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::level::LogLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Audit log file, created with its parent directories on first use.
    pub file: PathBuf,
    /// Entries below this level are not written.
    pub min_level: LogLevel,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("logs/app.log"),
            min_level: LogLevel::Info,
        }
    }
}
