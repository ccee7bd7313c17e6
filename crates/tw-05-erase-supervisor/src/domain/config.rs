//! Supervisor configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use super::executor::ExecutorSpec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Hard limit on one executor run.
    pub timeout_secs: u64,
    /// Directory holding the executor scripts.
    pub scripts_dir: PathBuf,
    /// Per-platform replacements for the built-in executors, keyed by
    /// platform name (`linux`, `windows`, `macos`, ...).
    pub executors: BTreeMap<String, ExecutorSpec>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 3600,
            scripts_dir: PathBuf::from("scripts"),
            executors: BTreeMap::new(),
        }
    }
}

impl SupervisorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
