//! Supervisor errors.

use shared_types::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SupervisorError {
    #[error("Unsupported platform for wiping: {0}")]
    UnsupportedPlatform(String),

    #[error("Executor not found: {}", .0.display())]
    ExecutorNotFound(PathBuf),

    #[error("Failed to start executor: {0}")]
    Spawn(String),
}

impl SupervisorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
            Self::ExecutorNotFound(_) => ErrorKind::ExecutorNotFound,
            Self::Spawn(_) => ErrorKind::ProcessError,
        }
    }
}
