//! # Error Kinds
//!
//! Classification of every way a wipe request can end other than success.
//! Subsystem crates define their own `thiserror` enums; this is the shared
//! vocabulary those enums collapse into at the engine boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error taxonomy carried on a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad shape, length or pattern. Reported, locally recoverable.
    Validation,
    /// Too many attempts for this identity. Self-clears after the window.
    RateLimited,
    /// Target device was not among the current candidates.
    DeviceNotFound,
    /// Another supervisor task is already executing against the device.
    DeviceBusy,
    /// Operator declined or dismissed the confirmation.
    Cancelled,
    /// No executor is registered for the current platform.
    UnsupportedPlatform,
    /// The executor artifact could not be located.
    ExecutorNotFound,
    /// The process could not be spawned or waited on.
    ProcessError,
    /// The executor ran and exited non-zero (or was killed by a signal).
    ExecutionFailed,
    /// The executor succeeded but wrote diagnostics.
    ExecutionWarning,
    /// The executor exceeded the wall-clock limit and was killed.
    Timeout,
    /// Device listing failed. Degrades to an empty list.
    Enumeration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::RateLimited => "rate_limited",
            Self::DeviceNotFound => "device_not_found",
            Self::DeviceBusy => "device_busy",
            Self::Cancelled => "cancelled",
            Self::UnsupportedPlatform => "unsupported_platform",
            Self::ExecutorNotFound => "executor_not_found",
            Self::ProcessError => "process_error",
            Self::ExecutionFailed => "execution_failed",
            Self::ExecutionWarning => "execution_warning",
            Self::Timeout => "timeout",
            Self::Enumeration => "enumeration_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a method string is outside `{sanitize, overwrite}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown wipe method: {0:?}")]
pub struct UnknownMethod(pub String);
