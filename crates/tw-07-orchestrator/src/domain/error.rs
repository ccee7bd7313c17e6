//! Engine error taxonomy.
//!
//! Subsystem errors collapse into [`EngineError`] at the engine boundary;
//! inside a wipe lifecycle every one of them becomes a terminal
//! [`WipeOutcome`] instead of escaping to the caller.

use shared_types::{ErrorKind, OutcomeStatus, WipeOutcome};
use std::time::Duration;
use thiserror::Error;
use tw_01_device_catalog::CatalogError;
use tw_02_policy_validator::ValidationError;
use tw_04_confirmation_gate::CancelReason;
use uuid::Uuid;

use super::config::ConfigError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Engine could not be assembled from its configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Too many wipe attempts. Try again in {} seconds.", .retry_after.as_secs().max(1))]
    RateLimited { retry_after: Duration },

    #[error("Drive not found: {0}")]
    DeviceNotFound(String),

    #[error("Drive is busy: a wipe is already running on {0}")]
    DeviceBusy(String),

    #[error("Wipe cancelled: {0}")]
    Cancelled(CancelReason),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Executor not found: {0}")]
    ExecutorNotFound(String),

    #[error("Process error: {0}")]
    ProcessError(String),

    #[error("Wipe failed: {0}")]
    ExecutionFailed(String),

    #[error("Wipe completed with warnings: {0}")]
    ExecutionWarning(String),

    #[error("Wipe timed out: {0}")]
    Timeout(String),

    #[error("Device enumeration failed: {0}")]
    Enumeration(String),
}

impl EngineError {
    /// Shared classification, `None` for configuration errors that never
    /// reach a request.
    pub fn kind(&self) -> Option<ErrorKind> {
        let kind = match self {
            Self::Config(_) => return None,
            Self::Validation(_) => ErrorKind::Validation,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::DeviceNotFound(_) => ErrorKind::DeviceNotFound,
            Self::DeviceBusy(_) => ErrorKind::DeviceBusy,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
            Self::ExecutorNotFound(_) => ErrorKind::ExecutorNotFound,
            Self::ProcessError(_) => ErrorKind::ProcessError,
            Self::ExecutionFailed(_) => ErrorKind::ExecutionFailed,
            Self::ExecutionWarning(_) => ErrorKind::ExecutionWarning,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Enumeration(_) => ErrorKind::Enumeration,
        };
        Some(kind)
    }

    /// Terminal outcome for a request that stopped on this error.
    pub fn into_outcome(self, request_id: Uuid) -> WipeOutcome {
        match self {
            Self::Cancelled(_) => WipeOutcome::cancelled(request_id),
            other => {
                let status = match other {
                    Self::Config(_)
                    | Self::Validation(_)
                    | Self::RateLimited { .. }
                    | Self::DeviceNotFound(_)
                    | Self::DeviceBusy(_)
                    | Self::Enumeration(_) => OutcomeStatus::Rejected,
                    Self::ExecutionWarning(_) => OutcomeStatus::Warning,
                    Self::Timeout(_) => OutcomeStatus::TimedOut,
                    _ => OutcomeStatus::Failed,
                };
                let mut outcome = WipeOutcome::new(request_id, status, other.to_string());
                outcome.error_kind = other.kind();
                outcome
            }
        }
    }
}

impl From<CatalogError> for EngineError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => Self::DeviceNotFound(id),
            CatalogError::Enumeration(reason) => Self::Enumeration(reason),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_02_policy_validator::FieldKind;

    #[test]
    fn test_rejections_become_rejected_outcomes() {
        let id = Uuid::new_v4();
        let outcome = EngineError::from(ValidationError::TooShort {
            field: FieldKind::Username,
            min: 3,
        })
        .into_outcome(id);

        assert_eq!(outcome.request_id, id);
        assert_eq!(outcome.status, OutcomeStatus::Rejected);
        assert_eq!(outcome.error_kind, Some(ErrorKind::Validation));
        assert!(outcome.message.contains("too short"));
    }

    #[test]
    fn test_rate_limited_message_has_retry_hint() {
        let err = EngineError::RateLimited {
            retry_after: Duration::from_secs(42),
        };
        assert_eq!(
            err.to_string(),
            "Too many wipe attempts. Try again in 42 seconds."
        );

        let sub_second = EngineError::RateLimited {
            retry_after: Duration::from_millis(10),
        };
        assert!(sub_second.to_string().contains("in 1 seconds"));
    }

    #[test]
    fn test_cancel_uses_operator_message() {
        let outcome = EngineError::Cancelled(CancelReason::Dismissed).into_outcome(Uuid::new_v4());
        assert_eq!(outcome.status, OutcomeStatus::Cancelled);
        assert_eq!(outcome.message, "Wipe cancelled by operator");
    }

    #[test]
    fn test_catalog_errors_map_to_kinds() {
        let err = EngineError::from(CatalogError::NotFound("/dev/sdq".into()));
        assert_eq!(err.kind(), Some(ErrorKind::DeviceNotFound));
        let err = EngineError::from(CatalogError::Enumeration("lsblk missing".into()));
        assert_eq!(err.kind(), Some(ErrorKind::Enumeration));
    }

    #[test]
    fn test_execution_errors_keep_their_status() {
        let id = Uuid::new_v4();

        let timed_out = EngineError::Timeout("after 3600s".into()).into_outcome(id);
        assert_eq!(timed_out.status, OutcomeStatus::TimedOut);
        assert_eq!(timed_out.error_kind, Some(ErrorKind::Timeout));

        let warned = EngineError::ExecutionWarning("bad sectors".into()).into_outcome(id);
        assert_eq!(warned.status, OutcomeStatus::Warning);

        let failed = EngineError::ProcessError("spawn failed".into()).into_outcome(id);
        assert_eq!(failed.status, OutcomeStatus::Failed);
        assert_eq!(failed.message, "Process error: spawn failed");
    }
}
