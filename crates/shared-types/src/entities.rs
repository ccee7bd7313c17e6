//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Topology**: [`Device`], [`DeviceFlags`], [`Platform`]
//! - **Requests**: [`WipeMethod`], [`Credentials`], [`WipeRequest`]
//! - **Lifecycle**: [`WipeState`], [`OutcomeStatus`], [`WipeOutcome`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{ErrorKind, UnknownMethod};
use crate::format::format_bytes;
use crate::security::SecretString;

// =============================================================================
// CLUSTER A: TOPOLOGY
// =============================================================================

/// Boolean properties reported by the enumeration capability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFlags {
    pub removable: bool,
    /// Hosts the running OS. Never offered as a wipe candidate.
    pub system: bool,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    pub usb: bool,
    pub scsi: bool,
}

/// One physical or logical storage unit, as seen by a single enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Platform path (`/dev/sdb`, `\\.\PhysicalDrive1`).
    pub id: String,
    pub description: String,
    pub size_bytes: u64,
    pub mount_points: BTreeSet<String>,
    pub flags: DeviceFlags,
}

impl Device {
    /// Size rendered for display, e.g. `"14.9 GB"`.
    pub fn display_size(&self) -> String {
        format_bytes(self.size_bytes, 2)
    }

    pub fn is_mounted(&self) -> bool {
        !self.mount_points.is_empty()
    }
}

/// Operating system the engine is running on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
    Macos,
    Other(String),
}

impl Platform {
    /// Platform of the current process.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` style name.
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            "macos" => Self::Macos,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CLUSTER B: REQUESTS
// =============================================================================

/// Destruction strategy. The algorithm behind each one belongs to the
/// platform erase executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WipeMethod {
    Sanitize,
    Overwrite,
}

impl WipeMethod {
    pub const ALL: [WipeMethod; 2] = [WipeMethod::Sanitize, WipeMethod::Overwrite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sanitize => "sanitize",
            Self::Overwrite => "overwrite",
        }
    }
}

impl FromStr for WipeMethod {
    type Err = UnknownMethod;

    /// Exact, case-sensitive match. `"Overwrite"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sanitize" => Ok(Self::Sanitize),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

impl fmt::Display for WipeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Username / secret pair authorizing a request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub secret: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

/// A caller's intent to destroy data on one device.
///
/// Not `Serialize`: only [`WipeRequest::audit_projection`] may leave the engine.
#[derive(Debug, Clone)]
pub struct WipeRequest {
    pub id: Uuid,
    pub device_id: String,
    pub method: WipeMethod,
    /// Opaque rate-limiting key (session or channel identifier).
    pub requester: String,
    pub credentials: Credentials,
    pub created_at: DateTime<Utc>,
}

impl WipeRequest {
    pub fn new(
        device_id: impl Into<String>,
        method: WipeMethod,
        requester: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            device_id: device_id.into(),
            method,
            requester: requester.into(),
            credentials,
            created_at: Utc::now(),
        }
    }

    /// Secret-free view of the request for the audit trail.
    pub fn audit_projection(&self) -> serde_json::Value {
        serde_json::json!({
            "request_id": self.id.to_string(),
            "device": self.device_id,
            "method": self.method.as_str(),
            "username": self.credentials.username,
            "requester": self.requester,
            "created_at": self.created_at.to_rfc3339(),
        })
    }

    /// One-line description shown by the confirmation surface.
    pub fn summary(&self) -> String {
        format!(
            "Permanently erase ALL data on {} using method '{}'. This cannot be undone.",
            self.device_id, self.method
        )
    }
}

// =============================================================================
// CLUSTER C: LIFECYCLE
// =============================================================================

/// Orchestration state machine.
///
/// ```text
/// Received → Validated → RateLimitChecked → ConfirmationPending
///     → {Confirmed, Cancelled} → Executing → {Succeeded, Warning, Failed, TimedOut}
/// ```
///
/// Failures before confirmation land in `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WipeState {
    Received,
    Validated,
    RateLimitChecked,
    ConfirmationPending,
    Confirmed,
    Cancelled,
    Rejected,
    Executing,
    Succeeded,
    Warning,
    Failed,
    TimedOut,
}

impl WipeState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Cancelled
                | Self::Rejected
                | Self::Succeeded
                | Self::Warning
                | Self::Failed
                | Self::TimedOut
        )
    }

    /// Terminal state reached by a terminal outcome status.
    pub fn from_outcome(status: OutcomeStatus) -> Self {
        match status {
            OutcomeStatus::Cancelled => Self::Cancelled,
            OutcomeStatus::Rejected => Self::Rejected,
            OutcomeStatus::Started => Self::Executing,
            OutcomeStatus::Succeeded => Self::Succeeded,
            OutcomeStatus::Warning => Self::Warning,
            OutcomeStatus::Failed => Self::Failed,
            OutcomeStatus::TimedOut => Self::TimedOut,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::RateLimitChecked => "rate_limit_checked",
            Self::ConfirmationPending => "confirmation_pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
            Self::Executing => "executing",
            Self::Succeeded => "succeeded",
            Self::Warning => "warning",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for WipeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status carried by a [`WipeOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Cancelled,
    Rejected,
    Started,
    Succeeded,
    Warning,
    Failed,
    TimedOut,
}

impl OutcomeStatus {
    /// Everything except `Started` ends a request.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Started)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
            Self::Started => "started",
            Self::Succeeded => "succeeded",
            Self::Warning => "warning",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one completed or aborted wipe attempt. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WipeOutcome {
    pub request_id: Uuid,
    pub status: OutcomeStatus,
    pub message: String,
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    pub error_kind: Option<ErrorKind>,
    pub timestamp: DateTime<Utc>,
}

impl WipeOutcome {
    pub fn new(request_id: Uuid, status: OutcomeStatus, message: impl Into<String>) -> Self {
        Self {
            request_id,
            status,
            message: message.into(),
            exit_code: None,
            signal: None,
            error_kind: None,
            timestamp: Utc::now(),
        }
    }

    pub fn rejected(request_id: Uuid, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(request_id, OutcomeStatus::Rejected, message).with_error_kind(kind)
    }

    pub fn cancelled(request_id: Uuid) -> Self {
        Self::new(
            request_id,
            OutcomeStatus::Cancelled,
            "Wipe cancelled by operator",
        )
        .with_error_kind(ErrorKind::Cancelled)
    }

    pub fn failed(request_id: Uuid, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(request_id, OutcomeStatus::Failed, message).with_error_kind(kind)
    }

    #[must_use]
    pub fn with_error_kind(mut self, kind: ErrorKind) -> Self {
        self.error_kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_exit(mut self, exit_code: Option<i32>, signal: Option<i32>) -> Self {
        self.exit_code = exit_code;
        self.signal = signal;
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Succeeded | OutcomeStatus::Warning)
    }
}
