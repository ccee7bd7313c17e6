//! Read-only reports returned by engine queries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_types::{Platform, WipeMethod, WipeState};
use uuid::Uuid;

/// Result of `check_os`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OsReport {
    /// `Linux`, `Windows` or `Unsupported OS`.
    pub platform: String,
    pub supported: bool,
}

impl OsReport {
    pub fn for_platform(platform: &Platform) -> Self {
        let (label, supported) = match platform {
            Platform::Linux => ("Linux", true),
            Platform::Windows => ("Windows", true),
            _ => ("Unsupported OS", false),
        };
        Self {
            platform: label.to_string(),
            supported,
        }
    }
}

/// Result of `get_system_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub platform: String,
    pub arch: String,
    /// Running as root / Administrator.
    pub elevated: bool,
    /// Fixed for the lifetime of the engine.
    pub session_id: Uuid,
}

/// Result of `get_app_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppStatus {
    pub running: bool,
    pub start_time: DateTime<Utc>,
    pub version: String,
    /// Whether a configuration file was found and parsed.
    pub config_loaded: bool,
    pub active_wipes: usize,
}

/// One in-flight request, as seen by status pollers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveWipe {
    pub request_id: Uuid,
    pub device_id: String,
    pub method: Option<WipeMethod>,
    pub requester: String,
    pub state: WipeState,
    pub started_at: DateTime<Utc>,
}
