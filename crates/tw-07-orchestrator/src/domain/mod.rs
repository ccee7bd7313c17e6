//! Engine domain: configuration, errors, reports and device leases.

pub mod config;
pub mod error;
pub mod leases;
pub mod reports;
pub mod submission;

pub use config::{AppConfig, ConfigError, EngineConfig};
pub use error::EngineError;
pub use leases::{DeviceLease, DeviceLeases};
pub use reports::{ActiveWipe, AppStatus, OsReport, SystemInfo};
pub use submission::{WipeSubmission, LOCAL_REQUESTER};
