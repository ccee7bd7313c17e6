//! Inbound Ports (Driving Ports)
//!
//! The API the orchestration engine and the CLI use to discover devices.

use async_trait::async_trait;
use shared_types::Device;

use crate::domain::CatalogError;

/// Device catalog API (Driving Port).
#[async_trait]
pub trait DeviceCatalogApi: Send + Sync {
    /// Enumerate and filter wipe candidates.
    ///
    /// Never fails: an enumeration failure yields an empty list. Every call
    /// re-queries the platform.
    async fn list_candidates(&self) -> Vec<Device>;

    /// Exact-match lookup among the candidates of a fresh enumeration.
    ///
    /// # Errors
    /// - `NotFound`: no candidate carries `device_id`
    async fn get_details(&self, device_id: &str) -> Result<Device, CatalogError>;
}
