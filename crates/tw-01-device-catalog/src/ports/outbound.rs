//! Outbound Ports (Driven Ports)
//!
//! The platform capability that actually lists block devices.

use async_trait::async_trait;

use crate::domain::{CatalogError, RawDevice};

/// Reports every storage device the platform knows about, unfiltered.
#[async_trait]
pub trait DeviceEnumerator: Send + Sync {
    async fn enumerate(&self) -> Result<Vec<RawDevice>, CatalogError>;
}
