//! Device Catalog Service
//!
//! Implements [`DeviceCatalogApi`] on top of an injected enumerator.

use async_trait::async_trait;
use shared_types::Device;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{filter_candidates, CatalogError};
use crate::ports::{DeviceCatalogApi, DeviceEnumerator};

/// Device catalog service.
pub struct DeviceCatalogService<E: DeviceEnumerator> {
    enumerator: Arc<E>,
}

impl<E: DeviceEnumerator> DeviceCatalogService<E> {
    pub fn new(enumerator: Arc<E>) -> Self {
        Self { enumerator }
    }

    /// Access the underlying enumerator.
    pub fn enumerator(&self) -> &Arc<E> {
        &self.enumerator
    }
}

#[async_trait]
impl<E: DeviceEnumerator + 'static> DeviceCatalogApi for DeviceCatalogService<E> {
    async fn list_candidates(&self) -> Vec<Device> {
        let raw = match self.enumerator.enumerate().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Device enumeration failed");
                return Vec::new();
            }
        };

        let total = raw.len();
        let candidates = filter_candidates(raw);
        if candidates.is_empty() {
            info!(reported = total, "No usable drives found");
        } else {
            debug!(
                reported = total,
                candidates = candidates.len(),
                "Device catalog refreshed"
            );
        }
        candidates
    }

    async fn get_details(&self, device_id: &str) -> Result<Device, CatalogError> {
        self.list_candidates()
            .await
            .into_iter()
            .find(|d| d.id == device_id)
            .ok_or_else(|| CatalogError::NotFound(device_id.to_string()))
    }
}
