//! Per-device execution leases.
//!
//! At most one supervisor task per device. A second request is refused
//! rather than queued; the lease is released when its guard drops.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct DeviceLeases {
    held: Arc<DashMap<String, Uuid>>,
}

impl DeviceLeases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lease on `device_id` for `request_id`, or `None` if another
    /// request holds it.
    pub fn try_acquire(&self, device_id: &str, request_id: Uuid) -> Option<DeviceLease> {
        match self.held.entry(device_id.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(request_id);
                Some(DeviceLease {
                    held: Arc::clone(&self.held),
                    device_id: device_id.to_string(),
                    request_id,
                })
            }
        }
    }

    pub fn holder(&self, device_id: &str) -> Option<Uuid> {
        self.held.get(device_id).map(|r| *r.value())
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

/// Held while the executor runs.
#[derive(Debug)]
pub struct DeviceLease {
    held: Arc<DashMap<String, Uuid>>,
    device_id: String,
    request_id: Uuid,
}

impl DeviceLease {
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

impl Drop for DeviceLease {
    fn drop(&mut self) {
        self.held
            .remove_if(&self.device_id, |_, holder| *holder == self.request_id);
    }
}
