//! Raw enumeration records and the candidate filter.
//!
//! Enumeration tools report partial data: a record may lack a path, a
//! model string or a size. Only complete, non-system records become
//! [`Device`] candidates.

use shared_types::{Device, DeviceFlags};
use std::collections::BTreeSet;

/// One record as reported by a [`DeviceEnumerator`](crate::ports::DeviceEnumerator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDevice {
    pub id: Option<String>,
    pub description: Option<String>,
    /// Signed so that bogus negative sizes from a tool are representable
    /// and rejected rather than wrapped.
    pub size_bytes: Option<i64>,
    pub mount_points: Vec<String>,
    pub flags: DeviceFlags,
}

impl RawDevice {
    /// Convert into a wipe candidate, or `None` when the record is unusable.
    pub fn into_candidate(self) -> Option<Device> {
        if self.flags.system {
            return None;
        }
        let id = self.id.filter(|s| !s.trim().is_empty())?;
        let description = self.description.filter(|s| !s.trim().is_empty())?;
        let size_bytes = match self.size_bytes {
            Some(size) if size > 0 => size as u64,
            _ => return None,
        };

        Some(Device {
            id,
            description,
            size_bytes,
            mount_points: self.mount_points.into_iter().collect::<BTreeSet<_>>(),
            flags: self.flags,
        })
    }
}

/// Keep only the records that may be offered for wiping.
pub fn filter_candidates(raw: Vec<RawDevice>) -> Vec<Device> {
    raw.into_iter().filter_map(RawDevice::into_candidate).collect()
}
