//! In-memory enumerator for tests and demos.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{CatalogError, RawDevice};
use crate::ports::DeviceEnumerator;

/// Returns a preset answer on every call and counts the calls.
#[derive(Debug)]
pub struct StaticEnumerator {
    answer: Result<Vec<RawDevice>, CatalogError>,
    calls: AtomicUsize,
}

impl StaticEnumerator {
    pub fn new(devices: Vec<RawDevice>) -> Self {
        Self {
            answer: Ok(devices),
            calls: AtomicUsize::new(0),
        }
    }

    /// An enumerator whose every call fails.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            answer: Err(CatalogError::Enumeration(reason.into())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times [`DeviceEnumerator::enumerate`] ran.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DeviceEnumerator for StaticEnumerator {
    async fn enumerate(&self) -> Result<Vec<RawDevice>, CatalogError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.answer.clone()
    }
}
