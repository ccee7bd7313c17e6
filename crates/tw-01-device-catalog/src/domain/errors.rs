//! Catalog error types.

use shared_types::ErrorKind;
use thiserror::Error;

/// Errors surfaced by the device catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No usable candidate carries this identifier.
    #[error("Drive not found: {0}")]
    NotFound(String),

    /// The enumeration capability failed (tool missing, bad output, ...).
    #[error("Device enumeration failed: {0}")]
    Enumeration(String),
}

impl CatalogError {
    /// Classification used in wipe outcomes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::DeviceNotFound,
            Self::Enumeration(_) => ErrorKind::Enumeration,
        }
    }
}
