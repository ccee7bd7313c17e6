//! Domain layer for the device catalog.
//!
//! Pure filtering rules; no I/O.

pub mod errors;
pub mod raw;

pub use errors::CatalogError;
pub use raw::{filter_candidates, RawDevice};
