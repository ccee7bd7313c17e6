//! # Device Catalog
//!
//! **Component:** 1
//!
//! ## Purpose
//!
//! Discovers storage devices and decides which of them may be offered as
//! wipe candidates.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | A `system` device is never a candidate | `domain/raw.rs` - `into_candidate()` |
//! | Records missing id, description or size are dropped | `domain/raw.rs` - `into_candidate()` |
//! | Never cached: each query re-enumerates | `service.rs` - `list_candidates()` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - LsblkEnumerator, StaticEnumerator                  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - DeviceCatalogApi                           │
//! │  ports/outbound.rs - DeviceEnumerator                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/raw.rs    - RawDevice, candidate filter                 │
//! │  domain/errors.rs - CatalogError                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Enumeration failure is not an error to callers of
//! [`DeviceCatalogApi::list_candidates`]: it is logged at `warn` and an
//! empty list is returned. "No usable drives" is logged at `info`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{LsblkEnumerator, StaticEnumerator};
pub use domain::{CatalogError, RawDevice};
pub use ports::{DeviceCatalogApi, DeviceEnumerator};
pub use service::DeviceCatalogService;
