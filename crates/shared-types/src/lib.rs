//! # Shared Types Crate
//!
//! This crate contains all domain entities exchanged between the TrustWipe
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Device, request, outcome and lifecycle types
//!   are defined here and nowhere else.
//! - **Secrets never serialize**: [`SecretString`] has no `Serialize` impl and
//!   prints as `***`; a [`WipeRequest`] only leaves the engine through its
//!   audit projection.
//! - **No cached topology**: a [`Device`] is a snapshot of one enumeration and
//!   carries no identity across queries.

pub mod entities;
pub mod errors;
pub mod format;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use format::format_bytes;
pub use security::SecretString;
