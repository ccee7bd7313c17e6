//! # Confirmation Gate
//!
//! **Component:** 4
//!
//! ## Purpose
//!
//! Puts every destructive request in front of a human and waits for an
//! explicit yes.
//!
//! ```text
//! ConfirmationPending ──prompt()──→ Confirm  ──→ Confirmed
//!                          │
//!                          ├──→ Decline / Dismissed ──→ Cancelled
//!                          ├──→ surface error ───────→ Cancelled
//!                          └──→ timeout ─────────────→ Cancelled
//! ```
//!
//! The gate is an `await` point: the orchestration task suspends while the
//! surface waits, nothing blocks a thread.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{ChannelSurface, FixedSurface, PendingConfirmation, TerminalSurface};
pub use domain::{
    CancelReason, ConfirmationConfig, ConfirmationDecision, ConfirmationError,
    ConfirmationRequest, SurfaceResponse,
};
pub use ports::ConfirmationSurface;
pub use service::ConfirmationGate;
