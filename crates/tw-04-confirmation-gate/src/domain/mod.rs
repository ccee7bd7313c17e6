//! Confirmation domain types.

pub mod config;
pub mod types;

pub use config::ConfirmationConfig;
pub use types::{
    CancelReason, ConfirmationDecision, ConfirmationError, ConfirmationRequest, SurfaceResponse,
};
