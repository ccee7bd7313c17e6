//! Prompt, answer and decision types.

use shared_types::{WipeMethod, WipeRequest};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// What the operator is asked to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub request_id: Uuid,
    pub device_id: String,
    pub method: WipeMethod,
    pub summary: String,
}

impl From<&WipeRequest> for ConfirmationRequest {
    fn from(request: &WipeRequest) -> Self {
        Self {
            request_id: request.id,
            device_id: request.device_id.clone(),
            method: request.method,
            summary: request.summary(),
        }
    }
}

/// Raw answer from a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceResponse {
    Confirm,
    Decline,
    /// Window closed, input ended, reply channel dropped.
    Dismissed,
}

/// Why a request did not get confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    Declined,
    Dismissed,
    TimedOut,
    SurfaceError(String),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declined => f.write_str("declined by operator"),
            Self::Dismissed => f.write_str("prompt dismissed"),
            Self::TimedOut => f.write_str("no answer before timeout"),
            Self::SurfaceError(e) => write!(f, "confirmation surface failed: {e}"),
        }
    }
}

/// Gate verdict. Anything but an explicit confirm is `Cancelled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationDecision {
    Confirmed,
    Cancelled(CancelReason),
}

impl ConfirmationDecision {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Surface failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("Confirmation surface unavailable: {0}")]
    Unavailable(String),

    #[error("Confirmation I/O error: {0}")]
    Io(String),
}
