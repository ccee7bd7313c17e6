//! Confirmation Gate Service
//!
//! Wraps a surface with a prompt timeout and collapses every answer that is
//! not an explicit confirm into `Cancelled`.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::domain::{
    CancelReason, ConfirmationConfig, ConfirmationDecision, ConfirmationRequest, SurfaceResponse,
};
use crate::ports::ConfirmationSurface;

pub struct ConfirmationGate {
    surface: Arc<dyn ConfirmationSurface>,
    prompt_timeout: Duration,
}

impl ConfirmationGate {
    pub fn new(surface: Arc<dyn ConfirmationSurface>, config: &ConfirmationConfig) -> Self {
        Self {
            surface,
            prompt_timeout: config.prompt_timeout(),
        }
    }

    pub fn prompt_timeout(&self) -> Duration {
        self.prompt_timeout
    }

    /// Ask the operator. Suspends until an answer, a failure or the timeout.
    pub async fn confirm(&self, request: &ConfirmationRequest) -> ConfirmationDecision {
        let answer = timeout(self.prompt_timeout, self.surface.prompt(request)).await;

        let decision = match answer {
            Ok(Ok(SurfaceResponse::Confirm)) => ConfirmationDecision::Confirmed,
            Ok(Ok(SurfaceResponse::Decline)) => {
                ConfirmationDecision::Cancelled(CancelReason::Declined)
            }
            Ok(Ok(SurfaceResponse::Dismissed)) => {
                ConfirmationDecision::Cancelled(CancelReason::Dismissed)
            }
            Ok(Err(e)) => {
                warn!(request_id = %request.request_id, error = %e, "Confirmation surface failed");
                ConfirmationDecision::Cancelled(CancelReason::SurfaceError(e.to_string()))
            }
            Err(_) => {
                warn!(
                    request_id = %request.request_id,
                    timeout_secs = self.prompt_timeout.as_secs(),
                    "Confirmation prompt timed out"
                );
                ConfirmationDecision::Cancelled(CancelReason::TimedOut)
            }
        };

        match &decision {
            ConfirmationDecision::Confirmed => {
                info!(request_id = %request.request_id, device = %request.device_id, "Wipe confirmed");
            }
            ConfirmationDecision::Cancelled(reason) => {
                info!(request_id = %request.request_id, device = %request.device_id, reason = %reason, "Wipe cancelled");
            }
        }
        decision
    }
}
