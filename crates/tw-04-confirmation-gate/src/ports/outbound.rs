//! Outbound Ports (Driven Ports)

use async_trait::async_trait;

use crate::domain::{ConfirmationError, ConfirmationRequest, SurfaceResponse};

/// Something that can put a question in front of a human and await the
/// answer: a terminal, a GUI dialog, a remote console.
#[async_trait]
pub trait ConfirmationSurface: Send + Sync {
    async fn prompt(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<SurfaceResponse, ConfirmationError>;
}
