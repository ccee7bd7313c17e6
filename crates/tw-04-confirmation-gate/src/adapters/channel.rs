//! Request/reply surface over tokio channels.
//!
//! For front ends that own their own event loop (a GUI, a web console):
//! the front end drains [`PendingConfirmation`]s from the receiver and
//! answers each one. Dropping a pending confirmation without answering it
//! counts as a dismissal.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::domain::{ConfirmationError, ConfirmationRequest, SurfaceResponse};
use crate::ports::ConfirmationSurface;

/// A question waiting for an answer from the front end.
#[derive(Debug)]
pub struct PendingConfirmation {
    pub request: ConfirmationRequest,
    reply: oneshot::Sender<SurfaceResponse>,
}

impl PendingConfirmation {
    pub fn respond(self, response: SurfaceResponse) {
        // The gate may have timed out and gone away already.
        let _ = self.reply.send(response);
    }

    pub fn confirm(self) {
        self.respond(SurfaceResponse::Confirm);
    }

    pub fn decline(self) {
        self.respond(SurfaceResponse::Decline);
    }
}

#[derive(Debug, Clone)]
pub struct ChannelSurface {
    sender: mpsc::Sender<PendingConfirmation>,
}

impl ChannelSurface {
    /// Create the surface and the receiver the front end listens on.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<PendingConfirmation>) {
        let (sender, receiver) = mpsc::channel(buffer);
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl ConfirmationSurface for ChannelSurface {
    async fn prompt(
        &self,
        request: &ConfirmationRequest,
    ) -> Result<SurfaceResponse, ConfirmationError> {
        let (reply, answer) = oneshot::channel();
        self.sender
            .send(PendingConfirmation {
                request: request.clone(),
                reply,
            })
            .await
            .map_err(|_| ConfirmationError::Unavailable("no confirmation listener".into()))?;

        match answer.await {
            Ok(response) => Ok(response),
            Err(_) => {
                debug!(request_id = %request.request_id, "Confirmation dropped unanswered");
                Ok(SurfaceResponse::Dismissed)
            }
        }
    }
}
