//! Scripted surface for tests and unattended runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{ConfirmationError, ConfirmationRequest, SurfaceResponse};
use crate::ports::ConfirmationSurface;

#[derive(Debug, Clone)]
enum Script {
    Answer(SurfaceResponse),
    Fail(ConfirmationError),
    Silent,
}

/// Gives the same answer to every prompt and counts prompts.
#[derive(Debug)]
pub struct FixedSurface {
    script: Script,
    prompts: AtomicUsize,
}

impl FixedSurface {
    fn scripted(script: Script) -> Self {
        Self {
            script,
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn answering(response: SurfaceResponse) -> Self {
        Self::scripted(Script::Answer(response))
    }

    pub fn confirming() -> Self {
        Self::answering(SurfaceResponse::Confirm)
    }

    pub fn declining() -> Self {
        Self::answering(SurfaceResponse::Decline)
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::scripted(Script::Fail(ConfirmationError::Unavailable(reason.into())))
    }

    /// Never answers.
    pub fn silent() -> Self {
        Self::scripted(Script::Silent)
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ConfirmationSurface for FixedSurface {
    async fn prompt(
        &self,
        _request: &ConfirmationRequest,
    ) -> Result<SurfaceResponse, ConfirmationError> {
        self.prompts.fetch_add(1, Ordering::Relaxed);
        match &self.script {
            Script::Answer(response) => Ok(*response),
            Script::Fail(e) => Err(e.clone()),
            Script::Silent => std::future::pending().await,
        }
    }
}
