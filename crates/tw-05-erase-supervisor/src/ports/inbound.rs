//! Inbound Ports (Driving Ports)

use shared_types::WipeRequest;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;

use crate::domain::SupervisorEvent;

/// Supervisor API (Driving Port). The orchestration engine is its only
/// caller, and only after confirmation and rate-limit admission.
pub trait EraseSupervisorApi: Send + Sync {
    /// Start a supervised run in the background.
    ///
    /// The returned stream yields progress events and ends with exactly one
    /// [`SupervisorEvent::Finished`].
    fn execute(self: Arc<Self>, request: WipeRequest) -> ReceiverStream<SupervisorEvent>;

    /// Processes actually spawned since construction.
    fn processes_spawned(&self) -> u64;
}
