//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_bus::{EventFilter, Subscription, WipeEvent};
use shared_types::Device;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;

use crate::domain::{
    ActiveWipe, AppStatus, EngineError, OsReport, SystemInfo, WipeSubmission,
};

/// Everything a shell (CLI, GUI bridge) may ask of the engine.
#[async_trait]
pub trait WipeEngineApi: Send + Sync {
    /// Current wipe candidates. Never fails; enumeration problems yield an
    /// empty list.
    async fn get_drives(&self) -> Vec<Device>;

    /// One candidate by exact id, from a fresh enumeration.
    async fn get_drive_details(&self, device_id: &str) -> Result<Device, EngineError>;

    fn check_os(&self) -> OsReport;

    async fn get_system_info(&self) -> SystemInfo;

    fn get_app_status(&self) -> AppStatus;

    /// Begin a wipe. Returns at once; the lifecycle runs in the background
    /// and the stream ends after exactly one `Completed` event.
    fn start_wipe(self: Arc<Self>, submission: WipeSubmission) -> ReceiverStream<WipeEvent>;

    /// Requests that have not reached a terminal state.
    fn active_wipes(&self) -> Vec<ActiveWipe>;

    /// Follow status events of every request on the shared bus.
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}
