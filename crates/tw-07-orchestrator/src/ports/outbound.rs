//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::Platform;

/// Read-only facts about the host the engine runs on.
#[async_trait]
pub trait HostProbe: Send + Sync {
    fn platform(&self) -> Platform;

    /// CPU architecture name (`x86_64`, `aarch64`, ...).
    fn arch(&self) -> String;

    /// Whether the process runs with root / Administrator rights. Any probe
    /// failure reports `false`.
    async fn is_elevated(&self) -> bool;
}
