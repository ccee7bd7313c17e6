//! Events yielded while an executor runs.

use shared_types::WipeOutcome;

/// One step of a supervised run. A run yields zero or more non-terminal
/// events and then exactly one [`SupervisorEvent::Finished`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorEvent {
    /// About to spawn the executor.
    Started { message: String },
    /// The OS accepted the spawn.
    Running { pid: Option<u32> },
    /// Spawn or wait failed at the OS level.
    ProcessError { message: String },
    /// Terminal.
    Finished(WipeOutcome),
}

impl SupervisorEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}
