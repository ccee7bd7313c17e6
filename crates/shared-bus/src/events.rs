//! # Wipe Events
//!
//! Defines all status events that flow through the shared bus and through
//! the per-request stream handed back by `start_wipe`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{WipeOutcome, WipeState};
use uuid::Uuid;

/// One status notification about one wipe request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WipeEvent {
    pub request_id: Uuid,
    pub device_id: String,
    pub kind: WipeEventKind,
    /// Human-readable status line for the caller.
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WipeEventKind {
    // =========================================================================
    // ORCHESTRATION ENGINE
    // =========================================================================
    /// The request moved to a new lifecycle state.
    StateChanged { state: WipeState },

    // =========================================================================
    // ERASE SUPERVISOR
    // =========================================================================
    /// The executor is about to be spawned ("started"-class status).
    ProcessScheduled,

    /// The OS reported the process running.
    ProcessRunning { pid: Option<u32> },

    /// Spawn or wait failed at the OS level.
    ProcessError,

    // =========================================================================
    // TERMINAL
    // =========================================================================
    /// Exactly one per request, always last.
    Completed { outcome: WipeOutcome },
}

impl WipeEvent {
    pub fn new(
        request_id: Uuid,
        device_id: impl Into<String>,
        kind: WipeEventKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            request_id,
            device_id: device_id.into(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Terminal event carrying the outcome. The outcome message doubles as
    /// the status line.
    pub fn completed(device_id: impl Into<String>, outcome: WipeOutcome) -> Self {
        let message = outcome.message.clone();
        Self::new(
            outcome.request_id,
            device_id,
            WipeEventKind::Completed { outcome },
            message,
        )
    }

    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self.kind {
            WipeEventKind::StateChanged { .. } => EventTopic::Lifecycle,
            WipeEventKind::ProcessScheduled
            | WipeEventKind::ProcessRunning { .. }
            | WipeEventKind::ProcessError => EventTopic::Process,
            WipeEventKind::Completed { .. } => EventTopic::Outcome,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, WipeEventKind::Completed { .. })
    }

    /// The outcome, if this is the terminal event.
    pub fn outcome(&self) -> Option<&WipeOutcome> {
        match &self.kind {
            WipeEventKind::Completed { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// The state, if this is a transition event.
    pub fn state(&self) -> Option<WipeState> {
        match self.kind {
            WipeEventKind::StateChanged { state } => Some(state),
            _ => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// State machine transitions.
    Lifecycle,
    /// Executor process milestones.
    Process,
    /// Terminal outcomes.
    Outcome,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Requests to include. Empty means all requests.
    pub request_ids: Vec<Uuid>,
    /// Devices to include. Empty means all devices.
    pub device_ids: Vec<String>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// Create a filter for a single request.
    #[must_use]
    pub fn request(request_id: Uuid) -> Self {
        Self {
            request_ids: vec![request_id],
            ..Self::default()
        }
    }

    /// Create a filter for a single device.
    #[must_use]
    pub fn device(device_id: impl Into<String>) -> Self {
        Self {
            device_ids: vec![device_id.into()],
            ..Self::default()
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &WipeEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let request_match =
            self.request_ids.is_empty() || self.request_ids.contains(&event.request_id);

        let device_match =
            self.device_ids.is_empty() || self.device_ids.iter().any(|d| *d == event.device_id);

        topic_match && request_match && device_match
    }
}
