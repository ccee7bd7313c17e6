//! # Shared Bus
//!
//! Status events for wipe requests, and the bus that carries them to
//! observers other than the caller who started the wipe.
//!
//! ```text
//!   start_wipe() caller                 other observers
//!          ▲                          (GUI pane, status poller)
//!          │ per-request stream                 ▲
//!          │                                    │ subscribe(filter)
//!   ┌──────┴───────┐    publish()        ┌──────┴───────┐
//!   │ Orchestrator │ ──────────────────→ │  StatusBus   │
//!   └──────────────┘                     └──────────────┘
//! ```
//!
//! The engine writes every event to both paths. The request stream is
//! lossless; the bus is best effort and drops events for observers that
//! fall more than [`DEFAULT_CHANNEL_CAPACITY`] behind.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bus;
pub mod events;
pub mod subscriber;

pub use bus::StatusBus;
pub use events::{EventFilter, EventTopic, WipeEvent, WipeEventKind};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Events buffered per observer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
