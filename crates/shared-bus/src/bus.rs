//! # Status Bus
//!
//! Fan-out of wipe status events over a `tokio::sync::broadcast` channel.
//! Every observer gets its own receiver; a slow observer lags and loses the
//! oldest events instead of holding up the engine.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::events::{EventFilter, WipeEvent};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;

pub struct StatusBus {
    sender: broadcast::Sender<WipeEvent>,
    published: AtomicU64,
}

impl StatusBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering up to `capacity` events per observer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: AtomicU64::new(0),
        }
    }

    /// Hand `event` to every current observer. Returns how many there were.
    ///
    /// Never blocks. With no observers the event is dropped.
    pub fn publish(&self, event: WipeEvent) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        let request_id = event.request_id;
        let topic = event.topic();

        match self.sender.send(event) {
            Ok(observers) => {
                debug!(request_id = %request_id, topic = ?topic, observers, "Status event published");
                observers
            }
            Err(_) => {
                trace!(request_id = %request_id, topic = ?topic, "No observers for status event");
                0
            }
        }
    }

    /// Observe events matching `filter`, pulled one at a time.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(
            topics = ?filter.topics,
            requests = filter.request_ids.len(),
            devices = filter.device_ids.len(),
            "Status observer attached"
        );
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Observe events matching `filter` as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.sender.subscribe(), filter)
    }

    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Events published since construction, observed or not.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for StatusBus {
    fn default() -> Self {
        Self::new()
    }
}
