//! Observer handles for the [`StatusBus`](crate::StatusBus).

use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::debug;

use crate::events::{EventFilter, WipeEvent};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Status bus closed")]
    Closed,
}

/// Pull-style observer. Events that do not match the filter are skipped.
pub struct Subscription {
    receiver: broadcast::Receiver<WipeEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<WipeEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Wait for the next matching event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<WipeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    debug!(missed, "Status observer fell behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event if one is already queued.
    pub fn try_recv(&mut self) -> Result<Option<WipeEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

/// Push-style observer: a filtered `Stream` of events.
pub struct EventStream {
    inner: BroadcastStream<WipeEvent>,
    filter: EventFilter,
}

impl EventStream {
    pub(crate) fn new(receiver: broadcast::Receiver<WipeEvent>, filter: EventFilter) -> Self {
        Self {
            inner: BroadcastStream::new(receiver),
            filter,
        }
    }
}

impl Stream for EventStream {
    type Item = WipeEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) if self.filter.matches(&event) => {
                    return Poll::Ready(Some(event));
                }
                Poll::Ready(Some(Ok(_))) => {}
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(missed)))) => {
                    debug!(missed, "Status stream fell behind");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::StatusBus;
    use crate::events::{EventTopic, WipeEventKind};
    use shared_types::{OutcomeStatus, WipeOutcome, WipeState};
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;
    use uuid::Uuid;

    fn executing(request_id: Uuid) -> WipeEvent {
        WipeEvent::new(
            request_id,
            "/dev/sdz",
            WipeEventKind::StateChanged {
                state: WipeState::Executing,
            },
            "Executing wipe",
        )
    }

    fn succeeded(request_id: Uuid) -> WipeEvent {
        WipeEvent::completed(
            "/dev/sdz",
            WipeOutcome::new(request_id, OutcomeStatus::Succeeded, "Wipe completed: ok"),
        )
    }

    #[tokio::test]
    async fn test_outcome_observer_skips_transitions() {
        let bus = StatusBus::new();
        let mut outcomes = bus.subscribe(EventFilter::topics(vec![EventTopic::Outcome]));

        let id = Uuid::new_v4();
        bus.publish(executing(id));
        bus.publish(succeeded(id));

        let event = timeout(Duration::from_millis(100), outcomes.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(event.outcome().map(|o| o.status), Some(OutcomeStatus::Succeeded));
        assert!(matches!(outcomes.try_recv(), Ok(None)));
    }

    #[test]
    fn test_dropped_subscription_detaches() {
        let bus = StatusBus::new();
        let sub = bus.subscribe(EventFilter::all());
        assert_eq!(bus.observer_count(), 1);
        drop(sub);
        assert_eq!(bus.observer_count(), 0);
    }

    #[test]
    fn test_try_recv_after_bus_dropped() {
        let bus = StatusBus::new();
        let mut sub = bus.subscribe(EventFilter::all());
        drop(bus);
        assert_eq!(sub.try_recv().unwrap_err(), SubscriptionError::Closed);
    }

    #[tokio::test]
    async fn test_stream_follows_one_request() {
        let bus = StatusBus::new();
        let wanted = Uuid::new_v4();
        let mut stream = bus.event_stream(EventFilter::request(wanted));

        bus.publish(executing(Uuid::new_v4()));
        bus.publish(executing(wanted));
        bus.publish(succeeded(wanted));
        drop(bus);

        let seen: Vec<WipeEvent> = timeout(Duration::from_millis(100), stream.collect())
            .await
            .expect("timeout");
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|e| e.request_id == wanted));
        assert!(seen[1].is_terminal());
    }
}
