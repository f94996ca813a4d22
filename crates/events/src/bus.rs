//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`SyncEvent`]s. The sync
//! coordinator publishes one event per finished run; subscribers (a UI
//! notifier, a cache invalidator) are optional and the coordinator works
//! the same with zero of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use pressroom_core::sync::SyncDirection;
use pressroom_core::types::DbId;

// ---------------------------------------------------------------------------
// SyncEvent
// ---------------------------------------------------------------------------

/// Event type for a run that finished with `completed`.
pub const SYNC_COMPLETED: &str = "sync.completed";

/// Event type for a run that finished with `failed`.
pub const SYNC_FAILED: &str = "sync.failed";

/// A finished sync run, as broadcast to observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEvent {
    /// `"sync.completed"` or `"sync.failed"`.
    pub event_type: String,

    /// The blog the run belonged to.
    pub blog_id: DbId,

    /// Which way the run moved data.
    pub direction: SyncDirection,

    /// Free-form payload (counts, error details) matching the log entry.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl SyncEvent {
    /// Create an event for a finished run.
    pub fn new(
        event_type: impl Into<String>,
        blog_id: DbId,
        direction: SyncDirection,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            blog_id,
            direction,
            payload,
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently receive every published [`SyncEvent`].
pub struct EventBus {
    sender: broadcast::Sender<SyncEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero receivers the event is silently dropped; the sync log row
    /// is the durable record, not the bus.
    pub fn publish(&self, event: SyncEvent) {
        let _ = self.sender.send(event);
    }

    /// Open a new subscription receiving every event published after this
    /// call.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(SyncEvent::new(
            SYNC_COMPLETED,
            1,
            SyncDirection::StoreToWp,
            serde_json::json!({ "posts_synced": 3 }),
        ));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, SYNC_COMPLETED);
        assert_eq!(event.blog_id, 1);
        assert_eq!(event.payload["posts_synced"], 3);
    }

    #[test]
    fn publish_without_subscribers_is_a_noop() {
        let bus = EventBus::default();
        bus.publish(SyncEvent::new(
            SYNC_FAILED,
            2,
            SyncDirection::WpToStore,
            serde_json::json!({}),
        ));
    }
}
