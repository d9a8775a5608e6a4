//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{EventFilter, GuardEvent};
use crate::subscriber::Subscription;
use crate::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_HISTORY_CAPACITY};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Trait for publishing events to the bus.
///
/// Publishing is synchronous: guard operations run to completion without
/// suspension, and publishing happens after their state is committed.
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// # Returns
    ///
    /// The number of active subscribers that received the event.
    fn publish(&self, event: GuardEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-consumer fan-out and keeps a
/// bounded history of the most recent events so that an auditor attaching
/// late can still inspect what happened.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<GuardEvent>,

    /// Most recent events, oldest first.
    history: Mutex<VecDeque<GuardEvent>>,

    /// Maximum number of events kept in `history`.
    history_capacity: usize,

    /// Total events published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY, DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a new in-memory event bus with the given channel and history
    /// capacities.
    #[must_use]
    pub fn with_capacity(capacity: usize, history_capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            history: Mutex::new(VecDeque::with_capacity(history_capacity)),
            history_capacity,
            events_published: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the retained history matching `filter`, oldest first.
    #[must_use]
    pub fn recent_events(&self, filter: &EventFilter) -> Vec<GuardEvent> {
        self.history
            .lock()
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect()
    }

    /// Number of events currently retained.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }

    fn retain(&self, event: &GuardEvent) {
        if self.history_capacity == 0 {
            return;
        }
        let mut history = self.history.lock();
        while history.len() >= self.history_capacity {
            history.pop_front();
        }
        history.push_back(event.clone());
    }
}

impl std::fmt::Debug for InMemoryEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("capacity", &self.capacity)
            .field("history_capacity", &self.history_capacity)
            .field("history_len", &self.history_len())
            .field("events_published", &self.events_published())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: GuardEvent) -> usize {
        let topic = event.topic();
        let block_height = event.block_height();

        self.events_published.fetch_add(1, Ordering::Relaxed);
        self.retain(&event);

        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    topic = ?topic,
                    block_height,
                    receivers = receiver_count,
                    "Event published"
                );
                receiver_count
            }
            Err(_) => {
                // Still kept in history.
                trace!(topic = ?topic, block_height, "Event published with no live receivers");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
