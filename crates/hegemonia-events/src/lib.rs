//! Synchronous publish/subscribe bus for the core's event records.
//!
//! The record types themselves live in `hegemonia-types` (they are part
//! of the shared contract); this crate owns delivery. Subscribers are
//! keyed by the closed [`EventType`] set, with an optional catch-all
//! list, and every delivery happens synchronously inside the tick that
//! produced the event. Subscriber order is registration order within a
//! key, typed subscribers before catch-alls, so delivery is
//! deterministic.

use std::collections::BTreeMap;
use std::fmt;

use hegemonia_types::{Event, EventType};
use tracing::trace;

/// A subscriber callback invoked synchronously for each delivered event.
pub type Subscriber = Box<dyn FnMut(&Event)>;

/// The event bus.
///
/// Delivery never fails and never filters: a publish reaches every
/// subscriber registered for the event's type plus every catch-all.
#[derive(Default)]
pub struct EventBus {
    by_type: BTreeMap<EventType, Vec<Subscriber>>,
    catch_all: Vec<Subscriber>,
    delivered: u64,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub const fn new() -> Self {
        Self {
            by_type: BTreeMap::new(),
            catch_all: Vec::new(),
            delivered: 0,
        }
    }

    /// Subscribe to one event type.
    pub fn subscribe(&mut self, event_type: EventType, subscriber: Subscriber) {
        self.by_type.entry(event_type).or_default().push(subscriber);
    }

    /// Subscribe to every event type.
    pub fn subscribe_all(&mut self, subscriber: Subscriber) {
        self.catch_all.push(subscriber);
    }

    /// Deliver one event to its subscribers.
    pub fn publish(&mut self, event: &Event) {
        trace!(tick = event.tick, event_type = ?event.event_type, "publishing event");
        if let Some(subscribers) = self.by_type.get_mut(&event.event_type) {
            for subscriber in subscribers.iter_mut() {
                subscriber(event);
                self.delivered = self.delivered.saturating_add(1);
            }
        }
        for subscriber in &mut self.catch_all {
            subscriber(event);
            self.delivered = self.delivered.saturating_add(1);
        }
    }

    /// Deliver a batch of events in order.
    pub fn publish_batch(&mut self, events: &[Event]) {
        for event in events {
            self.publish(event);
        }
    }

    /// Total deliveries made over the bus's lifetime.
    pub const fn deliveries(&self) -> u64 {
        self.delivered
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("typed_subscriber_keys", &self.by_type.len())
            .field("catch_all_subscribers", &self.catch_all.len())
            .field("delivered", &self.delivered)
            .finish()
    }
}
