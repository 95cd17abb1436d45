//! In-memory EventBus implementation
//!
//! MemoryEventBus keeps a bounded window of recent events for replay and
//! uses a broadcast channel for live subscribers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use tokio::sync::broadcast;

use super::Envelope;
use super::bus::{EventBus, EventSeq};

/// Number of events kept for replay by [`MemoryEventBus::new`]
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// In-memory implementation of EventBus
///
/// Keeps the most recent events for replay (oldest dropped first) and a
/// broadcast channel for live subscribers. Thread-safe via RwLock and atomics.
pub struct MemoryEventBus {
    /// Recent events with sequence numbers, oldest first
    events: RwLock<VecDeque<(EventSeq, Envelope)>>,
    /// Maximum number of events kept in `events`
    history_limit: usize,
    /// Next sequence number to assign
    next_seq: AtomicU64,
    /// Broadcast channel for live subscribers
    tx: broadcast::Sender<(EventSeq, Envelope)>,
}

impl MemoryEventBus {
    /// Create a new MemoryEventBus with the given broadcast channel capacity
    pub fn new(capacity: usize) -> Self {
        Self::with_history_limit(capacity, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a bus that keeps at most `history_limit` events for replay
    pub fn with_history_limit(capacity: usize, history_limit: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            events: RwLock::new(VecDeque::new()),
            history_limit,
            next_seq: AtomicU64::new(0),
            tx,
        }
    }
}

impl Default for MemoryEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus for MemoryEventBus {
    fn publish(&self, envelope: Envelope) -> EventSeq {
        // Hold the write lock across seq assignment so history stays ordered
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);

        tracing::trace!(seq, event = envelope.name(), "Publishing event");
        if self.history_limit > 0 {
            if events.len() == self.history_limit {
                events.pop_front();
            }
            events.push_back((seq, envelope.clone()));
        }
        drop(events);

        // Broadcast to live subscribers (ignore if no receivers)
        let _ = self.tx.send((seq, envelope));

        seq
    }

    fn subscribe(&self) -> broadcast::Receiver<(EventSeq, Envelope)> {
        self.tx.subscribe()
    }

    fn events_from(&self, seq: EventSeq) -> Vec<(EventSeq, Envelope)> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(s, _)| *s >= seq)
            .cloned()
            .collect()
    }

    fn current_seq(&self) -> EventSeq {
        self.next_seq.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PluginEvent;

    fn enable(id: &str) -> Envelope {
        Envelope::new(PluginEvent::Enable {
            value: id.to_string(),
        })
    }

    // ==================== Publish Tests ====================

    #[test]
    fn publish_returns_sequence_number() {
        let bus = MemoryEventBus::new(100);
        assert_eq!(bus.publish(enable("a")), 0);
    }

    #[test]
    fn publish_increments_sequence_number() {
        let bus = MemoryEventBus::new(100);

        assert_eq!(bus.publish(enable("a")), 0);
        assert_eq!(bus.publish(enable("b")), 1);
        assert_eq!(bus.publish(enable("c")), 2);
        assert_eq!(bus.current_seq(), 3);
    }

    // ==================== Subscribe Tests ====================

    #[tokio::test]
    async fn subscribe_receives_new_events() {
        let bus = MemoryEventBus::new(100);
        let mut rx = bus.subscribe();

        bus.publish(enable("audio_input"));

        let (seq, envelope) = rx.recv().await.unwrap();
        assert_eq!(seq, 0);
        assert_eq!(envelope.event.plugin_id(), Some("audio_input"));
    }

    #[test]
    fn subscribe_receives_events_in_order() {
        let bus = MemoryEventBus::new(100);
        let mut rx = bus.subscribe();

        bus.publish(enable("a"));
        bus.publish(enable("b"));

        let (seq1, _) = rx.try_recv().unwrap();
        let (seq2, _) = rx.try_recv().unwrap();
        assert_eq!(seq1, 0);
        assert_eq!(seq2, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_still_records() {
        let bus = MemoryEventBus::new(4);
        bus.publish(enable("a"));
        assert_eq!(bus.events_from(0).len(), 1);
    }

    // ==================== Events From Tests ====================

    #[test]
    fn events_from_returns_events_starting_at_seq() {
        let bus = MemoryEventBus::new(100);
        bus.publish(enable("a"));
        bus.publish(enable("b"));
        bus.publish(enable("c"));

        let events = bus.events_from(1);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, 1);
        assert_eq!(events[1].0, 2);
    }

    #[test]
    fn events_from_beyond_current_returns_empty() {
        let bus = MemoryEventBus::new(100);
        bus.publish(enable("a"));
        assert!(bus.events_from(100).is_empty());
    }

    // ==================== History Limit Tests ====================

    #[test]
    fn history_drops_oldest_events() {
        let bus = MemoryEventBus::with_history_limit(16, 2);

        bus.publish(enable("a"));
        bus.publish(enable("b"));
        bus.publish(enable("c"));

        let seqs: Vec<_> = bus.events_from(0).iter().map(|(s, _)| *s).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(bus.current_seq(), 3);
    }

    #[tokio::test]
    async fn zero_history_still_broadcasts() {
        let bus = MemoryEventBus::with_history_limit(16, 0);
        let mut rx = bus.subscribe();

        bus.publish(enable("a"));

        assert!(bus.events_from(0).is_empty());
        let (seq, _) = rx.recv().await.unwrap();
        assert_eq!(seq, 0);
    }
}
