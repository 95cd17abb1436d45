//! EventBus trait definition
//!
//! The controller publishes plugin events through this abstraction; any
//! number of subscribers (command executor, audio controller, other plugins)
//! listen on the other side.

use tokio::sync::broadcast;

use super::Envelope;

/// Sequence number for events (monotonically increasing)
pub type EventSeq = u64;

/// Event bus for publishing and subscribing to plugin events
///
/// Publishing is synchronous and fire-and-forget: the controller runs on
/// the UI thread and never waits on subscribers.
pub trait EventBus: Send + Sync {
    /// Publish an event, returns its sequence number
    fn publish(&self, envelope: Envelope) -> EventSeq;

    /// Subscribe to all events from now (live stream)
    fn subscribe(&self) -> broadcast::Receiver<(EventSeq, Envelope)>;

    /// Get retained events starting from a sequence number (for replay).
    ///
    /// Implementations may drop old events; replay is best effort.
    fn events_from(&self, seq: EventSeq) -> Vec<(EventSeq, Envelope)>;

    /// Current sequence number (high water mark)
    fn current_seq(&self) -> EventSeq;
}
