//! Change-notification feed
//!
//! Fan-out of store change events to every subscribed view. The store
//! itself has no push channel, so the client publishes an event after
//! each committed write; all subscribers on this feed see all events.

use tokio::sync::broadcast;
use uuid::Uuid;

/// Buffered events per subscriber before lag kicks in
const FEED_CAPACITY: usize = 64;

/// A change committed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The session directory gained an entry
    DirectoryChanged,
    /// A session's embedded document changed (segments or participants)
    SessionChanged(Uuid),
    /// A session was deleted and is no longer retrievable
    SessionRemoved(Uuid),
}

impl StoreEvent {
    /// Does this event concern the given session?
    pub fn concerns(&self, session_id: Uuid) -> bool {
        match self {
            StoreEvent::SessionChanged(id) | StoreEvent::SessionRemoved(id) => *id == session_id,
            StoreEvent::DirectoryChanged => false,
        }
    }
}

/// Broadcast handle for store events
pub struct ChangeFeed {
    tx: broadcast::Sender<StoreEvent>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to every subscriber. Nobody listening is fine.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_see_published_events() {
        let feed = ChangeFeed::new();
        let mut rx_a = feed.subscribe();
        let mut rx_b = feed.subscribe();

        let id = Uuid::new_v4();
        feed.publish(StoreEvent::SessionChanged(id));

        assert_eq!(rx_a.try_recv().unwrap(), StoreEvent::SessionChanged(id));
        assert_eq!(rx_b.try_recv().unwrap(), StoreEvent::SessionChanged(id));
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let feed = ChangeFeed::new();
        feed.publish(StoreEvent::DirectoryChanged);
    }

    #[test]
    fn test_late_subscribers_miss_earlier_events() {
        let feed = ChangeFeed::new();
        feed.publish(StoreEvent::DirectoryChanged);

        let mut rx = feed.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_concerns() {
        let id = Uuid::new_v4();
        assert!(StoreEvent::SessionChanged(id).concerns(id));
        assert!(StoreEvent::SessionRemoved(id).concerns(id));
        assert!(!StoreEvent::SessionChanged(id).concerns(Uuid::new_v4()));
        assert!(!StoreEvent::DirectoryChanged.concerns(id));
    }
}
