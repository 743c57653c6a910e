use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::StudioEvent;

/// In-process event bus backed by `tokio::broadcast`. Single-node.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<StudioEvent>>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers. Publishing with nobody
    /// listening is normal here (the admin UI may simply not be connected),
    /// so there is no error to propagate.
    pub fn publish(&self, event: StudioEvent) {
        match self.sender.send(event) {
            Ok(receivers) => tracing::debug!(receivers, "event published"),
            Err(_) => tracing::debug!("event dropped, no subscribers"),
        }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(StudioEvent::Welcome);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, StudioEvent::Welcome));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(StudioEvent::Reconnect);

        assert!(matches!(rx1.recv().await.unwrap(), StudioEvent::Reconnect));
        assert!(matches!(rx2.recv().await.unwrap(), StudioEvent::Reconnect));
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new(16);
        bus.publish(StudioEvent::Welcome);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
