use crate::types::CatalogEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// Fan-out of catalog change notifications.
///
/// Publishing never waits on subscribers. A subscriber that falls more than the
/// channel capacity behind skips the oldest events and sees a `Lagged` error.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CatalogEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns the number of subscribers the event was delivered to.
    pub fn publish(&self, event: CatalogEvent) -> usize {
        match self.sender.send(event) {
            Ok(count) => count,
            Err(broadcast::error::SendError(event)) => {
                trace!("no subscribers for {:?}", event.service_id());
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::constants::EVENT_BUS_CAPACITY)
    }
}
