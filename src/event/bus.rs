use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use super::{
    events::EngineEvent,
    handler::{EventError, NotificationSink},
};

/// Broadcasts engine notifications to any number of subscribers
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    /// Creates a new event bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emits an event to all current subscribers
    pub fn emit(&self, event: EngineEvent) {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receiver_count) => {
                debug!(event_type, receivers = receiver_count, "Engine event emitted");
            }
            Err(_) => {
                debug!(event_type, "Engine event emitted with no receivers");
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl NotificationSink for EventBus {
    async fn notify(&self, event: EngineEvent) -> Result<(), EventError> {
        self.emit(event);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "EventBus"
    }
}
