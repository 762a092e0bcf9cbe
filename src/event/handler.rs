use async_trait::async_trait;
use thiserror::Error;

use super::events::EngineEvent;

/// Errors a sink can report when it fails to surface a notification
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// Trait for whatever displays engine notifications (toast, vibration, badge)
///
/// Delivery is best-effort: the engine logs a failed delivery and moves on,
/// the underlying state change is already saved.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: EngineEvent) -> Result<(), EventError>;

    /// Get a human-readable name for this sink (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// A sink that drops every notification
pub struct NoOpNotificationSink;

#[async_trait]
impl NotificationSink for NoOpNotificationSink {
    async fn notify(&self, _event: EngineEvent) -> Result<(), EventError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NoOpNotificationSink"
    }
}
