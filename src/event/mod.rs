// Notification plumbing
//
// The engine reports achievement unlocks and acknowledgements through a
// NotificationSink. How they are displayed is up to the host.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::EngineEvent;
pub use handler::{EventError, NoOpNotificationSink, NotificationSink};

// Internal modules
mod bus;
mod events;
mod handler;
