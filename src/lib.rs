// Library crate for the TriviaDare scoring and achievement engine
// This file exposes the public API for hosts and integration tests

pub mod achievements;
pub mod config;
pub mod event;
pub mod game;
pub mod scoring;
pub mod shared;
pub mod stats;
pub mod storage;

// Re-export commonly used types for easier access in tests
pub use achievements::{AchievementId, AchievementService};
pub use config::EngineConfig;
pub use event::{EngineEvent, EventBus, NotificationSink};
pub use game::{GameRoundCoordinator, GameSettings, MultiplayerSession};
pub use scoring::{TimerConfig, TimerPreset};
pub use shared::{EngineContext, EngineError};
pub use stats::{GameMode, GameStatistics, StatsService};
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
