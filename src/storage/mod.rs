// Durable key-value collaborator
//
// The engine persists two logical records through this abstraction. How the
// host actually stores them (device storage, a file, a database row) is not
// the engine's concern.

pub use errors::StorageError;
pub use repository::{InMemoryKeyValueStore, KeyValueStore};

mod errors;
mod repository;

/// Storage key for the serialized achievement states
pub const ACHIEVEMENTS_KEY: &str = "achievements";

/// Storage key for the serialized cumulative game statistics
pub const GAME_STATS_KEY: &str = "gameStats";
