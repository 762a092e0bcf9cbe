use serde::{Deserialize, Serialize};

/// Notifications the engine emits for the presentation layer
///
/// Events represent facts that have already been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// An achievement's predicate newly held and the unlock was saved
    AchievementUnlocked {
        achievement_id: String,
        title: String,
    },

    /// The player has seen an unlocked achievement
    AchievementAcknowledged {
        achievement_id: String,
        title: String,
    },
}

impl EngineEvent {
    pub fn achievement_id(&self) -> &str {
        match self {
            EngineEvent::AchievementUnlocked { achievement_id, .. } => achievement_id,
            EngineEvent::AchievementAcknowledged { achievement_id, .. } => achievement_id,
        }
    }

    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::AchievementUnlocked { .. } => "achievement_unlocked",
            EngineEvent::AchievementAcknowledged { .. } => "achievement_acknowledged",
        }
    }
}
