use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::debug;

use super::catalog::{AchievementDefinition, AchievementId};

/// Mutable unlock progress for one catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementState {
    pub unlocked: bool,
    pub unlocked_date: Option<DateTime<Utc>>,
    pub acknowledged: bool,
}

impl AchievementState {
    /// Flips to unlocked and stamps the date. Returns false if already unlocked.
    pub fn unlock(&mut self, at: DateTime<Utc>) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        self.unlocked_date = Some(at);
        self.acknowledged = false;
        true
    }

    /// Only valid on an unlocked, unread achievement
    pub fn acknowledge(&mut self) -> bool {
        if !self.unlocked || self.acknowledged {
            return false;
        }
        self.acknowledged = true;
        true
    }

    pub fn is_unread(&self) -> bool {
        self.unlocked && !self.acknowledged
    }

    /// Folds a second record for the same id into this one. An unlock on
    /// either side wins and the earliest unlock date is kept.
    fn merge(&mut self, other: &AchievementState) {
        self.unlocked |= other.unlocked;
        self.acknowledged |= other.acknowledged;
        self.unlocked_date = match (self.unlocked_date, other.unlocked_date) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        if !self.unlocked {
            self.acknowledged = false;
            self.unlocked_date = None;
        }
    }
}

/// Per-id state for the whole catalog, ordered like the catalog
pub type AchievementStates = BTreeMap<AchievementId, AchievementState>;

/// A catalog entry joined with its current state, for display
#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub definition: &'static AchievementDefinition,
    pub state: AchievementState,
}

/// Wire form of one entry under the `achievements` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedAchievement {
    pub id: String,
    #[serde(flatten)]
    pub state: AchievementState,
}

/// Unlock/read counts for a progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementProgress {
    pub unlocked: usize,
    pub total: usize,
}

/// All-default states for every catalog entry
pub fn default_states() -> AchievementStates {
    AchievementId::iter()
        .map(|id| (id, AchievementState::default()))
        .collect()
}

/// Builds the in-memory states from whatever was persisted.
///
/// Every catalog entry is present in the result. Persisted fields override the
/// defaults only for ids the catalog still knows; entries added in a newer
/// release start locked, and ids retired from the catalog are dropped.
/// Duplicate records for one id are merged, never downgrading an unlock.
pub fn reconcile(persisted: &[PersistedAchievement]) -> AchievementStates {
    let mut states = default_states();

    for record in persisted {
        match AchievementId::try_from(record.id.as_str()) {
            Ok(id) => states.entry(id).or_default().merge(&record.state),
            Err(unknown) => {
                debug!(
                    achievement_id = %unknown,
                    "Dropping persisted achievement not in catalog"
                );
            }
        }
    }

    states
}

pub fn to_persisted(states: &AchievementStates) -> Vec<PersistedAchievement> {
    states
        .iter()
        .map(|(id, state)| PersistedAchievement {
            id: id.as_str().to_string(),
            state: state.clone(),
        })
        .collect()
}
