use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::{
    models::{reconcile, to_persisted, AchievementStates, PersistedAchievement},
    AchievementError,
};
use crate::storage::{KeyValueStore, StorageError, ACHIEVEMENTS_KEY};

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Loads states reconciled against the current catalog
    async fn load(&self) -> Result<AchievementStates, AchievementError>;
    async fn save(&self, states: &AchievementStates) -> Result<(), AchievementError>;
}

/// Stores achievement states as a JSON array under the `achievements` key
pub struct KeyValueAchievementRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueAchievementRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AchievementRepository for KeyValueAchievementRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<AchievementStates, AchievementError> {
        let persisted = match self.store.get(ACHIEVEMENTS_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<PersistedAchievement>>(&raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(error = %err, "Stored achievements are corrupt, starting from defaults");
                    Vec::new()
                }
            },
            None => {
                debug!("No stored achievements, starting from defaults");
                Vec::new()
            }
        };

        Ok(reconcile(&persisted))
    }

    #[instrument(skip(self, states))]
    async fn save(&self, states: &AchievementStates) -> Result<(), AchievementError> {
        let raw = serde_json::to_string(&to_persisted(states)).map_err(StorageError::from)?;
        self.store.set(ACHIEVEMENTS_KEY, raw).await?;
        Ok(())
    }
}
