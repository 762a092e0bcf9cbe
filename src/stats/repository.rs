use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::{GameStatistics, StatsError};
use crate::storage::{KeyValueStore, StorageError, GAME_STATS_KEY};

#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn load(&self) -> Result<GameStatistics, StatsError>;
    async fn save(&self, stats: &GameStatistics) -> Result<(), StatsError>;
}

/// Stores the statistics record as one JSON object under the `gameStats` key
pub struct KeyValueStatsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueStatsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StatsRepository for KeyValueStatsRepository {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<GameStatistics, StatsError> {
        let Some(raw) = self.store.get(GAME_STATS_KEY).await? else {
            debug!("No stored statistics, starting from zero");
            return Ok(GameStatistics::default());
        };

        match serde_json::from_str(&raw) {
            Ok(stats) => Ok(stats),
            Err(err) => {
                warn!(error = %err, "Stored statistics are corrupt, starting from zero");
                Ok(GameStatistics::default())
            }
        }
    }

    #[instrument(skip(self, stats))]
    async fn save(&self, stats: &GameStatistics) -> Result<(), StatsError> {
        let raw = serde_json::to_string(stats).map_err(StorageError::from)?;
        self.store.set(GAME_STATS_KEY, raw).await?;
        Ok(())
    }
}
