use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, instrument, warn};

use super::{
    models::{GameMode, GameStatistics, TrackingReport},
    repository::StatsRepository,
    StatsError,
};
use crate::achievements::AchievementService;

/// Owns the cumulative statistics record and its tracking events
///
/// Each tracking call is one atomic unit under a single lock: mutate a copy,
/// persist it, commit it in memory, then run exactly one achievement pass.
/// A failed write leaves the in-memory record untouched.
pub struct StatsService {
    repository: Arc<dyn StatsRepository>,
    achievements: Arc<AchievementService>,
    stats: AsyncMutex<GameStatistics>,
}

impl StatsService {
    /// Loads the persisted record. A failed read starts from zero so the game
    /// can still run.
    pub async fn load(
        repository: Arc<dyn StatsRepository>,
        achievements: Arc<AchievementService>,
    ) -> Self {
        let stats = match repository.load().await {
            Ok(stats) => stats,
            Err(err) => {
                error!(error = %err, "Failed to load statistics, starting from zero");
                GameStatistics::default()
            }
        };

        Self {
            repository,
            achievements,
            stats: AsyncMutex::new(stats),
        }
    }

    pub async fn stats(&self) -> GameStatistics {
        self.stats.lock().await.clone()
    }

    pub fn achievements(&self) -> &Arc<AchievementService> {
        &self.achievements
    }

    #[instrument(skip(self, players), fields(player_count = players.len()))]
    pub async fn track_game_start(
        &self,
        players: &[String],
        game_mode: GameMode,
        pack_name: &str,
    ) -> Result<TrackingReport, StatsError> {
        info!(%game_mode, pack_name, "Game started");
        self.apply("game_start", |stats| stats.record_game_start(pack_name))
            .await
    }

    #[instrument(skip(self))]
    pub async fn track_correct_answer(
        &self,
        answer_time_ms: u64,
    ) -> Result<TrackingReport, StatsError> {
        self.apply("correct_answer", |stats| {
            stats.record_correct_answer(answer_time_ms)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn track_incorrect_answer(&self) -> Result<TrackingReport, StatsError> {
        self.apply("incorrect_answer", GameStatistics::record_incorrect_answer)
            .await
    }

    #[instrument(skip(self))]
    pub async fn track_game_complete(
        &self,
        game_mode: GameMode,
    ) -> Result<TrackingReport, StatsError> {
        self.apply("game_complete", |stats| stats.record_game_complete(game_mode))
            .await
    }

    #[instrument(skip(self))]
    pub async fn track_dare_completed(
        &self,
        completion_time_ms: Option<u64>,
    ) -> Result<TrackingReport, StatsError> {
        self.apply("dare_completed", |stats| {
            stats.record_dare_completed(completion_time_ms)
        })
        .await
    }

    /// Adding an owned pack again changes nothing but still runs the pass
    #[instrument(skip(self))]
    pub async fn track_pack_purchase(&self, pack_id: &str) -> Result<TrackingReport, StatsError> {
        if pack_id.trim().is_empty() {
            return Err(StatsError::Validation(
                "Pack id cannot be empty".to_string(),
            ));
        }

        self.apply("pack_purchase", |stats| {
            if !stats.record_pack_purchase(pack_id) {
                debug!(pack_id, "Pack already owned");
            }
        })
        .await
    }

    /// Zeroes every counter. Unlocked achievements are kept.
    #[instrument(skip(self))]
    pub async fn reset_all_stats(&self) -> Result<GameStatistics, StatsError> {
        let mut stats = self.stats.lock().await;

        let next = GameStatistics::default();
        self.repository.save(&next).await.inspect_err(|err| {
            error!(error = %err, "Failed to persist statistics reset");
        })?;
        *stats = next.clone();

        info!("Statistics reset");
        Ok(next)
    }

    async fn apply<F>(
        &self,
        operation: &'static str,
        mutate: F,
    ) -> Result<TrackingReport, StatsError>
    where
        F: FnOnce(&mut GameStatistics),
    {
        let mut stats = self.stats.lock().await;

        let mut next = stats.clone();
        mutate(&mut next);

        self.repository.save(&next).await.inspect_err(|err| {
            error!(operation, error = %err, "Failed to persist statistics");
        })?;
        *stats = next.clone();

        // Kept under the stats lock so passes run in the same order as the
        // mutations they observe.
        let newly_unlocked = match self.achievements.evaluate(&next).await {
            Ok(unlocked) => unlocked,
            Err(err) => {
                warn!(operation, error = %err, "Achievement pass failed, will retry on next event");
                Vec::new()
            }
        };

        debug!(
            operation,
            newly_unlocked = newly_unlocked.len(),
            "Statistics updated"
        );

        Ok(TrackingReport {
            stats: next,
            newly_unlocked,
        })
    }
}
