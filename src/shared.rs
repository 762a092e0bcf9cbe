use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

use crate::achievements::{AchievementService, KeyValueAchievementRepository};
use crate::config::EngineConfig;
use crate::event::NotificationSink;
use crate::game::{
    GameRoundCoordinator, GameSettings, QuestionRecord, QuestionSource, QuestionSourceError,
    RoundError,
};
use crate::stats::{KeyValueStatsRepository, StatsService};
use crate::storage::KeyValueStore;

/// Engine state shared by every game on this device
#[derive(Clone)]
pub struct EngineContext {
    pub config: EngineConfig,
    pub achievements: Arc<AchievementService>,
    pub stats: Arc<StatsService>,
}

impl EngineContext {
    /// Loads both persisted records from `store`. Missing or unreadable data
    /// starts from defaults.
    #[instrument(skip_all, fields(total_packs = config.total_packs_available))]
    pub async fn initialize(
        config: EngineConfig,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let achievements = Arc::new(
            AchievementService::builder(Arc::new(KeyValueAchievementRepository::new(
                store.clone(),
            )))
            .with_sink(sink)
            .with_total_packs_available(config.total_packs_available)
            .build()
            .await,
        );

        let stats = Arc::new(
            StatsService::load(
                Arc::new(KeyValueStatsRepository::new(store)),
                achievements.clone(),
            )
            .await,
        );

        info!("Engine initialized");
        Self {
            config,
            achievements,
            stats,
        }
    }

    pub fn new_game(
        &self,
        settings: GameSettings,
        questions: Vec<QuestionRecord>,
    ) -> Result<GameRoundCoordinator, EngineError> {
        Ok(GameRoundCoordinator::new(
            settings,
            questions,
            self.stats.clone(),
        )?)
    }

    /// Like [`EngineContext::new_game`], with questions pulled from the
    /// settings' pack. DaresONLY games skip the lookup.
    pub async fn new_game_from_source(
        &self,
        settings: GameSettings,
        source: &dyn QuestionSource,
    ) -> Result<GameRoundCoordinator, EngineError> {
        let questions = if settings.mode.has_trivia() {
            source.load_questions(&settings.pack_name).await?
        } else {
            Vec::new()
        };
        self.new_game(settings, questions)
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Question source error: {0}")]
    Questions(#[from] QuestionSourceError),

    #[error("Round error: {0}")]
    Round(#[from] RoundError),
}
