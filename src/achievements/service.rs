use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{error, info, instrument, warn};

use super::{
    catalog::AchievementId,
    models::{default_states, Achievement, AchievementProgress, AchievementStates},
    repository::AchievementRepository,
    rules::AchievementRuleEngine,
    AchievementError,
};
use crate::event::{EngineEvent, NoOpNotificationSink, NotificationSink};
use crate::stats::GameStatistics;

/// Owns the unlock state of every catalog entry
///
/// All mutations run under one lock and are committed in memory only after
/// the repository accepted them.
pub struct AchievementService {
    repository: Arc<dyn AchievementRepository>,
    engine: AchievementRuleEngine,
    sink: Arc<dyn NotificationSink>,
    states: AsyncMutex<AchievementStates>,
}

impl AchievementService {
    pub fn builder(repository: Arc<dyn AchievementRepository>) -> AchievementServiceBuilder {
        AchievementServiceBuilder::new(repository)
    }

    /// Runs the rule table against `stats` and unlocks whatever newly holds.
    ///
    /// Returns the unlocked ids in catalog order with `Completionist` last.
    /// Running it again on unchanged statistics returns nothing.
    #[instrument(skip(self, stats))]
    pub async fn evaluate(
        &self,
        stats: &GameStatistics,
    ) -> Result<Vec<AchievementId>, AchievementError> {
        let mut states = self.states.lock().await;

        let newly_unlocked = self.engine.evaluate(stats, &states);
        if newly_unlocked.is_empty() {
            return Ok(newly_unlocked);
        }

        let now = Utc::now();
        let mut next = states.clone();
        for id in &newly_unlocked {
            next.entry(*id).or_default().unlock(now);
        }

        self.repository.save(&next).await.inspect_err(|err| {
            error!(error = %err, "Failed to persist achievement unlocks");
        })?;
        *states = next;
        drop(states);

        for id in &newly_unlocked {
            info!(achievement_id = %id, "Achievement unlocked");
            self.notify(EngineEvent::AchievementUnlocked {
                achievement_id: id.as_str().to_string(),
                title: id.definition().title.to_string(),
            })
            .await;
        }

        Ok(newly_unlocked)
    }

    /// Marks an unlocked achievement as seen.
    ///
    /// `Ok(false)` when it is still locked or was already acknowledged; nothing
    /// is written in that case.
    #[instrument(skip(self))]
    pub async fn acknowledge(&self, id: AchievementId) -> Result<bool, AchievementError> {
        let mut states = self.states.lock().await;

        let mut next = states.clone();
        if !next.entry(id).or_default().acknowledge() {
            warn!(
                achievement_id = %id,
                "Ignoring acknowledge on locked or already read achievement"
            );
            return Ok(false);
        }

        self.repository.save(&next).await?;
        *states = next;
        drop(states);

        self.notify(EngineEvent::AchievementAcknowledged {
            achievement_id: id.as_str().to_string(),
            title: id.definition().title.to_string(),
        })
        .await;

        Ok(true)
    }

    /// Acknowledges every unread unlock in one write
    #[instrument(skip(self))]
    pub async fn acknowledge_all(&self) -> Result<Vec<AchievementId>, AchievementError> {
        let mut states = self.states.lock().await;

        let mut next = states.clone();
        let acknowledged: Vec<AchievementId> = next
            .iter_mut()
            .filter_map(|(id, state)| state.acknowledge().then_some(*id))
            .collect();
        if acknowledged.is_empty() {
            return Ok(acknowledged);
        }

        self.repository.save(&next).await?;
        *states = next;
        drop(states);

        for id in &acknowledged {
            self.notify(EngineEvent::AchievementAcknowledged {
                achievement_id: id.as_str().to_string(),
                title: id.definition().title.to_string(),
            })
            .await;
        }

        Ok(acknowledged)
    }

    pub async fn get(&self, id: AchievementId) -> Achievement {
        let states = self.states.lock().await;
        Achievement {
            definition: id.definition(),
            state: states.get(&id).cloned().unwrap_or_default(),
        }
    }

    /// Every catalog entry with its state, in catalog order
    pub async fn all(&self) -> Vec<Achievement> {
        let states = self.states.lock().await;
        states
            .iter()
            .map(|(id, state)| Achievement {
                definition: id.definition(),
                state: state.clone(),
            })
            .collect()
    }

    /// Unlocked achievements the player has not seen yet
    pub async fn unacknowledged(&self) -> Vec<Achievement> {
        self.all()
            .await
            .into_iter()
            .filter(|achievement| achievement.state.is_unread())
            .collect()
    }

    pub async fn progress(&self) -> AchievementProgress {
        let states = self.states.lock().await;
        AchievementProgress {
            unlocked: states.values().filter(|state| state.unlocked).count(),
            total: states.len(),
        }
    }

    async fn notify(&self, event: EngineEvent) {
        if let Err(err) = self.sink.notify(event).await {
            warn!(sink = self.sink.name(), error = %err, "Failed to deliver notification");
        }
    }
}

pub struct AchievementServiceBuilder {
    repository: Arc<dyn AchievementRepository>,
    sink: Arc<dyn NotificationSink>,
    total_packs_available: usize,
}

impl AchievementServiceBuilder {
    fn new(repository: Arc<dyn AchievementRepository>) -> Self {
        Self {
            repository,
            sink: Arc::new(NoOpNotificationSink),
            total_packs_available: crate::config::DEFAULT_TOTAL_PACKS,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_total_packs_available(mut self, total_packs_available: usize) -> Self {
        self.total_packs_available = total_packs_available;
        self
    }

    /// Loads the persisted states. A failed read starts from defaults so the
    /// game can still run.
    pub async fn build(self) -> AchievementService {
        let states = match self.repository.load().await {
            Ok(states) => states,
            Err(err) => {
                error!(error = %err, "Failed to load achievements, starting from defaults");
                default_states()
            }
        };

        AchievementService {
            repository: self.repository,
            engine: AchievementRuleEngine::new(self.total_packs_available),
            sink: self.sink,
            states: AsyncMutex::new(states),
        }
    }
}
