use std::sync::Arc;

use triviadare::{
    config::EngineConfig,
    game::{GameRoundCoordinator, GameSettings, QuestionRecord},
    scoring::TimerConfig,
    shared::EngineContext,
    stats::GameMode,
};

use super::mocks::{FlakyKeyValueStore, RecordingSink};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub context: EngineContext,
    pub store: FlakyKeyValueStore,
    pub sink: RecordingSink,
    pub settings: GameSettings,
}

#[allow(dead_code)]
impl TestSetup {
    /// Fresh coordinator for the configured game, questions included
    pub fn new_game(&self) -> GameRoundCoordinator {
        self.context
            .new_game(
                self.settings.clone(),
                question_pack(self.settings.question_count),
            )
            .expect("game settings should be valid")
    }

    /// A second engine over the same storage, as after an app restart
    pub async fn restart(&self) -> EngineContext {
        EngineContext::initialize(
            self.context.config.clone(),
            Arc::new(self.store.clone()),
            Arc::new(RecordingSink::new()),
        )
        .await
    }
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    mode: GameMode,
    timer: TimerConfig,
    question_count: usize,
    total_packs: usize,
    store: FlakyKeyValueStore,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            mode: GameMode::TriviaDare,
            timer: TimerConfig::default(),
            question_count: 5,
            total_packs: EngineConfig::default().total_packs_available,
            store: FlakyKeyValueStore::new(),
        }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_players(vec!["alice", "bob"])
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timer(mut self, timer: TimerConfig) -> Self {
        self.timer = timer;
        self
    }

    pub fn with_question_count(mut self, question_count: usize) -> Self {
        self.question_count = question_count;
        self
    }

    pub fn with_total_packs(mut self, total_packs: usize) -> Self {
        self.total_packs = total_packs;
        self
    }

    pub fn with_store(mut self, store: FlakyKeyValueStore) -> Self {
        self.store = store;
        self
    }

    pub async fn build(self) -> TestSetup {
        let sink = RecordingSink::new();
        let config = EngineConfig {
            total_packs_available: self.total_packs,
            default_timer: self.timer,
            ..EngineConfig::default()
        };

        let context = EngineContext::initialize(
            config,
            Arc::new(self.store.clone()),
            Arc::new(sink.clone()),
        )
        .await;

        TestSetup {
            context,
            store: self.store,
            sink,
            settings: GameSettings {
                players: self.players,
                mode: self.mode,
                timer: self.timer,
                pack_name: "general".to_string(),
                question_count: self.question_count,
            },
        }
    }
}

/// Questions whose correct answer is always B
pub fn question_pack(count: usize) -> Vec<QuestionRecord> {
    (0..count)
        .map(|n| QuestionRecord {
            question_id: format!("q{n}"),
            question_text: format!("Question {n}"),
            option_a: "wrong".to_string(),
            option_b: "right".to_string(),
            option_c: "also wrong".to_string(),
            option_d: "still wrong".to_string(),
            correct_answer: "B".to_string(),
            difficulty: "Medium".to_string(),
        })
        .collect()
}
