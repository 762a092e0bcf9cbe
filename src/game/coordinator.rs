use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{
    models::{
        AnswerResult, DareResult, GamePhase, GameSettings, GameSummary, RoundError, Standing,
    },
    question_source::{AnswerChoice, QuestionRecord},
};
use crate::achievements::AchievementId;
use crate::scoring::{
    calculate_dare_points, clamp_seconds_remaining, compute_trivia_score, DarePointsBreakdown,
    DareStreakTracker, PlayerScores,
};
use crate::stats::{StatsError, StatsService, TrackingReport};

/// Drives one game: question -> answer -> (dare) -> next question -> end.
///
/// Players take rounds in seating order. Statistics tracking is best-effort:
/// a failed write is logged and the game carries on.
pub struct GameRoundCoordinator {
    game_id: Uuid,
    settings: GameSettings,
    questions: Vec<QuestionRecord>,
    scores: PlayerScores,
    streaks: DareStreakTracker,
    phase: GamePhase,
    stats: Arc<StatsService>,
}

impl GameRoundCoordinator {
    /// Questions beyond `settings.question_count` are ignored. DaresONLY games
    /// need no questions.
    pub fn new(
        settings: GameSettings,
        mut questions: Vec<QuestionRecord>,
        stats: Arc<StatsService>,
    ) -> Result<Self, RoundError> {
        if settings.players.is_empty() {
            return Err(RoundError::NoPlayers);
        }

        if settings.question_count == 0 {
            return Err(RoundError::NoRounds);
        }

        if settings.mode.has_trivia() {
            if questions.len() < settings.question_count {
                return Err(RoundError::NotEnoughQuestions {
                    needed: settings.question_count,
                    available: questions.len(),
                });
            }
            questions.truncate(settings.question_count);
        }

        let player_count = settings.players.len();
        Ok(Self {
            game_id: Uuid::new_v4(),
            settings,
            questions,
            scores: PlayerScores::new(player_count),
            streaks: DareStreakTracker::new(player_count),
            phase: GamePhase::NotStarted,
            stats,
        })
    }

    pub fn game_id(&self) -> Uuid {
        self.game_id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn scores(&self) -> &PlayerScores {
        &self.scores
    }

    pub fn streaks(&self) -> &DareStreakTracker {
        &self.streaks
    }

    /// Player whose turn it is, if a round is in progress
    pub fn current_player(&self) -> Option<&str> {
        match self.phase {
            GamePhase::AwaitingAnswer { player_index, .. }
            | GamePhase::AwaitingDare { player_index, .. } => {
                self.settings.players.get(player_index).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Question for the current round (never set in DaresONLY games)
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match self.phase {
            GamePhase::AwaitingAnswer { round, .. } | GamePhase::AwaitingDare { round, .. } => {
                self.questions.get(round)
            }
            _ => None,
        }
    }

    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub async fn start(&mut self) -> Result<GamePhase, RoundError> {
        if self.phase != GamePhase::NotStarted {
            return Err(RoundError::InvalidPhase {
                operation: "start",
                phase: self.phase,
            });
        }

        self.scores.reset();
        self.streaks.reset();

        let tracked = self
            .stats
            .track_game_start(
                &self.settings.players,
                self.settings.mode,
                &self.settings.pack_name,
            )
            .await;
        Self::unlocked_from(tracked, "game_start");

        info!(
            mode = %self.settings.mode,
            players = self.settings.players.len(),
            rounds = self.settings.question_count,
            "Game started"
        );
        self.enter_round(0).await;
        Ok(self.phase)
    }

    /// Resolves the current question. `None` means no answer was given.
    ///
    /// `seconds_remaining` is clamped to the timer range before scoring.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub async fn submit_answer(
        &mut self,
        choice: Option<AnswerChoice>,
        seconds_remaining: f64,
        answer_time_ms: u64,
    ) -> Result<AnswerResult, RoundError> {
        let GamePhase::AwaitingAnswer {
            round,
            player_index,
        } = self.phase
        else {
            return Err(RoundError::InvalidPhase {
                operation: "submit an answer",
                phase: self.phase,
            });
        };

        let correct = match (choice, self.questions.get(round)) {
            (Some(choice), Some(question)) => question.is_correct(choice),
            _ => false,
        };

        if correct {
            let seconds = clamp_seconds_remaining(&self.settings.timer, seconds_remaining);
            let points = compute_trivia_score(&self.settings.timer, seconds);
            self.scores.award(player_index, points);

            let tracked = self.stats.track_correct_answer(answer_time_ms).await;
            let mut unlocked = Self::unlocked_from(tracked, "correct_answer");
            unlocked.extend(self.advance(round).await);

            debug!(player_index, points, "Correct answer");
            return Ok(AnswerResult {
                player_index,
                correct,
                points_awarded: points,
                dare: None,
                unlocked,
                next_phase: self.phase,
            });
        }

        let tracked = self.stats.track_incorrect_answer().await;
        let mut unlocked = Self::unlocked_from(tracked, "incorrect_answer");

        let dare = if self.settings.mode.has_dares() {
            self.phase = GamePhase::AwaitingDare {
                round,
                player_index,
            };
            Some(self.dare_breakdown(player_index)?)
        } else {
            unlocked.extend(self.advance(round).await);
            None
        };

        debug!(player_index, sent_to_dare = dare.is_some(), "Incorrect answer");
        Ok(AnswerResult {
            player_index,
            correct,
            points_awarded: 0,
            dare,
            unlocked,
            next_phase: self.phase,
        })
    }

    /// The countdown ran out without an answer
    pub async fn time_expired(&mut self) -> Result<AnswerResult, RoundError> {
        let limit_ms = u64::from(self.settings.timer.time_limit_seconds) * 1000;
        self.submit_answer(None, 0.0, limit_ms).await
    }

    /// Points the current dare is worth, for display before it is attempted
    pub fn dare_preview(&self) -> Result<DarePointsBreakdown, RoundError> {
        match self.phase {
            GamePhase::AwaitingDare { player_index, .. } => self.dare_breakdown(player_index),
            phase => Err(RoundError::InvalidPhase {
                operation: "preview a dare",
                phase,
            }),
        }
    }

    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub async fn resolve_dare(
        &mut self,
        completed: bool,
        completion_time_ms: Option<u64>,
    ) -> Result<DareResult, RoundError> {
        let GamePhase::AwaitingDare {
            round,
            player_index,
        } = self.phase
        else {
            return Err(RoundError::InvalidPhase {
                operation: "resolve a dare",
                phase: self.phase,
            });
        };

        // Priced on the streak before this dare counts
        let breakdown = self.dare_breakdown(player_index)?;
        self.streaks.record_dare_outcome(player_index, completed);

        let mut unlocked = Vec::new();
        let points_awarded = if completed {
            self.scores.award(player_index, breakdown.final_dare_points);
            let tracked = self.stats.track_dare_completed(completion_time_ms).await;
            unlocked.extend(Self::unlocked_from(tracked, "dare_completed"));
            breakdown.final_dare_points
        } else {
            0
        };

        info!(
            player_index,
            completed,
            points_awarded,
            streak = self.streaks.streak_info(player_index).current_streak,
            "Dare resolved"
        );

        unlocked.extend(self.advance(round).await);
        Ok(DareResult {
            player_index,
            completed,
            breakdown,
            points_awarded,
            streak: self.streaks.streak_info(player_index),
            unlocked,
            next_phase: self.phase,
        })
    }

    /// Declining a dare counts as failing it
    pub async fn skip_dare(&mut self) -> Result<DareResult, RoundError> {
        self.resolve_dare(false, None).await
    }

    pub fn summary(&self) -> GameSummary {
        let mut standings: Vec<Standing> = self
            .settings
            .players
            .iter()
            .zip(self.scores.as_slice())
            .map(|(player, score)| Standing {
                player: player.clone(),
                score: *score,
            })
            .collect();
        standings.sort_by(|a, b| b.score.cmp(&a.score));

        let winner = match (self.phase, standings.as_slice()) {
            (GamePhase::Completed, [first, second, ..]) if first.score == second.score => None,
            (GamePhase::Completed, [first, ..]) => Some(first.player.clone()),
            _ => None,
        };

        GameSummary {
            game_id: self.game_id,
            mode: self.settings.mode,
            standings,
            winner,
        }
    }

    fn dare_breakdown(&self, player_index: usize) -> Result<DarePointsBreakdown, RoundError> {
        Ok(calculate_dare_points(
            player_index,
            self.scores.as_slice(),
            self.settings.question_count,
            &self.settings.timer,
            self.streaks.streak_info(player_index),
        )?)
    }

    async fn advance(&mut self, finished_round: usize) -> Vec<AchievementId> {
        self.enter_round(finished_round + 1).await
    }

    async fn enter_round(&mut self, round: usize) -> Vec<AchievementId> {
        if round >= self.settings.question_count {
            self.phase = GamePhase::Completed;
            let tracked = self.stats.track_game_complete(self.settings.mode).await;
            info!(game_id = %self.game_id, "Game completed");
            return Self::unlocked_from(tracked, "game_complete");
        }

        let player_index = round % self.settings.players.len();
        self.phase = if self.settings.mode.has_trivia() {
            GamePhase::AwaitingAnswer {
                round,
                player_index,
            }
        } else {
            GamePhase::AwaitingDare {
                round,
                player_index,
            }
        };
        Vec::new()
    }

    fn unlocked_from(
        tracked: Result<TrackingReport, StatsError>,
        operation: &'static str,
    ) -> Vec<AchievementId> {
        match tracked {
            Ok(report) => report.newly_unlocked,
            Err(err) => {
                warn!(operation, error = %err, "Statistics tracking failed, continuing game");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::{AchievementService, KeyValueAchievementRepository};
    use crate::scoring::TimerPreset;
    use crate::stats::{GameMode, KeyValueStatsRepository};
    use crate::storage::InMemoryKeyValueStore;

    fn question(id: &str, correct: &str) -> QuestionRecord {
        QuestionRecord {
            question_id: id.to_string(),
            question_text: format!("Question {id}"),
            option_a: "alpha".to_string(),
            option_b: "beta".to_string(),
            option_c: "gamma".to_string(),
            option_d: "delta".to_string(),
            correct_answer: correct.to_string(),
            difficulty: "Medium".to_string(),
        }
    }

    async fn stats_service() -> Arc<StatsService> {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let achievements = Arc::new(
            AchievementService::builder(Arc::new(KeyValueAchievementRepository::new(
                store.clone(),
            )))
            .build()
            .await,
        );
        Arc::new(
            StatsService::load(Arc::new(KeyValueStatsRepository::new(store)), achievements).await,
        )
    }

    fn settings(mode: GameMode, players: &[&str], question_count: usize) -> GameSettings {
        GameSettings {
            players: players.iter().map(|p| p.to_string()).collect(),
            mode,
            timer: TimerPreset::Quick.config(),
            pack_name: "classic".to_string(),
            question_count,
        }
    }

    fn questions(count: usize) -> Vec<QuestionRecord> {
        (0..count).map(|i| question(&format!("q{i}"), "A")).collect()
    }

    #[tokio::test]
    async fn rejects_game_without_players() {
        let result = GameRoundCoordinator::new(
            settings(GameMode::TriviaDare, &[], 3),
            questions(3),
            stats_service().await,
        );
        assert_eq!(result.err(), Some(RoundError::NoPlayers));
    }

    #[tokio::test]
    async fn rejects_short_question_list() {
        let result = GameRoundCoordinator::new(
            settings(GameMode::TriviaOnly, &["ann"], 5),
            questions(3),
            stats_service().await,
        );
        assert_eq!(
            result.err(),
            Some(RoundError::NotEnoughQuestions {
                needed: 5,
                available: 3
            })
        );
    }

    #[tokio::test]
    async fn rejects_game_without_rounds() {
        let stats = stats_service().await;
        let result = GameRoundCoordinator::new(
            settings(GameMode::TriviaOnly, &["ann", "ben"], 0),
            questions(0),
            stats.clone(),
        );

        assert_eq!(result.err(), Some(RoundError::NoRounds));
        let recorded = stats.stats().await;
        assert_eq!(recorded.games_played, 0);
        assert_eq!(recorded.perfect_games, 0);
    }

    #[tokio::test]
    async fn correct_answer_scores_and_rotates_player() {
        let mut game = GameRoundCoordinator::new(
            settings(GameMode::TriviaDare, &["ann", "ben"], 3),
            questions(3),
            stats_service().await,
        )
        .unwrap();
        game.start().await.unwrap();
        assert_eq!(game.current_player(), Some("ann"));

        let result = game
            .submit_answer(Some(AnswerChoice::A), 20.5, 9500)
            .await
            .unwrap();

        assert!(result.correct);
        assert_eq!(result.points_awarded, 191);
        assert_eq!(game.scores().get(0), Some(191));
        assert_eq!(game.current_player(), Some("ben"));
    }

    #[tokio::test]
    async fn seconds_remaining_is_clamped_before_scoring() {
        let mut game = GameRoundCoordinator::new(
            settings(GameMode::TriviaOnly, &["ann"], 1),
            questions(1),
            stats_service().await,
        )
        .unwrap();
        game.start().await.unwrap();

        let result = game
            .submit_answer(Some(AnswerChoice::A), 99.0, 100)
            .await
            .unwrap();
        assert_eq!(result.points_awarded, 210);
    }

    #[tokio::test]
    async fn non_finite_seconds_remaining_scores_the_base_only() {
        let mut game = GameRoundCoordinator::new(
            settings(GameMode::TriviaOnly, &["ann"], 1),
            questions(1),
            stats_service().await,
        )
        .unwrap();
        game.start().await.unwrap();

        let result = game
            .submit_answer(Some(AnswerChoice::A), f64::NAN, 500)
            .await
            .unwrap();
        assert!(result.correct);
        assert_eq!(result.points_awarded, 150);
    }

    #[tokio::test]
    async fn wrong_answer_leads_to_dare_in_trivia_dare_mode() {
        let mut game = GameRoundCoordinator::new(
            settings(GameMode::TriviaDare, &["ann", "ben"], 5),
            questions(5),
            stats_service().await,
        )
        .unwrap();
        game.start().await.unwrap();

        let result = game
            .submit_answer(Some(AnswerChoice::B), 10.0, 20_000)
            .await
            .unwrap();

        assert!(!result.correct);
        assert_eq!(
            result.next_phase,
            GamePhase::AwaitingDare {
                round: 0,
                player_index: 0
            }
        );
        assert_eq!(result.dare.unwrap().final_dare_points, 113);
        assert_eq!(game.dare_preview().unwrap(), result.dare.unwrap());

        let dare = game.resolve_dare(true, Some(7000)).await.unwrap();
        assert_eq!(dare.points_awarded, 113);
        assert_eq!(dare.streak.current_streak, 1);
        assert!(dare.unlocked.contains(&AchievementId::QuickDare));
        assert_eq!(game.current_player(), Some("ben"));
    }

    #[tokio::test]
    async fn wrong_answer_skips_dare_in_trivia_only_mode() {
        let mut game = GameRoundCoordinator::new(
            settings(GameMode::TriviaOnly, &["ann", "ben"], 2),
            questions(2),
            stats_service().await,
        )
        .unwrap();
        game.start().await.unwrap();

        let result = game.time_expired().await.unwrap();
        assert!(result.dare.is_none());
        assert_eq!(
            result.next_phase,
            GamePhase::AwaitingAnswer {
                round: 1,
                player_index: 1
            }
        );
    }

    #[tokio::test]
    async fn consecutive_dares_raise_the_multiplier() {
        let mut game = GameRoundCoordinator::new(
            settings(GameMode::DaresOnly, &["ann"], 3),
            Vec::new(),
            stats_service().await,
        )
        .unwrap();
        game.start().await.unwrap();

        let first = game.resolve_dare(true, None).await.unwrap();
        let second = game.resolve_dare(true, None).await.unwrap();
        assert_eq!(first.breakdown.streak_multiplier, 1.0);
        assert_eq!(second.breakdown.streak_multiplier, 1.25);

        let third = game.skip_dare().await.unwrap();
        assert_eq!(third.points_awarded, 0);
        assert_eq!(third.streak.current_streak, 0);
        assert_eq!(third.next_phase, GamePhase::Completed);
    }

    #[tokio::test]
    async fn operations_out_of_phase_are_rejected() {
        let mut game = GameRoundCoordinator::new(
            settings(GameMode::TriviaDare, &["ann"], 1),
            questions(1),
            stats_service().await,
        )
        .unwrap();

        assert!(matches!(
            game.submit_answer(Some(AnswerChoice::A), 1.0, 1000).await,
            Err(RoundError::InvalidPhase { .. })
        ));
        game.start().await.unwrap();
        assert!(matches!(
            game.resolve_dare(true, None).await,
            Err(RoundError::InvalidPhase { .. })
        ));
        assert!(matches!(
            game.start().await,
            Err(RoundError::InvalidPhase { .. })
        ));
    }

    #[tokio::test]
    async fn summary_names_winner_only_when_game_is_over() {
        let mut game = GameRoundCoordinator::new(
            settings(GameMode::TriviaOnly, &["ann", "ben"], 2),
            questions(2),
            stats_service().await,
        )
        .unwrap();
        game.start().await.unwrap();
        game.time_expired().await.unwrap();
        assert_eq!(game.summary().winner, None);

        game.submit_answer(Some(AnswerChoice::A), 5.0, 25_000)
            .await
            .unwrap();

        let summary = game.summary();
        assert_eq!(summary.winner.as_deref(), Some("ben"));
        assert_eq!(summary.standings[0].score, 160);
        assert_eq!(summary.standings[1].player, "ann");
    }
}
