//! Score keeping for games played over a shared realtime state channel.
//!
//! Every device sees the same state notifications, possibly more than once.
//! Only the authoritative player's turn results are applied, and each turn is
//! applied at most once.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::scoring::{
    calculate_dare_points, clamp_seconds_remaining, compute_trivia_score, DareStreakTracker,
    PlayerScores, ScoringError, TimerConfig,
};

#[derive(Debug, Error)]
pub enum MultiplayerError {
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Player {0} is not taking the current turn")]
    NotAuthoritative(String),

    #[error("Turn for question {got} does not match current question {expected}")]
    StaleTurn { expected: usize, got: usize },

    #[error("Game is not in progress ({0:?})")]
    GameNotActive(GameStatus),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished,
}

/// The fields of the shared game document the engine reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedGameState {
    pub current_player_id: String,
    pub current_question_index: usize,
    pub performing_dare: bool,
    pub current_dare_player_id: Option<String>,
    pub game_status: GameStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnKind {
    Trivia,
    Dare,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnInput {
    Answer { correct: bool, seconds_remaining: f64 },
    Dare { completed: bool },
}

impl TurnInput {
    pub fn kind(&self) -> TurnKind {
        match self {
            TurnInput::Answer { .. } => TurnKind::Trivia,
            TurnInput::Dare { .. } => TurnKind::Dare,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub player_id: String,
    pub question_index: usize,
    pub input: TurnInput,
}

/// What the engine writes back to the shared channel after a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub player_id: String,
    pub question_index: usize,
    pub kind: TurnKind,
    pub points_awarded: u32,
    pub total_score: u32,
    pub dare_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnApplication {
    Applied(ScoreUpdate),
    /// This turn was already applied; nothing changed
    Duplicate,
}

/// Trait for the realtime channel's write side
#[async_trait]
pub trait SharedStateChannel: Send + Sync {
    async fn publish_score(&self, update: &ScoreUpdate) -> Result<(), MultiplayerError>;
}

type TurnKey = (String, usize, TurnKind);

pub struct MultiplayerSession {
    roster: Vec<String>,
    timer: TimerConfig,
    total_questions: usize,
    scores: PlayerScores,
    streaks: DareStreakTracker,
    applied: HashSet<TurnKey>,
    channel: Arc<dyn SharedStateChannel>,
}

impl MultiplayerSession {
    pub fn new(
        roster: Vec<String>,
        timer: TimerConfig,
        total_questions: usize,
        channel: Arc<dyn SharedStateChannel>,
    ) -> Self {
        let player_count = roster.len();
        Self {
            roster,
            timer,
            total_questions,
            scores: PlayerScores::new(player_count),
            streaks: DareStreakTracker::new(player_count),
            applied: HashSet::new(),
            channel,
        }
    }

    pub fn score(&self, player_id: &str) -> Option<u32> {
        self.scores.get(self.seat(player_id)?)
    }

    pub fn dare_streak(&self, player_id: &str) -> Option<u32> {
        let seat = self.seat(player_id)?;
        Some(self.streaks.streak_info(seat).current_streak)
    }

    /// Applies one turn result observed alongside `state`.
    ///
    /// Idempotent per (player, question, turn kind): a repeat returns
    /// `Duplicate`. The new totals are committed only after the channel
    /// accepted the update, so a failed publish can be retried.
    #[instrument(
        skip(self, state),
        fields(player_id = %result.player_id, question_index = result.question_index)
    )]
    pub async fn apply_turn(
        &mut self,
        state: &SharedGameState,
        result: TurnResult,
    ) -> Result<TurnApplication, MultiplayerError> {
        let kind = result.input.kind();
        let key: TurnKey = (result.player_id.clone(), result.question_index, kind);
        if self.applied.contains(&key) {
            debug!("Ignoring duplicate turn notification");
            return Ok(TurnApplication::Duplicate);
        }

        self.validate(state, &result)?;
        let seat = self
            .seat(&result.player_id)
            .ok_or_else(|| MultiplayerError::UnknownPlayer(result.player_id.clone()))?;

        let mut scores = self.scores.clone();
        let mut streaks = self.streaks.clone();

        let points_awarded = match result.input {
            TurnInput::Answer {
                correct,
                seconds_remaining,
            } => {
                if correct {
                    let seconds = clamp_seconds_remaining(&self.timer, seconds_remaining);
                    compute_trivia_score(&self.timer, seconds)
                } else {
                    0
                }
            }
            TurnInput::Dare { completed } => {
                let breakdown = calculate_dare_points(
                    seat,
                    scores.as_slice(),
                    self.total_questions,
                    &self.timer,
                    streaks.streak_info(seat),
                )?;
                streaks.record_dare_outcome(seat, completed);
                if completed {
                    breakdown.final_dare_points
                } else {
                    0
                }
            }
        };
        let total_score = scores.award(seat, points_awarded).unwrap_or_default();

        let update = ScoreUpdate {
            player_id: result.player_id,
            question_index: result.question_index,
            kind,
            points_awarded,
            total_score,
            dare_streak: streaks.streak_info(seat).current_streak,
        };

        self.channel.publish_score(&update).await.inspect_err(|err| {
            warn!(error = %err, "Failed to publish score update");
        })?;

        self.scores = scores;
        self.streaks = streaks;
        self.applied.insert(key);

        info!(points_awarded, total_score, ?kind, "Turn applied");
        Ok(TurnApplication::Applied(update))
    }

    fn validate(
        &self,
        state: &SharedGameState,
        result: &TurnResult,
    ) -> Result<(), MultiplayerError> {
        if state.game_status != GameStatus::Playing {
            return Err(MultiplayerError::GameNotActive(state.game_status));
        }

        if state.current_question_index != result.question_index {
            return Err(MultiplayerError::StaleTurn {
                expected: state.current_question_index,
                got: result.question_index,
            });
        }

        let authoritative = match result.input {
            TurnInput::Answer { .. } => {
                !state.performing_dare && state.current_player_id == result.player_id
            }
            TurnInput::Dare { .. } => {
                state.performing_dare
                    && state.current_dare_player_id.as_deref() == Some(result.player_id.as_str())
            }
        };
        if !authoritative {
            return Err(MultiplayerError::NotAuthoritative(result.player_id.clone()));
        }

        Ok(())
    }

    fn seat(&self, player_id: &str) -> Option<usize> {
        self.roster.iter().position(|p| p == player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingChannel {
        published: Mutex<Vec<ScoreUpdate>>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl SharedStateChannel for RecordingChannel {
        async fn publish_score(&self, update: &ScoreUpdate) -> Result<(), MultiplayerError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(MultiplayerError::Channel("offline".to_string()));
            }
            self.published.lock().await.push(update.clone());
            Ok(())
        }
    }

    fn playing(player: &str, question_index: usize) -> SharedGameState {
        SharedGameState {
            current_player_id: player.to_string(),
            current_question_index: question_index,
            performing_dare: false,
            current_dare_player_id: None,
            game_status: GameStatus::Playing,
        }
    }

    fn daring(player: &str, question_index: usize) -> SharedGameState {
        SharedGameState {
            performing_dare: true,
            current_dare_player_id: Some(player.to_string()),
            ..playing(player, question_index)
        }
    }

    fn answer(player: &str, question_index: usize, correct: bool) -> TurnResult {
        TurnResult {
            player_id: player.to_string(),
            question_index,
            input: TurnInput::Answer {
                correct,
                seconds_remaining: 10.0,
            },
        }
    }

    fn session(channel: Arc<RecordingChannel>) -> MultiplayerSession {
        MultiplayerSession::new(
            vec!["host".to_string(), "guest".to_string()],
            TimerConfig::default(),
            5,
            channel,
        )
    }

    #[tokio::test]
    async fn duplicate_notification_is_applied_once() {
        let channel = Arc::new(RecordingChannel::default());
        let mut session = session(channel.clone());
        let state = playing("host", 0);

        let first = session
            .apply_turn(&state, answer("host", 0, true))
            .await
            .unwrap();
        let second = session
            .apply_turn(&state, answer("host", 0, true))
            .await
            .unwrap();

        assert!(matches!(first, TurnApplication::Applied(_)));
        assert_eq!(second, TurnApplication::Duplicate);
        assert_eq!(session.score("host"), Some(170));
        assert_eq!(channel.published.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn only_the_current_player_may_score() {
        let mut session = session(Arc::new(RecordingChannel::default()));
        let result = session
            .apply_turn(&playing("host", 0), answer("guest", 0, true))
            .await;

        assert!(matches!(result, Err(MultiplayerError::NotAuthoritative(_))));
        assert_eq!(session.score("guest"), Some(0));
    }

    #[tokio::test]
    async fn dare_after_wrong_answer_shares_the_question_index() {
        let mut session = session(Arc::new(RecordingChannel::default()));
        session
            .apply_turn(&playing("host", 0), answer("host", 0, false))
            .await
            .unwrap();

        let dare = TurnResult {
            player_id: "host".to_string(),
            question_index: 0,
            input: TurnInput::Dare { completed: true },
        };
        let applied = session.apply_turn(&daring("host", 0), dare).await.unwrap();

        let TurnApplication::Applied(update) = applied else {
            panic!("expected dare to apply");
        };
        assert_eq!(update.kind, TurnKind::Dare);
        assert_eq!(update.points_awarded, 113);
        assert_eq!(update.dare_streak, 1);
    }

    #[tokio::test]
    async fn stale_or_finished_states_are_rejected() {
        let mut session = session(Arc::new(RecordingChannel::default()));

        let stale = session
            .apply_turn(&playing("host", 2), answer("host", 1, true))
            .await;
        assert!(matches!(
            stale,
            Err(MultiplayerError::StaleTurn {
                expected: 2,
                got: 1
            })
        ));

        let finished = SharedGameState {
            game_status: GameStatus::Finished,
            ..playing("host", 1)
        };
        let result = session.apply_turn(&finished, answer("host", 1, true)).await;
        assert!(matches!(result, Err(MultiplayerError::GameNotActive(_))));
    }

    #[tokio::test]
    async fn failed_publish_commits_nothing_and_can_be_retried() {
        let channel = Arc::new(RecordingChannel::default());
        let mut session = session(channel.clone());
        let state = playing("host", 0);

        channel.fail.store(true, Ordering::SeqCst);
        assert!(session
            .apply_turn(&state, answer("host", 0, true))
            .await
            .is_err());
        assert_eq!(session.score("host"), Some(0));

        channel.fail.store(false, Ordering::SeqCst);
        let retried = session
            .apply_turn(&state, answer("host", 0, true))
            .await
            .unwrap();
        assert!(matches!(retried, TurnApplication::Applied(_)));
        assert_eq!(session.score("host"), Some(170));
    }

    #[tokio::test]
    async fn unreadable_countdown_scores_the_base_only() {
        let mut session = session(Arc::new(RecordingChannel::default()));
        let result = TurnResult {
            player_id: "host".to_string(),
            question_index: 0,
            input: TurnInput::Answer {
                correct: true,
                seconds_remaining: f64::NAN,
            },
        };

        session
            .apply_turn(&playing("host", 0), result)
            .await
            .unwrap();

        assert_eq!(session.score("host"), Some(150));
    }

    #[test]
    fn shared_state_uses_camel_case() {
        let json = serde_json::to_value(daring("guest", 3)).unwrap();
        assert_eq!(json["currentDarePlayerId"], "guest");
        assert_eq!(json["gameStatus"], "playing");
        assert_eq!(json["performingDare"], true);
    }
}
