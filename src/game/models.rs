use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::achievements::AchievementId;
use crate::scoring::{DarePointsBreakdown, ScoringError, StreakInfo, TimerConfig};
use crate::stats::GameMode;

#[derive(Debug, Error, PartialEq)]
pub enum RoundError {
    #[error("Cannot {operation} while {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: GamePhase,
    },

    #[error("A game needs at least one player")]
    NoPlayers,

    #[error("A game needs at least one round")]
    NoRounds,

    #[error("Game needs {needed} questions but only {available} were supplied")]
    NotEnoughQuestions { needed: usize, available: usize },

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),
}

/// Choices made on the setup screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub players: Vec<String>,
    pub mode: GameMode,
    pub timer: TimerConfig,
    pub pack_name: String,
    /// Rounds in the game; one question (or dare) per round
    pub question_count: usize,
}

/// Where the round state machine currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    AwaitingAnswer {
        round: usize,
        player_index: usize,
    },
    AwaitingDare {
        round: usize,
        player_index: usize,
    },
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerResult {
    pub player_index: usize,
    pub correct: bool,
    pub points_awarded: u32,
    /// Present when a wrong answer sends the player to a dare
    pub dare: Option<DarePointsBreakdown>,
    pub unlocked: Vec<AchievementId>,
    pub next_phase: GamePhase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DareResult {
    pub player_index: usize,
    pub completed: bool,
    pub breakdown: DarePointsBreakdown,
    pub points_awarded: u32,
    /// Streak after this dare was recorded
    pub streak: StreakInfo,
    pub unlocked: Vec<AchievementId>,
    pub next_phase: GamePhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_id: Uuid,
    pub mode: GameMode,
    /// Highest score first; ties keep seating order
    pub standings: Vec<Standing>,
    /// `None` while the game is running or when the top score is shared
    pub winner: Option<String>,
}
