use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::achievements::AchievementId;

/// Answers faster than this set the lightning flag
pub const LIGHTNING_ANSWER_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum GameMode {
    /// Trivia with a dare after every wrong answer
    #[default]
    TriviaDare,
    #[serde(rename = "TriviaONLY")]
    TriviaOnly,
    #[serde(rename = "DaresONLY")]
    DaresOnly,
}

impl GameMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::TriviaDare => "TriviaDare",
            GameMode::TriviaOnly => "TriviaONLY",
            GameMode::DaresOnly => "DaresONLY",
        }
    }

    /// Unknown names fall back to TriviaDare
    pub fn from_name(name: &str) -> Self {
        GameMode::iter()
            .find(|mode| mode.as_str() == name)
            .unwrap_or_default()
    }

    pub fn has_trivia(self) -> bool {
        !matches!(self, GameMode::DaresOnly)
    }

    pub fn has_dares(self) -> bool {
        !matches!(self, GameMode::TriviaOnly)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cumulative play statistics for this device, persisted under `gameStats`
///
/// Counters only grow, except `current_correct_streak` (reset by a wrong
/// answer) and `wrong_answers_this_game` (reset at game start).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStatistics {
    pub games_played: u32,
    pub trivia_dare_games_completed: u32,
    pub trivia_only_games_completed: u32,
    pub dares_only_games_completed: u32,
    pub current_correct_streak: u32,
    pub max_correct_streak: u32,
    pub dares_completed: u32,
    pub fastest_answer_time_ms: Option<u64>,
    pub quickest_dare_time_ms: Option<u64>,
    pub purchased_packs: BTreeSet<String>,
    pub used_packs: BTreeSet<String>,
    pub perfect_games: u32,
    pub lightning_answer_achieved: bool,
    pub wrong_answers_this_game: u32,
}

impl GameStatistics {
    pub fn record_game_start(&mut self, pack_name: &str) {
        if !pack_name.is_empty() {
            self.used_packs.insert(pack_name.to_string());
        }
        self.wrong_answers_this_game = 0;
    }

    pub fn record_correct_answer(&mut self, answer_time_ms: u64) {
        self.current_correct_streak += 1;
        self.max_correct_streak = self.max_correct_streak.max(self.current_correct_streak);
        self.fastest_answer_time_ms = Some(
            self.fastest_answer_time_ms
                .map_or(answer_time_ms, |fastest| fastest.min(answer_time_ms)),
        );
        if answer_time_ms < LIGHTNING_ANSWER_MS {
            self.lightning_answer_achieved = true;
        }
    }

    pub fn record_incorrect_answer(&mut self) {
        self.current_correct_streak = 0;
        self.wrong_answers_this_game += 1;
    }

    pub fn record_game_complete(&mut self, mode: GameMode) {
        self.games_played += 1;
        match mode {
            GameMode::TriviaDare => self.trivia_dare_games_completed += 1,
            GameMode::TriviaOnly => self.trivia_only_games_completed += 1,
            GameMode::DaresOnly => self.dares_only_games_completed += 1,
        }
        if self.wrong_answers_this_game == 0 {
            self.perfect_games += 1;
        }
    }

    pub fn record_dare_completed(&mut self, completion_time_ms: Option<u64>) {
        self.dares_completed += 1;
        if let Some(time) = completion_time_ms {
            self.quickest_dare_time_ms = Some(
                self.quickest_dare_time_ms
                    .map_or(time, |quickest| quickest.min(time)),
            );
        }
    }

    /// Returns false when the pack was already owned
    pub fn record_pack_purchase(&mut self, pack_id: &str) -> bool {
        self.purchased_packs.insert(pack_id.to_string())
    }
}

/// Outcome of one tracking operation
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingReport {
    pub stats: GameStatistics,
    pub newly_unlocked: Vec<AchievementId>,
}
