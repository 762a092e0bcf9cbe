use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Countdown length offered at game setup. Shorter timers pay more base points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum TimerPreset {
    Blitz,
    Quick,
    Standard,
    Relaxed,
}

impl TimerPreset {
    pub const fn config(self) -> TimerConfig {
        match self {
            TimerPreset::Blitz => TimerConfig::new(15, 200),
            TimerPreset::Quick => TimerConfig::new(30, 150),
            TimerPreset::Standard => TimerConfig::new(45, 100),
            TimerPreset::Relaxed => TimerConfig::new(60, 50),
        }
    }
}

/// Timer settings selected once per game, read-only during play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    pub time_limit_seconds: u32,
    pub base_score: u32,
}

impl TimerConfig {
    const fn new(time_limit_seconds: u32, base_score: u32) -> Self {
        Self {
            time_limit_seconds,
            base_score,
        }
    }

    /// Looks up the preset with the given countdown length
    pub fn for_time_limit(seconds: u32) -> Option<TimerConfig> {
        TimerPreset::iter()
            .map(TimerPreset::config)
            .find(|config| config.time_limit_seconds == seconds)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerPreset::Quick.config()
    }
}

/// Read-only view of one player's consecutive dare successes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    pub current_streak: u32,
}

/// Every term of a dare award, so the presentation layer can show the math.
/// Recomputed on demand and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DarePointsBreakdown {
    pub base_dare_points: f64,
    pub question_count_multiplier: f64,
    pub adjusted_base_dare_points: f64,
    pub catch_up_bonus: f64,
    pub streak_multiplier: f64,
    pub final_dare_points: u32,
}

/// Point totals for one game session, indexed by seat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScores {
    totals: Vec<u32>,
}

impl PlayerScores {
    pub fn new(player_count: usize) -> Self {
        Self {
            totals: vec![0; player_count],
        }
    }

    /// Adds points to a player's total. Totals only ever grow.
    pub fn award(&mut self, player_index: usize, points: u32) -> Option<u32> {
        let total = self.totals.get_mut(player_index)?;
        *total = total.saturating_add(points);
        Some(*total)
    }

    pub fn get(&self, player_index: usize) -> Option<u32> {
        self.totals.get(player_index).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.totals
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn reset(&mut self) {
        self.totals.iter_mut().for_each(|total| *total = 0);
    }
}
