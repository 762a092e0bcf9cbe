use tracing::debug;

use super::StreakInfo;

/// Consecutive-dare successes per seat, scoped to one game session
#[derive(Debug, Clone, Default)]
pub struct DareStreakTracker {
    streaks: Vec<u32>,
}

impl DareStreakTracker {
    pub fn new(player_count: usize) -> Self {
        Self {
            streaks: vec![0; player_count],
        }
    }

    /// Success extends the player's streak by one; anything else resets it.
    /// Other players are untouched.
    pub fn record_dare_outcome(&mut self, player_index: usize, succeeded: bool) {
        if player_index >= self.streaks.len() {
            self.streaks.resize(player_index + 1, 0);
        }

        let streak = &mut self.streaks[player_index];
        *streak = if succeeded { *streak + 1 } else { 0 };

        debug!(
            player_index,
            succeeded,
            current_streak = *streak,
            "Dare outcome recorded"
        );
    }

    pub fn streak_info(&self, player_index: usize) -> StreakInfo {
        StreakInfo {
            current_streak: self.streaks.get(player_index).copied().unwrap_or_default(),
        }
    }

    pub fn reset(&mut self) {
        self.streaks.iter_mut().for_each(|streak| *streak = 0);
    }
}
