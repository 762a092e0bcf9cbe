use crate::scoring::StreakInfo;

const STREAK_STEP: f64 = 0.25;

/// 1.0 for a fresh dare, then +0.25 per prior consecutive success. Uncapped.
pub fn streak_multiplier(streak: StreakInfo) -> f64 {
    1.0 + STREAK_STEP * f64::from(streak.current_streak)
}
