//! Point awards for trivia answers and dares.
//!
//! Everything here is a pure function of its inputs except
//! [`DareStreakTracker`], which the round coordinator mutates after each dare.

pub mod calculators;
pub mod streak;

mod errors;
pub mod models;

pub use errors::ScoringError;
pub use models::*;
pub use streak::DareStreakTracker;

use calculators::{catch_up_bonus, question_count_multiplier, streak_multiplier};

const DARE_BASE_RATE: f64 = 0.75;
const TIME_BONUS_PER_SECOND: f64 = 2.0;

/// Points for a correct trivia answer: base score plus two per second left.
///
/// The caller clamps `seconds_remaining` to `[0, time_limit_seconds]`; values
/// outside that range are a contract violation and are not corrected here.
pub fn compute_trivia_score(timer: &TimerConfig, seconds_remaining: f64) -> u32 {
    debug_assert!(
        (0.0..=f64::from(timer.time_limit_seconds)).contains(&seconds_remaining),
        "seconds_remaining {seconds_remaining} outside [0, {}]",
        timer.time_limit_seconds
    );

    timer.base_score + (seconds_remaining * TIME_BONUS_PER_SECOND).floor() as u32
}

/// Brings a reported countdown value into `[0, time_limit_seconds]`.
/// Non-finite input counts as no time left.
pub fn clamp_seconds_remaining(timer: &TimerConfig, seconds_remaining: f64) -> f64 {
    if seconds_remaining.is_finite() {
        seconds_remaining.clamp(0.0, f64::from(timer.time_limit_seconds))
    } else {
        0.0
    }
}

/// Full dare award for `player_index`.
///
/// `streak` is the player's streak *before* this dare resolves, so the second
/// consecutive dare is paid at 1.25x.
pub fn calculate_dare_points(
    player_index: usize,
    all_player_scores: &[u32],
    total_questions_in_game: usize,
    timer: &TimerConfig,
    streak: StreakInfo,
) -> Result<DarePointsBreakdown, ScoringError> {
    let catch_up_bonus =
        catch_up_bonus(player_index, all_player_scores).ok_or(ScoringError::PlayerOutOfRange {
            index: player_index,
            player_count: all_player_scores.len(),
        })?;

    let base_dare_points = f64::from(timer.base_score) * DARE_BASE_RATE;
    let question_count_multiplier = question_count_multiplier(total_questions_in_game);
    let adjusted_base_dare_points = base_dare_points * question_count_multiplier;
    let streak_multiplier = streak_multiplier(streak);
    let final_dare_points =
        ((adjusted_base_dare_points + catch_up_bonus) * streak_multiplier).round() as u32;

    Ok(DarePointsBreakdown {
        base_dare_points,
        question_count_multiplier,
        adjusted_base_dare_points,
        catch_up_bonus,
        streak_multiplier,
        final_dare_points,
    })
}
