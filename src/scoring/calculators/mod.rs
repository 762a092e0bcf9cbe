pub mod catch_up;
pub mod question_count;
pub mod streak_multiplier;

pub use catch_up::catch_up_bonus;
pub use question_count::question_count_multiplier;
pub use streak_multiplier::streak_multiplier;
