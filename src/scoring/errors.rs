use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("Player index {index} out of range for {player_count} players")]
    PlayerOutOfRange { index: usize, player_count: usize },
}
