use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AchievementError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
