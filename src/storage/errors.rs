use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Read failed for key '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Write failed for key '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
