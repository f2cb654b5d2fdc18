/// Error types for persistence and history operations
use thiserror::Error;
use uuid::Uuid;

/// Failures reported by the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Nothing has been saved under the history key yet
    #[error("no saved history")]
    DataUnavailable,

    /// The stored blob exists but could not be parsed
    #[error("failed to decode saved history")]
    DataDecoding(#[source] serde_json::Error),

    /// The in-memory entries could not be serialized
    #[error("failed to encode history")]
    DataEncoding(#[source] serde_json::Error),

    /// The slot rejected the write
    #[error("failed to write history")]
    StorageWrite(#[source] anyhow::Error),

    /// The slot could not be read
    #[error("failed to read history")]
    StorageRead(#[source] anyhow::Error),
}

impl StoreError {
    /// Message shown to the user, if this error should be surfaced at all
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            StoreError::DataUnavailable => None,
            StoreError::DataDecoding(_) => Some("Failed to load saved data."),
            StoreError::DataEncoding(_) | StoreError::StorageWrite(_) => Some("Error saving data."),
            StoreError::StorageRead(_) => Some("An unexpected error occurred."),
        }
    }
}

/// Failures reported by history operations
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no clipboard entry with id {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HistoryError {
    /// Message shown to the user for this error
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            HistoryError::NotFound(_) => Some("That clipboard item no longer exists."),
            HistoryError::Store(e) => e.user_notice(),
        }
    }
}

/// Failures starting the clipboard watcher
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("clipboard watcher must be started inside a tokio runtime")]
    NoRuntime,
}
