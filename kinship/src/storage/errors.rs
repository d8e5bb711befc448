//! Error types for storage operations

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error
    #[error("Query error: {0}")]
    Query(String),

    /// Data not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint rejected the write
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The write lost a commit race with a concurrent transaction
    #[error("Transaction conflict: {0}")]
    TransactionConflict(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

impl StorageError {
    /// Classify a database error raised by a write, separating unique index
    /// violations and commit conflicts from everything else
    pub(crate) fn from_write(context: &str, err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        if message.contains("already contains") || message.contains("already exists") {
            StorageError::AlreadyExists(format!("{}: {}", context, message))
        } else if message.contains("read or write conflict") || message.contains("can be retried")
        {
            StorageError::TransactionConflict(format!("{}: {}", context, message))
        } else {
            StorageError::Query(format!("{}: {}", context, message))
        }
    }
}
