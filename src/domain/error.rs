use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid collection name: {0}")]
    InvalidCollectionName(String),

    #[error("Embedding dimension {actual} does not match collection dimensionality {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Duplicate id in batch: {0}")]
    DuplicateId(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Store(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Store(format!("metadata encoding: {e}"))
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::InvalidInput(s.to_string())
    }
}
