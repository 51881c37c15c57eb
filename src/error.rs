use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowboardError>;

#[derive(Debug, Error)]
pub enum FlowboardError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid column: {0}. Valid columns: todo, inprogress, done")]
    InvalidColumn(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Board invariant violated: {0}")]
    InvariantViolation(String),
}
