use thiserror::Error;

/// Result type for identifier generation and resolution.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("value already claimed: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A static parameter is invalid. Never transient.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The collision resolver ran out of attempts.
    #[error("failed to generate a unique identifier after {attempts} attempts")]
    Generation { attempts: usize },
    #[error("entropy source failed: {0}")]
    Entropy(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
