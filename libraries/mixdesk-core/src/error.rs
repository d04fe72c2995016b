/// Core error types for Mixdesk
use thiserror::Error;

/// Result type alias using `MixdeskError`
pub type Result<T> = std::result::Result<T, MixdeskError>;

/// Core error type for Mixdesk collaborators
#[derive(Error, Debug)]
pub enum MixdeskError {
    /// Sample buffer violates its invariants
    #[error("Invalid sample buffer: {0}")]
    InvalidBuffer(String),

    /// Fetching the raw bytes failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Decoding the raw bytes into samples failed
    #[error("Decode error: {0}")]
    Decode(String),

    /// Persisting derived metadata failed
    #[error("Store error: {0}")]
    Store(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The operation was cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,
}

impl MixdeskError {
    /// Create an invalid buffer error
    pub fn invalid_buffer(msg: impl Into<String>) -> Self {
        Self::InvalidBuffer(msg.into())
    }

    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether this error is a caller-driven cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
