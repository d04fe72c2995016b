/// Analysis pipeline errors
use mixdesk_core::MixdeskError;
use mixdesk_loudness::LoudnessError;
use thiserror::Error;

/// Result type alias using `AnalysisError`
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Why an analysis run did not produce a record
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The caller cancelled the run; nothing was written
    #[error("Analysis cancelled")]
    Cancelled,

    /// Raw bytes could not be fetched
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Raw bytes could not be decoded
    #[error("Decode failed: {0}")]
    Decode(String),

    /// The metadata store rejected a read or write
    #[error("Store error: {0}")]
    Store(String),

    /// A blocking measurement task panicked or was aborted
    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl AnalysisError {
    /// Wrap a fetcher error, keeping cancellation distinct
    pub fn fetch(err: MixdeskError) -> Self {
        match err {
            MixdeskError::Cancelled => Self::Cancelled,
            other => Self::Fetch(other.to_string()),
        }
    }

    /// Wrap a decoder error, keeping cancellation distinct
    pub fn decode(err: MixdeskError) -> Self {
        match err {
            MixdeskError::Cancelled => Self::Cancelled,
            other => Self::Decode(other.to_string()),
        }
    }

    /// Wrap a store error
    pub fn store(err: MixdeskError) -> Self {
        match err {
            MixdeskError::Cancelled => Self::Cancelled,
            other => Self::Store(other.to_string()),
        }
    }

    /// Whether the caller cancelled the run
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the run failed (as opposed to being cancelled)
    pub fn is_failure(&self) -> bool {
        !self.is_cancelled()
    }
}

impl From<LoudnessError> for AnalysisError {
    fn from(err: LoudnessError) -> Self {
        match err {
            LoudnessError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

impl From<AnalysisError> for MixdeskError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Cancelled => MixdeskError::Cancelled,
            AnalysisError::Fetch(msg) => MixdeskError::Fetch(msg),
            AnalysisError::Decode(msg) | AnalysisError::Task(msg) => MixdeskError::Decode(msg),
            AnalysisError::Store(msg) => MixdeskError::Store(msg),
        }
    }
}
