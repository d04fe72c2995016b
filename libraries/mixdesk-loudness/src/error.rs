//! Error types for loudness measurement

use thiserror::Error;

/// Result type for loudness operations
pub type Result<T> = std::result::Result<T, LoudnessError>;

/// Errors that can occur during loudness measurement
///
/// Degenerate input (silence, audio shorter than one block) is not an error;
/// it measures as negative infinity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoudnessError {
    /// The caller cancelled the measurement
    #[error("Loudness measurement cancelled")]
    Cancelled,
}

impl From<LoudnessError> for mixdesk_core::MixdeskError {
    fn from(err: LoudnessError) -> Self {
        match err {
            LoudnessError::Cancelled => mixdesk_core::MixdeskError::Cancelled,
        }
    }
}
