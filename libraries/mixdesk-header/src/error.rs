/// Header parsing errors
use thiserror::Error;

/// Result type alias using `ParseIncomplete`
pub type Result<T> = std::result::Result<T, ParseIncomplete>;

/// Why a header could not be read to the end
///
/// Never surfaced by [`crate::parse`], which falls back to the file
/// extension instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIncomplete {
    /// Fewer bytes than the read needs
    #[error("Truncated: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// No known magic bytes
    #[error("Unrecognized container")]
    Unrecognized,

    /// Chunk walk reached the end without the wanted chunk
    #[error("No '{0}' chunk found")]
    MissingChunk(&'static str),

    /// First FLAC metadata block is not STREAMINFO
    #[error("Expected STREAMINFO, found metadata block type {0}")]
    NotStreamInfo(u8),

    /// Bit depth field is zero or negative
    #[error("Invalid bit depth: {0}")]
    InvalidBitDepth(i32),
}
