//! Mixdesk Core
//!
//! Shared types, collaborator traits, and error handling for the Mixdesk
//! audio analysis engine.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `SampleBuffer`, `FileFormat`, `AudioMetadataRecord`, etc.
//! - **Collaborator Traits**: `AudioFetcher`, `AudioDecoder`, `MetadataStore`
//! - **Error Handling**: Unified `MixdeskError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mixdesk_core::{SampleBuffer, SampleRate};
//!
//! // One second of stereo silence
//! let buffer = SampleBuffer::new(vec![vec![0.0; 48_000]; 2], SampleRate::DVD_QUALITY).unwrap();
//! assert_eq!(buffer.frames(), 48_000);
//! assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{MixdeskError, Result};
pub use traits::{AudioDecoder, AudioFetcher, MetadataStore};

pub use types::{
    // Audio types
    SampleBuffer, SampleRate,
    // Metadata
    AudioHeaderMeta, AudioMetadataRecord, FileFormat, StoredMetadata,
    // Identifiers
    AudioVersionId,
};

/// Re-exported so collaborators share one cancellation type
pub use tokio_util::sync::CancellationToken;
