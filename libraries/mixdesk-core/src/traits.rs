/// Collaborator traits for the analysis pipeline
use crate::error::Result;
use crate::types::{AudioMetadataRecord, AudioVersionId, SampleBuffer, StoredMetadata};
use async_trait::async_trait;
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

/// Source of raw audio bytes
///
/// Implementers fetch the unmodified bytes of one audio asset. Implementations
/// must return `MixdeskError::Cancelled` promptly once `cancel` fires.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Fetch all bytes at `source` (a URL or path, depending on the implementation)
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or the token is cancelled
    async fn fetch(&self, source: &str, cancel: &CancellationToken) -> Result<Bytes>;
}

/// Audio decoder trait
///
/// Implementers decode raw container bytes into a planar `SampleBuffer`.
/// Codec support is the implementer's concern.
#[async_trait]
pub trait AudioDecoder: Send + Sync {
    /// Decode `bytes` into samples
    ///
    /// `file_name` is a format hint only; implementations must still probe
    /// the bytes.
    ///
    /// # Errors
    /// Returns an error if the bytes cannot be decoded or the token is cancelled
    async fn decode(
        &self,
        bytes: Bytes,
        file_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<SampleBuffer>;
}

/// Persistence collaborator for derived metadata
///
/// `update` is a single idempotent "set these fields on this version" call.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Load whatever metadata is currently stored for a version
    async fn load(&self, id: &AudioVersionId) -> Result<Option<StoredMetadata>>;

    /// Set the derived metadata fields for a version
    async fn update(&self, id: &AudioVersionId, record: &AudioMetadataRecord) -> Result<()>;
}
