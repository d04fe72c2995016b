mod audio;
mod format;
mod ids;
mod metadata;

pub use audio::{SampleBuffer, SampleRate};
pub use format::FileFormat;
pub use ids::AudioVersionId;
pub use metadata::{AudioHeaderMeta, AudioMetadataRecord, StoredMetadata};
