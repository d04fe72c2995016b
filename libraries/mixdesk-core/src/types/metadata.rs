/// Derived audio metadata
use super::format::FileFormat;
use serde::{Deserialize, Serialize};

/// What the container header says about a file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioHeaderMeta {
    /// True bit depth, when the container carries it
    pub bit_depth: Option<u16>,
    /// Container format, or the extension-based guess
    pub file_format: FileFormat,
}

impl AudioHeaderMeta {
    /// Header metadata with no bit depth
    pub fn format_only(file_format: FileFormat) -> Self {
        Self {
            bit_depth: None,
            file_format,
        }
    }
}

/// Fields written to an audio version after analysis
///
/// `measured_lufs` is `None` when no audio passed loudness gating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadataRecord {
    pub measured_lufs: Option<f64>,
    pub sample_rate: u32,
    pub bit_depth: Option<u16>,
    pub file_format: FileFormat,
}

impl AudioMetadataRecord {
    /// Merge loudness, decoded sample rate and header fields
    ///
    /// A non-finite loudness (the silence sentinel) is stored as `None`.
    pub fn new(integrated_lufs: f64, sample_rate: u32, header: AudioHeaderMeta) -> Self {
        Self {
            measured_lufs: integrated_lufs.is_finite().then_some(integrated_lufs),
            sample_rate,
            bit_depth: header.bit_depth,
            file_format: header.file_format,
        }
    }

    /// Loudness with the silence sentinel restored
    pub fn loudness(&self) -> f64 {
        self.measured_lufs.unwrap_or(f64::NEG_INFINITY)
    }
}

/// Metadata currently persisted for a version, possibly partial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredMetadata {
    pub measured_lufs: Option<f64>,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u16>,
    pub file_format: Option<FileFormat>,
}

impl StoredMetadata {
    /// Whether analysis already ran for this version
    ///
    /// Bit depth is not required: compressed formats never have one.
    pub fn is_populated(&self) -> bool {
        self.measured_lufs.is_some() && self.sample_rate.is_some() && self.file_format.is_some()
    }
}

impl From<AudioMetadataRecord> for StoredMetadata {
    fn from(record: AudioMetadataRecord) -> Self {
        Self {
            measured_lufs: record.measured_lufs,
            sample_rate: Some(record.sample_rate),
            bit_depth: record.bit_depth,
            file_format: Some(record.file_format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_is_stored_as_null() {
        let record = AudioMetadataRecord::new(
            f64::NEG_INFINITY,
            48_000,
            AudioHeaderMeta::format_only(FileFormat::Mp3),
        );
        assert_eq!(record.measured_lufs, None);
        assert_eq!(record.loudness(), f64::NEG_INFINITY);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "measured_lufs": null,
                "sample_rate": 48000,
                "bit_depth": null,
                "file_format": "MP3",
            })
        );
    }

    #[test]
    fn header_fields_are_merged() {
        let header = AudioHeaderMeta {
            bit_depth: Some(24),
            file_format: FileFormat::Wav,
        };
        let record = AudioMetadataRecord::new(-14.2, 44_100, header);
        assert_eq!(record.measured_lufs, Some(-14.2));
        assert_eq!(record.bit_depth, Some(24));
        assert_eq!(record.file_format, FileFormat::Wav);
    }

    #[test]
    fn populated_ignores_bit_depth() {
        let stored = StoredMetadata {
            measured_lufs: Some(-9.0),
            sample_rate: Some(44_100),
            bit_depth: None,
            file_format: Some(FileFormat::Mp3),
        };
        assert!(stored.is_populated());
        assert!(!StoredMetadata::default().is_populated());
    }
}
