/// Container format tags
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Container format of an uploaded audio file
///
/// Serialized as its tag string (`"WAV"`, `"FLAC"`, ...). `Other` carries the
/// uppercased extension of an unrecognized file name, `Audio` is used when
/// there is no extension to go on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FileFormat {
    Wav,
    Aiff,
    Flac,
    Mp3,
    Aac,
    M4a,
    /// Generic fallback when nothing identifies the format
    Audio,
    /// Unrecognized extension, uppercased
    Other(String),
}

impl FileFormat {
    /// Guess the format from a file name's extension
    ///
    /// Matching is case-insensitive. A missing name or extension yields `Audio`.
    pub fn from_file_name(file_name: Option<&str>) -> Self {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty());

        match extension {
            Some(ext) => Self::from_extension(ext),
            None => Self::Audio,
        }
    }

    /// Map a bare extension (without the dot) to a format
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "wav" => Self::Wav,
            "aif" | "aiff" => Self::Aiff,
            "flac" => Self::Flac,
            "mp3" => Self::Mp3,
            "aac" => Self::Aac,
            "m4a" => Self::M4a,
            _ => Self::Other(extension.to_uppercase()),
        }
    }

    /// Tag string as persisted
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wav => "WAV",
            Self::Aiff => "AIFF",
            Self::Flac => "FLAC",
            Self::Mp3 => "MP3",
            Self::Aac => "AAC",
            Self::M4a => "M4A",
            Self::Audio => "AUDIO",
            Self::Other(tag) => tag,
        }
    }

    /// MIME type for the known container formats
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            Self::Wav => Some("audio/wav"),
            Self::Aiff => Some("audio/aiff"),
            Self::Flac => Some("audio/flac"),
            Self::Mp3 => Some("audio/mpeg"),
            Self::Aac => Some("audio/aac"),
            Self::M4a => Some("audio/mp4"),
            Self::Audio | Self::Other(_) => None,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FileFormat> for String {
    fn from(format: FileFormat) -> Self {
        format.as_str().to_string()
    }
}

impl From<String> for FileFormat {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "WAV" => Self::Wav,
            "AIFF" => Self::Aiff,
            "FLAC" => Self::Flac,
            "MP3" => Self::Mp3,
            "AAC" => Self::Aac,
            "M4A" => Self::M4a,
            "AUDIO" => Self::Audio,
            _ => Self::Other(tag),
        }
    }
}
