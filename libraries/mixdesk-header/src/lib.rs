//! Mixdesk Header
//!
//! Recovers the container format and true bit depth of an audio file from
//! its raw bytes. Decoders hand back floating-point samples, so this is the
//! only place the stored sample width survives.
//!
//! Supported containers:
//! - WAV (`fmt ` chunk, little-endian)
//! - AIFF / AIFC (`COMM` chunk, big-endian)
//! - FLAC (STREAMINFO)
//! - MP3 and AAC/M4A (format only, no bit depth)
//!
//! Parsing never fails. Short, unrecognized or malformed input is tagged by
//! its file-name extension with no bit depth.
//!
//! # Example
//!
//! ```rust
//! use mixdesk_core::FileFormat;
//! use mixdesk_header::parse;
//!
//! let meta = parse(b"not audio at all", Some("track.mp3"));
//! assert_eq!(meta.file_format, FileFormat::Mp3);
//! assert_eq!(meta.bit_depth, None);
//! ```

mod error;
mod flac;
mod iff;
pub mod reader;
mod sniff;

pub use error::{ParseIncomplete, Result};
pub use reader::{ByteReader, Endian};
pub use sniff::{sniff, Container, MIN_HEADER_LEN};

use mixdesk_core::{AudioHeaderMeta, FileFormat};

/// What a container parser read from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    pub container: Container,
    pub bit_depth: Option<u16>,
}

/// Container format and bit depth of `bytes`
///
/// Falls back to the extension of `file_name` (or `AUDIO` without one)
/// whenever the header cannot be read.
pub fn parse(bytes: &[u8], file_name: Option<&str>) -> AudioHeaderMeta {
    match read_fields(bytes) {
        Ok(fields) => AudioHeaderMeta {
            bit_depth: fields.bit_depth,
            file_format: fields.container.file_format(file_name),
        },
        Err(reason) => {
            let fallback = FileFormat::from_file_name(file_name);
            tracing::debug!(%reason, format = %fallback, "Header unreadable, using file extension");
            AudioHeaderMeta::format_only(fallback)
        }
    }
}

/// Run the parser for whichever container `bytes` starts with
///
/// # Errors
/// Returns why the header could not be read
pub fn read_fields(bytes: &[u8]) -> Result<HeaderFields> {
    if bytes.len() < MIN_HEADER_LEN {
        return Err(ParseIncomplete::Truncated {
            offset: 0,
            needed: MIN_HEADER_LEN,
            available: bytes.len(),
        });
    }

    match sniff(bytes).ok_or(ParseIncomplete::Unrecognized)? {
        Container::Wav => iff::read_wav(bytes),
        Container::Aiff => iff::read_aiff(bytes),
        Container::Flac => flac::read_flac(bytes),
        container @ (Container::Mp3 | Container::Mp4) => Ok(HeaderFields {
            container,
            bit_depth: None,
        }),
    }
}
