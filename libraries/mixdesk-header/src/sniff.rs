/// Container identification by magic bytes
use mixdesk_core::FileFormat;

/// Shortest buffer worth sniffing; anything smaller uses the file extension
pub const MIN_HEADER_LEN: usize = 12;

/// A container recognized from its leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// RIFF/WAVE
    Wav,
    /// IFF FORM with AIFF or AIFC form type
    Aiff,
    /// Native FLAC stream
    Flac,
    /// ID3 tag or MPEG audio frame sync
    Mp3,
    /// ISO base media (`ftyp` box), AAC or M4A
    Mp4,
}

impl Container {
    /// Format tag for this container
    ///
    /// `ftyp` files are tagged AAC only when the file name says `.aac`.
    pub fn file_format(self, file_name: Option<&str>) -> FileFormat {
        match self {
            Self::Wav => FileFormat::Wav,
            Self::Aiff => FileFormat::Aiff,
            Self::Flac => FileFormat::Flac,
            Self::Mp3 => FileFormat::Mp3,
            Self::Mp4 => match FileFormat::from_file_name(file_name) {
                FileFormat::Aac => FileFormat::Aac,
                _ => FileFormat::M4a,
            },
        }
    }
}

/// Identify the container from its magic bytes
///
/// Returns `None` for buffers under [`MIN_HEADER_LEN`] bytes and for
/// anything unrecognized.
pub fn sniff(bytes: &[u8]) -> Option<Container> {
    if bytes.len() < MIN_HEADER_LEN {
        return None;
    }

    let form_type = &bytes[8..12];
    match &bytes[0..4] {
        b"RIFF" if form_type == b"WAVE" => return Some(Container::Wav),
        b"FORM" if form_type == b"AIFF" || form_type == b"AIFC" => {
            return Some(Container::Aiff)
        }
        b"fLaC" => return Some(Container::Flac),
        _ => {}
    }

    if &bytes[0..3] == b"ID3" || is_mpeg_sync(bytes[0], bytes[1]) {
        return Some(Container::Mp3);
    }

    if &bytes[4..8] == b"ftyp" {
        return Some(Container::Mp4);
    }

    None
}

/// 11-bit MPEG frame sync: 0xFF then a byte with its top three bits set
fn is_mpeg_sync(first: u8, second: u8) -> bool {
    first == 0xFF && second & 0xE0 == 0xE0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(prefix: &[u8]) -> Vec<u8> {
        let mut bytes = prefix.to_vec();
        bytes.resize(32, 0);
        bytes
    }

    #[test]
    fn recognizes_magic() {
        assert_eq!(sniff(&padded(b"RIFF\0\0\0\0WAVE")), Some(Container::Wav));
        assert_eq!(sniff(&padded(b"FORM\0\0\0\0AIFF")), Some(Container::Aiff));
        assert_eq!(sniff(&padded(b"FORM\0\0\0\0AIFC")), Some(Container::Aiff));
        assert_eq!(sniff(&padded(b"fLaC")), Some(Container::Flac));
        assert_eq!(sniff(&padded(b"ID3\x04")), Some(Container::Mp3));
        assert_eq!(sniff(&padded(&[0xFF, 0xFB, 0x90])), Some(Container::Mp3));
        assert_eq!(sniff(&padded(b"\0\0\0\x20ftypM4A ")), Some(Container::Mp4));
    }

    #[test]
    fn riff_needs_wave_form_type() {
        assert_eq!(sniff(&padded(b"RIFF\0\0\0\0AVI ")), None);
        assert_eq!(sniff(&padded(b"FORM\0\0\0\08SVX")), None);
    }

    #[test]
    fn weak_sync_is_not_mp3() {
        // Only two of the top three bits set
        assert_eq!(sniff(&padded(&[0xFF, 0xC0])), None);
    }

    #[test]
    fn short_buffers_are_not_sniffed() {
        assert_eq!(sniff(b"fLaC"), None);
        assert_eq!(sniff(b"RIFF\0\0\0\0WAV"), None);
    }

    #[test]
    fn mp4_format_follows_extension() {
        assert_eq!(Container::Mp4.file_format(Some("song.aac")), FileFormat::Aac);
        assert_eq!(Container::Mp4.file_format(Some("SONG.AAC")), FileFormat::Aac);
        assert_eq!(Container::Mp4.file_format(Some("song.m4a")), FileFormat::M4a);
        assert_eq!(Container::Mp4.file_format(Some("song.mp4")), FileFormat::M4a);
        assert_eq!(Container::Mp4.file_format(None), FileFormat::M4a);
        assert_eq!(Container::Wav.file_format(Some("song.aac")), FileFormat::Wav);
    }
}
