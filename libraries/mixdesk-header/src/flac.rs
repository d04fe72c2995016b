/// FLAC STREAMINFO bit depth
use crate::error::{ParseIncomplete, Result};
use crate::reader::ByteReader;
use crate::sniff::Container;
use crate::HeaderFields;

/// First metadata block header, right after `fLaC`
const BLOCK_HEADER_OFFSET: usize = 4;

/// STREAMINFO payload start
const PAYLOAD_OFFSET: usize = 8;

/// Payload bytes 12 and 13 hold channels-1 (3 bits), bits-per-sample-1 (5 bits)
/// and the top of the sample count
const BITS_FIELD_OFFSET: usize = PAYLOAD_OFFSET + 12;

const STREAMINFO: u8 = 0;

pub(crate) fn read_flac(bytes: &[u8]) -> Result<HeaderFields> {
    let mut reader = ByteReader::at(bytes, BLOCK_HEADER_OFFSET)?;
    // High bit flags the last metadata block
    let block_type = reader.u8()? & 0x7F;
    if block_type != STREAMINFO {
        return Err(ParseIncomplete::NotStreamInfo(block_type));
    }

    reader.seek(BITS_FIELD_OFFSET)?;
    let high = reader.u8()?;
    let low = reader.u8()?;
    let stored = ((high & 0x01) << 4) | (low >> 4);

    Ok(HeaderFields {
        container: Container::Flac,
        bit_depth: Some(u16::from(stored) + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `fLaC` plus a STREAMINFO block for 44.1 kHz stereo at `bits`
    fn streaminfo(bits: u8) -> Vec<u8> {
        let mut bytes = b"fLaC".to_vec();
        // Last block, type 0, length 34
        bytes.extend([0x80, 0x00, 0x00, 0x22]);

        let mut payload = [0u8; 34];
        payload[0..2].copy_from_slice(&4096u16.to_be_bytes());
        payload[2..4].copy_from_slice(&4096u16.to_be_bytes());
        // 20-bit sample rate, 3-bit channels-1, 5-bit bits-1
        let rate: u32 = 44_100;
        let channels_minus_one: u32 = 1;
        let packed = (rate << 12) | (channels_minus_one << 9) | (u32::from(bits - 1) << 4);
        payload[10..14].copy_from_slice(&packed.to_be_bytes());
        bytes.extend(payload);
        bytes
    }

    #[test]
    fn decodes_common_depths() {
        for bits in [8, 16, 20, 24, 32] {
            assert_eq!(read_flac(&streaminfo(bits)).unwrap().bit_depth, Some(u16::from(bits)));
        }
    }

    #[test]
    fn other_first_block_is_rejected() {
        let mut bytes = streaminfo(16);
        // VORBIS_COMMENT
        bytes[4] = 0x04;
        assert_eq!(read_flac(&bytes), Err(ParseIncomplete::NotStreamInfo(4)));
    }

    #[test]
    fn last_block_flag_is_ignored() {
        let mut bytes = streaminfo(24);
        bytes[4] = 0x00;
        assert_eq!(read_flac(&bytes).unwrap().bit_depth, Some(24));
    }

    #[test]
    fn truncated_streaminfo() {
        let bytes = &streaminfo(24)[..20];
        assert!(matches!(
            read_flac(bytes),
            Err(ParseIncomplete::Truncated { .. })
        ));
    }
}
