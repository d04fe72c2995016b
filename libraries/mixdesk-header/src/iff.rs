//! WAV and AIFF headers
//!
//! Both are chunked IFF layouts starting at byte 12: a four-byte id, a
//! four-byte size, then the payload padded to an even length. They differ
//! only in byte order and in where the bit depth lives.

use crate::error::{ParseIncomplete, Result};
use crate::reader::{ByteReader, Endian};
use crate::sniff::Container;
use crate::HeaderFields;

const FIRST_CHUNK_OFFSET: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// `wBitsPerSample` within the `fmt ` chunk, from chunk start
const WAV_BITS_OFFSET: usize = 22;

/// `sampleSize` within the `COMM` chunk, from chunk start
const AIFF_BITS_OFFSET: usize = 14;

/// Bit depth from the `fmt ` chunk of a RIFF/WAVE file
pub(crate) fn read_wav(bytes: &[u8]) -> Result<HeaderFields> {
    let start = find_chunk(bytes, *b"fmt ", "fmt ", Endian::Little)?;
    let bits = ByteReader::at(bytes, start + WAV_BITS_OFFSET)?.u16(Endian::Little)?;
    if bits == 0 {
        return Err(ParseIncomplete::InvalidBitDepth(0));
    }

    Ok(HeaderFields {
        container: Container::Wav,
        bit_depth: Some(bits),
    })
}

/// Bit depth from the `COMM` chunk of an AIFF/AIFC file
pub(crate) fn read_aiff(bytes: &[u8]) -> Result<HeaderFields> {
    let start = find_chunk(bytes, *b"COMM", "COMM", Endian::Big)?;
    let bits = ByteReader::at(bytes, start + AIFF_BITS_OFFSET)?.i16(Endian::Big)?;
    let bits = u16::try_from(bits)
        .ok()
        .filter(|&bits| bits > 0)
        .ok_or(ParseIncomplete::InvalidBitDepth(i32::from(bits)))?;

    Ok(HeaderFields {
        container: Container::Aiff,
        bit_depth: Some(bits),
    })
}

/// Offset of the first chunk with id `wanted`
fn find_chunk(
    bytes: &[u8],
    wanted: [u8; 4],
    name: &'static str,
    endian: Endian,
) -> Result<usize> {
    let mut reader = ByteReader::at(bytes, FIRST_CHUNK_OFFSET)?;

    while reader.remaining() >= CHUNK_HEADER_LEN {
        let start = reader.position();
        let id = reader.tag()?;
        let size = reader.u32(endian)? as usize;

        if id == wanted {
            return Ok(start);
        }

        tracing::trace!(
            chunk = %String::from_utf8_lossy(&id),
            size,
            offset = start,
            "Skipping chunk"
        );
        // Payloads are padded to an even length
        reader.skip(size.saturating_add(size % 2))?;
    }

    Err(ParseIncomplete::MissingChunk(name))
}
