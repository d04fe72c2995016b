//! Bounds-checked binary reader
//!
//! Every read names its byte order and fails with
//! [`ParseIncomplete::Truncated`] instead of reading past the buffer.

use crate::error::{ParseIncomplete, Result};

/// Byte order of a multi-byte field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Cursor over a byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Reader positioned at the start of `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Reader positioned at `offset`
    ///
    /// # Errors
    /// Returns `Truncated` if `offset` lies past the end
    pub fn at(bytes: &'a [u8], offset: usize) -> Result<Self> {
        let mut reader = Self::new(bytes);
        reader.seek(offset)?;
        Ok(reader)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left after the current position
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Move to an absolute offset (the end itself is allowed)
    ///
    /// # Errors
    /// Returns `Truncated` if `offset` lies past the end
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.bytes.len() {
            return Err(ParseIncomplete::Truncated {
                offset,
                needed: 0,
                available: 0,
            });
        }
        self.position = offset;
        Ok(())
    }

    /// Advance by `count` bytes
    ///
    /// # Errors
    /// Returns `Truncated` if fewer than `count` bytes remain
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    /// Borrow the next `count` bytes
    ///
    /// # Errors
    /// Returns `Truncated` if fewer than `count` bytes remain
    pub fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let start = self.position;
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(ParseIncomplete::Truncated {
                offset: start,
                needed: count,
                available: self.remaining(),
            })?;

        let bytes = self.bytes;
        self.position = end;
        Ok(&bytes[start..end])
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Four-byte chunk or marker identifier
    pub fn tag(&mut self) -> Result<[u8; 4]> {
        self.array::<4>()
    }

    pub fn u8(&mut self) -> Result<u8> {
        let [byte] = self.array::<1>()?;
        Ok(byte)
    }

    pub fn u16(&mut self, endian: Endian) -> Result<u16> {
        let raw = self.array::<2>()?;
        Ok(match endian {
            Endian::Little => u16::from_le_bytes(raw),
            Endian::Big => u16::from_be_bytes(raw),
        })
    }

    pub fn i16(&mut self, endian: Endian) -> Result<i16> {
        let raw = self.array::<2>()?;
        Ok(match endian {
            Endian::Little => i16::from_le_bytes(raw),
            Endian::Big => i16::from_be_bytes(raw),
        })
    }

    pub fn u32(&mut self, endian: Endian) -> Result<u32> {
        let raw = self.array::<4>()?;
        Ok(match endian {
            Endian::Little => u32::from_le_bytes(raw),
            Endian::Big => u32::from_be_bytes(raw),
        })
    }
}
