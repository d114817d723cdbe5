//! Position-tracking reader and text helpers for replay bytes.

use std::borrow::Cow;

use encoding_rs::UTF_8;
use tracing::trace;

use crate::error::{Error, Result};

/// A position-tracking reader over a borrowed byte slice.
///
/// # Example
///
/// ```
/// use wrpl_core::scan::ByteBuffer;
///
/// let data = [0x05, b'A', b'l', b'i', b'c', b'e', 0x01];
/// let mut buf = ByteBuffer::new(&data);
///
/// assert_eq!(buf.read_length_prefixed().unwrap(), b"Alice");
/// assert_eq!(buf.read_u8().unwrap(), 1);
/// assert_eq!(buf.remaining(), 0);
/// ```
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader that starts at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Result<Self> {
        let mut buf = Self::new(data);
        buf.set_position(pos)?;
        Ok(buf)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::OutOfBounds {
                offset: pos,
                len: 0,
                available: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Returns a slice at `offset` without moving the read position.
    pub fn slice_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(Error::OutOfBounds {
                offset,
                len,
                available: self.data.len(),
            })
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.slice_at(self.pos, count)?;
        self.pos += count;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Reads a one-byte length followed by that many bytes.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = self.read_u8()? as usize;
        match self.read_bytes(len) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    pub fn read_u8_at(&self, offset: usize) -> Result<u8> {
        Ok(self.slice_at(offset, 1)?[0])
    }

    pub fn read_u32_at(&self, offset: usize) -> Result<u32> {
        let bytes = self.slice_at(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Decodes UTF-8 strictly, returning `None` for malformed input.
///
/// Names must decode exactly or they cannot be joined against other sections.
pub fn decode_text_strict(bytes: &[u8]) -> Option<Cow<'_, str>> {
    UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
}

/// Decodes UTF-8, substituting U+FFFD for malformed sequences.
pub fn decode_text_lossy(bytes: &[u8]) -> String {
    let (decoded, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if had_errors {
        trace!(
            "UTF-8 decoding had errors for bytes: {:?}",
            &bytes[..bytes.len().min(20)]
        );
    }
    decoded.into_owned()
}

/// True for a non-empty token made only of ASCII digits.
pub fn is_digit_token(token: &[u8]) -> bool {
    !token.is_empty() && token.iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_at_little_endian() {
        let data = [0x00, 0x05, 0x00, 0x00, 0x00];
        let buf = ByteBuffer::new(&data);
        assert_eq!(buf.read_u32_at(1).unwrap(), 5);
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn test_read_past_end_is_error() {
        let data = [0x01, 0x02];
        let buf = ByteBuffer::new(&data);
        assert!(matches!(
            buf.read_u32_at(0),
            Err(Error::OutOfBounds { available: 2, .. })
        ));
        assert!(buf.read_u8_at(2).is_err());
    }

    #[test]
    fn test_length_prefixed_truncated_restores_position() {
        let data = [0x04, b'a', b'b'];
        let mut buf = ByteBuffer::new(&data);
        assert!(buf.read_length_prefixed().is_err());
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn test_length_prefixed_zero_length() {
        let data = [0x00, 0x07];
        let mut buf = ByteBuffer::new(&data);
        assert_eq!(buf.read_length_prefixed().unwrap(), b"");
        assert_eq!(buf.read_u8().unwrap(), 7);
    }

    #[test]
    fn test_at_rejects_position_past_end() {
        assert!(ByteBuffer::at(&[1, 2], 3).is_err());
        assert_eq!(ByteBuffer::at(&[1, 2], 2).unwrap().remaining(), 0);
    }

    #[test]
    fn test_is_digit_token() {
        assert!(is_digit_token(b"12345"));
        assert!(!is_digit_token(b""));
        assert!(!is_digit_token(b"12a45"));
        assert!(!is_digit_token(b"-CLAN-"));
    }

    #[test]
    fn test_decode_text_strict_rejects_invalid() {
        assert_eq!(decode_text_strict(b"Alice").as_deref(), Some("Alice"));
        assert!(decode_text_strict(&[0xFF, 0xFE]).is_none());
    }

    #[test]
    fn test_decode_text_lossy_replaces() {
        assert_eq!(decode_text_lossy(&[b'g', 0xFF]), "g\u{FFFD}");
        assert_eq!(decode_text_lossy("蜜蜂".as_bytes()), "蜜蜂");
    }
}
