use crate::{CborError, ErrorCode};

/// A read cursor over a fully resident byte slice.
///
/// All multi-byte reads are big-endian and advance the cursor only on success. A failed read
/// reports `UnexpectedEof` at the offset where it started.
#[derive(Debug, Clone, Copy)]
pub struct Source<'de> {
    data: &'de [u8],
    pos: usize,
}

impl<'de> Source<'de> {
    /// Create a cursor at the start of `data`.
    #[must_use]
    pub const fn new(data: &'de [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a cursor at `pos` within `data`.
    #[must_use]
    pub const fn with_pos(data: &'de [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// The whole underlying input.
    #[must_use]
    pub const fn data(&self) -> &'de [u8] {
        self.data
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` once every byte has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read the next byte without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if no bytes remain.
    pub fn peek_u8(&self) -> Result<u8, CborError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or_else(|| CborError::new(ErrorCode::UnexpectedEof, self.pos))
    }

    /// Read one byte.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if no bytes remain.
    pub fn read_u8(&mut self) -> Result<u8, CborError> {
        let b = self.peek_u8()?;
        self.pos += 1;
        Ok(b)
    }

    /// Borrow the next `n` bytes and advance past them.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if fewer than `n` bytes remain.
    pub fn read_exact(&mut self, n: usize) -> Result<&'de [u8], CborError> {
        let off = self.pos;
        let end = self
            .pos
            .checked_add(n)
            .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, off))?;
        let s = self
            .data
            .get(off..end)
            .ok_or_else(|| CborError::new(ErrorCode::UnexpectedEof, off))?;
        self.pos = end;
        Ok(s)
    }

    /// Advance past `n` bytes without materializing them.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if fewer than `n` bytes remain.
    pub fn discard(&mut self, n: usize) -> Result<(), CborError> {
        self.read_exact(n).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CborError> {
        let s = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(s);
        Ok(out)
    }

    /// Read a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if fewer than 2 bytes remain.
    pub fn read_be_u16(&mut self) -> Result<u16, CborError> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Read a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if fewer than 4 bytes remain.
    pub fn read_be_u32(&mut self) -> Result<u32, CborError> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Read a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if fewer than 8 bytes remain.
    pub fn read_be_u64(&mut self) -> Result<u64, CborError> {
        self.read_array().map(u64::from_be_bytes)
    }

    /// Reinterpret the next 4 bytes as an IEEE-754 single.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> Result<f32, CborError> {
        self.read_be_u32().map(f32::from_bits)
    }

    /// Reinterpret the next 8 bytes as an IEEE-754 double.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if fewer than 8 bytes remain.
    pub fn read_f64(&mut self) -> Result<f64, CborError> {
        self.read_be_u64().map(f64::from_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_read_does_not_advance() {
        let mut src = Source::new(&[0x01, 0x02, 0x03]);
        let err = src.read_be_u32().unwrap_err();
        assert_eq!(err, CborError::new(ErrorCode::UnexpectedEof, 0));
        assert_eq!(src.position(), 0);
        assert_eq!(src.read_be_u16().unwrap(), 0x0102);
        assert_eq!(src.remaining(), 1);
    }

    #[test]
    fn discard_reports_start_offset() {
        let mut src = Source::with_pos(&[0u8; 4], 1);
        assert_eq!(
            src.discard(4).unwrap_err(),
            CborError::new(ErrorCode::UnexpectedEof, 1)
        );
        src.discard(3).unwrap();
        assert!(src.is_empty());
        assert_eq!(src.peek_u8().unwrap_err().offset, 4);
    }
}
