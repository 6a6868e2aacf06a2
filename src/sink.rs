#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{CborError, ErrorCode};

/// Destination for encoded bytes.
///
/// A failed write must leave the sink unchanged; the [`Encoder`](crate::Encoder) latches the first
/// failure and stops writing.
pub trait Sink {
    /// Append `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot hold the bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<(), CborError>;

    /// Append one byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot hold the byte.
    fn write_u8(&mut self, byte: u8) -> Result<(), CborError> {
        self.write(&[byte])
    }

    /// Number of bytes written so far.
    fn position(&self) -> usize;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, bytes: &[u8]) -> Result<(), CborError> {
        (**self).write(bytes)
    }

    fn write_u8(&mut self, byte: u8) -> Result<(), CborError> {
        (**self).write_u8(byte)
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

/// Fixed-capacity sink over a caller-provided buffer.
///
/// Size the buffer with a [`Sizer`](crate::Sizer) pass to avoid `BufferFull`.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    /// Wrap `buf`; writing starts at offset 0.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Total capacity of the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Borrow the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Consume the sink and return the written prefix of the buffer.
    #[must_use]
    pub fn into_written(self) -> &'a mut [u8] {
        let (head, _) = self.buf.split_at_mut(self.pos);
        head
    }
}

impl Sink for SliceSink<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), CborError> {
        let end = self
            .pos
            .checked_add(bytes.len())
            .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, self.pos))?;
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or_else(|| CborError::new(ErrorCode::BufferFull, self.pos))?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// Growable sink backed by a `Vec<u8>`, using fallible reservation.
#[cfg(feature = "alloc")]
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    buf: Vec<u8>,
}

#[cfg(feature = "alloc")]
impl VecSink {
    /// Create an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create a sink with room for `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns `AllocationFailed` if the reservation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, CborError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(capacity)
            .map_err(|_| CborError::new(ErrorCode::AllocationFailed, 0))?;
        Ok(Self { buf })
    }

    /// Borrow the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the sink and return the encoded bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(feature = "alloc")]
impl Sink for VecSink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), CborError> {
        self.buf
            .try_reserve(bytes.len())
            .map_err(|_| CborError::new(ErrorCode::AllocationFailed, self.buf.len()))?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn write_u8(&mut self, byte: u8) -> Result<(), CborError> {
        if self.buf.len() == self.buf.capacity() {
            self.buf
                .try_reserve(1)
                .map_err(|_| CborError::new(ErrorCode::AllocationFailed, self.buf.len()))?;
        }
        self.buf.push(byte);
        Ok(())
    }

    fn position(&self) -> usize {
        self.buf.len()
    }
}
