use crate::format::{header_len, len_u64, signed_argument};
use crate::CborError;

/// Computes the exact encoded length of a write sequence without producing bytes.
///
/// Every `write_*` method adds exactly what the same call on an [`Encoder`](crate::Encoder)
/// would emit; both go through [`header_len`](crate::format::header_len).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sizer {
    len: usize,
}

impl Sizer {
    /// Create a sizer at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { len: 0 }
    }

    /// Bytes accumulated so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been sized yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reset the accumulated length to zero.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Sizing never fails.
    ///
    /// # Errors
    ///
    /// Never returns an error.
    pub const fn check_error(&self) -> Result<(), CborError> {
        Ok(())
    }

    #[inline]
    fn add(&mut self, n: usize) {
        self.len = self.len.saturating_add(n);
    }

    /// Size `null`.
    pub fn write_null(&mut self) {
        self.add(1);
    }

    /// Size `undefined`.
    pub fn write_undefined(&mut self) {
        self.add(1);
    }

    /// Size a boolean.
    pub fn write_bool(&mut self, _value: bool) {
        self.add(1);
    }

    /// Size a `u8`.
    pub fn write_u8(&mut self, value: u8) {
        self.write_u64(u64::from(value));
    }

    /// Size a `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.write_u64(u64::from(value));
    }

    /// Size a `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.write_u64(u64::from(value));
    }

    /// Size a `u64`.
    pub fn write_u64(&mut self, value: u64) {
        self.add(header_len(value));
    }

    /// Size an `i8`.
    pub fn write_i8(&mut self, value: i8) {
        self.write_i64(i64::from(value));
    }

    /// Size an `i16`.
    pub fn write_i16(&mut self, value: i16) {
        self.write_i64(i64::from(value));
    }

    /// Size an `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.write_i64(i64::from(value));
    }

    /// Size an `i64`.
    pub fn write_i64(&mut self, value: i64) {
        let (_, arg) = signed_argument(value);
        self.add(header_len(arg));
    }

    /// Size a single-precision float.
    pub fn write_f32(&mut self, _value: f32) {
        self.add(5);
    }

    /// Size a double-precision float.
    pub fn write_f64(&mut self, _value: f64) {
        self.add(9);
    }

    /// Size a text string.
    pub fn write_str(&mut self, value: &str) {
        self.add(header_len(len_u64(value.len())));
        self.add(value.len());
    }

    /// Size a byte string.
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.add(header_len(len_u64(value.len())));
        self.add(value.len());
    }

    /// Size a definite array header.
    pub fn write_array_len(&mut self, len: u32) {
        self.add(header_len(u64::from(len)));
    }

    /// Size a definite map header.
    pub fn write_map_len(&mut self, len: u32) {
        self.add(header_len(u64::from(len)));
    }

    /// Size an indefinite array header.
    pub fn write_array_indefinite(&mut self) {
        self.add(1);
    }

    /// Size an indefinite map header.
    pub fn write_map_indefinite(&mut self) {
        self.add(1);
    }

    /// Size a break token.
    pub fn write_break(&mut self) {
        self.add(1);
    }

    /// Size a tag header.
    pub fn write_tag(&mut self, tag: u64) {
        self.add(header_len(tag));
    }

    /// Size pre-encoded bytes.
    pub fn write_raw(&mut self, encoded: &[u8]) {
        self.add(encoded.len());
    }
}
