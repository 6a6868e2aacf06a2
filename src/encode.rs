use crate::format::{
    len_u64, signed_argument, Header, ARRAY_INDEFINITE, BREAK, F32, F64, FALSE, MAJOR_ARRAY,
    MAJOR_BYTES, MAJOR_MAP, MAJOR_TAG, MAJOR_TEXT, MAJOR_UNSIGNED, MAP_INDEFINITE, NULL, TRUE,
    UNDEFINED,
};
use crate::sink::Sink;
use crate::CborError;

/// Streaming writer that emits the most compact form of every value.
///
/// Write calls do not return errors. The first sink failure is latched, later writes are
/// dropped, and the failure is reported once by [`Encoder::check_error`] (or
/// [`Encoder::finish`]) at the end of the batch.
#[derive(Debug)]
pub struct Encoder<S> {
    sink: S,
    error: Option<CborError>,
}

impl<S: Sink> Encoder<S> {
    /// Create an encoder writing into `sink`.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self { sink, error: None }
    }

    /// Return the first latched write failure, if any.
    ///
    /// # Errors
    ///
    /// Returns the sink error that stopped the encoder.
    pub const fn check_error(&self) -> Result<(), CborError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.sink.position()
    }

    /// Borrow the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the encoder and return the sink, ignoring any latched error.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Consume the encoder and return the sink if every write succeeded.
    ///
    /// # Errors
    ///
    /// Returns the latched write failure.
    pub fn finish(self) -> Result<S, CborError> {
        self.check_error()?;
        Ok(self.sink)
    }

    fn put(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.sink.write(bytes) {
            log::debug!("encoder stopped: {err}");
            self.error = Some(err);
        }
    }

    fn put_u8(&mut self, byte: u8) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.sink.write_u8(byte) {
            log::debug!("encoder stopped: {err}");
            self.error = Some(err);
        }
    }

    #[inline]
    fn put_header(&mut self, major: u8, value: u64) {
        self.put(Header::new(major, value).as_bytes());
    }

    /// Write `null`.
    pub fn write_null(&mut self) {
        self.put_u8(NULL);
    }

    /// Write `undefined`.
    pub fn write_undefined(&mut self) {
        self.put_u8(UNDEFINED);
    }

    /// Write a boolean.
    pub fn write_bool(&mut self, value: bool) {
        self.put_u8(if value { TRUE } else { FALSE });
    }

    /// Write a `u8`.
    pub fn write_u8(&mut self, value: u8) {
        self.write_u64(u64::from(value));
    }

    /// Write a `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.write_u64(u64::from(value));
    }

    /// Write a `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.write_u64(u64::from(value));
    }

    /// Write a `u64` at its minimal width.
    pub fn write_u64(&mut self, value: u64) {
        self.put_header(MAJOR_UNSIGNED, value);
    }

    /// Write an `i8`.
    pub fn write_i8(&mut self, value: i8) {
        self.write_i64(i64::from(value));
    }

    /// Write an `i16`.
    pub fn write_i16(&mut self, value: i16) {
        self.write_i64(i64::from(value));
    }

    /// Write an `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.write_i64(i64::from(value));
    }

    /// Write an `i64`; negative values are written as the magnitude `-1 - value`.
    pub fn write_i64(&mut self, value: i64) {
        let (major, arg) = signed_argument(value);
        self.put_header(major, arg);
    }

    /// Write a single-precision float (always 5 bytes).
    pub fn write_f32(&mut self, value: f32) {
        let mut buf = [F32, 0, 0, 0, 0];
        buf[1..].copy_from_slice(&value.to_bits().to_be_bytes());
        self.put(&buf);
    }

    /// Write a double-precision float (always 9 bytes).
    pub fn write_f64(&mut self, value: f64) {
        let mut buf = [F64, 0, 0, 0, 0, 0, 0, 0, 0];
        buf[1..].copy_from_slice(&value.to_bits().to_be_bytes());
        self.put(&buf);
    }

    /// Write a text string.
    pub fn write_str(&mut self, value: &str) {
        self.put_header(MAJOR_TEXT, len_u64(value.len()));
        self.put(value.as_bytes());
    }

    /// Write a byte string.
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.put_header(MAJOR_BYTES, len_u64(value.len()));
        self.put(value);
    }

    /// Write a definite array header; `len` elements must follow.
    pub fn write_array_len(&mut self, len: u32) {
        self.put_header(MAJOR_ARRAY, u64::from(len));
    }

    /// Write a definite map header; `len` key/value pairs must follow.
    pub fn write_map_len(&mut self, len: u32) {
        self.put_header(MAJOR_MAP, u64::from(len));
    }

    /// Open an indefinite array, closed by [`Encoder::write_break`].
    pub fn write_array_indefinite(&mut self) {
        self.put_u8(ARRAY_INDEFINITE);
    }

    /// Open an indefinite map, closed by [`Encoder::write_break`].
    pub fn write_map_indefinite(&mut self) {
        self.put_u8(MAP_INDEFINITE);
    }

    /// Close the innermost indefinite container.
    pub fn write_break(&mut self) {
        self.put_u8(BREAK);
    }

    /// Write a tag header; the tagged value must follow.
    pub fn write_tag(&mut self, tag: u64) {
        self.put_header(MAJOR_TAG, tag);
    }

    /// Splice already encoded bytes as-is.
    pub fn write_raw(&mut self, encoded: &[u8]) {
        self.put(encoded);
    }
}
