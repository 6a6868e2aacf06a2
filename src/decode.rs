use crate::format::{
    info_of, major_type_of, MajorType, BREAK, F16, F32, F64, FALSE, INFO_INDEFINITE, INFO_U16,
    INFO_U32, INFO_U64, INFO_U8, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP, MAJOR_NEGATIVE, MAJOR_TAG,
    MAJOR_TEXT, MAJOR_UNSIGNED, MAX_INLINE, NULL, TRUE, UNDEFINED,
};
use crate::int::DecodeInt;
use crate::source::Source;
use crate::{utf8, CborError, ErrorCode};

/// Length of an array or map header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// Element count (pairs, for maps).
    Definite(u32),
    /// Elements continue until a break token.
    Indefinite,
}

impl Length {
    /// The definite count, if any.
    #[must_use]
    pub const fn definite(self) -> Option<u32> {
        match self {
            Self::Definite(n) => Some(n),
            Self::Indefinite => None,
        }
    }

    /// Returns `true` for the indefinite marker.
    #[must_use]
    pub const fn is_indefinite(self) -> bool {
        matches!(self, Self::Indefinite)
    }
}

/// Streaming reader over an encoded byte slice.
///
/// Values are read one at a time, in stream order. Container headers only report their length;
/// the caller reads the elements (and, for indefinite containers, the closing break).
///
/// Every method returns an explicit error. A failed read may leave the cursor past the prefix
/// byte, so a decoder should be discarded after its first error.
#[derive(Debug, Clone)]
pub struct Decoder<'de> {
    source: Source<'de>,
}

impl<'de> Decoder<'de> {
    /// Construct a decoder at the start of `bytes`.
    #[must_use]
    pub const fn new(bytes: &'de [u8]) -> Self {
        Self {
            source: Source::new(bytes),
        }
    }

    /// Construct a decoder over an existing source cursor.
    #[must_use]
    pub const fn from_source(source: Source<'de>) -> Self {
        Self { source }
    }

    /// Current byte offset in the input.
    #[must_use]
    #[inline]
    pub const fn position(&self) -> usize {
        self.source.position()
    }

    /// Number of unread bytes.
    #[must_use]
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.source.remaining()
    }

    /// Returns `true` once the whole input has been consumed.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Consume the decoder and return its cursor.
    #[must_use]
    pub const fn into_source(self) -> Source<'de> {
        self.source
    }

    #[inline]
    pub(crate) fn source_mut(&mut self) -> &mut Source<'de> {
        &mut self.source
    }

    #[inline]
    pub(crate) const fn data(&self) -> &'de [u8] {
        self.source.data()
    }

    /// Peek at the next prefix byte.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` at end of input.
    #[inline]
    pub fn peek_byte(&self) -> Result<u8, CborError> {
        self.source.peek_u8()
    }

    /// Peek at the major type of the next item.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` at end of input.
    pub fn peek_major_type(&self) -> Result<MajorType, CborError> {
        self.peek_byte().map(MajorType::of)
    }

    #[inline]
    fn read_header(&mut self) -> Result<(u8, usize), CborError> {
        let off = self.position();
        let ib = self.source.read_u8()?;
        Ok((ib, off))
    }

    /// Read the argument selected by additional info `info`.
    ///
    /// Accepts every width, minimal or not.
    pub(crate) fn read_argument(&mut self, info: u8, off: usize) -> Result<u64, CborError> {
        match info {
            0..=MAX_INLINE => Ok(u64::from(info)),
            INFO_U8 => Ok(u64::from(self.source.read_u8()?)),
            INFO_U16 => Ok(u64::from(self.source.read_be_u16()?)),
            INFO_U32 => Ok(u64::from(self.source.read_be_u32()?)),
            INFO_U64 => self.source.read_be_u64(),
            _ => Err(CborError::new(ErrorCode::ReservedAdditionalInfo, off)),
        }
    }

    /// Consume a null token if it is next.
    ///
    /// Leaves the cursor untouched and returns `false` for any other item.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` at end of input.
    pub fn peek_is_null(&mut self) -> Result<bool, CborError> {
        if self.peek_byte()? == NULL {
            self.source.discard(1)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Returns `true` if the next byte is a break token, without consuming it.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` at end of input.
    pub fn peek_is_break(&self) -> Result<bool, CborError> {
        Ok(self.peek_byte()? == BREAK)
    }

    /// Read the break token closing an indefinite container.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedBreak` for any other byte.
    pub fn read_break(&mut self) -> Result<(), CborError> {
        self.expect_token(BREAK, ErrorCode::ExpectedBreak)
    }

    fn expect_token(&mut self, token: u8, code: ErrorCode) -> Result<(), CborError> {
        let (ib, off) = self.read_header()?;
        if ib == token {
            Ok(())
        } else {
            Err(CborError::new(code, off))
        }
    }

    /// Read a null token.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedNull` for any other byte.
    pub fn read_null(&mut self) -> Result<(), CborError> {
        self.expect_token(NULL, ErrorCode::ExpectedNull)
    }

    /// Read an undefined token.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedUndefined` for any other byte.
    pub fn read_undefined(&mut self) -> Result<(), CborError> {
        self.expect_token(UNDEFINED, ErrorCode::ExpectedUndefined)
    }

    /// Read a boolean token.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedBool` for any byte other than `false`/`true`.
    pub fn read_bool(&mut self) -> Result<bool, CborError> {
        let (ib, off) = self.read_header()?;
        match ib {
            FALSE => Ok(false),
            TRUE => Ok(true),
            _ => Err(CborError::new(ErrorCode::ExpectedBool, off)),
        }
    }

    /// Read an integer of any encoded width into `T`.
    ///
    /// Inline and extended forms of either sign are accepted; the value must fit `T`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedInteger` for a non-integer item, `IntegerOverflow` if the value does not
    /// fit `T`, or `ExpectedUnsigned` if `T` is unsigned and the value is negative.
    pub fn read_int<T: DecodeInt>(&mut self) -> Result<T, CborError> {
        let (ib, off) = self.read_header()?;
        match major_type_of(ib) {
            MAJOR_UNSIGNED => {
                let v = self.read_argument(info_of(ib), off)?;
                T::from_unsigned(v, off)
            }
            MAJOR_NEGATIVE => {
                let n = self.read_argument(info_of(ib), off)?;
                T::from_negative(n, off)
            }
            _ => Err(CborError::new(ErrorCode::ExpectedInteger, off)),
        }
    }

    /// Read a `u8`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::read_int`].
    pub fn read_u8(&mut self) -> Result<u8, CborError> {
        self.read_int()
    }

    /// Read a `u16`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::read_int`].
    pub fn read_u16(&mut self) -> Result<u16, CborError> {
        self.read_int()
    }

    /// Read a `u32`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::read_int`].
    pub fn read_u32(&mut self) -> Result<u32, CborError> {
        self.read_int()
    }

    /// Read a `u64`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::read_int`].
    pub fn read_u64(&mut self) -> Result<u64, CborError> {
        self.read_int()
    }

    /// Read an `i8`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::read_int`].
    pub fn read_i8(&mut self) -> Result<i8, CborError> {
        self.read_int()
    }

    /// Read an `i16`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::read_int`].
    pub fn read_i16(&mut self) -> Result<i16, CborError> {
        self.read_int()
    }

    /// Read an `i32`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::read_int`].
    pub fn read_i32(&mut self) -> Result<i32, CborError> {
        self.read_int()
    }

    /// Read an `i64`.
    ///
    /// # Errors
    ///
    /// See [`Decoder::read_int`].
    pub fn read_i64(&mut self) -> Result<i64, CborError> {
        self.read_int()
    }

    /// Read a single-precision float.
    ///
    /// # Errors
    ///
    /// Returns `HalfFloatUnsupported` for a half float and `ExpectedFloat` for anything other than
    /// the 32-bit float token.
    pub fn read_f32(&mut self) -> Result<f32, CborError> {
        let (ib, off) = self.read_header()?;
        match ib {
            F32 => self.source.read_f32(),
            F16 => Err(CborError::new(ErrorCode::HalfFloatUnsupported, off)),
            _ => Err(CborError::new(ErrorCode::ExpectedFloat, off)),
        }
    }

    /// Read a double-precision float; 32-bit floats are widened losslessly.
    ///
    /// # Errors
    ///
    /// Returns `HalfFloatUnsupported` for a half float and `ExpectedFloat` for any other non-float.
    pub fn read_f64(&mut self) -> Result<f64, CborError> {
        let (ib, off) = self.read_header()?;
        match ib {
            F32 => self.source.read_f32().map(f64::from),
            F64 => self.source.read_f64(),
            F16 => Err(CborError::new(ErrorCode::HalfFloatUnsupported, off)),
            _ => Err(CborError::new(ErrorCode::ExpectedFloat, off)),
        }
    }

    fn read_string_header(&mut self, major: u8, code: ErrorCode) -> Result<u32, CborError> {
        let (ib, off) = self.read_header()?;
        if major_type_of(ib) != major {
            return Err(CborError::new(code, off));
        }
        let info = info_of(ib);
        if info == INFO_INDEFINITE {
            return Err(CborError::new(ErrorCode::IndefiniteStringUnsupported, off));
        }
        let len = self.read_argument(info, off)?;
        u32::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, off))
    }

    fn read_payload(&mut self, len: u32) -> Result<&'de [u8], CborError> {
        let off = self.position();
        let len = usize::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, off))?;
        self.source.read_exact(len)
    }

    /// Read a text string header and return its byte length.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedText` for a non-text item, `IndefiniteStringUnsupported` for an
    /// indefinite-length string, or `LengthOverflow` if the length exceeds 32 bits.
    pub fn read_string_len(&mut self) -> Result<u32, CborError> {
        self.read_string_header(MAJOR_TEXT, ErrorCode::ExpectedText)
    }

    /// Read a text string as raw bytes, without UTF-8 validation.
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::read_string_len`], plus `UnexpectedEof` if the payload is truncated.
    pub fn read_string_raw(&mut self) -> Result<&'de [u8], CborError> {
        let len = self.read_string_len()?;
        self.read_payload(len)
    }

    /// Read a text string.
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::read_string_raw`], plus `Utf8Invalid`.
    pub fn read_str(&mut self) -> Result<&'de str, CborError> {
        let off = self.position();
        let bytes = self.read_string_raw()?;
        utf8::validate(bytes, off)
    }

    /// Read a byte string header and return its length.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedBytes` for a non-bytes item, `IndefiniteStringUnsupported` for an
    /// indefinite-length byte string, or `LengthOverflow` if the length exceeds 32 bits.
    pub fn read_bytes_len(&mut self) -> Result<u32, CborError> {
        self.read_string_header(MAJOR_BYTES, ErrorCode::ExpectedBytes)
    }

    /// Read a byte string.
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::read_bytes_len`], plus `UnexpectedEof` if the payload is truncated.
    pub fn read_bytes(&mut self) -> Result<&'de [u8], CborError> {
        let len = self.read_bytes_len()?;
        self.read_payload(len)
    }

    fn read_container_header(&mut self, major: u8, code: ErrorCode) -> Result<Length, CborError> {
        let (ib, off) = self.read_header()?;
        if major_type_of(ib) != major {
            return Err(CborError::new(code, off));
        }
        let info = info_of(ib);
        if info == INFO_INDEFINITE {
            return Ok(Length::Indefinite);
        }
        let len = self.read_argument(info, off)?;
        let len = u32::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, off))?;
        Ok(Length::Definite(len))
    }

    /// Read an array header.
    ///
    /// For [`Length::Indefinite`] the caller reads elements until [`Decoder::peek_is_break`]
    /// reports the closing break.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedArray` for a non-array item or `LengthOverflow` if the count exceeds 32 bits.
    pub fn read_array_len(&mut self) -> Result<Length, CborError> {
        self.read_container_header(MAJOR_ARRAY, ErrorCode::ExpectedArray)
    }

    /// Read a map header; a definite count is in key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedMap` for a non-map item or `LengthOverflow` if the count exceeds 32 bits.
    pub fn read_map_len(&mut self) -> Result<Length, CborError> {
        self.read_container_header(MAJOR_MAP, ErrorCode::ExpectedMap)
    }

    /// Count down one element of a container opened with `remaining`.
    ///
    /// Returns `false` once the container is exhausted; for an indefinite container this
    /// consumes the closing break.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if an indefinite container is never closed.
    pub fn next_element(&mut self, remaining: &mut Length) -> Result<bool, CborError> {
        match remaining {
            Length::Definite(0) => Ok(false),
            Length::Definite(n) => {
                *n -= 1;
                Ok(true)
            }
            Length::Indefinite => {
                if self.peek_is_break()? {
                    self.read_break()?;
                    return Ok(false);
                }
                Ok(true)
            }
        }
    }

    /// Read a tag header and return the tag id.
    ///
    /// The tagged value is the next item and must be read separately.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedTag` for a non-tag item.
    pub fn read_tag(&mut self) -> Result<u64, CborError> {
        let (ib, off) = self.read_header()?;
        if major_type_of(ib) != MAJOR_TAG {
            return Err(CborError::new(ErrorCode::ExpectedTag, off));
        }
        self.read_argument(info_of(ib), off)
    }
}
