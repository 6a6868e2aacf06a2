#[cfg(feature = "alloc")]
use alloc::string::String;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::sink::{Sink, SliceSink};
use crate::size::Sizer;
use crate::{CborError, ErrorCode};

#[cfg(feature = "alloc")]
use crate::decode::Length;
#[cfg(feature = "alloc")]
use crate::sink::VecSink;

/// The write surface shared by [`Encoder`] and [`Sizer`].
///
/// [`CborEncode`] implementations are written once against this trait; the sizing pass and the
/// encoding pass then run the same code and cannot disagree on length.
pub trait CborWrite {
    /// Bytes produced (or counted) so far.
    fn position(&self) -> usize;
    /// Return the first latched write failure, if any.
    ///
    /// # Errors
    ///
    /// Returns the latched failure.
    fn check_error(&self) -> Result<(), CborError>;
    /// Write `null`.
    fn write_null(&mut self);
    /// Write `undefined`.
    fn write_undefined(&mut self);
    /// Write a boolean.
    fn write_bool(&mut self, value: bool);
    /// Write a `u8`.
    fn write_u8(&mut self, value: u8);
    /// Write a `u16`.
    fn write_u16(&mut self, value: u16);
    /// Write a `u32`.
    fn write_u32(&mut self, value: u32);
    /// Write a `u64`.
    fn write_u64(&mut self, value: u64);
    /// Write an `i8`.
    fn write_i8(&mut self, value: i8);
    /// Write an `i16`.
    fn write_i16(&mut self, value: i16);
    /// Write an `i32`.
    fn write_i32(&mut self, value: i32);
    /// Write an `i64`.
    fn write_i64(&mut self, value: i64);
    /// Write a single-precision float.
    fn write_f32(&mut self, value: f32);
    /// Write a double-precision float.
    fn write_f64(&mut self, value: f64);
    /// Write a text string.
    fn write_str(&mut self, value: &str);
    /// Write a byte string.
    fn write_bytes(&mut self, value: &[u8]);
    /// Write a definite array header.
    fn write_array_len(&mut self, len: u32);
    /// Write a definite map header.
    fn write_map_len(&mut self, len: u32);
    /// Open an indefinite array.
    fn write_array_indefinite(&mut self);
    /// Open an indefinite map.
    fn write_map_indefinite(&mut self);
    /// Close the innermost indefinite container.
    fn write_break(&mut self);
    /// Write a tag header.
    fn write_tag(&mut self, tag: u64);
    /// Splice already encoded bytes.
    fn write_raw(&mut self, encoded: &[u8]);
}

macro_rules! forward_cbor_write {
    ($ty:ty) => {
        fn check_error(&self) -> Result<(), CborError> {
            <$ty>::check_error(self)
        }
        fn write_null(&mut self) {
            <$ty>::write_null(self);
        }
        fn write_undefined(&mut self) {
            <$ty>::write_undefined(self);
        }
        fn write_bool(&mut self, value: bool) {
            <$ty>::write_bool(self, value);
        }
        fn write_u8(&mut self, value: u8) {
            <$ty>::write_u8(self, value);
        }
        fn write_u16(&mut self, value: u16) {
            <$ty>::write_u16(self, value);
        }
        fn write_u32(&mut self, value: u32) {
            <$ty>::write_u32(self, value);
        }
        fn write_u64(&mut self, value: u64) {
            <$ty>::write_u64(self, value);
        }
        fn write_i8(&mut self, value: i8) {
            <$ty>::write_i8(self, value);
        }
        fn write_i16(&mut self, value: i16) {
            <$ty>::write_i16(self, value);
        }
        fn write_i32(&mut self, value: i32) {
            <$ty>::write_i32(self, value);
        }
        fn write_i64(&mut self, value: i64) {
            <$ty>::write_i64(self, value);
        }
        fn write_f32(&mut self, value: f32) {
            <$ty>::write_f32(self, value);
        }
        fn write_f64(&mut self, value: f64) {
            <$ty>::write_f64(self, value);
        }
        fn write_str(&mut self, value: &str) {
            <$ty>::write_str(self, value);
        }
        fn write_bytes(&mut self, value: &[u8]) {
            <$ty>::write_bytes(self, value);
        }
        fn write_array_len(&mut self, len: u32) {
            <$ty>::write_array_len(self, len);
        }
        fn write_map_len(&mut self, len: u32) {
            <$ty>::write_map_len(self, len);
        }
        fn write_array_indefinite(&mut self) {
            <$ty>::write_array_indefinite(self);
        }
        fn write_map_indefinite(&mut self) {
            <$ty>::write_map_indefinite(self);
        }
        fn write_break(&mut self) {
            <$ty>::write_break(self);
        }
        fn write_tag(&mut self, tag: u64) {
            <$ty>::write_tag(self, tag);
        }
        fn write_raw(&mut self, encoded: &[u8]) {
            <$ty>::write_raw(self, encoded);
        }
    };
}

impl<S: Sink> CborWrite for Encoder<S> {
    fn position(&self) -> usize {
        Self::position(self)
    }

    forward_cbor_write!(Encoder<S>);
}

impl CborWrite for Sizer {
    fn position(&self) -> usize {
        self.len()
    }

    forward_cbor_write!(Sizer);
}

/// Encode a Rust value through a [`CborWrite`].
pub trait CborEncode {
    /// Write `self` to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented (for example a collection longer than
    /// `u32::MAX`). Sink failures are latched by the writer, not returned here.
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError>;
}

/// Decode a Rust value from a [`Decoder`].
pub trait CborDecode<'de>: Sized {
    /// Read one value.
    ///
    /// # Errors
    ///
    /// Returns an error if the next item does not match `Self`.
    fn decode(decoder: &mut Decoder<'de>) -> Result<Self, CborError>;
}

/// Marker trait for values that encode as array elements inside `Vec<T>`.
///
/// Not implemented for `u8`: `Vec<u8>` encodes as a byte string.
pub trait CborArrayElem {}

/// A map represented as ordered key/value entries.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapEntries<K, V>(pub Vec<(K, V)>);

#[cfg(feature = "alloc")]
impl<K, V> MapEntries<K, V> {
    /// Wrap an existing vector of entries.
    #[must_use]
    pub const fn new(entries: Vec<(K, V)>) -> Self {
        Self(entries)
    }
}

/// One complete encoded item, borrowed from the input without decoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCbor<'de>(pub &'de [u8]);

impl<'de> RawCbor<'de> {
    /// The encoded bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &'de [u8] {
        self.0
    }
}

/// Convert a collection length to a header count.
///
/// # Errors
///
/// Returns `LengthOverflow` if `len` exceeds `u32::MAX`.
pub fn container_len<W: CborWrite + ?Sized>(len: usize, w: &W) -> Result<u32, CborError> {
    u32::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, w.position()))
}

/// Exact encoded length of `value`.
///
/// # Errors
///
/// Returns any error from `value.encode`.
pub fn encoded_len<T: CborEncode + ?Sized>(value: &T) -> Result<usize, CborError> {
    let mut sizer = Sizer::new();
    value.encode(&mut sizer)?;
    Ok(sizer.len())
}

/// Encode `value` into `buf`, returning the number of bytes written.
///
/// # Errors
///
/// Returns `BufferFull` if `buf` is too small, or any error from `value.encode`.
pub fn encode_into<T: CborEncode + ?Sized>(value: &T, buf: &mut [u8]) -> Result<usize, CborError> {
    let mut enc = Encoder::new(SliceSink::new(buf));
    value.encode(&mut enc)?;
    let sink = enc.finish()?;
    Ok(sink.position())
}

/// Encode `value` into an exactly sized vector.
///
/// Runs a sizing pass first, so the output is allocated once.
///
/// # Errors
///
/// Returns `AllocationFailed` if the buffer cannot be reserved, or any error from `value.encode`.
#[cfg(feature = "alloc")]
pub fn to_vec<T: CborEncode + ?Sized>(value: &T) -> Result<Vec<u8>, CborError> {
    let len = encoded_len(value)?;
    let mut enc = Encoder::new(VecSink::with_capacity(len)?);
    value.encode(&mut enc)?;
    let sink = enc.finish()?;
    debug_assert_eq!(sink.position(), len);
    Ok(sink.into_vec())
}

/// Decode exactly one value spanning all of `bytes`.
///
/// # Errors
///
/// Returns `TrailingBytes` if input remains after the value, or any decode error.
pub fn from_slice<'de, T: CborDecode<'de>>(bytes: &'de [u8]) -> Result<T, CborError> {
    let mut decoder = Decoder::new(bytes);
    let value = T::decode(&mut decoder)?;
    if !decoder.is_empty() {
        return Err(CborError::new(ErrorCode::TrailingBytes, decoder.position()));
    }
    Ok(value)
}

/// Capacity hint for a decoded collection: never more than the bytes left to read.
#[cfg(feature = "alloc")]
fn capacity_hint(len: Length, decoder: &Decoder<'_>) -> usize {
    len.definite()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
        .min(decoder.remaining())
}

impl CborEncode for () {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        w.write_null();
        Ok(())
    }
}

impl CborDecode<'_> for () {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, CborError> {
        decoder.read_null()
    }
}

impl CborEncode for bool {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        w.write_bool(*self);
        Ok(())
    }
}

impl CborDecode<'_> for bool {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, CborError> {
        decoder.read_bool()
    }
}

macro_rules! impl_scalar {
    ($($t:ty => $write:ident, $read:ident;)*) => {$(
        impl CborEncode for $t {
            fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
                w.$write(*self);
                Ok(())
            }
        }

        impl CborDecode<'_> for $t {
            fn decode(decoder: &mut Decoder<'_>) -> Result<Self, CborError> {
                decoder.$read()
            }
        }
    )*};
}

impl_scalar! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
}

impl CborEncode for &str {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        w.write_str(self);
        Ok(())
    }
}

impl<'de> CborDecode<'de> for &'de str {
    fn decode(decoder: &mut Decoder<'de>) -> Result<Self, CborError> {
        decoder.read_str()
    }
}

impl CborEncode for &[u8] {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        w.write_bytes(self);
        Ok(())
    }
}

impl<'de> CborDecode<'de> for &'de [u8] {
    fn decode(decoder: &mut Decoder<'de>) -> Result<Self, CborError> {
        decoder.read_bytes()
    }
}

impl CborEncode for RawCbor<'_> {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        w.write_raw(self.0);
        Ok(())
    }
}

impl<'de> CborDecode<'de> for RawCbor<'de> {
    fn decode(decoder: &mut Decoder<'de>) -> Result<Self, CborError> {
        let start = decoder.position();
        decoder.skip()?;
        let end = decoder.position();
        Ok(Self(&decoder.data()[start..end]))
    }
}

impl<T: CborEncode> CborEncode for Option<T> {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        match self {
            Some(v) => v.encode(w),
            None => {
                w.write_null();
                Ok(())
            }
        }
    }
}

impl<'de, T: CborDecode<'de>> CborDecode<'de> for Option<T> {
    fn decode(decoder: &mut Decoder<'de>) -> Result<Self, CborError> {
        if decoder.peek_is_null()? {
            Ok(None)
        } else {
            T::decode(decoder).map(Some)
        }
    }
}

#[cfg(feature = "alloc")]
impl CborEncode for String {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        w.write_str(self);
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl CborDecode<'_> for String {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, CborError> {
        decoder.read_str().map(Into::into)
    }
}

#[cfg(feature = "alloc")]
impl CborEncode for Vec<u8> {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        w.write_bytes(self);
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl CborDecode<'_> for Vec<u8> {
    fn decode(decoder: &mut Decoder<'_>) -> Result<Self, CborError> {
        decoder.read_bytes().map(<[u8]>::to_vec)
    }
}

#[cfg(feature = "alloc")]
impl<T: CborEncode + CborArrayElem> CborEncode for Vec<T> {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        let len = container_len(self.len(), w)?;
        w.write_array_len(len);
        for item in self {
            item.encode(w)?;
        }
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl<'de, T: CborDecode<'de> + CborArrayElem> CborDecode<'de> for Vec<T> {
    fn decode(decoder: &mut Decoder<'de>) -> Result<Self, CborError> {
        let mut remaining = decoder.read_array_len()?;
        let mut out = Self::with_capacity(capacity_hint(remaining, decoder));
        while decoder.next_element(&mut remaining)? {
            out.push(T::decode(decoder)?);
        }
        Ok(out)
    }
}

#[cfg(feature = "alloc")]
impl<K: CborEncode, V: CborEncode> CborEncode for MapEntries<K, V> {
    fn encode<W: CborWrite>(&self, w: &mut W) -> Result<(), CborError> {
        let len = container_len(self.0.len(), w)?;
        w.write_map_len(len);
        for (k, v) in &self.0 {
            k.encode(w)?;
            v.encode(w)?;
        }
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl<'de, K: CborDecode<'de>, V: CborDecode<'de>> CborDecode<'de> for MapEntries<K, V> {
    fn decode(decoder: &mut Decoder<'de>) -> Result<Self, CborError> {
        let mut remaining = decoder.read_map_len()?;
        let mut out = Vec::with_capacity(capacity_hint(remaining, decoder) / 2);
        while decoder.next_element(&mut remaining)? {
            let key = K::decode(decoder)?;
            let value = V::decode(decoder)?;
            out.push((key, value));
        }
        Ok(Self(out))
    }
}

impl CborArrayElem for bool {}
impl CborArrayElem for u16 {}
impl CborArrayElem for u32 {}
impl CborArrayElem for u64 {}
impl CborArrayElem for i8 {}
impl CborArrayElem for i16 {}
impl CborArrayElem for i32 {}
impl CborArrayElem for i64 {}
impl CborArrayElem for f32 {}
impl CborArrayElem for f64 {}
impl CborArrayElem for &str {}
impl CborArrayElem for &[u8] {}
impl CborArrayElem for RawCbor<'_> {}
impl<T: CborArrayElem> CborArrayElem for Option<T> {}
#[cfg(feature = "alloc")]
impl CborArrayElem for String {}
#[cfg(feature = "alloc")]
impl<T> CborArrayElem for Vec<T> {}
#[cfg(feature = "alloc")]
impl<K, V> CborArrayElem for MapEntries<K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_cbor_captures_one_item() {
        let bytes = [0x82, 0x01, 0x9f, 0xff, 0x05];
        let mut decoder = Decoder::new(&bytes);
        let raw = RawCbor::decode(&mut decoder).unwrap();
        assert_eq!(raw.as_bytes(), &[0x82, 0x01, 0x9f, 0xff]);
        assert_eq!(decoder.read_u8().unwrap(), 5);
    }

    #[test]
    fn encode_into_reports_buffer_full() {
        let mut buf = [0u8; 2];
        let err = encode_into(&"abc", &mut buf).unwrap_err();
        assert_eq!(err.code, ErrorCode::BufferFull);

        let mut buf = [0u8; 4];
        assert_eq!(encode_into(&"abc", &mut buf).unwrap(), 4);
        assert_eq!(buf, [0x63, b'a', b'b', b'c']);
    }

    #[test]
    fn from_slice_rejects_trailing_bytes() {
        let err = from_slice::<u8>(&[0x01, 0x02]).unwrap_err();
        assert_eq!(err, CborError::new(ErrorCode::TrailingBytes, 1));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn vec_of_u8_is_bytes_and_vec_of_u16_is_array() {
        assert_eq!(to_vec(&alloc::vec![1u8, 2]).unwrap(), [0x42, 0x01, 0x02]);
        assert_eq!(to_vec(&alloc::vec![1u16, 2]).unwrap(), [0x82, 0x01, 0x02]);
    }
}
