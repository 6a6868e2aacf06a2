//! Prefix-byte classification and the single table of wire constants.
//!
//! Every item starts with one prefix byte: the high 3 bits select the major type and the low
//! 5 bits (the *additional info*) carry either a small inline argument (`0..=23`), a selector for a
//! 1/2/4/8-byte big-endian argument (`24..=27`), or the indefinite-length marker (`31`).
//!
//! The reader, writer, and sizer consume these constants and [`Width`]; none of them derive byte
//! ranges on their own.

/// Major type: unsigned integer.
pub const MAJOR_UNSIGNED: u8 = 0x00;
/// Major type: negative integer (`-1 - n`).
pub const MAJOR_NEGATIVE: u8 = 0x20;
/// Major type: byte string.
pub const MAJOR_BYTES: u8 = 0x40;
/// Major type: text string.
pub const MAJOR_TEXT: u8 = 0x60;
/// Major type: array.
pub const MAJOR_ARRAY: u8 = 0x80;
/// Major type: map.
pub const MAJOR_MAP: u8 = 0xa0;
/// Major type: tag.
pub const MAJOR_TAG: u8 = 0xc0;
/// Major type: simple values and floats.
pub const MAJOR_SIMPLE: u8 = 0xe0;

/// Largest argument stored directly in the additional info.
pub const MAX_INLINE: u8 = 23;
/// Additional info: 1-byte argument follows.
pub const INFO_U8: u8 = 24;
/// Additional info: 2-byte argument follows.
pub const INFO_U16: u8 = 25;
/// Additional info: 4-byte argument follows.
pub const INFO_U32: u8 = 26;
/// Additional info: 8-byte argument follows.
pub const INFO_U64: u8 = 27;
/// Additional info: indefinite length.
pub const INFO_INDEFINITE: u8 = 31;

/// First inline unsigned integer token (`0`).
pub const U8_SHORT_MIN: u8 = 0x00;
/// Last inline unsigned integer token (`23`).
pub const U8_SHORT_MAX: u8 = 0x17;
/// Unsigned integer, 1-byte payload.
pub const U8: u8 = 0x18;
/// Unsigned integer, 2-byte payload.
pub const U16: u8 = 0x19;
/// Unsigned integer, 4-byte payload.
pub const U32: u8 = 0x1a;
/// Unsigned integer, 8-byte payload.
pub const U64: u8 = 0x1b;
/// First inline negative integer token (`-1`).
pub const I8_SHORT_MIN: u8 = 0x20;
/// Last inline negative integer token (`-24`).
pub const I8_SHORT_MAX: u8 = 0x37;
/// Negative integer, 1-byte magnitude.
pub const I8: u8 = 0x38;
/// Negative integer, 2-byte magnitude.
pub const I16: u8 = 0x39;
/// Negative integer, 4-byte magnitude.
pub const I32: u8 = 0x3a;
/// Negative integer, 8-byte magnitude.
pub const I64: u8 = 0x3b;

/// Indefinite-length byte string (unsupported).
pub const BYTES_INDEFINITE: u8 = 0x5f;
/// Indefinite-length text string (unsupported).
pub const TEXT_INDEFINITE: u8 = 0x7f;
/// Indefinite-length array.
pub const ARRAY_INDEFINITE: u8 = 0x9f;
/// Indefinite-length map.
pub const MAP_INDEFINITE: u8 = 0xbf;
/// Last valid tag prefix (8-byte tag id).
pub const TAG_MAX: u8 = 0xdb;

/// `false`.
pub const FALSE: u8 = 0xf4;
/// `true`.
pub const TRUE: u8 = 0xf5;
/// `null`.
pub const NULL: u8 = 0xf6;
/// `undefined`.
pub const UNDEFINED: u8 = 0xf7;
/// Half-precision float (unsupported).
pub const F16: u8 = 0xf9;
/// Single-precision float.
pub const F32: u8 = 0xfa;
/// Double-precision float.
pub const F64: u8 = 0xfb;
/// Break: closes one indefinite-length container.
pub const BREAK: u8 = 0xff;

/// Major type bits of a prefix byte (high 3 bits, unshifted).
#[inline]
#[must_use]
pub const fn major_type_of(b: u8) -> u8 {
    b & 0xe0
}

/// Additional info of a prefix byte (low 5 bits).
#[inline]
#[must_use]
pub const fn info_of(b: u8) -> u8 {
    b & 0x1f
}

/// The eight major types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorType {
    /// Unsigned integer.
    Unsigned,
    /// Negative integer.
    Negative,
    /// Byte string.
    Bytes,
    /// Text string.
    Text,
    /// Array.
    Array,
    /// Map.
    Map,
    /// Tag.
    Tag,
    /// Simple value or float.
    Simple,
}

impl MajorType {
    /// Classify a prefix byte.
    #[must_use]
    pub const fn of(b: u8) -> Self {
        match major_type_of(b) {
            MAJOR_UNSIGNED => Self::Unsigned,
            MAJOR_NEGATIVE => Self::Negative,
            MAJOR_BYTES => Self::Bytes,
            MAJOR_TEXT => Self::Text,
            MAJOR_ARRAY => Self::Array,
            MAJOR_MAP => Self::Map,
            MAJOR_TAG => Self::Tag,
            _ => Self::Simple,
        }
    }

    /// The major type bits, ready to be OR-ed with additional info.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Unsigned => MAJOR_UNSIGNED,
            Self::Negative => MAJOR_NEGATIVE,
            Self::Bytes => MAJOR_BYTES,
            Self::Text => MAJOR_TEXT,
            Self::Array => MAJOR_ARRAY,
            Self::Map => MAJOR_MAP,
            Self::Tag => MAJOR_TAG,
            Self::Simple => MAJOR_SIMPLE,
        }
    }
}

/// Minimal argument width for a value or length.
///
/// This is the one width-selection rule shared by the writer and the sizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Stored in the additional info (`0..=23`).
    Inline,
    /// One trailing byte.
    U8,
    /// Two trailing bytes.
    U16,
    /// Four trailing bytes.
    U32,
    /// Eight trailing bytes.
    U64,
}

impl Width {
    /// Smallest width that holds `value`.
    #[inline]
    #[must_use]
    pub const fn for_value(value: u64) -> Self {
        if value <= MAX_INLINE as u64 {
            Self::Inline
        } else if value <= 0xff {
            Self::U8
        } else if value <= 0xffff {
            Self::U16
        } else if value <= 0xffff_ffff {
            Self::U32
        } else {
            Self::U64
        }
    }

    /// Number of trailing argument bytes.
    #[inline]
    #[must_use]
    pub const fn payload_len(self) -> usize {
        match self {
            Self::Inline => 0,
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    /// Total header length: prefix byte plus argument.
    #[inline]
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        1 + self.payload_len()
    }
}

/// A byte or text length as a header argument.
#[inline]
pub(crate) fn len_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Length of a header carrying `value`: one of 1, 2, 3, 5, or 9 bytes.
#[inline]
#[must_use]
pub const fn header_len(value: u64) -> usize {
    Width::for_value(value).encoded_len()
}

/// Split a signed integer into the major type and unsigned argument it is written with.
#[inline]
#[must_use]
pub const fn signed_argument(value: i64) -> (u8, u64) {
    if value >= 0 {
        (MAJOR_UNSIGNED, value.unsigned_abs())
    } else {
        (MAJOR_NEGATIVE, (-1 - value).unsigned_abs())
    }
}

/// A fully encoded header: prefix byte plus minimal-width big-endian argument.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    buf: [u8; 9],
    len: usize,
}

impl Header {
    /// Encode `major | info` followed by `value` at its minimal width.
    #[must_use]
    pub fn new(major: u8, value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut buf = [0u8; 9];
        let width = Width::for_value(value);
        let len = width.encoded_len();
        buf[0] = match width {
            Width::Inline => major | be[7],
            Width::U8 => major | INFO_U8,
            Width::U16 => major | INFO_U16,
            Width::U32 => major | INFO_U32,
            Width::U64 => major | INFO_U64,
        };
        buf[1..len].copy_from_slice(&be[8 - width.payload_len()..]);
        Self { buf, len }
    }

    /// The encoded header bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}
