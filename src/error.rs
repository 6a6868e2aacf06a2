use core::fmt;

/// A structured error code identifying why a read or write was rejected.
///
/// Codes are string-free so the crate stays `no_std`; variants that need a diagnostic payload
/// (overflowing values, unknown bytes) carry it inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Unexpected end of input while reading.
    UnexpectedEof,
    /// A length does not fit the 32-bit count or the platform `usize`.
    LengthOverflow,
    /// Input contains bytes after the single decoded value.
    TrailingBytes,
    /// The fixed-capacity sink has no room for the write.
    BufferFull,
    /// Memory allocation failed while growing a sink.
    AllocationFailed,

    /// Expected the null token.
    ExpectedNull,
    /// Expected the undefined token.
    ExpectedUndefined,
    /// Expected a boolean token.
    ExpectedBool,
    /// Expected an unsigned or negative integer.
    ExpectedInteger,
    /// Expected an unsigned integer but found a negative one.
    ExpectedUnsigned,
    /// Expected a float token.
    ExpectedFloat,
    /// Expected a definite-length text string.
    ExpectedText,
    /// Expected a definite-length byte string.
    ExpectedBytes,
    /// Expected an array header.
    ExpectedArray,
    /// Expected a map header.
    ExpectedMap,
    /// Expected a tag header.
    ExpectedTag,
    /// Expected the break token closing an indefinite container.
    ExpectedBreak,

    /// A decoded integer does not fit the requested width.
    IntegerOverflow {
        /// Raw payload as it appeared on the wire (the magnitude for negative integers).
        value: u64,
        /// Whether the payload came from the negative-integer major type.
        negative: bool,
        /// Bit width of the requested target type.
        bits: u32,
    },
    /// Additional info 28..=31 was used where an argument is required.
    ReservedAdditionalInfo,

    /// Half-precision floats are not supported.
    HalfFloatUnsupported,
    /// Indefinite-length text or byte strings are not supported.
    IndefiniteStringUnsupported,
    /// An indefinite array or map was nested inside a definite container during skip.
    NestedIndefiniteUnsupported,
    /// The byte does not start any recognized item.
    UnknownToken {
        /// The offending prefix byte.
        byte: u8,
    },

    /// Text string is not valid UTF-8.
    Utf8Invalid,

    /// Skip exceeded the configured pending-item limit.
    PendingLimitExceeded,
    /// Skip exceeded the configured open indefinite container limit.
    IndefiniteLimitExceeded,

    /// A required map key is missing.
    MissingKey,
    /// A map key appeared twice.
    DuplicateMapKey,
    /// Array length does not match the expected field count.
    ArrayLenMismatch,
    /// Map length does not match the expected entry count.
    MapLenMismatch,
    /// Enum variant name is not recognized.
    UnknownVariant,
}

/// A codec error with a stable code and the byte offset it was detected at.
///
/// For reads the offset is the start of the offending item; for writes it is the sink position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CborError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset where the error was detected.
    pub offset: usize,
}

impl CborError {
    /// Construct an error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }

    /// Returns true iff this error was raised by a sink rather than by decoding.
    #[inline]
    #[must_use]
    pub const fn is_write_error(self) -> bool {
        matches!(self.code, ErrorCode::BufferFull | ErrorCode::AllocationFailed)
    }
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let offset = self.offset;
        if self.is_write_error() {
            write!(f, "cbor encode failed at {offset}: ")?;
        } else {
            write!(f, "cbor decode failed at {offset}: ")?;
        }

        let msg = match self.code {
            ErrorCode::IntegerOverflow {
                value,
                negative,
                bits,
            } => {
                let sign = if negative { "-1-" } else { "" };
                return write!(f, "integer overflow: value = {sign}0x{value:x}; bits = {bits}");
            }
            ErrorCode::UnknownToken { byte } => {
                return write!(f, "unknown token 0x{byte:02x} @{offset}");
            }

            ErrorCode::UnexpectedEof => "unexpected end of input",
            ErrorCode::LengthOverflow => "length overflow",
            ErrorCode::TrailingBytes => "trailing bytes after single value",
            ErrorCode::BufferFull => "buffer full",
            ErrorCode::AllocationFailed => "allocation failed",

            ErrorCode::ExpectedNull => "bad value for null",
            ErrorCode::ExpectedUndefined => "bad value for undefined",
            ErrorCode::ExpectedBool => "bad value for bool",
            ErrorCode::ExpectedInteger => "expected integer",
            ErrorCode::ExpectedUnsigned => "expected unsigned integer, found negative",
            ErrorCode::ExpectedFloat => "bad prefix for float",
            ErrorCode::ExpectedText => "expected string length",
            ErrorCode::ExpectedBytes => "expected byte array (definite length)",
            ErrorCode::ExpectedArray => "expected array",
            ErrorCode::ExpectedMap => "expected map",
            ErrorCode::ExpectedTag => "expected tag",
            ErrorCode::ExpectedBreak => "expected break",

            ErrorCode::ReservedAdditionalInfo => "reserved additional info value",

            ErrorCode::HalfFloatUnsupported => "unsupported: half float",
            ErrorCode::IndefiniteStringUnsupported => {
                "unsupported: indefinite-length text or byte string"
            }
            ErrorCode::NestedIndefiniteUnsupported => {
                "unsupported: indefinite array or map nested inside a definite array or map"
            }

            ErrorCode::Utf8Invalid => "text must be valid UTF-8",

            ErrorCode::PendingLimitExceeded => "pending item limit exceeded",
            ErrorCode::IndefiniteLimitExceeded => "open indefinite container limit exceeded",

            ErrorCode::MissingKey => "missing map key",
            ErrorCode::DuplicateMapKey => "duplicate map key",
            ErrorCode::ArrayLenMismatch => "array length mismatch",
            ErrorCode::MapLenMismatch => "map length mismatch",
            ErrorCode::UnknownVariant => "unknown enum variant",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CborError {}
