//! One integer decoding routine, instantiated per target width.
//!
//! The reader extracts the raw argument and its sign, then hands both to [`DecodeInt`]; every width
//! runs the same range checks.

use crate::{CborError, ErrorCode};

mod private {
    pub trait Sealed {}
}

/// Integer types the [`Decoder`](crate::Decoder) can produce.
///
/// Implemented for `u8..=u64` and `i8..=i64`; sealed.
pub trait DecodeInt: Sized + Copy + private::Sealed {
    /// Bit width of the target type, reported in overflow errors.
    const BITS: u32;

    /// Convert an unsigned-major argument.
    ///
    /// # Errors
    ///
    /// Returns `IntegerOverflow` if `value` exceeds the target range.
    fn from_unsigned(value: u64, off: usize) -> Result<Self, CborError>;

    /// Convert a negative-major magnitude `n` (logical value `-1 - n`).
    ///
    /// # Errors
    ///
    /// Returns `ExpectedUnsigned` for unsigned targets and `IntegerOverflow` if the value is below
    /// the target range.
    fn from_negative(magnitude: u64, off: usize) -> Result<Self, CborError>;
}

const fn overflow(value: u64, negative: bool, bits: u32, off: usize) -> CborError {
    CborError::new(
        ErrorCode::IntegerOverflow {
            value,
            negative,
            bits,
        },
        off,
    )
}

macro_rules! impl_decode_unsigned {
    ($($t:ty),*) => {$(
        impl private::Sealed for $t {}

        impl DecodeInt for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn from_unsigned(value: u64, off: usize) -> Result<Self, CborError> {
                <$t>::try_from(value).map_err(|_| overflow(value, false, Self::BITS, off))
            }

            #[inline]
            fn from_negative(_magnitude: u64, off: usize) -> Result<Self, CborError> {
                Err(CborError::new(ErrorCode::ExpectedUnsigned, off))
            }
        }
    )*};
}

macro_rules! impl_decode_signed {
    ($($t:ty),*) => {$(
        impl private::Sealed for $t {}

        impl DecodeInt for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn from_unsigned(value: u64, off: usize) -> Result<Self, CborError> {
                <$t>::try_from(value).map_err(|_| overflow(value, false, Self::BITS, off))
            }

            #[inline]
            fn from_negative(magnitude: u64, off: usize) -> Result<Self, CborError> {
                // -1 - n fits iff n <= MAX.
                <$t>::try_from(magnitude)
                    .map(|n| -1 - n)
                    .map_err(|_| overflow(magnitude, true, Self::BITS, off))
            }
        }
    )*};
}

impl_decode_unsigned!(u8, u16, u32, u64);
impl_decode_signed!(i8, i16, i32, i64);
