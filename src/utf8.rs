use crate::{CborError, ErrorCode};

/// Borrow `bytes` as text, reporting `Utf8Invalid` at `off` (the start of the text item).
#[inline]
pub fn validate(bytes: &[u8], off: usize) -> Result<&str, CborError> {
    #[cfg(feature = "simdutf8")]
    let checked = simdutf8::basic::from_utf8(bytes).ok();
    #[cfg(not(feature = "simdutf8"))]
    let checked = core::str::from_utf8(bytes).ok();

    checked.ok_or(CborError::new(ErrorCode::Utf8Invalid, off))
}
