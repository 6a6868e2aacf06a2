//! Discarding one complete value without recursion.
//!
//! Nesting is tracked with two saturating counters instead of a stack:
//!
//! - `pending`: items still owed to the value being skipped and to the definite containers
//!   opened inside it;
//! - `open_indefinite`: indefinite containers opened but not yet closed by a break.
//!
//! An indefinite container is only accepted where no definite container is still waiting on
//! sibling items (`pending < 2`); anywhere else the counters could not tell its elements apart
//! from the siblings', so it is rejected with `NestedIndefiniteUnsupported`.

use crate::format::{
    info_of, ARRAY_INDEFINITE, BREAK, BYTES_INDEFINITE, F16, F64, I64, I8_SHORT_MIN, MAJOR_ARRAY,
    MAJOR_BYTES, MAJOR_MAP, MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT, MAP_INDEFINITE, TAG_MAX,
    TEXT_INDEFINITE, U64, U8_SHORT_MIN,
};
use crate::{CborError, Decoder, ErrorCode, Length, SkipLimits};

impl Decoder<'_> {
    /// Skip exactly one value of arbitrary nesting.
    ///
    /// On success the cursor sits immediately after the value. Runs in a single pass with no
    /// allocation and no depth limit; see [`Decoder::skip_with_limits`] for untrusted input.
    ///
    /// # Errors
    ///
    /// Returns `NestedIndefiniteUnsupported` for an indefinite array/map inside a definite one,
    /// `IndefiniteStringUnsupported`, `HalfFloatUnsupported`, `UnknownToken` for bytes that start
    /// no item, or any read error.
    pub fn skip(&mut self) -> Result<(), CborError> {
        self.skip_with_limits(SkipLimits::UNBOUNDED)
    }

    /// Skip exactly one value, failing once the skip counters exceed `limits`.
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::skip`], plus `PendingLimitExceeded` and `IndefiniteLimitExceeded`.
    pub fn skip_with_limits(&mut self, limits: SkipLimits) -> Result<(), CborError> {
        let mut pending: u64 = 1;
        let mut open_indefinite: u64 = 0;

        while pending > 0 || open_indefinite > 0 {
            let off = self.position();
            let peek = self.peek_byte()?;

            match peek {
                U8_SHORT_MIN..=U64 | I8_SHORT_MIN..=I64 => {
                    self.source_mut().discard(1)?;
                    self.read_argument(info_of(peek), off)?;
                }
                MAJOR_BYTES..=BYTES_INDEFINITE => {
                    let len = self.read_bytes_len()?;
                    self.discard_payload(len)?;
                }
                MAJOR_TEXT..=TEXT_INDEFINITE => {
                    let len = self.read_string_len()?;
                    self.discard_payload(len)?;
                }
                MAJOR_ARRAY..=ARRAY_INDEFINITE | MAJOR_MAP..=MAP_INDEFINITE => {
                    let len = if peek <= ARRAY_INDEFINITE {
                        self.read_array_len()?
                    } else {
                        self.read_map_len()?
                    };
                    match len {
                        Length::Definite(n) => {
                            let items = if peek <= ARRAY_INDEFINITE {
                                u64::from(n)
                            } else {
                                u64::from(n) * 2
                            };
                            pending = pending.saturating_add(items);
                            if pending > limits.max_pending {
                                log::debug!("skip: {pending} pending items exceed limit @{off}");
                                return Err(CborError::new(ErrorCode::PendingLimitExceeded, off));
                            }
                        }
                        Length::Indefinite if pending < 2 => {
                            open_indefinite += 1;
                            if open_indefinite > limits.max_open_indefinite {
                                log::debug!(
                                    "skip: {open_indefinite} open indefinite containers exceed limit @{off}"
                                );
                                return Err(CborError::new(
                                    ErrorCode::IndefiniteLimitExceeded,
                                    off,
                                ));
                            }
                        }
                        Length::Indefinite => {
                            log::debug!("skip: indefinite container 0x{peek:02x} nested in definite container @{off}");
                            return Err(CborError::new(
                                ErrorCode::NestedIndefiniteUnsupported,
                                off,
                            ));
                        }
                    }
                }
                MAJOR_TAG..=TAG_MAX => {
                    // The tag is not an item of its own; the value it wraps is.
                    self.read_tag()?;
                    continue;
                }
                F16 => {
                    return Err(CborError::new(ErrorCode::HalfFloatUnsupported, off));
                }
                MAJOR_SIMPLE..=F64 => {
                    self.source_mut().discard(1)?;
                    self.read_argument(info_of(peek), off)?;
                }
                BREAK => {
                    self.source_mut().discard(1)?;
                    open_indefinite = open_indefinite.saturating_sub(1);
                    continue;
                }
                _ => {
                    log::debug!("skip: unknown token 0x{peek:02x} @{off}");
                    return Err(CborError::new(ErrorCode::UnknownToken { byte: peek }, off));
                }
            }

            pending = pending.saturating_sub(1);
        }

        Ok(())
    }

    fn discard_payload(&mut self, len: u32) -> Result<(), CborError> {
        let off = self.position();
        let len = usize::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, off))?;
        self.source_mut().discard(len)
    }
}
