/// Resource limits for [`Decoder::skip_with_limits`](crate::Decoder::skip_with_limits).
///
/// [`Decoder::skip`](crate::Decoder::skip) runs unbounded: a single definite-length header can
/// announce billions of pending items. Use these limits when skipping untrusted input.
///
/// Limits are checked deterministically against the skip counters, never against timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipLimits {
    /// Maximum number of items still owed to enclosing definite containers.
    pub max_pending: u64,
    /// Maximum number of indefinite containers open at once.
    pub max_open_indefinite: u64,
}

impl SkipLimits {
    /// No limits; equivalent to [`Decoder::skip`](crate::Decoder::skip).
    pub const UNBOUNDED: Self = Self {
        max_pending: u64::MAX,
        max_open_indefinite: u64::MAX,
    };

    /// Limits derived from the input size.
    ///
    /// Every pending item needs at least one byte, so `max_pending` is capped at
    /// `input_len`; a well-formed input can never exceed it.
    #[must_use]
    pub fn for_bytes(input_len: usize) -> Self {
        let max = u64::try_from(input_len).unwrap_or(u64::MAX);
        Self {
            max_pending: max,
            max_open_indefinite: max,
        }
    }
}

impl Default for SkipLimits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
