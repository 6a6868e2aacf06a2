//! # slimcbor
//!
//! A compact, streaming codec for a CBOR-style binary format.
//!
//! ## Overview
//!
//! - [`Decoder`] reads one value at a time from a byte slice and returns an explicit error from
//!   every call. Strings and byte strings are borrowed from the input.
//! - [`Encoder`] writes the most compact form of every value into a [`Sink`]. Individual writes do
//!   not return errors: the first failure is latched and reported once by
//!   [`Encoder::check_error`].
//! - [`Sizer`] computes the exact encoded length of the same write sequence without producing
//!   bytes, so an output buffer can be allocated once.
//! - [`Decoder::skip`] discards one complete value of arbitrary nesting in a single pass, with no
//!   allocation and no recursion.
//!
//! [`CborEncode`] and [`CborDecode`] map Rust types onto these primitives. With the `derive`
//! feature, `#[derive(CborEncode, CborDecode)]` generates them for structs and enums.
//!
//! ## Wire format
//!
//! Every item starts with a prefix byte: the major type in the high 3 bits and the additional info
//! in the low 5 bits. Integers, lengths and tags use the shortest of the inline (`0..=23`), 1, 2, 4,
//! or 8-byte big-endian forms. Negative integers store the magnitude `n` of `-1 - n`.
//!
//! Supported beyond that core: definite-length text and byte strings, definite and indefinite
//! arrays and maps, tags, `false`/`true`/`null`/`undefined`, and 32/64-bit floats. Half-precision
//! floats and indefinite-length strings are rejected.
//!
//! The reader accepts non-minimal widths; the writer never produces them.
//!
//! ## Feature flags
//!
//! - `std` *(default)*: implements `std::error::Error` for [`CborError`].
//! - `alloc` *(default)*: enables [`VecSink`], [`to_vec`], and owned `String`/`Vec` codecs.
//! - `derive` *(default)*: re-exports the `CborEncode`/`CborDecode` derive macros.
//! - `simdutf8`: enables SIMD-accelerated UTF-8 validation where supported.
//!
//! ## `no_std`
//!
//! The crate is `no_std` compatible. The reader, [`SliceSink`], and the sizer need neither `std`
//! nor `alloc`.
//!
//! ## Logging
//!
//! Rejections on the skip path and the first latched write failure are reported through the
//! [`log`](https://docs.rs/log) facade at `debug` level. Nothing is logged on the success path.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod codec;
mod decode;
mod encode;
mod error;
pub mod format;
mod int;
mod limits;
mod sink;
mod size;
mod skip;
mod source;
pub(crate) mod utf8;

pub use crate::codec::{
    container_len, encode_into, encoded_len, from_slice, CborArrayElem, CborDecode, CborEncode,
    CborWrite, RawCbor,
};
pub use crate::decode::{Decoder, Length};
pub use crate::encode::Encoder;
pub use crate::error::{CborError, ErrorCode};
pub use crate::format::MajorType;
pub use crate::int::DecodeInt;
pub use crate::limits::SkipLimits;
pub use crate::sink::{Sink, SliceSink};
pub use crate::size::Sizer;
pub use crate::source::Source;

#[cfg(feature = "alloc")]
pub use crate::codec::{to_vec, MapEntries};
#[cfg(feature = "alloc")]
pub use crate::sink::VecSink;

#[cfg(feature = "derive")]
pub use slimcbor_derive::{CborDecode, CborEncode};
