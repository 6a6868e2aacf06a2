//! Derive macros for `slimcbor`.
//!
//! - Structs with named fields encode as maps keyed by field name, in declaration order.
//! - Tuple structs encode as arrays; unit structs as `null`.
//! - Enums encode as a single-entry map `{ variant_name: payload }`, where the payload follows the
//!   struct rules and unit variants carry `null`.
//!
//! Field attributes: `#[cbor(rename = "...")]`, `#[cbor(skip)]`, `#[cbor(default)]`.
//! Variant attributes: `#[cbor(rename = "...")]`.

extern crate proc_macro;

mod attrs;
mod decode;
mod encode;
mod types;
mod util;

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput};

#[proc_macro_derive(CborEncode, attributes(cbor))]
pub fn derive_cbor_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = match &input.data {
        Data::Struct(data) => encode::encode_struct(&input.ident, &input.generics, data),
        Data::Enum(data) => encode::encode_enum(&input.ident, &input.generics, data),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span,
            "CborEncode not supported for unions",
        )),
    };
    TokenStream::from(out.unwrap_or_else(syn::Error::into_compile_error))
}

#[proc_macro_derive(CborDecode, attributes(cbor))]
pub fn derive_cbor_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let out = match &input.data {
        Data::Struct(data) => decode::decode_struct(&input.ident, &input.generics, data),
        Data::Enum(data) => decode::decode_enum(&input.ident, &input.generics, data),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span,
            "CborDecode not supported for unions",
        )),
    };
    TokenStream::from(out.unwrap_or_else(syn::Error::into_compile_error))
}
