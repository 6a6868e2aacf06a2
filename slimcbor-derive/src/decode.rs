use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataEnum, DataStruct, Fields, Generics, Ident, Lifetime, WhereClause};

use crate::attrs::{ensure_no_cbor_attrs, parse_field_attrs, parse_variant_attrs, wire_name};
use crate::types::{is_option_type, type_mentions_self};
use crate::util::{add_where_bound, decode_lifetime};

fn tuple_decode_parts(
    name: &Ident,
    fields: &syn::FieldsUnnamed,
    wc: &mut WhereClause,
    decode_lt: &Lifetime,
    ctx: &str,
) -> syn::Result<(Vec<Ident>, Vec<TokenStream>)> {
    let mut vars = Vec::new();
    let mut decodes = Vec::new();

    for (idx, field) in fields.unnamed.iter().enumerate() {
        ensure_no_cbor_attrs(&field.attrs, ctx)?;

        let var = format_ident!("v{idx}");
        if !type_mentions_self(&field.ty, name) {
            add_where_bound(wc, &field.ty, &quote!(::slimcbor::CborDecode<#decode_lt>));
        }
        decodes.push(quote! { let #var = ::slimcbor::CborDecode::decode(decoder)?; });
        vars.push(var);
    }

    Ok((vars, decodes))
}

fn add_named_bounds(
    name: &Ident,
    fields: &syn::FieldsNamed,
    wc: &mut WhereClause,
    decode_lt: &Lifetime,
) -> syn::Result<()> {
    for field in &fields.named {
        let attr = parse_field_attrs(&field.attrs)?;
        if attr.skip || attr.default || is_option_type(&field.ty) {
            add_where_bound(wc, &field.ty, &quote!(::core::default::Default));
        }
        if attr.skip {
            continue;
        }
        if !type_mentions_self(&field.ty, name) {
            add_where_bound(wc, &field.ty, &quote!(::slimcbor::CborDecode<#decode_lt>));
        }
    }
    Ok(())
}

/// Definite or indefinite array whose element count must equal `expected`.
fn array_decode_block(expected: usize, decodes: &[TokenStream], result: &TokenStream) -> TokenStream {
    let expected = u32::try_from(expected).unwrap_or(u32::MAX);
    quote! {
        let __arr_off = decoder.position();
        let __len = decoder.read_array_len()?;
        if matches!(__len, ::slimcbor::Length::Definite(n) if n != #expected) {
            return ::core::result::Result::Err(::slimcbor::CborError::new(
                ::slimcbor::ErrorCode::ArrayLenMismatch,
                __arr_off,
            ));
        }
        #(
            if __len.is_indefinite() && decoder.peek_is_break()? {
                return ::core::result::Result::Err(::slimcbor::CborError::new(
                    ::slimcbor::ErrorCode::ArrayLenMismatch,
                    __arr_off,
                ));
            }
            #decodes
        )*
        if __len.is_indefinite() {
            if !decoder.peek_is_break()? {
                return ::core::result::Result::Err(::slimcbor::CborError::new(
                    ::slimcbor::ErrorCode::ArrayLenMismatch,
                    __arr_off,
                ));
            }
            decoder.read_break()?;
        }
        #result
    }
}

/// Map keyed by field name. Unknown keys are skipped; `Option` and `cbor(default)` fields may be
/// absent.
fn decode_named_fields(fields: &syn::FieldsNamed, target: &TokenStream) -> syn::Result<TokenStream> {
    let mut inits = Vec::new();
    let mut matches = Vec::new();
    let mut finals = Vec::new();

    for field in &fields.named {
        let attr = parse_field_attrs(&field.attrs)?;
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new(field.span(), "named field without identifier"));
        };
        let ty = &field.ty;

        if attr.skip {
            finals.push(quote! { #ident: ::core::default::Default::default(), });
            continue;
        }

        let key = wire_name(attr.rename, ident);
        let var = format_ident!("__{ident}");

        inits.push(
            quote! { let mut #var: ::core::option::Option<#ty> = ::core::option::Option::None; },
        );

        matches.push(quote! {
            #key => {
                if #var.is_some() {
                    return ::core::result::Result::Err(::slimcbor::CborError::new(
                        ::slimcbor::ErrorCode::DuplicateMapKey,
                        __key_off,
                    ));
                }
                #var = ::core::option::Option::Some(::slimcbor::CborDecode::decode(decoder)?);
            }
        });

        if attr.default || is_option_type(ty) {
            finals.push(quote! { #ident: #var.unwrap_or_default(), });
        } else {
            finals.push(quote! {
                #ident: #var.ok_or_else(|| {
                    ::slimcbor::CborError::new(::slimcbor::ErrorCode::MissingKey, __map_off)
                })?,
            });
        }
    }

    Ok(quote! {
        let __map_off = decoder.position();
        let mut __remaining = decoder.read_map_len()?;
        #(#inits)*
        while decoder.next_element(&mut __remaining)? {
            let __key_off = decoder.position();
            let __key = decoder.read_str()?;
            match __key {
                #(#matches)*
                _ => decoder.skip()?,
            }
        }
        ::core::result::Result::Ok(#target { #(#finals)* })
    })
}

fn impl_decode(
    name: &Ident,
    generics: &Generics,
    decode_generics: &Generics,
    decode_lt: &Lifetime,
    where_clause: Option<&WhereClause>,
    body: &TokenStream,
) -> TokenStream {
    let (impl_generics, _, _) = decode_generics.split_for_impl();
    let (_, ty_generics, _) = generics.split_for_impl();
    quote! {
        impl #impl_generics ::slimcbor::CborDecode<#decode_lt> for #name #ty_generics #where_clause {
            fn decode(
                decoder: &mut ::slimcbor::Decoder<#decode_lt>,
            ) -> ::core::result::Result<Self, ::slimcbor::CborError> {
                #body
            }
        }
    }
}

pub(crate) fn decode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
) -> syn::Result<TokenStream> {
    let (mut decode_generics, decode_lt) = decode_lifetime(generics);
    let wc = decode_generics.make_where_clause();

    let body = match &data.fields {
        Fields::Named(fields) => {
            add_named_bounds(name, fields, wc, &decode_lt)?;
            decode_named_fields(fields, &quote!(Self))?
        }
        Fields::Unnamed(fields) => {
            let (vars, decodes) =
                tuple_decode_parts(name, fields, wc, &decode_lt, "tuple struct fields")?;
            array_decode_block(vars.len(), &decodes, &quote!(::core::result::Result::Ok(Self(#(#vars),*))))
        }
        Fields::Unit => quote! {
            decoder.read_null()?;
            ::core::result::Result::Ok(Self)
        },
    };

    let where_clause = decode_generics.where_clause.clone();
    Ok(impl_decode(
        name,
        generics,
        &decode_generics,
        &decode_lt,
        where_clause.as_ref(),
        &body,
    ))
}

/// Decodes the single-entry `{ variant_name: payload }` map written by the encoder.
pub(crate) fn decode_enum(
    name: &Ident,
    generics: &Generics,
    data: &DataEnum,
) -> syn::Result<TokenStream> {
    let (mut decode_generics, decode_lt) = decode_lifetime(generics);
    let wc = decode_generics.make_where_clause();

    let mut arms = Vec::new();

    for variant in &data.variants {
        let v_attr = parse_variant_attrs(&variant.attrs)?;
        let vname = wire_name(v_attr.rename, &variant.ident);
        let ident = &variant.ident;

        let body = match &variant.fields {
            Fields::Unit => quote! {
                decoder.read_null()?;
                ::core::result::Result::Ok(Self::#ident)
            },
            Fields::Unnamed(fields) => {
                let (vars, decodes) =
                    tuple_decode_parts(name, fields, wc, &decode_lt, "tuple enum variant fields")?;
                array_decode_block(
                    vars.len(),
                    &decodes,
                    &quote!(::core::result::Result::Ok(Self::#ident(#(#vars),*))),
                )
            }
            Fields::Named(fields) => {
                add_named_bounds(name, fields, wc, &decode_lt)?;
                decode_named_fields(fields, &quote!(Self::#ident))?
            }
        };
        arms.push(quote! { #vname => { #body } });
    }

    let body = quote! {
        let __outer_off = decoder.position();
        let __outer = decoder.read_map_len()?;
        if matches!(__outer, ::slimcbor::Length::Definite(n) if n != 1) {
            return ::core::result::Result::Err(::slimcbor::CborError::new(
                ::slimcbor::ErrorCode::MapLenMismatch,
                __outer_off,
            ));
        }
        if __outer.is_indefinite() && decoder.peek_is_break()? {
            return ::core::result::Result::Err(::slimcbor::CborError::new(
                ::slimcbor::ErrorCode::MapLenMismatch,
                __outer_off,
            ));
        }
        let __variant_off = decoder.position();
        let __variant = decoder.read_str()?;
        let __value: ::core::result::Result<Self, ::slimcbor::CborError> = match __variant {
            #(#arms)*
            _ => ::core::result::Result::Err(::slimcbor::CborError::new(
                ::slimcbor::ErrorCode::UnknownVariant,
                __variant_off,
            )),
        };
        let __value = __value?;
        if __outer.is_indefinite() {
            if !decoder.peek_is_break()? {
                return ::core::result::Result::Err(::slimcbor::CborError::new(
                    ::slimcbor::ErrorCode::MapLenMismatch,
                    __outer_off,
                ));
            }
            decoder.read_break()?;
        }
        ::core::result::Result::Ok(__value)
    };

    let where_clause = decode_generics.where_clause.clone();
    Ok(impl_decode(
        name,
        generics,
        &decode_generics,
        &decode_lt,
        where_clause.as_ref(),
        &body,
    ))
}
