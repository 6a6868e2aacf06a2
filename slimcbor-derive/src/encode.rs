use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataEnum, DataStruct, Fields, Generics, Ident, Type};

use crate::attrs::{ensure_no_cbor_attrs, parse_field_attrs, parse_variant_attrs, wire_name};
use crate::types::type_mentions_self;
use crate::util::{count_u32, where_with_bounds};

/// Map header plus one `key, value` pair per non-skipped field, in declaration order.
fn named_map<'a, F>(
    name: &Ident,
    fields: &'a syn::FieldsNamed,
    bounds: &mut Vec<&'a Type>,
    value: F,
) -> syn::Result<(Vec<TokenStream>, TokenStream)>
where
    F: Fn(&Ident) -> TokenStream,
{
    let mut pats = Vec::new();
    let mut entries = Vec::new();

    for field in &fields.named {
        let attr = parse_field_attrs(&field.attrs)?;
        let Some(f_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new(field.span(), "named field without identifier"));
        };
        if attr.skip {
            pats.push(quote!(#f_ident: _));
            continue;
        }
        pats.push(quote!(#f_ident));

        let key = wire_name(attr.rename, f_ident);
        if !type_mentions_self(&field.ty, name) {
            bounds.push(&field.ty);
        }

        let value_ts = value(f_ident);
        entries.push(quote! {
            __w.write_str(#key);
            ::slimcbor::CborEncode::encode(#value_ts, __w)?;
        });
    }

    let len = count_u32(entries.len(), fields.span())?;
    Ok((
        pats,
        quote! {
            __w.write_map_len(#len);
            #(#entries)*
        },
    ))
}

fn tuple_array<'a, F>(
    name: &Ident,
    fields: &'a syn::FieldsUnnamed,
    bounds: &mut Vec<&'a Type>,
    ctx: &str,
    value: F,
) -> syn::Result<(Vec<Ident>, TokenStream)>
where
    F: Fn(usize, &Ident) -> TokenStream,
{
    let mut pats = Vec::new();
    let mut items = Vec::new();

    for (idx, field) in fields.unnamed.iter().enumerate() {
        ensure_no_cbor_attrs(&field.attrs, ctx)?;
        let var = format_ident!("v{idx}");
        if !type_mentions_self(&field.ty, name) {
            bounds.push(&field.ty);
        }
        let value_ts = value(idx, &var);
        items.push(quote! { ::slimcbor::CborEncode::encode(#value_ts, __w)?; });
        pats.push(var);
    }

    let len = count_u32(items.len(), fields.span())?;
    Ok((
        pats,
        quote! {
            __w.write_array_len(#len);
            #(#items)*
        },
    ))
}

fn impl_encode(
    name: &Ident,
    generics: &Generics,
    bounds: &[&Type],
    body: &TokenStream,
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let encode_where_clause =
        where_with_bounds(where_clause, bounds, &quote!(::slimcbor::CborEncode));

    quote! {
        impl #impl_generics ::slimcbor::CborEncode for #name #ty_generics #encode_where_clause {
            fn encode<__W: ::slimcbor::CborWrite>(
                &self,
                __w: &mut __W,
            ) -> ::core::result::Result<(), ::slimcbor::CborError> {
                #body
            }
        }

        impl #impl_generics ::slimcbor::CborArrayElem for #name #ty_generics #encode_where_clause {}
    }
}

pub(crate) fn encode_struct(
    name: &Ident,
    generics: &Generics,
    data: &DataStruct,
) -> syn::Result<TokenStream> {
    let mut bounds = Vec::new();

    let body = match &data.fields {
        Fields::Named(fields) => {
            let (_, map) = named_map(name, fields, &mut bounds, |ident| quote!(&self.#ident))?;
            quote! {
                #map
                ::core::result::Result::Ok(())
            }
        }
        Fields::Unnamed(fields) => {
            let (_, array) = tuple_array(name, fields, &mut bounds, "tuple struct fields", |idx, _| {
                let index = syn::Index::from(idx);
                quote!(&self.#index)
            })?;
            quote! {
                #array
                ::core::result::Result::Ok(())
            }
        }
        Fields::Unit => quote! {
            __w.write_null();
            ::core::result::Result::Ok(())
        },
    };

    Ok(impl_encode(name, generics, &bounds, &body))
}

/// Enums encode as a single-entry map `{ variant_name: payload }`.
pub(crate) fn encode_enum(
    name: &Ident,
    generics: &Generics,
    data: &DataEnum,
) -> syn::Result<TokenStream> {
    let mut arms = Vec::new();
    let mut bounds = Vec::new();

    for variant in &data.variants {
        let v_attr = parse_variant_attrs(&variant.attrs)?;
        let vname = wire_name(v_attr.rename, &variant.ident);
        let ident = &variant.ident;

        let arm = match &variant.fields {
            Fields::Unit => quote! {
                Self::#ident => {
                    __w.write_map_len(1);
                    __w.write_str(#vname);
                    __w.write_null();
                }
            },
            Fields::Unnamed(fields) => {
                let (pats, array) = tuple_array(
                    name,
                    fields,
                    &mut bounds,
                    "tuple enum variant fields",
                    |_, var| quote!(#var),
                )?;
                quote! {
                    Self::#ident( #(#pats),* ) => {
                        __w.write_map_len(1);
                        __w.write_str(#vname);
                        #array
                    }
                }
            }
            Fields::Named(fields) => {
                let (pats, map) = named_map(name, fields, &mut bounds, |ident| quote!(#ident))?;
                quote! {
                    Self::#ident { #(#pats),* } => {
                        __w.write_map_len(1);
                        __w.write_str(#vname);
                        #map
                    }
                }
            }
        };
        arms.push(arm);
    }

    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self { #(#arms)* }
            ::core::result::Result::Ok(())
        }
    };

    Ok(impl_encode(name, generics, &bounds, &body))
}
