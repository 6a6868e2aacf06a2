use syn::meta::ParseNestedMeta;
use syn::{spanned::Spanned, Attribute, LitStr};

/// `#[cbor(...)]` options on a struct or struct-variant field.
#[derive(Default)]
pub(crate) struct FieldAttr {
    pub(crate) rename: Option<LitStr>,
    pub(crate) skip: bool,
    pub(crate) default: bool,
}

/// `#[cbor(...)]` options on an enum variant.
#[derive(Default)]
pub(crate) struct VariantAttr {
    pub(crate) rename: Option<LitStr>,
}

/// Run `f` on every item inside every `#[cbor(...)]` attribute.
fn each_cbor_meta<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta<'_>) -> syn::Result<()>,
{
    attrs
        .iter()
        .filter(|a| a.path().is_ident("cbor"))
        .try_for_each(|a| a.parse_nested_meta(|meta| f(&meta)))
}

fn set_flag(meta: &ParseNestedMeta<'_>, flag: &mut bool, name: &str) -> syn::Result<()> {
    if *flag {
        return Err(meta.error(format!("`cbor({name})` given twice")));
    }
    *flag = true;
    Ok(())
}

fn set_rename(meta: &ParseNestedMeta<'_>, slot: &mut Option<LitStr>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("`cbor(rename = ...)` given twice"));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

/// Reject `#[cbor(...)]` where no option applies (tuple fields).
pub(crate) fn ensure_no_cbor_attrs(attrs: &[Attribute], ctx: &str) -> syn::Result<()> {
    match attrs.iter().find(|a| a.path().is_ident("cbor")) {
        Some(a) => Err(syn::Error::new(
            a.span(),
            format!("`#[cbor(...)]` is not supported on {ctx}"),
        )),
        None => Ok(()),
    }
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttr> {
    let mut out = FieldAttr::default();
    let mut skip_span = None;
    each_cbor_meta(attrs, |meta| {
        if meta.path.is_ident("skip") {
            skip_span = Some(meta.path.span());
            set_flag(meta, &mut out.skip, "skip")
        } else if meta.path.is_ident("default") {
            set_flag(meta, &mut out.default, "default")
        } else if meta.path.is_ident("rename") {
            set_rename(meta, &mut out.rename)
        } else {
            Err(meta.error("unknown field option; expected `rename`, `skip`, or `default`"))
        }
    })?;

    if let Some(span) = skip_span {
        if out.rename.is_some() || out.default {
            return Err(syn::Error::new(
                span,
                "a skipped field is never on the wire; drop `rename`/`default`",
            ));
        }
    }
    Ok(out)
}

pub(crate) fn parse_variant_attrs(attrs: &[Attribute]) -> syn::Result<VariantAttr> {
    let mut out = VariantAttr::default();
    each_cbor_meta(attrs, |meta| {
        if meta.path.is_ident("rename") {
            set_rename(meta, &mut out.rename)
        } else {
            Err(meta.error("unknown variant option; expected `rename`"))
        }
    })?;
    Ok(out)
}

/// Wire name of a field or variant: the `rename` literal, else the Rust identifier.
pub(crate) fn wire_name(rename: Option<LitStr>, ident: &syn::Ident) -> LitStr {
    rename.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()))
}
