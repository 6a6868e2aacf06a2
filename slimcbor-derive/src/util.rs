use proc_macro2::{Span, TokenStream};
use syn::{
    parse_quote, GenericParam, Generics, Ident, Lifetime, LifetimeParam, Type, WhereClause,
    WherePredicate,
};

pub(crate) fn add_where_bound(wc: &mut WhereClause, ty: &Type, bound: &TokenStream) {
    let pred: WherePredicate = parse_quote!(#ty: #bound);
    wc.predicates.push(pred);
}

/// Clone `base` (or start an empty clause) and bound every type in `types` by `bound`.
pub(crate) fn where_with_bounds(
    base: Option<&WhereClause>,
    types: &[&Type],
    bound: &TokenStream,
) -> Option<WhereClause> {
    let mut out = base.cloned();
    if !types.is_empty() {
        let wc = out.get_or_insert_with(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });
        for ty in types {
            add_where_bound(wc, ty, bound);
        }
    }
    out
}

/// Header count literal for `n` fields or entries.
pub(crate) fn count_u32(n: usize, span: Span) -> syn::Result<u32> {
    u32::try_from(n).map_err(|_| syn::Error::new(span, "too many fields to encode"))
}

/// Add a fresh input lifetime `'__cbor` outliving every lifetime already on the type.
pub(crate) fn decode_lifetime(generics: &Generics) -> (Generics, Lifetime) {
    let mut out = generics.clone();
    let mut name = "__cbor".to_string();
    let mut counter = 0usize;
    loop {
        let probe = Ident::new(&name, Span::call_site());
        if !out.lifetimes().any(|lt| lt.lifetime.ident == probe) {
            break;
        }
        counter += 1;
        name = format!("__cbor{counter}");
    }
    let lt = Lifetime::new(&format!("'{name}"), Span::call_site());
    out.params
        .insert(0, GenericParam::Lifetime(LifetimeParam::new(lt.clone())));

    let wc = out.make_where_clause();
    for lifetime in generics.lifetimes() {
        let lt_ident = &lifetime.lifetime;
        wc.predicates.push(parse_quote!(#lt: #lt_ident));
    }

    (out, lt)
}
