use syn::{GenericArgument, Ident, Path, PathArguments, Type};

/// `Option<..>` by last path segment; such fields may be absent from a decoded map.
pub(crate) fn is_option_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(tp) if tp.path.segments.last().is_some_and(|seg| seg.ident == "Option"))
}

/// `Self`, `Name`, `crate::Name`, `self::Name` or `super::Name`.
fn names_self(path: &Path, self_ident: &Ident) -> bool {
    let Some(last) = path.segments.last() else {
        return false;
    };
    let prefix_len = path.segments.len() - 1;
    if last.ident == "Self" {
        return prefix_len == 0;
    }
    last.ident == *self_ident
        && path
            .segments
            .iter()
            .take(prefix_len)
            .all(|seg| seg.ident == "crate" || seg.ident == "self" || seg.ident == "super")
}

fn type_args(path: &Path) -> impl Iterator<Item = &Type> {
    path.segments.iter().flat_map(|seg| match &seg.arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            })
            .collect::<Vec<_>>(),
        _ => Vec::new(),
    })
}

/// Whether `ty` may refer to the type being derived.
///
/// Recursive field types get no where-bound: `Vec<Self>: CborEncode` would make the impl depend
/// on itself.
pub(crate) fn type_mentions_self(ty: &Type, self_ident: &Ident) -> bool {
    match ty {
        Type::Path(tp) => {
            (tp.qself.is_none() && names_self(&tp.path, self_ident))
                || tp
                    .qself
                    .as_ref()
                    .is_some_and(|q| type_mentions_self(&q.ty, self_ident))
                || type_args(&tp.path).any(|inner| type_mentions_self(inner, self_ident))
        }
        Type::Reference(r) => type_mentions_self(&r.elem, self_ident),
        Type::Array(a) => type_mentions_self(&a.elem, self_ident),
        Type::Slice(s) => type_mentions_self(&s.elem, self_ident),
        Type::Group(g) => type_mentions_self(&g.elem, self_ident),
        Type::Paren(p) => type_mentions_self(&p.elem, self_ident),
        Type::Tuple(t) => t.elems.iter().any(|e| type_mentions_self(e, self_ident)),
        _ => false,
    }
}
