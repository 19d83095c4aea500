use super::CanonicalType;

/// Array element type from `(is_null, type)` pairs: the single distinct
/// non-null type, or `HeterogeneousArray` when zero or several remain.
pub fn unify_elements<'a, I>(elements: I) -> CanonicalType
where
    I: IntoIterator<Item = (bool, &'a CanonicalType)>,
{
    match distinct_non_null(elements).as_slice() {
        [only] => CanonicalType::ArrayOf(Box::new((*only).clone())),
        _ => CanonicalType::HeterogeneousArray,
    }
}

/// Distinct types of the non-null entries, in first-seen order.
pub fn distinct_non_null<'a, I>(elements: I) -> Vec<&'a CanonicalType>
where
    I: IntoIterator<Item = (bool, &'a CanonicalType)>,
{
    let mut out: Vec<&CanonicalType> = Vec::new();
    for (is_null, ty) in elements {
        if !is_null && !out.contains(&ty) {
            out.push(ty);
        }
    }
    out
}
