//! Value classifier: one JSON node in, one canonical semantic type out.
//!
//! Scalars are classified from their own text (number literals keep their
//! exact spelling thanks to serde_json's `arbitrary_precision`). Arrays are
//! classified from the distinct canonical types of their non-null elements:
//! exactly one survivor wins, anything else degrades to
//! [`CanonicalType::HeterogeneousArray`]. Nullability is never part of the
//! type; it is read back from the node when needed.
pub mod arr;
pub mod num;
pub mod text;

use std::fmt;

use serde_json::Value;

use crate::error::Result;

// ------------------------------ Types ------------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalType {
    Bool,
    String,
    Guid,
    DateTime,
    DateTimeOffset,
    TimeSpan,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    /// Arbitrary-precision fallback for numbers.
    Decimal,
    /// A structured value, or "any" when the shape is empty or unknown.
    Object,
    ArrayOf(Box<CanonicalType>),
    /// Zero or several distinct non-null element types.
    HeterogeneousArray,
}

impl CanonicalType {
    pub fn is_array(&self) -> bool {
        matches!(self, CanonicalType::ArrayOf(_) | CanonicalType::HeterogeneousArray)
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalType::ArrayOf(inner) => write!(f, "ArrayOf({inner})"),
            other => write!(f, "{other:?}"),
        }
    }
}

// ----------------------------- Classify ----------------------------------- //

/// Classify a node, recursing into arrays.
pub fn classify(node: &Value) -> Result<CanonicalType> {
    match node {
        Value::Array(xs) => {
            let mut elements = Vec::with_capacity(xs.len());
            for x in xs {
                elements.push((x.is_null(), classify(x)?));
            }
            Ok(arr::unify_elements(elements.iter().map(|(null, ty)| (*null, ty))))
        }
        other => classify_leaf(other),
    }
}

/// Classify without looking at array elements.
///
/// `null` classifies as `Object` (the "any" placeholder); its nullability is
/// recovered from the node. Arrays answer `HeterogeneousArray` here: callers
/// that know the element types use [`arr::unify_elements`] instead.
pub fn classify_leaf(node: &Value) -> Result<CanonicalType> {
    Ok(match node {
        Value::Null | Value::Object(_) => CanonicalType::Object,
        Value::Bool(_) => CanonicalType::Bool,
        Value::Number(n) => num::classify_number(&n.to_string())?,
        Value::String(s) => text::classify_string(s),
        Value::Array(_) => CanonicalType::HeterogeneousArray,
    })
}

/// A node is nullable when it is `null` itself, or an array holding a `null`.
pub fn is_nullable(node: &Value) -> bool {
    match node {
        Value::Null => true,
        Value::Array(xs) => xs.iter().any(Value::is_null),
        _ => false,
    }
}

/// Human-readable JSON kind, for error messages.
pub fn kind_name(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use CanonicalType::*;

    fn num(src: &str) -> CanonicalType {
        let v: Value = serde_json::from_str(src).unwrap();
        classify(&v).unwrap()
    }

    #[test]
    fn numeric_classification_order() {
        assert_eq!(num("2147483647"), Int32);
        assert_eq!(num("2147483648"), UInt32);
        assert_eq!(num("4294967296"), Int64);
        assert_eq!(num("9223372036854775808"), UInt64);
        assert_eq!(num("3.4028235E+38"), Float32);
        assert_eq!(num("1.7976931348623157E+308"), Float64);
        assert_eq!(num("7.9228162514264337593543950335"), Decimal);
    }

    #[test]
    fn negative_integers_stay_signed() {
        assert_eq!(num("-1"), Int32);
        assert_eq!(num("-2147483649"), Int64);
    }

    #[test]
    fn scalars() {
        assert_eq!(classify(&json!(true)).unwrap(), Bool);
        assert_eq!(classify(&json!("hello")).unwrap(), String);
        assert_eq!(classify(&json!(null)).unwrap(), Object);
        assert_eq!(classify(&json!({"a": 1})).unwrap(), Object);
        assert_eq!(classify(&json!({})).unwrap(), Object);
    }

    #[test]
    fn arrays_unify_distinct_non_null_types() {
        assert_eq!(classify(&json!([1, 2, 3])).unwrap(), ArrayOf(Box::new(Int32)));
        assert_eq!(classify(&json!([1, 2, null])).unwrap(), ArrayOf(Box::new(Int32)));
        assert_eq!(classify(&json!([1, "a", 2.1])).unwrap(), HeterogeneousArray);
        assert_eq!(classify(&json!([{"id": 1}, null])).unwrap(), ArrayOf(Box::new(Object)));
        assert_eq!(classify(&json!([])).unwrap(), HeterogeneousArray);
        assert_eq!(classify(&json!([null])).unwrap(), HeterogeneousArray);
    }

    #[test]
    fn nested_arrays_compare_whole_types() {
        assert_eq!(
            classify(&json!([[1], [2, null]])).unwrap(),
            ArrayOf(Box::new(ArrayOf(Box::new(Int32))))
        );
        assert_eq!(classify(&json!([[1], ["a"]])).unwrap(), HeterogeneousArray);
    }

    #[test]
    fn nullability_is_read_from_the_node() {
        assert!(is_nullable(&json!(null)));
        assert!(is_nullable(&json!([1, null])));
        assert!(!is_nullable(&json!([1, 2])));
        assert!(!is_nullable(&json!({"a": null})));
    }

    #[test]
    fn display_spells_nested_arrays() {
        assert_eq!(ArrayOf(Box::new(Guid)).to_string(), "ArrayOf(Guid)");
        assert_eq!(HeterogeneousArray.to_string(), "HeterogeneousArray");
    }
}
