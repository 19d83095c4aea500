//! Property tree: the parsed document annotated with canonical types.
//!
//! Built once per call and borrowed from the document it describes. Array
//! types are derived from the children's types, so every node is classified
//! exactly once.
use serde_json::Value;

use crate::error::Result;
use crate::inference::{self, arr, CanonicalType};

#[derive(Debug, Clone)]
pub struct ParsedProperty<'a> {
    /// Source key, verbatim. Absent for the root and for array elements.
    pub key: Option<&'a str>,
    pub node: &'a Value,
    pub ty: CanonicalType,
    /// Object members in source order, or array elements in order.
    pub children: Vec<ParsedProperty<'a>>,
}

impl<'a> ParsedProperty<'a> {
    pub fn root(node: &'a Value) -> Result<Self> {
        Self::build(None, node)
    }

    fn build(key: Option<&'a str>, node: &'a Value) -> Result<Self> {
        let children = build_tree(node)?;
        let ty = match node {
            Value::Array(_) => arr::unify_elements(children.iter().map(|c| (c.is_null(), &c.ty))),
            other => inference::classify_leaf(other)?,
        };
        Ok(Self { key, node, ty, children })
    }

    pub fn is_null(&self) -> bool {
        self.node.is_null()
    }

    pub fn is_nullable(&self) -> bool {
        inference::is_nullable(self.node)
    }

    pub fn is_object(&self) -> bool {
        self.node.is_object()
    }

    pub fn is_array(&self) -> bool {
        self.node.is_array()
    }

    /// Member keys of an object node, in source order.
    pub fn keys(&self) -> Vec<&'a str> {
        self.children.iter().filter_map(|c| c.key).collect()
    }
}

/// Children of a node: one property per object member (source order, key
/// kept verbatim), one keyless property per array element, nothing for
/// scalars.
pub fn build_tree(node: &Value) -> Result<Vec<ParsedProperty<'_>>> {
    match node {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| ParsedProperty::build(Some(k.as_str()), v))
            .collect(),
        Value::Array(xs) => xs.iter().map(|v| ParsedProperty::build(None, v)).collect(),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_members_keep_source_order_and_raw_keys() {
        let doc = json!({"zeta": 1, "first-name": "a", "Alpha": true});
        let kids = build_tree(&doc).unwrap();
        let keys: Vec<_> = kids.iter().map(|p| p.key.unwrap()).collect();
        assert_eq!(keys, ["zeta", "first-name", "Alpha"]);
        assert_eq!(kids[0].ty, CanonicalType::Int32);
        assert_eq!(kids[2].ty, CanonicalType::Bool);
    }

    #[test]
    fn array_elements_have_no_key() {
        let doc = json!([1, null, 3]);
        let kids = build_tree(&doc).unwrap();
        assert_eq!(kids.len(), 3);
        assert!(kids.iter().all(|p| p.key.is_none()));
        assert!(kids[1].is_null());
    }

    #[test]
    fn scalars_have_no_children() {
        assert!(build_tree(&json!("x")).unwrap().is_empty());
        assert!(build_tree(&json!(null)).unwrap().is_empty());
    }

    #[test]
    fn array_type_agrees_with_classifier() {
        for doc in [
            json!([1, 2, null]),
            json!([1, "a", 2.1]),
            json!([[1], [2]]),
            json!([{"id": 1}, null]),
            json!([]),
        ] {
            let root = ParsedProperty::root(&doc).unwrap();
            assert_eq!(root.ty, inference::classify(&doc).unwrap(), "{doc}");
        }
    }

    #[test]
    fn keys_and_nullability() {
        let doc = json!({"tags": ["a", null], "owner": null});
        let root = ParsedProperty::root(&doc).unwrap();
        assert_eq!(root.keys(), ["tags", "owner"]);
        assert!(root.children[0].is_nullable());
        assert!(root.children[1].is_null());
        assert!(!root.is_nullable());
    }

    #[test]
    fn number_errors_propagate_from_deep_nodes() {
        let doc: Value = serde_json::from_str(r#"{"a": [{"b": 1e999}]}"#).unwrap();
        assert!(ParsedProperty::root(&doc).is_err());
    }
}
