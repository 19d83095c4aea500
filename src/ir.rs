// Language-neutral declaration model handed to the emitters. No serde_json::Value here.

use crate::inference::CanonicalType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(CanonicalType),   // spelled through the alias table
    Any,                        // empty, unknown or heterogeneous shape
    Named(String),              // a nested declaration
    List {
        item: Box<TypeRef>,
        item_nullable: bool,    // `[1, null]`: the element is optional, not the list
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub key: String,            // raw source key; emitters derive identifiers
    pub ty: TypeRef,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub members: Vec<Member>,   // source order of the first object seen
}

impl TypeRef {
    pub fn list(item: TypeRef, item_nullable: bool) -> Self {
        TypeRef::List { item: Box::new(item), item_nullable }
    }
}
