//! Lowering: property tree → ordered declarations.
//!
//! Values that share a slot (one key across merged objects, or the pooled
//! elements of arrays in one slot) are unified by canonical type: one distinct
//! non-null type wins, several degrade to "any". Objects in one slot merge
//! into one shape and must agree on their key set. Arrays in one slot pool
//! their elements.
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::aliases;
use crate::error::{Error, Result};
use crate::inference::{self, arr, CanonicalType};
use crate::ir::{Declaration, Member, TypeRef};
use crate::naming;
use crate::options::Language;
use crate::tree::ParsedProperty;

/// Lower a document into declarations: the root first, then nested types
/// with the last registered first. An empty root object yields nothing.
///
/// No declaration takes a name `language` output uses for a library type;
/// a root name that would gets a numeric suffix (`Guid` → `Guid2`).
pub fn lower(
    root_name: &str,
    language: Language,
    root: &ParsedProperty<'_>,
) -> Result<Vec<Declaration>> {
    let objects = root_objects(root)?;
    let keys = merged_keys(&objects, "$")?;
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let mut lowerer = Lowerer::new(language);
    let root_name = lowerer.reserve_root(root_name);
    let members = lowerer.lower_members(&objects, &keys, &root_name, "$")?;

    let mut out = Vec::with_capacity(lowerer.nested.len() + 1);
    out.push(Declaration { name: root_name, members });
    out.extend(lowerer.nested.into_iter().rev());
    Ok(out)
}

/// The objects making up the root declaration.
fn root_objects<'t, 'a>(root: &'t ParsedProperty<'a>) -> Result<Vec<&'t ParsedProperty<'a>>> {
    if root.is_object() {
        return Ok(vec![root]);
    }
    if !root.is_array() {
        return Err(Error::UnsupportedRoot { found: inference::kind_name(root.node) });
    }
    if root.children.is_empty() {
        return Err(Error::EmptyRootArray);
    }
    let mut objects = Vec::with_capacity(root.children.len());
    for element in root.children.iter().filter(|e| !e.is_null()) {
        if !element.is_object() {
            return Err(Error::UnsupportedRoot { found: inference::kind_name(element.node) });
        }
        objects.push(element);
    }
    if objects.is_empty() {
        return Err(Error::UnsupportedRoot { found: "an array of nulls" });
    }
    Ok(objects)
}

/// Key order of the first object, after checking every other object has
/// the same key set.
fn merged_keys<'a>(objects: &[&ParsedProperty<'a>], path: &str) -> Result<Vec<&'a str>> {
    let Some(first) = objects.first() else {
        return Ok(Vec::new());
    };
    let expected = first.keys();
    for (i, object) in objects.iter().enumerate().skip(1) {
        let found = object.keys();
        let same = found.len() == expected.len() && found.iter().all(|k| expected.contains(k));
        if !same {
            return Err(Error::IncompatibleShapes {
                path: format!("{path}[{i}]"),
                expected: expected.iter().map(|k| k.to_string()).collect(),
                found: found.iter().map(|k| k.to_string()).collect(),
            });
        }
    }
    Ok(expected)
}

// ---- Lowerer ---- //

/// Per-call state: nested declarations in registration order plus the name
/// registry. Dropped when the call returns.
struct Lowerer {
    nested: Vec<Declaration>,
    /// name → index into `nested`; `None` marks reserved names (library
    /// types and the root).
    names: IndexMap<String, Option<usize>>,
}

impl Lowerer {
    fn new(language: Language) -> Self {
        let names = aliases::reserved_names(language)
            .iter()
            .map(|name| (name.to_string(), None))
            .collect();
        Self { nested: Vec::new(), names }
    }

    /// Claim the root's name, numbering it past any reserved name.
    fn reserve_root(&mut self, root_name: &str) -> String {
        let mut candidate = root_name.to_string();
        let mut n = 2usize;
        while self.names.contains_key(&candidate) {
            candidate = format!("{root_name}{n}");
            n += 1;
        }
        if candidate != root_name {
            debug!(requested = %root_name, name = %candidate, "renamed root type");
        }
        self.names.insert(candidate.clone(), None);
        candidate
    }

    fn lower_members(
        &mut self,
        objects: &[&ParsedProperty<'_>],
        keys: &[&str],
        owner: &str,
        path: &str,
    ) -> Result<Vec<Member>> {
        let mut columns: IndexMap<&str, Vec<&ParsedProperty<'_>>> =
            keys.iter().map(|k| (*k, Vec::with_capacity(objects.len()))).collect();
        for object in objects {
            for child in &object.children {
                if let Some(column) = child.key.and_then(|k| columns.get_mut(k)) {
                    column.push(child);
                }
            }
        }

        let mut members = Vec::with_capacity(columns.len());
        for (key, values) in &columns {
            let slot_path = format!("{path}.{key}");
            let (ty, nullable) = self.lower_slot(values, key, owner, &slot_path)?;
            members.push(Member { key: key.to_string(), ty, nullable });
        }
        Ok(members)
    }

    /// Unify the values sharing one slot. `key` names nested types found
    /// here; `owner` is the enclosing type's base name.
    fn lower_slot(
        &mut self,
        values: &[&ParsedProperty<'_>],
        key: &str,
        owner: &str,
        path: &str,
    ) -> Result<(TypeRef, bool)> {
        let nullable = values.iter().any(|v| v.is_null());
        let present: Vec<&ParsedProperty<'_>> =
            values.iter().copied().filter(|v| !v.is_null()).collect();

        // arrays without a non-null element say nothing about the element type
        let evidence: Vec<&ParsedProperty<'_>> =
            present.iter().copied().filter(|v| !is_hollow_array(v)).collect();
        let hollow = present.len() - evidence.len();

        let distinct = arr::distinct_non_null(evidence.iter().map(|v| (false, &v.ty)));
        let ty = match distinct.as_slice() {
            [] if hollow > 0 => self.lower_arrays(&present, key, owner, path)?,
            [] => TypeRef::Any,
            // arrays pool their elements even when their element types differ
            ts if ts.iter().all(|t| t.is_array()) => {
                self.lower_arrays(&present, key, owner, path)?
            }
            _ if hollow > 0 => TypeRef::Any,
            [CanonicalType::Object] => self.lower_objects(&present, key, owner, path)?,
            [t] => TypeRef::Primitive((*t).clone()),
            _ => TypeRef::Any,
        };
        Ok((ty, nullable))
    }

    fn lower_arrays(
        &mut self,
        arrays: &[&ParsedProperty<'_>],
        key: &str,
        owner: &str,
        path: &str,
    ) -> Result<TypeRef> {
        let elements: Vec<&ParsedProperty<'_>> =
            arrays.iter().flat_map(|a| a.children.iter()).collect();
        let (item, _) = self.lower_slot(&elements, key, owner, path)?;
        // an array is nullable when it holds a null element
        let item_nullable = arrays.iter().any(|a| a.is_nullable());
        Ok(TypeRef::list(item, item_nullable))
    }

    fn lower_objects(
        &mut self,
        objects: &[&ParsedProperty<'_>],
        key: &str,
        owner: &str,
        path: &str,
    ) -> Result<TypeRef> {
        let keys = merged_keys(objects, path)?;
        if keys.is_empty() {
            return Ok(TypeRef::Any);
        }
        let base = naming::type_identifier(key);
        let members = self.lower_members(objects, &keys, &base, path)?;
        Ok(TypeRef::Named(self.register(base, owner, members)))
    }

    /// Name a nested shape. Tries the base name, then the owner-qualified
    /// name, then numbered variants; an existing declaration with the same
    /// members is reused instead of duplicated.
    fn register(&mut self, base: String, owner: &str, members: Vec<Member>) -> String {
        let qualified = format!("{owner}{base}");
        let mut attempt = 0usize;
        loop {
            let candidate = match attempt {
                0 => base.clone(),
                1 => qualified.clone(),
                n => format!("{qualified}{n}"),
            };
            attempt += 1;
            match self.names.get(&candidate) {
                None => {
                    if candidate != base {
                        debug!(base = %base, name = %candidate, "qualified nested type name");
                    }
                    trace!(name = %candidate, members = members.len(), "registered nested type");
                    self.names.insert(candidate.clone(), Some(self.nested.len()));
                    self.nested.push(Declaration { name: candidate.clone(), members });
                    return candidate;
                }
                Some(Some(idx)) if self.nested[*idx].members == members => return candidate,
                Some(_) => continue,
            }
        }
    }
}

fn is_hollow_array(value: &ParsedProperty<'_>) -> bool {
    value.is_array() && value.children.iter().all(ParsedProperty::is_null)
}

// ------------------------------- Tests ------------------------------------ //
