//! Python templates: dataclasses and plain `__init__` classes.
use std::collections::BTreeSet;

use super::{Import, RenderContext};
use crate::error::Result;
use crate::ir::Declaration;
use crate::naming::{self, UniqueNames};
use crate::options::Mutability;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shape {
    DataClass,
    PlainClass,
}

struct Field {
    ident: String,
    hint: Option<String>,
}

impl Field {
    fn param(&self) -> String {
        match &self.hint {
            Some(hint) => format!("{}: {hint}", self.ident),
            None => self.ident.clone(),
        }
    }
}

pub(super) fn render(
    shape: Shape,
    decl: &Declaration,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    let options = ctx.options;
    // dataclasses are driven by their annotations
    let hinted = shape == Shape::DataClass || options.type_hints;

    let mut names = UniqueNames::with_separator("_");
    let mut fields = Vec::with_capacity(decl.members.len());
    for member in &decl.members {
        let ident = names.claim(naming::python_member(&member.key));
        let hint = if hinted { Some(ctx.spell(&member.ty, member.nullable)?) } else { None };
        fields.push(Field { ident, hint });
    }

    let unit = ctx.unit.clone();
    let mut lines = Vec::with_capacity(fields.len() + 2);
    match shape {
        Shape::DataClass => {
            ctx.imports.insert(Import::Dataclass);
            lines.push(match options.mutability {
                Mutability::InitOnly => "@dataclass(frozen=True)".to_string(),
                Mutability::Settable => "@dataclass".to_string(),
            });
            lines.push(format!("class {}:", decl.name));
            lines.extend(fields.iter().map(|f| format!("{unit}{}", f.param())));
        }
        Shape::PlainClass => {
            let params: Vec<String> = fields.iter().map(Field::param).collect();
            let returns = if options.type_hints { " -> None" } else { "" };
            lines.push(format!("class {}:", decl.name));
            lines.push(format!("{unit}def __init__(self, {}){returns}:", params.join(", ")));
            lines.extend(fields.iter().map(|f| format!("{unit}{unit}self.{0} = {0}", f.ident)));
        }
    }
    Ok(lines.join("\n"))
}

// ---- Spelling hooks ---- //

pub(super) fn list_of(item: &str, imports: &mut BTreeSet<Import>) -> String {
    imports.insert(Import::TypingList);
    format!("List[{item}]")
}

pub(super) fn optional(inner: &str, imports: &mut BTreeSet<Import>) -> String {
    imports.insert(Import::TypingOptional);
    format!("Optional[{inner}]")
}

pub(super) fn import_for(spelling: &str) -> Option<Import> {
    match spelling {
        "UUID" => Some(Import::Uuid),
        "datetime" => Some(Import::Datetime),
        "timedelta" => Some(Import::Timedelta),
        "Decimal" => Some(Import::Decimal),
        "Any" => Some(Import::TypingAny),
        _ => None,
    }
}

/// `__future__` first, then modules alphabetically.
pub(super) fn import_lines(imports: &BTreeSet<Import>) -> Vec<String> {
    let mut lines = Vec::new();
    if imports.contains(&Import::FutureAnnotations) {
        lines.push("from __future__ import annotations".to_string());
    }
    if imports.contains(&Import::Dataclass) {
        lines.push("from dataclasses import dataclass".to_string());
    }
    let datetime =
        present(imports, &[(Import::Datetime, "datetime"), (Import::Timedelta, "timedelta")]);
    if !datetime.is_empty() {
        lines.push(format!("from datetime import {}", datetime.join(", ")));
    }
    if imports.contains(&Import::Decimal) {
        lines.push("from decimal import Decimal".to_string());
    }
    let typing = present(imports, &[
        (Import::TypingAny, "Any"),
        (Import::TypingList, "List"),
        (Import::TypingOptional, "Optional"),
    ]);
    if !typing.is_empty() {
        lines.push(format!("from typing import {}", typing.join(", ")));
    }
    if imports.contains(&Import::Uuid) {
        lines.push("from uuid import UUID".to_string());
    }
    lines
}

fn present(imports: &BTreeSet<Import>, pairs: &[(Import, &'static str)]) -> Vec<&'static str> {
    pairs
        .iter()
        .filter(|(import, _)| imports.contains(import))
        .map(|(_, name)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::tests::render_doc;
    use crate::options::{EmitOptions, Indentation, Language, ObjectStyle};
    use serde_json::json;

    fn python() -> EmitOptions {
        EmitOptions::for_language(Language::Python)
    }

    #[test]
    fn frozen_dataclass() {
        let out = render_doc(&json!({"id": 1, "name": "a"}), &python());
        assert_eq!(
            out,
            "from dataclasses import dataclass\n\n@dataclass(frozen=True)\nclass Root:\n    id: int\n    name: str\n"
        );
    }

    #[test]
    fn settable_dataclass_is_not_frozen() {
        let mut options = python();
        options.mutability = Mutability::Settable;
        let out = render_doc(&json!({"id": 1}), &options);
        assert!(out.contains("\n@dataclass\nclass Root:\n"));
    }

    #[test]
    fn nested_types_pull_in_future_annotations() {
        let out = render_doc(
            &json!({"userId": 7, "when": "2024-03-01T12:30:00Z", "items": [{"price": 1.25}, null], "extra": null}),
            &python(),
        );
        assert_eq!(
            out,
            "from __future__ import annotations\n\
             from dataclasses import dataclass\n\
             from datetime import datetime\n\
             from typing import Any, List, Optional\n\
             \n\
             @dataclass(frozen=True)\n\
             class Root:\n    \
             user_id: int\n    \
             when: datetime\n    \
             items: List[Optional[Items]]\n    \
             extra: Optional[Any]\n\
             \n\
             @dataclass(frozen=True)\n\
             class Items:\n    \
             price: float\n"
        );
    }

    #[test]
    fn plain_class_with_hints() {
        let options = python().with_style(ObjectStyle::PlainClass);
        let out = render_doc(&json!({"id": 1, "class": "x"}), &options);
        assert_eq!(
            out,
            "class Root:\n    def __init__(self, id: int, class_: str) -> None:\n        self.id = id\n        self.class_ = class_\n"
        );
    }

    #[test]
    fn plain_class_without_hints_needs_no_imports() {
        let mut options = python().with_style(ObjectStyle::PlainClass);
        options.type_hints = false;
        options.indentation = Indentation::spaces(2);
        let out = render_doc(&json!({"tags": ["a"], "at": "12:30"}), &options);
        assert_eq!(out, "class Root:\n  def __init__(self, tags, at):\n    self.tags = tags\n    self.at = at\n");
    }

    #[test]
    fn duplicate_members_get_numbered() {
        let out = render_doc(&json!({"userId": 1, "user_id": 2}), &python());
        assert!(out.contains("    user_id: int\n    user_id_2: int\n"));
    }

    #[test]
    fn import_order_is_stable() {
        let imports = BTreeSet::from([
            Import::Uuid,
            Import::TypingOptional,
            Import::Decimal,
            Import::Timedelta,
        ]);
        assert_eq!(
            import_lines(&imports),
            [
                "from datetime import timedelta",
                "from decimal import Decimal",
                "from typing import Optional",
                "from uuid import UUID",
            ]
        );
    }
}
