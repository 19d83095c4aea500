//! C# templates: positional records, classes and structs.
use std::collections::BTreeSet;

use super::{Import, RenderContext};
use crate::error::Result;
use crate::ir::Declaration;
use crate::naming::{self, UniqueNames};
use crate::options::{EmitOptions, Mutability, SerializerAttributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Shape {
    Record,
    Class,
    Struct,
}

struct Field {
    ident: String,
    ty: String,
    key: String,
}

pub(super) fn render(
    shape: Shape,
    decl: &Declaration,
    ctx: &mut RenderContext<'_>,
) -> Result<String> {
    let options = ctx.options;
    let mut names = UniqueNames::default();
    let mut fields = Vec::with_capacity(decl.members.len());
    for member in &decl.members {
        let ident = names.claim(naming::csharp_member(&member.key, &decl.name)?);
        let ty = ctx.spell(&member.ty, member.nullable)?;
        fields.push(Field { ident, ty, key: member.key.clone() });
    }

    let header = header(shape, &decl.name, options);
    let unit = &ctx.unit;
    Ok(match shape {
        Shape::Record => record(&header, &fields, unit, options),
        Shape::Class | Shape::Struct => braced(&header, &fields, unit, options),
    })
}

fn header(shape: Shape, name: &str, options: &EmitOptions) -> String {
    let mut header = options.access.keyword().to_string();
    if !options.inheritable && shape != Shape::Struct {
        header.push_str(" sealed");
    }
    header.push_str(match shape {
        Shape::Record => " record ",
        Shape::Class => " class ",
        Shape::Struct => " struct ",
    });
    header.push_str(name);
    header
}

/// `header(` + one parameter per line + `);`
fn record(header: &str, fields: &[Field], unit: &str, options: &EmitOptions) -> String {
    let params: Vec<String> = fields
        .iter()
        .map(|f| {
            let attribute = attribute(options.serializer, &f.key)
                .map(|a| format!("[property: {a}] "))
                .unwrap_or_default();
            format!("{unit}{attribute}{} {}", f.ty, f.ident)
        })
        .collect();
    format!("{header}(\n{}\n);", params.join(",\n"))
}

/// Brace-delimited body with one auto-property per member.
fn braced(header: &str, fields: &[Field], unit: &str, options: &EmitOptions) -> String {
    let access = options.access.keyword();
    let accessors = match options.mutability {
        Mutability::InitOnly => "{ get; init; }",
        Mutability::Settable => "{ get; set; }",
    };
    let members: Vec<String> = fields
        .iter()
        .map(|f| {
            let property = format!("{unit}{access} {} {} {accessors}", f.ty, f.ident);
            match attribute(options.serializer, &f.key) {
                Some(a) => format!("{unit}[{a}]\n{property}"),
                None => property,
            }
        })
        .collect();
    let separator = match options.serializer {
        SerializerAttributes::None => "\n",
        _ => "\n\n",
    };
    format!("{header}\n{{\n{}\n}}", members.join(separator))
}

/// Fully qualified, so no using line is ever needed for it.
fn attribute(serializer: SerializerAttributes, key: &str) -> Option<String> {
    let literal = string_literal(key);
    match serializer {
        SerializerAttributes::None => None,
        SerializerAttributes::SystemTextJson => {
            Some(format!("System.Text.Json.Serialization.JsonPropertyName({literal})"))
        }
        SerializerAttributes::Newtonsoft => {
            Some(format!("Newtonsoft.Json.JsonProperty({literal})"))
        }
    }
}

fn string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ---- Spelling hooks ---- //

pub(super) fn list_of(item: &str) -> String {
    format!("{item}[]")
}

pub(super) fn nullable(inner: &str) -> String {
    format!("{inner}?")
}

pub(super) fn import_for(spelling: &str) -> Option<Import> {
    match spelling {
        "Guid" | "DateTime" | "DateTimeOffset" | "TimeSpan" => Some(Import::System),
        _ => None,
    }
}

pub(super) fn import_lines(imports: &BTreeSet<Import>) -> Vec<String> {
    if imports.contains(&Import::System) {
        vec!["using System;".to_string()]
    } else {
        Vec::new()
    }
}
