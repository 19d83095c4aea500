//! Emitters: one shared walk over the lowered declarations, parameterized by
//! per-style token templates.
//!
//! The closed [`Emitter`] set is selected from a `(language, style)` pair.
//! Type spelling, import collection and document assembly live here; the
//! language modules only contribute templates.
mod csharp;
mod python;

use std::collections::BTreeSet;

use tracing::debug;

use crate::aliases;
use crate::error::{Error, Result};
use crate::inference::CanonicalType;
use crate::ir::{Declaration, TypeRef};
use crate::options::{EmitOptions, Language, ObjectStyle};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitter {
    CSharpRecord,
    CSharpClass,
    CSharpStruct,
    PythonDataClass,
    PythonPlainClass,
}

/// Import lines a rendered document may need. Collected while spelling
/// types, never by scanning the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Import {
    System,
    FutureAnnotations,
    Dataclass,
    Datetime,
    Timedelta,
    Decimal,
    TypingAny,
    TypingList,
    TypingOptional,
    Uuid,
}

/// State threaded through one render call.
pub(crate) struct RenderContext<'o> {
    pub language: Language,
    pub options: &'o EmitOptions,
    /// One indentation level.
    pub unit: String,
    pub imports: BTreeSet<Import>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Emitter {
    pub fn select(language: Language, style: ObjectStyle) -> Result<Self> {
        match (language, style) {
            (Language::CSharp, ObjectStyle::Record) => Ok(Emitter::CSharpRecord),
            (Language::CSharp, ObjectStyle::Class) => Ok(Emitter::CSharpClass),
            (Language::CSharp, ObjectStyle::Struct) => Ok(Emitter::CSharpStruct),
            (Language::Python, ObjectStyle::DataClass) => Ok(Emitter::PythonDataClass),
            (Language::Python, ObjectStyle::PlainClass) => Ok(Emitter::PythonPlainClass),
            (language, style) => Err(Error::TargetNotImplemented { language, style }),
        }
    }

    pub fn language(self) -> Language {
        match self {
            Emitter::CSharpRecord | Emitter::CSharpClass | Emitter::CSharpStruct => {
                Language::CSharp
            }
            Emitter::PythonDataClass | Emitter::PythonPlainClass => Language::Python,
        }
    }

    /// Render declarations (root first) into one document: imports, a blank
    /// line, then declarations separated by one blank line, ending in a
    /// single newline. No declarations render as the empty string.
    pub fn render(self, declarations: &[Declaration], options: &EmitOptions) -> Result<String> {
        if declarations.is_empty() {
            return Ok(String::new());
        }
        let mut ctx = RenderContext {
            language: self.language(),
            options,
            unit: options.indentation.unit(),
            imports: BTreeSet::new(),
        };

        let mut blocks = Vec::with_capacity(declarations.len());
        for decl in declarations {
            let block = match self {
                Emitter::CSharpRecord => csharp::render(csharp::Shape::Record, decl, &mut ctx)?,
                Emitter::CSharpClass => csharp::render(csharp::Shape::Class, decl, &mut ctx)?,
                Emitter::CSharpStruct => csharp::render(csharp::Shape::Struct, decl, &mut ctx)?,
                Emitter::PythonDataClass => {
                    python::render(python::Shape::DataClass, decl, &mut ctx)?
                }
                Emitter::PythonPlainClass => {
                    python::render(python::Shape::PlainClass, decl, &mut ctx)?
                }
            };
            blocks.push(block);
        }

        let imports = match ctx.language {
            Language::CSharp => csharp::import_lines(&ctx.imports),
            Language::Python => python::import_lines(&ctx.imports),
        };
        debug!(emitter = ?self, declarations = blocks.len(), imports = imports.len(), "rendered");

        let mut out = String::new();
        if !imports.is_empty() {
            out.push_str(&imports.join("\n"));
            out.push_str("\n\n");
        }
        out.push_str(&blocks.join("\n\n"));
        out.push('\n');
        Ok(out)
    }
}

impl RenderContext<'_> {
    /// Spell a type reference, wrapping it as nullable when asked.
    pub fn spell(&mut self, ty: &TypeRef, nullable: bool) -> Result<String> {
        let inner = match ty {
            TypeRef::Primitive(t) => self.alias(t)?,
            TypeRef::Any => self.alias(&CanonicalType::Object)?,
            TypeRef::Named(name) => {
                if self.language == Language::Python {
                    self.imports.insert(Import::FutureAnnotations);
                }
                name.clone()
            }
            TypeRef::List { item, item_nullable } => {
                let item = self.spell(item, *item_nullable)?;
                match self.language {
                    Language::CSharp => csharp::list_of(&item),
                    Language::Python => python::list_of(&item, &mut self.imports),
                }
            }
        };
        if !nullable {
            return Ok(inner);
        }
        Ok(match self.language {
            Language::CSharp => csharp::nullable(&inner),
            Language::Python => python::optional(&inner, &mut self.imports),
        })
    }

    fn alias(&mut self, ty: &CanonicalType) -> Result<String> {
        let spelling = aliases::require(ty, self.language)?;
        let import = match self.language {
            Language::CSharp => csharp::import_for(spelling),
            Language::Python => python::import_for(spelling),
        };
        self.imports.extend(import);
        Ok(spelling.to_string())
    }
}

// ------------------------------- Tests ------------------------------------ //
