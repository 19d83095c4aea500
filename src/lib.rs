//! Infer type declarations from a sample JSON document.
//!
//! ```text
//! source ──relax──▶ serde_json::Value ──tree──▶ ParsedProperty ──lower──▶ [Declaration] ──emit──▶ text
//! ```
//!
//! Supported targets are C# (positional record, class, struct) and Python
//! (dataclass, plain class). Every call is self-contained; nothing is cached
//! between calls.
pub mod aliases;
pub mod dispatch;
pub mod emit;
pub mod error;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod options;
pub mod relaxed;
pub mod tree;

pub use dispatch::{parse, parse_bytes, parse_reader, parse_with_defaults, render_document};
pub use emit::Emitter;
pub use error::{Error, Result};
pub use inference::CanonicalType;
pub use options::{
    Accessibility, EmitOptions, IndentChar, Indentation, Language, Mutability, ObjectStyle,
    SerializerAttributes,
};
