//! Entry points: JSON source in, declaration text out.
//!
//! Every overload funnels into one parse of an immutable document followed by
//! [`render_document`]. Output is all or nothing: any error leaves no text.
use std::io::Read;

use serde_json::Value;
use tracing::debug;

use crate::emit::Emitter;
use crate::error::{Error, Result};
use crate::lower;
use crate::naming;
use crate::options::EmitOptions;
use crate::relaxed;
use crate::tree::ParsedProperty;

/// Render declarations for `source`, naming the root type `object_name`.
pub fn parse(object_name: &str, source: &str, options: &EmitOptions) -> Result<String> {
    parse_bytes(object_name, source.as_bytes(), options)
}

/// [`parse`] with default options (C# positional record).
pub fn parse_with_defaults(object_name: &str, source: &str) -> Result<String> {
    parse(object_name, source, &EmitOptions::default())
}

pub fn parse_bytes(object_name: &str, source: &[u8], options: &EmitOptions) -> Result<String> {
    let (emitter, root_name) = prepare(object_name, options)?;
    let document: Value = serde_json::from_slice(&relaxed::relax(source))?;
    render_with(emitter, &root_name, &document, options)
}

/// Reads the whole stream before parsing.
pub fn parse_reader<R: Read>(
    object_name: &str,
    mut reader: R,
    options: &EmitOptions,
) -> Result<String> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;
    parse_bytes(object_name, &source, options)
}

/// Render an already-parsed document.
pub fn render_document(
    object_name: &str,
    document: &Value,
    options: &EmitOptions,
) -> Result<String> {
    let (emitter, root_name) = prepare(object_name, options)?;
    render_with(emitter, &root_name, document, options)
}

/// Argument checks that need no document: the emitter and the root name.
fn prepare(object_name: &str, options: &EmitOptions) -> Result<(Emitter, String)> {
    if object_name.trim().is_empty() {
        return Err(Error::InvalidArgument("object name must not be empty".into()));
    }
    let emitter = Emitter::select(options.language, options.style)?;
    Ok((emitter, naming::type_identifier(object_name)))
}

fn render_with(
    emitter: Emitter,
    root_name: &str,
    document: &Value,
    options: &EmitOptions,
) -> Result<String> {
    let root = ParsedProperty::root(document)?;
    let declarations = lower::lower(root_name, options.language, &root)?;
    debug!(root = %root_name, ?emitter, declarations = declarations.len(), "lowered document");
    emitter.render(&declarations, options)
}
