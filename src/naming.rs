//! Name normalizer: pascal/snake conversion, sanitizing, and the identifier
//! rules each emitter applies on top.
//!
//! Word boundaries: every non-alphanumeric run (dropped), an uppercase letter
//! after a lowercase letter or digit (`camelCase`), and the last capital of an
//! acronym run when a lowercase letter follows (`HTTPServer` → `HTTP`,
//! `Server`). Pascal words are re-cased to `Capitalized` form, so acronyms
//! fold (`ABC` → `Abc`).
use std::collections::HashSet;

use crate::error::{Error, Result};

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

// ---- Case conversion ---- //

/// Split into words along the boundaries described in the module docs.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut out = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() && c.is_uppercase() {
            // `current` is non-empty, so the previous char is alphanumeric
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if !prev.is_uppercase() || next_is_lower {
                out.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Repeats the word pass until the text stops changing: re-casing a word
/// can expose or hide a boundary when a char has no single-char case
/// mapping (`İ`).
pub fn to_pascal_case(input: &str) -> String {
    let mut current = pascal_pass(input);
    for _ in 0..=current.chars().count() {
        let next = pascal_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn pascal_pass(input: &str) -> String {
    words(input).iter().map(|w| capitalize(w)).collect()
}

pub fn to_snake_case(input: &str) -> String {
    let words: Vec<String> = words(input)
        .iter()
        .map(|w| w.chars().map(lower_char).collect())
        .collect();
    words.join("_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => std::iter::once(upper_char(first)).chain(chars.map(lower_char)).collect(),
        None => String::new(),
    }
}

/// Case mapping that only applies when it yields exactly one char.
fn upper_char(c: char) -> char {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn lower_char(c: char) -> char {
    let mut it = c.to_lowercase();
    match (it.next(), it.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

// ---- Sanitize ---- //

/// Replace every `illegal` char with `replacement` (which may be empty).
/// A missing replacement is an argument error.
pub fn sanitize(input: &str, illegal: char, replacement: Option<&str>) -> Result<String> {
    let replacement = replacement
        .ok_or_else(|| Error::InvalidArgument("sanitize: replacement must be provided".into()))?;
    Ok(input.replace(illegal, replacement))
}

// ---- Identifiers ---- //

/// Declared type name for a raw key or object name.
pub fn type_identifier(raw: &str) -> String {
    let mut name = to_pascal_case(raw);
    if name.is_empty() {
        name = "Item".into();
    }
    if starts_with_digit(&name) {
        name.insert(0, '_');
    }
    if matches!(name.as_str(), "None" | "True" | "False") {
        name.push_str("Type");
    }
    name
}

/// C# property/parameter name for a raw key inside `enclosing`.
pub fn csharp_member(raw: &str, enclosing: &str) -> Result<String> {
    let cleaned = sanitize(raw, ':', Some("_"))?;
    let mut name = to_pascal_case(&cleaned);
    if name.is_empty() {
        name = "Property".into();
    }
    if starts_with_digit(&name) {
        name.insert(0, '_');
    }
    if name == enclosing {
        name.push_str("Value");
    }
    Ok(name)
}

/// Python attribute name for a raw key.
pub fn python_member(raw: &str) -> String {
    let mut name = to_snake_case(raw);
    if name.is_empty() {
        name = "field".into();
    }
    if starts_with_digit(&name) {
        name.insert(0, '_');
    }
    if name == "self" || PYTHON_KEYWORDS.contains(&name.as_str()) {
        name.push('_');
    }
    name
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Per-declaration member name deduplication: the second `Id` becomes
/// `Id2` (or `id_2` with a `_` separator), and so on.
#[derive(Debug, Default)]
pub struct UniqueNames {
    seen: HashSet<String>,
    separator: &'static str,
}

impl UniqueNames {
    pub fn with_separator(separator: &'static str) -> Self {
        Self { seen: HashSet::new(), separator }
    }

    pub fn claim(&mut self, base: String) -> String {
        if self.seen.insert(base.clone()) {
            return base;
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}{}{n}", self.separator);
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
