//! Emission options: every knob has a default and every token parser is lenient.
//!
//! Tokens are matched case-insensitively with `-`, `_`, `.` and spaces ignored,
//! so `protected-internal`, `ProtectedInternal` and `protected internal` agree.
//! Anything unrecognized falls back to the default without complaint.
use std::fmt;

use serde::Deserialize;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Language {
    #[default]
    CSharp,
    Python,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum ObjectStyle {
    /// Positional record with a primary constructor.
    #[default]
    Record,
    /// Class with auto-properties.
    Class,
    Struct,
    DataClass,
    /// Plain class with an `__init__` assigning every member.
    PlainClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
    ProtectedInternal,
    PrivateProtected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum SerializerAttributes {
    None,
    /// `System.Text.Json.Serialization.JsonPropertyName`
    #[default]
    SystemTextJson,
    /// `Newtonsoft.Json.JsonProperty`
    Newtonsoft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Mutability {
    #[default]
    InitOnly,
    Settable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum IndentChar {
    #[default]
    Space,
    Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawIndentation")]
pub struct Indentation {
    pub ch: IndentChar,
    pub width: usize,
}

/// Wire form of [`Indentation`]: a missing width follows the character.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIndentation {
    ch: IndentChar,
    width: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawOptions")]
pub struct EmitOptions {
    pub language: Language,
    pub style: ObjectStyle,
    pub access: Accessibility,
    /// When false the declaration is sealed/final.
    pub inheritable: bool,
    pub serializer: SerializerAttributes,
    pub mutability: Mutability,
    pub indentation: Indentation,
    pub type_hints: bool,
}

/// Wire form of [`EmitOptions`]: the style stays optional so it can default
/// per language.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "snake_case")]
struct RawOptions {
    language: Language,
    style: Option<ObjectStyle>,
    access: Accessibility,
    inheritable: bool,
    serializer: SerializerAttributes,
    mutability: Mutability,
    indentation: Option<Indentation>,
    type_hints: Option<bool>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

/// Case- and separator-insensitive form of an option token.
fn fold_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | '.' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl Language {
    pub fn from_token(token: &str) -> Self {
        match fold_token(token).as_str() {
            "python" | "py" | "python3" => Language::Python,
            _ => Language::CSharp,
        }
    }

    /// File extension used when writing a declaration to disk.
    pub fn file_extension(self) -> &'static str {
        match self {
            Language::CSharp => "cs",
            Language::Python => "py",
        }
    }
}

impl ObjectStyle {
    pub fn from_token(token: &str) -> Self {
        match fold_token(token).as_str() {
            "class" => ObjectStyle::Class,
            "struct" => ObjectStyle::Struct,
            "dataclass" | "data" => ObjectStyle::DataClass,
            "plainclass" | "plain" | "initclass" | "init" => ObjectStyle::PlainClass,
            _ => ObjectStyle::Record,
        }
    }

    pub fn default_for(language: Language) -> Self {
        match language {
            Language::CSharp => ObjectStyle::Record,
            Language::Python => ObjectStyle::DataClass,
        }
    }

    /// Like [`ObjectStyle::from_token`], but a token that is unknown, or names
    /// a style of another language, falls back to the language's default.
    pub fn from_token_for(token: &str, language: Language) -> Self {
        let folded = fold_token(token);
        let known = [
            "record", "class", "struct", "dataclass", "data", "plainclass", "plain", "initclass",
            "init",
        ];
        let style = Self::from_token(token);
        if known.contains(&folded.as_str()) && style.language() == language {
            style
        } else {
            Self::default_for(language)
        }
    }

    /// The language this style belongs to.
    pub fn language(self) -> Language {
        match self {
            ObjectStyle::Record | ObjectStyle::Class | ObjectStyle::Struct => Language::CSharp,
            ObjectStyle::DataClass | ObjectStyle::PlainClass => Language::Python,
        }
    }
}

impl Accessibility {
    pub fn from_token(token: &str) -> Self {
        match fold_token(token).as_str() {
            "internal" => Accessibility::Internal,
            "protected" => Accessibility::Protected,
            "private" => Accessibility::Private,
            "protectedinternal" => Accessibility::ProtectedInternal,
            "privateprotected" => Accessibility::PrivateProtected,
            _ => Accessibility::Public,
        }
    }

    /// The C# modifier keyword(s).
    pub fn keyword(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::Private => "private",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::PrivateProtected => "private protected",
        }
    }
}

impl SerializerAttributes {
    pub fn from_token(token: &str) -> Self {
        match fold_token(token).as_str() {
            "none" | "off" => SerializerAttributes::None,
            "newtonsoft" | "newtonsoftjson" | "jsonnet" => SerializerAttributes::Newtonsoft,
            _ => SerializerAttributes::SystemTextJson,
        }
    }
}

impl Mutability {
    pub fn from_token(token: &str) -> Self {
        match fold_token(token).as_str() {
            "settable" | "set" | "mutable" => Mutability::Settable,
            _ => Mutability::InitOnly,
        }
    }
}

impl IndentChar {
    pub fn from_token(token: &str) -> Self {
        match fold_token(token).as_str() {
            "tab" | "tabs" | "\t" => IndentChar::Tab,
            _ => IndentChar::Space,
        }
    }
}

impl IndentChar {
    /// Width used when only the character is given: 4 spaces or 1 tab.
    pub fn default_width(self) -> usize {
        match self {
            IndentChar::Space => 4,
            IndentChar::Tab => 1,
        }
    }
}

impl Indentation {
    pub fn spaces(width: usize) -> Self {
        Self { ch: IndentChar::Space, width }
    }

    pub fn tabs(width: usize) -> Self {
        Self { ch: IndentChar::Tab, width }
    }

    /// One indentation level.
    pub fn unit(&self) -> String {
        let ch = match self.ch {
            IndentChar::Space => ' ',
            IndentChar::Tab => '\t',
        };
        std::iter::repeat_n(ch, self.width).collect()
    }
}

impl Default for Indentation {
    fn default() -> Self {
        Self::spaces(IndentChar::Space.default_width())
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

impl EmitOptions {
    /// Defaults with the language's default style.
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            style: ObjectStyle::default_for(language),
            access: Accessibility::default(),
            inheritable: false,
            serializer: SerializerAttributes::default(),
            mutability: Mutability::default(),
            indentation: Indentation::default(),
            type_hints: true,
        }
    }

    pub fn with_style(mut self, style: ObjectStyle) -> Self {
        self.style = style;
        self
    }
}

impl From<RawIndentation> for Indentation {
    fn from(raw: RawIndentation) -> Self {
        Self { ch: raw.ch, width: raw.width.unwrap_or_else(|| raw.ch.default_width()) }
    }
}

impl From<RawOptions> for EmitOptions {
    fn from(raw: RawOptions) -> Self {
        Self {
            language: raw.language,
            style: raw
                .style
                .filter(|style| style.language() == raw.language)
                .unwrap_or_else(|| ObjectStyle::default_for(raw.language)),
            access: raw.access,
            inheritable: raw.inheritable,
            serializer: raw.serializer,
            mutability: raw.mutability,
            indentation: raw.indentation.unwrap_or_default(),
            type_hints: raw.type_hints.unwrap_or(true),
        }
    }
}

macro_rules! from_string_via_token {
    ($($ty:ty),*) => {$(
        impl From<String> for $ty {
            fn from(token: String) -> Self {
                Self::from_token(&token)
            }
        }
    )*};
}

from_string_via_token!(
    Language,
    ObjectStyle,
    Accessibility,
    SerializerAttributes,
    Mutability,
    IndentChar
);

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::CSharp => "csharp",
            Language::Python => "python",
        })
    }
}

impl fmt::Display for ObjectStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectStyle::Record => "record",
            ObjectStyle::Class => "class",
            ObjectStyle::Struct => "struct",
            ObjectStyle::DataClass => "dataclass",
            ObjectStyle::PlainClass => "plain-class",
        })
    }
}

// ------------------------------- Tests ------------------------------------ //
