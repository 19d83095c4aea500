//! Static primitive spellings per target language.
//!
//! Built once on first use and never written afterwards. Array types have no
//! entry: emitters spell them through their collection template.
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::inference::CanonicalType;
use crate::options::Language;

type AliasTable = IndexMap<CanonicalType, &'static str>;

static CSHARP: Lazy<AliasTable> = Lazy::new(|| {
    IndexMap::from([
        (CanonicalType::Bool, "bool"),
        (CanonicalType::String, "string"),
        (CanonicalType::Guid, "Guid"),
        (CanonicalType::DateTime, "DateTime"),
        (CanonicalType::DateTimeOffset, "DateTimeOffset"),
        (CanonicalType::TimeSpan, "TimeSpan"),
        (CanonicalType::Int32, "int"),
        (CanonicalType::UInt32, "uint"),
        (CanonicalType::Int64, "long"),
        (CanonicalType::UInt64, "ulong"),
        (CanonicalType::Float32, "float"),
        (CanonicalType::Float64, "double"),
        (CanonicalType::Decimal, "decimal"),
        (CanonicalType::Object, "object"),
    ])
});

static PYTHON: Lazy<AliasTable> = Lazy::new(|| {
    IndexMap::from([
        (CanonicalType::Bool, "bool"),
        (CanonicalType::String, "str"),
        (CanonicalType::Guid, "UUID"),
        (CanonicalType::DateTime, "datetime"),
        (CanonicalType::DateTimeOffset, "datetime"),
        (CanonicalType::TimeSpan, "timedelta"),
        (CanonicalType::Int32, "int"),
        (CanonicalType::UInt32, "int"),
        (CanonicalType::Int64, "int"),
        (CanonicalType::UInt64, "int"),
        (CanonicalType::Float32, "float"),
        (CanonicalType::Float64, "float"),
        (CanonicalType::Decimal, "Decimal"),
        (CanonicalType::Object, "Any"),
    ])
});

fn table(language: Language) -> &'static AliasTable {
    match language {
        Language::CSharp => &*CSHARP,
        Language::Python => &*PYTHON,
    }
}

/// Spelling of `ty` in `language`, if the table has one.
pub fn lookup(ty: &CanonicalType, language: Language) -> Option<&'static str> {
    table(language).get(ty).copied()
}

/// Type names the rendered output already uses for library types in
/// `language`. Generated declarations must not take them.
pub fn reserved_names(language: Language) -> &'static [&'static str] {
    match language {
        Language::CSharp => {
            &["Guid", "DateTime", "DateTimeOffset", "TimeSpan", "System", "Newtonsoft"]
        }
        Language::Python => &[
            "Any", "List", "Optional", "UUID", "Decimal", "dataclass", "datetime", "timedelta",
        ],
    }
}

/// Like [`lookup`], for callers with no fallback: a miss is a defect in the
/// table and becomes [`Error::MissingAlias`].
pub fn require(ty: &CanonicalType, language: Language) -> Result<&'static str> {
    lookup(ty, language).ok_or_else(|| Error::MissingAlias { ty: ty.to_string(), language })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalars() -> Vec<CanonicalType> {
        vec![
            CanonicalType::Bool,
            CanonicalType::String,
            CanonicalType::Guid,
            CanonicalType::DateTime,
            CanonicalType::DateTimeOffset,
            CanonicalType::TimeSpan,
            CanonicalType::Int32,
            CanonicalType::UInt32,
            CanonicalType::Int64,
            CanonicalType::UInt64,
            CanonicalType::Float32,
            CanonicalType::Float64,
            CanonicalType::Decimal,
            CanonicalType::Object,
        ]
    }

    #[test]
    fn every_scalar_has_a_spelling_in_every_language() {
        for language in [Language::CSharp, Language::Python] {
            for ty in scalars() {
                assert!(!ty.is_array());
                assert!(lookup(&ty, language).is_some(), "{ty} in {language}");
            }
        }
    }

    #[test]
    fn spellings() {
        assert_eq!(lookup(&CanonicalType::Int32, Language::CSharp), Some("int"));
        assert_eq!(lookup(&CanonicalType::UInt64, Language::CSharp), Some("ulong"));
        assert_eq!(lookup(&CanonicalType::Guid, Language::Python), Some("UUID"));
        assert_eq!(require(&CanonicalType::Object, Language::CSharp).unwrap(), "object");
        assert_eq!(require(&CanonicalType::Object, Language::Python).unwrap(), "Any");
    }

    #[test]
    fn library_spellings_are_reserved() {
        for language in [Language::CSharp, Language::Python] {
            let reserved = reserved_names(language);
            for ty in scalars() {
                let spelling = lookup(&ty, language).unwrap();
                let is_type_name = spelling.starts_with(|c: char| c.is_ascii_uppercase());
                assert!(!is_type_name || reserved.contains(&spelling), "{spelling} in {language}");
            }
        }
    }

    #[test]
    fn arrays_are_not_in_the_table() {
        let ty = CanonicalType::ArrayOf(Box::new(CanonicalType::Int32));
        assert_eq!(lookup(&ty, Language::CSharp), None);
        let err = require(&CanonicalType::HeterogeneousArray, Language::Python).unwrap_err();
        assert_eq!(err.to_string(), "no python alias for canonical type HeterogeneousArray");
    }
}
