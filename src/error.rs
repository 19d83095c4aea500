//! Error taxonomy shared by the inference engine, the emitters and the CLI.
use thiserror::Error;

use crate::options::{Language, ObjectStyle};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The source violates JSON (or the tolerated comment/trailing-comma superset).
    /// Kept as the parser reported it: category, line and column survive.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a streaming source failed.
    #[error("failed to read JSON source: {0}")]
    Io(#[from] std::io::Error),

    /// A number literal fits no canonical numeric type, not even decimal.
    #[error("unsupported number literal `{literal}`")]
    UnsupportedNumber { literal: String },

    /// An emitter needed a primitive spelling the alias table does not have.
    #[error("no {language} alias for canonical type {ty}")]
    MissingAlias { ty: String, language: Language },

    /// No emitter is registered for this language/style pair.
    #[error("target not implemented: {language} {style}")]
    TargetNotImplemented { language: Language, style: ObjectStyle },

    /// A public entry point received a structurally invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("root array is empty; nothing to infer a type from")]
    EmptyRootArray,

    /// Objects sharing one slot disagree on their key sets.
    #[error("incompatible object shapes at {path}: expected keys [{}], found [{}]", expected.join(", "), found.join(", "))]
    IncompatibleShapes {
        path: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("unsupported root: expected an object or an array of objects, found {found}")]
    UnsupportedRoot { found: &'static str },
}

impl Error {
    /// Process exit status for the CLI, one per error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Json(_)
            | Error::UnsupportedNumber { .. }
            | Error::EmptyRootArray
            | Error::IncompatibleShapes { .. }
            | Error::UnsupportedRoot { .. } => 65,
            Error::Io(_) => 74,
            Error::MissingAlias { .. }
            | Error::TargetNotImplemented { .. }
            | Error::InvalidArgument(_) => 70,
        }
    }

    /// True for errors caused by the document itself rather than by a defect.
    pub fn is_input_error(&self) -> bool {
        self.exit_code() == 65
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_keep_position() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }")
            .unwrap_err()
            .into();
        let Error::Json(inner) = &err else { panic!("expected Json variant") };
        assert_eq!(inner.line(), 2);
        assert!(inner.is_syntax());
        assert!(err.is_input_error());
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn defect_errors_map_to_internal_status() {
        let err = Error::TargetNotImplemented {
            language: Language::Python,
            style: ObjectStyle::Record,
        };
        assert_eq!(err.exit_code(), 70);
        assert_eq!(err.to_string(), "target not implemented: python record");
    }

    #[test]
    fn incompatible_shapes_lists_both_key_sets() {
        let err = Error::IncompatibleShapes {
            path: "$[1]".into(),
            expected: vec!["id".into()],
            found: vec!["id".into(), "name".into()],
        };
        assert_eq!(
            err.to_string(),
            "incompatible object shapes at $[1]: expected keys [id], found [id, name]"
        );
    }
}
