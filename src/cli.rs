//! Minimal CLI: JSON sample → (C# | Python) declarations
use std::fs;
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tempfile::NamedTempFile;
use tracing::debug;

use json_decl::{
    Accessibility, EmitOptions, IndentChar, Indentation, Language, Mutability, ObjectStyle,
    SerializerAttributes,
};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer C# or Python type declarations from a sample JSON document
///
/// The source is taken from piped stdin, else --input, else the inline argument.
#[derive(Parser, Debug)]
#[command(name = "json-decl", version)]
pub struct CommandLineInterface {
    /// inline JSON source
    json: Option<String>,

    /// read the JSON source from a file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// name of the root type
    #[arg(short, long, default_value = "Root")]
    name: String,

    /// target language: csharp | python
    #[arg(short, long)]
    language: Option<String>,

    /// declaration style: record | class | struct (C#), dataclass | plain-class (Python)
    #[arg(short, long)]
    style: Option<String>,

    /// C# accessibility: public | internal | protected | private | protected-internal | private-protected
    #[arg(long)]
    access: Option<String>,

    /// C# serialization attributes: none | system-text-json | newtonsoft
    #[arg(long)]
    serializer: Option<String>,

    /// allow inheritance (omit `sealed`)
    #[arg(long)]
    inheritable: bool,

    /// settable members instead of init-only
    #[arg(long)]
    settable: bool,

    /// indent with tabs
    #[arg(long)]
    tabs: bool,

    /// indentation width (default 4 spaces, or 1 tab with --tabs)
    #[arg(long)]
    indent: Option<usize>,

    /// omit Python type hints (plain-class style)
    #[arg(long)]
    no_type_hints: bool,

    /// JSON file with emission options; flags override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// output file (stdout if omitted); the language's extension is added when missing
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no JSON input: pass it inline, with --input, or on stdin")]
    NoInput,

    #[error("invalid options file {}: {source}", path.display())]
    Options {
        path: PathBuf,
        source: serde_json::Error,
    },
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let options = self.emit_options()?;
        let source = self.read_source()?;
        let text = json_decl::parse_bytes(&self.name, &source, &options)?;
        self.write_output(&text, options.language)
    }

    /// Piped stdin (when non-blank) wins over --input, which wins over the
    /// inline argument.
    fn read_source(&self) -> anyhow::Result<Vec<u8>> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            let mut piped = Vec::new();
            stdin.lock().read_to_end(&mut piped).context("failed to read stdin")?;
            if !piped.iter().all(u8::is_ascii_whitespace) {
                debug!(bytes = piped.len(), "source: stdin");
                return Ok(piped);
            }
        }
        if let Some(path) = &self.input {
            debug!(path = %path.display(), "source: file");
            return fs::read(path).with_context(|| format!("failed to read {}", path.display()));
        }
        if let Some(json) = &self.json {
            debug!("source: inline");
            return Ok(json.clone().into_bytes());
        }
        Err(CliError::NoInput.into())
    }

    fn emit_options(&self) -> anyhow::Result<EmitOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let raw =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_slice(&json_decl::relaxed::relax(&raw))
                    .map_err(|source| CliError::Options { path: path.clone(), source })?
            }
            None => EmitOptions::default(),
        };

        if let Some(language) = &self.language {
            options.language = Language::from_token(language);
            if options.style.language() != options.language {
                options.style = ObjectStyle::default_for(options.language);
            }
        }
        if let Some(style) = &self.style {
            options.style = ObjectStyle::from_token_for(style, options.language);
        }
        if let Some(access) = &self.access {
            options.access = Accessibility::from_token(access);
        }
        if let Some(serializer) = &self.serializer {
            options.serializer = SerializerAttributes::from_token(serializer);
        }
        if self.inheritable {
            options.inheritable = true;
        }
        if self.settable {
            options.mutability = Mutability::Settable;
        }
        if self.tabs {
            let width = self.indent.unwrap_or(IndentChar::Tab.default_width());
            options.indentation = Indentation::tabs(width);
        } else if let Some(width) = self.indent {
            options.indentation = Indentation::spaces(width);
        }
        if self.no_type_hints {
            options.type_hints = false;
        }
        Ok(options)
    }

    fn write_output(&self, text: &str, language: Language) -> anyhow::Result<()> {
        let Some(out) = self.out.as_ref() else {
            print!("{text}");
            return Ok(());
        };
        let path = with_language_extension(out, language);
        write_atomically(&path, text)?;
        debug!(path = %path.display(), "wrote declarations");
        Ok(())
    }
}

/// Process exit status for a failed run.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    if let Some(error) = error.downcast_ref::<json_decl::Error>() {
        return u8::try_from(error.exit_code()).unwrap_or(70);
    }
    match error.downcast_ref::<CliError>() {
        Some(CliError::NoInput) => return 66,
        Some(CliError::Options { .. }) => return 65,
        None => {}
    }
    if error.downcast_ref::<std::io::Error>().is_some() {
        return 74;
    }
    70
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn with_language_extension(path: &Path, language: Language) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(language.file_extension())
    }
}

/// Write through a temp file in the target directory, then rename over the
/// target: a failure never leaves a partial file behind.
fn write_atomically(path: &Path, text: &str) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    let mut file = NamedTempFile::new_in(parent)
        .with_context(|| format!("cannot write to {}", parent.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> CommandLineInterface {
        let argv = std::iter::once("json-decl").chain(args.iter().copied());
        CommandLineInterface::try_parse_from(argv)
            .unwrap()
    }

    #[test]
    fn flags_build_options() {
        let options = cli(&["-l", "py", "--style", "plain", "--no-type-hints", "--tabs"])
            .emit_options()
            .unwrap();
        assert_eq!(options.language, Language::Python);
        assert_eq!(options.style, ObjectStyle::PlainClass);
        assert!(!options.type_hints);
        assert_eq!(options.indentation.unit(), "\t");
    }

    #[test]
    fn unknown_tokens_fall_back_to_defaults() {
        let options = cli(&["--access", "friend", "--style", "enum", "--serializer", "xml"])
            .emit_options()
            .unwrap();
        assert_eq!(options, EmitOptions::default());
    }

    #[test]
    fn switching_language_resets_a_foreign_style() {
        let options = cli(&["--language", "python"]).emit_options().unwrap();
        assert_eq!(options.style, ObjectStyle::DataClass);
    }

    #[test]
    fn options_file_is_overridden_by_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opts.json");
        fs::write(&path, r#"{"style": "class", "serializer": "none", /* c */ "inheritable": true,}"#).unwrap();
        let options =
            cli(&["--options", path.to_str().unwrap(), "--settable"]).emit_options().unwrap();
        assert_eq!(options.style, ObjectStyle::Class);
        assert_eq!(options.serializer, SerializerAttributes::None);
        assert!(options.inheritable);
        assert_eq!(options.mutability, Mutability::Settable);
    }

    #[test]
    fn malformed_options_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("opts.json");
        fs::write(&path, "{").unwrap();
        let err = cli(&["--options", path.to_str().unwrap()]).emit_options().unwrap_err();
        assert_eq!(exit_code(&err), 65);
    }

    #[test]
    fn output_gets_language_extension_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/Root");
        let path = with_language_extension(&target, Language::CSharp);
        write_atomically(&path, "text\n").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("nested/deeper/Root.cs")).unwrap(), "text\n");
        assert_eq!(
            with_language_extension(Path::new("x.txt"), Language::Python),
            PathBuf::from("x.txt")
        );
    }

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(exit_code(&CliError::NoInput.into()), 66);
        assert_eq!(exit_code(&json_decl::Error::EmptyRootArray.into()), 65);
        let io: anyhow::Error =
            anyhow::Error::new(std::io::Error::other("disk")).context("failed to write x");
        assert_eq!(exit_code(&io), 74);
        assert_eq!(exit_code(&anyhow::anyhow!("???")), 70);
    }
}
