pub mod codegen;
pub mod config;
pub mod document;
pub mod emitter;
pub mod lexer;
pub mod parser;
pub mod snapshot;
pub mod span;
pub mod syntax;

use std::fs;
use std::path::{Path, PathBuf};

pub use document::{CompileOptions, ModuleMode, OutputExtension};
pub use emitter::source_map::{GeneratedPosition, OriginalPosition, SourceMap};
pub use emitter::{GeneratedFile, MappingCapabilities, PositionMapping};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::parse;
pub use snapshot::{compile, CompilerSession, GeneratedOccurrence, Snapshot};
pub use span::{Span, SpanLocation};

/// Fatal pipeline errors. None of these are recovered from within a single
/// compile call; the caller decides whether to skip the file or abort.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("unexpected character '{character}' at {line}:{column}")]
    Lex {
        character: char,
        line: usize,
        column: usize,
    },
    #[error("expected {expected}, found {found} at {line}:{column}")]
    Parse {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },
    #[error("cannot generate code for {tag} at {line}:{column}")]
    Generation {
        tag: String,
        line: usize,
        column: usize,
    },
}

/// Driver-level errors wrapping compile failures with their file path.
#[derive(Debug, thiserror::Error)]
pub enum TypedcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("{path}: {error}")]
    Compile { path: String, error: CompileError },
    #[error("invalid config {path}: {message}")]
    Config { path: String, message: String },
    /// One or more files failed; the failures were already reported.
    #[error("compilation failed")]
    Failed,
}

/// Expand a CLI target into `.typed` source files: a file itself, a
/// directory's immediate files, or `dir/...` for a recursive walk.
pub fn expand_target(target: &str) -> Result<Vec<PathBuf>, TypedcError> {
    let (base, recursive) = match target.strip_suffix("/...") {
        Some(base) => (if base.is_empty() { "." } else { base }, true),
        None => (target, false),
    };

    let path = Path::new(base);
    if !path.exists() {
        return Err(TypedcError::InvalidPath(target.to_string()));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut paths = Vec::new();
    if path.is_dir() {
        if recursive {
            collect_typed_files(path, &mut paths)?;
        } else {
            for entry in fs::read_dir(path)? {
                let entry = entry?;
                let entry_path = entry.path();
                if entry_path.is_file() && is_typed_file(&entry_path) {
                    paths.push(entry_path);
                }
            }
        }
    }

    paths.sort();
    if paths.is_empty() {
        return Err(TypedcError::InvalidPath(target.to_string()));
    }
    Ok(paths)
}

fn collect_typed_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), TypedcError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path.is_dir() {
            collect_typed_files(&entry_path, paths)?;
            continue;
        }
        if is_typed_file(&entry_path) {
            paths.push(entry_path);
        }
    }
    Ok(())
}

fn is_typed_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("typed")
}

/// Compile one file from disk, pairing the compile error with its path.
pub fn compile_file(
    path: &Path,
    options: &CompileOptions,
) -> Result<Vec<GeneratedFile>, TypedcError> {
    let source = fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| TypedcError::InvalidPath(path.display().to_string()))?;
    compile(file_name, &source, options).map_err(|error| TypedcError::Compile {
        path: path.display().to_string(),
        error,
    })
}
