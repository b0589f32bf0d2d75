use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::document::{generate_module, CompileOptions};
use crate::emitter::{compile_modules, GeneratedFile};
use crate::parser::parse;
use crate::emitter::source_map::OriginalPosition;
use crate::CompileError;

/// A generated occurrence of an original position, qualified by the virtual
/// file it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedOccurrence {
    pub file_name: String,
    pub line: usize,
    pub column: usize,
}

/// Cached compiled output for one source file. The first generated file is
/// the root module; the rest are split sub-modules. Versioned by content
/// change only.
#[derive(Debug, Clone)]
pub struct Snapshot {
    file_name: String,
    source_text: String,
    version: u32,
    files: Vec<GeneratedFile>,
}

impl Snapshot {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Full generated code for the root module.
    pub fn text(&self) -> &str {
        &self.files[0].text
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    /// Every generated virtual file name, split sub-modules included.
    pub fn script_file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.file_name.as_str())
    }

    /// Reverse lookup through the root module's map.
    pub fn original_position(&self, line: usize, column: usize) -> Option<OriginalPosition> {
        self.files[0].source_map.original_position(line, column)
    }

    /// Forward lookup across every generated file: one original position may
    /// fan out to several generated occurrences.
    pub fn generated_positions(&self, line: usize, column: usize) -> Vec<GeneratedOccurrence> {
        let mut out = Vec::new();
        for file in &self.files {
            for position in file.source_map.generated_positions(line, column) {
                out.push(GeneratedOccurrence {
                    file_name: file.file_name.clone(),
                    line: position.line,
                    column: position.column,
                });
            }
        }
        out
    }
}

/// Run the whole pipeline once, outside any session cache.
pub fn compile(
    file_name: &str,
    source: &str,
    options: &CompileOptions,
) -> Result<Vec<GeneratedFile>, CompileError> {
    let source_file = parse(file_name, source)?;
    debug!(
        file = %file_name,
        statements = source_file.statements.len(),
        "parsed source file"
    );
    let module = generate_module(&source_file, options)?;
    Ok(compile_modules(module, file_name, source))
}

/// Owns the per-filename snapshot cache. Compiling byte-identical source is
/// a no-op returning the existing snapshot, version included; any change
/// replaces the output and bumps the version.
#[derive(Debug, Default)]
pub struct CompilerSession {
    options: CompileOptions,
    snapshots: HashMap<String, Snapshot>,
}

impl CompilerSession {
    pub fn new(options: CompileOptions) -> Self {
        CompilerSession {
            options,
            snapshots: HashMap::new(),
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn compile(&mut self, file_name: &str, source: &str) -> Result<&Snapshot, CompileError> {
        if let Some(existing) = self.snapshots.get(file_name) {
            if existing.source_text == source {
                debug!(file = %file_name, version = existing.version, "snapshot unchanged");
                return Ok(&self.snapshots[file_name]);
            }
        }

        let files = compile(file_name, source, &self.options)?;
        let version = self
            .snapshots
            .get(file_name)
            .map(|snapshot| snapshot.version + 1)
            .unwrap_or(1);
        debug!(file = %file_name, version, "compiled snapshot");
        self.snapshots.insert(
            file_name.to_string(),
            Snapshot {
                file_name: file_name.to_string(),
                source_text: source.to_string(),
                version,
                files,
            },
        );
        Ok(&self.snapshots[file_name])
    }

    pub fn snapshot(&self, file_name: &str) -> Option<&Snapshot> {
        self.snapshots.get(file_name)
    }
}
