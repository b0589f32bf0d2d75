pub mod source_map;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;

use serde::Serialize;
use tracing::debug;

use crate::document::{LineSegment, Module, ModuleChild, SpanData};
use crate::span::SpanLocation;

use source_map::{Mapping, SourceMap};

/// Editor capability flags carried by a navigation mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingCapabilities {
    pub verification: bool,
    pub completion: bool,
    pub semantic: bool,
    pub navigation: bool,
}

/// The denser per-span mapping used by editor tooling, distinct from the
/// general-purpose encoded source map.
#[derive(Debug, Clone, Serialize)]
pub struct PositionMapping {
    pub source_offset: usize,
    pub generated_offset: usize,
    pub length: usize,
    pub generated_length: usize,
    pub capabilities: MappingCapabilities,
}

/// One emitted virtual file with its source map and navigation mappings.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub file_name: String,
    pub text: String,
    pub source_map: SourceMap,
    pub position_mappings: Vec<PositionMapping>,
}

/// Drain the module tree into generated files, breadth-first: each child
/// module discovered while emitting its parent joins the queue and is
/// compiled independently.
pub fn compile_modules(root: Module, source_name: &str, source_text: &str) -> Vec<GeneratedFile> {
    let mut queue = VecDeque::new();
    queue.push_back(root);
    let mut files = Vec::new();
    while let Some(module) = queue.pop_front() {
        files.push(emit_module(module, &mut queue, source_name, source_text));
    }
    debug!(files = files.len(), "emitted module tree");
    files
}

fn emit_module(
    module: Module,
    queue: &mut VecDeque<Module>,
    source_name: &str,
    source_text: &str,
) -> GeneratedFile {
    let mut emitter = Emitter::new(module.file_name.clone(), source_name, source_text);

    let import_lines = module.imports.render();
    if !import_lines.is_empty() {
        for line in &import_lines {
            emitter.append_text(line);
            emitter.append_newline();
        }
        emitter.append_newline();
    }

    for child in module.children {
        match child {
            ModuleChild::Segment(segment) => emitter.emit_segment(&segment),
            ModuleChild::Module(child) => {
                let path = runtime_import_path(&module.file_name, &child.module.file_name);
                let start = emitter.location();
                emitter.append_text(&format!(
                    "export * as {} from \"{path}\"",
                    child.exported_name
                ));
                emitter.record_span(&child.span_data, start);
                queue.push_back(child.module);
            }
        }
    }

    emitter.finish()
}

/// Path-relativize the child's output file against the parent's and swap
/// the declared extension for the runtime module extension.
fn runtime_import_path(parent_file: &str, child_file: &str) -> String {
    let parent_dir = match parent_file.rfind('/') {
        Some(index) => &parent_file[..index + 1],
        None => "",
    };
    let relative = child_file.strip_prefix(parent_dir).unwrap_or(child_file);
    let base = relative
        .strip_suffix(".d.ts")
        .or_else(|| relative.strip_suffix(".ts"))
        .unwrap_or(relative);
    format!("./{base}.js")
}

/// Position-tracking text sink. Appending advances a generated-side
/// cursor; pending indentation is applied once per line, at the first
/// text append after a line break.
struct Emitter {
    file_name: String,
    source_name: String,
    source_text: String,
    code: String,
    cursor: SpanLocation,
    indent: i32,
    at_line_start: bool,
    mappings: Vec<Mapping>,
    position_mappings: Vec<PositionMapping>,
}

impl Emitter {
    fn new(file_name: String, source_name: &str, source_text: &str) -> Self {
        Emitter {
            file_name,
            source_name: source_name.to_string(),
            source_text: source_text.to_string(),
            code: String::new(),
            cursor: SpanLocation::start(),
            indent: 0,
            at_line_start: true,
            mappings: Vec::new(),
            position_mappings: Vec::new(),
        }
    }

    fn emit_segment(&mut self, segment: &LineSegment) {
        match segment {
            LineSegment::TextSnippet { text, span_data } => match span_data {
                Some(span_data) => {
                    self.apply_pending_indent();
                    let start = self.location();
                    self.append_text(text);
                    self.record_span(span_data, start);
                }
                None => self.append_text(text),
            },
            LineSegment::Spanned {
                children,
                span_data,
            } => {
                self.apply_pending_indent();
                let start = self.location();
                for child in children {
                    self.emit_segment(child);
                }
                self.record_span(span_data, start);
            }
            LineSegment::NewLine => self.append_newline(),
            LineSegment::Indent(delta) => {
                self.indent = (self.indent + delta).max(0);
            }
        }
    }

    fn location(&self) -> SpanLocation {
        self.cursor
    }

    fn apply_pending_indent(&mut self) {
        if self.at_line_start && self.indent > 0 {
            let prefix = "  ".repeat(self.indent as usize);
            self.code.push_str(&prefix);
            self.cursor.position += prefix.len();
            self.cursor.column += prefix.len();
            self.at_line_start = false;
        }
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.apply_pending_indent();
        self.code.push_str(text);
        if text.contains('\n') {
            for ch in text.chars() {
                self.cursor.advance(ch);
            }
            self.at_line_start = text.ends_with('\n');
        } else {
            self.cursor.position += text.len();
            self.cursor.column += text.chars().count();
            self.at_line_start = false;
        }
    }

    fn append_newline(&mut self) {
        self.code.push('\n');
        self.cursor.advance('\n');
        self.at_line_start = true;
    }

    /// Record both edges of a span-tagged region: one source-map entry per
    /// edge and one navigation mapping for the whole region.
    fn record_span(&mut self, span_data: &SpanData, start: SpanLocation) {
        let end = self.cursor;
        self.mappings.push(Mapping {
            original: span_data.span.start,
            generated: start,
            name: span_data.name.clone(),
        });
        self.mappings.push(Mapping {
            original: span_data.span.end,
            generated: end,
            name: None,
        });
        let named = span_data.name.is_some();
        self.position_mappings.push(PositionMapping {
            source_offset: span_data.span.start.position,
            generated_offset: start.position,
            length: span_data.span.len(),
            generated_length: end.position - start.position,
            capabilities: MappingCapabilities {
                verification: true,
                completion: named,
                semantic: true,
                navigation: named,
            },
        });
    }

    fn finish(mut self) -> GeneratedFile {
        if !self.at_line_start {
            self.append_newline();
        }
        let comment = format!("//# sourceMappingURL={}.map", self.file_name);
        self.append_text(&comment);
        self.append_newline();

        GeneratedFile {
            source_map: SourceMap {
                file: self.file_name.clone(),
                source: self.source_name,
                source_content: self.source_text,
                mappings: self.mappings,
            },
            file_name: self.file_name,
            text: self.code,
            position_mappings: self.position_mappings,
        }
    }
}
