pub mod imports;

mod assembler;


use tracing::trace;

use crate::codegen::interpolation::{indent, named_span, new_line, seq, text};
use crate::codegen::{data_template, statement_template};
use crate::parser::ast::{SourceFile, Statement};
use crate::span::Span;
use crate::CompileError;

pub use assembler::run_interpolation;
pub use imports::ImportManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleMode {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputExtension {
    Ts,
    Dts,
}

impl OutputExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputExtension::Ts => ".ts",
            OutputExtension::Dts => ".d.ts",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub mode: ModuleMode,
    pub extension: OutputExtension,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            mode: ModuleMode::Multiple,
            extension: OutputExtension::Ts,
        }
    }
}

/// The piece of information later materialized into a source-map mapping.
#[derive(Debug, Clone)]
pub struct SpanData {
    pub span: Span,
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug)]
pub enum LineSegment {
    TextSnippet {
        text: String,
        span_data: Option<SpanData>,
    },
    Spanned {
        children: Vec<LineSegment>,
        span_data: SpanData,
    },
    NewLine,
    Indent(i32),
}

/// One unit of generated output: a virtual file with its own import table
/// and ordered content tree.
#[derive(Debug)]
pub struct Module {
    pub file_name: String,
    pub imports: ImportManager,
    pub children: Vec<ModuleChild>,
}

impl Module {
    pub fn new(file_name: String) -> Self {
        Module {
            file_name,
            imports: ImportManager::default(),
            children: Vec::new(),
        }
    }

    fn push_segment(&mut self, segment: LineSegment) {
        self.children.push(ModuleChild::Segment(segment));
    }
}

#[derive(Debug)]
pub enum ModuleChild {
    Segment(LineSegment),
    Module(ChildModule),
}

/// A nested module re-exported from its parent.
#[derive(Debug)]
pub struct ChildModule {
    pub exported_name: String,
    pub span_data: SpanData,
    pub module: Module,
}

/// Assemble the module/segment tree for one source file. In multiple-module
/// mode every data declaration becomes its own child module with its own
/// import table; in single-module mode it is inlined as an exported
/// namespace instead.
pub fn generate_module(
    source_file: &SourceFile,
    options: &CompileOptions,
) -> Result<Module, CompileError> {
    let extension = options.extension.as_str();
    let mut root = Module::new(format!("{}{}", source_file.file_name, extension));
    let mut emitted_any = false;

    for statement in &source_file.statements {
        trace!(tag = statement.tag(), "assembling statement");
        if let Statement::Import(_) = statement {
            // Imports re-declare through the import manager and own no
            // visible output, so they take no part in line separation.
            run_interpolation(&statement_template(statement)?, &mut root);
            continue;
        }

        if emitted_any {
            root.push_segment(LineSegment::NewLine);
            root.push_segment(LineSegment::NewLine);
        }
        emitted_any = true;

        match statement {
            Statement::Data(decl) if options.mode == ModuleMode::Multiple => {
                let file_name = format!(
                    "{}.{}{}",
                    source_file.file_name, decl.name.name, extension
                );
                let mut child = Module::new(file_name.clone());
                run_interpolation(&data_template(decl)?, &mut child);
                root.children.push(ModuleChild::Module(ChildModule {
                    exported_name: decl.name.name.clone(),
                    span_data: SpanData {
                        span: decl.name.span,
                        name: Some(decl.name.name.clone()),
                        content: Some(file_name),
                    },
                    module: child,
                }));
            }
            Statement::Data(decl) => {
                let body = data_template(decl)?;
                let namespace = seq(vec![
                    text("export namespace "),
                    named_span(
                        decl.name.span,
                        decl.name.name.clone(),
                        vec![text(decl.name.name.clone())],
                    ),
                    text(" {"),
                    indent(vec![new_line(1), body]),
                    new_line(1),
                    text("}"),
                ]);
                run_interpolation(&namespace, &mut root);
            }
            other => {
                run_interpolation(&statement_template(other)?, &mut root);
            }
        }
    }

    if emitted_any {
        root.push_segment(LineSegment::NewLine);
    }

    Ok(root)
}
