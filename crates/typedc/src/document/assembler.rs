use crate::codegen::interpolation::Interpolation;

use super::{ImportManager, LineSegment, Module, ModuleChild, SpanData};

/// Walk an interpolation tree and append the resulting segments to the
/// module, resolving import declarations and references against the
/// module's own import table and materializing indent scopes into
/// `Indent(+1)` / `Indent(-1)` pairs.
pub fn run_interpolation(tree: &Interpolation, module: &mut Module) {
    let mut segments = Vec::new();
    collect(tree, &mut module.imports, &mut segments);
    module
        .children
        .extend(segments.into_iter().map(ModuleChild::Segment));
}

fn collect(tree: &Interpolation, imports: &mut ImportManager, out: &mut Vec<LineSegment>) {
    match tree {
        Interpolation::Text(text) => out.push(LineSegment::TextSnippet {
            text: text.clone(),
            span_data: None,
        }),
        Interpolation::Template(items) => {
            for item in items {
                collect(item, imports, out);
            }
        }
        Interpolation::WithSpan {
            span,
            name,
            content,
            children,
        } => {
            let mut inner = Vec::new();
            for child in children {
                collect(child, imports, &mut inner);
            }
            out.push(LineSegment::Spanned {
                children: inner,
                span_data: SpanData {
                    span: *span,
                    name: name.clone(),
                    content: content.clone(),
                },
            });
        }
        Interpolation::WithIndent(children) => {
            out.push(LineSegment::Indent(1));
            for child in children {
                collect(child, imports, out);
            }
            out.push(LineSegment::Indent(-1));
        }
        Interpolation::NewLine(count) => {
            for _ in 0..*count {
                out.push(LineSegment::NewLine);
            }
        }
        Interpolation::DeclareImport(request) => imports.declare(request),
        Interpolation::Import { specifier, name } => {
            let local = imports.reference(specifier, name);
            out.push(LineSegment::TextSnippet {
                text: local,
                span_data: None,
            });
        }
    }
}
