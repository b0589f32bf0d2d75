use crate::document::{LineSegment, Module, ModuleChild, SpanData};
use crate::span::{Span, SpanLocation};

use super::{compile_modules, runtime_import_path};

fn module_with(segments: Vec<LineSegment>) -> Module {
    let mut module = Module::new("test.typed.ts".to_string());
    module
        .children
        .extend(segments.into_iter().map(ModuleChild::Segment));
    module
}

fn text(value: &str) -> LineSegment {
    LineSegment::TextSnippet {
        text: value.to_string(),
        span_data: None,
    }
}

fn source_span(start_col: usize, end_col: usize) -> Span {
    Span {
        start: SpanLocation {
            position: start_col,
            line: 1,
            column: start_col,
        },
        end: SpanLocation {
            position: end_col,
            line: 1,
            column: end_col,
        },
    }
}

#[test]
fn indentation_is_applied_once_at_each_line_start() {
    let module = module_with(vec![
        text("block {"),
        LineSegment::Indent(1),
        LineSegment::NewLine,
        text("inner"),
        text(" more"),
        LineSegment::Indent(-1),
        LineSegment::NewLine,
        text("}"),
    ]);
    let files = compile_modules(module, "test.typed", "");
    assert_eq!(
        files[0].text,
        "block {\n  inner more\n}\n//# sourceMappingURL=test.typed.ts.map\n"
    );
}

#[test]
fn blank_lines_carry_no_indentation() {
    let module = module_with(vec![
        LineSegment::Indent(1),
        text("a"),
        LineSegment::NewLine,
        LineSegment::NewLine,
        text("b"),
        LineSegment::Indent(-1),
    ]);
    let files = compile_modules(module, "test.typed", "");
    assert!(files[0].text.starts_with("  a\n\n  b\n"));
}

#[test]
fn spanned_regions_record_both_edges_and_a_position_mapping() {
    let module = module_with(vec![LineSegment::Spanned {
        children: vec![text("Maybe")],
        span_data: SpanData {
            span: source_span(5, 10),
            name: Some("Maybe".to_string()),
            content: None,
        },
    }]);
    let files = compile_modules(module, "test.typed", "data Maybe");
    let map = &files[0].source_map;
    assert_eq!(map.mappings.len(), 2);
    assert_eq!(map.mappings[0].original.column, 5);
    assert_eq!(map.mappings[0].generated.column, 0);
    assert_eq!(map.mappings[0].name.as_deref(), Some("Maybe"));
    assert_eq!(map.mappings[1].original.column, 10);
    assert_eq!(map.mappings[1].generated.column, 5);
    assert!(map.mappings[1].name.is_none());

    let mapping = &files[0].position_mappings[0];
    assert_eq!(mapping.source_offset, 5);
    assert_eq!(mapping.generated_offset, 0);
    assert_eq!(mapping.length, 5);
    assert_eq!(mapping.generated_length, 5);
    assert!(mapping.capabilities.navigation);
    assert!(mapping.capabilities.completion);
    assert!(mapping.capabilities.verification);
    assert!(mapping.capabilities.semantic);
}

#[test]
fn unnamed_spans_only_carry_verification_and_semantic_capabilities() {
    let module = module_with(vec![LineSegment::Spanned {
        children: vec![text("export type X = Y")],
        span_data: SpanData {
            span: source_span(0, 10),
            name: None,
            content: None,
        },
    }]);
    let files = compile_modules(module, "test.typed", "");
    let mapping = &files[0].position_mappings[0];
    assert!(!mapping.capabilities.navigation);
    assert!(!mapping.capabilities.completion);
    assert!(mapping.capabilities.verification);
    assert!(mapping.capabilities.semantic);
}

#[test]
fn span_start_lands_after_pending_indentation() {
    let module = module_with(vec![
        LineSegment::Indent(1),
        LineSegment::NewLine,
        LineSegment::Spanned {
            children: vec![text("inner")],
            span_data: SpanData {
                span: source_span(0, 5),
                name: None,
                content: None,
            },
        },
        LineSegment::Indent(-1),
    ]);
    let files = compile_modules(module, "test.typed", "");
    assert_eq!(files[0].source_map.mappings[0].generated.line, 2);
    assert_eq!(files[0].source_map.mappings[0].generated.column, 2);
}

#[test]
fn every_file_ends_with_its_own_source_mapping_comment() {
    let module = module_with(vec![text("const a = 1")]);
    let files = compile_modules(module, "test.typed", "");
    assert!(files[0]
        .text
        .ends_with("const a = 1\n//# sourceMappingURL=test.typed.ts.map\n"));
}

#[test]
fn runtime_import_paths_swap_extensions_and_relativize() {
    assert_eq!(
        runtime_import_path("x.typed.ts", "x.typed.Maybe.ts"),
        "./x.typed.Maybe.js"
    );
    assert_eq!(
        runtime_import_path("x.typed.d.ts", "x.typed.Maybe.d.ts"),
        "./x.typed.Maybe.js"
    );
    assert_eq!(
        runtime_import_path("gen/out/x.typed.ts", "gen/out/x.typed.Maybe.ts"),
        "./x.typed.Maybe.js"
    );
}
