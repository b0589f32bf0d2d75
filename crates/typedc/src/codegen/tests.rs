use crate::codegen::statement_template;
use crate::document::{CompileOptions, ModuleMode, OutputExtension};
use crate::parser::ast::{
    BuiltinType, SpannedName, Statement, Type, TypeClassDeclaration,
};
use crate::snapshot::compile;
use crate::span::Span;
use crate::CompileError;

fn compile_root(source: &str) -> String {
    let options = CompileOptions {
        mode: ModuleMode::Single,
        extension: OutputExtension::Ts,
    };
    let files = compile("test.typed", source, &options).expect("compile");
    files[0].text.clone()
}

#[test]
fn alias_and_variable_emit_export_declarations() {
    let text = compile_root("type UserName = string\n\nconst empty: Maybe<never>");
    assert!(text.contains("export type UserName = string\n"));
    assert!(text.contains("export declare const empty: Maybe<never>\n"));
}

#[test]
fn function_without_return_type_defaults_to_void() {
    let text = compile_root("function log(message: string)");
    assert!(text.contains("export declare function log(message: string): void\n"));
}

#[test]
fn brand_emits_branded_alias_and_cast_constructor() {
    let text = compile_root("brand UserId = string");
    assert!(text.contains("import { Brand } from \"@typed-lang/typedlib\"\n"));
    assert!(text.contains("export type UserId = string & Brand<\"UserId\">\n"));
    assert!(text.contains("export const UserId = (value: string): UserId => value as UserId\n"));
}

#[test]
fn typeclass_rewrites_hkt_applications_through_kind() {
    let text = compile_root(
        "typeclass Functor<F<out A>> {\n  map: <A, B>(f: (a: A) => B) => (fa: F<A>) => F<B>\n}",
    );
    assert!(text.contains("import { HKT, Kind } from \"@typed-lang/typedlib\"\n"));
    assert!(text.contains("export interface Functor<F extends HKT> {\n"));
    assert!(text.contains(
        "  readonly map: <A, B>(f: (a: A) => B) => (fa: Kind<F, A>) => Kind<F, B>\n"
    ));
}

#[test]
fn instance_arguments_resolve_to_hkt_lambdas() {
    let text = compile_root("instance maybeFunctor: Functor<Maybe>");
    assert!(text.contains("export declare const maybeFunctor: Functor<MaybeHKT>\n"));
}

#[test]
fn instance_scalar_arguments_emit_verbatim() {
    let text = compile_root("instance stringOrd: Ord<string>");
    assert!(text.contains("export declare const stringOrd: Ord<string>\n"));
}

#[test]
fn container_types_emit_readonly_forms() {
    let text = compile_root(
        "type Inventory = { items: Array<string>, index: Map<string, number>, row: [string, ...Set<number>] }",
    );
    assert!(text.contains(
        "export type Inventory = { readonly items: ReadonlyArray<string>, readonly index: ReadonlyMap<string, number>, readonly row: readonly [string, ...ReadonlySet<number>] }\n"
    ));
}

#[test]
fn comments_re_emit_verbatim() {
    let text = compile_root("// generated from the user model\ntype Id = string");
    assert!(text.starts_with("// generated from the user model\n\nexport type Id = string\n"));
}

#[test]
fn source_imports_pass_through_the_import_manager() {
    let text = compile_root(
        "import { Email as EmailAddress } from \"user-lib\"\n\ntype Contact = EmailAddress",
    );
    assert!(text.starts_with("import { Email as EmailAddress } from \"user-lib\"\n"));
    assert!(text.contains("export type Contact = EmailAddress\n"));
}

#[test]
fn unsupported_class_parameter_is_a_generation_error() {
    let span = Span::empty();
    let statement = Statement::TypeClass(TypeClassDeclaration {
        name: SpannedName {
            name: "Bad".to_string(),
            span,
        },
        params: vec![Type::Builtin(BuiltinType {
            name: "string".to_string(),
            span,
        })],
        members: Vec::new(),
        span,
    });
    let err = statement_template(&statement).expect_err("generation error");
    assert!(matches!(err, CompileError::Generation { tag, .. } if tag == "TypeClassDeclaration"));
}
