use std::fs;

use typedc::{
    compile, expand_target, CompileOptions, CompilerSession, ModuleMode, OutputExtension,
    TypedcError,
};

const MAYBE: &str = "data Maybe<A> = Nothing | Just(value: A)";

const MAYBE_MODULE: &str = r#"import { hasProperty, HKT } from "@typed-lang/typedlib"

export type Maybe<A> = Nothing | Just<A>

export interface Nothing {
  readonly _tag: "Nothing"
}

export interface Just<A> {
  readonly _tag: "Just"
  readonly value: A
}

export const Nothing: Nothing = { _tag: "Nothing" }

export const Just = <A>(value: A): Just<A> => ({ _tag: "Just", value })

export const isNothing = <A>(maybe: Maybe<A>): maybe is Nothing => maybe._tag === "Nothing"

export const isJust = <A>(maybe: Maybe<A>): maybe is Just<A> => maybe._tag === "Just"

export const isMaybe = (u: unknown): u is Maybe<unknown> => hasProperty(u, "_tag") && (u._tag === "Nothing" || u._tag === "Just")

export const match = <A, Return>(maybe: Maybe<A>, matchers: { readonly Nothing: () => Return, readonly Just: (value: Just<A>) => Return }): Return => {
  switch (maybe._tag) {
    case "Nothing": return matchers.Nothing()
    case "Just": return matchers.Just(maybe)
  }
}

export interface MaybeHKT extends HKT {
  readonly type: Maybe<this["A"]>
}
//# sourceMappingURL=maybe.typed.Maybe.ts.map
"#;

fn multiple() -> CompileOptions {
    CompileOptions {
        mode: ModuleMode::Multiple,
        extension: OutputExtension::Ts,
    }
}

#[test]
fn maybe_emits_the_full_declaration_block_in_order() {
    let files = compile("maybe.typed", MAYBE, &multiple()).expect("compile");
    assert_eq!(files.len(), 2);
    assert_eq!(files[1].file_name, "maybe.typed.Maybe.ts");
    assert_eq!(files[1].text, MAYBE_MODULE);
}

#[test]
fn the_root_module_is_exactly_a_re_export() {
    let files = compile("maybe.typed", MAYBE, &multiple()).expect("compile");
    assert_eq!(
        files[0].text,
        "export * as Maybe from \"./maybe.typed.Maybe.js\"\n//# sourceMappingURL=maybe.typed.ts.map\n"
    );
}

#[test]
fn repeated_compiles_are_byte_identical() {
    let first = compile("maybe.typed", MAYBE, &multiple()).expect("compile");
    let second = compile("maybe.typed", MAYBE, &multiple()).expect("compile");
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.text, b.text);
        assert_eq!(a.source_map.encode(), b.source_map.encode());
    }
}

#[test]
fn typedlib_imports_deduplicate_per_module() {
    let files = compile("maybe.typed", MAYBE, &multiple()).expect("compile");
    let imports = files[1]
        .text
        .lines()
        .filter(|line| line.starts_with("import "))
        .count();
    assert_eq!(imports, 1);
}

#[test]
fn lex_and_parse_failures_produce_no_output() {
    assert!(compile("bad.typed", "data X = #", &multiple()).is_err());
    assert!(compile("bad.typed", "data Maybe<A> =", &multiple()).is_err());

    let mut session = CompilerSession::new(multiple());
    assert!(session.compile("bad.typed", "data Maybe<A> =").is_err());
    assert!(session.snapshot("bad.typed").is_none());
}

#[test]
fn single_module_mode_wraps_declarations_in_a_namespace() {
    let options = CompileOptions {
        mode: ModuleMode::Single,
        extension: OutputExtension::Ts,
    };
    let files = compile("maybe.typed", MAYBE, &options).expect("compile");
    assert_eq!(files.len(), 1);
    let text = &files[0].text;
    assert!(text.contains("export namespace Maybe {\n"));
    assert!(text.contains("\n  export type Maybe<A> = Nothing | Just<A>\n"));
    assert!(text.contains("\n  export const Just = <A>(value: A): Just<A> => ({ _tag: \"Just\", value })\n"));
    assert!(text.ends_with("}\n//# sourceMappingURL=maybe.typed.ts.map\n"));
}

#[test]
fn declaration_extension_flows_through_the_file_names() {
    let options = CompileOptions {
        mode: ModuleMode::Multiple,
        extension: OutputExtension::Dts,
    };
    let files = compile("maybe.typed", MAYBE, &options).expect("compile");
    assert_eq!(files[0].file_name, "maybe.typed.d.ts");
    assert_eq!(files[1].file_name, "maybe.typed.Maybe.d.ts");
    assert!(files[0]
        .text
        .contains("export * as Maybe from \"./maybe.typed.Maybe.js\""));
    assert!(files[0]
        .text
        .contains("//# sourceMappingURL=maybe.typed.d.ts.map"));
}

#[test]
fn targets_expand_to_typed_files_and_compile_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("maybe.typed");
    fs::write(&path, MAYBE).expect("write source");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write other");

    let expanded = expand_target(dir.path().to_str().expect("utf8 path")).expect("expand");
    assert_eq!(expanded, vec![path.clone()]);

    let files = typedc::compile_file(&path, &multiple()).expect("compile file");
    assert_eq!(files[0].file_name, "maybe.typed.ts");

    let missing = expand_target(dir.path().join("absent").to_str().expect("utf8"));
    assert!(matches!(missing, Err(TypedcError::InvalidPath(_))));
}
