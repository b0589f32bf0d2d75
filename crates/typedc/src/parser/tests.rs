use crate::parser::ast::{
    DataConstructor, Field, ImportClause, Statement, Type, TypeParam, Variance,
};
use crate::parser::parse;
use crate::CompileError;

fn parse_ok(source: &str) -> Vec<Statement> {
    parse("test.typed", source)
        .expect("parse should succeed")
        .statements
}

fn single_statement(source: &str) -> Statement {
    let mut statements = parse_ok(source);
    assert_eq!(statements.len(), 1, "expected one statement");
    statements.remove(0)
}

#[test]
fn parses_data_declaration_with_void_and_tuple_constructors() {
    let Statement::Data(decl) = single_statement("data Maybe<A> = Nothing | Just(value: A)")
    else {
        panic!("expected data declaration");
    };
    assert_eq!(decl.name.name, "Maybe");
    assert_eq!(decl.type_params.len(), 1);
    assert_eq!(decl.constructors.len(), 2);

    assert!(matches!(&decl.constructors[0], DataConstructor::Void(v) if v.name.name == "Nothing"));
    let DataConstructor::Tuple(just) = &decl.constructors[1] else {
        panic!("expected tuple constructor");
    };
    assert_eq!(just.fields.len(), 1);
    let Field::Named(field) = &just.fields[0] else {
        panic!("expected named field");
    };
    assert_eq!(field.name.name, "value");
    assert!(matches!(&field.ty, Type::Reference(r) if r.name.name == "A"));
}

#[test]
fn declaration_span_is_the_tight_union_of_its_tokens() {
    let Statement::Data(decl) = single_statement("data Maybe<A> = Nothing | Just(value: A)")
    else {
        panic!("expected data declaration");
    };
    assert_eq!(decl.span.start.column, 0);
    assert_eq!(decl.span.end.column, 40);
    assert_eq!(decl.name.span.start.column, 5);
    assert_eq!(decl.name.span.end.column, 10);
}

#[test]
fn trailing_whitespace_is_not_part_of_the_span() {
    let Statement::Data(decl) = single_statement("data Flag = On | Off   \n") else {
        panic!("expected data declaration");
    };
    assert_eq!(decl.span.end.column, 20);
}

#[test]
fn parses_variance_markers_and_constraints() {
    let Statement::Data(decl) = single_statement("data Box<in out T extends Ord> = Full(value: T)")
    else {
        panic!("expected data declaration");
    };
    let TypeParam {
        variance,
        constraint,
        ..
    } = &decl.type_params[0];
    assert_eq!(*variance, Some(Variance::InOut));
    assert!(matches!(constraint, Some(Type::Reference(r)) if r.name.name == "Ord"));
}

#[test]
fn parses_record_constructors_and_positional_fields() {
    let Statement::Data(decl) =
        single_statement("data Shape = Rect { width: number, height: number } | Pair(string, number)")
    else {
        panic!("expected data declaration");
    };
    let DataConstructor::Record(rect) = &decl.constructors[0] else {
        panic!("expected record constructor");
    };
    assert_eq!(rect.fields.len(), 2);

    let DataConstructor::Tuple(pair) = &decl.constructors[1] else {
        panic!("expected tuple constructor");
    };
    let labels: Vec<String> = pair.fields.iter().map(Field::label).collect();
    assert_eq!(labels, vec!["arg0", "arg1"]);
}

#[test]
fn parses_builtin_container_and_compound_types() {
    let Statement::TypeAlias(alias) = single_statement(
        "type Inventory = { items: Array<string>, index: Map<string, number>, tags: Set<string> }",
    ) else {
        panic!("expected alias");
    };
    let Type::Record(record) = &alias.ty else {
        panic!("expected record type");
    };
    assert!(matches!(&record.fields[0].ty, Type::Array(_)));
    assert!(matches!(&record.fields[1].ty, Type::Map(_)));
    assert!(matches!(&record.fields[2].ty, Type::Set(_)));
}

#[test]
fn parses_tuple_types_with_rest_element() {
    let Statement::TypeAlias(alias) = single_statement("type Row = [string, number, ...Array<boolean>]")
    else {
        panic!("expected alias");
    };
    let Type::Tuple(tuple) = &alias.ty else {
        panic!("expected tuple type");
    };
    assert_eq!(tuple.elements.len(), 2);
    assert!(tuple.rest.is_some());
}

#[test]
fn parses_generic_function_types() {
    let Statement::TypeClass(class) = single_statement(
        "typeclass Functor<F<out A>> {\n  map: <A, B>(f: (a: A) => B) => (fa: F<A>) => F<B>\n}",
    ) else {
        panic!("expected typeclass");
    };
    assert_eq!(class.members.len(), 1);
    let Type::Function(map) = &class.members[0].ty else {
        panic!("expected function type");
    };
    assert_eq!(map.type_params.len(), 2);
    assert_eq!(map.params.len(), 1);
    assert!(matches!(&*map.return_type, Type::Function(_)));
    assert!(matches!(&class.params[0], Type::HigherKinded(h) if h.name.name == "F"));
}

#[test]
fn parses_brand_function_variable_and_instance_declarations() {
    let statements = parse_ok(
        "brand UserId = string\n\
         function rename<A>(user: UserId, name: A): A\n\
         const empty: Maybe<never>\n\
         instance maybeFunctor: Functor<Maybe>",
    );
    assert_eq!(statements.len(), 4);
    assert!(matches!(&statements[0], Statement::Brand(b) if b.ty.brand.name == "UserId"));
    let Statement::Function(function) = &statements[1] else {
        panic!("expected function");
    };
    assert_eq!(function.params.len(), 2);
    assert!(function.return_type.is_some());
    assert!(matches!(&statements[2], Statement::Variable(_)));
    let Statement::Instance(instance) = &statements[3] else {
        panic!("expected instance");
    };
    assert_eq!(instance.class.name.name, "Functor");
    assert_eq!(instance.class.type_arguments.len(), 1);
}

#[test]
fn parses_import_declarations() {
    let statements = parse_ok(
        "import { hasProperty, Brand as Branded } from \"@typed-lang/typedlib\"\n\
         import * as fp from \"fp-lib\"",
    );
    let Statement::Import(named) = &statements[0] else {
        panic!("expected import");
    };
    assert_eq!(named.specifier.name, "@typed-lang/typedlib");
    let ImportClause::Named(specifiers) = &named.clause else {
        panic!("expected named clause");
    };
    assert_eq!(specifiers.len(), 2);
    assert_eq!(specifiers[1].alias.as_ref().map(|a| a.name.as_str()), Some("Branded"));

    let Statement::Import(namespace) = &statements[1] else {
        panic!("expected import");
    };
    assert!(matches!(&namespace.clause, ImportClause::Namespace(n) if n.name == "fp"));
}

#[test]
fn comments_are_statements_at_the_top_level() {
    let statements = parse_ok("// header\ndata Flag = On | Off\n// footer");
    assert_eq!(statements.len(), 3);
    assert!(matches!(&statements[0], Statement::Comment(c) if c.text == "// header"));
    assert!(matches!(&statements[2], Statement::Comment(c) if c.text == "// footer"));
}

#[test]
fn data_declaration_without_constructors_is_a_parse_error() {
    let err = parse("test.typed", "data Maybe<A> =").expect_err("parse error");
    match err {
        CompileError::Parse {
            expected, found, ..
        } => {
            assert_eq!(expected, "a constructor name");
            assert_eq!(found, "end of input");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn trailing_constructor_separator_is_a_parse_error() {
    let err = parse("test.typed", "data Color = Red |").expect_err("parse error");
    assert!(matches!(err, CompileError::Parse { expected, .. } if expected == "a constructor name"));
}

#[test]
fn missing_closing_delimiter_is_a_parse_error() {
    let err = parse("test.typed", "data X = Y(value: string").expect_err("parse error");
    match err {
        CompileError::Parse {
            expected, found, ..
        } => {
            assert_eq!(expected, "')'");
            assert_eq!(found, "end of input");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn empty_constructor_payload_is_a_parse_error() {
    let err = parse("test.typed", "data X = Y()").expect_err("parse error");
    assert!(matches!(err, CompileError::Parse { expected, .. } if expected == "a field"));
}

#[test]
fn unknown_top_level_token_is_a_parse_error() {
    let err = parse("test.typed", "hello").expect_err("parse error");
    match err {
        CompileError::Parse {
            expected,
            found,
            line,
            column,
        } => {
            assert_eq!(expected, "a declaration");
            assert_eq!(found, "identifier 'hello'");
            assert_eq!((line, column), (1, 0));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn wrong_container_arity_is_a_parse_error() {
    assert!(parse("test.typed", "type M = Map<string>").is_err());
    assert!(parse("test.typed", "type A = Array<string, number>").is_err());
}

#[test]
fn lex_errors_surface_through_parse() {
    let err = parse("test.typed", "data X = #").expect_err("lex error");
    assert!(matches!(err, CompileError::Lex { character: '#', .. }));
}
