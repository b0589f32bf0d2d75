use crate::parser::ast::{
    BrandDeclaration, CommentStatement, FunctionDeclaration, ImportClause, ImportDeclaration,
    InstanceDeclaration, Type, TypeAliasDeclaration, TypeClassDeclaration, VariableDeclaration,
};
use crate::syntax::TYPEDLIB_SPECIFIER;
use crate::CompileError;

use super::interpolation::{
    aliased_import, import_ref, indent, intercalate, named_import, named_span, namespace_import,
    new_line, seq, span, text, Interpolation,
};
use super::types::{type_params_decl, type_template, TypeEnv};

pub(super) fn type_alias_template(
    decl: &TypeAliasDeclaration,
) -> Result<Interpolation, CompileError> {
    let env = TypeEnv::default();
    let mut items = vec![
        text("export type "),
        named_span(
            decl.name.span,
            decl.name.name.clone(),
            vec![text(decl.name.name.clone())],
        ),
    ];
    if !decl.type_params.is_empty() {
        items.push(type_params_decl(&decl.type_params, true, &env)?);
    }
    items.push(text(" = "));
    items.push(type_template(&decl.ty, &env)?);
    Ok(span(decl.span, items))
}

pub(super) fn function_template(
    decl: &FunctionDeclaration,
) -> Result<Interpolation, CompileError> {
    let env = TypeEnv::default();
    let mut items = vec![
        text("export declare function "),
        named_span(
            decl.name.span,
            decl.name.name.clone(),
            vec![text(decl.name.name.clone())],
        ),
    ];
    if !decl.type_params.is_empty() {
        items.push(type_params_decl(&decl.type_params, false, &env)?);
    }
    items.push(text("("));
    let mut params = Vec::new();
    for param in &decl.params {
        params.push(seq(vec![
            named_span(
                param.name.span,
                param.name.name.clone(),
                vec![text(param.name.name.clone())],
            ),
            text(": "),
            type_template(&param.ty, &env)?,
        ]));
    }
    items.push(intercalate(text(", "), params));
    items.push(text("): "));
    match &decl.return_type {
        Some(return_type) => items.push(type_template(return_type, &env)?),
        None => items.push(text("void")),
    }
    Ok(span(decl.span, items))
}

pub(super) fn variable_template(
    decl: &VariableDeclaration,
) -> Result<Interpolation, CompileError> {
    let env = TypeEnv::default();
    Ok(span(
        decl.span,
        vec![
            text("export declare const "),
            named_span(
                decl.name.span,
                decl.name.name.clone(),
                vec![text(decl.name.name.clone())],
            ),
            text(": "),
            type_template(&decl.ty, &env)?,
        ],
    ))
}

/// A brand declaration expands to the branded alias and a constructor that
/// casts the underlying representation.
pub(super) fn brand_template(decl: &BrandDeclaration) -> Result<Interpolation, CompileError> {
    let env = TypeEnv::default();
    let name = &decl.name.name;

    let alias = span(
        decl.span,
        vec![
            text("export type "),
            named_span(decl.name.span, name.clone(), vec![text(name.clone())]),
            text(" = "),
            type_template(&Type::Branded(decl.ty.clone()), &env)?,
        ],
    );

    let underlying = type_template(&decl.ty.underlying, &env)?;
    let constructor = span(
        decl.span,
        vec![
            text("export const "),
            named_span(decl.name.span, name.clone(), vec![text(name.clone())]),
            text(" = (value: "),
            underlying,
            text(format!("): {name} => value as {name}")),
        ],
    );

    Ok(intercalate(new_line(2), vec![alias, constructor]))
}

/// Typeclass headers with higher-kinded parameters emit `F extends HKT` and
/// rewrite member applications of `F` through `Kind`.
pub(super) fn typeclass_template(
    decl: &TypeClassDeclaration,
) -> Result<Interpolation, CompileError> {
    let mut env = TypeEnv::default();
    let mut header_params = Vec::new();
    for param in &decl.params {
        match param {
            Type::HigherKinded(hkt) => {
                env.hkt_params.push(hkt.name.name.clone());
                header_params.push(seq(vec![
                    named_span(
                        hkt.name.span,
                        hkt.name.name.clone(),
                        vec![text(hkt.name.name.clone())],
                    ),
                    text(" extends "),
                    import_ref(TYPEDLIB_SPECIFIER, "HKT"),
                ]));
            }
            Type::Reference(reference) => {
                header_params.push(named_span(
                    reference.span,
                    reference.name.name.clone(),
                    vec![text(reference.name.name.clone())],
                ));
            }
            other => {
                let at = other.span();
                return Err(CompileError::Generation {
                    tag: "TypeClassDeclaration".to_string(),
                    line: at.start.line,
                    column: at.start.column,
                });
            }
        }
    }

    let mut items = vec![
        text("export interface "),
        named_span(
            decl.name.span,
            decl.name.name.clone(),
            vec![text(decl.name.name.clone())],
        ),
    ];
    if !header_params.is_empty() {
        items.push(text("<"));
        items.push(intercalate(text(", "), header_params));
        items.push(text(">"));
    }
    items.push(text(" {"));

    let mut body = Vec::new();
    for member in &decl.members {
        body.push(new_line(1));
        body.push(span(
            member.span,
            vec![
                text("readonly "),
                named_span(
                    member.name.span,
                    member.name.name.clone(),
                    vec![text(member.name.name.clone())],
                ),
                text(": "),
                type_template(&member.ty, &env)?,
            ],
        ));
    }

    Ok(span(
        decl.span,
        vec![seq(items), indent(body), new_line(1), text("}")],
    ))
}

/// `instance maybeFunctor: Functor<Maybe>` declares a value of the class
/// interface; bare constructor-name arguments resolve to their HKT lambda.
pub(super) fn instance_template(decl: &InstanceDeclaration) -> Result<Interpolation, CompileError> {
    let env = TypeEnv::default();
    let mut items = vec![
        text("export declare const "),
        named_span(
            decl.name.span,
            decl.name.name.clone(),
            vec![text(decl.name.name.clone())],
        ),
        text(": "),
        named_span(
            decl.class.name.span,
            decl.class.name.name.clone(),
            vec![text(decl.class.name.name.clone())],
        ),
    ];
    if !decl.class.type_arguments.is_empty() {
        items.push(text("<"));
        let mut args = Vec::new();
        for arg in &decl.class.type_arguments {
            match arg {
                Type::Reference(reference) if reference.type_arguments.is_empty() => {
                    args.push(named_span(
                        reference.span,
                        reference.name.name.clone(),
                        vec![text(format!("{}HKT", reference.name.name))],
                    ));
                }
                other => args.push(type_template(other, &env)?),
            }
        }
        items.push(intercalate(text(", "), args));
        items.push(text(">"));
    }
    Ok(span(decl.span, items))
}

/// Source-level imports re-declare through the enclosing module's import
/// manager and emit no text of their own.
pub(super) fn import_template(decl: &ImportDeclaration) -> Interpolation {
    let specifier = &decl.specifier.name;
    match &decl.clause {
        ImportClause::Namespace(name) => namespace_import(specifier, name.name.clone()),
        ImportClause::Named(specifiers) => seq(specifiers
            .iter()
            .map(|import| match &import.alias {
                Some(alias) => {
                    aliased_import(specifier, import.name.name.clone(), alias.name.clone())
                }
                None => named_import(specifier, import.name.name.clone()),
            })
            .collect()),
    }
}

pub(super) fn comment_template(comment: &CommentStatement) -> Interpolation {
    span(comment.span, vec![text(comment.text.clone())])
}
