use crate::parser::ast::{Type, TypeParam, Variance};
use crate::syntax::TYPEDLIB_SPECIFIER;
use crate::CompileError;

use super::interpolation::{
    import_ref, intercalate, named_span, seq, span, text, Interpolation,
};

/// Emission context for types. `hkt_params` lists typeclass header
/// parameters whose applications rewrite to `Kind<F, ...>`.
#[derive(Debug, Clone, Default)]
pub(super) struct TypeEnv {
    pub hkt_params: Vec<String>,
}

impl TypeEnv {
    pub fn is_hkt_param(&self, name: &str) -> bool {
        self.hkt_params.iter().any(|p| p == name)
    }
}

/// Emit one type. Every reference-shaped node gets a named span so the
/// source map can navigate from the generated occurrence back to the
/// original one; composite shapes carry a plain span and let their children
/// map themselves.
pub(super) fn type_template(ty: &Type, env: &TypeEnv) -> Result<Interpolation, CompileError> {
    match ty {
        Type::Builtin(builtin) => Ok(named_span(
            builtin.span,
            builtin.name.clone(),
            vec![text(builtin.name.clone())],
        )),
        Type::Reference(reference) => {
            let name = &reference.name.name;
            if env.is_hkt_param(name) && !reference.type_arguments.is_empty() {
                let mut children = vec![
                    import_ref(TYPEDLIB_SPECIFIER, "Kind"),
                    text(format!("<{name}, ")),
                ];
                children.push(type_arguments_template(&reference.type_arguments, env)?);
                children.push(text(">"));
                return Ok(named_span(reference.span, name.clone(), children));
            }
            let mut children = vec![text(name.clone())];
            if !reference.type_arguments.is_empty() {
                children.push(text("<"));
                children.push(type_arguments_template(&reference.type_arguments, env)?);
                children.push(text(">"));
            }
            Ok(named_span(reference.span, name.clone(), children))
        }
        Type::Array(array) => Ok(named_span(
            array.span,
            "Array",
            vec![
                text("ReadonlyArray<"),
                type_template(&array.element, env)?,
                text(">"),
            ],
        )),
        Type::Set(set) => Ok(named_span(
            set.span,
            "Set",
            vec![
                text("ReadonlySet<"),
                type_template(&set.element, env)?,
                text(">"),
            ],
        )),
        Type::Map(map) => Ok(named_span(
            map.span,
            "Map",
            vec![
                text("ReadonlyMap<"),
                type_template(&map.key, env)?,
                text(", "),
                type_template(&map.value, env)?,
                text(">"),
            ],
        )),
        Type::Tuple(tuple) => {
            let mut elements = Vec::new();
            for element in &tuple.elements {
                elements.push(type_template(element, env)?);
            }
            if let Some(rest) = &tuple.rest {
                elements.push(seq(vec![text("..."), type_template(rest, env)?]));
            }
            Ok(span(
                tuple.span,
                vec![
                    text("readonly ["),
                    intercalate(text(", "), elements),
                    text("]"),
                ],
            ))
        }
        Type::Record(record) => {
            if record.fields.is_empty() {
                return Ok(span(record.span, vec![text("{}")]));
            }
            let mut fields = Vec::new();
            for field in &record.fields {
                fields.push(seq(vec![
                    text("readonly "),
                    named_span(
                        field.name.span,
                        field.name.name.clone(),
                        vec![text(field.name.name.clone())],
                    ),
                    text(": "),
                    type_template(&field.ty, env)?,
                ]));
            }
            Ok(span(
                record.span,
                vec![
                    text("{ "),
                    intercalate(text(", "), fields),
                    text(" }"),
                ],
            ))
        }
        Type::Function(function) => {
            let mut children = Vec::new();
            if !function.type_params.is_empty() {
                children.push(type_params_decl(&function.type_params, false, env)?);
            }
            children.push(text("("));
            let mut params = Vec::new();
            for param in &function.params {
                params.push(seq(vec![
                    named_span(
                        param.name.span,
                        param.name.name.clone(),
                        vec![text(param.name.name.clone())],
                    ),
                    text(": "),
                    type_template(&param.ty, env)?,
                ]));
            }
            children.push(intercalate(text(", "), params));
            children.push(text(") => "));
            children.push(type_template(&function.return_type, env)?);
            Ok(span(function.span, children))
        }
        Type::Branded(branded) => Ok(span(
            branded.span,
            vec![
                type_template(&branded.underlying, env)?,
                text(" & "),
                import_ref(TYPEDLIB_SPECIFIER, "Brand"),
                text(format!("<\"{}\">", branded.brand.name)),
            ],
        )),
        Type::HigherKinded(hkt) => Err(CompileError::Generation {
            tag: "HigherKindedType".to_string(),
            line: hkt.span.start.line,
            column: hkt.span.start.column,
        }),
    }
}

fn type_arguments_template(args: &[Type], env: &TypeEnv) -> Result<Interpolation, CompileError> {
    let mut rendered = Vec::with_capacity(args.len());
    for arg in args {
        rendered.push(type_template(arg, env)?);
    }
    Ok(intercalate(text(", "), rendered))
}

/// Declaration-position type parameter list, brackets included: e.g.
/// `<in out A extends Ord, B>`. Variance markers are only legal on
/// alias/interface headers, so function types pass `with_variance = false`.
pub(super) fn type_params_decl(
    params: &[TypeParam],
    with_variance: bool,
    env: &TypeEnv,
) -> Result<Interpolation, CompileError> {
    if params.is_empty() {
        return Ok(seq(Vec::new()));
    }
    let mut rendered = Vec::new();
    for param in params {
        let mut children = Vec::new();
        if with_variance {
            match param.variance {
                Some(Variance::In) => children.push(text("in ")),
                Some(Variance::Out) => children.push(text("out ")),
                Some(Variance::InOut) => children.push(text("in out ")),
                None => {}
            }
        }
        children.push(named_span(
            param.name.span,
            param.name.name.clone(),
            vec![text(param.name.name.clone())],
        ));
        if let Some(constraint) = &param.constraint {
            children.push(text(" extends "));
            children.push(type_template(constraint, env)?);
        }
        rendered.push(span(param.span, children));
    }
    Ok(seq(vec![
        text("<"),
        intercalate(text(", "), rendered),
        text(">"),
    ]))
}

/// Reference-position parameter list: `<A, B>`, or nothing.
pub(super) fn type_params_ref(params: &[TypeParam]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = params.iter().map(|p| p.name.name.as_str()).collect();
    format!("<{}>", names.join(", "))
}

/// `<unknown, unknown>` matching the arity of `params`, for guards against
/// bare `unknown` input.
pub(super) fn type_args_unknown(params: &[TypeParam]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = params.iter().map(|_| "unknown").collect();
    format!("<{}>", names.join(", "))
}
