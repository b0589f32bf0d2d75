use crate::parser::ast::{DataConstructor, DataDeclaration, Field};
use crate::syntax::TYPEDLIB_SPECIFIER;
use crate::CompileError;

use super::interpolation::{
    import_ref, indent, intercalate, named_span, new_line, seq, span, text, Interpolation,
};
use super::types::{type_args_unknown, type_params_decl, type_params_ref, type_template, TypeEnv};

/// The full generated block for one data declaration: type alias, one
/// interface and one constructor per variant, guards, `match`, and (for
/// parameterized declarations) the HKT lambda interface — in that fixed
/// order, blocks separated by a blank line.
pub(crate) fn data_declaration_template(
    decl: &DataDeclaration,
) -> Result<Interpolation, CompileError> {
    let env = TypeEnv::default();
    let mut blocks = Vec::new();

    blocks.push(alias_block(decl, &env)?);
    for ctor in &decl.constructors {
        blocks.push(interface_block(decl, ctor, &env)?);
    }
    for ctor in &decl.constructors {
        blocks.push(constructor_block(decl, ctor, &env)?);
    }
    for ctor in &decl.constructors {
        blocks.push(guard_block(decl, ctor));
    }
    blocks.push(data_guard_block(decl));
    blocks.push(match_block(decl));
    if !decl.type_params.is_empty() {
        blocks.push(hkt_block(decl));
    }

    Ok(intercalate(new_line(2), blocks))
}

fn subject_name(decl: &DataDeclaration) -> String {
    let mut chars = decl.name.name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `Just<A>` when the constructor carries fields of a parameterized data
/// declaration, otherwise the bare constructor name.
fn constructor_type_text(decl: &DataDeclaration, ctor: &DataConstructor) -> String {
    if !ctor.fields().is_empty() && !decl.type_params.is_empty() {
        format!("{}{}", ctor.name().name, type_params_ref(&decl.type_params))
    } else {
        ctor.name().name.clone()
    }
}

fn field_label(field: &Field) -> Interpolation {
    let label = field.label();
    let span = match field {
        Field::Named(named) => named.name.span,
        Field::Positional(positional) => positional.span,
    };
    named_span(span, label.clone(), vec![text(label)])
}

fn alias_block(decl: &DataDeclaration, env: &TypeEnv) -> Result<Interpolation, CompileError> {
    let name = &decl.name.name;
    let mut items = vec![
        text("export type "),
        named_span(decl.name.span, name.clone(), vec![text(name.clone())]),
    ];
    if !decl.type_params.is_empty() {
        items.push(type_params_decl(&decl.type_params, true, env)?);
    }
    items.push(text(" = "));
    let refs = decl
        .constructors
        .iter()
        .map(|ctor| {
            named_span(
                ctor.name().span,
                ctor.name().name.clone(),
                vec![text(constructor_type_text(decl, ctor))],
            )
        })
        .collect();
    items.push(intercalate(text(" | "), refs));
    Ok(span(decl.span, items))
}

fn interface_block(
    decl: &DataDeclaration,
    ctor: &DataConstructor,
    env: &TypeEnv,
) -> Result<Interpolation, CompileError> {
    let name = &ctor.name().name;
    let mut header = vec![
        text("export interface "),
        named_span(ctor.name().span, name.clone(), vec![text(name.clone())]),
    ];
    if !ctor.fields().is_empty() && !decl.type_params.is_empty() {
        header.push(type_params_decl(&decl.type_params, true, env)?);
    }
    header.push(text(" {"));

    let mut body = vec![new_line(1), text(format!("readonly _tag: \"{name}\""))];
    for field in ctor.fields() {
        body.push(new_line(1));
        body.push(seq(vec![
            text("readonly "),
            field_label(field),
            text(": "),
            type_template(field.ty(), env)?,
        ]));
    }

    Ok(span(
        ctor.span(),
        vec![seq(header), indent(body), new_line(1), text("}")],
    ))
}

fn constructor_block(
    decl: &DataDeclaration,
    ctor: &DataConstructor,
    env: &TypeEnv,
) -> Result<Interpolation, CompileError> {
    let name = &ctor.name().name;
    let head = vec![
        text("export const "),
        named_span(ctor.name().span, name.clone(), vec![text(name.clone())]),
    ];

    match ctor {
        DataConstructor::Void(_) => {
            let mut items = head;
            items.push(text(format!(": {name} = {{ _tag: \"{name}\" }}")));
            Ok(span(ctor.span(), items))
        }
        DataConstructor::Tuple(tuple) => {
            let mut items = head;
            items.push(text(" = "));
            if !decl.type_params.is_empty() {
                items.push(type_params_decl(&decl.type_params, false, env)?);
            }
            items.push(text("("));
            let mut params = Vec::new();
            for field in &tuple.fields {
                params.push(seq(vec![
                    field_label(field),
                    text(": "),
                    type_template(field.ty(), env)?,
                ]));
            }
            items.push(intercalate(text(", "), params));
            items.push(text(format!(
                "): {} => ({{ _tag: \"{name}\", {} }})",
                constructor_type_text(decl, ctor),
                tuple
                    .fields
                    .iter()
                    .map(Field::label)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
            Ok(span(ctor.span(), items))
        }
        DataConstructor::Record(record) => {
            let mut items = head;
            items.push(text(" = "));
            if !decl.type_params.is_empty() {
                items.push(type_params_decl(&decl.type_params, false, env)?);
            }
            items.push(text("(fields: { "));
            let mut fields = Vec::new();
            for field in &record.fields {
                fields.push(seq(vec![
                    text("readonly "),
                    field_label(field),
                    text(": "),
                    type_template(field.ty(), env)?,
                ]));
            }
            items.push(intercalate(text(", "), fields));
            items.push(text(format!(
                " }}): {} => ({{ _tag: \"{name}\", ...fields }})",
                constructor_type_text(decl, ctor)
            )));
            Ok(span(ctor.span(), items))
        }
    }
}

fn guard_block(decl: &DataDeclaration, ctor: &DataConstructor) -> Interpolation {
    let name = &ctor.name().name;
    let subject = subject_name(decl);
    let data_ref = format!("{}{}", decl.name.name, type_params_ref(&decl.type_params));
    let target = constructor_type_text(decl, ctor);
    let generics = if decl.type_params.is_empty() {
        String::new()
    } else {
        type_params_ref(&decl.type_params)
    };
    span(
        ctor.span(),
        vec![
            text("export const "),
            named_span(
                ctor.name().span,
                name.clone(),
                vec![text(format!("is{name}"))],
            ),
            text(format!(
                " = {generics}({subject}: {data_ref}): {subject} is {target} => {subject}._tag === \"{name}\""
            )),
        ],
    )
}

fn data_guard_block(decl: &DataDeclaration) -> Interpolation {
    let name = &decl.name.name;
    let unknown_args = type_args_unknown(&decl.type_params);
    let tags = decl
        .constructors
        .iter()
        .map(|ctor| format!("u._tag === \"{}\"", ctor.name().name))
        .collect::<Vec<_>>()
        .join(" || ");
    span(
        decl.span,
        vec![
            text("export const "),
            named_span(
                decl.name.span,
                name.clone(),
                vec![text(format!("is{name}"))],
            ),
            text(format!(" = (u: unknown): u is {name}{unknown_args} => ")),
            import_ref(TYPEDLIB_SPECIFIER, "hasProperty"),
            text(format!("(u, \"_tag\") && ({tags})")),
        ],
    )
}

fn match_block(decl: &DataDeclaration) -> Interpolation {
    let subject = subject_name(decl);
    let data_ref = format!("{}{}", decl.name.name, type_params_ref(&decl.type_params));
    let mut generic_names: Vec<String> = decl
        .type_params
        .iter()
        .map(|p| p.name.name.clone())
        .collect();
    generic_names.push("Return".to_string());
    let generics = format!("<{}>", generic_names.join(", "));

    let mut matchers = Vec::new();
    for ctor in &decl.constructors {
        let name = &ctor.name().name;
        let entry = if ctor.fields().is_empty() {
            format!("readonly {name}: () => Return")
        } else {
            format!(
                "readonly {name}: (value: {}) => Return",
                constructor_type_text(decl, ctor)
            )
        };
        matchers.push(named_span(ctor.name().span, name.clone(), vec![text(entry)]));
    }

    let mut cases = Vec::new();
    for ctor in &decl.constructors {
        let name = &ctor.name().name;
        cases.push(new_line(1));
        let case = if ctor.fields().is_empty() {
            format!("case \"{name}\": return matchers.{name}()")
        } else {
            format!("case \"{name}\": return matchers.{name}({subject})")
        };
        cases.push(named_span(ctor.name().span, name.clone(), vec![text(case)]));
    }

    span(
        decl.span,
        vec![
            text(format!(
                "export const match = {generics}({subject}: {data_ref}, matchers: {{ "
            )),
            intercalate(text(", "), matchers),
            text(" }): Return => {"),
            indent(vec![
                new_line(1),
                text(format!("switch ({subject}._tag) {{")),
                indent(cases),
                new_line(1),
                text("}"),
            ]),
            new_line(1),
            text("}"),
        ],
    )
}

fn hkt_block(decl: &DataDeclaration) -> Interpolation {
    let name = &decl.name.name;
    let args = decl
        .type_params
        .iter()
        .map(|p| format!("this[\"{}\"]", p.name.name))
        .collect::<Vec<_>>()
        .join(", ");
    span(
        decl.span,
        vec![
            text("export interface "),
            named_span(
                decl.name.span,
                name.clone(),
                vec![text(format!("{name}HKT"))],
            ),
            text(" extends "),
            import_ref(TYPEDLIB_SPECIFIER, "HKT"),
            text(" {"),
            indent(vec![
                new_line(1),
                text(format!("readonly type: {name}<{args}>")),
            ]),
            new_line(1),
            text("}"),
        ],
    )
}
