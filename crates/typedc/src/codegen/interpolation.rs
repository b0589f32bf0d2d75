use crate::span::Span;

/// The intermediate, span-aware representation between the AST and the
/// module/segment tree. Template functions build this tree once per
/// declaration; the document assembler walks it exactly once.
#[derive(Debug, Clone)]
pub enum Interpolation {
    /// Literal output text.
    Text(String),
    /// An ordered sequence of fragments and nested interpolations, so that
    /// composition never loses span information the way plain string
    /// concatenation would.
    Template(Vec<Interpolation>),
    /// Binds a source span (and optionally a navigation name/content) to the
    /// wrapped nodes.
    WithSpan {
        span: Span,
        name: Option<String>,
        content: Option<String>,
        children: Vec<Interpolation>,
    },
    /// Emits the wrapped nodes one indentation level deeper.
    WithIndent(Vec<Interpolation>),
    /// Forces `count` line breaks.
    NewLine(usize),
    /// Declares an import on the enclosing module without emitting text.
    DeclareImport(ImportRequest),
    /// References a declared import, resolved to a local identifier at
    /// document-assembly time.
    Import { specifier: String, name: String },
}

#[derive(Debug, Clone)]
pub enum ImportRequest {
    Named {
        specifier: String,
        name: String,
        alias: Option<String>,
    },
    Namespace {
        specifier: String,
        name: String,
    },
}

pub fn text(value: impl Into<String>) -> Interpolation {
    Interpolation::Text(value.into())
}

pub fn seq(items: Vec<Interpolation>) -> Interpolation {
    Interpolation::Template(items)
}

pub fn new_line(count: usize) -> Interpolation {
    Interpolation::NewLine(count)
}

pub fn indent(children: Vec<Interpolation>) -> Interpolation {
    Interpolation::WithIndent(children)
}

pub fn span(span: Span, children: Vec<Interpolation>) -> Interpolation {
    Interpolation::WithSpan {
        span,
        name: None,
        content: None,
        children,
    }
}

pub fn named_span(span: Span, name: impl Into<String>, children: Vec<Interpolation>) -> Interpolation {
    Interpolation::WithSpan {
        span,
        name: Some(name.into()),
        content: None,
        children,
    }
}

/// Interleave `separator` between the items of a list.
pub fn intercalate(separator: Interpolation, items: Vec<Interpolation>) -> Interpolation {
    let mut out = Vec::with_capacity(items.len() * 2);
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            out.push(separator.clone());
        }
        out.push(item);
    }
    Interpolation::Template(out)
}

pub fn named_import(specifier: impl Into<String>, name: impl Into<String>) -> Interpolation {
    Interpolation::DeclareImport(ImportRequest::Named {
        specifier: specifier.into(),
        name: name.into(),
        alias: None,
    })
}

pub fn aliased_import(
    specifier: impl Into<String>,
    name: impl Into<String>,
    alias: impl Into<String>,
) -> Interpolation {
    Interpolation::DeclareImport(ImportRequest::Named {
        specifier: specifier.into(),
        name: name.into(),
        alias: Some(alias.into()),
    })
}

pub fn namespace_import(specifier: impl Into<String>, name: impl Into<String>) -> Interpolation {
    Interpolation::DeclareImport(ImportRequest::Namespace {
        specifier: specifier.into(),
        name: name.into(),
    })
}

/// Reference an import by its declared name, emitting the local identifier
/// it resolves to.
pub fn import_ref(specifier: impl Into<String>, name: impl Into<String>) -> Interpolation {
    Interpolation::Import {
        specifier: specifier.into(),
        name: name.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intercalate_interleaves_separators() {
        let joined = intercalate(text(" | "), vec![text("a"), text("b"), text("c")]);
        let Interpolation::Template(items) = joined else {
            panic!("expected template");
        };
        assert_eq!(items.len(), 5);
        assert!(matches!(&items[1], Interpolation::Text(s) if s == " | "));
        assert!(matches!(&items[4], Interpolation::Text(s) if s == "c"));
    }

    #[test]
    fn intercalate_of_single_item_has_no_separator() {
        let joined = intercalate(text(", "), vec![text("only")]);
        let Interpolation::Template(items) = joined else {
            panic!("expected template");
        };
        assert_eq!(items.len(), 1);
    }
}
