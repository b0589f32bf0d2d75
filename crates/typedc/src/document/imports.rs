use crate::codegen::interpolation::ImportRequest;

/// Per-module import table: maps a module specifier to either a namespace
/// import or an ordered, deduplicated set of named imports. Declaration
/// order is emission order.
#[derive(Debug, Default)]
pub struct ImportManager {
    entries: Vec<ImportEntry>,
}

#[derive(Debug)]
struct ImportEntry {
    specifier: String,
    shape: ImportShape,
}

#[derive(Debug)]
enum ImportShape {
    Namespace { name: String },
    Named { names: Vec<NamedImport> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    pub name: String,
    pub alias: Option<String>,
}

impl NamedImport {
    fn local(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl ImportManager {
    pub fn declare(&mut self, request: &ImportRequest) {
        match request {
            ImportRequest::Named {
                specifier,
                name,
                alias,
            } => self.declare_named(specifier, name, alias.as_deref()),
            ImportRequest::Namespace { specifier, name } => {
                self.declare_namespace(specifier, name)
            }
        }
    }

    /// Named imports for one specifier accumulate; re-declaring an existing
    /// name is a no-op. A specifier already imported as a namespace keeps
    /// its namespace form, which covers the name anyway.
    pub fn declare_named(&mut self, specifier: &str, name: &str, alias: Option<&str>) {
        let import = NamedImport {
            name: name.to_string(),
            alias: alias.map(|a| a.to_string()),
        };
        match self.entry_mut(specifier) {
            Some(ImportShape::Named { names }) => {
                if !names.contains(&import) {
                    names.push(import);
                }
            }
            Some(ImportShape::Namespace { .. }) => {}
            None => self.entries.push(ImportEntry {
                specifier: specifier.to_string(),
                shape: ImportShape::Named {
                    names: vec![import],
                },
            }),
        }
    }

    /// Declaring a namespace import replaces any named form for the same
    /// specifier: last writer wins for the import shape.
    pub fn declare_namespace(&mut self, specifier: &str, name: &str) {
        match self.entry_mut(specifier) {
            Some(shape) => {
                *shape = ImportShape::Namespace {
                    name: name.to_string(),
                };
            }
            None => self.entries.push(ImportEntry {
                specifier: specifier.to_string(),
                shape: ImportShape::Namespace {
                    name: name.to_string(),
                },
            }),
        }
    }

    /// Resolve the local identifier for an imported name, declaring the
    /// named import on first reference.
    pub fn reference(&mut self, specifier: &str, name: &str) -> String {
        if let Some(shape) = self.entry_mut(specifier) {
            match shape {
                ImportShape::Namespace { name: namespace } => {
                    return format!("{namespace}.{name}");
                }
                ImportShape::Named { names } => {
                    if let Some(existing) = names.iter().find(|n| n.name == name) {
                        return existing.local().to_string();
                    }
                }
            }
        }
        self.declare_named(specifier, name, None);
        name.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One import statement per specifier, in first-declaration order.
    pub fn render(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match &entry.shape {
                ImportShape::Namespace { name } => {
                    format!("import * as {name} from \"{}\"", entry.specifier)
                }
                ImportShape::Named { names } => {
                    let list = names
                        .iter()
                        .map(|import| match &import.alias {
                            Some(alias) => format!("{} as {alias}", import.name),
                            None => import.name.clone(),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("import {{ {list} }} from \"{}\"", entry.specifier)
                }
            })
            .collect()
    }

    fn entry_mut(&mut self, specifier: &str) -> Option<&mut ImportShape> {
        self.entries
            .iter_mut()
            .find(|entry| entry.specifier == specifier)
            .map(|entry| &mut entry.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_imports_for_one_specifier_merge_into_one_clause() {
        let mut imports = ImportManager::default();
        imports.declare_named("@typed-lang/typedlib", "hasProperty", None);
        imports.declare_named("@typed-lang/typedlib", "hasProperty", None);
        imports.declare_named("@typed-lang/typedlib", "HKT", None);
        assert_eq!(
            imports.render(),
            vec!["import { hasProperty, HKT } from \"@typed-lang/typedlib\""]
        );
    }

    #[test]
    fn namespace_declaration_replaces_named_form() {
        let mut imports = ImportManager::default();
        imports.declare_named("fp-lib", "pipe", None);
        imports.declare_namespace("fp-lib", "fp");
        assert_eq!(imports.render(), vec!["import * as fp from \"fp-lib\""]);
        assert_eq!(imports.reference("fp-lib", "pipe"), "fp.pipe");
    }

    #[test]
    fn reference_declares_on_first_use_and_respects_aliases() {
        let mut imports = ImportManager::default();
        assert_eq!(imports.reference("lib", "helper"), "helper");
        imports.declare_named("lib", "other", Some("renamed"));
        assert_eq!(imports.reference("lib", "other"), "renamed");
        assert_eq!(
            imports.render(),
            vec!["import { helper, other as renamed } from \"lib\""]
        );
    }
}
