pub mod interpolation;

mod data_decl;
mod declarations;
mod types;

#[cfg(test)]
mod tests;

use crate::parser::ast::Statement;
use crate::CompileError;

use interpolation::Interpolation;

/// Build the interpolation tree for one top-level statement. One arm per
/// variant: unsupported shapes surface as generation errors from the
/// individual templates rather than a missing-generator scan.
pub fn statement_template(statement: &Statement) -> Result<Interpolation, CompileError> {
    match statement {
        Statement::Data(decl) => data_decl::data_declaration_template(decl),
        Statement::TypeAlias(decl) => declarations::type_alias_template(decl),
        Statement::Function(decl) => declarations::function_template(decl),
        Statement::Variable(decl) => declarations::variable_template(decl),
        Statement::Brand(decl) => declarations::brand_template(decl),
        Statement::TypeClass(decl) => declarations::typeclass_template(decl),
        Statement::Instance(decl) => declarations::instance_template(decl),
        Statement::Import(decl) => Ok(declarations::import_template(decl)),
        Statement::Comment(comment) => Ok(declarations::comment_template(comment)),
    }
}

/// The generated block for a data declaration, used directly by the
/// document assembler when splitting declarations into their own modules.
pub(crate) use data_decl::data_declaration_template as data_template;
