use serde::Serialize;

use crate::span::Span;

#[derive(Debug, Clone, Serialize)]
pub struct SpannedName {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    pub file_name: String,
    pub source: String,
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum Statement {
    Data(DataDeclaration),
    TypeAlias(TypeAliasDeclaration),
    Function(FunctionDeclaration),
    Variable(VariableDeclaration),
    Brand(BrandDeclaration),
    TypeClass(TypeClassDeclaration),
    Instance(InstanceDeclaration),
    Import(ImportDeclaration),
    Comment(CommentStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Data(decl) => decl.span,
            Statement::TypeAlias(decl) => decl.span,
            Statement::Function(decl) => decl.span,
            Statement::Variable(decl) => decl.span,
            Statement::Brand(decl) => decl.span,
            Statement::TypeClass(decl) => decl.span,
            Statement::Instance(decl) => decl.span,
            Statement::Import(decl) => decl.span,
            Statement::Comment(comment) => comment.span,
        }
    }

    /// Variant tag, used for generation errors and trace output.
    pub fn tag(&self) -> &'static str {
        match self {
            Statement::Data(_) => "DataDeclaration",
            Statement::TypeAlias(_) => "TypeAliasDeclaration",
            Statement::Function(_) => "FunctionDeclaration",
            Statement::Variable(_) => "VariableDeclaration",
            Statement::Brand(_) => "BrandDeclaration",
            Statement::TypeClass(_) => "TypeClassDeclaration",
            Statement::Instance(_) => "InstanceDeclaration",
            Statement::Import(_) => "ImportDeclaration",
            Statement::Comment(_) => "Comment",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataDeclaration {
    pub name: SpannedName,
    pub type_params: Vec<TypeParam>,
    pub constructors: Vec<DataConstructor>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variance {
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeParam {
    pub variance: Option<Variance>,
    pub name: SpannedName,
    pub constraint: Option<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum DataConstructor {
    Void(VoidConstructor),
    Tuple(TupleConstructor),
    Record(RecordConstructor),
}

impl DataConstructor {
    pub fn name(&self) -> &SpannedName {
        match self {
            DataConstructor::Void(ctor) => &ctor.name,
            DataConstructor::Tuple(ctor) => &ctor.name,
            DataConstructor::Record(ctor) => &ctor.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            DataConstructor::Void(ctor) => ctor.span,
            DataConstructor::Tuple(ctor) => ctor.span,
            DataConstructor::Record(ctor) => ctor.span,
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            DataConstructor::Void(_) => &[],
            DataConstructor::Tuple(ctor) => &ctor.fields,
            DataConstructor::Record(ctor) => &ctor.fields,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VoidConstructor {
    pub name: SpannedName,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct TupleConstructor {
    pub name: SpannedName,
    pub fields: Vec<Field>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordConstructor {
    pub name: SpannedName,
    pub fields: Vec<Field>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum Field {
    Named(NamedField),
    Positional(PositionalField),
}

impl Field {
    pub fn span(&self) -> Span {
        match self {
            Field::Named(field) => field.span,
            Field::Positional(field) => field.span,
        }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Field::Named(field) => &field.ty,
            Field::Positional(field) => &field.ty,
        }
    }

    /// Emitted field label: the declared name, or `arg<i>` for positional fields.
    pub fn label(&self) -> String {
        match self {
            Field::Named(field) => field.name.name.clone(),
            Field::Positional(field) => format!("arg{}", field.index),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedField {
    pub name: SpannedName,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionalField {
    pub index: usize,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeAliasDeclaration {
    pub name: SpannedName,
    pub type_params: Vec<TypeParam>,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration {
    pub name: SpannedName,
    pub type_params: Vec<TypeParam>,
    pub params: Vec<NamedField>,
    pub return_type: Option<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableDeclaration {
    pub name: SpannedName,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandDeclaration {
    pub name: SpannedName,
    pub ty: BrandedType,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeClassDeclaration {
    pub name: SpannedName,
    pub params: Vec<Type>,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassMember {
    pub name: SpannedName,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstanceDeclaration {
    pub name: SpannedName,
    pub class: TypeReference,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportDeclaration {
    pub clause: ImportClause,
    pub specifier: SpannedName,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum ImportClause {
    Named(Vec<ImportSpecifier>),
    Namespace(SpannedName),
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSpecifier {
    pub name: SpannedName,
    pub alias: Option<SpannedName>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentStatement {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub enum Type {
    Builtin(BuiltinType),
    Reference(TypeReference),
    Array(ArrayType),
    Tuple(TupleType),
    Record(RecordType),
    Map(MapType),
    Set(SetType),
    Function(FunctionType),
    Branded(BrandedType),
    HigherKinded(HigherKindedType),
}

impl Type {
    pub fn span(&self) -> Span {
        match self {
            Type::Builtin(ty) => ty.span,
            Type::Reference(ty) => ty.span,
            Type::Array(ty) => ty.span,
            Type::Tuple(ty) => ty.span,
            Type::Record(ty) => ty.span,
            Type::Map(ty) => ty.span,
            Type::Set(ty) => ty.span,
            Type::Function(ty) => ty.span,
            Type::Branded(ty) => ty.span,
            Type::HigherKinded(ty) => ty.span,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuiltinType {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeReference {
    pub name: SpannedName,
    pub type_arguments: Vec<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct TupleType {
    pub elements: Vec<Type>,
    pub rest: Option<Box<Type>>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordType {
    pub fields: Vec<NamedField>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapType {
    pub key: Box<Type>,
    pub value: Box<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetType {
    pub element: Box<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionType {
    pub type_params: Vec<TypeParam>,
    pub params: Vec<NamedField>,
    pub return_type: Box<Type>,
    pub span: Span,
}

/// The right-hand side of a `brand` declaration: the brand's own name
/// intersected with the underlying representation.
#[derive(Debug, Clone, Serialize)]
pub struct BrandedType {
    pub brand: SpannedName,
    pub underlying: Box<Type>,
    pub span: Span,
}

/// A type-constructor parameter as written in a typeclass header, e.g.
/// `F<out A>`. Only valid in that position; reaching the emitter anywhere
/// else is a generation error.
#[derive(Debug, Clone, Serialize)]
pub struct HigherKindedType {
    pub name: SpannedName,
    pub params: Vec<TypeParam>,
    pub span: Span,
}
