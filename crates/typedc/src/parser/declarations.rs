use crate::lexer::TokenKind;
use crate::span::merge_span;
use crate::CompileError;

use super::ast::{
    BrandDeclaration, BrandedType, ClassMember, DataConstructor, DataDeclaration, Field,
    FunctionDeclaration, ImportClause, ImportDeclaration, ImportSpecifier, InstanceDeclaration,
    NamedField, PositionalField, RecordConstructor, SpannedName, TupleConstructor,
    TypeAliasDeclaration, TypeClassDeclaration, TypeParam, Variance, VariableDeclaration,
    VoidConstructor,
};
use super::Parser;

impl Parser {
    pub(super) fn parse_data_declaration(&mut self) -> Result<DataDeclaration, CompileError> {
        let keyword = self.expect(TokenKind::Data)?;
        self.skip_trivia();
        let name = self.expect_identifier()?;
        self.skip_trivia();
        let type_params = if self.check(TokenKind::OpenAngle) {
            self.parse_type_params()?.0
        } else {
            Vec::new()
        };
        self.skip_trivia();
        self.expect(TokenKind::Equals)?;
        self.skip_trivia();

        let mut constructors = vec![self.parse_constructor()?];
        loop {
            self.skip_trivia();
            if self.consume_if(TokenKind::Pipe).is_none() {
                break;
            }
            self.skip_trivia();
            constructors.push(self.parse_constructor()?);
        }

        let end = constructors
            .last()
            .map(|ctor| ctor.span())
            .unwrap_or(name.span);
        Ok(DataDeclaration {
            name,
            type_params,
            constructors,
            span: merge_span(keyword.span, end),
        })
    }

    /// `<` param `,` ... `>`; each parameter is an optional variance marker,
    /// a name, and an optional `extends` constraint. Returns the parameters
    /// together with the span of the whole angle-bracketed list.
    pub(super) fn parse_type_params(
        &mut self,
    ) -> Result<(Vec<TypeParam>, crate::span::Span), CompileError> {
        let open = self.expect(TokenKind::OpenAngle)?;
        let mut params = Vec::new();
        loop {
            self.skip_trivia();
            params.push(self.parse_type_param()?);
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        let close = self.expect(TokenKind::CloseAngle)?;
        Ok((params, merge_span(open.span, close.span)))
    }

    fn parse_type_param(&mut self) -> Result<TypeParam, CompileError> {
        let mut start_span = None;
        let variance = if let Some(token) = self.consume_if(TokenKind::In) {
            start_span = Some(token.span);
            self.skip_trivia();
            if self.consume_if(TokenKind::Out).is_some() {
                Some(Variance::InOut)
            } else {
                Some(Variance::In)
            }
        } else if let Some(token) = self.consume_if(TokenKind::Out) {
            start_span = Some(token.span);
            Some(Variance::Out)
        } else {
            None
        };
        self.skip_trivia();
        let name = self.expect_identifier()?;
        let mut end_span = name.span;

        let constraint = if self
            .peek_significant(0)
            .is_some_and(|t| t.kind == TokenKind::Extends)
        {
            self.skip_trivia();
            self.expect(TokenKind::Extends)?;
            self.skip_trivia();
            let ty = self.parse_type()?;
            end_span = ty.span();
            Some(ty)
        } else {
            None
        };

        Ok(TypeParam {
            variance,
            span: merge_span(start_span.unwrap_or(name.span), end_span),
            name,
            constraint,
        })
    }

    /// Constructor shape is decided by the token following the name:
    /// `{` record, `(` tuple, anything else void. In declaration position
    /// neither brace can start anything but a payload, so the peek safely
    /// looks past intervening whitespace.
    fn parse_constructor(&mut self) -> Result<DataConstructor, CompileError> {
        if !self.check(TokenKind::Identifier) {
            return Err(self.error_expected("a constructor name"));
        }
        let name = self.expect_identifier()?;
        match self.peek_significant(0).map(|t| t.kind) {
            Some(TokenKind::OpenBrace) => {
                self.skip_trivia();
                let (fields, end) = self.parse_record_fields()?;
                Ok(DataConstructor::Record(RecordConstructor {
                    span: merge_span(name.span, end),
                    name,
                    fields,
                }))
            }
            Some(TokenKind::OpenParen) => {
                self.skip_trivia();
                let (fields, end) = self.parse_tuple_fields()?;
                Ok(DataConstructor::Tuple(TupleConstructor {
                    span: merge_span(name.span, end),
                    name,
                    fields,
                }))
            }
            _ => Ok(DataConstructor::Void(VoidConstructor {
                span: name.span,
                name,
            })),
        }
    }

    /// `( field, ... )` — a field is `name: type`, or a bare type which
    /// becomes positional. One significant token of lookahead past the
    /// identifier decides which.
    fn parse_tuple_fields(&mut self) -> Result<(Vec<Field>, crate::span::Span), CompileError> {
        self.expect(TokenKind::OpenParen)?;
        let mut fields = Vec::new();
        let mut index = 0usize;
        loop {
            self.skip_trivia();
            if fields.is_empty() && self.check(TokenKind::CloseParen) {
                return Err(self.error_expected("a field"));
            }
            if self.check(TokenKind::Identifier)
                && self
                    .peek_significant(1)
                    .is_some_and(|t| t.kind == TokenKind::Colon)
            {
                let name = self.expect_identifier()?;
                self.skip_trivia();
                self.expect(TokenKind::Colon)?;
                self.skip_trivia();
                let ty = self.parse_type()?;
                fields.push(Field::Named(NamedField {
                    span: merge_span(name.span, ty.span()),
                    name,
                    ty,
                }));
            } else {
                let ty = self.parse_type()?;
                fields.push(Field::Positional(PositionalField {
                    index,
                    span: ty.span(),
                    ty,
                }));
            }
            index += 1;
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        let close = self.expect(TokenKind::CloseParen)?;
        Ok((fields, close.span))
    }

    /// `{ name: type, ... }` — record fields are always named.
    fn parse_record_fields(&mut self) -> Result<(Vec<Field>, crate::span::Span), CompileError> {
        self.expect(TokenKind::OpenBrace)?;
        let mut fields = Vec::new();
        loop {
            self.skip_trivia();
            if fields.is_empty() && self.check(TokenKind::CloseBrace) {
                return Err(self.error_expected("a field"));
            }
            let name = self.expect_identifier()?;
            self.skip_trivia();
            self.expect(TokenKind::Colon)?;
            self.skip_trivia();
            let ty = self.parse_type()?;
            fields.push(Field::Named(NamedField {
                span: merge_span(name.span, ty.span()),
                name,
                ty,
            }));
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        let close = self.expect(TokenKind::CloseBrace)?;
        Ok((fields, close.span))
    }

    pub(super) fn parse_type_alias_declaration(
        &mut self,
    ) -> Result<TypeAliasDeclaration, CompileError> {
        let keyword = self.expect(TokenKind::Type)?;
        self.skip_trivia();
        let name = self.expect_identifier()?;
        self.skip_trivia();
        let type_params = if self.check(TokenKind::OpenAngle) {
            self.parse_type_params()?.0
        } else {
            Vec::new()
        };
        self.skip_trivia();
        self.expect(TokenKind::Equals)?;
        self.skip_trivia();
        let ty = self.parse_type()?;
        Ok(TypeAliasDeclaration {
            span: merge_span(keyword.span, ty.span()),
            name,
            type_params,
            ty,
        })
    }

    pub(super) fn parse_brand_declaration(&mut self) -> Result<BrandDeclaration, CompileError> {
        let keyword = self.expect(TokenKind::Brand)?;
        self.skip_trivia();
        let name = self.expect_identifier()?;
        self.skip_trivia();
        self.expect(TokenKind::Equals)?;
        self.skip_trivia();
        let underlying = self.parse_type()?;
        let ty = BrandedType {
            brand: name.clone(),
            span: merge_span(name.span, underlying.span()),
            underlying: Box::new(underlying),
        };
        Ok(BrandDeclaration {
            span: merge_span(keyword.span, ty.span),
            name,
            ty,
        })
    }

    pub(super) fn parse_function_declaration(
        &mut self,
    ) -> Result<FunctionDeclaration, CompileError> {
        let keyword = self.expect(TokenKind::Function)?;
        self.skip_trivia();
        let name = self.expect_identifier()?;
        self.skip_trivia();
        let type_params = if self.check(TokenKind::OpenAngle) {
            self.parse_type_params()?.0
        } else {
            Vec::new()
        };
        self.skip_trivia();
        self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        loop {
            self.skip_trivia();
            if params.is_empty() && self.check(TokenKind::CloseParen) {
                break;
            }
            let param_name = self.expect_identifier()?;
            self.skip_trivia();
            self.expect(TokenKind::Colon)?;
            self.skip_trivia();
            let ty = self.parse_type()?;
            params.push(NamedField {
                span: merge_span(param_name.span, ty.span()),
                name: param_name,
                ty,
            });
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        let close = self.expect(TokenKind::CloseParen)?;
        let mut end = close.span;

        let return_type = if self
            .peek_significant(0)
            .is_some_and(|t| t.kind == TokenKind::Colon)
        {
            self.skip_trivia();
            self.expect(TokenKind::Colon)?;
            self.skip_trivia();
            let ty = self.parse_type()?;
            end = ty.span();
            Some(ty)
        } else {
            None
        };

        Ok(FunctionDeclaration {
            span: merge_span(keyword.span, end),
            name,
            type_params,
            params,
            return_type,
        })
    }

    pub(super) fn parse_variable_declaration(
        &mut self,
    ) -> Result<VariableDeclaration, CompileError> {
        let keyword = self.expect(TokenKind::Const)?;
        self.skip_trivia();
        let name = self.expect_identifier()?;
        self.skip_trivia();
        self.expect(TokenKind::Colon)?;
        self.skip_trivia();
        let ty = self.parse_type()?;
        Ok(VariableDeclaration {
            span: merge_span(keyword.span, ty.span()),
            name,
            ty,
        })
    }

    pub(super) fn parse_typeclass_declaration(
        &mut self,
    ) -> Result<TypeClassDeclaration, CompileError> {
        let keyword = self.expect(TokenKind::Typeclass)?;
        self.skip_trivia();
        let name = self.expect_identifier()?;
        self.skip_trivia();
        let params = if self.check(TokenKind::OpenAngle) {
            self.parse_class_params()?
        } else {
            Vec::new()
        };
        self.skip_trivia();
        self.expect(TokenKind::OpenBrace)?;

        let mut members = Vec::new();
        loop {
            self.skip_trivia();
            if self.check(TokenKind::CloseBrace) {
                break;
            }
            let member_name = self.expect_identifier()?;
            self.skip_trivia();
            self.expect(TokenKind::Colon)?;
            self.skip_trivia();
            let ty = self.parse_type()?;
            members.push(ClassMember {
                span: merge_span(member_name.span, ty.span()),
                name: member_name,
                ty,
            });
            self.skip_trivia();
            self.consume_if(TokenKind::Comma);
        }
        let close = self.expect(TokenKind::CloseBrace)?;

        Ok(TypeClassDeclaration {
            span: merge_span(keyword.span, close.span),
            name,
            params,
            members,
        })
    }

    pub(super) fn parse_instance_declaration(
        &mut self,
    ) -> Result<InstanceDeclaration, CompileError> {
        let keyword = self.expect(TokenKind::Instance)?;
        self.skip_trivia();
        let name = self.expect_identifier()?;
        self.skip_trivia();
        self.expect(TokenKind::Colon)?;
        self.skip_trivia();
        let class = self.parse_type_reference()?;
        Ok(InstanceDeclaration {
            span: merge_span(keyword.span, class.span),
            name,
            class,
        })
    }

    pub(super) fn parse_import_declaration(&mut self) -> Result<ImportDeclaration, CompileError> {
        let keyword = self.expect(TokenKind::Import)?;
        self.skip_trivia();

        let clause = if self.check(TokenKind::Star) {
            self.expect(TokenKind::Star)?;
            self.skip_trivia();
            self.expect(TokenKind::As)?;
            self.skip_trivia();
            let name = self.expect_identifier()?;
            ImportClause::Namespace(name)
        } else {
            self.expect(TokenKind::OpenBrace)?;
            let mut specifiers = Vec::new();
            loop {
                self.skip_trivia();
                if specifiers.is_empty() && self.check(TokenKind::CloseBrace) {
                    break;
                }
                let imported = self.expect_identifier()?;
                let mut spec_end = imported.span;
                let alias = if self
                    .peek_significant(0)
                    .is_some_and(|t| t.kind == TokenKind::As)
                {
                    self.skip_trivia();
                    self.expect(TokenKind::As)?;
                    self.skip_trivia();
                    let alias = self.expect_identifier()?;
                    spec_end = alias.span;
                    Some(alias)
                } else {
                    None
                };
                specifiers.push(ImportSpecifier {
                    span: merge_span(imported.span, spec_end),
                    name: imported,
                    alias,
                });
                self.skip_trivia();
                if self.consume_if(TokenKind::Comma).is_some() {
                    continue;
                }
                break;
            }
            self.expect(TokenKind::CloseBrace)?;
            ImportClause::Named(specifiers)
        };

        self.skip_trivia();
        self.expect(TokenKind::From)?;
        self.skip_trivia();
        let module = self.expect(TokenKind::String)?;
        let specifier = SpannedName {
            name: module.text.trim_matches('"').to_string(),
            span: module.span,
        };

        Ok(ImportDeclaration {
            span: merge_span(keyword.span, module.span),
            clause,
            specifier,
        })
    }
}
