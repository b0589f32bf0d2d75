use crate::lexer::TokenKind;
use crate::span::{merge_span, Span};
use crate::syntax;
use crate::CompileError;

use super::ast::{
    ArrayType, BuiltinType, FunctionType, HigherKindedType, MapType, NamedField, RecordType,
    SetType, TupleType, Type, TypeReference,
};
use super::Parser;

impl Parser {
    pub(super) fn parse_type(&mut self) -> Result<Type, CompileError> {
        let Some(token) = self.current() else {
            return Err(self.error_expected("a type"));
        };
        match token.kind {
            TokenKind::OpenAngle => {
                let (type_params, params_span) = self.parse_type_params()?;
                self.skip_trivia();
                self.parse_function_type(type_params, params_span)
            }
            TokenKind::OpenParen => {
                if self.is_function_type_ahead() {
                    let start = token.span;
                    self.parse_function_type(Vec::new(), start)
                } else {
                    self.expect(TokenKind::OpenParen)?;
                    self.skip_trivia();
                    let inner = self.parse_type()?;
                    self.skip_trivia();
                    self.expect(TokenKind::CloseParen)?;
                    Ok(inner)
                }
            }
            TokenKind::OpenBracket => self.parse_tuple_type(),
            TokenKind::OpenBrace => self.parse_record_type(),
            TokenKind::Identifier => self.parse_named_type(),
            _ => Err(self.error_expected("a type")),
        }
    }

    /// `(` starts either a function type or a parenthesised type. Function
    /// parameters are always named, so `()` and `( ident :` mean function.
    fn is_function_type_ahead(&self) -> bool {
        match self.peek_significant(1).map(|t| t.kind) {
            Some(TokenKind::CloseParen) => true,
            Some(TokenKind::Identifier) => self
                .peek_significant(2)
                .is_some_and(|t| t.kind == TokenKind::Colon),
            _ => false,
        }
    }

    /// `( name: type, ... ) => type`, optionally preceded by a `<...>` type
    /// parameter list consumed by the caller.
    fn parse_function_type(
        &mut self,
        type_params: Vec<super::ast::TypeParam>,
        start: Span,
    ) -> Result<Type, CompileError> {
        self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        loop {
            self.skip_trivia();
            if params.is_empty() && self.check(TokenKind::CloseParen) {
                break;
            }
            let name = self.expect_identifier()?;
            self.skip_trivia();
            self.expect(TokenKind::Colon)?;
            self.skip_trivia();
            let ty = self.parse_type()?;
            params.push(NamedField {
                span: merge_span(name.span, ty.span()),
                name,
                ty,
            });
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        self.expect(TokenKind::CloseParen)?;
        self.skip_trivia();
        self.expect(TokenKind::Arrow)?;
        self.skip_trivia();
        let return_type = self.parse_type()?;
        Ok(Type::Function(FunctionType {
            span: merge_span(start, return_type.span()),
            type_params,
            params,
            return_type: Box::new(return_type),
        }))
    }

    /// `[ type, ..., ...rest ]` — a spread element is only legal in final
    /// position.
    fn parse_tuple_type(&mut self) -> Result<Type, CompileError> {
        let open = self.expect(TokenKind::OpenBracket)?;
        let mut elements = Vec::new();
        let mut rest = None;
        loop {
            self.skip_trivia();
            if self.check(TokenKind::CloseBracket) {
                break;
            }
            if self.consume_if(TokenKind::Spread).is_some() {
                let ty = self.parse_type()?;
                rest = Some(Box::new(ty));
                self.skip_trivia();
                break;
            }
            elements.push(self.parse_type()?);
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        let close = self.expect(TokenKind::CloseBracket)?;
        Ok(Type::Tuple(TupleType {
            span: merge_span(open.span, close.span),
            elements,
            rest,
        }))
    }

    /// `{ name: type, ... }`.
    fn parse_record_type(&mut self) -> Result<Type, CompileError> {
        let open = self.expect(TokenKind::OpenBrace)?;
        let mut fields = Vec::new();
        loop {
            self.skip_trivia();
            if self.check(TokenKind::CloseBrace) {
                break;
            }
            let name = self.expect_identifier()?;
            self.skip_trivia();
            self.expect(TokenKind::Colon)?;
            self.skip_trivia();
            let ty = self.parse_type()?;
            fields.push(NamedField {
                span: merge_span(name.span, ty.span()),
                name,
                ty,
            });
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        let close = self.expect(TokenKind::CloseBrace)?;
        Ok(Type::Record(RecordType {
            span: merge_span(open.span, close.span),
            fields,
        }))
    }

    /// Identifier head: a builtin scalar, one of the container forms
    /// (`Array`, `Map`, `Set`), or a plain reference with optional arguments.
    fn parse_named_type(&mut self) -> Result<Type, CompileError> {
        let name = self.expect_identifier()?;
        if syntax::is_builtin_type(&name.name) {
            return Ok(Type::Builtin(BuiltinType {
                span: name.span,
                name: name.name,
            }));
        }

        let (type_arguments, end) = if self.check(TokenKind::OpenAngle) {
            let (args, close) = self.parse_type_arguments()?;
            (args, close)
        } else {
            (Vec::new(), name.span)
        };
        let span = merge_span(name.span, end);

        match name.name.as_str() {
            "Array" => {
                let mut args = type_arguments;
                if args.len() != 1 {
                    return Err(self.error_expected("one type argument for 'Array'"));
                }
                Ok(Type::Array(ArrayType {
                    element: Box::new(args.remove(0)),
                    span,
                }))
            }
            "Set" => {
                let mut args = type_arguments;
                if args.len() != 1 {
                    return Err(self.error_expected("one type argument for 'Set'"));
                }
                Ok(Type::Set(SetType {
                    element: Box::new(args.remove(0)),
                    span,
                }))
            }
            "Map" => {
                let mut args = type_arguments;
                if args.len() != 2 {
                    return Err(self.error_expected("two type arguments for 'Map'"));
                }
                let key = args.remove(0);
                let value = args.remove(0);
                Ok(Type::Map(MapType {
                    key: Box::new(key),
                    value: Box::new(value),
                    span,
                }))
            }
            _ => Ok(Type::Reference(TypeReference {
                name,
                type_arguments,
                span,
            })),
        }
    }

    /// `< type, ... >`; returns the arguments and the span of the closing `>`.
    fn parse_type_arguments(&mut self) -> Result<(Vec<Type>, Span), CompileError> {
        self.expect(TokenKind::OpenAngle)?;
        let mut args = Vec::new();
        loop {
            self.skip_trivia();
            args.push(self.parse_type()?);
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        let close = self.expect(TokenKind::CloseAngle)?;
        Ok((args, close.span))
    }

    /// A reference used as a class head: `Name` or `Name<Args>`.
    pub(super) fn parse_type_reference(&mut self) -> Result<TypeReference, CompileError> {
        let name = self.expect_identifier()?;
        let (type_arguments, end) = if self.check(TokenKind::OpenAngle) {
            self.parse_type_arguments()?
        } else {
            (Vec::new(), name.span)
        };
        Ok(TypeReference {
            span: merge_span(name.span, end),
            name,
            type_arguments,
        })
    }

    /// Typeclass header parameters: `F<out A>` introduces a higher-kinded
    /// parameter, a bare name is an ordinary reference.
    pub(super) fn parse_class_params(&mut self) -> Result<Vec<Type>, CompileError> {
        self.expect(TokenKind::OpenAngle)?;
        let mut params = Vec::new();
        loop {
            self.skip_trivia();
            let name = self.expect_identifier()?;
            if self.check(TokenKind::OpenAngle) {
                let (nested, list_span) = self.parse_type_params()?;
                params.push(Type::HigherKinded(HigherKindedType {
                    span: merge_span(name.span, list_span),
                    name,
                    params: nested,
                }));
            } else {
                params.push(Type::Reference(TypeReference {
                    span: name.span,
                    name,
                    type_arguments: Vec::new(),
                }));
            }
            self.skip_trivia();
            if self.consume_if(TokenKind::Comma).is_some() {
                continue;
            }
            break;
        }
        self.expect(TokenKind::CloseAngle)?;
        Ok(params)
    }
}
