pub mod ast;

mod declarations;
mod types;

#[cfg(test)]
mod tests;

use crate::lexer::{tokenize, Token, TokenKind};
use crate::span::{merge_span, Span};
use crate::CompileError;

use ast::{CommentStatement, SourceFile, SpannedName, Statement};

/// Parse one source file into a spanned AST. Tokenizes first; any lex or
/// parse failure aborts the whole file.
pub fn parse(file_name: &str, source: &str) -> Result<SourceFile, CompileError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    parser.parse_source_file(file_name, source)
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn parse_source_file(
        &mut self,
        file_name: &str,
        source: &str,
    ) -> Result<SourceFile, CompileError> {
        let mut statements = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(token) = self.current() else {
                break;
            };
            if token.kind == TokenKind::Comment {
                let comment = CommentStatement {
                    text: token.text.clone(),
                    span: token.span,
                };
                self.pos += 1;
                statements.push(Statement::Comment(comment));
                continue;
            }
            statements.push(self.parse_statement()?);
        }

        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => merge_span(first.span(), last.span()),
            _ => Span::empty(),
        };

        Ok(SourceFile {
            file_name: file_name.to_string(),
            source: source.to_string(),
            statements,
            span,
        })
    }

    fn parse_statement(&mut self) -> Result<Statement, CompileError> {
        let Some(token) = self.current() else {
            return Err(self.error_expected("a declaration"));
        };
        match token.kind {
            TokenKind::Data => self.parse_data_declaration().map(Statement::Data),
            TokenKind::Type => self.parse_type_alias_declaration().map(Statement::TypeAlias),
            TokenKind::Brand => self.parse_brand_declaration().map(Statement::Brand),
            TokenKind::Function => self.parse_function_declaration().map(Statement::Function),
            TokenKind::Const => self.parse_variable_declaration().map(Statement::Variable),
            TokenKind::Typeclass => self.parse_typeclass_declaration().map(Statement::TypeClass),
            TokenKind::Instance => self.parse_instance_declaration().map(Statement::Instance),
            TokenKind::Import => self.parse_import_declaration().map(Statement::Import),
            _ => Err(self.error_expected("a declaration")),
        }
    }

    // Token cursor. Whitespace is never skipped implicitly; the grammar
    // methods call `skip_trivia` at the points where a gap is legal, so node
    // spans stay tight around significant tokens.

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// The next significant token after `offset` more significant tokens,
    /// ignoring whitespace and comments. This is the bounded lookahead the
    /// grammar needs for named-vs-positional fields and optional clauses.
    fn peek_significant(&self, mut offset: usize) -> Option<&Token> {
        let mut index = self.pos;
        loop {
            let token = self.tokens.get(index)?;
            if matches!(token.kind, TokenKind::Whitespace | TokenKind::Comment) {
                index += 1;
                continue;
            }
            if offset == 0 {
                return Some(token);
            }
            offset -= 1;
            index += 1;
        }
    }

    /// Skip whitespace only. Used at statement boundaries, where comments are
    /// statements in their own right.
    fn skip_whitespace(&mut self) {
        while matches!(self.current().map(|t| t.kind), Some(TokenKind::Whitespace)) {
            self.pos += 1;
        }
    }

    /// Skip whitespace and comments inside a construct.
    fn skip_trivia(&mut self) {
        while matches!(
            self.current().map(|t| t.kind),
            Some(TokenKind::Whitespace | TokenKind::Comment)
        ) {
            self.pos += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    fn consume_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            let token = self.tokens[self.pos].clone();
            self.pos += 1;
            return Some(token);
        }
        None
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        match self.consume_if(kind) {
            Some(token) => Ok(token),
            None => Err(self.error_expected(kind.describe())),
        }
    }

    fn expect_identifier(&mut self) -> Result<SpannedName, CompileError> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(SpannedName {
            name: token.text,
            span: token.span,
        })
    }

    fn error_expected(&self, expected: &str) -> CompileError {
        match self.current() {
            Some(token) => CompileError::Parse {
                expected: expected.to_string(),
                found: describe_token(token),
                line: token.span.start.line,
                column: token.span.start.column,
            },
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.span.end)
                    .unwrap_or_else(crate::span::SpanLocation::start);
                CompileError::Parse {
                    expected: expected.to_string(),
                    found: "end of input".to_string(),
                    line: end.line,
                    column: end.column,
                }
            }
        }
    }
}

fn describe_token(token: &Token) -> String {
    match token.kind {
        TokenKind::Identifier | TokenKind::Number | TokenKind::String => {
            format!("{} '{}'", token.kind.describe(), token.text)
        }
        _ => token.kind.describe().to_string(),
    }
}
