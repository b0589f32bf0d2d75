use serde::Serialize;

use crate::span::{Span, SpanLocation};
use crate::syntax;
use crate::CompileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // Keywords
    Data,
    Type,
    Brand,
    Function,
    Const,
    Typeclass,
    Instance,
    Import,
    From,
    In,
    Out,
    Extends,
    As,
    // Punctuation
    OpenAngle,
    CloseAngle,
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    Equals,
    Pipe,
    Arrow,
    Dot,
    Star,
    Spread,
    // Literals and trivia
    Identifier,
    Number,
    String,
    Whitespace,
    Comment,
}

impl TokenKind {
    /// Stable label used in parse errors, matching the surface syntax.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Data => "'data'",
            TokenKind::Type => "'type'",
            TokenKind::Brand => "'brand'",
            TokenKind::Function => "'function'",
            TokenKind::Const => "'const'",
            TokenKind::Typeclass => "'typeclass'",
            TokenKind::Instance => "'instance'",
            TokenKind::Import => "'import'",
            TokenKind::From => "'from'",
            TokenKind::In => "'in'",
            TokenKind::Out => "'out'",
            TokenKind::Extends => "'extends'",
            TokenKind::As => "'as'",
            TokenKind::OpenAngle => "'<'",
            TokenKind::CloseAngle => "'>'",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::OpenBrace => "'{'",
            TokenKind::CloseBrace => "'}'",
            TokenKind::OpenBracket => "'['",
            TokenKind::CloseBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Equals => "'='",
            TokenKind::Pipe => "'|'",
            TokenKind::Arrow => "'=>'",
            TokenKind::Dot => "'.'",
            TokenKind::Star => "'*'",
            TokenKind::Spread => "'...'",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string literal",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

/// Single left-to-right scan over the input. Whitespace and comments are
/// captured as their own tokens so the parser can account for every
/// inter-token gap when computing spans.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut cursor = SpanLocation::start();
    let mut index = 0usize;

    while index < chars.len() {
        let ch = chars[index];

        if ch.is_whitespace() {
            let start = cursor;
            let from = index;
            while index < chars.len() && chars[index].is_whitespace() {
                cursor.advance(chars[index]);
                index += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Whitespace,
                text: chars[from..index].iter().collect(),
                span: Span::new(start, cursor),
            });
            continue;
        }

        if ch == '/' && chars.get(index + 1) == Some(&'/') {
            let start = cursor;
            let from = index;
            while index < chars.len() && chars[index] != '\n' {
                cursor.advance(chars[index]);
                index += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Comment,
                text: chars[from..index].iter().collect(),
                span: Span::new(start, cursor),
            });
            continue;
        }

        if ch == '"' {
            let start = cursor;
            let from = index;
            cursor.advance(ch);
            index += 1;
            let mut closed = false;
            while index < chars.len() {
                let next = chars[index];
                cursor.advance(next);
                index += 1;
                if next == '"' {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(CompileError::Lex {
                    character: '"',
                    line: start.line,
                    column: start.column,
                });
            }
            tokens.push(Token {
                kind: TokenKind::String,
                text: chars[from..index].iter().collect(),
                span: Span::new(start, cursor),
            });
            continue;
        }

        if ch.is_ascii_digit() {
            let start = cursor;
            let from = index;
            while index < chars.len() && chars[index].is_ascii_digit() {
                cursor.advance(chars[index]);
                index += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Number,
                text: chars[from..index].iter().collect(),
                span: Span::new(start, cursor),
            });
            continue;
        }

        if syntax::is_ident_start(ch) {
            if let Some((keyword, kind)) = match_keyword(&chars, index) {
                let start = cursor;
                for _ in 0..keyword.len() {
                    cursor.advance(chars[index]);
                    index += 1;
                }
                tokens.push(Token {
                    kind,
                    text: keyword.to_string(),
                    span: Span::new(start, cursor),
                });
                continue;
            }

            let start = cursor;
            let from = index;
            while index < chars.len() && syntax::is_ident_continue(chars[index]) {
                cursor.advance(chars[index]);
                index += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Identifier,
                text: chars[from..index].iter().collect(),
                span: Span::new(start, cursor),
            });
            continue;
        }

        if let Some((text, kind, len)) = match_symbol(&chars, index) {
            let start = cursor;
            for _ in 0..len {
                cursor.advance(chars[index]);
                index += 1;
            }
            tokens.push(Token {
                kind,
                text,
                span: Span::new(start, cursor),
            });
            continue;
        }

        return Err(CompileError::Lex {
            character: ch,
            line: cursor.line,
            column: cursor.column,
        });
    }

    Ok(tokens)
}

/// Fixed-length lookahead: probe each keyword slice longest-first, and only
/// accept when the keyword is not a prefix of a longer identifier.
fn match_keyword(chars: &[char], index: usize) -> Option<(&'static str, TokenKind)> {
    for (keyword, kind) in syntax::KEYWORDS {
        let len = keyword.len();
        if index + len > chars.len() {
            continue;
        }
        if !chars[index..index + len]
            .iter()
            .zip(keyword.chars())
            .all(|(a, b)| *a == b)
        {
            continue;
        }
        if let Some(next) = chars.get(index + len) {
            if syntax::is_ident_continue(*next) {
                continue;
            }
        }
        return Some((*keyword, *kind));
    }
    None
}

fn match_symbol(chars: &[char], index: usize) -> Option<(String, TokenKind, usize)> {
    if index + 2 < chars.len() {
        for (needle, kind) in syntax::SYMBOLS_3 {
            if chars[index] == needle[0]
                && chars[index + 1] == needle[1]
                && chars[index + 2] == needle[2]
            {
                return Some((needle.iter().collect(), *kind, 3));
            }
        }
    }

    if index + 1 < chars.len() {
        for (needle, kind) in syntax::SYMBOLS_2 {
            if chars[index] == needle[0] && chars[index + 1] == needle[1] {
                return Some((needle.iter().collect(), *kind, 2));
            }
        }
    }

    let ch = chars[index];
    for (needle, kind) in syntax::SYMBOLS_1 {
        if ch == *needle {
            return Some((ch.to_string(), *kind, 1));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_data_declaration_with_whitespace_tokens() {
        let tokens = tokenize("data Maybe<A> = Nothing | Just(value: A)").expect("tokenize");
        let significant: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        assert_eq!(significant[0].kind, TokenKind::Data);
        assert_eq!(significant[1].text, "Maybe");
        assert_eq!(significant[2].kind, TokenKind::OpenAngle);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Whitespace));
    }

    #[test]
    fn keyword_prefix_of_identifier_is_an_identifier() {
        assert_eq!(kinds("database"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("inX"), vec![TokenKind::Identifier]);
        assert_eq!(
            kinds("in x"),
            vec![TokenKind::In, TokenKind::Whitespace, TokenKind::Identifier]
        );
    }

    #[test]
    fn spans_advance_across_newlines() {
        let tokens = tokenize("data X\ndata Y").expect("tokenize");
        let last = tokens.last().expect("token");
        assert_eq!(last.span.start.line, 2);
        assert_eq!(last.span.start.column, 5);
        assert_eq!(last.span.end.column, 6);
    }

    #[test]
    fn arrow_wins_over_equals() {
        assert_eq!(kinds("=>"), vec![TokenKind::Arrow]);
        assert_eq!(kinds("="), vec![TokenKind::Equals]);
        assert_eq!(kinds("..."), vec![TokenKind::Spread]);
    }

    #[test]
    fn string_literal_has_no_escape_processing() {
        let tokens = tokenize("\"a\\\"").expect("tokenize");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "\"a\\\"");
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let tokens = tokenize("// hello\ndata X").expect("tokenize");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "// hello");
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    }

    #[test]
    fn unexpected_character_is_fatal() {
        let err = tokenize("data X = #").expect_err("lex error");
        match err {
            CompileError::Lex {
                character,
                line,
                column,
            } => {
                assert_eq!(character, '#');
                assert_eq!(line, 1);
                assert_eq!(column, 9);
            }
            other => panic!("expected lex error, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_string_is_fatal_at_the_open_quote() {
        let err = tokenize("const x: \"abc").expect_err("lex error");
        match err {
            CompileError::Lex { line, column, .. } => {
                assert_eq!(line, 1);
                assert_eq!(column, 9);
            }
            other => panic!("expected lex error, got {other:?}"),
        }
    }
}
