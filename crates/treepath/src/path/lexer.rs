//! Lexer for the path query language.
//!
//! Produces span-based tokens without storing text - text is sliced from
//! source only when needed.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive unrecognized characters into single
//! `Garbage` tokens rather than producing one error per character, so the
//! step parser can report a whole bad fragment at once. An unterminated
//! literal is lexed as its own kind for the same reason: the parser can
//! then name the construct instead of reporting opaque garbage.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

/// All token kinds of the path language.
///
/// `//` wins over two `/` by longest match; a complete literal wins over
/// the unterminated prefix the same way.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Descendant axis marker.
    #[token("//")]
    SlashSlash,

    /// Child axis marker.
    #[token("/")]
    Slash,

    /// Wildcard spec.
    #[token("*")]
    Star,

    /// Negation prefix.
    #[token("!")]
    Bang,

    /// Bare identifier naming a rule or token type.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,

    /// Single-quoted token text, no escape processing.
    #[regex(r"'[^']*'")]
    Literal,

    /// Opening quote that never closes. Lexed explicitly so the error
    /// message can name the construct.
    #[regex(r"'[^']*")]
    UnterminatedLiteral,

    /// Consecutive unrecognized characters coalesced into one token.
    Garbage,
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes a query into a vector of span-based tokens.
///
/// Post-processes the Logos output to coalesce consecutive lexer errors
/// into single `Garbage` tokens.
pub fn lex(query: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(query);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                // Flush accumulated error span before emitting valid token
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }

                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                // Accumulate error span; flushed on next valid token or EOF
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..query.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(query: &'q str, token: &Token) -> &'q str {
    &query[Range::<usize>::from(token.span)]
}
