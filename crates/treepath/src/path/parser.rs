//! Step parser: splits the token stream into raw path steps.
//!
//! # Grammar (EBNF-ish)
//!
//! ```text
//! query   = step+
//! step    = axis spec
//! axis    = "/" | "//"
//! spec    = "*" | IDENT | LITERAL | "!" spec
//! ```
//!
//! `!` nests: `!!foo` is a doubly negated spec. The parsed steps are
//! still unresolved: `spec` carries names and literal text as borrowed
//! slices of the query; [`crate::compile`] turns them into matchers.

use rowan::{TextRange, TextSize};

use super::lexer::{Token, TokenKind, lex, token_text};
use crate::{Error, Result};

/// Traversal relation of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Immediate children of the context node.
    Child,
    /// All nodes at any depth below the context node, excluding it.
    Descendant,
}

/// Unresolved step spec, before registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSpec<'q> {
    Wildcard,
    /// Bare identifier; rule or token name, decided at compile time.
    Name(&'q str),
    /// Quoted token text with the quotes stripped.
    Literal(&'q str),
    Not(Box<RawSpec<'q>>),
}

/// One `/spec` or `//spec` segment with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStep<'q> {
    pub axis: Axis,
    pub spec: RawSpec<'q>,
    /// Whole step, axis included.
    pub span: TextRange,
    /// Just the spec, for name-resolution diagnostics.
    pub spec_span: TextRange,
}

/// Split a query string into raw steps.
///
/// Pure function of the input: no registry involvement yet. Fails with
/// [`Error::EmptyQuery`] on input with no tokens at all, and
/// [`Error::MalformedQuery`] on any violation of the step grammar.
pub fn parse(query: &str) -> Result<Vec<RawStep<'_>>> {
    let tokens = lex(query);
    if tokens.is_empty() {
        return Err(Error::EmptyQuery);
    }

    let mut parser = Parser {
        query,
        tokens,
        pos: 0,
    };

    let mut steps = Vec::new();
    while !parser.at_end() {
        steps.push(parser.parse_step()?);
    }
    Ok(steps)
}

struct Parser<'q> {
    query: &'q str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'q> Parser<'q> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    /// Error anchored at a token.
    fn malformed(&self, message: &str, token: Token) -> Error {
        Error::MalformedQuery {
            message: message.to_string(),
            fragment: token_text(self.query, &token).to_string(),
            span: token.span,
        }
    }

    /// Error at end of input, with an empty fragment.
    fn malformed_at_end(&self, message: &str) -> Error {
        let end = TextSize::of(self.query);
        Error::MalformedQuery {
            message: message.to_string(),
            fragment: String::new(),
            span: TextRange::empty(end),
        }
    }

    fn parse_step(&mut self) -> Result<RawStep<'q>> {
        let token = self.tokens[self.pos];
        let axis = match token.kind {
            TokenKind::Slash => Axis::Child,
            TokenKind::SlashSlash => Axis::Descendant,
            TokenKind::Garbage => {
                return Err(self.malformed("unrecognized characters in query", token));
            }
            _ => {
                return Err(self.malformed("expected `/` or `//` before step", token));
            }
        };
        self.pos += 1;

        let spec_start = self
            .peek()
            .map(|t| t.span.start())
            .unwrap_or_else(|| TextSize::of(self.query));
        let spec = self.parse_spec("after the axis")?;
        let end = self.tokens[self.pos - 1].span.end();
        Ok(RawStep {
            axis,
            spec,
            span: TextRange::new(token.span.start(), end),
            spec_span: TextRange::new(spec_start, end),
        })
    }

    fn parse_spec(&mut self, context: &str) -> Result<RawSpec<'q>> {
        let Some(token) = self.peek() else {
            return Err(self.malformed_at_end(&format!(
                "expected `*`, a name, or a quoted literal {context}"
            )));
        };

        match token.kind {
            TokenKind::Star => {
                self.bump();
                Ok(RawSpec::Wildcard)
            }
            TokenKind::Ident => {
                self.bump();
                Ok(RawSpec::Name(token_text(self.query, &token)))
            }
            TokenKind::Literal => {
                self.bump();
                let text = token_text(self.query, &token);
                // Strip the surrounding quotes; no escape processing.
                Ok(RawSpec::Literal(&text[1..text.len() - 1]))
            }
            TokenKind::Bang => {
                self.bump();
                let inner = self.parse_spec("after `!`")?;
                Ok(RawSpec::Not(Box::new(inner)))
            }
            TokenKind::UnterminatedLiteral => Err(self.malformed("unterminated literal", token)),
            TokenKind::Slash | TokenKind::SlashSlash => Err(self.malformed(
                &format!("expected `*`, a name, or a quoted literal {context}"),
                token,
            )),
            TokenKind::Garbage => Err(self.malformed("unrecognized characters in query", token)),
        }
    }
}
