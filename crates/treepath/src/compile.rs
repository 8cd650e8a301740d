//! Query compiler: resolves raw steps into executable path elements.
//!
//! Name resolution runs once, here, against the caller's
//! [`TypeRegistry`]; evaluation then compares integer ids only. A bare
//! identifier is probed as a rule name first, then as a token name;
//! the convention inherited from grammars whose rule and token
//! namespaces rarely collide.

use rowan::TextRange;
use treepath_core::{RuleTypeId, SyntaxNode, TokenTypeId, TypeRegistry};

pub use crate::path::parser::Axis;
use crate::path::parser::{self, RawSpec};
use crate::{Error, Result};

/// Node test applied by one path element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Wildcard: accepts any node.
    Any,
    /// Interior node with this rule type.
    Rule(RuleTypeId),
    /// Token leaf with this token type.
    TokenType(TokenTypeId),
    /// Token leaf whose text equals this string exactly.
    TokenText(String),
    /// Any node the inner matcher rejects.
    Negated(Box<Matcher>),
}

impl Matcher {
    /// Whether `node` satisfies this matcher.
    ///
    /// A single exhaustive match over the node variant; negation is the
    /// per-node complement of the inner test, so an interior node does
    /// satisfy a negated token test. Ids foreign to the tree's grammar
    /// simply never compare equal, which is a non-match, not an error.
    pub fn matches(&self, node: &SyntaxNode) -> bool {
        match self {
            Matcher::Any => true,
            Matcher::Rule(id) => node.rule_kind() == Some(*id),
            Matcher::TokenType(id) => node.token_kind() == Some(*id),
            Matcher::TokenText(text) => node.token_text() == Some(text.as_str()),
            Matcher::Negated(inner) => !inner.matches(node),
        }
    }

    /// True for matchers naming one concrete rule or token, the shapes
    /// eligible for root anchoring. Wildcards and negations are not.
    fn is_concrete(&self) -> bool {
        matches!(
            self,
            Matcher::Rule(_) | Matcher::TokenType(_) | Matcher::TokenText(_)
        )
    }
}

/// One executable step: axis + matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathElement {
    axis: Axis,
    matcher: Matcher,
    root_anchor: bool,
}

impl PathElement {
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// True only on a first element written `/name`: it is evaluated as
    /// a self-test on the root rather than a child test on the root's
    /// children, reproducing the convention that the root rule's name
    /// appears as the first path segment.
    #[inline]
    pub fn is_root_anchor(&self) -> bool {
        self.root_anchor
    }
}

/// A compiled, reusable path query.
///
/// Immutable once built: compile once, cache, and evaluate from any
/// number of threads against trees that are not concurrently mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPath {
    query: String,
    elements: Vec<PathElement>,
}

impl CompiledPath {
    /// Parse `query` and resolve every step against `registry`.
    pub fn compile<R: TypeRegistry + ?Sized>(query: &str, registry: &R) -> Result<Self> {
        let steps = parser::parse(query)?;

        let mut elements = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let matcher = resolve_spec(&step.spec, registry, step.spec_span)?;
            let root_anchor = index == 0 && step.axis == Axis::Child && matcher.is_concrete();
            elements.push(PathElement {
                axis: step.axis,
                matcher,
                root_anchor,
            });
        }
        Ok(CompiledPath {
            query: query.to_string(),
            elements,
        })
    }

    /// Compiled elements in step order. Never empty.
    #[inline]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// The original query text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Evaluate against a tree root. See [`crate::eval::evaluate`].
    pub fn evaluate<'t>(&self, root: &'t SyntaxNode) -> Vec<&'t SyntaxNode> {
        crate::eval::evaluate(self, root)
    }
}

impl std::fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query)
    }
}

/// Resolution precedence: wildcard, literal text, rule name, token name.
fn resolve_spec<R: TypeRegistry + ?Sized>(
    spec: &RawSpec<'_>,
    registry: &R,
    span: TextRange,
) -> Result<Matcher> {
    match spec {
        RawSpec::Wildcard => Ok(Matcher::Any),
        RawSpec::Literal(text) => Ok(Matcher::TokenText((*text).to_string())),
        RawSpec::Name(name) => {
            if let Some(id) = registry.rule_id(name) {
                Ok(Matcher::Rule(id))
            } else if let Some(id) = registry.token_id(name) {
                Ok(Matcher::TokenType(id))
            } else {
                Err(Error::UnknownNodeType {
                    name: (*name).to_string(),
                    span,
                })
            }
        }
        RawSpec::Not(inner) => Ok(Matcher::Negated(Box::new(resolve_spec(
            inner, registry, span,
        )?))),
    }
}
