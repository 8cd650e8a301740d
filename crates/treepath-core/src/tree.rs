//! Immutable syntax trees of rule nodes and token leaves.
//!
//! Trees are produced by an external parser and consumed read-only here.
//! A node's identity is its address within the tree that owns it: the
//! same `&SyntaxNode` is observed on every traversal, which is what the
//! evaluator's duplicate removal keys on.
//!
//! Token leaves own their text; interior nodes only carry a span, and
//! [`SyntaxNode::text`] slices the original source with it.

use rowan::{TextRange, TextSize};

use crate::{RuleTypeId, TokenTypeId, TypeRegistry};

/// A node in a syntax tree: either an interior rule node or a token leaf.
#[derive(Debug, Clone)]
pub enum SyntaxNode {
    Rule(RuleNode),
    Token(TokenLeaf),
}

/// Interior node for a parsed grammar rule, owning its children in
/// source order.
#[derive(Debug, Clone)]
pub struct RuleNode {
    kind: RuleTypeId,
    children: Vec<SyntaxNode>,
    span: TextRange,
}

/// Terminal node carrying literal source text.
#[derive(Debug, Clone)]
pub struct TokenLeaf {
    kind: TokenTypeId,
    text: String,
    span: TextRange,
}

impl SyntaxNode {
    /// Build a rule node. The span is the union of the children's spans;
    /// a childless rule gets an empty span at offset zero.
    pub fn rule(kind: RuleTypeId, children: Vec<SyntaxNode>) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => TextRange::new(first.span().start(), last.span().end()),
            _ => TextRange::empty(TextSize::from(0)),
        };
        SyntaxNode::Rule(RuleNode {
            kind,
            children,
            span,
        })
    }

    /// Build a token leaf.
    pub fn token(kind: TokenTypeId, text: impl Into<String>, span: TextRange) -> Self {
        SyntaxNode::Token(TokenLeaf {
            kind,
            text: text.into(),
            span,
        })
    }

    #[inline]
    pub fn is_rule(&self) -> bool {
        matches!(self, SyntaxNode::Rule(_))
    }

    #[inline]
    pub fn is_token(&self) -> bool {
        matches!(self, SyntaxNode::Token(_))
    }

    /// Rule type id for interior nodes, `None` for leaves.
    #[inline]
    pub fn rule_kind(&self) -> Option<RuleTypeId> {
        match self {
            SyntaxNode::Rule(rule) => Some(rule.kind),
            SyntaxNode::Token(_) => None,
        }
    }

    /// Token type id for leaves, `None` for interior nodes.
    #[inline]
    pub fn token_kind(&self) -> Option<TokenTypeId> {
        match self {
            SyntaxNode::Rule(_) => None,
            SyntaxNode::Token(token) => Some(token.kind),
        }
    }

    /// Literal text for leaves, `None` for interior nodes.
    #[inline]
    pub fn token_text(&self) -> Option<&str> {
        match self {
            SyntaxNode::Rule(_) => None,
            SyntaxNode::Token(token) => Some(&token.text),
        }
    }

    /// Children in source order. Empty for leaves.
    #[inline]
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Rule(rule) => &rule.children,
            SyntaxNode::Token(_) => &[],
        }
    }

    #[inline]
    pub fn span(&self) -> TextRange {
        match self {
            SyntaxNode::Rule(rule) => rule.span,
            SyntaxNode::Token(token) => token.span,
        }
    }

    /// The slice of the original source covered by this node.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[std::ops::Range::<usize>::from(self.span())]
    }

    /// Pre-order iterator over every node strictly below this one.
    ///
    /// Backed by an explicit stack so that pathologically deep trees
    /// cannot overflow the call stack.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack = Vec::with_capacity(self.children().len());
        stack.extend(self.children().iter().rev());
        Descendants { stack }
    }

    /// Render the subtree for debugging, resolving kind ids to names
    /// through the registry. Unknown ids print as `?`.
    pub fn dump(&self, registry: &impl TypeRegistry) -> String {
        let mut out = String::new();
        self.dump_into(registry, 0, &mut out);
        out
    }

    fn dump_into(&self, registry: &impl TypeRegistry, depth: usize, out: &mut String) {
        use std::fmt::Write;

        let indent = depth * 2;
        match self {
            SyntaxNode::Rule(rule) => {
                let name = registry.rule_name(rule.kind).unwrap_or("?");
                let _ = writeln!(out, "{:indent$}{name}", "");
                for child in &rule.children {
                    child.dump_into(registry, depth + 1, out);
                }
            }
            SyntaxNode::Token(token) => {
                let name = registry.token_name(token.kind).unwrap_or("?");
                let _ = writeln!(out, "{:indent$}{name} {:?}", "", token.text);
            }
        }
    }
}

impl RuleNode {
    #[inline]
    pub fn kind(&self) -> RuleTypeId {
        self.kind
    }

    #[inline]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    #[inline]
    pub fn span(&self) -> TextRange {
        self.span
    }
}

impl TokenLeaf {
    #[inline]
    pub fn kind(&self) -> TokenTypeId {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn span(&self) -> TextRange {
        self.span
    }
}

/// Pre-order traversal state for [`SyntaxNode::descendants`].
#[derive(Debug)]
pub struct Descendants<'t> {
    stack: Vec<&'t SyntaxNode>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = &'t SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
