//! treepath: XPath-like path queries over syntax trees.
//!
//! A query is a sequence of steps, each an axis (`/` child, `//`
//! descendant) plus a spec (`*` wildcard, a rule or token name, a quoted
//! token text, or `!` negating any of those). Compilation resolves names
//! against a [`TypeRegistry`] once; the resulting [`CompiledPath`] can be
//! evaluated against any tree, repeatedly and from multiple threads.
//!
//! # Example
//!
//! ```
//! use rowan::{TextRange, TextSize};
//! use treepath::{CompiledPath, DynamicTypeRegistry, SyntaxNode};
//!
//! let mut registry = DynamicTypeRegistry::new();
//! registry.define_rule("script", 1);
//! registry.define_rule("vardef", 2);
//! registry.define_token("ID", 1);
//!
//! // The tree for `var x`, as an external parser would have built it.
//! let tree = SyntaxNode::rule(1, vec![SyntaxNode::rule(2, vec![
//!     SyntaxNode::token(7, "var", TextRange::new(TextSize::from(0), TextSize::from(3))),
//!     SyntaxNode::token(1, "x", TextRange::new(TextSize::from(4), TextSize::from(5))),
//! ])]);
//!
//! let query = CompiledPath::compile("/script/vardef/ID", &registry)?;
//! let hits = query.evaluate(&tree);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].token_text(), Some("x"));
//! # Ok::<(), treepath::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use rowan::TextRange;
use serde::{Serialize, Serializer};

pub mod compile;
pub mod diagnostics;
pub mod eval;
pub mod path;

#[cfg(test)]
mod fixtures;

pub use compile::{Axis, CompiledPath, Matcher, PathElement};
pub use eval::evaluate;
// Re-exported so callers don't need a direct treepath-core dependency.
pub use treepath_core::{
    DynamicTypeRegistry, RuleNode, RuleTypeId, StaticTypeRegistry, SyntaxNode, TokenLeaf,
    TokenTypeId, TypeRegistry,
};

/// Errors raised while compiling a path query.
///
/// All failures are compile-time failures: a well-formed query that
/// happens to match nothing in a particular tree is not an error, it
/// evaluates to an empty result instead. The query's shape is statically
/// checkable; whether it matches a tree is a data question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum Error {
    /// Query string contains no steps.
    #[error("empty query")]
    EmptyQuery,

    /// Query text violates the step grammar.
    #[error("malformed query at offset {}: {message}", u32::from(.span.start()))]
    MalformedQuery {
        message: String,
        /// The offending substring; empty when the error is at end of input.
        fragment: String,
        #[serde(serialize_with = "serialize_text_range")]
        span: TextRange,
    },

    /// Bare identifier matches neither a rule name nor a token name in
    /// the registry the query was compiled against.
    #[error("unknown node type `{name}`")]
    UnknownNodeType {
        name: String,
        #[serde(serialize_with = "serialize_text_range")]
        span: TextRange,
    },
}

impl Error {
    /// Span of the offending query text, if the variant carries one.
    pub fn span(&self) -> Option<TextRange> {
        match self {
            Error::EmptyQuery => None,
            Error::MalformedQuery { span, .. } | Error::UnknownNodeType { span, .. } => Some(*span),
        }
    }
}

fn serialize_text_range<S: Serializer>(
    range: &TextRange,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;
    let mut state = s.serialize_struct("TextRange", 2)?;
    state.serialize_field("start", &u32::from(range.start()))?;
    state.serialize_field("end", &u32::from(range.end()))?;
    state.end()
}

/// Result type for query compilation.
pub type Result<T> = std::result::Result<T, Error>;

/// Compile a query against a registry. Free-function form of
/// [`CompiledPath::compile`].
pub fn compile<R: TypeRegistry + ?Sized>(query: &str, registry: &R) -> Result<CompiledPath> {
    CompiledPath::compile(query, registry)
}

/// Compile `query` against `registry` and evaluate it on `root` in one
/// call. Equivalent to [`CompiledPath::compile`] followed by
/// [`CompiledPath::evaluate`]; compile the query once instead when it is
/// reused across trees.
pub fn find_all<'t, R: TypeRegistry + ?Sized>(
    query: &str,
    registry: &R,
    root: &'t SyntaxNode,
) -> Result<Vec<&'t SyntaxNode>> {
    Ok(CompiledPath::compile(query, registry)?.evaluate(root))
}
