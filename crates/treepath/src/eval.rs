//! Evaluator: walks a tree applying compiled path elements in order.
//!
//! The working state is a *context set*, an insertion-ordered set of
//! node identities. Each step maps the current context to the next by
//! testing the step's matcher along its axis under every context node,
//! concatenating per-context results and dropping repeat identities.
//! Keeping first occurrences preserves pre-order (document) order, and
//! guards against double counting when one context node is a descendant
//! of another after a `//` step.
//!
//! Evaluation is pure and infallible. It allocates the context sets and
//! nothing else; a query that cannot match simply ends with an empty
//! context.

use indexmap::IndexSet;
use treepath_core::SyntaxNode;

use crate::compile::{Axis, CompiledPath, PathElement};

/// Identity-keyed reference to a tree node.
///
/// Hashing and equality are by address, not by structure: two
/// structurally identical nodes at different tree positions stay
/// distinct, and one node reached through two overlapping context nodes
/// collapses to a single entry.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'t>(pub &'t SyntaxNode);

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for NodeRef<'_> {}

impl std::hash::Hash for NodeRef<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.0, state);
    }
}

/// Evaluate a compiled path against a tree root.
///
/// Returns the selected nodes in pre-order (document) order, duplicates
/// removed by node identity. Never fails; no match means an empty vec.
pub fn evaluate<'t>(path: &CompiledPath, root: &'t SyntaxNode) -> Vec<&'t SyntaxNode> {
    let mut elements = path.elements().iter();

    if let Some(first) = path.elements().first() {
        if first.is_root_anchor() {
            // Self-test on the root; the whole query dies here if it fails.
            if !first.matcher().matches(root) {
                return Vec::new();
            }
            elements.next();
        }
    }

    let mut context: IndexSet<NodeRef<'t>> = IndexSet::new();
    context.insert(NodeRef(root));

    for element in elements {
        let mut next: IndexSet<NodeRef<'t>> = IndexSet::new();
        for context_node in &context {
            apply_element(element, context_node.0, &mut next);
        }
        context = next;
        if context.is_empty() {
            break;
        }
    }

    context.into_iter().map(|node_ref| node_ref.0).collect()
}

/// Collect one element's matches below one context node, in visitation
/// order. Child axis scans immediate children left to right; descendant
/// axis walks everything strictly below in pre-order.
fn apply_element<'t>(element: &PathElement, node: &'t SyntaxNode, out: &mut IndexSet<NodeRef<'t>>) {
    match element.axis() {
        Axis::Child => {
            for child in node.children() {
                if element.matcher().matches(child) {
                    out.insert(NodeRef(child));
                }
            }
        }
        Axis::Descendant => {
            for descendant in node.descendants() {
                if element.matcher().matches(descendant) {
                    out.insert(NodeRef(descendant));
                }
            }
        }
    }
}
