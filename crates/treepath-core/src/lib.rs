#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for treepath node type information.
//!
//! Two layers:
//! - **Tree model** ([`tree`]): immutable syntax trees of rule nodes and
//!   token leaves, built by an external parser and only read here.
//! - **Type registry**: name → id lookups for a grammar's rule and token
//!   kinds, injected into the query compiler.
//!
//! Two registry implementations:
//! - **Dynamic** ([`DynamicTypeRegistry`]): IndexMap-based, for runtime construction
//! - **Static** ([`StaticTypeRegistry`]): slice-based, zero runtime init

use indexmap::IndexMap;

pub mod tree;

pub use tree::{Descendants, RuleNode, SyntaxNode, TokenLeaf};

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw entry from a grammar's type-inventory JSON.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawTypeDef {
    pub name: String,
    pub kind: RawTypeKind,
    pub id: u16,
}

/// Whether an inventory entry names a rule or a token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawTypeKind {
    Rule,
    Token,
}

/// Parse a type-inventory JSON document into raw defs.
pub fn parse_type_defs(json: &str) -> Result<Vec<RawTypeDef>, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Common Types
// ============================================================================

/// Rule (interior node) type id.
pub type RuleTypeId = u16;

/// Token (leaf node) type id.
pub type TokenTypeId = u16;

// ============================================================================
// TypeRegistry Trait
// ============================================================================

/// Name ↔ id lookup table for one grammar's rule and token kinds.
///
/// The query compiler probes `rule_id` before `token_id` when resolving a
/// bare identifier, so a grammar may reuse a name across the two
/// namespaces without ambiguity at this interface.
///
/// Reverse lookups exist for diagnostics and tree dumps; they are not on
/// the compiler's hot path.
pub trait TypeRegistry {
    fn rule_id(&self, name: &str) -> Option<RuleTypeId>;
    fn token_id(&self, name: &str) -> Option<TokenTypeId>;

    fn rule_name(&self, id: RuleTypeId) -> Option<&str>;
    fn token_name(&self, id: TokenTypeId) -> Option<&str>;
}

impl<T: TypeRegistry + ?Sized> TypeRegistry for &T {
    fn rule_id(&self, name: &str) -> Option<RuleTypeId> {
        (*self).rule_id(name)
    }
    fn token_id(&self, name: &str) -> Option<TokenTypeId> {
        (*self).token_id(name)
    }
    fn rule_name(&self, id: RuleTypeId) -> Option<&str> {
        (*self).rule_name(id)
    }
    fn token_name(&self, id: TokenTypeId) -> Option<&str> {
        (*self).token_name(id)
    }
}

// ============================================================================
// Static Registry (zero runtime init)
// ============================================================================

/// Registry backed by static tables, sorted by name for binary search.
///
/// All data is statically allocated - no runtime initialization needed.
/// Language integrations that know their grammar at build time should
/// prefer this over [`DynamicTypeRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct StaticTypeRegistry {
    /// Sorted slice of (name, rule id) pairs.
    rules: &'static [(&'static str, RuleTypeId)],
    /// Sorted slice of (name, token id) pairs.
    tokens: &'static [(&'static str, TokenTypeId)],
}

impl StaticTypeRegistry {
    pub const fn new(
        rules: &'static [(&'static str, RuleTypeId)],
        tokens: &'static [(&'static str, TokenTypeId)],
    ) -> Self {
        Self { rules, tokens }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

impl TypeRegistry for StaticTypeRegistry {
    fn rule_id(&self, name: &str) -> Option<RuleTypeId> {
        self.rules
            .binary_search_by_key(&name, |(n, _)| *n)
            .ok()
            .map(|idx| self.rules[idx].1)
    }

    fn token_id(&self, name: &str) -> Option<TokenTypeId> {
        self.tokens
            .binary_search_by_key(&name, |(n, _)| *n)
            .ok()
            .map(|idx| self.tokens[idx].1)
    }

    fn rule_name(&self, id: RuleTypeId) -> Option<&str> {
        self.rules
            .iter()
            .find(|(_, rule_id)| *rule_id == id)
            .map(|(name, _)| *name)
    }

    fn token_name(&self, id: TokenTypeId) -> Option<&str> {
        self.tokens
            .iter()
            .find(|(_, token_id)| *token_id == id)
            .map(|(name, _)| *name)
    }
}

// ============================================================================
// Dynamic Registry (runtime construction)
// ============================================================================

/// Registry built at runtime, preserving definition order.
///
/// Use this when the grammar's type inventory is loaded from data (for
/// example the JSON accepted by [`parse_type_defs`]). For zero-init
/// static data, use [`StaticTypeRegistry`].
#[derive(Debug, Clone, Default)]
pub struct DynamicTypeRegistry {
    rules: IndexMap<String, RuleTypeId>,
    tokens: IndexMap<String, TokenTypeId>,
}

impl DynamicTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw inventory entries. A name defined twice within the
    /// same namespace keeps its first id.
    pub fn from_defs(defs: &[RawTypeDef]) -> Self {
        let mut registry = Self::new();
        for def in defs {
            match def.kind {
                RawTypeKind::Rule => registry.define_rule(def.name.clone(), def.id),
                RawTypeKind::Token => registry.define_token(def.name.clone(), def.id),
            }
        }
        registry
    }

    pub fn define_rule(&mut self, name: impl Into<String>, id: RuleTypeId) {
        self.rules.entry(name.into()).or_insert(id);
    }

    pub fn define_token(&mut self, name: impl Into<String>, id: TokenTypeId) {
        self.tokens.entry(name.into()).or_insert(id);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.tokens.is_empty()
    }

    /// Rule names in definition order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(|s| s.as_str())
    }

    /// Token names in definition order.
    pub fn token_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(|s| s.as_str())
    }
}

impl TypeRegistry for DynamicTypeRegistry {
    fn rule_id(&self, name: &str) -> Option<RuleTypeId> {
        self.rules.get(name).copied()
    }

    fn token_id(&self, name: &str) -> Option<TokenTypeId> {
        self.tokens.get(name).copied()
    }

    fn rule_name(&self, id: RuleTypeId) -> Option<&str> {
        self.rules
            .iter()
            .find(|(_, rule_id)| **rule_id == id)
            .map(|(name, _)| name.as_str())
    }

    fn token_name(&self, id: TokenTypeId) -> Option<&str> {
        self.tokens
            .iter()
            .find(|(_, token_id)| **token_id == id)
            .map(|(name, _)| name.as_str())
    }
}
