//! Edge types - relationships between symbols
//!
//! Every relationship the indexer records reduces to three edge kinds:
//! - `Contains`: scope → member (namespace → class, enum → enumerator)
//! - `Inherits`: derived → base
//! - `References`: declaration → type it mentions
//!
//! Edges are applied to a [`SymbolTable`](crate::table::SymbolTable) with
//! `connect`, which records both directions.

use crate::symbol::SymbolId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Relationship kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Parent scope contains a symbol (`parent` / `children`)
    Contains,
    /// Class or struct derives from another (`base_classes` / `derived_classes`)
    Inherits,
    /// Declaration mentions a type (`referenced_types` / `referenced_by`)
    References,
}

impl EdgeKind {
    /// Get the string representation of the edge kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Contains => "contains",
            EdgeKind::Inherits => "inherits",
            EdgeKind::References => "references",
        }
    }

    /// Get all edge kinds
    pub fn all() -> &'static [EdgeKind] {
        &[EdgeKind::Contains, EdgeKind::Inherits, EdgeKind::References]
    }

    /// Produced by the linking pass rather than the indexing walk
    pub fn is_link(&self) -> bool {
        matches!(self, EdgeKind::Inherits | EdgeKind::References)
    }
}

impl FromStr for EdgeKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" | "contain" | "child" => Ok(EdgeKind::Contains),
            "inherits" | "inherit" | "base" => Ok(EdgeKind::Inherits),
            "references" | "reference" | "ref" => Ok(EdgeKind::References),
            _ => Err(crate::Error::InvalidKind(format!("Unknown edge kind: {}", s))),
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directed relationship between two symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: SymbolId,
    pub to: SymbolId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(from: SymbolId, to: SymbolId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }

    pub fn contains(parent: SymbolId, child: SymbolId) -> Self {
        Self::new(parent, child, EdgeKind::Contains)
    }

    pub fn inherits(derived: SymbolId, base: SymbolId) -> Self {
        Self::new(derived, base, EdgeKind::Inherits)
    }

    pub fn references(user: SymbolId, used: SymbolId) -> Self {
        Self::new(user, used, EdgeKind::References)
    }

    /// Edge pointing back at its origin
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
