//! Symbol Table - in-memory store of every indexed entity
//!
//! Symbols live in an append-only arena; a [`SymbolId`] is the arena slot
//! plus one, so ids stay stable for the lifetime of the table. Secondary
//! indexes map qualified names, simple names and kinds back to ids.

use crate::edge::{Edge, EdgeKind};
use crate::symbol::{Symbol, SymbolId, SymbolKind};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Id-addressed store of symbols borrowed from a declaration forest.
#[derive(Debug, Default)]
pub struct SymbolTable<'a> {
    /// Slot `n` holds the symbol with id `n + 1`
    symbols: Vec<Symbol<'a>>,
    /// Qualified name -> ids in registration order
    by_qualified: HashMap<String, Vec<SymbolId>>,
    /// Simple name -> ids in registration order
    by_name: HashMap<String, Vec<SymbolId>>,
    by_kind: HashMap<SymbolKind, Vec<SymbolId>>,
}

impl<'a> SymbolTable<'a> {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a symbol and return its freshly assigned id.
    ///
    /// The id field of `symbol` is overwritten. Parent/child links are
    /// taken as given; use [`connect`](Self::connect) to add them
    /// symmetrically.
    pub fn add(&mut self, mut symbol: Symbol<'a>) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32 + 1);
        symbol.id = id;

        self.by_qualified
            .entry(symbol.qualified_name.clone())
            .or_default()
            .push(id);
        self.by_name.entry(symbol.name.clone()).or_default().push(id);
        self.by_kind.entry(symbol.kind).or_default().push(id);

        self.symbols.push(symbol);
        id
    }

    /// First symbol registered under `qualified_name`
    pub fn find_by_qualified_name(&self, qualified_name: &str) -> Option<&Symbol<'a>> {
        self.by_qualified
            .get(qualified_name)
            .and_then(|ids| ids.first())
            .and_then(|id| self.find_by_id(*id))
    }

    /// Every symbol registered under `qualified_name` (overload sets)
    pub fn find_all_by_qualified_name(&self, qualified_name: &str) -> Vec<&Symbol<'a>> {
        self.resolve_ids(self.by_qualified.get(qualified_name))
    }

    /// First type-like symbol (class, struct, union, enum, alias) under
    /// `qualified_name`
    pub fn find_type_by_qualified_name(&self, qualified_name: &str) -> Option<&Symbol<'a>> {
        self.by_qualified
            .get(qualified_name)?
            .iter()
            .filter_map(|id| self.find_by_id(*id))
            .find(|s| s.kind.is_type())
    }

    /// Symbols with the given simple name, in registration order
    pub fn find_by_name(&self, name: &str) -> Vec<&Symbol<'a>> {
        self.resolve_ids(self.by_name.get(name))
    }

    /// Symbols of the given kind, in registration order
    pub fn find_by_kind(&self, kind: SymbolKind) -> Vec<&Symbol<'a>> {
        self.resolve_ids(self.by_kind.get(&kind))
    }

    pub fn find_by_id(&self, id: SymbolId) -> Option<&Symbol<'a>> {
        id.index().and_then(|i| self.symbols.get(i))
    }

    /// Mutable access for in-place patching.
    ///
    /// Names must not be changed through this handle; the indexes are not
    /// updated.
    pub fn find_by_id_mut(&mut self, id: SymbolId) -> Option<&mut Symbol<'a>> {
        id.index().and_then(|i| self.symbols.get_mut(i))
    }

    /// Change the kind of a registered symbol, keeping the kind index in
    /// registration order
    pub fn set_kind(&mut self, id: SymbolId, kind: SymbolKind) -> bool {
        let Some(symbol) = self.find_by_id_mut(id) else {
            return false;
        };
        let old = std::mem::replace(&mut symbol.kind, kind);
        if old == kind {
            return true;
        }

        if let Some(ids) = self.by_kind.get_mut(&old) {
            ids.retain(|i| *i != id);
        }
        let ids = self.by_kind.entry(kind).or_default();
        let pos = ids.partition_point(|i| *i < id);
        ids.insert(pos, id);
        true
    }

    /// Record a relationship in both directions.
    ///
    /// Returns false when either end is unknown, a `Contains` edge starts
    /// at a kind that cannot hold members, or the edge is already present.
    pub fn connect(&mut self, edge: Edge) -> bool {
        let Some(from) = self.find_by_id(edge.from) else {
            return false;
        };
        if self.find_by_id(edge.to).is_none() {
            return false;
        }
        if edge.kind == EdgeKind::Contains && !from.kind.is_container() {
            return false;
        }

        let Some(from) = self.find_by_id_mut(edge.from) else {
            return false;
        };
        let forward = match edge.kind {
            EdgeKind::Contains => &mut from.children,
            EdgeKind::Inherits => &mut from.base_classes,
            EdgeKind::References => &mut from.referenced_types,
        };
        if forward.contains(&edge.to) {
            return false;
        }
        forward.push(edge.to);

        let Some(to) = self.find_by_id_mut(edge.to) else {
            return false;
        };
        match edge.kind {
            EdgeKind::Contains => to.parent = Some(edge.from),
            EdgeKind::Inherits => push_unique(&mut to.derived_classes, edge.from),
            EdgeKind::References => push_unique(&mut to.referenced_by, edge.from),
        }
        true
    }

    /// All symbols in id order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol<'a>> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Transitive derived classes of `id`, up to `depth` levels.
    pub fn derived_closure(&self, id: SymbolId, depth: usize) -> Vec<&Symbol<'a>> {
        let mut visited = HashSet::new();
        let mut queue = vec![(id, 0usize)];
        let mut affected = Vec::new();

        while let Some((current, current_depth)) = queue.pop() {
            if current_depth > depth || !visited.insert(current) {
                continue;
            }
            let Some(symbol) = self.find_by_id(current) else {
                continue;
            };
            if current_depth > 0 {
                affected.push(symbol);
            }
            for derived in &symbol.derived_classes {
                queue.push((*derived, current_depth + 1));
            }
        }

        affected
    }

    /// Get statistics about the table
    pub fn stats(&self) -> TableStats {
        let mut by_kind: Vec<(SymbolKind, usize)> = SymbolKind::all()
            .iter()
            .map(|k| (*k, self.by_kind.get(k).map_or(0, Vec::len)))
            .filter(|(_, n)| *n > 0)
            .collect();
        by_kind.sort_by(|a, b| b.1.cmp(&a.1));

        TableStats {
            total_symbols: self.symbols.len(),
            forward_declarations: self.symbols.iter().filter(|s| s.is_forward_declaration).count(),
            inheritance_edges: self.symbols.iter().map(|s| s.base_classes.len()).sum(),
            reference_edges: self.symbols.iter().map(|s| s.referenced_types.len()).sum(),
            by_kind,
        }
    }

    fn resolve_ids(&self, ids: Option<&Vec<SymbolId>>) -> Vec<&Symbol<'a>> {
        ids.map(|ids| ids.iter().filter_map(|id| self.find_by_id(*id)).collect())
            .unwrap_or_default()
    }
}

fn push_unique(list: &mut Vec<SymbolId>, id: SymbolId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

/// Statistics about a symbol table
#[derive(Debug, Clone, serde::Serialize)]
pub struct TableStats {
    pub total_symbols: usize,
    pub forward_declarations: usize,
    pub inheritance_edges: usize,
    pub reference_edges: usize,
    /// Non-empty kinds, most populous first
    pub by_kind: Vec<(SymbolKind, usize)>,
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol Table Statistics:")?;
        writeln!(f, "  Symbols: {} (forward declarations: {})", self.total_symbols, self.forward_declarations)?;
        writeln!(f, "  Edges: {} inherits, {} references", self.inheritance_edges, self.reference_edges)?;
        for (kind, count) in &self.by_kind {
            writeln!(f, "    {:<20} {}", kind.as_str(), count)?;
        }
        Ok(())
    }
}
