//! Re-declaration policy for classes and structs
//!
//! A class or struct may be seen more than once across the
//! forest: as forward declarations, as a definition, or (in a broken
//! corpus) as several definitions. The table keeps one entry per
//! qualified name and kind, and [`merge_decision`] decides what a new
//! sighting does to it.

use crate::symbol::{Symbol, SymbolId, SymbolKind};
use crate::table::SymbolTable;

/// What to do with an incoming declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Nothing of that name and kind yet
    Register,
    /// Existing forward declaration becomes this definition, keeping its id
    Promote(SymbolId),
    /// Another forward declaration of a known entity; nothing changes
    Redeclare(SymbolId),
    /// A definition already exists; the first one wins
    Drop(SymbolId),
}

impl MergeDecision {
    /// Whether the incoming declaration's members should be walked
    pub fn walks_members(&self, incoming_is_forward: bool) -> bool {
        match self {
            MergeDecision::Register => !incoming_is_forward,
            MergeDecision::Promote(_) => true,
            MergeDecision::Redeclare(_) | MergeDecision::Drop(_) => false,
        }
    }
}

/// Decide how an incoming declaration relates to an `existing` entry of
/// the same qualified name and kind
pub fn merge_decision(existing: Option<&Symbol<'_>>, incoming_is_forward: bool) -> MergeDecision {
    match existing {
        None => MergeDecision::Register,
        Some(sym) if sym.is_forward_declaration && !incoming_is_forward => MergeDecision::Promote(sym.id),
        Some(sym) if sym.is_forward_declaration => MergeDecision::Redeclare(sym.id),
        Some(sym) => MergeDecision::Drop(sym.id),
    }
}

/// Whether a declaration of kind `incoming` redeclares an `existing` entry
pub fn merges_with(existing: SymbolKind, incoming: SymbolKind) -> bool {
    existing == incoming || (existing.is_class_like() && incoming.is_class_like())
}

/// First entry under `qualified_name` that an incoming `kind` declaration
/// merges with
pub fn find_mergeable<'t, 'a>(
    table: &'t SymbolTable<'a>,
    kind: SymbolKind,
    qualified_name: &str,
) -> Option<&'t Symbol<'a>> {
    table
        .find_all_by_qualified_name(qualified_name)
        .into_iter()
        .find(|s| merges_with(s.kind, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(kind: SymbolKind, name: &str) -> Symbol<'static> {
        let mut sym = Symbol::new(kind, name, name);
        sym.is_forward_declaration = true;
        sym
    }

    #[test]
    fn test_merge_matrix() {
        let mut table = SymbolTable::new();
        let fwd = table.add(forward(SymbolKind::Class, "Fwd"));
        let def = table.add(Symbol::new(SymbolKind::Class, "Def", "Def"));

        assert_eq!(merge_decision(None, true), MergeDecision::Register);
        assert_eq!(merge_decision(None, false), MergeDecision::Register);

        let existing = table.find_by_id(fwd);
        assert_eq!(merge_decision(existing, false), MergeDecision::Promote(fwd));
        assert_eq!(merge_decision(existing, true), MergeDecision::Redeclare(fwd));

        let existing = table.find_by_id(def);
        assert_eq!(merge_decision(existing, false), MergeDecision::Drop(def));
        assert_eq!(merge_decision(existing, true), MergeDecision::Drop(def));
    }

    #[test]
    fn test_class_and_struct_merge() {
        assert!(merges_with(SymbolKind::Struct, SymbolKind::Class));
        assert!(merges_with(SymbolKind::Class, SymbolKind::Struct));
        assert!(merges_with(SymbolKind::Namespace, SymbolKind::Namespace));
        assert!(!merges_with(SymbolKind::Class, SymbolKind::Union));
        assert!(!merges_with(SymbolKind::Constructor, SymbolKind::Class));
    }

    #[test]
    fn test_walks_members() {
        assert!(MergeDecision::Register.walks_members(false));
        assert!(!MergeDecision::Register.walks_members(true));
        assert!(MergeDecision::Promote(SymbolId(1)).walks_members(false));
        assert!(!MergeDecision::Drop(SymbolId(1)).walks_members(false));
    }

    #[test]
    fn test_find_mergeable_matches_kind() {
        let mut table = SymbolTable::new();
        table.add(Symbol::new(SymbolKind::Constructor, "Foo", "Foo"));
        let cls = table.add(forward(SymbolKind::Class, "Foo"));

        assert_eq!(find_mergeable(&table, SymbolKind::Class, "Foo").unwrap().id, cls);
        assert_eq!(find_mergeable(&table, SymbolKind::Struct, "Foo").unwrap().id, cls);
        assert!(find_mergeable(&table, SymbolKind::Union, "Foo").is_none());
        assert!(find_mergeable(&table, SymbolKind::Namespace, "Foo").is_none());
    }
}
