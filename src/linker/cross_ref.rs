use super::type_refs::{base_class_names, referenced_type_names};
use crate::edge::{Edge, EdgeKind};
use crate::scope::{ResolutionStrategy, TypeResolver};
use crate::symbol::SymbolKind;
use crate::table::SymbolTable;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Outcome counts for one edge kind
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EdgeStats {
    /// Names looked up
    pub attempted: usize,
    /// Names bound to a symbol (self references excluded)
    pub resolved: usize,
    pub unresolved: usize,
    /// Names that resolved to the declaring symbol itself
    pub self_references: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkStats {
    pub symbols_visited: usize,
    pub inherits: EdgeStats,
    pub references: EdgeStats,
    pub by_strategy: HashMap<ResolutionStrategy, usize>,
}

impl LinkStats {
    pub fn total_resolved(&self) -> usize {
        self.inherits.resolved + self.references.resolved
    }

    pub fn total_unresolved(&self) -> usize {
        self.inherits.unresolved + self.references.unresolved
    }

    fn edge_stats_mut(&mut self, kind: EdgeKind) -> &mut EdgeStats {
        match kind {
            EdgeKind::Inherits => &mut self.inherits,
            _ => &mut self.references,
        }
    }
}

impl fmt::Display for LinkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Link Stats:")?;
        writeln!(f, "  Symbols visited: {}", self.symbols_visited)?;
        writeln!(
            f,
            "  Base classes: {} resolved, {} unresolved",
            self.inherits.resolved, self.inherits.unresolved
        )?;
        writeln!(
            f,
            "  Type references: {} resolved, {} unresolved",
            self.references.resolved, self.references.unresolved
        )?;
        let self_references = self.inherits.self_references + self.references.self_references;
        if self_references > 0 {
            writeln!(f, "  Self references: {}", self_references)?;
        }
        for strategy in ResolutionStrategy::all() {
            if let Some(count) = self.by_strategy.get(strategy) {
                writeln!(f, "    via {}: {}", strategy, count)?;
            }
        }
        Ok(())
    }
}

/// Binds base classes and type references across the whole table.
///
/// Every name is looked up from the declaring symbol's enclosing scope,
/// with the `using namespace` directives that were visible where the
/// symbol was declared.
pub struct CrossReferenceLinker<'t, 'a> {
    table: &'t mut SymbolTable<'a>,
    honor_using_directives: bool,
}

impl<'t, 'a> CrossReferenceLinker<'t, 'a> {
    pub fn new(table: &'t mut SymbolTable<'a>) -> Self {
        Self {
            table,
            honor_using_directives: true,
        }
    }

    pub fn with_using_directives(mut self, honor: bool) -> Self {
        self.honor_using_directives = honor;
        self
    }

    pub fn run(self) -> LinkStats {
        let mut stats = LinkStats::default();

        // Resolve against the finished table first, then apply
        let edges = {
            let table: &SymbolTable<'a> = self.table;
            let resolver = TypeResolver::new(table).with_using_directives(self.honor_using_directives);
            let mut edges = Vec::new();

            for symbol in table.iter() {
                let Some(node) = symbol.node else {
                    continue;
                };
                stats.symbols_visited += 1;
                let scope = symbol.enclosing_scope();

                let bases = match symbol.kind {
                    SymbolKind::Class | SymbolKind::Struct => base_class_names(node),
                    _ => Vec::new(),
                };
                let wanted = bases
                    .into_iter()
                    .map(|name| (name.to_string(), EdgeKind::Inherits))
                    .chain(referenced_type_names(node).into_iter().map(|name| (name, EdgeKind::References)));

                for (name, kind) in wanted {
                    let edge_stats = stats.edge_stats_mut(kind);
                    edge_stats.attempted += 1;

                    match resolver.resolve(&name, scope, &symbol.using_namespaces) {
                        Some(hit) if hit.id != symbol.id => {
                            edge_stats.resolved += 1;
                            *stats.by_strategy.entry(hit.strategy).or_default() += 1;
                            edges.push(Edge::new(symbol.id, hit.id, kind));
                        }
                        Some(_) => {
                            edge_stats.self_references += 1;
                            tracing::trace!("Self reference '{}' in {}", name, symbol.short_description());
                        }
                        None => {
                            edge_stats.unresolved += 1;
                            tracing::trace!("Unresolved {} '{}' from {}", kind, name, symbol.short_description());
                        }
                    }
                }
            }
            edges
        };

        let mut applied = 0usize;
        for edge in edges {
            if self.table.connect(edge) {
                applied += 1;
            }
        }

        tracing::debug!(
            "Linked {} edges ({} resolved, {} unresolved names)",
            applied,
            stats.total_resolved(),
            stats.total_unresolved()
        );
        stats
    }
}
