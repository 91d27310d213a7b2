//! Indexer - registers every declaration of the forest
//!
//! Files are walked one at a time, in the order the caller chooses
//! (normally the include graph's topological order), depth first. Each
//! declaration becomes a [`Symbol`] with a fully qualified name, a parent
//! link and a snapshot of the `using namespace` directives in scope.
//!
//! Nothing is resolved here; cross-references are the
//! [linker](crate::linker)'s job once the table is complete.

pub mod merge;

pub use merge::{MergeDecision, find_mergeable, merge_decision, merges_with};

use crate::edge::Edge;
use crate::scope::{ANONYMOUS, ScopeContext};
use crate::symbol::{SourceLocation, Symbol, SymbolId, SymbolKind};
use crate::table::SymbolTable;
use crate::tree::{AccessSpecifier, Node, NodeKind, SourceFile, render_signature};
use serde::Serialize;
use std::fmt;

/// Counters collected while indexing
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStats {
    pub files: usize,
    pub registered: usize,
    /// Forward declarations completed by a later definition
    pub promoted: usize,
    /// Repeated forward declarations folded into an existing entry
    pub redeclared: usize,
    /// Redefinitions ignored in favour of the first definition
    pub dropped: usize,
    /// Namespace blocks reopening an existing namespace
    pub reopened_namespaces: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index Stats:")?;
        writeln!(f, "  Files: {}", self.files)?;
        writeln!(f, "  Registered: {}", self.registered)?;
        writeln!(f, "  Promoted forward declarations: {}", self.promoted)?;
        writeln!(f, "  Redeclarations: {}", self.redeclared)?;
        writeln!(f, "  Dropped redefinitions: {}", self.dropped)?;
        writeln!(f, "  Reopened namespaces: {}", self.reopened_namespaces)
    }
}

/// Builds a [`SymbolTable`] from declaration trees.
#[derive(Debug, Default)]
pub struct Indexer<'a> {
    table: SymbolTable<'a>,
    stats: IndexStats,
}

impl<'a> Indexer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every declaration of `file`
    pub fn index_file(&mut self, file: &'a SourceFile) {
        let ctx = ScopeContext::root(&file.path);
        let before = self.stats.registered;
        self.walk_nodes(&file.children, &ctx, AccessSpecifier::None);
        self.stats.files += 1;
        tracing::trace!(
            "Indexed {} ({} new symbols)",
            file.path.display(),
            self.stats.registered - before
        );
    }

    pub fn table(&self) -> &SymbolTable<'a> {
        &self.table
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Hand over the finished table
    pub fn finish(self) -> (SymbolTable<'a>, IndexStats) {
        (self.table, self.stats)
    }

    /// Walk sibling declarations; `using` directives among them stay in
    /// effect until the end of the list
    fn walk_nodes(&mut self, nodes: &'a [Node], scope: &ScopeContext<'a>, access: AccessSpecifier) {
        let mut ctx = scope.clone();
        for node in nodes {
            self.walk_node(node, &mut ctx, access);
        }
    }

    fn walk_node(&mut self, node: &'a Node, ctx: &mut ScopeContext<'a>, access: AccessSpecifier) {
        match &node.kind {
            NodeKind::Namespace(ns) => {
                let inner = self.open_namespace(node, ns.is_anonymous, &ns.name, ctx);
                self.walk_nodes(&ns.children, &inner, AccessSpecifier::None);
            }
            NodeKind::UsingNamespace(using) => ctx.add_using(&using.name),

            NodeKind::Class(cls) => {
                let Some(name) = node.name() else {
                    return;
                };
                let forward = cls.is_forward_declaration();
                if let Some(mut inner) = self.declare_type(node, SymbolKind::Class, name, forward, access, ctx) {
                    for member in cls.members.iter() {
                        self.walk_node(&member.node, &mut inner, member.access);
                    }
                }
            }
            NodeKind::Struct(s) => {
                let Some(name) = node.name() else {
                    return;
                };
                let forward = s.is_forward_declaration();
                if let Some(inner) = self.declare_type(node, SymbolKind::Struct, name, forward, access, ctx) {
                    self.walk_nodes_each(s.members.iter(), &inner, AccessSpecifier::Public);
                }
            }
            NodeKind::Union(u) => {
                let name = if u.is_anonymous { "" } else { u.name.as_str() };
                let inner = self.register_scope(node, SymbolKind::Union, name, access, ctx);
                self.walk_nodes_each(u.members.iter(), &inner, AccessSpecifier::Public);
            }
            NodeKind::Enum(e) => {
                let inner = self.register_scope(node, SymbolKind::Enum, &e.name, access, ctx);
                for enumerator in &e.enumerators {
                    if let NodeKind::Enumerator(ev) = &enumerator.kind {
                        let qualified = inner.qualify(&ev.name);
                        self.register(enumerator, SymbolKind::EnumValue, &ev.name, qualified, "", AccessSpecifier::None, &inner);
                    }
                }
            }

            NodeKind::Function(f) => {
                let signature = render_signature(&f.parameters);
                self.register(node, SymbolKind::Function, &f.name, ctx.qualify(&f.name), &signature, access, ctx);
            }
            NodeKind::Constructor(c) => {
                let signature = render_signature(&c.parameters);
                self.register(node, SymbolKind::Constructor, &c.name, ctx.qualify(&c.name), &signature, access, ctx);
            }
            NodeKind::Destructor(d) => {
                self.register(node, SymbolKind::Destructor, &d.name, ctx.qualify(&d.name), "()", access, ctx);
            }
            NodeKind::Operator(op) => {
                let name = format!("operator{}", op.operator_symbol);
                let signature = render_signature(&op.parameters);
                self.register(node, SymbolKind::Operator, &name, ctx.qualify(&name), &signature, access, ctx);
            }

            NodeKind::Variable(v) => {
                self.register(node, SymbolKind::Variable, &v.name, ctx.qualify(&v.name), "", access, ctx);
            }
            NodeKind::TypeAlias(ta) => {
                self.register(node, SymbolKind::TypeAlias, &ta.alias_name, ctx.qualify(&ta.alias_name), "", access, ctx);
            }
            NodeKind::Typedef(td) => {
                self.register(node, SymbolKind::TypeAlias, &td.alias_name, ctx.qualify(&td.alias_name), "", access, ctx);
            }
            NodeKind::Concept(c) => {
                self.register(node, SymbolKind::Concept, &c.name, ctx.qualify(&c.name), "", access, ctx);
            }

            // Macros live outside the scope hierarchy
            NodeKind::ObjectLikeMacro(m) => {
                let global = ScopeContext::root(ctx.file_path);
                self.register(node, SymbolKind::ObjectLikeMacro, &m.name, m.name.clone(), "", AccessSpecifier::None, &global);
            }
            NodeKind::FunctionLikeMacro(m) => {
                let global = ScopeContext::root(ctx.file_path);
                self.register(node, SymbolKind::FunctionLikeMacro, &m.name, m.name.clone(), "", AccessSpecifier::None, &global);
            }

            NodeKind::Include(_) | NodeKind::Enumerator(_) => {}
        }
    }

    fn walk_nodes_each(
        &mut self,
        nodes: impl Iterator<Item = &'a Node>,
        scope: &ScopeContext<'a>,
        access: AccessSpecifier,
    ) {
        let mut ctx = scope.clone();
        for node in nodes {
            self.walk_node(node, &mut ctx, access);
        }
    }

    /// Unions and enums are registered on every sighting and never merge;
    /// an empty name registers as `<anonymous>`
    fn register_scope(
        &mut self,
        node: &'a Node,
        kind: SymbolKind,
        name: &str,
        access: AccessSpecifier,
        ctx: &ScopeContext<'a>,
    ) -> ScopeContext<'a> {
        let name = if name.is_empty() { ANONYMOUS } else { name };
        let qualified = ctx.qualify(name);
        let id = self.register(node, kind, name, qualified.clone(), "", access, ctx);
        ctx.enter(qualified, id)
    }

    /// Enter (creating as needed) each component of a possibly nested
    /// namespace name and return the innermost scope
    fn open_namespace(
        &mut self,
        node: &'a Node,
        anonymous: bool,
        name: &str,
        ctx: &ScopeContext<'a>,
    ) -> ScopeContext<'a> {
        let parts: Vec<&str> = if anonymous || name.is_empty() {
            vec![ANONYMOUS]
        } else {
            name.split("::").filter(|p| !p.is_empty()).collect()
        };

        let mut current = ctx.clone();
        for part in parts {
            let qualified = current.qualify(part);
            let id = match find_mergeable(&self.table, SymbolKind::Namespace, &qualified) {
                Some(existing) => {
                    self.stats.reopened_namespaces += 1;
                    existing.id
                }
                None => self.register(node, SymbolKind::Namespace, part, qualified.clone(), "", AccessSpecifier::None, &current),
            };
            current = current.enter(qualified, id);
        }
        current
    }

    /// Apply the merge policy to a class or struct. Returns the scope to walk members in, or `None` when the
    /// declaration contributes nothing further.
    fn declare_type(
        &mut self,
        node: &'a Node,
        kind: SymbolKind,
        name: &str,
        forward: bool,
        access: AccessSpecifier,
        ctx: &ScopeContext<'a>,
    ) -> Option<ScopeContext<'a>> {
        let qualified = ctx.qualify(name);
        let decision = merge_decision(find_mergeable(&self.table, kind, &qualified), forward);

        let id = match decision {
            MergeDecision::Register => {
                let id = self.register(node, kind, name, qualified.clone(), "", access, ctx);
                if let Some(sym) = self.table.find_by_id_mut(id) {
                    sym.is_forward_declaration = forward;
                }
                id
            }
            MergeDecision::Promote(id) => {
                if let Some(sym) = self.table.find_by_id_mut(id) {
                    sym.node = Some(node);
                    sym.location = SourceLocation::of(ctx.file_path, node);
                    sym.using_namespaces = ctx.using_namespaces.clone();
                    sym.is_forward_declaration = false;
                }
                // `struct Foo;` completed by `class Foo {...}` takes the defining key
                self.table.set_kind(id, kind);
                self.stats.promoted += 1;
                tracing::debug!("Completed forward declaration of {} {}", kind, qualified);
                id
            }
            MergeDecision::Redeclare(id) => {
                self.stats.redeclared += 1;
                id
            }
            MergeDecision::Drop(id) => {
                self.stats.dropped += 1;
                tracing::debug!(
                    "Ignoring redefinition of {} {} at {}:{} (first defined as {})",
                    kind,
                    qualified,
                    ctx.file_path.display(),
                    node.span.start_line,
                    id
                );
                id
            }
        };

        decision
            .walks_members(forward)
            .then(|| ctx.enter(qualified, id))
    }

    /// Add one symbol under the current scope
    #[allow(clippy::too_many_arguments)]
    fn register(
        &mut self,
        node: &'a Node,
        kind: SymbolKind,
        name: &str,
        qualified_name: String,
        signature: &str,
        access: AccessSpecifier,
        ctx: &ScopeContext<'a>,
    ) -> SymbolId {
        let mut symbol = Symbol::new(kind, name, qualified_name)
            .with_signature(signature)
            .with_access(access)
            .with_location(SourceLocation::of(ctx.file_path, node))
            .with_node(node);
        symbol.using_namespaces = ctx.using_namespaces.clone();

        let id = self.table.add(symbol);
        if let Some(parent) = ctx.parent {
            self.table.connect(Edge::contains(parent, id));
        }
        self.stats.registered += 1;
        id
    }
}
