//! Type Resolver - binds type names to symbols
//!
//! Resolution algorithm:
//! 1. Strip a leading `::`
//! 2. If the name is qualified, try it as written
//! 3. Walk outward through the enclosing scopes: `a::b::T`, `a::T`
//! 4. Try each visible `using namespace` target
//! 5. Try the global scope
//! 6. Otherwise unresolved
//!
//! Only type-like symbols (class, struct, union, enum, alias) satisfy a
//! lookup, so a constructor sharing its class's qualified name never
//! shadows the class.

use crate::symbol::SymbolId;
use crate::table::SymbolTable;
use serde::Serialize;
use std::fmt;

/// Which step of the lookup produced a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Qualified name matched as written
    Qualified,
    /// Found in the declaring scope or one enclosing it
    EnclosingScope,
    /// Found through a `using namespace` directive
    UsingNamespace,
    /// Found at global scope
    Global,
}

impl ResolutionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStrategy::Qualified => "qualified",
            ResolutionStrategy::EnclosingScope => "enclosing_scope",
            ResolutionStrategy::UsingNamespace => "using_namespace",
            ResolutionStrategy::Global => "global",
        }
    }

    pub fn all() -> &'static [ResolutionStrategy] {
        &[
            ResolutionStrategy::Qualified,
            ResolutionStrategy::EnclosingScope,
            ResolutionStrategy::UsingNamespace,
            ResolutionStrategy::Global,
        ]
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of resolving a type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub id: SymbolId,
    pub strategy: ResolutionStrategy,
}

/// Scope-aware type lookup over a finished symbol table
pub struct TypeResolver<'t, 'a> {
    table: &'t SymbolTable<'a>,
    honor_using_directives: bool,
}

impl<'t, 'a> TypeResolver<'t, 'a> {
    /// Create a new resolver
    pub fn new(table: &'t SymbolTable<'a>) -> Self {
        Self {
            table,
            honor_using_directives: true,
        }
    }

    /// Toggle step 4 of the lookup
    pub fn with_using_directives(mut self, honor: bool) -> Self {
        self.honor_using_directives = honor;
        self
    }

    /// Resolve `name` as written inside `enclosing` (a `::`-joined scope
    /// path, empty for global scope) with `using_namespaces` in effect
    pub fn resolve(&self, name: &str, enclosing: &str, using_namespaces: &[String]) -> Option<Resolution> {
        let name = name.strip_prefix("::").unwrap_or(name);
        if name.is_empty() {
            return None;
        }

        // 2. Qualified as written
        if name.contains("::") {
            if let Some(id) = self.lookup(name) {
                return Some(Resolution { id, strategy: ResolutionStrategy::Qualified });
            }
        }

        // 3. Enclosing scope chain, innermost first
        let mut scope = enclosing;
        while !scope.is_empty() {
            if let Some(id) = self.lookup(&format!("{}::{}", scope, name)) {
                return Some(Resolution { id, strategy: ResolutionStrategy::EnclosingScope });
            }
            scope = scope.rfind("::").map(|pos| &scope[..pos]).unwrap_or("");
        }

        // 4. Using directives
        if self.honor_using_directives {
            for ns in using_namespaces {
                if let Some(id) = self.lookup(&format!("{}::{}", ns, name)) {
                    return Some(Resolution { id, strategy: ResolutionStrategy::UsingNamespace });
                }
            }
        }

        // 5. Global
        self.lookup(name)
            .map(|id| Resolution { id, strategy: ResolutionStrategy::Global })
    }

    fn lookup(&self, qualified_name: &str) -> Option<SymbolId> {
        self.table
            .find_type_by_qualified_name(qualified_name)
            .map(|s| s.id)
    }
}
