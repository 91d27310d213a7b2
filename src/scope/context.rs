//! Lexical scope state threaded through the indexing walk

use crate::symbol::SymbolId;
use std::path::Path;

/// Name given to anonymous namespaces, unions and enums
pub const ANONYMOUS: &str = "<anonymous>";

/// Where the walk currently is.
///
/// Contexts are cheap to derive: entering a scope clones the using list,
/// so directives seen inside a block are dropped again when the walk
/// leaves it.
#[derive(Debug, Clone)]
pub struct ScopeContext<'p> {
    /// File being walked
    pub file_path: &'p Path,
    /// `::`-joined path of the enclosing scopes, empty at file scope
    pub prefix: String,
    /// Symbol new declarations are attached to
    pub parent: Option<SymbolId>,
    /// `using namespace` targets visible here, in declaration order
    pub using_namespaces: Vec<String>,
}

impl<'p> ScopeContext<'p> {
    /// File scope of `file_path`
    pub fn root(file_path: &'p Path) -> Self {
        Self {
            file_path,
            prefix: String::new(),
            parent: None,
            using_namespaces: Vec::new(),
        }
    }

    /// Child scope named by `qualified_name`, owned by `parent`
    pub fn enter(&self, qualified_name: impl Into<String>, parent: SymbolId) -> Self {
        Self {
            file_path: self.file_path,
            prefix: qualified_name.into(),
            parent: Some(parent),
            using_namespaces: self.using_namespaces.clone(),
        }
    }

    /// Qualified name of `name` declared in this scope
    pub fn qualify(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}::{}", self.prefix, name)
        }
    }

    /// Record `using namespace target;` for the rest of this scope.
    ///
    /// Inside a namespace an unqualified target may name a sibling, so the
    /// scope-relative spelling is tried before the absolute one.
    pub fn add_using(&mut self, target: &str) {
        let target = target.strip_prefix("::").unwrap_or(target);
        if target.is_empty() {
            return;
        }
        if !self.prefix.is_empty() && !target.contains("::") {
            let relative = format!("{}::{}", self.prefix, target);
            self.push_using(relative);
        }
        self.push_using(target.to_string());
    }

    fn push_using(&mut self, name: String) {
        if !self.using_namespaces.contains(&name) {
            self.using_namespaces.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify() {
        let path = Path::new("a.hpp");
        let root = ScopeContext::root(path);
        assert_eq!(root.qualify("Foo"), "Foo");

        let ns = root.enter("outer::inner", SymbolId(1));
        assert_eq!(ns.qualify("Foo"), "outer::inner::Foo");
        assert_eq!(ns.parent, Some(SymbolId(1)));
    }

    #[test]
    fn test_using_inside_namespace_adds_relative_spelling() {
        let path = Path::new("a.hpp");
        let mut ns = ScopeContext::root(path).enter("app", SymbolId(1));
        ns.add_using("detail");
        ns.add_using("std::chrono");
        assert_eq!(ns.using_namespaces, vec!["app::detail", "detail", "std::chrono"]);

        let mut root = ScopeContext::root(path);
        root.add_using("::detail");
        root.add_using("detail");
        assert_eq!(root.using_namespaces, vec!["detail"]);
    }

    #[test]
    fn test_using_reverts_on_scope_exit() {
        let path = Path::new("a.hpp");
        let root = ScopeContext::root(path);
        let mut inner = root.enter("ns", SymbolId(1));
        inner.add_using("other");

        assert_eq!(inner.using_namespaces.len(), 2);
        assert!(root.using_namespaces.is_empty());
    }
}
