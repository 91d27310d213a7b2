//! Scopes - name binding for the indexing walk and the linker
//!
//! C++ names bind through a chain of enclosing scopes plus any
//! `using namespace` directives in effect. [`ScopeContext`] carries that
//! state down the declaration tree during indexing; [`TypeResolver`] replays
//! it over the finished symbol table to bind type names to symbols.

pub mod context;
pub mod resolver;

pub use context::{ANONYMOUS, ScopeContext};
pub use resolver::{Resolution, ResolutionStrategy, TypeResolver};
