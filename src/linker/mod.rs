//! Linker - resolves cross-references once every symbol is known
//!
//! Runs after indexing over the complete table: base-class names become
//! inheritance edges and the types a declaration mentions become
//! reference edges, each bound with the [`TypeResolver`](crate::scope::TypeResolver).

pub mod cross_ref;
pub mod type_refs;

pub use cross_ref::{CrossReferenceLinker, EdgeStats, LinkStats};
pub use type_refs::{base_class_names, referenced_type_names};
