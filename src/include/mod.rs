//! Dependency Graph - include-level ordering of the forest
//!
//! Local `#include "..."` directives are resolved to other files of the
//! forest purely by path text. The resulting graph yields the order in
//! which files are indexed: every file after the files it includes, as far
//! as cycles allow.

pub mod graph;
pub mod path;

pub use graph::{DependencyGraph, FileEntry};
