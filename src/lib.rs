//! # Codex - Whole-Project Semantic Indexer
//!
//! Turns a forest of already-parsed, per-file C++ declaration trees into a
//! linked, queryable symbol graph.
//!
//! Codex provides:
//! - An include-level dependency graph with a cycle-tolerant topological order
//! - A symbol table keyed by stable ids and fully qualified names
//! - Scope-aware resolution of base classes and type references across files
//!
//! ```
//! use codex::analyzer::Analyzer;
//! use codex::tree::{Node, SourceFile, StructNode};
//!
//! let files = vec![SourceFile::new("a.hpp").with_node(Node::new(StructNode::new("Foo")))];
//! let result = Analyzer::default().analyze(&files);
//! assert!(result.symbol_table.find_by_qualified_name("Foo").is_some());
//! ```

pub mod analyzer;
pub mod config;
pub mod edge;
pub mod include;
pub mod indexer;
pub mod linker;
pub mod report;
pub mod scope;
pub mod symbol;
pub mod table;
pub mod tree;
pub mod ui;

// Re-exports for convenient access
pub use analyzer::{AnalysisResult, Analyzer};
pub use config::AnalyzerConfig;
pub use edge::{Edge, EdgeKind};
pub use include::{DependencyGraph, FileEntry};
pub use symbol::{SourceLocation, Symbol, SymbolId, SymbolKind};
pub use table::SymbolTable;

/// Result type alias for Codex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Codex operations
///
/// The analysis pipeline itself never fails; these cover loading input,
/// reading configuration and parsing user-supplied names.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tree dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Cannot serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Config already exists at {} (use --force to overwrite)", .0.display())]
    ConfigExists(std::path::PathBuf),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No input matched: {0}")]
    NoInput(String),

    #[error("Unknown kind: {0}")]
    InvalidKind(String),
}
