//! Analyzer - runs the whole pipeline over a forest
//!
//! 1. Build the include graph and order files so includes come first
//! 2. Index every file in that order
//! 3. Link base classes and type references over the complete table
//!
//! The pipeline never fails: unresolved includes and names are skipped
//! and only show up in the statistics.

use crate::config::AnalyzerConfig;
use crate::include::DependencyGraph;
use crate::indexer::{IndexStats, Indexer};
use crate::linker::{CrossReferenceLinker, LinkStats};
use crate::table::SymbolTable;
use crate::tree::SourceFile;
use std::time::Instant;

#[cfg(test)]
mod tests;

/// Everything one run produces, borrowing the analyzed forest
#[derive(Debug)]
pub struct AnalysisResult<'a> {
    pub dependency_graph: DependencyGraph<'a>,
    /// File indices in the order they were indexed
    pub order: Vec<usize>,
    pub symbol_table: SymbolTable<'a>,
    pub index_stats: IndexStats,
    pub link_stats: LinkStats,
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze `files` as one project
    pub fn analyze<'a>(&self, files: &'a [SourceFile]) -> AnalysisResult<'a> {
        let start = Instant::now();

        let dependency_graph = DependencyGraph::build_with(files, self.config.scan_nested_includes);
        let order = dependency_graph.topological_sort();

        let mut indexer = Indexer::new();
        for &idx in &order {
            indexer.index_file(&files[idx]);
        }
        let (mut symbol_table, index_stats) = indexer.finish();

        let link_stats = if self.config.link_cross_references {
            CrossReferenceLinker::new(&mut symbol_table)
                .with_using_directives(self.config.honor_using_directives)
                .run()
        } else {
            LinkStats::default()
        };

        tracing::info!(
            "Analyzed {} files: {} symbols, {} references resolved in {:.2?}",
            files.len(),
            symbol_table.len(),
            link_stats.total_resolved(),
            start.elapsed()
        );

        AnalysisResult {
            dependency_graph,
            order,
            symbol_table,
            index_stats,
            link_stats,
        }
    }
}
