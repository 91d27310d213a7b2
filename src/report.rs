//! Serializable summary of an analysis run
//!
//! [`AnalysisResult`] borrows the forest and links symbols by id. A report
//! owns its data and spells relationships out as qualified names, so it
//! can be printed as JSON or rendered as tables without the trees around.

use crate::analyzer::AnalysisResult;
use crate::indexer::IndexStats;
use crate::linker::LinkStats;
use crate::symbol::{Symbol, SymbolId, SymbolKind};
use crate::table::{SymbolTable, TableStats};
use crate::tree::AccessSpecifier;
use serde::Serialize;
use std::path::PathBuf;

/// One file of the include graph
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub includes: Vec<PathBuf>,
    pub included_by: Vec<PathBuf>,
}

/// One symbol with its relationships resolved to qualified names
#[derive(Debug, Clone, Serialize)]
pub struct SymbolReport {
    pub id: SymbolId,
    pub kind: SymbolKind,
    pub qualified_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signature: String,
    /// Kind, qualified name and signature on one line
    pub description: String,
    pub access: AccessSpecifier,
    /// `path:line:column`
    pub location: String,
    pub is_forward_declaration: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub base_classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub derived_classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referenced_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referenced_by: Vec<String>,
}

impl SymbolReport {
    pub fn new(symbol: &Symbol<'_>, table: &SymbolTable<'_>) -> Self {
        let names = |ids: &[SymbolId]| -> Vec<String> {
            ids.iter()
                .filter_map(|id| table.find_by_id(*id))
                .map(|s| s.qualified_name.clone())
                .collect()
        };

        Self {
            id: symbol.id,
            kind: symbol.kind,
            qualified_name: symbol.qualified_name.clone(),
            signature: symbol.signature.clone(),
            description: symbol.short_description(),
            access: symbol.access,
            location: symbol.location.to_string(),
            is_forward_declaration: symbol.is_forward_declaration,
            parent: symbol
                .parent
                .and_then(|id| table.find_by_id(id))
                .map(|p| p.qualified_name.clone()),
            base_classes: names(&symbol.base_classes),
            derived_classes: names(&symbol.derived_classes),
            referenced_types: names(&symbol.referenced_types),
            referenced_by: names(&symbol.referenced_by),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub files: Vec<FileReport>,
    /// File paths in indexing order
    pub order: Vec<PathBuf>,
    pub table: TableStats,
    pub index: IndexStats,
    pub link: LinkStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<SymbolReport>,
}

impl AnalysisReport {
    /// Summarize `result`; per-symbol detail only `with_symbols`
    pub fn new(result: &AnalysisResult<'_>, with_symbols: bool) -> Self {
        let graph = &result.dependency_graph;
        let path_of = |idx: &usize| graph.entries()[*idx].path.clone();

        let files = graph
            .entries()
            .iter()
            .map(|entry| FileReport {
                path: entry.path.clone(),
                includes: entry.depends_on.iter().map(path_of).collect(),
                included_by: entry.depended_by.iter().map(path_of).collect(),
            })
            .collect();

        let symbols = if with_symbols {
            result
                .symbol_table
                .iter()
                .map(|s| SymbolReport::new(s, &result.symbol_table))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            files,
            order: result.order.iter().map(path_of).collect(),
            table: result.symbol_table.stats(),
            index: result.index_stats.clone(),
            link: result.link_stats.clone(),
            symbols,
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
