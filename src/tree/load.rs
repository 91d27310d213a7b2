//! Loading tree dumps from disk.
//!
//! A dump is a JSON document holding either one [`SourceFile`] or an array
//! of them. Several dumps can be combined into one forest with glob
//! patterns.

use crate::tree::SourceFile;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(untagged)]
enum ForestDocument {
    Many(Vec<SourceFile>),
    One(SourceFile),
}

/// Read one tree dump.
pub fn load_forest(path: &Path) -> Result<Vec<SourceFile>> {
    let contents = std::fs::read_to_string(path)?;
    let files = match serde_json::from_str::<ForestDocument>(&contents)? {
        ForestDocument::Many(files) => files,
        ForestDocument::One(file) => vec![file],
    };
    tracing::debug!("Loaded {} tree(s) from {}", files.len(), path.display());
    Ok(files)
}

/// Read every dump matched by `patterns`, in pattern order then path order.
///
/// A dump matched by more than one pattern is read once.
pub fn load_forest_glob(patterns: &[String]) -> Result<Vec<SourceFile>> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut forest = Vec::new();

    for pattern in patterns {
        let mut matched = false;
        for entry in glob::glob(pattern)? {
            let path = entry.map_err(|e| Error::Io(e.into_error()))?;
            matched = true;
            if !seen.insert(path.clone()) {
                continue;
            }
            forest.extend(load_forest(&path)?);
        }
        if !matched {
            return Err(Error::NoInput(pattern.clone()));
        }
    }

    Ok(forest)
}
