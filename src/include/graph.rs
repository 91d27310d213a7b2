//! Include graph construction and ordering

use super::path;
use crate::tree::SourceFile;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;

/// One file of the forest with its resolved include edges.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry<'a> {
    pub path: PathBuf,
    #[serde(skip)]
    pub source: &'a SourceFile,
    /// Indices of files this file includes
    pub depends_on: Vec<usize>,
    /// Indices of files including this file
    pub depended_by: Vec<usize>,
}

/// File-level include graph over a borrowed forest.
///
/// Indices are positions in the slice the graph was built from.
#[derive(Debug, Default)]
pub struct DependencyGraph<'a> {
    entries: Vec<FileEntry<'a>>,
    /// Generic and normalized full paths -> file indices
    by_path: HashMap<String, Vec<usize>>,
    /// Bare file name -> file indices
    by_file_name: HashMap<String, Vec<usize>>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph, scanning includes nested in namespace blocks too
    pub fn build(files: &'a [SourceFile]) -> Self {
        Self::build_with(files, true)
    }

    /// Build the graph; with `scan_nested_includes` off only top-level
    /// directives are considered
    pub fn build_with(files: &'a [SourceFile], scan_nested_includes: bool) -> Self {
        let mut graph = Self {
            entries: Vec::with_capacity(files.len()),
            by_path: HashMap::new(),
            by_file_name: HashMap::new(),
        };

        for (idx, file) in files.iter().enumerate() {
            graph.register(idx, file);
        }

        let mut edges = 0usize;
        for idx in 0..graph.entries.len() {
            let source = graph.entries[idx].source;
            let includer = path::generic(&graph.entries[idx].path);
            let includer_dir = path::parent_dir(&includer).to_string();

            for include in source.includes(scan_nested_includes) {
                if include.is_system {
                    continue;
                }

                let Some(target) = graph.resolve_include(&include.path, &includer_dir) else {
                    tracing::debug!("Unresolved include \"{}\" in {}", include.path, includer);
                    continue;
                };
                if target == idx || graph.entries[idx].depends_on.contains(&target) {
                    continue;
                }

                graph.entries[idx].depends_on.push(target);
                graph.entries[target].depended_by.push(idx);
                edges += 1;
            }
        }

        tracing::debug!("Include graph: {} files, {} edges", graph.entries.len(), edges);
        graph
    }

    fn register(&mut self, idx: usize, file: &'a SourceFile) {
        let generic = path::generic(&file.path);
        let normalized = path::lexically_normal(&generic);
        let file_name = path::file_name(&generic).to_string();

        for key in [generic, normalized] {
            push_unique(self.by_path.entry(key).or_default(), idx);
        }
        push_unique(self.by_file_name.entry(file_name).or_default(), idx);

        self.entries.push(FileEntry {
            path: file.path.clone(),
            source: file,
            depends_on: Vec::new(),
            depended_by: Vec::new(),
        });
    }

    /// Map an include path, as written in a file living in `includer_dir`,
    /// to a file index.
    ///
    /// Tried in order: the path relative to the includer, a unique file name
    /// match, a suffix match in the includer's own directory, the shortest
    /// suffix match, and finally the first file with that name.
    pub fn resolve_include(&self, include_path: &str, includer_dir: &str) -> Option<usize> {
        let candidate = path::join(includer_dir, include_path);
        if let Some(&idx) = self.by_path.get(&candidate).and_then(|ids| ids.first()) {
            return Some(idx);
        }

        let include_generic = include_path.replace('\\', "/");
        let matches = self.by_file_name.get(path::file_name(&include_generic))?;
        match matches.as_slice() {
            [] => return None,
            [only] => return Some(*only),
            _ => {}
        }

        let includer_dir = path::lexically_normal(includer_dir);
        let mut best: Option<(usize, usize)> = None;

        for &idx in matches {
            let entry = path::generic(&self.entries[idx].path);
            if !path::ends_with_components(&entry, &include_generic) {
                continue;
            }
            if path::lexically_normal(path::parent_dir(&entry)) == includer_dir {
                return Some(idx);
            }
            if best.is_none_or(|(_, len)| entry.len() < len) {
                best = Some((idx, entry.len()));
            }
        }

        best.map(|(idx, _)| idx).or_else(|| matches.first().copied())
    }

    /// Dependency-respecting order of all file indices.
    ///
    /// Kahn's algorithm over `depends_on`; files without pending
    /// dependencies are emitted in discovery order. Files stuck in a cycle
    /// are appended in registration order, so every index appears exactly
    /// once.
    pub fn topological_sort(&self) -> Vec<usize> {
        let n = self.entries.len();
        let mut in_degree: Vec<usize> = self.entries.iter().map(|e| e.depends_on.len()).collect();
        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut emitted = vec![false; n];
        let mut order = Vec::with_capacity(n);

        while let Some(current) = queue.pop_front() {
            emitted[current] = true;
            order.push(current);

            for &dependent in &self.entries[current].depended_by {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() < n {
            let stuck: Vec<usize> = (0..n).filter(|&i| !emitted[i]).collect();
            tracing::warn!(
                "Include cycle among {} file(s); indexing them in input order",
                stuck.len()
            );
            order.extend(stuck);
        }

        order
    }

    /// Files that include `idx`, directly or transitively, nearest first
    pub fn affected_files(&self, idx: usize) -> Vec<usize> {
        let mut visited = HashSet::from([idx]);
        let mut queue = VecDeque::from([idx]);
        let mut affected = Vec::new();

        while let Some(current) = queue.pop_front() {
            let Some(entry) = self.entries.get(current) else {
                continue;
            };
            for &includer in &entry.depended_by {
                if visited.insert(includer) {
                    affected.push(includer);
                    queue.push_back(includer);
                }
            }
        }

        affected
    }

    /// Index of the file registered under `path`: its full path in
    /// generic or normalized spelling, else a bare file name
    pub fn find_file(&self, path: &str) -> Option<usize> {
        let generic = path.replace('\\', "/");
        self.by_path
            .get(&generic)
            .or_else(|| self.by_path.get(&path::lexically_normal(&generic)))
            .or_else(|| self.by_file_name.get(&generic))
            .and_then(|ids| ids.first().copied())
    }

    pub fn entries(&self) -> &[FileEntry<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|e| e.depends_on.len()).sum()
    }
}

fn push_unique(slot: &mut Vec<usize>, idx: usize) {
    if !slot.contains(&idx) {
        slot.push(idx);
    }
}
