//! Lexical path handling for include resolution.
//!
//! Include resolution compares paths as text, never touching the disk.
//! Every helper works on generic (`/`-separated) strings so Windows-style
//! paths in a tree dump match their POSIX spellings.

use std::path::Path;

/// `/`-separated spelling of `path`
pub fn generic(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Collapse `.` and `..` components and repeated separators.
///
/// Leading `..` components of a relative path are kept; `..` above the
/// root of an absolute path is dropped. An empty result is `.`.
pub fn lexically_normal(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Last component of a generic path
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything before the last separator; empty for a bare file name
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map(|pos| &path[..pos]).unwrap_or("")
}

/// Join and normalize
pub fn join(dir: &str, relative: &str) -> String {
    if dir.is_empty() {
        lexically_normal(relative)
    } else {
        lexically_normal(&format!("{}/{}", dir, relative))
    }
}

/// `path` ends with `suffix` on a component boundary.
///
/// `src/util/io.hpp` ends with `util/io.hpp` but not with `il/io.hpp`.
pub fn ends_with_components(path: &str, suffix: &str) -> bool {
    if suffix.is_empty() || !path.ends_with(suffix) {
        return false;
    }
    let head = &path[..path.len() - suffix.len()];
    head.is_empty() || head.ends_with('/')
}
