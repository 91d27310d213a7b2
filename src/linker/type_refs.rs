//! Extraction of type names mentioned by a declaration

use crate::tree::{Node, NodeKind};
use std::collections::HashSet;

/// Keywords and fundamental types that never name a user type
const NON_TYPE_TOKENS: &[&str] = &[
    "const", "volatile", "mutable", "typename", "template", "struct", "class", "union", "enum",
    "signed", "unsigned", "short", "long", "int", "char", "char8_t", "char16_t", "char32_t",
    "wchar_t", "bool", "float", "double", "void", "auto", "decltype", "nullptr_t",
];

fn is_candidate(name: &str) -> bool {
    let bare = name.strip_prefix("::").unwrap_or(name);
    !bare.is_empty()
        && !NON_TYPE_TOKENS.contains(&bare)
        && !bare.starts_with(|c: char| c.is_ascii_digit() || c == '-')
}

/// Type names a declaration refers to, deduplicated, in first-mention
/// order.
///
/// Functions and operators contribute their return and parameter types,
/// constructors their parameter types, variables their declared type, and
/// aliases every type name in their target. Template arguments are
/// followed recursively.
pub fn referenced_type_names(node: &Node) -> Vec<String> {
    let mut names: Vec<&str> = Vec::new();
    let mut tokens: Vec<String> = Vec::new();

    match &node.kind {
        NodeKind::Function(f) => {
            names.extend(f.return_signature.type_names());
            names.extend(f.parameters.iter().flat_map(|p| p.type_signature.type_names()));
        }
        NodeKind::Constructor(c) => {
            names.extend(c.parameters.iter().flat_map(|p| p.type_signature.type_names()));
        }
        NodeKind::Operator(op) => {
            names.extend(op.return_signature.type_names());
            names.extend(op.parameters.iter().flat_map(|p| p.type_signature.type_names()));
        }
        NodeKind::Variable(v) => names.extend(v.type_signature.type_names()),
        NodeKind::TypeAlias(ta) => tokens = tokenize_type(&ta.target_type),
        NodeKind::Typedef(td) => tokens = tokenize_type(&td.target_type),
        _ => {}
    }

    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(str::to_string)
        .chain(tokens)
        .filter(|n| is_candidate(n) && seen.insert(n.clone()))
        .collect()
}

/// Base-class names of a class or struct, template arguments stripped
pub fn base_class_names(node: &Node) -> Vec<&str> {
    let bases = match &node.kind {
        NodeKind::Class(cls) => &cls.base_classes,
        NodeKind::Struct(s) => &s.base_classes,
        _ => return Vec::new(),
    };
    bases
        .iter()
        .map(|b| b.name.split('<').next().unwrap_or(&b.name).trim())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Split a type spelled as text (`const std::map<Key, Value*>&`) into the
/// names it mentions (`std::map`, `Key`, `Value`)
pub fn tokenize_type(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || "<>,*&()[]".contains(c))
        .filter(|t| is_candidate(t))
        .map(str::to_string)
        .collect()
}
