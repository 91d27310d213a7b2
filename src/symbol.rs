//! Symbol types
//!
//! A [`Symbol`] is one declared entity of the corpus. Every symbol is owned
//! by the [`SymbolTable`](crate::table::SymbolTable) and addressed by a
//! [`SymbolId`]; all relationships between symbols (scope nesting,
//! inheritance, type usage) are lists of ids resolved through the table.

use crate::tree::{AccessSpecifier, Node};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Opaque handle of a symbol.
///
/// Valid ids are non-zero. [`SymbolId::INVALID`] is the "not found" value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub const INVALID: SymbolId = SymbolId(0);

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Arena slot of a valid id
    pub(crate) fn index(&self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Category of a declared entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Namespace,
    Class,
    Struct,
    Union,
    Enum,
    EnumValue,
    Function,
    Constructor,
    Destructor,
    Operator,
    Variable,
    TypeAlias,
    Concept,
    ObjectLikeMacro,
    FunctionLikeMacro,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::Union => "union",
            SymbolKind::Enum => "enum",
            SymbolKind::EnumValue => "enum_value",
            SymbolKind::Function => "function",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Destructor => "destructor",
            SymbolKind::Operator => "operator",
            SymbolKind::Variable => "variable",
            SymbolKind::TypeAlias => "type_alias",
            SymbolKind::Concept => "concept",
            SymbolKind::ObjectLikeMacro => "object_like_macro",
            SymbolKind::FunctionLikeMacro => "function_like_macro",
        }
    }

    pub fn all() -> &'static [SymbolKind] {
        &[
            SymbolKind::Namespace,
            SymbolKind::Class,
            SymbolKind::Struct,
            SymbolKind::Union,
            SymbolKind::Enum,
            SymbolKind::EnumValue,
            SymbolKind::Function,
            SymbolKind::Constructor,
            SymbolKind::Destructor,
            SymbolKind::Operator,
            SymbolKind::Variable,
            SymbolKind::TypeAlias,
            SymbolKind::Concept,
            SymbolKind::ObjectLikeMacro,
            SymbolKind::FunctionLikeMacro,
        ]
    }

    /// Kinds that open a scope other symbols nest in
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            SymbolKind::Namespace
                | SymbolKind::Class
                | SymbolKind::Struct
                | SymbolKind::Union
                | SymbolKind::Enum
        )
    }

    /// Kinds a type reference can bind to
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Struct
                | SymbolKind::Union
                | SymbolKind::Enum
                | SymbolKind::TypeAlias
        )
    }

    /// Class and struct differ only in default access; a declaration of
    /// one redeclares the other
    pub fn is_class_like(&self) -> bool {
        matches!(self, SymbolKind::Class | SymbolKind::Struct)
    }
}

impl FromStr for SymbolKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "namespace" | "ns" => Ok(SymbolKind::Namespace),
            "class" => Ok(SymbolKind::Class),
            "struct" => Ok(SymbolKind::Struct),
            "union" => Ok(SymbolKind::Union),
            "enum" => Ok(SymbolKind::Enum),
            "enum_value" | "enumvalue" | "enumerator" => Ok(SymbolKind::EnumValue),
            "function" | "fn" | "method" => Ok(SymbolKind::Function),
            "constructor" | "ctor" => Ok(SymbolKind::Constructor),
            "destructor" | "dtor" => Ok(SymbolKind::Destructor),
            "operator" | "op" => Ok(SymbolKind::Operator),
            "variable" | "var" | "field" => Ok(SymbolKind::Variable),
            "type_alias" | "typealias" | "typedef" | "alias" => Ok(SymbolKind::TypeAlias),
            "concept" => Ok(SymbolKind::Concept),
            "object_like_macro" | "macro" | "define" => Ok(SymbolKind::ObjectLikeMacro),
            "function_like_macro" => Ok(SymbolKind::FunctionLikeMacro),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a declaration lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file_path: PathBuf,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceLocation {
    /// Location of `node` inside `file_path`
    pub fn of(file_path: impl Into<PathBuf>, node: &Node) -> Self {
        Self {
            file_path: file_path.into(),
            start_line: node.span.start_line,
            start_column: node.span.start_column,
            end_line: node.span.end_line,
            end_column: node.span.end_column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path.display(), self.start_line, self.start_column)
    }
}

/// One indexed entity.
///
/// `node` borrows the declaration from the caller's forest, so a symbol
/// (and the table holding it) never outlives the trees it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct Symbol<'a> {
    /// Assigned by the table on insertion
    pub id: SymbolId,
    pub kind: SymbolKind,
    /// Simple identifier (`Bar`, `operator+`, `~Foo`)
    pub name: String,
    /// `::`-joined scope path (`foo::Bar::baz`); macros are unqualified
    pub qualified_name: String,
    /// Rendered parameter types for callables, empty otherwise
    #[serde(skip_serializing_if = "String::is_empty")]
    pub signature: String,
    pub access: AccessSpecifier,
    pub location: SourceLocation,
    /// Class/struct seen without members, bases or nested types
    pub is_forward_declaration: bool,

    /// Enclosing namespace, class, struct, union or enum
    pub parent: Option<SymbolId>,
    pub children: Vec<SymbolId>,

    pub base_classes: Vec<SymbolId>,
    pub derived_classes: Vec<SymbolId>,
    pub referenced_types: Vec<SymbolId>,
    pub referenced_by: Vec<SymbolId>,

    /// `using namespace` targets visible where this symbol was declared
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub using_namespaces: Vec<String>,

    #[serde(skip)]
    pub node: Option<&'a Node>,
}

impl<'a> Symbol<'a> {
    /// Create an unregistered symbol with no relationships
    pub fn new(kind: SymbolKind, name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            id: SymbolId::INVALID,
            kind,
            name: name.into(),
            qualified_name: qualified_name.into(),
            signature: String::new(),
            access: AccessSpecifier::None,
            location: SourceLocation::default(),
            is_forward_declaration: false,
            parent: None,
            children: Vec::new(),
            base_classes: Vec::new(),
            derived_classes: Vec::new(),
            referenced_types: Vec::new(),
            referenced_by: Vec::new(),
            using_namespaces: Vec::new(),
            node: None,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn with_access(mut self, access: AccessSpecifier) -> Self {
        self.access = access;
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_node(mut self, node: &'a Node) -> Self {
        self.node = Some(node);
        self
    }

    /// Qualified name minus its last component; empty at global scope.
    ///
    /// This is the scope the symbol's own type references are looked up
    /// from.
    pub fn enclosing_scope(&self) -> &str {
        self.qualified_name
            .rfind("::")
            .map(|pos| &self.qualified_name[..pos])
            .unwrap_or("")
    }

    /// Short human description, e.g. `function foo::bar (int, float)`
    pub fn short_description(&self) -> String {
        if self.signature.is_empty() {
            format!("{} {}", self.kind, self.qualified_name)
        } else {
            format!("{} {} {}", self.kind, self.qualified_name, self.signature)
        }
    }
}

impl PartialEq for Symbol<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol<'_> {}
