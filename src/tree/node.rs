//! Declaration nodes
//!
//! The upstream parser hands over one [`SourceFile`] per translation unit or
//! header. Each file is an ordered list of [`Node`]s; a node is a source
//! [`Span`] plus a closed [`NodeKind`] carrying the kind-specific fields.
//!
//! Nodes serialize with an internal `kind` tag, so a tree dump looks like:
//!
//! ```json
//! { "span": { "start_line": 1, "start_column": 0, "end_line": 1, "end_column": 14 },
//!   "kind": "struct", "name": "Foo" }
//! ```

use super::types::{Parameter, TypeSignature};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Member access as tagged by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessSpecifier {
    Public,
    Protected,
    Private,
    /// Not a member (namespace-scope entity)
    #[default]
    None,
}

impl AccessSpecifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessSpecifier::Public => "public",
            AccessSpecifier::Protected => "protected",
            AccessSpecifier::Private => "private",
            AccessSpecifier::None => "none",
        }
    }
}

impl std::fmt::Display for AccessSpecifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Start/end position of a declaration (lines 1-indexed, columns 0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// Root of one parsed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path as the corpus names it (relative or absolute, any separator)
    pub path: PathBuf,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// Append a top-level declaration
    pub fn with_node(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    /// Include directives of this file in source order.
    ///
    /// With `nested`, directives inside namespace blocks are reported too.
    pub fn includes(&self, nested: bool) -> Vec<&IncludeNode> {
        let mut out = Vec::new();
        collect_includes(&self.children, nested, &mut out);
        out
    }
}

fn collect_includes<'n>(nodes: &'n [Node], nested: bool, out: &mut Vec<&'n IncludeNode>) {
    for node in nodes {
        match &node.kind {
            NodeKind::Include(inc) => out.push(inc),
            NodeKind::Namespace(ns) if nested => collect_includes(&ns.children, nested, out),
            _ => {}
        }
    }
}

/// One declaration in a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub span: Span,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(kind: impl Into<NodeKind>) -> Self {
        Self {
            span: Span::default(),
            kind: kind.into(),
        }
    }

    /// Set the source span
    pub fn at(mut self, start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        self.span = Span {
            start_line,
            start_column,
            end_line,
            end_column,
        };
        self
    }

    /// Declared name, if the kind has one
    pub fn name(&self) -> Option<&str> {
        let name = match &self.kind {
            NodeKind::Include(n) => &n.path,
            NodeKind::ObjectLikeMacro(n) => &n.name,
            NodeKind::FunctionLikeMacro(n) => &n.name,
            NodeKind::Namespace(n) => &n.name,
            NodeKind::UsingNamespace(n) => &n.name,
            NodeKind::Typedef(n) => &n.alias_name,
            NodeKind::TypeAlias(n) => &n.alias_name,
            NodeKind::Enum(n) => &n.name,
            NodeKind::Enumerator(n) => &n.name,
            NodeKind::Variable(n) => &n.name,
            NodeKind::Concept(n) => &n.name,
            NodeKind::Function(n) => &n.name,
            NodeKind::Constructor(n) => &n.name,
            NodeKind::Destructor(n) => &n.name,
            NodeKind::Operator(n) => &n.operator_symbol,
            NodeKind::Union(n) => &n.name,
            NodeKind::Struct(n) => &n.name,
            NodeKind::Class(n) => &n.name,
        };
        (!name.is_empty()).then_some(name.as_str())
    }
}

/// Closed set of declaration kinds the indexer understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Include(IncludeNode),
    ObjectLikeMacro(ObjectLikeMacroNode),
    FunctionLikeMacro(FunctionLikeMacroNode),
    Namespace(NamespaceNode),
    UsingNamespace(UsingNamespaceNode),
    Typedef(TypedefNode),
    TypeAlias(TypeAliasNode),
    Enum(EnumNode),
    Enumerator(EnumeratorNode),
    Variable(VariableNode),
    Concept(ConceptNode),
    Function(FunctionNode),
    Constructor(ConstructorNode),
    Destructor(DestructorNode),
    Operator(OperatorNode),
    Union(UnionNode),
    Struct(StructNode),
    Class(ClassNode),
}

macro_rules! node_kind_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for NodeKind {
                fn from(node: $ty) -> Self {
                    NodeKind::$variant(node)
                }
            }
        )*
    };
}

node_kind_from! {
    Include(IncludeNode),
    ObjectLikeMacro(ObjectLikeMacroNode),
    FunctionLikeMacro(FunctionLikeMacroNode),
    Namespace(NamespaceNode),
    UsingNamespace(UsingNamespaceNode),
    Typedef(TypedefNode),
    TypeAlias(TypeAliasNode),
    Enum(EnumNode),
    Enumerator(EnumeratorNode),
    Variable(VariableNode),
    Concept(ConceptNode),
    Function(FunctionNode),
    Constructor(ConstructorNode),
    Destructor(DestructorNode),
    Operator(OperatorNode),
    Union(UnionNode),
    Struct(StructNode),
    Class(ClassNode),
}

/// `#include "path"` or `#include <path>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncludeNode {
    pub path: String,
    /// Angle-bracket form
    pub is_system: bool,
}

impl IncludeNode {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_system: false,
        }
    }

    pub fn system(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_system: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectLikeMacroNode {
    pub name: String,
    pub body: String,
}

impl ObjectLikeMacroNode {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionLikeMacroNode {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: String,
}

impl FunctionLikeMacroNode {
    pub fn new(name: impl Into<String>, parameters: &[&str], body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceNode {
    /// Name as written; `a::b::c` for nested namespace definitions
    pub name: String,
    pub is_anonymous: bool,
    pub is_nested: bool,
    pub children: Vec<Node>,
}

impl NamespaceNode {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            is_nested: name.contains("::"),
            name,
            is_anonymous: false,
            children: Vec::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            is_anonymous: true,
            ..Self::default()
        }
    }

    pub fn with_child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }
}

/// `using namespace name;`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsingNamespaceNode {
    pub name: String,
}

impl UsingNamespaceNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// `typedef target alias;`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedefNode {
    pub alias_name: String,
    pub target_type: String,
}

impl TypedefNode {
    pub fn new(alias_name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            alias_name: alias_name.into(),
            target_type: target_type.into(),
        }
    }
}

/// `using alias = target;`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeAliasNode {
    pub alias_name: String,
    pub target_type: String,
}

impl TypeAliasNode {
    pub fn new(alias_name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            alias_name: alias_name.into(),
            target_type: target_type.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumNode {
    /// Empty for anonymous enums
    pub name: String,
    pub underlying_type: String,
    /// `enum class` / `enum struct`
    pub is_scoped: bool,
    /// [`NodeKind::Enumerator`] nodes; anything else is ignored
    pub enumerators: Vec<Node>,
}

impl EnumNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn scoped(mut self) -> Self {
        self.is_scoped = true;
        self
    }

    pub fn with_enumerator(mut self, name: impl Into<String>) -> Self {
        self.enumerators.push(Node::new(EnumeratorNode::new(name)));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumeratorNode {
    pub name: String,
    pub value: String,
}

impl EnumeratorNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableNode {
    pub name: String,
    pub type_signature: TypeSignature,
    pub initial_value: String,
    pub is_static: bool,
    pub is_constexpr: bool,
}

impl VariableNode {
    pub fn new(name: impl Into<String>, type_signature: TypeSignature) -> Self {
        Self {
            name: name.into(),
            type_signature,
            ..Self::default()
        }
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptNode {
    pub name: String,
    pub constraint: String,
}

impl ConceptNode {
    pub fn new(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: constraint.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionNode {
    pub name: String,
    pub return_signature: TypeSignature,
    pub parameters: Vec<Parameter>,
    pub is_static: bool,
    pub is_const: bool,
    pub is_virtual: bool,
}

impl FunctionNode {
    pub fn new(name: impl Into<String>, return_signature: TypeSignature) -> Self {
        Self {
            name: name.into(),
            return_signature,
            ..Self::default()
        }
    }

    pub fn with_param(mut self, type_signature: TypeSignature, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(type_signature, name));
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructorNode {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub is_explicit: bool,
}

impl ConstructorNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, type_signature: TypeSignature, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(type_signature, name));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestructorNode {
    /// Includes the tilde: `~Foo`
    pub name: String,
    pub is_virtual: bool,
}

impl DestructorNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_virtual: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorNode {
    /// The symbol after the `operator` keyword: `+`, `==`, `()`
    pub operator_symbol: String,
    pub return_signature: TypeSignature,
    pub parameters: Vec<Parameter>,
}

impl OperatorNode {
    pub fn new(operator_symbol: impl Into<String>, return_signature: TypeSignature) -> Self {
        Self {
            operator_symbol: operator_symbol.into(),
            return_signature,
            parameters: Vec::new(),
        }
    }

    pub fn with_param(mut self, type_signature: TypeSignature, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(type_signature, name));
        self
    }
}

/// A base-class specifier: `public Base`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseSpecifier {
    #[serde(default)]
    pub access: AccessSpecifier,
    pub name: String,
}

/// A class member with the access tag in effect at its declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub access: AccessSpecifier,
    pub node: Node,
}

/// Which member list a declaration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSlot {
    Variables,
    Functions,
    StaticVariables,
    StaticFunctions,
    Constructors,
    Destructors,
    Operators,
    NestedTypes,
}

impl MemberSlot {
    /// Slot a member of the given kind is filed under
    pub fn for_kind(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Variable(v) if v.is_static => MemberSlot::StaticVariables,
            NodeKind::Variable(_) => MemberSlot::Variables,
            NodeKind::Function(f) if f.is_static => MemberSlot::StaticFunctions,
            NodeKind::Function(_) => MemberSlot::Functions,
            NodeKind::Constructor(_) => MemberSlot::Constructors,
            NodeKind::Destructor(_) => MemberSlot::Destructors,
            NodeKind::Operator(_) => MemberSlot::Operators,
            _ => MemberSlot::NestedTypes,
        }
    }
}

/// Member lists of a class, struct or union, grouped the way the parser
/// reports them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Members<M> {
    #[serde(default = "Vec::new")]
    pub variables: Vec<M>,
    #[serde(default = "Vec::new")]
    pub functions: Vec<M>,
    #[serde(default = "Vec::new")]
    pub static_variables: Vec<M>,
    #[serde(default = "Vec::new")]
    pub static_functions: Vec<M>,
    #[serde(default = "Vec::new")]
    pub constructors: Vec<M>,
    #[serde(default = "Vec::new")]
    pub destructors: Vec<M>,
    #[serde(default = "Vec::new")]
    pub operators: Vec<M>,
    #[serde(default = "Vec::new")]
    pub nested_types: Vec<M>,
}

impl<M> Default for Members<M> {
    fn default() -> Self {
        Self {
            variables: Vec::new(),
            functions: Vec::new(),
            static_variables: Vec::new(),
            static_functions: Vec::new(),
            constructors: Vec::new(),
            destructors: Vec::new(),
            operators: Vec::new(),
            nested_types: Vec::new(),
        }
    }
}

impl<M> Members<M> {
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// All members, list by list
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.variables
            .iter()
            .chain(&self.functions)
            .chain(&self.static_variables)
            .chain(&self.static_functions)
            .chain(&self.constructors)
            .chain(&self.destructors)
            .chain(&self.operators)
            .chain(&self.nested_types)
    }

    pub fn slot_mut(&mut self, slot: MemberSlot) -> &mut Vec<M> {
        match slot {
            MemberSlot::Variables => &mut self.variables,
            MemberSlot::Functions => &mut self.functions,
            MemberSlot::StaticVariables => &mut self.static_variables,
            MemberSlot::StaticFunctions => &mut self.static_functions,
            MemberSlot::Constructors => &mut self.constructors,
            MemberSlot::Destructors => &mut self.destructors,
            MemberSlot::Operators => &mut self.operators,
            MemberSlot::NestedTypes => &mut self.nested_types,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnionNode {
    pub name: String,
    pub is_anonymous: bool,
    pub members: Members<Node>,
}

impl UnionNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn anonymous() -> Self {
        Self {
            is_anonymous: true,
            ..Self::default()
        }
    }

    pub fn with_member(mut self, node: Node) -> Self {
        self.members.slot_mut(MemberSlot::for_kind(&node.kind)).push(node);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructNode {
    pub name: String,
    pub base_classes: Vec<BaseSpecifier>,
    pub members: Members<Node>,
}

impl StructNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_base(mut self, access: AccessSpecifier, name: impl Into<String>) -> Self {
        self.base_classes.push(BaseSpecifier {
            access,
            name: name.into(),
        });
        self
    }

    pub fn with_member(mut self, node: Node) -> Self {
        self.members.slot_mut(MemberSlot::for_kind(&node.kind)).push(node);
        self
    }

    /// No members, bases or nested types
    pub fn is_forward_declaration(&self) -> bool {
        self.members.is_empty() && self.base_classes.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNode {
    pub name: String,
    pub base_classes: Vec<BaseSpecifier>,
    pub members: Members<Member>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_base(mut self, access: AccessSpecifier, name: impl Into<String>) -> Self {
        self.base_classes.push(BaseSpecifier {
            access,
            name: name.into(),
        });
        self
    }

    pub fn with_member(mut self, access: AccessSpecifier, node: Node) -> Self {
        let slot = MemberSlot::for_kind(&node.kind);
        self.members.slot_mut(slot).push(Member { access, node });
        self
    }

    /// No members, bases or nested types
    pub fn is_forward_declaration(&self) -> bool {
        self.members.is_empty() && self.base_classes.is_empty()
    }
}
