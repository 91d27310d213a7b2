//! Declaration trees - the indexer's input
//!
//! Parsing is someone else's job: these types describe the already-parsed,
//! per-file trees the upstream front end produces. They are plain data with
//! serde derives, so a front end in any language can hand them over as JSON.

pub mod load;
pub mod node;
pub mod types;

pub use load::{load_forest, load_forest_glob};
pub use node::{
    AccessSpecifier, BaseSpecifier, ClassNode, ConceptNode, ConstructorNode, DestructorNode,
    EnumNode, EnumeratorNode, FunctionLikeMacroNode, FunctionNode, IncludeNode, Member,
    MemberSlot, Members, NamespaceNode, Node, NodeKind, ObjectLikeMacroNode, OperatorNode,
    SourceFile, Span, StructNode, TypeAliasNode, TypedefNode, UnionNode, UsingNamespaceNode,
    VariableNode,
};
pub use types::{Parameter, TemplateArgument, TypeSignature, render_signature};
