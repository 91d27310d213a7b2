use super::*;
use crate::symbol::{SymbolId, SymbolKind};
use crate::tree::{
    AccessSpecifier, ClassNode, ConceptNode, ConstructorNode, DestructorNode, EnumNode, FunctionNode,
    IncludeNode, NamespaceNode, Node, ObjectLikeMacroNode, OperatorNode, StructNode, TypeAliasNode,
    TypeSignature, TypedefNode, UsingNamespaceNode, VariableNode,
};
use std::path::PathBuf;

fn analyze(files: &[SourceFile]) -> AnalysisResult<'_> {
    Analyzer::default().analyze(files)
}

fn int() -> TypeSignature {
    TypeSignature::named("int")
}

fn with_field(name: &str) -> StructNode {
    StructNode::new(name).with_member(Node::new(VariableNode::new("value", int())))
}

fn position(order: &[usize], idx: usize) -> usize {
    order.iter().position(|&i| i == idx).unwrap()
}

// Include graph

#[test]
fn test_included_file_is_indexed_first() {
    let files = vec![
        SourceFile::new("project/a.hpp")
            .with_node(Node::new(IncludeNode::local("b.hpp")))
            .with_node(Node::new(StructNode::new("Bar"))),
        SourceFile::new("project/b.hpp").with_node(Node::new(StructNode::new("Foo"))),
    ];
    let result = analyze(&files);

    assert_eq!(result.order, vec![1, 0]);
    // Foo was registered first because b.hpp was indexed first
    assert_eq!(result.symbol_table.find_by_qualified_name("Foo").unwrap().id, SymbolId(1));
}

#[test]
fn test_diamond_dependency() {
    // top -> left, right -> bottom
    let files = vec![
        SourceFile::new("top.hpp")
            .with_node(Node::new(IncludeNode::local("left.hpp")))
            .with_node(Node::new(IncludeNode::local("right.hpp"))),
        SourceFile::new("left.hpp").with_node(Node::new(IncludeNode::local("bottom.hpp"))),
        SourceFile::new("right.hpp").with_node(Node::new(IncludeNode::local("bottom.hpp"))),
        SourceFile::new("bottom.hpp"),
    ];
    let result = analyze(&files);
    let order = &result.order;

    assert_eq!(order.len(), 4);
    assert!(position(order, 3) < position(order, 1));
    assert!(position(order, 3) < position(order, 2));
    assert!(position(order, 1) < position(order, 0));
    assert!(position(order, 2) < position(order, 0));
}

#[test]
fn test_mutual_include_terminates() {
    let files = vec![
        SourceFile::new("a.hpp").with_node(Node::new(IncludeNode::local("b.hpp"))),
        SourceFile::new("b.hpp").with_node(Node::new(IncludeNode::local("a.hpp"))),
    ];
    let result = analyze(&files);

    let mut order = result.order.clone();
    order.sort();
    assert_eq!(order, vec![0, 1]);
}

#[test]
fn test_system_includes_are_ignored() {
    let files = vec![
        SourceFile::new("main.cpp")
            .with_node(Node::new(IncludeNode::system("vector")))
            .with_node(Node::new(IncludeNode::system("string"))),
    ];
    let result = analyze(&files);
    assert!(result.dependency_graph.entries()[0].depends_on.is_empty());
}

// Indexing

#[test]
fn test_namespace_class_function_qualified_names() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        NamespaceNode::new("foo").with_child(Node::new(
            ClassNode::new("Bar").with_member(
                AccessSpecifier::Public,
                Node::new(FunctionNode::new("baz", TypeSignature::named("void"))),
            ),
        )),
    ))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    assert_eq!(table.find_by_qualified_name("foo").unwrap().kind, SymbolKind::Namespace);
    assert_eq!(table.find_by_qualified_name("foo::Bar").unwrap().kind, SymbolKind::Class);
    let baz = table.find_by_qualified_name("foo::Bar::baz").unwrap();
    assert_eq!(baz.kind, SymbolKind::Function);
    assert_eq!(baz.signature, "()");
}

#[test]
fn test_nested_namespace_definition() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        NamespaceNode::new("a::b::c").with_child(Node::new(StructNode::new("Foo"))),
    ))];
    let result = analyze(&files);

    for name in ["a", "a::b", "a::b::c", "a::b::c::Foo"] {
        assert!(result.symbol_table.find_by_qualified_name(name).is_some(), "missing {}", name);
    }
}

#[test]
fn test_enum_and_enumerators() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        EnumNode::new("Color")
            .scoped()
            .with_enumerator("Red")
            .with_enumerator("Green")
            .with_enumerator("Blue"),
    ))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let color = table.find_by_qualified_name("Color").unwrap();
    assert_eq!(color.kind, SymbolKind::Enum);
    assert_eq!(color.children.len(), 3);

    let red = table.find_by_qualified_name("Color::Red").unwrap();
    assert_eq!(red.kind, SymbolKind::EnumValue);
    assert_eq!(red.parent, Some(color.id));
    assert_eq!(table.find_by_kind(SymbolKind::EnumValue).len(), 3);
}

#[test]
fn test_overloaded_functions_are_distinct() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(FunctionNode::new("foo", TypeSignature::named("void")).with_param(int(), "x")))
        .with_node(Node::new(
            FunctionNode::new("foo", TypeSignature::named("void")).with_param(TypeSignature::named("float"), "x"),
        ))];
    let result = analyze(&files);

    let overloads = result.symbol_table.find_by_name("foo");
    assert_eq!(overloads.len(), 2);
    assert_ne!(overloads[0].signature, overloads[1].signature);
    assert_eq!(overloads[0].signature, "(int)");
    assert_eq!(overloads[1].signature, "(float)");
}

#[test]
fn test_forward_declaration_then_definition() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(ClassNode::new("Foo")))
        .with_node(Node::new(
            ClassNode::new("Foo").with_member(AccessSpecifier::Private, Node::new(VariableNode::new("x", int()))),
        ))];
    let result = analyze(&files);

    let foos = result.symbol_table.find_by_name("Foo");
    assert_eq!(foos.len(), 1);
    assert!(!foos[0].is_forward_declaration);
    assert!(result.symbol_table.find_by_qualified_name("Foo::x").is_some());
}

#[test]
fn test_forward_struct_completed_by_class_definition() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(StructNode::new("Foo")))
        .with_node(Node::new(
            ClassNode::new("Foo").with_member(AccessSpecifier::Private, Node::new(VariableNode::new("x", int()))),
        ))
        .with_node(Node::new(FunctionNode::new("make", TypeSignature::named("Foo"))))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let foos = table.find_all_by_qualified_name("Foo");
    assert_eq!(foos.len(), 1);
    let foo = foos[0];
    assert_eq!(foo.kind, SymbolKind::Class);
    assert!(!foo.is_forward_declaration);
    assert!(table.find_by_kind(SymbolKind::Struct).is_empty());

    assert_eq!(table.find_by_qualified_name("Foo::x").unwrap().parent, Some(foo.id));
    assert_eq!(table.find_by_qualified_name("make").unwrap().referenced_types, vec![foo.id]);
    assert_eq!(result.index_stats.promoted, 1);
}

#[test]
fn test_forward_declaration_across_files() {
    // fwd.hpp is indexed first, the definition arrives from a later file
    let files = vec![
        SourceFile::new("impl.hpp")
            .with_node(Node::new(IncludeNode::local("fwd.hpp")))
            .with_node(Node::new(
                ClassNode::new("Engine")
                    .with_member(AccessSpecifier::Public, Node::new(FunctionNode::new("start", TypeSignature::named("void")))),
            )),
        SourceFile::new("fwd.hpp")
            .with_node(Node::new(ClassNode::new("Engine")))
            .with_node(Node::new(FunctionNode::new("make", TypeSignature::named("Engine").with_pointer()))),
    ];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let engine = table.find_by_qualified_name("Engine").unwrap();
    assert!(!engine.is_forward_declaration);
    assert_eq!(engine.location.file_path, PathBuf::from("impl.hpp"));
    assert_eq!(table.find_by_qualified_name("Engine::start").unwrap().parent, Some(engine.id));
    assert_eq!(table.find_by_qualified_name("make").unwrap().referenced_types, vec![engine.id]);
    assert_eq!(result.index_stats.promoted, 1);
}

#[test]
fn test_nested_class() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        ClassNode::new("Outer").with_member(
            AccessSpecifier::Private,
            Node::new(ClassNode::new("Inner").with_member(AccessSpecifier::Public, Node::new(VariableNode::new("v", int())))),
        ),
    ))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let outer = table.find_by_qualified_name("Outer").unwrap();
    let inner = table.find_by_qualified_name("Outer::Inner").unwrap();
    assert_eq!(inner.parent, Some(outer.id));
    assert_eq!(inner.access, AccessSpecifier::Private);
    assert_eq!(table.find_by_qualified_name("Outer::Inner::v").unwrap().access, AccessSpecifier::Public);
}

#[test]
fn test_struct_members_default_public() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        StructNode::new("Point")
            .with_member(Node::new(VariableNode::new("x", int())))
            .with_member(Node::new(VariableNode::new("y", int())))
            .with_member(Node::new(VariableNode::new("origin", TypeSignature::named("Point")).with_static())),
    ))];
    let result = analyze(&files);

    for name in ["Point::x", "Point::y", "Point::origin"] {
        let member = result.symbol_table.find_by_qualified_name(name).unwrap();
        assert_eq!(member.access, AccessSpecifier::Public);
        assert_eq!(member.kind, SymbolKind::Variable);
    }
}

#[test]
fn test_class_access_specifiers() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        ClassNode::new("Account")
            .with_member(AccessSpecifier::Public, Node::new(FunctionNode::new("balance", int())))
            .with_member(AccessSpecifier::Protected, Node::new(FunctionNode::new("audit", TypeSignature::named("void"))))
            .with_member(AccessSpecifier::Private, Node::new(VariableNode::new("cents", int()))),
    ))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    assert_eq!(table.find_by_qualified_name("Account::balance").unwrap().access, AccessSpecifier::Public);
    assert_eq!(table.find_by_qualified_name("Account::audit").unwrap().access, AccessSpecifier::Protected);
    assert_eq!(table.find_by_qualified_name("Account::cents").unwrap().access, AccessSpecifier::Private);
}

#[test]
fn test_variables_aliases_concepts_and_macros() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(VariableNode::new("counter", int())))
        .with_node(Node::new(TypeAliasNode::new("Id", "unsigned long")))
        .with_node(Node::new(TypedefNode::new("Handle", "void*")))
        .with_node(Node::new(ConceptNode::new("Numeric", "std::is_arithmetic_v<T>")))
        .with_node(Node::new(ObjectLikeMacroNode::new("VERSION", "3")))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    assert_eq!(table.find_by_qualified_name("counter").unwrap().kind, SymbolKind::Variable);
    assert_eq!(table.find_by_qualified_name("Id").unwrap().kind, SymbolKind::TypeAlias);
    assert_eq!(table.find_by_qualified_name("Handle").unwrap().kind, SymbolKind::TypeAlias);
    assert_eq!(table.find_by_qualified_name("Numeric").unwrap().kind, SymbolKind::Concept);
    assert_eq!(table.find_by_qualified_name("VERSION").unwrap().kind, SymbolKind::ObjectLikeMacro);
    assert_eq!(table.len(), 5);
}

#[test]
fn test_constructor_destructor_operator() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        ClassNode::new("Vec")
            .with_member(AccessSpecifier::Public, Node::new(ConstructorNode::new("Vec")))
            .with_member(
                AccessSpecifier::Public,
                Node::new(ConstructorNode::new("Vec").with_param(TypeSignature::named("float"), "x")),
            )
            .with_member(AccessSpecifier::Public, Node::new(DestructorNode::new("~Vec")))
            .with_member(
                AccessSpecifier::Public,
                Node::new(
                    OperatorNode::new("==", TypeSignature::named("bool"))
                        .with_param(TypeSignature::named("Vec").with_const().with_lvalue_ref(), "other"),
                ),
            ),
    ))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let ctors = table.find_all_by_qualified_name("Vec::Vec");
    assert_eq!(ctors.len(), 2);
    assert!(ctors.iter().all(|c| c.kind == SymbolKind::Constructor));
    assert_eq!(ctors[1].signature, "(float)");

    assert_eq!(table.find_by_qualified_name("Vec::~Vec").unwrap().kind, SymbolKind::Destructor);

    let op = table.find_by_qualified_name("Vec::operator==").unwrap();
    assert_eq!(op.kind, SymbolKind::Operator);
    let vec = table.find_by_qualified_name("Vec").unwrap();
    assert_eq!(op.referenced_types, vec![vec.id]);
}

#[test]
fn test_anonymous_namespace() {
    let files = vec![SourceFile::new("test.cpp").with_node(Node::new(
        NamespaceNode::anonymous().with_child(Node::new(FunctionNode::new("helper", TypeSignature::named("void")))),
    ))];
    let result = analyze(&files);

    let ns = result.symbol_table.find_by_qualified_name("<anonymous>").unwrap();
    assert_eq!(ns.kind, SymbolKind::Namespace);
    assert_eq!(result.symbol_table.find_by_qualified_name("<anonymous>::helper").unwrap().parent, Some(ns.id));
}

#[test]
fn test_find_by_kind() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(with_field("A")))
        .with_node(Node::new(with_field("B")))
        .with_node(Node::new(ClassNode::new("C")))
        .with_node(Node::new(FunctionNode::new("f", TypeSignature::named("void"))))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let structs: Vec<_> = table.find_by_kind(SymbolKind::Struct).iter().map(|s| s.name.clone()).collect();
    assert_eq!(structs, vec!["A", "B"]);
    assert_eq!(table.find_by_kind(SymbolKind::Class).len(), 1);
    assert_eq!(table.find_by_kind(SymbolKind::Function).len(), 1);
    assert!(table.find_by_kind(SymbolKind::Union).is_empty());
}

// Cross references

#[test]
fn test_base_class_same_file() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(with_field("Base")))
        .with_node(Node::new(ClassNode::new("Derived").with_base(AccessSpecifier::Public, "Base")))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let base = table.find_by_qualified_name("Base").unwrap();
    let derived = table.find_by_qualified_name("Derived").unwrap();
    assert_eq!(derived.base_classes, vec![base.id]);
    assert_eq!(base.derived_classes, vec![derived.id]);
}

#[test]
fn test_function_returning_type() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(with_field("Foo")))
        .with_node(Node::new(FunctionNode::new("getFoo", TypeSignature::named("Foo"))))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let foo = table.find_by_qualified_name("Foo").unwrap();
    let get_foo = table.find_by_qualified_name("getFoo").unwrap();
    assert_eq!(get_foo.referenced_types, vec![foo.id]);
    assert_eq!(foo.referenced_by, vec![get_foo.id]);
}

#[test]
fn test_cross_file_reference_resolution() {
    let files = vec![
        SourceFile::new("project/b.cpp")
            .with_node(Node::new(IncludeNode::local("a.hpp")))
            .with_node(Node::new(FunctionNode::new("getFoo", TypeSignature::named("Foo")))),
        SourceFile::new("project/a.hpp").with_node(Node::new(StructNode::new("Foo"))),
    ];
    let result = analyze(&files);
    let table = &result.symbol_table;

    assert_eq!(result.dependency_graph.entries()[0].depends_on, vec![1]);
    let foo = table.find_by_qualified_name("Foo").unwrap();
    assert!(table.find_by_qualified_name("getFoo").unwrap().referenced_types.contains(&foo.id));
}

#[test]
fn test_unresolvable_type_is_not_an_error() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(FunctionNode::new(
        "name",
        TypeSignature::named("std::string"),
    )))];
    let result = analyze(&files);

    let name = result.symbol_table.find_by_qualified_name("name").unwrap();
    assert!(name.referenced_types.is_empty());
    assert_eq!(result.link_stats.references.unresolved, 1);
}

#[test]
fn test_namespace_base_class() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        NamespaceNode::new("foo")
            .with_child(Node::new(with_field("Base")))
            .with_child(Node::new(ClassNode::new("Derived").with_base(AccessSpecifier::Public, "Base"))),
    ))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let base = table.find_by_qualified_name("foo::Base").unwrap();
    let derived = table.find_by_qualified_name("foo::Derived").unwrap();
    assert_eq!(derived.base_classes, vec![base.id]);
}

#[test]
fn test_using_namespace_resolves_type() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(NamespaceNode::new("foo").with_child(Node::new(StructNode::new("Bar")))))
        .with_node(Node::new(UsingNamespaceNode::new("foo")))
        .with_node(Node::new(FunctionNode::new("getBar", TypeSignature::named("Bar"))))];

    let result = analyze(&files);
    let bar = result.symbol_table.find_by_qualified_name("foo::Bar").unwrap();
    let get_bar = result.symbol_table.find_by_qualified_name("getBar").unwrap();
    assert_eq!(get_bar.referenced_types, vec![bar.id]);

    let strict = Analyzer::new(AnalyzerConfig {
        honor_using_directives: false,
        ..AnalyzerConfig::default()
    })
    .analyze(&files);
    assert!(strict.symbol_table.find_by_qualified_name("getBar").unwrap().referenced_types.is_empty());
}

#[test]
fn test_type_references_through_templates_and_aliases() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        NamespaceNode::new("app")
            .with_child(Node::new(with_field("Item")))
            .with_child(Node::new(TypeAliasNode::new("Items", "std::vector<Item>")))
            .with_child(Node::new(VariableNode::new(
                "cache",
                TypeSignature::named("std::map").with_type_arg(int()).with_type_arg(TypeSignature::named("Items")),
            ))),
    ))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let item = table.find_by_qualified_name("app::Item").unwrap();
    let items = table.find_by_qualified_name("app::Items").unwrap();
    assert_eq!(items.referenced_types, vec![item.id]);
    assert_eq!(table.find_by_qualified_name("app::cache").unwrap().referenced_types, vec![items.id]);
}

#[test]
fn test_linking_can_be_disabled() {
    let files = vec![SourceFile::new("test.hpp")
        .with_node(Node::new(with_field("Foo")))
        .with_node(Node::new(FunctionNode::new("getFoo", TypeSignature::named("Foo"))))];
    let result = Analyzer::new(AnalyzerConfig {
        link_cross_references: false,
        ..AnalyzerConfig::default()
    })
    .analyze(&files);

    assert!(result.symbol_table.find_by_qualified_name("getFoo").unwrap().referenced_types.is_empty());
    assert_eq!(result.link_stats.symbols_visited, 0);
}

// Misc

#[test]
fn test_empty_input() {
    let result = analyze(&[]);
    assert!(result.symbol_table.is_empty());
    assert!(result.dependency_graph.entries().is_empty());
    assert!(result.order.is_empty());
}

#[test]
fn test_source_location() {
    let files = vec![SourceFile::new("project/foo.hpp").with_node(Node::new(with_field("Foo")).at(2, 4, 4, 5))];
    let result = analyze(&files);

    let foo = result.symbol_table.find_by_qualified_name("Foo").unwrap();
    assert_eq!(foo.location.file_path, PathBuf::from("project/foo.hpp"));
    assert_eq!((foo.location.start_line, foo.location.start_column), (2, 4));
    assert_eq!((foo.location.end_line, foo.location.end_column), (4, 5));
    assert!(foo.node.is_some());
}

#[test]
fn test_parent_child_relationship() {
    let files = vec![SourceFile::new("test.hpp").with_node(Node::new(
        NamespaceNode::new("ns").with_child(Node::new(with_field("S"))),
    ))];
    let result = analyze(&files);
    let table = &result.symbol_table;

    let ns = table.find_by_qualified_name("ns").unwrap();
    let s = table.find_by_qualified_name("ns::S").unwrap();
    let value = table.find_by_qualified_name("ns::S::value").unwrap();

    assert_eq!(s.parent, Some(ns.id));
    assert_eq!(value.parent, Some(s.id));
    assert!(ns.children.contains(&s.id));
}

#[test]
fn test_every_relationship_points_at_a_live_symbol() {
    let files = vec![
        SourceFile::new("a.hpp")
            .with_node(Node::new(IncludeNode::local("b.hpp")))
            .with_node(Node::new(
                NamespaceNode::new("x")
                    .with_child(Node::new(ClassNode::new("D").with_base(AccessSpecifier::Public, "y::B")))
                    .with_child(Node::new(FunctionNode::new("f", TypeSignature::named("y::B")))),
            )),
        SourceFile::new("b.hpp").with_node(Node::new(NamespaceNode::new("y").with_child(Node::new(with_field("B"))))),
    ];
    let result = analyze(&files);
    let table = &result.symbol_table;

    for symbol in table.iter() {
        let related = symbol
            .children
            .iter()
            .chain(&symbol.base_classes)
            .chain(&symbol.derived_classes)
            .chain(&symbol.referenced_types)
            .chain(&symbol.referenced_by)
            .chain(symbol.parent.iter());
        for id in related {
            assert!(table.find_by_id(*id).is_some(), "{} points at dead {}", symbol.qualified_name, id);
        }
    }
    assert_eq!(table.find_by_qualified_name("y::B").unwrap().derived_classes.len(), 1);
}
