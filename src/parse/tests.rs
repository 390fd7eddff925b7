use super::parse;
use crate::ast::{
    Block, CompilationUnit, Member, MemberNode, NestedNode, OperationDeclaration, TypeDeclaration,
    TypeKind,
};
use crate::messages::Message;
use crate::source::Source;
use crate::{Database, Messages};

fn parse_text(text: &str) -> (CompilationUnit, Vec<Message>) {
    let db = Database::default();
    let source = Source::new(&db, text.to_string(), "Test.java".to_string());

    let unit = parse(&db, source).clone();
    let messages = parse::accumulated::<Messages>(&db, source)
        .into_iter()
        .map(|message| message.0.clone())
        .collect();

    (unit, messages)
}

fn parse_clean(text: &str) -> CompilationUnit {
    let (unit, messages) = parse_text(text);
    assert!(messages.is_empty(), "unexpected messages: {messages:#?}");
    unit
}

fn codes(messages: &[Message]) -> Vec<&str> {
    messages
        .iter()
        .filter_map(|message| message.code.as_deref())
        .collect()
}

fn only_type(unit: &CompilationUnit) -> &TypeDeclaration {
    assert_eq!(1, unit.types.len());
    &unit.types[0]
}

fn operations(members: &[Member]) -> Vec<&OperationDeclaration> {
    members
        .iter()
        .filter_map(|member| match &member.node {
            MemberNode::Method(operation) | MemberNode::Constructor(operation) => Some(operation),
            _ => None,
        })
        .collect()
}

fn parameter_types(operation: &OperationDeclaration) -> Vec<&str> {
    operation
        .parameters
        .iter()
        .map(|parameter| parameter.ty.as_str())
        .collect()
}

fn body_of<'a>(members: &'a [Member], name: &str) -> &'a Block {
    operations(members)
        .into_iter()
        .find(|operation| operation.name == name)
        .and_then(|operation| operation.body.as_ref())
        .expect("operation with a body")
}

#[test]
fn package_and_types() {
    let unit = parse_clean(
        r#"
        @Deprecated
        package a.b;

        import java.util.*;
        import static java.lang.Math.max;

        public final class Foo extends Bar<Baz> implements Qux {
            static class Nested {}
            private enum Kind { A, B; }
            interface Shape {}
            @interface Marker { int value() default 1; }
        }

        sealed interface Other permits Foo {}
        "#,
    );

    assert_eq!(vec!["a", "b"], unit.package);
    assert_eq!(2, unit.types.len());

    let foo = &unit.types[0];
    assert_eq!("Foo", foo.name);
    assert_eq!(TypeKind::Class, foo.kind);

    let kinds: Vec<_> = foo
        .members
        .iter()
        .filter_map(|member| match &member.node {
            MemberNode::Type(declaration) => Some((declaration.name.as_str(), declaration.kind)),
            _ => None,
        })
        .collect();

    assert_eq!(
        vec![
            ("Nested", TypeKind::Class),
            ("Kind", TypeKind::Enum),
            ("Shape", TypeKind::Interface),
            ("Marker", TypeKind::Annotation),
        ],
        kinds
    );

    assert_eq!("Other", unit.types[1].name);
    assert_eq!(TypeKind::Interface, unit.types[1].kind);
}

#[test]
fn unnamed_package() {
    let unit = parse_clean("class Foo {}");
    assert!(unit.package.is_empty());
    assert_eq!("Foo", only_type(&unit).name);
}

#[test]
fn operations_and_parameters() {
    let unit = parse_clean(
        r#"
        abstract class Foo<T extends Comparable<T>> {
            public Foo(int a, String... rest) {}
            <K> Foo(K key) throws Exception {}

            <V> void put(Map<String, List<V>> map, final @Nonnull int[] xs, String args[]) {}
            abstract java.util.List<String> get();
            Outer<T>.Inner inner(Outer<T>.Inner value) { return value; }
        }
        "#,
    );

    let foo = only_type(&unit);
    let operations = operations(&foo.members);

    let signatures: Vec<_> = operations
        .iter()
        .map(|operation| (operation.name.as_str(), parameter_types(operation)))
        .collect();

    assert_eq!(
        vec![
            ("Foo", vec!["int", "String..."]),
            ("Foo", vec!["K"]),
            ("put", vec!["Map", "int[]", "String[]"]),
            ("get", vec![]),
            ("inner", vec!["Outer.Inner"]),
        ],
        signatures
    );

    assert!(operations[3].body.is_none());
    assert!(matches!(foo.members[0].node, MemberNode::Constructor(_)));
    assert!(matches!(foo.members[2].node, MemberNode::Method(_)));
}

#[test]
fn fields_and_initializers() {
    let unit = parse_clean(
        r#"
        class Foo {
            static int a = 1, b = 2;
            Runnable r = () -> {};
            int[] xs = new int[] { 1, 2 };
            static { init(); }
            { Runnable s = () -> {}; }
        }
        "#,
    );

    let shapes: Vec<_> = only_type(&unit)
        .members
        .iter()
        .map(|member| match &member.node {
            MemberNode::Field {
                is_static,
                initializer,
            } => ("field", *is_static, initializer.0.len()),
            MemberNode::Initializer { is_static, body } => ("initializer", *is_static, body.0.len()),
            _ => ("other", false, 0),
        })
        .collect();

    assert_eq!(
        vec![
            ("field", true, 0),
            ("field", false, 1),
            ("field", false, 0),
            ("initializer", true, 0),
            ("initializer", false, 1),
        ],
        shapes
    );
}

#[test]
fn code_items_in_order() {
    let unit = parse_clean(
        r#"
        class Foo {
            void run() {
                Runnable r = () -> {};
                new Thread(x -> go(x)) {
                    public void run() {}
                };
                class Local {}
                Object c = Foo.class;
                Object o = new Object();
            }
        }
        "#,
    );

    let body = body_of(&only_type(&unit).members, "run");
    assert_eq!(4, body.0.len());

    assert!(matches!(body.0[0].node, NestedNode::Lambda(_)));

    let NestedNode::Allocation(thread) = &body.0[1].node else {
        panic!("expected an allocation, got {:?}", body.0[1].node);
    };

    assert_eq!("Thread", thread.ty);
    assert_eq!(1, thread.arguments.0.len());
    assert_eq!(1, thread.body.as_ref().map(Vec::len).unwrap_or_default());

    let NestedNode::LocalType(local) = &body.0[2].node else {
        panic!("expected a local type, got {:?}", body.0[2].node);
    };

    assert_eq!("Local", local.name);

    let NestedNode::Allocation(object) = &body.0[3].node else {
        panic!("expected an allocation, got {:?}", body.0[3].node);
    };

    assert!(object.body.is_none());
}

#[test]
fn nested_lambdas() {
    let unit = parse_clean(
        r#"
        class Foo {
            void run() {
                call((a, b) -> list.forEach(x -> {
                    use(() -> x);
                }), (Runnable) () -> {});
            }
        }
        "#,
    );

    let body = body_of(&only_type(&unit).members, "run");
    assert_eq!(2, body.0.len());

    let NestedNode::Lambda(outer) = &body.0[0].node else {
        panic!("expected a lambda, got {:?}", body.0[0].node);
    };

    let NestedNode::Lambda(inner) = &outer.body.0[0].node else {
        panic!("expected a lambda, got {:?}", outer.body.0[0].node);
    };

    assert_eq!(1, inner.body.0.len());
    assert!(matches!(body.0[1].node, NestedNode::Lambda(_)));
}

#[test]
fn switch_labels_are_not_lambdas() {
    let unit = parse_clean(
        r#"
        class Foo {
            int run(Kind kind) {
                switch (kind) {
                    case A: break;
                    default: break;
                }

                return switch (kind) {
                    case A, B -> 1;
                    case C -> { yield 2; }
                    default -> 3;
                };
            }
        }
        "#,
    );

    assert!(body_of(&only_type(&unit).members, "run").0.is_empty());
}

#[test]
fn method_references_are_not_allocations() {
    let unit = parse_clean(
        r#"
        class Foo {
            void run() {
                Supplier<Foo> make = Foo::new;
                Function<Integer, int[]> array = int[]::new;
            }
        }
        "#,
    );

    assert!(body_of(&only_type(&unit).members, "run").0.is_empty());
}

#[test]
fn enum_constants() {
    let unit = parse_clean(
        r#"
        enum Op {
            PLUS("+", (a, b) -> a + b) {
                int apply(int a, int b) { return a + b; }
            },
            MINUS("-", (a, b) -> a - b),
            ;

            Op(String symbol, IntBinaryOperator op) {}
        }
        "#,
    );

    let op = only_type(&unit);
    let constants: Vec<_> = op
        .members
        .iter()
        .filter_map(|member| match &member.node {
            MemberNode::EnumConstant(constant) => Some(constant),
            _ => None,
        })
        .collect();

    assert_eq!(2, constants.len());
    assert_eq!("PLUS", constants[0].name);
    assert_eq!(1, constants[0].arguments.0.len());
    assert!(constants[0].body.is_some());
    assert!(constants[1].body.is_none());

    assert_eq!(1, operations(&op.members).len());
}

#[test]
fn node_ids_are_unique_and_in_source_order() {
    let unit = parse_clean(
        r#"
        class Foo {
            void a() { Runnable r = () -> {}; }
            void b() {}
        }
        "#,
    );

    let foo = only_type(&unit);
    let operations = operations(&foo.members);
    let body = body_of(&foo.members, "a");

    let NestedNode::Lambda(lambda) = &body.0[0].node else {
        panic!("expected a lambda");
    };

    assert!(foo.id < operations[0].id);
    assert!(operations[0].id < lambda.id);
    assert!(lambda.id < operations[1].id);
}

#[test]
fn unclosed_brace() {
    let (unit, messages) = parse_text("class Foo { void run() { ");
    assert_eq!("Foo", only_type(&unit).name);
    assert!(codes(&messages).contains(&"EP20"));
}

#[test]
fn missing_type_name() {
    let (unit, messages) = parse_text("class { void run() {} }");
    assert_eq!("", only_type(&unit).name);
    assert_eq!(vec!["EP01"], codes(&messages));
}

#[test]
fn stray_tokens_recover() {
    let (unit, messages) = parse_text("42 class Foo {} ) class Bar {}");

    let names: Vec<_> = unit.types.iter().map(|ty| ty.name.as_str()).collect();
    assert_eq!(vec!["Foo", "Bar"], names);
    assert_eq!(vec!["EP00", "EP00"], codes(&messages));
}

#[test]
fn unclosed_type_arguments() {
    let (_, messages) = parse_text("class Foo { void run(Map<String x) {} }");
    assert!(codes(&messages).contains(&"EP22"));
}

#[test]
fn text_blocks_are_single_tokens() {
    let unit = parse_clean(
        r#"class Foo {
    String s = """
        "quoted" and ""doubly"" } class Bar { \""" "
        """;
    void run() {}
}"#,
    );

    let foo = only_type(&unit);
    assert_eq!(1, operations(&foo.members).len());
}

#[test]
fn record_declarations() {
    let unit = parse_clean(
        "record Point<T>(T x, int[] ys) implements Comparable<Point<T>> { \
           Point { } \
           Point(T x) { this(x, new int[0]); } \
           static int origin; \
         }",
    );

    let point = only_type(&unit);
    assert_eq!(TypeKind::Record, point.kind);
    assert_eq!("Point", point.name);

    let constructors: Vec<_> = operations(&point.members)
        .into_iter()
        .map(parameter_types)
        .collect();

    assert_eq!(vec![vec!["T", "int[]"], vec!["T"]], constructors);
}

#[test]
fn record_is_not_always_a_keyword() {
    let unit = parse_clean("class Foo { void record() { record(); int record = 1; } }");
    let foo = only_type(&unit);

    assert_eq!("record", operations(&foo.members)[0].name);
    assert!(body_of(&foo.members, "record").0.is_empty());
}

#[test]
fn dollar_in_declared_names() {
    let (unit, messages) = parse_text("class Foo$Bar { void f$g() {} }");

    let foo = only_type(&unit);
    assert_eq!("Foo_Bar", foo.name);
    assert_eq!("f_g", operations(&foo.members)[0].name);
    assert_eq!(vec!["EP04", "EP04"], codes(&messages));
}

#[test]
fn missing_method_body() {
    let (unit, messages) = parse_text("interface Foo { void run() void walk(); }");

    assert_eq!(vec!["EP03"], codes(&messages));
    assert_eq!(Some("expected a method body"), messages[0].message.as_deref());
    assert!(operations(&only_type(&unit).members)
        .iter()
        .any(|operation| operation.name == "walk"));
}
