//! End-to-end and boundary tests for the parser.
//!
//! These cover the cross-cutting scenarios: composite `>` splitting inside
//! declarations, the cast/lambda/type-argument ambiguities in context,
//! Javadoc locality, and whole-tree invariants.

use javelin_lex::TokenKind;

use crate::ast::*;
use crate::walk::{filter_kind, walk, NodeKind, NodeRef};
use crate::{parse, parse_expression, parse_member_declaration, Error};

fn first_class(unit: &CompilationUnit) -> &ClassDeclaration {
    match &unit.types[0] {
        TypeDeclaration::Class(c) => c,
        other => panic!("expected class, got {other:?}"),
    }
}

fn field<'a>(members: &'a [MemberDeclaration], index: usize) -> &'a FieldDeclaration {
    match &members[index] {
        MemberDeclaration::Field(f) => f,
        other => panic!("expected field, got {other:?}"),
    }
}

// =============================================================================
// END-TO-END SCENARIOS
// =============================================================================

#[test]
fn test_minimal_class() {
    let unit = parse("class A {}").unwrap();
    assert!(unit.package.is_none());
    assert!(unit.imports.is_empty());
    let class = first_class(&unit);
    assert_eq!(class.name, "A");
    assert!(class.body.is_empty());
}

#[test]
fn test_package_import_generic_field() {
    let unit =
        parse("package p; import java.util.List; class A { List<String> xs; }").unwrap();
    assert_eq!(unit.package.as_ref().unwrap().name, "p");

    assert_eq!(unit.imports.len(), 1);
    let import = &unit.imports[0];
    assert_eq!(import.path, "java.util.List");
    assert!(!import.is_static);
    assert!(!import.is_wildcard);

    let class = first_class(&unit);
    let f = field(&class.body, 0);
    match &f.field_type {
        Type::Reference(r) => {
            assert_eq!(r.name, "List");
            let args = r.type_arguments.as_ref().unwrap();
            assert_eq!(args.len(), 1);
            match &args[0] {
                TypeArgument::Concrete(Type::Reference(inner)) => {
                    assert_eq!(inner.name, "String");
                }
                other => panic!("expected concrete argument, got {other:?}"),
            }
        }
        other => panic!("expected reference type, got {other:?}"),
    }
    assert_eq!(f.declarators[0].name, "xs");
}

#[test]
fn test_generic_method_with_bounded_parameter() {
    let unit =
        parse("class A { <T extends Comparable<T>> T max(T a, T b) { return a; } }").unwrap();
    let class = first_class(&unit);
    let method = match &class.body[0] {
        MemberDeclaration::Method(m) => m,
        other => panic!("expected method, got {other:?}"),
    };
    assert_eq!(method.type_parameters.len(), 1);
    let tp = &method.type_parameters[0];
    assert_eq!(tp.name, "T");
    assert_eq!(tp.extends.len(), 1);
    assert_eq!(tp.extends[0].name, "Comparable");
    let bound_args = tp.extends[0].type_arguments.as_ref().unwrap();
    assert_eq!(bound_args.len(), 1);
    assert_eq!(method.parameters.len(), 2);
}

#[test]
fn test_lambda_field_initializer() {
    let member =
        parse_member_declaration("Runnable r = () -> System.out.println(\"hi\");").unwrap();
    let f = match &member {
        MemberDeclaration::Field(f) => f,
        other => panic!("expected field, got {other:?}"),
    };
    let lambda = match f.declarators[0].initializer.as_ref().unwrap() {
        Expression::Lambda(l) => l,
        other => panic!("expected lambda, got {other:?}"),
    };
    assert!(lambda.parameters.is_empty());
    match &lambda.body {
        LambdaBody::Expression(Expression::MethodInvocation(m)) => {
            assert_eq!(m.member, "println");
        }
        other => panic!("expected invocation body, got {other:?}"),
    }
}

#[test]
fn test_hex_literal_preserved_verbatim() {
    let member = parse_member_declaration("int x = 0xCAFE_BABE;").unwrap();
    let f = match &member {
        MemberDeclaration::Field(f) => f,
        other => panic!("expected field, got {other:?}"),
    };
    match f.declarators[0].initializer.as_ref().unwrap() {
        Expression::Literal(l) => {
            assert_eq!(l.value, "0xCAFE_BABE");
            assert_eq!(l.kind, TokenKind::HexInteger);
        }
        other => panic!("expected literal, got {other:?}"),
    }
}

#[test]
fn test_try_with_resources_and_multi_catch() {
    let unit =
        parse("class A { void f() { try (R r = open()) { } catch (A | B e) { } } }").unwrap();
    let class = first_class(&unit);
    let method = match &class.body[0] {
        MemberDeclaration::Method(m) => m,
        other => panic!("expected method, got {other:?}"),
    };
    let stmt = &method.body.as_ref().unwrap().statements[0];
    match stmt {
        Statement::Try(t) => {
            assert_eq!(t.resources.len(), 1);
            assert_eq!(t.resources[0].name, "r");
            assert_eq!(t.catches.len(), 1);
            let names: Vec<_> = t.catches[0]
                .parameter
                .types
                .iter()
                .map(|ty| ty.name.as_str())
                .collect();
            assert_eq!(names, vec!["A", "B"]);
        }
        other => panic!("expected try, got {other:?}"),
    }
}

// =============================================================================
// COMPOSITE `>` SPLITTING IN CONTEXT
// =============================================================================

#[test]
fn test_triple_gt_split_in_declaration() {
    // `Foo<Bar<Baz>>> x` is not valid on its own, but the triple close
    // appears in `Map<K, List<Set<V>>>` shapes.
    let member = parse_member_declaration("Map<K, List<Set<V>>> deep;").unwrap();
    let f = match &member {
        MemberDeclaration::Field(f) => f,
        other => panic!("expected field, got {other:?}"),
    };
    match &f.field_type {
        Type::Reference(r) => {
            assert_eq!(r.name, "Map");
            let args = r.type_arguments.as_ref().unwrap();
            assert_eq!(args.len(), 2);
        }
        other => panic!("expected reference type, got {other:?}"),
    }
    assert_eq!(f.declarators[0].name, "deep");
}

#[test]
fn test_shift_operators_still_shift() {
    let expr = parse_expression("a >> 2 >>> b << 1").unwrap();
    assert!(matches!(expr, Expression::Binary(_)));

    // A shift inside a generic initializer: the split must not leak.
    let member = parse_member_declaration("List<Integer> xs = f(a >> 1);").unwrap();
    assert!(matches!(member, MemberDeclaration::Field(_)));
}

#[test]
fn test_failed_generic_speculation_restores_shift() {
    // `a < b >> c` speculates a type-argument list at `<`, splits the
    // `>>`, fails, and must leave the shift whole.
    let expr = parse_expression("a < b >> c").unwrap();
    match expr {
        Expression::Binary(b) => {
            assert_eq!(b.operator, BinaryOperator::Less);
            match b.right {
                Expression::Binary(r) => {
                    assert_eq!(r.operator, BinaryOperator::ShiftRight);
                }
                other => panic!("expected shift, got {other:?}"),
            }
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

// =============================================================================
// AMBIGUITIES IN STATEMENT CONTEXT
// =============================================================================

#[test]
fn test_lambda_vs_parenthesized_in_context() {
    let lambda = parse_expression("(x) -> x").unwrap();
    assert!(matches!(lambda, Expression::Lambda(_)));
    let paren = parse_expression("(x)").unwrap();
    assert!(matches!(paren, Expression::Name(_)));
}

#[test]
fn test_generic_call_vs_double_comparison() {
    // As a call target after `.<`, a type-argument list.
    let call = parse_expression("a.<b, c>f(d)").unwrap();
    match call {
        Expression::MethodInvocation(m) => {
            assert_eq!(m.type_arguments.as_ref().unwrap().len(), 2);
        }
        other => panic!("expected invocation, got {other:?}"),
    }
    // As a free expression, Java has no comma operator.
    assert!(parse_expression("a < b , c > ( d )").is_err());
}

#[test]
fn test_declaration_vs_expression_statement_sweep() {
    let unit = parse(
        "class A { void m() {\n\
             List<Map<String, Integer>> tbl = make();\n\
             tbl.get(0).put(\"k\", 1);\n\
             int[] counts = new int[8];\n\
             counts[0] += tbl.size();\n\
             a.b.C local = null;\n\
             a.b.c.run();\n\
         } }",
    )
    .unwrap();
    let class = first_class(&unit);
    let method = match &class.body[0] {
        MemberDeclaration::Method(m) => m,
        other => panic!("expected method, got {other:?}"),
    };
    let kinds: Vec<_> = method
        .body
        .as_ref()
        .unwrap()
        .statements
        .iter()
        .map(|s| match s {
            Statement::LocalVariable(_) => "decl",
            Statement::Expression(_) => "expr",
            other => panic!("unexpected statement {other:?}"),
        })
        .collect();
    assert_eq!(kinds, vec!["decl", "expr", "decl", "expr", "decl", "expr"]);
}

// =============================================================================
// JAVADOC LOCALITY
// =============================================================================

#[test]
fn test_javadoc_attaches_to_next_declaration_only() {
    let unit = parse(
        "class A {\n\
             /** first */\n\
             int x;\n\
             int y;\n\
         }",
    )
    .unwrap();
    let class = first_class(&unit);
    assert_eq!(
        field(&class.body, 0).documentation.as_deref(),
        Some("/** first */")
    );
    assert!(field(&class.body, 1).documentation.is_none());
}

#[test]
fn test_javadoc_blocked_by_intervening_comment() {
    let unit = parse(
        "class A {\n\
             /** doc */\n\
             /* plain */\n\
             int x;\n\
         }",
    )
    .unwrap();
    let class = first_class(&unit);
    assert!(field(&class.body, 0).documentation.is_none());
}

#[test]
fn test_javadoc_blocked_by_intervening_code() {
    let unit = parse(
        "class A {\n\
             /** doc */\n\
             int x;\n\
             int y;\n\
         }",
    )
    .unwrap();
    let class = first_class(&unit);
    // `x` takes the doc; `y` must not inherit it.
    assert!(field(&class.body, 0).documentation.is_some());
    assert!(field(&class.body, 1).documentation.is_none());
}

// =============================================================================
// TREE INVARIANTS
// =============================================================================

const INVARIANT_SOURCE: &str = "\
package demo.app;

import java.util.List;
import java.util.Map;

/** Demo. */
public class Demo<T extends Comparable<T>> {
    private Map<String, List<T>> index;
    private int hits = 0;

    public Demo(Map<String, List<T>> index) {
        this.index = index;
    }

    public List<T> lookup(String key) {
        synchronized (this) {
            hits++;
        }
        for (Map.Entry<String, List<T>> e : index.entrySet()) {
            if (e.getKey().equals(key)) {
                return e.getValue();
            }
        }
        switch (hits) {
            case 0:
                throw new IllegalStateException(\"impossible\");
            default:
                return null;
        }
    }

    interface Probe {
        int weigh(T value);
    }
}
";

#[test]
fn test_descendant_positions_never_precede_parent() {
    let unit = parse(INVARIANT_SOURCE).unwrap();
    for (path, node) in walk(NodeRef::from(&unit)) {
        for ancestor in &path {
            assert!(
                ancestor.position() <= node.position(),
                "{:?} at {} precedes ancestor {:?} at {}",
                node.kind(),
                node.position(),
                ancestor.kind(),
                ancestor.position()
            );
        }
    }
}

#[test]
fn test_filter_finds_all_method_invocations() {
    let unit = parse(INVARIANT_SOURCE).unwrap();
    let members: Vec<_> = filter_kind(NodeRef::from(&unit), NodeKind::MethodInvocation)
        .map(|node| match node {
            NodeRef::MethodInvocation(m) => m.member.clone(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(members, vec!["entrySet", "equals", "getKey", "getValue"]);
}

#[test]
fn test_structural_equality_across_formatting() {
    let a = parse(INVARIANT_SOURCE).unwrap();
    let b = parse(&INVARIANT_SOURCE.replace("\n    ", "\n        ")).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// ERROR SURFACE
// =============================================================================

#[test]
fn test_first_error_aborts_with_position() {
    let err = parse("class A { void m() { int x = ; } }").unwrap_err();
    match err {
        Error::Parser(e) => {
            assert_eq!(e.position.line, 1);
            assert_eq!(e.found, "`;`");
        }
        Error::Lexer(_) => panic!("expected parser error"),
    }
}

#[test]
fn test_speculation_failures_do_not_leak() {
    // Heavy speculation, then a real error afterwards: the reported
    // position must be the real one, not a speculative dead end.
    let err = parse("class A { void m() { (a); x = ; } }").unwrap_err();
    match err {
        Error::Parser(e) => assert!(e.position.column > 27),
        Error::Lexer(_) => panic!("expected parser error"),
    }
}

#[test]
fn test_deeply_nested_input() {
    let mut source = String::from("class A { int x = ");
    source.push_str(&"(".repeat(60));
    source.push('1');
    source.push_str(&")".repeat(60));
    source.push_str("; }");
    assert!(parse(&source).is_ok());
}
