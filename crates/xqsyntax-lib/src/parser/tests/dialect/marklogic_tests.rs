use crate::parser::tests::{child_kinds, first_node, node_kinds, parse_clean};
use crate::{Dialect, DiagnosticKind, SyntaxKind, parse};

#[test]
fn second_vendor_catch_is_diagnosed() {
    let parse = parse(
        "try { 1 } catch ($e) { 2 } catch ($f) { 3 }",
        Dialect::MARKLOGIC,
    );
    insta::assert_snapshot!(parse.diagnostics().printer().render(), @"error at 27..43: multiple vendor catch clauses (related: first vendor catch clause at 10..26)");

    let diagnostic = parse.diagnostics().iter().next().unwrap();
    assert_eq!(diagnostic.kind(), DiagnosticKind::MultipleVendorCatchClauses);
    let try_catch = first_node(&parse, SyntaxKind::TryCatchExpr).unwrap();
    assert_eq!(
        child_kinds(&try_catch),
        [
            SyntaxKind::TryClause,
            SyntaxKind::CatchClause,
            SyntaxKind::CatchClause,
        ]
    );
}

#[test]
fn vendor_catch_counts_per_try() {
    parse_clean(
        "try { try { 1 } catch ($a) { 2 } } catch * { 3 } catch ($b) { 4 }",
        Dialect::MARKLOGIC,
    );
}

#[test]
fn json_node_constructors() {
    let parse = parse_clean(
        r#"object-node { "a": 1, "b": array-node { 1, 2 } }, binary { "00" }, null-node { }"#,
        Dialect::MARKLOGIC,
    );
    let object = first_node(&parse, SyntaxKind::ObjectNodeConstructor).unwrap();
    assert_eq!(
        child_kinds(&object),
        [SyntaxKind::ObjectNodeEntry, SyntaxKind::ObjectNodeEntry]
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::ArrayNodeConstructor,
        SyntaxKind::BinaryConstructor,
        SyntaxKind::NullNodeConstructor,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn node_tests_are_not_function_calls() {
    let parse = parse_clean(
        r#"$x/object-node(), $x/array-node("items"), $x instance of number-node()"#,
        Dialect::MARKLOGIC,
    );
    let kinds = node_kinds(&parse);
    assert!(!kinds.contains(&SyntaxKind::FunctionCall));
    for kind in [
        SyntaxKind::ObjectNodeTest,
        SyntaxKind::ArrayNodeTest,
        SyntaxKind::NumberNodeTest,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn node_test_names_are_calls_in_plain_xquery() {
    let parse = parse_clean("binary()", Dialect::XQUERY);
    assert!(first_node(&parse, SyntaxKind::FunctionCall).is_some());

    let parse = parse_clean("$x/binary()", Dialect::MARKLOGIC);
    assert!(first_node(&parse, SyntaxKind::BinaryTest).is_some());
}

#[test]
fn modules_separated_by_semicolons() {
    let parse = parse_clean("1; 2", Dialect::MARKLOGIC);
    assert_eq!(
        child_kinds(&parse.syntax()),
        [SyntaxKind::MainModule, SyntaxKind::MainModule]
    );

    let plain = crate::parse("1; 2", Dialect::XQUERY);
    let messages: Vec<_> = plain.diagnostics().iter().map(|d| d.message()).collect();
    assert_eq!(messages, ["unexpected `;`"]);
}

#[test]
fn private_function() {
    let parse = parse_clean(
        "declare private function local:f() { 1 }; local:f()",
        Dialect::MARKLOGIC,
    );
    let function = first_node(&parse, SyntaxKind::FunctionDecl).unwrap();
    assert_eq!(child_kinds(&function)[0], SyntaxKind::Annotation);
}
