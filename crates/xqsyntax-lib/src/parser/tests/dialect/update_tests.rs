use indoc::indoc;

use crate::parser::tests::{child_kinds, dump_with, first_node, node_kinds, parse_clean};
use crate::{Dialect, SyntaxKind, parse};

#[test]
fn delete_node() {
    insta::assert_snapshot!(dump_with("delete node $x", Dialect::UPDATE), @r#"
    Module
      MainModule
        QueryBody
          DeleteExpr
            Keyword "delete"
            Keyword "node"
            VarRef
              Dollar "$"
              QName
                NCName "x"
    "#);
}

#[test]
fn insert_with_position() {
    let parse = parse_clean("insert node <a/> as last into $b", Dialect::UPDATE);
    let insert = first_node(&parse, SyntaxKind::InsertExpr).unwrap();
    assert_eq!(
        child_kinds(&insert),
        [SyntaxKind::DirElemConstructor, SyntaxKind::InsertTarget]
    );
    let target = first_node(&parse, SyntaxKind::InsertTarget).unwrap();
    assert_eq!(target.text().to_string(), "as last into $b");
}

#[test]
fn insert_without_target() {
    let parse = parse("insert nodes $a", Dialect::UPDATE);
    let messages: Vec<_> = parse.diagnostics().iter().map(|d| d.message()).collect();
    assert_eq!(messages, ["expected `into`, `after` or `before`"]);
    assert!(first_node(&parse, SyntaxKind::InsertTarget).is_none());
}

#[test]
fn replace_and_rename() {
    let parse = parse_clean(
        r#"replace value of node $x/@id with "2", rename node $x as "y", replace node $a with $b"#,
        Dialect::UPDATE,
    );
    let kinds = node_kinds(&parse);
    assert_eq!(
        kinds.iter().filter(|k| **k == SyntaxKind::ReplaceExpr).count(),
        2
    );
    assert!(kinds.contains(&SyntaxKind::RenameExpr));
}

#[test]
fn copy_modify_return() {
    let parse = parse_clean(
        "copy $c := $doc, $d := $other modify delete node $c/a return $c",
        Dialect::UPDATE,
    );
    let copy = first_node(&parse, SyntaxKind::CopyModifyExpr).unwrap();
    assert_eq!(
        child_kinds(&copy),
        [
            SyntaxKind::CopyBinding,
            SyntaxKind::CopyBinding,
            SyntaxKind::DeleteExpr,
            SyntaxKind::VarRef,
        ]
    );
}

#[test]
fn transform_with_and_dynamic_updating_call() {
    let parse = parse_clean(
        "($doc transform with { delete node a }, invoke updating $f(1, 2))",
        Dialect::UPDATE,
    );
    let transform = first_node(&parse, SyntaxKind::TransformWithExpr).unwrap();
    assert_eq!(
        child_kinds(&transform),
        [SyntaxKind::VarRef, SyntaxKind::EnclosedExpr]
    );
    let call = first_node(&parse, SyntaxKind::DynamicUpdatingFunctionCall).unwrap();
    assert_eq!(
        child_kinds(&call),
        [SyntaxKind::VarRef, SyntaxKind::ArgumentList]
    );
}

#[test]
fn revalidation_and_updating_function() {
    let parse = parse_clean(
        indoc! {"
            declare revalidation lax;
            declare updating function local:f($n) { delete node $n };
            local:f(.)
        "},
        Dialect::UPDATE,
    );
    let kinds = node_kinds(&parse);
    assert!(kinds.contains(&SyntaxKind::RevalidationDecl));
    assert!(kinds.contains(&SyntaxKind::FunctionDecl));
    assert!(kinds.contains(&SyntaxKind::DeleteExpr));
}

#[test]
fn updating_expressions_need_the_dialect() {
    let parse = parse("delete node $x", Dialect::XQUERY);
    assert!(first_node(&parse, SyntaxKind::DeleteExpr).is_none());
    assert!(parse.diagnostics().has_errors());
}
