use indoc::indoc;

use crate::parser::tests::{child_kinds, dump_with, first_node, node_kinds, parse_clean};
use crate::{Dialect, SyntaxKind, parse};

#[test]
fn context_item_function() {
    insta::assert_snapshot!(dump_with(".{ . }", Dialect::SAXON), @r#"
    Module
      MainModule
        QueryBody
          ContextItemFunctionExpr
            Dot "."
            EnclosedExpr
              BraceOpen "{"
              ContextItemExpr
                Dot "."
              BraceClose "}"
    "#);
}

#[test]
fn type_declaration_and_alias() {
    let parse = parse_clean(
        indoc! {"
            declare type my:t = union(xs:integer, xs:string);
            $x instance of ~my:t
        "},
        Dialect::SAXON,
    );
    let decl = first_node(&parse, SyntaxKind::TypeDecl).unwrap();
    assert_eq!(
        child_kinds(&decl),
        [SyntaxKind::QName, SyntaxKind::UnionType]
    );
    assert!(first_node(&parse, SyntaxKind::TypeAlias).is_some());
}

#[test]
fn tuple_type_fields() {
    let parse = parse_clean(
        r#"$t instance of tuple(a as xs:integer, "b"? as xs:string, *)"#,
        Dialect::SAXON,
    );
    let tuple = first_node(&parse, SyntaxKind::TupleType).unwrap();
    assert_eq!(
        child_kinds(&tuple),
        [SyntaxKind::TupleField, SyntaxKind::TupleField]
    );
    assert!(tuple.text().to_string().ends_with("*)"));
}

#[test]
fn fn_shorthand() {
    let parse = parse_clean("sort($xs, (), fn{ -. })", Dialect::SAXON);
    let kinds = node_kinds(&parse);
    assert!(kinds.contains(&SyntaxKind::ContextItemFunctionExpr));
    assert!(kinds.contains(&SyntaxKind::UnaryExpr));
}

#[test]
fn shorthand_needs_adjacent_brace() {
    let parse = parse(". { 1 }", Dialect::SAXON);
    assert!(first_node(&parse, SyntaxKind::ContextItemFunctionExpr).is_none());
    assert!(parse.diagnostics().has_errors());
}
