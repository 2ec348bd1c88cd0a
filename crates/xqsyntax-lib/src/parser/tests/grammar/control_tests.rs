use indoc::indoc;

use crate::parser::tests::{child_kinds, dump, first_node, parse_clean};
use crate::{Dialect, SyntaxKind};

#[test]
fn if_then_else() {
    insta::assert_snapshot!(dump("if ($a) then 1 else 2"), @r#"
    Module
      MainModule
        QueryBody
          IfExpr
            Keyword "if"
            ParenOpen "("
            VarRef
              Dollar "$"
              QName
                NCName "a"
            ParenClose ")"
            Keyword "then"
            NumericLiteral
              IntegerLiteral "1"
            Keyword "else"
            NumericLiteral
              IntegerLiteral "2"
    "#);
}

#[test]
fn switch_and_typeswitch() {
    let parse = parse_clean(
        indoc! {r#"
            switch ($x)
              case 1 case 2 return "low"
              default return "high",
            typeswitch ($y)
              case $n as xs:integer | xs:double return $n
              case element() return 0
              default $d return $d
        "#},
        Dialect::XQUERY,
    );
    let switch = first_node(&parse, SyntaxKind::SwitchExpr).unwrap();
    assert_eq!(
        child_kinds(&switch),
        [
            SyntaxKind::VarRef,
            SyntaxKind::SwitchCaseClause,
            SyntaxKind::SwitchDefaultClause,
        ]
    );
    let typeswitch = first_node(&parse, SyntaxKind::TypeswitchExpr).unwrap();
    assert_eq!(
        child_kinds(&typeswitch)
            .into_iter()
            .filter(|k| *k == SyntaxKind::CaseClause)
            .count(),
        2
    );
}

#[test]
fn quantified() {
    let parse = parse_clean(
        "some $a in (1, 2), $b in $a satisfies $a = $b",
        Dialect::XQUERY,
    );
    let quantified = first_node(&parse, SyntaxKind::QuantifiedExpr).unwrap();
    assert_eq!(
        child_kinds(&quantified),
        [
            SyntaxKind::QuantifiedBinding,
            SyntaxKind::QuantifiedBinding,
            SyntaxKind::ComparisonExpr,
        ]
    );
}

#[test]
fn try_catch() {
    let parse = parse_clean(
        "try { error() } catch err:FOER0000 | *:code { 1 } catch * { 2 }",
        Dialect::XQUERY,
    );
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
fn vendor_catch_is_an_error_in_plain_xquery() {
    let parse = crate::parse("try { 1 } catch ($e) { 2 }", Dialect::XQUERY);
    assert!(parse.diagnostics().has_errors());
}
