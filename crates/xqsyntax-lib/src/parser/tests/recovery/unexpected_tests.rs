use crate::parser::tests::{dump, first_node};
use crate::{Dialect, DiagnosticKind, SyntaxKind, parse};

#[test]
fn missing_operand() {
    insta::assert_snapshot!(dump("1 +"), @r#"
    Module
      MainModule
        QueryBody
          AdditiveExpr
            NumericLiteral
              IntegerLiteral "1"
            Plus "+"
    ---
    error at 3..3: expected an expression
    "#);
}

#[test]
fn stray_closing_paren() {
    insta::assert_snapshot!(dump("1 )"), @r#"
    Module
      MainModule
        QueryBody
          NumericLiteral
            IntegerLiteral "1"
      Error
        ParenClose ")"
    ---
    error at 2..3: unexpected `)`
    "#);
}

#[test]
fn bad_character_is_reported_once() {
    insta::assert_snapshot!(dump("1 ^ 2"), @r#"
    Module
      MainModule
        QueryBody
          NumericLiteral
            IntegerLiteral "1"
      Error
        BadCharacter "^"
        IntegerLiteral "2"
    ---
    error at 2..3: unexpected character
    "#);
}

#[test]
fn missing_semicolon_after_declaration() {
    let source = "declare variable $x := 1 $x";
    let parse = parse(source, Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), DiagnosticKind::ExpectedToken);
    assert_eq!(diags[0].message(), "expected `;`");
    assert_eq!(&source[diags[0].range()], "$");
    assert!(first_node(&parse, SyntaxKind::QueryBody).is_some());
}

#[test]
fn unknown_entity_reference() {
    let parse = parse("<a>&nbsp;</a>", Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), DiagnosticKind::UnknownEntityRef);
    assert_eq!(diags[0].message(), "unknown entity reference `nbsp`");
}
