use crate::parser::tests::{dump, first_node};
use crate::{Dialect, DiagnosticKind, SyntaxKind, parse};

#[test]
fn unterminated_xml_comment() {
    insta::assert_snapshot!(dump("<!-- unterminated"), @r#"
    Module
      MainModule
        QueryBody
          DirCommentConstructor
            DirCommentStart "<!--"
            DirCommentContents " unterminated"
            UnexpectedEndOfBlock ""
    ---
    error at 17..17: unexpected end of block
    "#);
}

#[test]
fn unterminated_string_literal() {
    insta::assert_snapshot!(dump(r#""abc"#), @r#"
    Module
      MainModule
        QueryBody
          StringLiteral
            StringLiteralStart "\""
            StringLiteralContents "abc"
            UnexpectedEndOfBlock ""
    ---
    error at 4..4: unexpected end of block
    "#);
}

#[test]
fn missing_closing_paren() {
    insta::assert_snapshot!(dump("(1, 2"), @r#"
    Module
      MainModule
        QueryBody
          ParenthesizedExpr
            ParenOpen "("
            Expr
              NumericLiteral
                IntegerLiteral "1"
              Comma ","
              NumericLiteral
                IntegerLiteral "2"
    ---
    error at 5..5: expected `)`
    "#);
}

#[test]
fn missing_closing_brace() {
    let parse = parse(r#"map { "a": 1"#, Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message(), "expected `}`");
    assert!(first_node(&parse, SyntaxKind::MapConstructorEntry).is_some());
}

#[test]
fn element_closed_by_outer_end_tag() {
    let parse = parse("<a><b></a>", Dialect::XQUERY);
    let kinds: Vec<_> = parse.diagnostics().iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::MismatchedEndTag,
            DiagnosticKind::UnexpectedEndOfBlock
        ]
    );
}

#[test]
fn missing_paren_before_then() {
    insta::assert_snapshot!(dump("if ($a then 1 else 2"), @r#"
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
            Keyword "then"
            NumericLiteral
              IntegerLiteral "1"
            Keyword "else"
            NumericLiteral
              IntegerLiteral "2"
    ---
    error at 7..11: expected `)`
    "#);
}

#[test]
fn missing_paren_before_return() {
    insta::assert_snapshot!(dump("for $x in (1, 2 return $x"), @r#"
    Module
      MainModule
        QueryBody
          FLWORExpr
            ForClause
              Keyword "for"
              ForBinding
                Dollar "$"
                QName
                  NCName "x"
                Keyword "in"
                ParenthesizedExpr
                  ParenOpen "("
                  Expr
                    NumericLiteral
                      IntegerLiteral "1"
                    Comma ","
                    NumericLiteral
                      IntegerLiteral "2"
            ReturnClause
              Keyword "return"
              VarRef
                Dollar "$"
                QName
                  NCName "x"
    ---
    error at 16..22: expected `)`
    "#);
}

#[test]
fn junk_stops_at_enclosing_keyword() {
    let parse = parse("some $x in (1 2 3 satisfies $x", Dialect::XQUERY);
    let errors: Vec<_> = parse
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::Error)
        .map(|n| n.text().to_string())
        .collect();
    assert_eq!(errors, ["2 3"]);
    assert!(first_node(&parse, SyntaxKind::QuantifiedExpr).is_some());
    let messages: Vec<_> = parse.diagnostics().iter().map(|d| d.message()).collect();
    assert_eq!(messages, ["expected `)`"]);
}
