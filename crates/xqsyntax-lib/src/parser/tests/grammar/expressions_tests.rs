use crate::parser::tests::{dump, first_node, node_kinds, parse_clean};
use crate::{Dialect, SyntaxKind};

#[test]
fn single_literal_has_no_wrappers() {
    insta::assert_snapshot!(dump("1"), @r#"
    Module
      MainModule
        QueryBody
          NumericLiteral
            IntegerLiteral "1"
    "#);
}

#[test]
fn precedence_of_arithmetic() {
    insta::assert_snapshot!(dump("1 + 2 * 3"), @r#"
    Module
      MainModule
        QueryBody
          AdditiveExpr
            NumericLiteral
              IntegerLiteral "1"
            Plus "+"
            MultiplicativeExpr
              NumericLiteral
                IntegerLiteral "2"
              Star "*"
              NumericLiteral
                IntegerLiteral "3"
    "#);
}

#[test]
fn comma_sequence() {
    insta::assert_snapshot!(dump("1, 2"), @r#"
    Module
      MainModule
        QueryBody
          Expr
            NumericLiteral
              IntegerLiteral "1"
            Comma ","
            NumericLiteral
              IntegerLiteral "2"
    "#);
}

#[test]
fn operator_keywords_are_also_names() {
    insta::assert_snapshot!(dump("div div div"), @r#"
    Module
      MainModule
        QueryBody
          MultiplicativeExpr
            AxisStep
              NameTest
                QName
                  NCName "div"
            Keyword "div"
            AxisStep
              NameTest
                QName
                  NCName "div"
    "#);
}

#[test]
fn path_with_predicate() {
    insta::assert_snapshot!(dump("$doc//item[@id = 1]/name"), @r#"
    Module
      MainModule
        QueryBody
          RelativePathExpr
            RelativePathExpr
              VarRef
                Dollar "$"
                QName
                  NCName "doc"
              DoubleSlash "//"
              AxisStep
                NameTest
                  QName
                    NCName "item"
                Predicate
                  BracketOpen "["
                  ComparisonExpr
                    AxisStep
                      At "@"
                      NameTest
                        QName
                          NCName "id"
                    Equal "="
                    NumericLiteral
                      IntegerLiteral "1"
                  BracketClose "]"
            Slash "/"
            AxisStep
              NameTest
                QName
                  NCName "name"
    "#);
}

#[test]
fn unary_minus() {
    insta::assert_snapshot!(dump("-1"), @r#"
    Module
      MainModule
        QueryBody
          UnaryExpr
            Minus "-"
            NumericLiteral
              IntegerLiteral "1"
    "#);
}

#[test]
fn function_call_with_placeholder() {
    insta::assert_snapshot!(dump("f(1, ?)"), @r#"
    Module
      MainModule
        QueryBody
          FunctionCall
            QName
              NCName "f"
            ArgumentList
              ParenOpen "("
              NumericLiteral
                IntegerLiteral "1"
              Comma ","
              ArgumentPlaceholder
                Question "?"
              ParenClose ")"
    "#);
}

#[test]
fn named_function_reference() {
    insta::assert_snapshot!(dump("fn:concat#2"), @r##"
    Module
      MainModule
        QueryBody
          NamedFunctionRef
            QName
              NCName "fn"
              Colon ":"
              NCName "concat"
            Hash "#"
            IntegerLiteral "2"
    "##);
}

#[test]
fn lookup_on_variable() {
    insta::assert_snapshot!(dump("$m?key"), @r#"
    Module
      MainModule
        QueryBody
          PostfixExpr
            VarRef
              Dollar "$"
              QName
                NCName "m"
            Lookup
              Question "?"
              NCName "key"
    "#);
}

#[test]
fn string_constructor_with_interpolation() {
    insta::assert_snapshot!(dump("``[Hello `{$name}`!]``"), @r#"
    Module
      MainModule
        QueryBody
          StringConstructor
            StringConstructorStart "``["
            StringConstructorContents "Hello "
            StringConstructorInterpolation
              StringInterpolationOpen "`{"
              VarRef
                Dollar "$"
                QName
                  NCName "name"
              StringInterpolationClose "}`"
            StringConstructorContents "!"
            StringConstructorEnd "]``"
    "#);
}

#[test]
fn arrow_and_simple_map() {
    let parse = parse_clean("upper-case($s) ! string-length(.) => sum()", Dialect::XQUERY);
    let kinds = node_kinds(&parse);
    assert!(kinds.contains(&SyntaxKind::SimpleMapExpr));
    assert!(kinds.contains(&SyntaxKind::ArrowExpr));
    assert!(kinds.contains(&SyntaxKind::ContextItemExpr));
}

#[test]
fn maps_arrays_and_inline_functions() {
    let parse = parse_clean(
        r#"map { "a": [1, 2], "b": array { 3 } }, function($x as xs:integer) as xs:integer { $x + 1 }"#,
        Dialect::XQUERY,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::MapConstructor,
        SyntaxKind::MapConstructorEntry,
        SyntaxKind::SquareArrayConstructor,
        SyntaxKind::CurlyArrayConstructor,
        SyntaxKind::InlineFunctionExpr,
        SyntaxKind::ParamList,
        SyntaxKind::FunctionBody,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn axes_and_wildcards() {
    let parse = parse_clean(
        "ancestor-or-self::*, child::p:*, *:local, Q{http://x}*, ..",
        Dialect::XQUERY,
    );
    let wildcards = node_kinds(&parse)
        .into_iter()
        .filter(|k| *k == SyntaxKind::Wildcard)
        .count();
    assert_eq!(wildcards, 4);
}

#[test]
fn instance_of_and_cast() {
    let parse = parse_clean("$x instance of xs:integer+, $y cast as xs:double?", Dialect::XQUERY);
    assert!(first_node(&parse, SyntaxKind::InstanceofExpr).is_some());
    let single = first_node(&parse, SyntaxKind::SingleType).unwrap();
    assert_eq!(single.text().to_string(), "xs:double?");
}

#[test]
fn comparison_is_not_associative() {
    let parse = crate::parse("1 = 2 = 3", Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message(), "unexpected `=`");
    let error = first_node(&parse, SyntaxKind::Error).unwrap();
    assert_eq!(error.text().to_string(), "= 3");
}
