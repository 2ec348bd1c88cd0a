use indoc::indoc;

use crate::parser::tests::{child_kinds, dump_with, first_node, node_kinds, parse_clean};
use crate::{Dialect, SyntaxKind, parse};

fn body_kinds(source: &str) -> Vec<SyntaxKind> {
    let parse = parse_clean(source, Dialect::SCRIPTING);
    let body = first_node(&parse, SyntaxKind::QueryBody).unwrap();
    child_kinds(&body)
}

#[test]
fn statement_sequence() {
    insta::assert_snapshot!(dump_with("f(); $x", Dialect::SCRIPTING), @r#"
    Module
      MainModule
        QueryBody
          ApplyStatement
            FunctionCall
              QName
                NCName "f"
              ArgumentList
                ParenOpen "("
                ParenClose ")"
            Semicolon ";"
          VarRef
            Dollar "$"
            QName
              NCName "x"
    "#);
}

#[test]
fn declarations_loops_and_assignments() {
    let kinds = body_kinds(indoc! {"
        variable $x := 1;
        while ($x < 3) {
          $x := $x + 1;
        }
        $x
    "});
    assert_eq!(
        kinds,
        [
            SyntaxKind::VarDeclStatement,
            SyntaxKind::WhileStatement,
            SyntaxKind::VarRef,
        ]
    );
}

#[test]
fn loop_control_and_exit() {
    let parse = parse_clean(
        indoc! {"
            while (true()) { break loop; }
            while ($more) { continue loop; }
            exit returning 1;
        "},
        Dialect::SCRIPTING,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::BlockStatement,
        SyntaxKind::BreakStatement,
        SyntaxKind::ContinueStatement,
        SyntaxKind::ExitStatement,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn block_expression() {
    let parse = parse_clean(
        "let $x := block { 1; 2 } return $x",
        Dialect::SCRIPTING,
    );
    let block = first_node(&parse, SyntaxKind::BlockExpr).unwrap();
    assert_eq!(
        child_kinds(&block),
        [SyntaxKind::ApplyStatement, SyntaxKind::NumericLiteral]
    );
}

#[test]
fn function_body_holds_statements() {
    let parse = parse_clean(
        "declare function local:f() { variable $a := 1; $a }; local:f()",
        Dialect::SCRIPTING,
    );
    let body = first_node(&parse, SyntaxKind::FunctionBody).unwrap();
    assert!(child_kinds(&body).contains(&SyntaxKind::VarDeclStatement));
}

#[test]
fn missing_semicolon_between_statements() {
    let parse = parse("f() g()", Dialect::SCRIPTING);
    let messages: Vec<_> = parse
        .diagnostics()
        .iter()
        .map(|d| (d.range(), d.message()))
        .collect();
    assert_eq!(messages.len(), 1);
    assert_eq!(u32::from(messages[0].0.start()), 4);
    assert_eq!(messages[0].1, "expected `;`");
    assert_eq!(parse.syntax().text().to_string(), "f() g()");
}
