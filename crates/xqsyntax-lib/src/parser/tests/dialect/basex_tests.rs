use crate::parser::tests::{child_kinds, dump_with, first_node, parse_clean};
use crate::{Dialect, SyntaxKind};

#[test]
fn update_with_empty_block() {
    insta::assert_snapshot!(dump_with("$d update { }", Dialect::BASEX), @r#"
    Module
      MainModule
        QueryBody
          UpdateExpr
            VarRef
              Dollar "$"
              QName
                NCName "d"
            Keyword "update"
            EnclosedExpr
              BraceOpen "{"
              BraceClose "}"
    "#);
}

#[test]
fn update_with_updating_expressions() {
    let dialect = Dialect::BASEX | Dialect::UPDATE;
    let parse = parse_clean("$doc update { delete node ./a }", dialect);
    assert!(first_node(&parse, SyntaxKind::DeleteExpr).is_some());

    let parse = parse_clean(r#"$doc update rename node . as "b""#, dialect);
    let update = first_node(&parse, SyntaxKind::UpdateExpr).unwrap();
    assert_eq!(
        child_kinds(&update),
        [SyntaxKind::VarRef, SyntaxKind::RenameExpr]
    );
}

#[test]
fn chained_updates_nest_to_the_left() {
    let parse = parse_clean("$d update { () } update { () }", Dialect::BASEX);
    let outer = first_node(&parse, SyntaxKind::UpdateExpr).unwrap();
    assert_eq!(
        child_kinds(&outer),
        [SyntaxKind::UpdateExpr, SyntaxKind::EnclosedExpr]
    );
}
