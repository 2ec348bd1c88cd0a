use indoc::indoc;

use crate::parser::tests::{child_kinds, dump, first_node, parse_clean};
use crate::{Dialect, SyntaxKind, parse};

#[test]
fn for_return() {
    insta::assert_snapshot!(dump("for $x in $s return $x"), @r#"
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
                VarRef
                  Dollar "$"
                  QName
                    NCName "s"
            ReturnClause
              Keyword "return"
              VarRef
                Dollar "$"
                QName
                  NCName "x"
    "#);
}

#[test]
fn window_count_return_in_order() {
    let parse = parse_clean(
        indoc! {r#"
            for tumbling window $w in (1, 2, 3)
                start $s when true()
                end $e when $e - $s eq 1
            count $c
            return $w
        "#},
        Dialect::XQUERY,
    );
    let flwor = first_node(&parse, SyntaxKind::FLWORExpr).unwrap();
    assert_eq!(
        child_kinds(&flwor),
        [
            SyntaxKind::WindowClause,
            SyntaxKind::CountClause,
            SyntaxKind::ReturnClause,
        ]
    );
    let window = first_node(&parse, SyntaxKind::WindowClause).unwrap();
    let conditions: Vec<_> = child_kinds(&window)
        .into_iter()
        .filter(|k| {
            matches!(
                k,
                SyntaxKind::WindowStartCondition | SyntaxKind::WindowEndCondition
            )
        })
        .collect();
    assert_eq!(
        conditions,
        [
            SyntaxKind::WindowStartCondition,
            SyntaxKind::WindowEndCondition
        ]
    );
}

#[test]
fn every_intermediate_clause() {
    let parse = parse_clean(
        indoc! {r#"
            for $x allowing empty at $i in $xs, $y in $ys
            let $z as xs:integer := $x + $y
            where $z gt 0
            group by $k := $z mod 2 collation "http://c"
            stable order by $k descending empty greatest, $i
            count $n
            return ($k, $n)
        "#},
        Dialect::XQUERY,
    );
    let flwor = first_node(&parse, SyntaxKind::FLWORExpr).unwrap();
    assert_eq!(
        child_kinds(&flwor),
        [
            SyntaxKind::ForClause,
            SyntaxKind::LetClause,
            SyntaxKind::WhereClause,
            SyntaxKind::GroupByClause,
            SyntaxKind::OrderByClause,
            SyntaxKind::CountClause,
            SyntaxKind::ReturnClause,
        ]
    );
    assert!(first_node(&parse, SyntaxKind::AllowingEmpty).is_some());
    assert!(first_node(&parse, SyntaxKind::PositionalVar).is_some());
    assert!(first_node(&parse, SyntaxKind::OrderModifier).is_some());
}

#[test]
fn clause_keywords_stay_names_without_their_shape() {
    // `for` without `$` is a path step named `for`.
    let parse = parse_clean("for, let, count", Dialect::XQUERY);
    assert!(first_node(&parse, SyntaxKind::FLWORExpr).is_none());
}

#[test]
fn missing_return() {
    let parse = parse("for $x in 1", Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message(), "expected `return`");
    assert!(first_node(&parse, SyntaxKind::FLWORExpr).is_some());
}
