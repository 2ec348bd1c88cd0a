use indoc::indoc;

use crate::parser::tests::{dump_with, first_node, node_kinds, parse_clean};
use crate::{Dialect, SyntaxKind, parse};

#[test]
fn contains_text_with_ftand() {
    insta::assert_snapshot!(dump_with(r#"$d contains text "a" ftand "b""#, Dialect::FULL_TEXT), @r#"
    Module
      MainModule
        QueryBody
          FTContainsExpr
            VarRef
              Dollar "$"
              QName
                NCName "d"
            Keyword "contains"
            Keyword "text"
            FTSelection
              FTAnd
                FTWords
                  StringLiteral
                    StringLiteralStart "\""
                    StringLiteralContents "a"
                    StringLiteralEnd "\""
                Keyword "ftand"
                FTWords
                  StringLiteral
                    StringLiteralStart "\""
                    StringLiteralContents "b"
                    StringLiteralEnd "\""
    "#);
}

#[test]
fn options_and_positional_filters() {
    let parse = parse_clean(
        r#"$d contains text "a" any word occurs at least 2 times using stemming using language "en" ordered window 5 words"#,
        Dialect::FULL_TEXT,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::FTAnyallOption,
        SyntaxKind::FTTimes,
        SyntaxKind::FTRange,
        SyntaxKind::FTPrimaryWithOptions,
        SyntaxKind::FTMatchOptions,
        SyntaxKind::FTStemOption,
        SyntaxKind::FTLanguageOption,
        SyntaxKind::FTOrder,
        SyntaxKind::FTWindow,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn boolean_operators_nest_by_precedence() {
    let parse = parse_clean(
        r#". contains text ("a" ftor "b") ftand ftnot "c" not in "d""#,
        Dialect::FULL_TEXT,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::FTOr,
        SyntaxKind::FTAnd,
        SyntaxKind::FTUnaryNot,
        SyntaxKind::FTMildNot,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn score_variables_and_option_declaration() {
    let parse = parse_clean(
        indoc! {r#"
            declare ft-option using case insensitive;
            for $x score $s in $docs[. contains text "x"]
            let score $t := $x contains text "y" weight { 0.5 }
            return ($s, $t)
        "#},
        Dialect::FULL_TEXT,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::FTOptionDecl,
        SyntaxKind::FTCaseOption,
        SyntaxKind::FTScoreVar,
        SyntaxKind::FTWeight,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn without_content() {
    let parse = parse_clean(
        r#"$p contains text "x" without content $p/note"#,
        Dialect::FULL_TEXT,
    );
    assert!(first_node(&parse, SyntaxKind::FTIgnoreOption).is_some());
}

#[test]
fn contains_text_needs_the_dialect() {
    let parse = parse(r#"$d contains text "a""#, Dialect::XQUERY);
    assert!(first_node(&parse, SyntaxKind::FTContainsExpr).is_none());
    assert!(parse.diagnostics().has_errors());
}
