use rowan::TextRange;

use super::*;
use crate::SyntaxKind;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedEndOfBlock, range(0, 0))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.as_slice()[0].message(), "unexpected end of block");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedToken, range(3, 4))
        .message("`;`")
        .emit();

    let diag = &diagnostics.as_slice()[0];
    assert_eq!(diag.kind(), DiagnosticKind::ExpectedToken);
    assert_eq!(diag.message(), "expected `;`");
    assert_eq!(diag.range(), range(3, 4));
}

#[test]
fn kind_categories() {
    assert!(DiagnosticKind::IncompleteExponent.is_lexical());
    assert!(!DiagnosticKind::ExpectedToken.is_lexical());
    assert!(DiagnosticKind::MultipleVendorCatchClauses.is_structural());
    assert!(!DiagnosticKind::RecursionLimitExceeded.is_structural());
    assert_eq!(
        DiagnosticKind::for_sentinel(SyntaxKind::PartialEntityRef),
        Some(DiagnosticKind::PartialEntityRef)
    );
    assert_eq!(DiagnosticKind::for_sentinel(SyntaxKind::NCName), None);
}

#[test]
fn message_rendering() {
    assert_eq!(
        DiagnosticKind::UnknownDeclaration.message(None),
        "unknown declaration"
    );
    assert_eq!(
        DiagnosticKind::UnknownDeclaration.message(Some("foo")),
        "unknown declaration `foo`"
    );
    assert_eq!(
        DiagnosticKind::MisplacedHeaderDecl.message(Some("namespace declaration")),
        "namespace declaration must precede body declarations"
    );
    assert_eq!(
        DiagnosticKind::ExpectedExpression.message(Some("after `return`")),
        "expected an expression: after `return`"
    );
}

#[test]
fn merge_sorted_is_stable() {
    let mut lexical = Diagnostics::new();
    lexical
        .report(DiagnosticKind::BadCharacter, range(5, 6))
        .emit();
    let mut syntax = Diagnostics::new();
    syntax
        .report(DiagnosticKind::ExpectedToken, range(5, 5))
        .message("`)`")
        .emit();
    syntax
        .report(DiagnosticKind::ExpectedExpression, range(1, 1))
        .emit();

    lexical.merge_sorted(syntax);
    let kinds: Vec<_> = lexical.iter().map(Diagnostic::kind).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::ExpectedExpression,
            DiagnosticKind::BadCharacter,
            DiagnosticKind::ExpectedToken
        ]
    );
}

#[test]
fn display_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MismatchedEndTag, range(8, 9))
        .message("a")
        .related_to("start tag", range(1, 2))
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @"error at 8..9: expected end tag `a` (related: start tag at 1..2)");
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownDeclaration, range(8, 11))
        .message("foo")
        .emit();

    let result = diagnostics
        .printer()
        .source("declare foo bar;")
        .path("main.xq")
        .render();
    insta::assert_snapshot!(result, @r"
    error: unknown declaration `foo`
     --> main.xq:1:9
      |
    1 | declare foo bar;
      |         ^^^
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, TextRange::empty(0.into()))
        .emit();

    let result = diagnostics.printer().source("hello").render();
    insta::assert_snapshot!(result, @r"
    error: expected an expression
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_multiple_diagnostics() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::BadCharacter, range(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedToken, range(6, 10))
        .message("`;`")
        .emit();

    let result = diagnostics.printer().source("^hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: unexpected character
      |
    1 | ^hello world!
      | ^

    error: expected `;`
      |
    1 | ^hello world!
      |       ^^^^
    ");
}

#[test]
fn printer_related_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::MultipleVendorCatchClauses, range(6, 11))
        .related_to("first vendor catch", range(0, 5))
        .emit();

    let result = diagnostics.printer().source("catch catch").render();
    assert!(result.starts_with("error: multiple vendor catch clauses"));
    assert!(result.contains("first vendor catch"));
    assert!(result.contains("^^^^^"));
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::BadCharacter, range(0, 1))
        .emit();

    let result = diagnostics.printer().source("^").colored(true).render();
    assert!(result.contains("unexpected character"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.printer().source("source").render().is_empty());
    assert!(diagnostics.printer().render().is_empty());
}
