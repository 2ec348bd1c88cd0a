use crate::parser::tests::{first_node, parse_clean};
use crate::{Dialect, DiagnosticKind, ParseOptions, SyntaxKind, parse, parse_with};

#[test]
fn recursion_limit_swallows_the_rest() {
    let source = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    let options = ParseOptions::new(Dialect::XQUERY).with_recursion_limit(10);
    let parse = parse_with(&source, &options);

    let limits = parse
        .diagnostics()
        .iter()
        .filter(|d| d.kind() == DiagnosticKind::RecursionLimitExceeded)
        .count();
    assert_eq!(limits, 1);
    assert_eq!(parse.diagnostics().len(), 1);
    assert!(first_node(&parse, SyntaxKind::Error).is_some());
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn deep_nesting_within_the_limit() {
    let source = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    let parse = parse(&source, Dialect::XQUERY);
    assert!(parse.diagnostics().is_empty());
}

#[test]
fn deeply_nested_elements_hit_the_limit() {
    let source = "<a>".repeat(40_000);
    let parse = parse(&source, Dialect::XQUERY);
    assert_eq!(parse.syntax().text().to_string(), source);
    assert!(
        parse
            .diagnostics()
            .iter()
            .any(|d| d.kind() == DiagnosticKind::RecursionLimitExceeded)
    );
}

#[test]
fn long_run_of_open_braces() {
    let source = "{".repeat(40_000);
    let parse = parse(&source, Dialect::all());
    assert_eq!(parse.syntax().text().to_string(), source);
    assert!(!parse.diagnostics().is_empty());
}

#[test]
fn long_braced_uri_name() {
    let source = format!("Q{{{}}}local", "&amp;".repeat(20_000));
    let parse = parse_clean(&source, Dialect::XQUERY);
    assert!(first_node(&parse, SyntaxKind::URIQualifiedName).is_some());

    let wildcard = format!("$x/Q{{{}}}*", "&amp;".repeat(20_000));
    let parse = parse_clean(&wildcard, Dialect::XQUERY);
    assert!(first_node(&parse, SyntaxKind::Wildcard).is_some());
}
