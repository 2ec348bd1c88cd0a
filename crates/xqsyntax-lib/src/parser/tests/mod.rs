mod dialect;
mod grammar;
mod properties_tests;
mod recovery;

use crate::config::Dialect;
use crate::parser::{Parse, parse};
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Tree outline, then the diagnostics in plain form when there are any.
pub(super) fn render(parse: &Parse) -> String {
    let mut out = parse.debug_tree();
    if !parse.diagnostics().is_empty() {
        out.push_str("---\n");
        out.push_str(&parse.diagnostics().printer().render());
    }
    out
}

pub(super) fn dump(source: &str) -> String {
    render(&parse(source, Dialect::XQUERY))
}

pub(super) fn dump_with(source: &str, dialect: Dialect) -> String {
    render(&parse(source, dialect))
}

/// Parses and asserts the input is free of diagnostics.
pub(super) fn parse_clean(source: &str, dialect: Dialect) -> Parse {
    let parse = parse(source, dialect);
    assert!(
        parse.diagnostics().is_empty(),
        "unexpected diagnostics for {source:?}:\n{}",
        parse.diagnostics().printer().render()
    );
    parse
}

/// Every node kind in preorder.
pub(super) fn node_kinds(parse: &Parse) -> Vec<SyntaxKind> {
    parse.syntax().descendants().map(|n| n.kind()).collect()
}

pub(super) fn first_node(parse: &Parse, kind: SyntaxKind) -> Option<SyntaxNode> {
    parse.syntax().descendants().find(|n| n.kind() == kind)
}

/// Kinds of the direct child nodes of `node`.
pub(super) fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|n| n.kind()).collect()
}
