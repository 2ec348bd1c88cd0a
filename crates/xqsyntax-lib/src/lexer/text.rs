//! String-like regions: string literals, braced URI literals, string constructors and
//! pragma bodies.

use super::Step;
use super::scan::{entity_ref, name_len, run_until, starts_with_name, whitespace_len};
use super::state::{Region, Transition};
use crate::syntax::SyntaxKind;

pub(super) fn string_literal(rest: &str, sub: u8) -> Step {
    let quote = if sub == 0 { "\"" } else { "'" };
    if let Some(after) = rest.strip_prefix(quote) {
        if after.starts_with(quote) {
            return Step::new(SyntaxKind::EscapedQuote, 2, Transition::Stay);
        }
        return Step::new(SyntaxKind::StringLiteralEnd, 1, Transition::Exit);
    }
    if rest.starts_with('&') {
        let (kind, len) = entity_ref(rest);
        return Step::new(kind, len, Transition::Stay);
    }
    let len = run_until(rest, &[quote, "&"]);
    Step::new(SyntaxKind::StringLiteralContents, len, Transition::Stay)
}

pub(super) fn braced_uri(rest: &str) -> Step {
    if rest.starts_with('}') {
        return Step::new(SyntaxKind::BracedUriEnd, 1, Transition::Exit);
    }
    if rest.starts_with('&') {
        let (kind, len) = entity_ref(rest);
        return Step::new(kind, len, Transition::Stay);
    }
    let len = run_until(rest, &["}", "&"]);
    Step::new(SyntaxKind::BracedUriContents, len, Transition::Stay)
}

pub(super) fn string_constructor(rest: &str) -> Step {
    if rest.starts_with("]``") {
        return Step::new(SyntaxKind::StringConstructorEnd, 3, Transition::Exit);
    }
    if rest.starts_with("`{") {
        return Step::push(
            SyntaxKind::StringInterpolationOpen,
            2,
            Region::Expr,
            0,
            SyntaxKind::StringInterpolationClose,
        );
    }
    let len = run_until(rest, &["]``", "`{"]);
    Step::new(SyntaxKind::StringConstructorContents, len, Transition::Stay)
}

pub(super) fn pragma(rest: &str, sub: u8) -> Step {
    if rest.starts_with("#)") {
        return Step::new(SyntaxKind::PragmaEnd, 2, Transition::Exit);
    }
    let switch = |sub| Transition::Switch {
        region: Region::Pragma,
        sub,
    };
    let ws = whitespace_len(rest);
    match sub {
        0 if ws > 0 => return Step::new(SyntaxKind::Whitespace, ws, Transition::Stay),
        0 | 2 => {
            let name = name_len(rest);
            if name > 0 {
                return Step::new(SyntaxKind::NCName, name, switch(sub + 1));
            }
        }
        1 if rest.starts_with(':') && starts_with_name(&rest[1..]) => {
            return Step::new(SyntaxKind::Colon, 1, switch(2));
        }
        _ => {}
    }
    if ws > 0 {
        return Step::new(SyntaxKind::Whitespace, ws, switch(3));
    }
    let len = run_until(rest, &["#)"]);
    Step::new(SyntaxKind::PragmaContents, len, switch(3))
}
