//! xqDoc comments: `(:~ ... :)` with `@tag` markers and `@param $name` variables.

use super::Step;
use super::scan::{name_len, whitespace_len};
use super::state::{Region, Transition, XQDOC_PARAM};
use crate::syntax::SyntaxKind;

pub(super) fn step(source: &str, pos: usize, sub: u8) -> Step {
    let rest = &source[pos..];
    let depth = sub & !XQDOC_PARAM;
    let after_param = sub & XQDOC_PARAM != 0;
    let switch = |sub| Transition::Switch {
        region: Region::XQDoc,
        sub,
    };

    if depth == 0 && rest.starts_with(":)") {
        return Step::new(SyntaxKind::XQDocEnd, 2, Transition::Exit);
    }
    if after_param {
        let ws = whitespace_len(rest);
        if ws > 0 {
            return Step::new(SyntaxKind::Whitespace, ws, Transition::Stay);
        }
        if let Some(var) = rest.strip_prefix('$') {
            let name = name_len(var);
            if name > 0 {
                return Step::new(SyntaxKind::XQDocVariable, name + 1, switch(depth));
            }
        }
    }
    if let Some(len) = tag_len(source, pos) {
        let next = if &rest[1..len] == "param" {
            depth | XQDOC_PARAM
        } else {
            depth
        };
        return Step::new(SyntaxKind::XQDocTag, len, switch(next));
    }

    // Contents run up to the closing `:)`, tracking nested comments, or up to a tag.
    let bytes = rest.as_bytes();
    let mut depth = depth;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b":)") {
            if depth == 0 {
                break;
            }
            depth -= 1;
            i += 2;
        } else if bytes[i..].starts_with(b"(:") {
            depth = (depth + 1).min(!XQDOC_PARAM);
            i += 2;
        } else if i > 0 && bytes[i] == b'@' && tag_len(source, pos + i).is_some() {
            break;
        } else {
            i += 1;
        }
    }
    Step::new(SyntaxKind::XQDocContents, i, switch(depth))
}

/// `@name` preceded by whitespace, `~` or a line start.
fn tag_len(source: &str, pos: usize) -> Option<usize> {
    let rest = &source[pos..];
    if !rest.starts_with('@') {
        return None;
    }
    let preceded_ok = source[..pos]
        .bytes()
        .next_back()
        .is_none_or(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'~'));
    let letters = rest[1..]
        .bytes()
        .take_while(u8::is_ascii_alphabetic)
        .count();
    (preceded_ok && letters > 0).then_some(letters + 1)
}
