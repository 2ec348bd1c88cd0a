//! Expression region: operators, names, numbers, comments and the entry points of every
//! embedded region.

use logos::Logos;

use super::Step;
use super::scan::{is_start_tag, starts_with_name};
use super::state::{LexerState, Region, Transition};
use crate::syntax::SyntaxKind;

pub(super) fn step(rest: &str, state: &LexerState) -> Step {
    if rest.starts_with("}`") && state.top_exit() == Some(SyntaxKind::StringInterpolationClose) {
        return Step::new(SyntaxKind::StringInterpolationClose, 2, Transition::Exit);
    }
    if rest.starts_with("(:~") {
        return Step::push(SyntaxKind::XQDocStart, 3, Region::XQDoc, 0, SyntaxKind::XQDocEnd);
    }
    if rest.starts_with("(:") {
        return comment(rest);
    }
    if rest.starts_with("<!--") {
        return Step::push(
            SyntaxKind::DirCommentStart,
            4,
            Region::DirComment,
            0,
            SyntaxKind::DirCommentEnd,
        );
    }
    if let Some(after) = rest.strip_prefix("<?")
        && starts_with_name(after)
    {
        return Step::push(SyntaxKind::DirPiStart, 2, Region::DirPi, 0, SyntaxKind::DirPiEnd);
    }
    if let Some(after) = rest.strip_prefix('<')
        && starts_with_name(after)
        && is_start_tag(rest)
    {
        return Step::push(
            SyntaxKind::DirElemOpen,
            1,
            Region::ElemTag,
            0,
            SyntaxKind::DirEndTagClose,
        );
    }
    logos_step(rest)
}

fn logos_step(rest: &str) -> Step {
    let mut lexer = SyntaxKind::lexer(rest);
    match lexer.next() {
        Some(Ok(kind)) => {
            let len = lexer.span().end;
            Step::new(kind, len, transition_for(kind, rest))
        }
        Some(Err(())) => {
            // Coalesce consecutive unrecognized characters into one token.
            let mut end = lexer.span().end;
            while let Some(Err(())) = lexer.next() {
                if lexer.span().start != end {
                    break;
                }
                end = lexer.span().end;
            }
            while !rest.is_char_boundary(end) {
                end += 1;
            }
            Step::new(SyntaxKind::BadCharacter, end, Transition::Stay)
        }
        None => Step::new(SyntaxKind::BadCharacter, rest.len(), Transition::Stay),
    }
}

fn transition_for(kind: SyntaxKind, text: &str) -> Transition {
    match kind {
        SyntaxKind::BraceOpen => Transition::Push {
            region: Region::Expr,
            sub: 0,
            exit: SyntaxKind::BraceClose,
        },
        SyntaxKind::BraceClose => Transition::Exit,
        SyntaxKind::StringLiteralStart => Transition::Push {
            region: Region::StringLiteral,
            sub: u8::from(text.starts_with('\'')),
            exit: SyntaxKind::StringLiteralEnd,
        },
        SyntaxKind::BracedUriStart => Transition::Push {
            region: Region::BracedUri,
            sub: 0,
            exit: SyntaxKind::BracedUriEnd,
        },
        SyntaxKind::StringConstructorStart => Transition::Push {
            region: Region::StringConstructor,
            sub: 0,
            exit: SyntaxKind::StringConstructorEnd,
        },
        SyntaxKind::PragmaStart => Transition::Push {
            region: Region::Pragma,
            sub: 0,
            exit: SyntaxKind::PragmaEnd,
        },
        _ => Transition::Stay,
    }
}

/// `(: ... :)` with nesting. Runs to end of input when unterminated.
fn comment(rest: &str) -> Step {
    let bytes = rest.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"(:") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b":)") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return Step::new(SyntaxKind::Comment, i, Transition::Stay);
            }
        } else {
            i += 1;
        }
    }
    Step::new(SyntaxKind::UnterminatedComment, rest.len(), Transition::Stay)
}
