//! Direct constructor regions: start tags, attribute values, element content, end tags,
//! XML comments, CDATA sections and processing instructions.

use super::Step;
use super::scan::{
    char_len, entity_ref, name_len, run_until, starts_with_name, whitespace_len,
};
use super::state::{Region, Transition};
use crate::syntax::SyntaxKind;

fn enclosed_expr() -> Step {
    Step::push(SyntaxKind::BraceOpen, 1, Region::Expr, 0, SyntaxKind::BraceClose)
}

fn bad_char(rest: &str) -> Step {
    Step::new(SyntaxKind::BadCharacter, char_len(rest), Transition::Stay)
}

pub(super) fn elem_tag(rest: &str) -> Step {
    let ws = whitespace_len(rest);
    if ws > 0 {
        return Step::new(SyntaxKind::Whitespace, ws, Transition::Stay);
    }
    let name = name_len(rest);
    if name > 0 {
        return Step::new(SyntaxKind::NCName, name, Transition::Stay);
    }
    if rest.starts_with("/>") {
        return Step::new(SyntaxKind::DirSelfClose, 2, Transition::Pop);
    }
    match rest.as_bytes()[0] {
        b':' => Step::new(SyntaxKind::Colon, 1, Transition::Stay),
        b'=' => Step::new(SyntaxKind::Equal, 1, Transition::Stay),
        b'>' => Step::new(
            SyntaxKind::DirTagClose,
            1,
            Transition::Switch {
                region: Region::ElemContent,
                sub: 0,
            },
        ),
        q @ (b'"' | b'\'') => Step::push(
            SyntaxKind::DirAttrValueStart,
            1,
            Region::AttrValue,
            u8::from(q == b'\''),
            SyntaxKind::DirAttrValueEnd,
        ),
        _ => bad_char(rest),
    }
}

pub(super) fn attr_value(rest: &str, sub: u8) -> Step {
    let quote = if sub == 0 { '"' } else { '\'' };
    if rest.starts_with(quote) {
        if rest[1..].starts_with(quote) {
            return Step::new(SyntaxKind::EscapedQuote, 2, Transition::Stay);
        }
        return Step::new(SyntaxKind::DirAttrValueEnd, 1, Transition::Exit);
    }
    if rest.starts_with("{{") || rest.starts_with("}}") {
        return Step::new(SyntaxKind::DirBraceEscape, 2, Transition::Stay);
    }
    match rest.as_bytes()[0] {
        b'{' => enclosed_expr(),
        b'}' | b'<' => bad_char(rest),
        b'&' => {
            let (kind, len) = entity_ref(rest);
            Step::new(kind, len, Transition::Stay)
        }
        _ => {
            let stops: [&str; 5] = [if sub == 0 { "\"" } else { "'" }, "{", "}", "&", "<"];
            let len = run_until(rest, &stops);
            Step::new(SyntaxKind::DirAttrValueContents, len, Transition::Stay)
        }
    }
}

pub(super) fn elem_content(rest: &str) -> Step {
    if rest.starts_with("</") {
        return Step::new(
            SyntaxKind::DirEndTagOpen,
            2,
            Transition::Switch {
                region: Region::ClosingTag,
                sub: 0,
            },
        );
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
    if rest.starts_with("<![CDATA[") {
        return Step::push(SyntaxKind::CDataStart, 9, Region::CData, 0, SyntaxKind::CDataEnd);
    }
    if rest.starts_with("<?") {
        return Step::push(SyntaxKind::DirPiStart, 2, Region::DirPi, 0, SyntaxKind::DirPiEnd);
    }
    if rest.starts_with("{{") || rest.starts_with("}}") {
        return Step::new(SyntaxKind::DirBraceEscape, 2, Transition::Stay);
    }
    match rest.as_bytes()[0] {
        b'<' if starts_with_name(&rest[1..]) => Step::push(
            SyntaxKind::DirElemOpen,
            1,
            Region::ElemTag,
            0,
            SyntaxKind::DirEndTagClose,
        ),
        b'<' | b'}' => bad_char(rest),
        b'{' => enclosed_expr(),
        b'&' => {
            let (kind, len) = entity_ref(rest);
            Step::new(kind, len, Transition::Stay)
        }
        _ => {
            let len = run_until(rest, &["<", "{", "}", "&"]);
            Step::new(SyntaxKind::DirElemText, len, Transition::Stay)
        }
    }
}

pub(super) fn closing_tag(rest: &str) -> Step {
    let ws = whitespace_len(rest);
    if ws > 0 {
        return Step::new(SyntaxKind::Whitespace, ws, Transition::Stay);
    }
    let name = name_len(rest);
    if name > 0 {
        return Step::new(SyntaxKind::NCName, name, Transition::Stay);
    }
    match rest.as_bytes()[0] {
        b':' => Step::new(SyntaxKind::Colon, 1, Transition::Stay),
        b'>' => Step::new(SyntaxKind::DirEndTagClose, 1, Transition::Exit),
        _ => bad_char(rest),
    }
}

pub(super) fn dir_comment(rest: &str) -> Step {
    if rest.starts_with("-->") {
        return Step::new(SyntaxKind::DirCommentEnd, 3, Transition::Exit);
    }
    let len = run_until(rest, &["-->"]);
    Step::new(SyntaxKind::DirCommentContents, len, Transition::Stay)
}

pub(super) fn cdata(rest: &str) -> Step {
    if rest.starts_with("]]>") {
        return Step::new(SyntaxKind::CDataEnd, 3, Transition::Exit);
    }
    let len = run_until(rest, &["]]>"]);
    Step::new(SyntaxKind::CDataContents, len, Transition::Stay)
}

pub(super) fn dir_pi(rest: &str, sub: u8) -> Step {
    if rest.starts_with("?>") {
        return Step::new(SyntaxKind::DirPiEnd, 2, Transition::Exit);
    }
    if sub == 0 {
        let name = name_len(rest);
        if name > 0 {
            return Step::new(
                SyntaxKind::NCName,
                name,
                Transition::Switch {
                    region: Region::DirPi,
                    sub: 1,
                },
            );
        }
    }
    let len = run_until(rest, &["?>"]);
    Step::new(
        SyntaxKind::DirPiContents,
        len,
        Transition::Switch {
            region: Region::DirPi,
            sub: 1,
        },
    )
}
