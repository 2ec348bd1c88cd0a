//! Direct (XML syntax) and computed node constructors.

use rowan::TextRange;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::syntax::{Keyword, SyntaxKind, TokenSet};

/// Character data inside element content or an attribute value.
const CHAR_DATA: TokenSet = TokenSet::new(&[
    SyntaxKind::DirElemText,
    SyntaxKind::DirAttrValueContents,
    SyntaxKind::EscapedQuote,
    SyntaxKind::DirBraceEscape,
    SyntaxKind::PredefinedEntityRef,
    SyntaxKind::CharRef,
    SyntaxKind::PartialEntityRef,
    SyntaxKind::EmptyEntityRef,
    SyntaxKind::BadCharacter,
]);

/// Computed constructors whose name part is `name` or `{ expr }`, then a body.
const NAMED_COMPUTED: &[(Keyword, SyntaxKind)] = &[
    (Keyword::Element, SyntaxKind::CompElemConstructor),
    (Keyword::Attribute, SyntaxKind::CompAttrConstructor),
    (Keyword::Namespace, SyntaxKind::CompNamespaceConstructor),
    (Keyword::ProcessingInstruction, SyntaxKind::CompPIConstructor),
];

/// Computed constructors with only a body.
const UNNAMED_COMPUTED: &[(Keyword, SyntaxKind)] = &[
    (Keyword::Document, SyntaxKind::CompDocConstructor),
    (Keyword::Text, SyntaxKind::CompTextConstructor),
    (Keyword::Comment, SyntaxKind::CompCommentConstructor),
];

impl Parser<'_> {
    pub(crate) fn direct_constructor(&mut self) -> Parsed {
        match self.current() {
            SyntaxKind::DirElemOpen => self.nested(|p| p.dir_elem_constructor()),
            SyntaxKind::DirCommentStart => self.delimited(
                SyntaxKind::DirCommentContents,
                SyntaxKind::DirCommentEnd,
                SyntaxKind::DirCommentConstructor,
            ),
            SyntaxKind::CDataStart => self.delimited(
                SyntaxKind::CDataContents,
                SyntaxKind::CDataEnd,
                SyntaxKind::CDataSection,
            ),
            SyntaxKind::DirPiStart => self.dir_pi_constructor(),
            _ => Parsed::NotMatched,
        }
    }

    /// Opening token, optional contents, closing token.
    fn delimited(&mut self, contents: SyntaxKind, end: SyntaxKind, kind: SyntaxKind) -> Parsed {
        let m = self.mark();
        self.bump();
        while self.at(contents) {
            self.bump();
        }
        self.expect(end);
        m.complete(self, kind)
    }

    fn dir_pi_constructor(&mut self) -> Parsed {
        let m = self.mark();
        self.bump();
        self.expect_ncname();
        if self.at(SyntaxKind::DirPiContents) {
            self.bump();
        }
        self.expect(SyntaxKind::DirPiEnd);
        m.complete(self, SyntaxKind::DirPIConstructor)
    }

    /// Tag name tokens (`name` or `prefix:name`) and their range.
    fn tag_name(&mut self) -> Option<(TextRange, String)> {
        if !self.at(SyntaxKind::NCName) {
            self.error(DiagnosticKind::ExpectedName);
            return None;
        }
        let start = self.current_span().start();
        self.bump();
        if self.at(SyntaxKind::Colon) && self.nth_at(1, SyntaxKind::NCName) {
            self.bump();
            self.bump();
        }
        let range = TextRange::new(start, self.last_end);
        Some((range, self.source[range].to_owned()))
    }

    fn dir_elem_constructor(&mut self) -> Parsed {
        let m = self.mark();
        self.bump();
        let start_name = self.tag_name();

        loop {
            match self.current() {
                SyntaxKind::NCName => self.dir_attribute(),
                SyntaxKind::BadCharacter => self.malformed_tag_token(),
                SyntaxKind::Equal | SyntaxKind::Colon => {
                    self.error_and_bump(DiagnosticKind::UnexpectedToken, None);
                }
                SyntaxKind::DirAttrValueStart => {
                    self.error_msg(DiagnosticKind::ExpectedName, "attribute name");
                    let e = self.mark();
                    self.dir_attribute_value();
                    e.done(self, SyntaxKind::Error);
                }
                _ => break,
            }
        }

        match self.current() {
            SyntaxKind::DirSelfClose | SyntaxKind::UnexpectedEndOfBlock => self.bump(),
            SyntaxKind::DirTagClose => {
                self.bump();
                self.dir_elem_content();
                self.end_tag(start_name);
            }
            _ => self.error_msg(DiagnosticKind::ExpectedToken, "`>` or `/>`"),
        }
        m.complete(self, SyntaxKind::DirElemConstructor)
    }

    fn malformed_tag_token(&mut self) {
        let e = self.mark();
        self.bump();
        e.done(self, SyntaxKind::Error);
    }

    fn dir_attribute(&mut self) {
        let m = self.mark();
        let _ = self.tag_name();
        if self.expect(SyntaxKind::Equal) {
            if self.at(SyntaxKind::DirAttrValueStart) {
                self.dir_attribute_value();
            } else {
                self.error_msg(DiagnosticKind::ExpectedToken, "attribute value");
            }
        }
        m.done(self, SyntaxKind::DirAttribute);
    }

    fn dir_attribute_value(&mut self) {
        let v = self.mark();
        self.bump();
        loop {
            if self.at_set(CHAR_DATA) {
                self.bump();
            } else if self.at(SyntaxKind::BraceOpen) {
                let _ = self.enclosed_expr();
            } else {
                break;
            }
        }
        self.expect(SyntaxKind::DirAttrValueEnd);
        v.done(self, SyntaxKind::DirAttributeValue);
    }

    fn dir_elem_content(&mut self) {
        loop {
            match self.current() {
                kind if CHAR_DATA.contains(kind) => self.bump(),
                SyntaxKind::BraceOpen => {
                    let _ = self.enclosed_expr();
                }
                SyntaxKind::DirElemOpen
                | SyntaxKind::DirCommentStart
                | SyntaxKind::CDataStart
                | SyntaxKind::DirPiStart => {
                    let _ = self.direct_constructor();
                }
                _ => break,
            }
        }
    }

    /// `</name>`, checked against the start tag's name.
    fn end_tag(&mut self, start_name: Option<(TextRange, String)>) {
        if self.at(SyntaxKind::UnexpectedEndOfBlock) {
            self.bump();
            return;
        }
        if !self.at(SyntaxKind::DirEndTagOpen) {
            self.error_msg(DiagnosticKind::ExpectedToken, SyntaxKind::DirEndTagOpen.name());
            return;
        }
        self.bump();
        let end_name = self.tag_name();
        if let (Some((start_range, start)), Some((end_range, end))) = (&start_name, &end_name)
            && start != end
            && let Some(d) = self.report(DiagnosticKind::MismatchedEndTag, *end_range)
        {
            d.message(start.as_str())
                .related_to("start tag", *start_range)
                .emit();
        }
        self.expect(SyntaxKind::DirEndTagClose);
    }

    /// `element name { }`, `text { }` and friends. Declines unless the keyword is followed
    /// by the shape of a constructor, so `element` stays an ordinary name otherwise.
    pub(crate) fn computed_constructor(&mut self) -> Parsed {
        if self.name_len_at(0) != Some(1) {
            return Parsed::NotMatched;
        }
        if let Some(&(kw, kind)) = UNNAMED_COMPUTED.iter().find(|(kw, _)| self.at_kw(*kw))
            && self.nth_at(1, SyntaxKind::BraceOpen)
        {
            let m = self.mark();
            self.bump_kw(kw);
            let _ = self.enclosed_expr();
            return m.complete(self, kind);
        }
        let Some(&(kw, kind)) = NAMED_COMPUTED.iter().find(|(kw, _)| self.at_kw(*kw)) else {
            return Parsed::NotMatched;
        };
        let named = self
            .name_len_at(1)
            .is_some_and(|len| self.nth_at(1 + len, SyntaxKind::BraceOpen));
        if !named && !self.nth_at(1, SyntaxKind::BraceOpen) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(kw);
        if named {
            let _ = self.eq_name();
        } else {
            let _ = self.enclosed_expr();
        }
        let _ = self.enclosed_expr_or_error();
        m.complete(self, kind)
    }
}
