//! Sequence types, item types and kind tests.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::syntax::token_sets::OCCURRENCE;
use crate::syntax::{Keyword, SyntaxKind};

/// Kind tests with an empty or optional argument list, by keyword.
const KIND_TESTS: &[(Keyword, SyntaxKind)] = &[
    (Keyword::DocumentNode, SyntaxKind::DocumentTest),
    (Keyword::Element, SyntaxKind::ElementTest),
    (Keyword::Attribute, SyntaxKind::AttributeTest),
    (Keyword::SchemaElement, SyntaxKind::SchemaElementTest),
    (Keyword::SchemaAttribute, SyntaxKind::SchemaAttributeTest),
    (Keyword::ProcessingInstruction, SyntaxKind::PITest),
    (Keyword::Comment, SyntaxKind::CommentTest),
    (Keyword::Text, SyntaxKind::TextTest),
    (Keyword::NamespaceNode, SyntaxKind::NamespaceNodeTest),
    (Keyword::Node, SyntaxKind::AnyKindTest),
];

impl Parser<'_> {
    /// `as SequenceType`, when present.
    pub(crate) fn type_declaration(&mut self) -> Parsed {
        if !self.at_kw(Keyword::As) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::As);
        let _ = self.sequence_type_or_error();
        m.complete(self, SyntaxKind::TypeDeclaration)
    }

    pub(crate) fn sequence_type_or_error(&mut self) -> Parsed {
        self.required(DiagnosticKind::ExpectedType, |p| p.sequence_type())
    }

    pub(crate) fn sequence_type(&mut self) -> Parsed {
        self.nested(|p| {
            let m = p.mark();
            if p.at_kw(Keyword::EmptySequence) && p.nth_at(1, SyntaxKind::ParenOpen) {
                let e = p.mark();
                p.bump_kw(Keyword::EmptySequence);
                p.bump();
                p.expect(SyntaxKind::ParenClose);
                e.done(p, SyntaxKind::EmptySequenceType);
                return m.complete(p, SyntaxKind::SequenceType);
            }
            if !p.item_type().is_matched() {
                return m.rollback_declined(p);
            }
            if p.at_set(OCCURRENCE) {
                p.bump();
            }
            m.complete(p, SyntaxKind::SequenceType)
        })
    }

    pub(crate) fn item_type(&mut self) -> Parsed {
        self.call_hook(|h| &h.item_type)
    }

    pub(crate) fn item_type_or_error(&mut self) -> Parsed {
        self.required(DiagnosticKind::ExpectedType, |p| p.item_type())
    }

    pub(crate) fn item_type_base(&mut self) -> Parsed {
        if self.at(SyntaxKind::ParenOpen) {
            let m = self.mark();
            self.bump();
            let _ = self.item_type_or_error();
            self.expect(SyntaxKind::ParenClose);
            return m.complete(self, SyntaxKind::ParenthesizedItemType);
        }
        if self.at(SyntaxKind::Percent) {
            return self.function_test();
        }
        let kind_test = self.kind_test();
        if kind_test.is_matched() {
            return kind_test;
        }
        if !self.nth_at(1, SyntaxKind::ParenOpen) || self.name_len_at(0) != Some(1) {
            return self.atomic_type();
        }
        if self.at_kw(Keyword::Item) {
            let m = self.mark();
            self.bump_kw(Keyword::Item);
            self.bump();
            self.expect(SyntaxKind::ParenClose);
            return m.complete(self, SyntaxKind::AnyItemType);
        }
        if self.at_kw(Keyword::Function) {
            return self.function_test();
        }
        if self.at_kw(Keyword::Map) {
            return self.map_test();
        }
        if self.at_kw(Keyword::Array) {
            return self.array_test();
        }
        Parsed::NotMatched
    }

    fn atomic_type(&mut self) -> Parsed {
        if !self.at_eq_name() {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        let _ = self.eq_name();
        m.complete(self, SyntaxKind::AtomicOrUnionType)
    }

    /// `function(*)` or `function(T, ...) as T`, with leading annotations.
    pub(crate) fn function_test(&mut self) -> Parsed {
        let m = self.mark();
        self.annotations();
        if !self.at_kw(Keyword::Function) || !self.nth_at(1, SyntaxKind::ParenOpen) {
            return m.rollback_declined(self);
        }
        self.bump_kw(Keyword::Function);
        self.bump();
        if !self.eat(SyntaxKind::Star) && !self.at(SyntaxKind::ParenClose) {
            let _ = self.sequence_type_or_error();
            while self.eat(SyntaxKind::Comma) {
                let _ = self.sequence_type_or_error();
            }
        }
        let closed = self.expect(SyntaxKind::ParenClose);
        if closed && self.at_kw(Keyword::As) {
            self.bump_kw(Keyword::As);
            let _ = self.sequence_type_or_error();
        }
        m.complete(self, SyntaxKind::FunctionTest)
    }

    fn map_test(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Map);
        self.bump();
        if !self.eat(SyntaxKind::Star) {
            let _ = self.atomic_type_or_error();
            self.expect(SyntaxKind::Comma);
            let _ = self.sequence_type_or_error();
        }
        self.expect(SyntaxKind::ParenClose);
        m.complete(self, SyntaxKind::MapTest)
    }

    fn array_test(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Array);
        self.bump();
        if !self.eat(SyntaxKind::Star) {
            let _ = self.sequence_type_or_error();
        }
        self.expect(SyntaxKind::ParenClose);
        m.complete(self, SyntaxKind::ArrayTest)
    }

    fn atomic_type_or_error(&mut self) -> Parsed {
        self.required(DiagnosticKind::ExpectedType, |p| p.atomic_type())
    }

    /// `cast as` / `castable as` target: a type name with an optional `?`.
    pub(crate) fn single_type(&mut self) -> Parsed {
        let m = self.mark();
        if !self.atomic_type().is_matched() {
            self.error(DiagnosticKind::ExpectedType);
            return m.complete(self, SyntaxKind::SingleType);
        }
        self.eat(SyntaxKind::Question);
        m.complete(self, SyntaxKind::SingleType)
    }

    pub(crate) fn kind_test(&mut self) -> Parsed {
        self.call_hook(|h| &h.kind_test)
    }

    pub(crate) fn kind_test_base(&mut self) -> Parsed {
        if !self.nth_at(1, SyntaxKind::ParenOpen) || self.name_len_at(0) != Some(1) {
            return Parsed::NotMatched;
        }
        let Some(&(kw, kind)) = KIND_TESTS.iter().find(|(kw, _)| self.at_kw(*kw)) else {
            return Parsed::NotMatched;
        };
        let m = self.mark();
        self.bump_kw(kw);
        self.bump();
        match kind {
            SyntaxKind::DocumentTest => {
                if !self.at(SyntaxKind::ParenClose) {
                    let inner = self.kind_test();
                    let is_element_test = matches!(
                        self.last_done,
                        Some(SyntaxKind::ElementTest | SyntaxKind::SchemaElementTest)
                    );
                    if !inner.is_matched() || !is_element_test {
                        self.error_msg(DiagnosticKind::ExpectedType, "element test");
                    }
                }
            }
            SyntaxKind::ElementTest | SyntaxKind::AttributeTest => {
                if !self.at(SyntaxKind::ParenClose) {
                    self.name_or_wildcard();
                    if self.eat(SyntaxKind::Comma) {
                        let _ = self.eq_name_or_error();
                        if kind == SyntaxKind::ElementTest {
                            self.eat(SyntaxKind::Question);
                        }
                    }
                }
            }
            SyntaxKind::SchemaElementTest | SyntaxKind::SchemaAttributeTest => {
                let _ = self.eq_name_or_error();
            }
            SyntaxKind::PITest => {
                if self.at(SyntaxKind::NCName) {
                    self.bump();
                } else if self.at(SyntaxKind::StringLiteralStart) {
                    let _ = self.string_literal();
                }
            }
            _ => {}
        }
        self.expect(SyntaxKind::ParenClose);
        m.complete(self, kind)
    }

    fn name_or_wildcard(&mut self) {
        if self.eat(SyntaxKind::Star) {
            return;
        }
        let _ = self.eq_name_or_error();
    }
}
