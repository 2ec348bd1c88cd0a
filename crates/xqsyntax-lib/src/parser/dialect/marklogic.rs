//! MarkLogic 1.0-ml.
//!
//! JSON node constructors and tests, `binary` nodes, and the legacy `catch ($e)` clause.
//! The node-test names are reserved as function names while this dialect is on (see
//! `at_reserved_function_name`), so `object-node()` is always a kind test, never a call.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::parser::hooks::{HookTable, extend_after, extend_before};
use crate::syntax::{Keyword, SyntaxKind};

/// Constructors whose body is an optional enclosed expression.
const ENCLOSED_CONSTRUCTORS: &[(Keyword, SyntaxKind)] = &[
    (Keyword::Binary, SyntaxKind::BinaryConstructor),
    (Keyword::ArrayNode, SyntaxKind::ArrayNodeConstructor),
    (Keyword::NumberNode, SyntaxKind::NumberNodeConstructor),
    (Keyword::BooleanNode, SyntaxKind::BooleanNodeConstructor),
    (Keyword::NullNode, SyntaxKind::NullNodeConstructor),
];

const NODE_TESTS: &[(Keyword, SyntaxKind)] = &[
    (Keyword::Binary, SyntaxKind::BinaryTest),
    (Keyword::ObjectNode, SyntaxKind::ObjectNodeTest),
    (Keyword::ArrayNode, SyntaxKind::ArrayNodeTest),
    (Keyword::NumberNode, SyntaxKind::NumberNodeTest),
    (Keyword::BooleanNode, SyntaxKind::BooleanNodeTest),
    (Keyword::NullNode, SyntaxKind::NullNodeTest),
];

pub(crate) fn install(table: &mut HookTable) {
    extend_before(&mut table.catch_clause, |p| p.ml_catch_clause());
    extend_after(&mut table.primary_expr, |p| p.ml_constructor());
    extend_before(&mut table.kind_test, |p| p.ml_node_test());
}

impl Parser<'_> {
    /// `catch ($e) { }`. Only one such clause is allowed per `try`; later ones are kept
    /// and diagnosed against the first.
    fn ml_catch_clause(&mut self) -> Parsed {
        if !(self.at_kw(Keyword::Catch) && self.nth_at(1, SyntaxKind::ParenOpen)) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Catch);
        self.bump();
        let _ = self.var_name();
        self.expect_closing(SyntaxKind::ParenClose);
        let _ = self.enclosed_expr_or_error();
        let done = m.done(self, SyntaxKind::CatchClause);

        let first = self.try_scope.first_vendor_catch;
        match first {
            None => self.try_scope.first_vendor_catch = Some(done.range()),
            Some(first) => {
                if let Some(d) = self.report(DiagnosticKind::MultipleVendorCatchClauses, done.range())
                {
                    d.related_to("first vendor catch clause", first).emit();
                }
            }
        }
        done.parsed(self)
    }

    fn ml_constructor(&mut self) -> Parsed {
        if !self.nth_at(1, SyntaxKind::BraceOpen) || self.name_len_at(0) != Some(1) {
            return Parsed::NotMatched;
        }
        if self.at_kw(Keyword::ObjectNode) {
            return self.object_node_constructor();
        }
        let Some(&(kw, kind)) = ENCLOSED_CONSTRUCTORS.iter().find(|(kw, _)| self.at_kw(*kw))
        else {
            return Parsed::NotMatched;
        };
        let m = self.mark();
        self.bump_kw(kw);
        let _ = self.enclosed_expr();
        m.complete(self, kind)
    }

    /// `object-node { key : value, ... }`
    fn object_node_constructor(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::ObjectNode);
        self.bump();
        if !self.at(SyntaxKind::BraceClose) {
            self.object_node_entry();
            while self.eat(SyntaxKind::Comma) {
                self.object_node_entry();
            }
        }
        self.expect_closing(SyntaxKind::BraceClose);
        m.complete(self, SyntaxKind::ObjectNodeConstructor)
    }

    fn object_node_entry(&mut self) {
        let m = self.mark();
        let _ = self.expr_single_or_error();
        if self.expect(SyntaxKind::Colon) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, SyntaxKind::ObjectNodeEntry);
    }

    /// `object-node()`, `array-node("name")`, `number-node(name)` and friends.
    fn ml_node_test(&mut self) -> Parsed {
        if !self.nth_at(1, SyntaxKind::ParenOpen) || self.name_len_at(0) != Some(1) {
            return Parsed::NotMatched;
        }
        let Some(&(kw, kind)) = NODE_TESTS.iter().find(|(kw, _)| self.at_kw(*kw)) else {
            return Parsed::NotMatched;
        };
        let m = self.mark();
        self.bump_kw(kw);
        self.bump();
        match self.current() {
            SyntaxKind::StringLiteralStart => {
                let _ = self.string_literal();
            }
            SyntaxKind::NCName => self.bump(),
            _ => {}
        }
        self.expect(SyntaxKind::ParenClose);
        m.complete(self, kind)
    }
}
