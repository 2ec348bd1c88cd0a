//! Primary expressions: literals, variables, calls, function items, maps, arrays and
//! string constructors.

use crate::config::Dialect;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::syntax::{Keyword, MARKLOGIC_NODE_TESTS, SyntaxKind};

impl Parser<'_> {
    /// Ordered choice over the primary expressions. Keyword-led forms are tried before
    /// function calls so `map {` or `element x {` never reads as a call.
    pub(crate) fn primary_expr_base(&mut self) -> Parsed {
        match self.current() {
            SyntaxKind::IntegerLiteral
            | SyntaxKind::DecimalLiteral
            | SyntaxKind::DoubleLiteral
            | SyntaxKind::IncompleteExponent => return self.numeric_literal(),
            SyntaxKind::StringLiteralStart => return self.string_literal(),
            SyntaxKind::Dollar => return self.var_ref(),
            SyntaxKind::ParenOpen => return self.parenthesized_expr(),
            SyntaxKind::Dot => {
                let m = self.mark();
                self.bump();
                return m.complete(self, SyntaxKind::ContextItemExpr);
            }
            SyntaxKind::Question => return self.unary_lookup(),
            SyntaxKind::BracketOpen => return self.square_array_constructor(),
            SyntaxKind::StringConstructorStart => return self.string_constructor(),
            SyntaxKind::Percent => return self.inline_function_expr(),
            SyntaxKind::DirElemOpen
            | SyntaxKind::DirCommentStart
            | SyntaxKind::DirPiStart
            | SyntaxKind::CDataStart => return self.direct_constructor(),
            SyntaxKind::BadCharacter
            | SyntaxKind::PartialEntityRef
            | SyntaxKind::EmptyEntityRef => return self.malformed_primary(),
            SyntaxKind::NCName | SyntaxKind::BracedUriStart => {}
            _ => return Parsed::NotMatched,
        }

        if self.nth_at(1, SyntaxKind::BraceOpen) {
            if self.at_kw(Keyword::Ordered) || self.at_kw(Keyword::Unordered) {
                return self.ordered_expr();
            }
            if self.at_kw(Keyword::Map) {
                return self.map_constructor();
            }
            if self.at_kw(Keyword::Array) {
                return self.curly_array_constructor();
            }
        }
        if self.at_kw(Keyword::Function) && self.nth_at(1, SyntaxKind::ParenOpen) {
            return self.inline_function_expr();
        }
        let computed = self.computed_constructor();
        if computed.is_matched() {
            return computed;
        }

        let Some(len) = self.name_len_at(0) else {
            return Parsed::NotMatched;
        };
        match self.nth(len) {
            SyntaxKind::Hash if self.nth_at(len + 1, SyntaxKind::IntegerLiteral) => {
                self.named_function_ref()
            }
            SyntaxKind::ParenOpen if !self.at_reserved_function_name() => self.function_call(),
            _ => Parsed::NotMatched,
        }
    }

    /// Names that open kind tests or keyword-led expressions instead of calls. MarkLogic
    /// node tests join them when that dialect is on, so `binary()` stays a kind test.
    fn at_reserved_function_name(&self) -> bool {
        if self.name_len_at(0) != Some(1) {
            return false;
        }
        let Some(kw) = Keyword::lookup(self.current_text()) else {
            return false;
        };
        kw.is_reserved_function_name()
            || self.dialect.contains(Dialect::MARKLOGIC) && MARKLOGIC_NODE_TESTS.contains(&kw)
    }

    /// A malformed token in operand position. It already carries a lexical diagnostic.
    fn malformed_primary(&mut self) -> Parsed {
        let m = self.mark();
        self.bump();
        m.done(self, SyntaxKind::Error);
        Parsed::MatchedWithErrors
    }

    pub(crate) fn var_ref(&mut self) -> Parsed {
        self.assert_current(SyntaxKind::Dollar);
        let m = self.mark();
        let _ = self.var_name();
        m.complete(self, SyntaxKind::VarRef)
    }

    pub(crate) fn parenthesized_expr(&mut self) -> Parsed {
        self.assert_current(SyntaxKind::ParenOpen);
        let m = self.mark();
        self.bump();
        let _ = self.expr();
        self.expect_closing(SyntaxKind::ParenClose);
        m.complete(self, SyntaxKind::ParenthesizedExpr)
    }

    /// `{ Expr? }`
    pub(crate) fn enclosed_expr(&mut self) -> Parsed {
        if !self.at(SyntaxKind::BraceOpen) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump();
        let _ = self.expr();
        self.expect_closing(SyntaxKind::BraceClose);
        m.complete(self, SyntaxKind::EnclosedExpr)
    }

    pub(crate) fn enclosed_expr_or_error(&mut self) -> Parsed {
        if self.at(SyntaxKind::BraceOpen) {
            return self.enclosed_expr();
        }
        self.error_msg(DiagnosticKind::ExpectedToken, SyntaxKind::BraceOpen.name());
        Parsed::MatchedWithErrors
    }

    fn unary_lookup(&mut self) -> Parsed {
        let m = self.mark();
        self.bump();
        self.key_specifier();
        m.complete(self, SyntaxKind::UnaryLookup)
    }

    fn ordered_expr(&mut self) -> Parsed {
        let m = self.mark();
        let kind = if self.eat_kw(Keyword::Ordered) {
            SyntaxKind::OrderedExpr
        } else {
            self.bump_kw(Keyword::Unordered);
            SyntaxKind::UnorderedExpr
        };
        let _ = self.enclosed_expr();
        m.complete(self, kind)
    }

    fn function_call(&mut self) -> Parsed {
        let m = self.mark();
        let _ = self.eq_name();
        self.argument_list();
        m.complete(self, SyntaxKind::FunctionCall)
    }

    /// `name#arity`
    fn named_function_ref(&mut self) -> Parsed {
        let m = self.mark();
        let _ = self.eq_name();
        self.bump();
        self.bump();
        m.complete(self, SyntaxKind::NamedFunctionRef)
    }

    /// `%ann function ($a as T) as T { body }`
    pub(crate) fn inline_function_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.annotations();
        if !self.at_kw(Keyword::Function) || !self.nth_at(1, SyntaxKind::ParenOpen) {
            return m.rollback_declined(self);
        }
        self.bump_kw(Keyword::Function);
        self.param_list();
        let _ = self.type_declaration();
        self.function_body();
        m.complete(self, SyntaxKind::InlineFunctionExpr)
    }

    fn map_constructor(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Map);
        self.bump();
        if !self.at(SyntaxKind::BraceClose) {
            self.map_entry();
            while self.eat(SyntaxKind::Comma) {
                self.map_entry();
            }
        }
        self.expect_closing(SyntaxKind::BraceClose);
        m.complete(self, SyntaxKind::MapConstructor)
    }

    fn map_entry(&mut self) {
        let m = self.mark();
        let _ = self.expr_single_or_error();
        if self.expect(SyntaxKind::Colon) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, SyntaxKind::MapConstructorEntry);
    }

    fn square_array_constructor(&mut self) -> Parsed {
        let m = self.mark();
        self.bump();
        if !self.at(SyntaxKind::BracketClose) {
            let _ = self.expr_single_or_error();
            while self.eat(SyntaxKind::Comma) {
                let _ = self.expr_single_or_error();
            }
        }
        self.expect_closing(SyntaxKind::BracketClose);
        m.complete(self, SyntaxKind::SquareArrayConstructor)
    }

    fn curly_array_constructor(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Array);
        let _ = self.enclosed_expr();
        m.complete(self, SyntaxKind::CurlyArrayConstructor)
    }

    /// ``` ``[text `{expr}` text]`` ```
    fn string_constructor(&mut self) -> Parsed {
        let m = self.mark();
        self.bump();
        loop {
            match self.current() {
                SyntaxKind::StringConstructorContents => self.bump(),
                SyntaxKind::StringInterpolationOpen => {
                    let i = self.mark();
                    self.bump();
                    let _ = self.expr();
                    self.expect_closing(SyntaxKind::StringInterpolationClose);
                    i.done(self, SyntaxKind::StringConstructorInterpolation);
                }
                _ => break,
            }
        }
        self.expect(SyntaxKind::StringConstructorEnd);
        m.complete(self, SyntaxKind::StringConstructor)
    }
}
