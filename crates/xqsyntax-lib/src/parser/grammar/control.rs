//! Keyword-led control expressions: quantified, switch, typeswitch, if and try/catch.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::syntax::{Keyword, SyntaxKind};

const IF_CONDITION: &[Keyword] = &[Keyword::Then, Keyword::Else];
const IF_THEN: &[Keyword] = &[Keyword::Else];
const QUANTIFIED_BINDINGS: &[Keyword] = &[Keyword::Satisfies];
const SWITCH_CLAUSES: &[Keyword] = &[Keyword::Case, Keyword::Default, Keyword::Return];

impl Parser<'_> {
    /// `some|every $x in E, ... satisfies E`
    pub(crate) fn quantified_expr(&mut self) -> Parsed {
        let m = self.mark();
        let quantifier = if self.at_kw(Keyword::Some) {
            Keyword::Some
        } else {
            Keyword::Every
        };
        self.bump_kw(quantifier);
        self.with_continuation(QUANTIFIED_BINDINGS, |p| {
            p.quantified_binding();
            while p.eat(SyntaxKind::Comma) {
                p.quantified_binding();
            }
        });
        if self.expect_kw(Keyword::Satisfies) {
            let _ = self.expr_single_or_error();
        }
        m.complete(self, SyntaxKind::QuantifiedExpr)
    }

    fn quantified_binding(&mut self) {
        let m = self.mark();
        let _ = self.var_name();
        let _ = self.type_declaration();
        if self.expect_kw(Keyword::In) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, SyntaxKind::QuantifiedBinding);
    }

    /// `( Expr )` operand of `switch`, `typeswitch`, `if` and `while`.
    pub(crate) fn parenthesized_operand(&mut self) {
        if !self.expect(SyntaxKind::ParenOpen) {
            return;
        }
        let _ = self.expr_or_error();
        self.expect_closing(SyntaxKind::ParenClose);
    }

    pub(crate) fn switch_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Switch);
        let cases = self.with_continuation(SWITCH_CLAUSES, |p| {
            p.parenthesized_operand();
            let mut cases = 0;
            while p.at_kw(Keyword::Case) {
                p.switch_case_clause();
                cases += 1;
            }
            cases
        });
        if cases == 0 {
            self.error_msg(DiagnosticKind::ExpectedToken, Keyword::Case.to_string());
        }
        self.default_return(SyntaxKind::SwitchDefaultClause, false);
        m.complete(self, SyntaxKind::SwitchExpr)
    }

    fn switch_case_clause(&mut self) {
        let m = self.mark();
        while self.eat_kw(Keyword::Case) {
            let _ = self.expr_single_or_error();
        }
        if self.expect_kw(Keyword::Return) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, SyntaxKind::SwitchCaseClause);
    }

    /// `default ($var)? return E`, closing a switch or typeswitch.
    fn default_return(&mut self, kind: SyntaxKind, allow_var: bool) {
        if !self.at_kw(Keyword::Default) {
            self.error_msg(DiagnosticKind::ExpectedToken, Keyword::Default.to_string());
            return;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Default);
        if allow_var && self.at(SyntaxKind::Dollar) {
            let _ = self.var_name();
        }
        if self.expect_kw(Keyword::Return) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, kind);
    }

    pub(crate) fn typeswitch_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Typeswitch);
        let cases = self.with_continuation(SWITCH_CLAUSES, |p| {
            p.parenthesized_operand();
            let mut cases = 0;
            while p.at_kw(Keyword::Case) {
                p.typeswitch_case_clause();
                cases += 1;
            }
            cases
        });
        if cases == 0 {
            self.error_msg(DiagnosticKind::ExpectedToken, Keyword::Case.to_string());
        }
        self.default_return(SyntaxKind::DefaultCaseClause, true);
        m.complete(self, SyntaxKind::TypeswitchExpr)
    }

    fn typeswitch_case_clause(&mut self) {
        let m = self.mark();
        self.bump_kw(Keyword::Case);
        if self.at(SyntaxKind::Dollar) {
            let _ = self.var_name();
            self.expect_kw(Keyword::As);
        }
        let _ = self.sequence_type_or_error();
        while self.eat(SyntaxKind::Pipe) {
            let _ = self.sequence_type_or_error();
        }
        if self.expect_kw(Keyword::Return) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, SyntaxKind::CaseClause);
    }

    pub(crate) fn if_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::If);
        self.with_continuation(IF_CONDITION, |p| p.parenthesized_operand());
        if self.expect_kw(Keyword::Then) {
            let _ = self.with_continuation(IF_THEN, |p| p.expr_single_or_error());
        }
        if self.expect_kw(Keyword::Else) {
            let _ = self.expr_single_or_error();
        }
        m.complete(self, SyntaxKind::IfExpr)
    }

    /// `try { } catch err:* { } ...`. Vendor catch clauses are counted per `try`, so the
    /// scope is saved around nested ones.
    pub(crate) fn try_catch_expr(&mut self) -> Parsed {
        let m = self.mark();
        let t = self.mark();
        self.bump_kw(Keyword::Try);
        let _ = self.enclosed_expr();
        t.done(self, SyntaxKind::TryClause);

        let outer = std::mem::take(&mut self.try_scope);
        let mut catches = 0;
        while self.at_kw(Keyword::Catch) {
            if !self.call_hook(|h| &h.catch_clause).is_matched() {
                break;
            }
            catches += 1;
        }
        self.try_scope = outer;

        if catches == 0 {
            self.error_msg(DiagnosticKind::ExpectedToken, Keyword::Catch.to_string());
        }
        m.complete(self, SyntaxKind::TryCatchExpr)
    }

    pub(crate) fn catch_clause(&mut self) -> Parsed {
        if !self.at_kw(Keyword::Catch) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Catch);
        let list = self.mark();
        if !self.name_test().is_matched() {
            self.error(DiagnosticKind::ExpectedName);
        }
        while self.eat(SyntaxKind::Pipe) {
            if !self.name_test().is_matched() {
                self.error(DiagnosticKind::ExpectedName);
            }
        }
        list.done(self, SyntaxKind::CatchErrorList);
        let _ = self.enclosed_expr_or_error();
        m.complete(self, SyntaxKind::CatchClause)
    }
}
