//! FLWOR expressions.
//!
//! Clause keywords are ordinary names, so each clause is recognised by what follows its
//! keyword (`for $`, `group by`, `count $`). A keyword without that continuation is left
//! to the enclosing production.

use crate::config::Dialect;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::syntax::{Keyword, SyntaxKind};

/// Keywords that open the next clause or the `return`.
const CLAUSE_KEYWORDS: &[Keyword] = &[
    Keyword::For,
    Keyword::Let,
    Keyword::Where,
    Keyword::Group,
    Keyword::Order,
    Keyword::Stable,
    Keyword::Count,
    Keyword::Return,
];

impl Parser<'_> {
    pub(crate) fn at_flwor_start(&self) -> bool {
        self.at_for_clause() || self.at_let_clause()
    }

    fn at_for_clause(&self) -> bool {
        self.at_kw(Keyword::For)
            && (self.nth_at(1, SyntaxKind::Dollar) || self.at_window_keywords())
    }

    fn at_window_keywords(&self) -> bool {
        (self.nth_at_kw(1, Keyword::Tumbling) || self.nth_at_kw(1, Keyword::Sliding))
            && self.nth_at_kw(2, Keyword::Window)
    }

    fn at_let_clause(&self) -> bool {
        self.at_kw(Keyword::Let)
            && (self.nth_at(1, SyntaxKind::Dollar) || self.at_score_var(1))
    }

    /// Full text `score $s` at lookahead `n`.
    fn at_score_var(&self, n: usize) -> bool {
        self.dialect.contains(Dialect::FULL_TEXT)
            && self.nth_at_kw(n, Keyword::Score)
            && self.nth_at(n + 1, SyntaxKind::Dollar)
    }

    pub(crate) fn flwor_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.with_continuation(CLAUSE_KEYWORDS, |p| {
            p.initial_clause();
            while p.intermediate_clause() {}
        });

        if self.at_kw(Keyword::Return) {
            let r = self.mark();
            self.bump_kw(Keyword::Return);
            let _ = self.expr_single_or_error();
            r.done(self, SyntaxKind::ReturnClause);
        } else {
            self.error_msg(DiagnosticKind::ExpectedToken, Keyword::Return.to_string());
        }
        m.complete(self, SyntaxKind::FLWORExpr)
    }

    fn initial_clause(&mut self) -> bool {
        if self.at_kw(Keyword::For) && self.at_window_keywords() {
            self.window_clause();
        } else if self.at_for_clause() {
            self.for_clause();
        } else if self.at_let_clause() {
            self.let_clause();
        } else {
            return false;
        }
        true
    }

    fn intermediate_clause(&mut self) -> bool {
        if self.initial_clause() {
            return true;
        }
        if self.at_kw(Keyword::Where) {
            let m = self.mark();
            self.bump_kw(Keyword::Where);
            let _ = self.expr_single_or_error();
            m.done(self, SyntaxKind::WhereClause);
        } else if self.at_kw(Keyword::Group) && self.nth_at_kw(1, Keyword::By) {
            self.group_by_clause();
        } else if self.at_kw(Keyword::Order) && self.nth_at_kw(1, Keyword::By)
            || self.at_kw(Keyword::Stable) && self.nth_at_kw(1, Keyword::Order)
        {
            self.order_by_clause();
        } else if self.at_kw(Keyword::Count) && self.nth_at(1, SyntaxKind::Dollar) {
            let m = self.mark();
            self.bump_kw(Keyword::Count);
            let _ = self.var_name();
            m.done(self, SyntaxKind::CountClause);
        } else {
            return false;
        }
        true
    }

    fn for_clause(&mut self) {
        let m = self.mark();
        self.bump_kw(Keyword::For);
        self.for_binding();
        while self.eat(SyntaxKind::Comma) {
            self.for_binding();
        }
        m.done(self, SyntaxKind::ForClause);
    }

    /// `$x as T allowing empty at $i score $s in E`
    fn for_binding(&mut self) {
        let m = self.mark();
        let _ = self.var_name();
        let _ = self.type_declaration();
        if self.at_kw(Keyword::Allowing) {
            let a = self.mark();
            self.bump_kw(Keyword::Allowing);
            self.expect_kw(Keyword::Empty);
            a.done(self, SyntaxKind::AllowingEmpty);
        }
        if self.at_kw(Keyword::At) && self.nth_at(1, SyntaxKind::Dollar) {
            let p = self.mark();
            self.bump_kw(Keyword::At);
            let _ = self.var_name();
            p.done(self, SyntaxKind::PositionalVar);
        }
        if self.at_score_var(0) {
            self.score_var();
        }
        if self.expect_kw(Keyword::In) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, SyntaxKind::ForBinding);
    }

    fn score_var(&mut self) {
        let m = self.mark();
        self.bump_kw(Keyword::Score);
        let _ = self.var_name();
        m.done(self, SyntaxKind::FTScoreVar);
    }

    fn let_clause(&mut self) {
        let m = self.mark();
        self.bump_kw(Keyword::Let);
        self.let_binding();
        while self.eat(SyntaxKind::Comma) {
            self.let_binding();
        }
        m.done(self, SyntaxKind::LetClause);
    }

    fn let_binding(&mut self) {
        let m = self.mark();
        if self.at_score_var(0) {
            self.score_var();
        } else {
            let _ = self.var_name();
            let _ = self.type_declaration();
        }
        if self.expect(SyntaxKind::Assign) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, SyntaxKind::LetBinding);
    }

    /// `for tumbling|sliding window $w in E start ... when E (only)? end ... when E`
    fn window_clause(&mut self) {
        let m = self.mark();
        self.bump_kw(Keyword::For);
        if !self.eat_kw(Keyword::Tumbling) {
            self.bump_kw(Keyword::Sliding);
        }
        self.bump_kw(Keyword::Window);
        let _ = self.var_name();
        let _ = self.type_declaration();
        if self.expect_kw(Keyword::In) {
            let _ = self.expr_single_or_error();
        }

        if self.at_kw(Keyword::Start) {
            let s = self.mark();
            self.bump_kw(Keyword::Start);
            self.window_condition_tail();
            s.done(self, SyntaxKind::WindowStartCondition);
        } else {
            self.error_msg(DiagnosticKind::ExpectedToken, Keyword::Start.to_string());
        }

        let only_end = self.at_kw(Keyword::Only) && self.nth_at_kw(1, Keyword::End);
        if only_end || self.at_kw(Keyword::End) {
            let e = self.mark();
            self.eat_kw(Keyword::Only);
            self.bump_kw(Keyword::End);
            self.window_condition_tail();
            e.done(self, SyntaxKind::WindowEndCondition);
        }
        m.done(self, SyntaxKind::WindowClause);
    }

    fn window_condition_tail(&mut self) {
        self.window_vars();
        if self.expect_kw(Keyword::When) {
            let _ = self.expr_single_or_error();
        }
    }

    /// `$cur at $pos previous $prev next $next`, every part optional.
    fn window_vars(&mut self) {
        let m = self.mark();
        let mut any = false;
        if self.at(SyntaxKind::Dollar) {
            let _ = self.var_name();
            any = true;
        }
        for kw in [Keyword::At, Keyword::Previous, Keyword::Next] {
            if self.at_kw(kw) && self.nth_at(1, SyntaxKind::Dollar) {
                self.bump_kw(kw);
                let _ = self.var_name();
                any = true;
            }
        }
        if any {
            m.done(self, SyntaxKind::WindowVars);
        } else {
            m.drop(self);
        }
    }

    fn group_by_clause(&mut self) {
        let m = self.mark();
        self.bump_kw(Keyword::Group);
        self.bump_kw(Keyword::By);
        self.grouping_spec();
        while self.eat(SyntaxKind::Comma) {
            self.grouping_spec();
        }
        m.done(self, SyntaxKind::GroupByClause);
    }

    /// `$key` or `$key as T := E`, with an optional collation.
    fn grouping_spec(&mut self) {
        let m = self.mark();
        let _ = self.var_name();
        let typed = self.type_declaration().is_matched();
        if self.eat(SyntaxKind::Assign) {
            let _ = self.expr_single_or_error();
        } else if typed {
            self.error_msg(DiagnosticKind::ExpectedToken, SyntaxKind::Assign.name());
        }
        if self.eat_kw(Keyword::Collation) {
            let _ = self.uri_literal();
        }
        m.done(self, SyntaxKind::GroupingSpec);
    }

    fn order_by_clause(&mut self) {
        let m = self.mark();
        self.eat_kw(Keyword::Stable);
        self.bump_kw(Keyword::Order);
        self.expect_kw(Keyword::By);
        self.order_spec();
        while self.eat(SyntaxKind::Comma) {
            self.order_spec();
        }
        m.done(self, SyntaxKind::OrderByClause);
    }

    fn order_spec(&mut self) {
        let m = self.mark();
        let _ = self.expr_single_or_error();
        self.order_modifier();
        m.done(self, SyntaxKind::OrderSpec);
    }

    fn order_modifier(&mut self) {
        let m = self.mark();
        let mut any = self.eat_kw(Keyword::Ascending) || self.eat_kw(Keyword::Descending);
        if self.at_kw(Keyword::Empty)
            && (self.nth_at_kw(1, Keyword::Greatest) || self.nth_at_kw(1, Keyword::Least))
        {
            self.bump_kw(Keyword::Empty);
            if !self.eat_kw(Keyword::Greatest) {
                self.bump_kw(Keyword::Least);
            }
            any = true;
        }
        if self.eat_kw(Keyword::Collation) {
            let _ = self.uri_literal();
            any = true;
        }
        if any {
            m.done(self, SyntaxKind::OrderModifier);
        } else {
            m.drop(self);
        }
    }
}
