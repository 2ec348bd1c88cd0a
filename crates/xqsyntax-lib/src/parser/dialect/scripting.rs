//! XQuery Scripting Extension 1.0.
//!
//! Query bodies and function bodies become statement sequences. A statement is either
//! keyword-led (`while`, `exit returning`, `variable $x`, `$x :=`, `{ }`) or an
//! expression closed by `;`. The last expression of a sequence may omit its `;`, which
//! makes it the sequence's value.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::parser::hooks::{HookTable, extend_after, hook};
use crate::syntax::{Keyword, SyntaxKind};

pub(crate) fn install(table: &mut HookTable) {
    table.query_body = hook(|p| p.statements_query_body());
    extend_after(&mut table.primary_expr, |p| p.block_expr());
}

impl Parser<'_> {
    fn statements_query_body(&mut self) -> Parsed {
        let m = self.mark();
        if !self.block_contents() {
            return m.rollback_declined(self);
        }
        m.complete(self, SyntaxKind::QueryBody)
    }

    /// Statements up to a closing brace or end of input. Returns whether anything was
    /// consumed.
    pub(crate) fn block_contents(&mut self) -> bool {
        let start = self.pos;
        while !self.at_block_end() {
            if !self.statement(true).is_matched() {
                break;
            }
        }
        self.pos != start
    }

    fn at_block_end(&self) -> bool {
        self.eof() || self.at(SyntaxKind::BraceClose) || self.at(SyntaxKind::UnexpectedEndOfBlock)
    }

    /// One statement. With `trailing` set, an expression right before the end of the
    /// block may go without `;`.
    fn statement(&mut self, trailing: bool) -> Parsed {
        let keyword_led = self.keyword_statement();
        if keyword_led.is_matched() {
            return keyword_led;
        }
        let m = self.mark();
        let value = self.expr();
        if !value.is_matched() {
            return m.rollback_declined(self);
        }
        if self.eat(SyntaxKind::Semicolon) {
            return m.complete(self, SyntaxKind::ApplyStatement);
        }
        if trailing && self.at_block_end() {
            m.drop(self);
            return value;
        }
        if !self.ended_with_brace() {
            self.error_msg(DiagnosticKind::ExpectedToken, SyntaxKind::Semicolon.name());
        }
        m.complete(self, SyntaxKind::ApplyStatement)
    }

    /// The last consumed token closed a brace, as after an `if` or FLWOR statement whose
    /// branches are blocks.
    fn ended_with_brace(&self) -> bool {
        self.tokens[..self.pos]
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .is_some_and(|t| t.kind == SyntaxKind::BraceClose)
    }

    fn keyword_statement(&mut self) -> Parsed {
        match self.current() {
            SyntaxKind::BraceOpen => return self.block_statement(),
            SyntaxKind::Dollar => return self.assign_statement(),
            SyntaxKind::Percent => return self.var_decl_statement(),
            SyntaxKind::NCName => {}
            _ => return Parsed::NotMatched,
        }
        if self.at_kw(Keyword::Break) && self.nth_at_kw(1, Keyword::Loop) {
            return self.loop_control(Keyword::Break, SyntaxKind::BreakStatement);
        }
        if self.at_kw(Keyword::Continue) && self.nth_at_kw(1, Keyword::Loop) {
            return self.loop_control(Keyword::Continue, SyntaxKind::ContinueStatement);
        }
        if self.at_kw(Keyword::Exit) && self.nth_at_kw(1, Keyword::Returning) {
            return self.exit_statement();
        }
        if self.at_kw(Keyword::While) && self.nth_at(1, SyntaxKind::ParenOpen) {
            return self.while_statement();
        }
        if self.at_kw(Keyword::Variable) && self.nth_at(1, SyntaxKind::Dollar) {
            return self.var_decl_statement();
        }
        Parsed::NotMatched
    }

    fn block_statement(&mut self) -> Parsed {
        self.nested(|p| {
            let m = p.mark();
            p.bump();
            p.block_contents();
            p.expect_closing(SyntaxKind::BraceClose);
            m.complete(p, SyntaxKind::BlockStatement)
        })
    }

    /// `$x := E;`. A variable reference without `:=` is left to the expression statement.
    fn assign_statement(&mut self) -> Parsed {
        let assigns = self
            .name_len_at(1)
            .is_some_and(|len| self.nth_at(1 + len, SyntaxKind::Assign));
        if !assigns {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        let _ = self.var_name();
        self.bump();
        let _ = self.expr_single_or_error();
        self.expect(SyntaxKind::Semicolon);
        m.complete(self, SyntaxKind::AssignStatement)
    }

    /// `%a variable $x as T := E, $y;`
    fn var_decl_statement(&mut self) -> Parsed {
        let m = self.mark();
        self.annotations();
        if !self.at_kw(Keyword::Variable) {
            return m.rollback_declined(self);
        }
        self.bump_kw(Keyword::Variable);
        self.var_decl_binding();
        while self.eat(SyntaxKind::Comma) {
            self.var_decl_binding();
        }
        self.expect(SyntaxKind::Semicolon);
        m.complete(self, SyntaxKind::VarDeclStatement)
    }

    fn var_decl_binding(&mut self) {
        let _ = self.var_name();
        let _ = self.type_declaration();
        if self.eat(SyntaxKind::Assign) {
            let _ = self.expr_single_or_error();
        }
    }

    fn loop_control(&mut self, kw: Keyword, kind: SyntaxKind) -> Parsed {
        let m = self.mark();
        self.bump_kw(kw);
        self.bump_kw(Keyword::Loop);
        self.expect(SyntaxKind::Semicolon);
        m.complete(self, kind)
    }

    fn exit_statement(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Exit);
        self.bump_kw(Keyword::Returning);
        let _ = self.expr_single_or_error();
        self.expect(SyntaxKind::Semicolon);
        m.complete(self, SyntaxKind::ExitStatement)
    }

    fn while_statement(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::While);
        self.parenthesized_operand();
        let body = self.nested(|p| p.statement(false));
        if !body.is_matched() {
            self.error_msg(DiagnosticKind::ExpectedToken, "statement");
        }
        m.complete(self, SyntaxKind::WhileStatement)
    }

    /// `block { statements }`
    fn block_expr(&mut self) -> Parsed {
        if !(self.at_kw(Keyword::Block) && self.nth_at(1, SyntaxKind::BraceOpen)) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Block);
        self.bump();
        self.block_contents();
        self.expect_closing(SyntaxKind::BraceClose);
        m.complete(self, SyntaxKind::BlockExpr)
    }
}
