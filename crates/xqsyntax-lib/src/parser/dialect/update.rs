//! XQuery Update Facility 3.0.
//!
//! Updating expressions are keyword-led `ExprSingle` alternatives. Each one commits only
//! on its two-word prefix (`insert node`, `replace value of node`), which no XQuery 3.1
//! expression can start with, so they are tried before the base grammar.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::parser::hooks::{Hook, HookTable, extend_after, extend_before, wrap};
use crate::syntax::{Keyword, SyntaxKind};

pub(crate) fn install(table: &mut HookTable) {
    extend_before(&mut table.expr_single, |p| p.updating_expr());
    wrap(&mut table.value_expr, |p, operand| p.transform_with_expr(operand));
    extend_after(&mut table.primary_expr, |p| p.dynamic_updating_call());
    extend_after(&mut table.prolog_decl, |p| p.revalidation_decl());
}

impl Parser<'_> {
    fn at_node_or_nodes(&self, n: usize) -> bool {
        self.nth_at_kw(n, Keyword::Node) || self.nth_at_kw(n, Keyword::Nodes)
    }

    fn updating_expr(&mut self) -> Parsed {
        if self.at_kw(Keyword::Insert) && self.at_node_or_nodes(1) {
            return self.insert_expr();
        }
        if self.at_kw(Keyword::Delete) && self.at_node_or_nodes(1) {
            return self.delete_expr();
        }
        if self.at_kw(Keyword::Replace)
            && (self.nth_at_kw(1, Keyword::Node)
                || self.nth_at_kw(1, Keyword::Value) && self.nth_at_kw(2, Keyword::Of))
        {
            return self.replace_expr();
        }
        if self.at_kw(Keyword::Rename) && self.nth_at_kw(1, Keyword::Node) {
            return self.rename_expr();
        }
        if self.at_kw(Keyword::Copy) && self.nth_at(1, SyntaxKind::Dollar) {
            return self.copy_modify_expr();
        }
        Parsed::NotMatched
    }

    fn bump_node_or_nodes(&mut self) {
        if !self.eat_kw(Keyword::Nodes) {
            self.bump_kw(Keyword::Node);
        }
    }

    /// `insert node E (as first|last)? into E`, or `after E` / `before E`. The
    /// `InsertTarget` node spans the location keywords and the target expression.
    fn insert_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Insert);
        self.bump_node_or_nodes();
        let _ = self.expr_single_or_error();

        let target = self.mark();
        let located = if self.at_kw(Keyword::As) {
            self.bump_kw(Keyword::As);
            if !self.eat_kw(Keyword::First) && !self.eat_kw(Keyword::Last) {
                self.error_msg(DiagnosticKind::ExpectedToken, "`first` or `last`");
            }
            self.expect_kw(Keyword::Into)
        } else {
            self.eat_kw(Keyword::Into) || self.eat_kw(Keyword::After) || self.eat_kw(Keyword::Before)
        };
        if located {
            let _ = self.expr_single_or_error();
            target.done(self, SyntaxKind::InsertTarget);
        } else {
            target.drop(self);
            self.error_msg(DiagnosticKind::ExpectedToken, "`into`, `after` or `before`");
        }
        m.complete(self, SyntaxKind::InsertExpr)
    }

    fn delete_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Delete);
        self.bump_node_or_nodes();
        let _ = self.expr_single_or_error();
        m.complete(self, SyntaxKind::DeleteExpr)
    }

    /// `replace (value of)? node E with E`
    fn replace_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Replace);
        if self.eat_kw(Keyword::Value) {
            self.bump_kw(Keyword::Of);
        }
        self.expect_kw(Keyword::Node);
        let _ = self.expr_single_or_error();
        if self.expect_kw(Keyword::With) {
            let _ = self.expr_single_or_error();
        }
        m.complete(self, SyntaxKind::ReplaceExpr)
    }

    fn rename_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Rename);
        self.bump_kw(Keyword::Node);
        let _ = self.expr_single_or_error();
        if self.expect_kw(Keyword::As) {
            let _ = self.expr_single_or_error();
        }
        m.complete(self, SyntaxKind::RenameExpr)
    }

    /// `copy $a := E, ... modify E return E`
    fn copy_modify_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Copy);
        self.copy_binding();
        while self.eat(SyntaxKind::Comma) {
            self.copy_binding();
        }
        if self.expect_kw(Keyword::Modify) {
            let _ = self.expr_single_or_error();
        }
        if self.expect_kw(Keyword::Return) {
            let _ = self.expr_single_or_error();
        }
        m.complete(self, SyntaxKind::CopyModifyExpr)
    }

    fn copy_binding(&mut self) {
        let m = self.mark();
        let _ = self.var_name();
        if self.expect(SyntaxKind::Assign) {
            let _ = self.expr_single_or_error();
        }
        m.done(self, SyntaxKind::CopyBinding);
    }

    /// `E transform with { Expr? }`
    fn transform_with_expr(&mut self, operand: &Hook) -> Parsed {
        let m = self.mark();
        let lhs = operand(self);
        if !lhs.is_matched() {
            return m.rollback_declined(self);
        }
        if !(self.at_kw(Keyword::Transform)
            && self.nth_at_kw(1, Keyword::With)
            && self.nth_at(2, SyntaxKind::BraceOpen))
        {
            m.drop(self);
            return lhs;
        }
        self.bump_kw(Keyword::Transform);
        self.bump_kw(Keyword::With);
        let _ = self.enclosed_expr();
        m.complete(self, SyntaxKind::TransformWithExpr)
    }

    /// `invoke updating $f(args)`
    fn dynamic_updating_call(&mut self) -> Parsed {
        if !(self.at_kw(Keyword::Invoke) && self.nth_at_kw(1, Keyword::Updating)) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Invoke);
        self.bump_kw(Keyword::Updating);
        if !self.primary_expr().is_matched() {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        if self.at(SyntaxKind::ParenOpen) {
            self.argument_list();
        } else {
            self.error_msg(DiagnosticKind::ExpectedToken, SyntaxKind::ParenOpen.name());
        }
        m.complete(self, SyntaxKind::DynamicUpdatingFunctionCall)
    }

    /// `declare revalidation strict|lax|skip`
    fn revalidation_decl(&mut self) -> Parsed {
        if !(self.at_kw(Keyword::Declare) && self.nth_at_kw(1, Keyword::Revalidation)) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::Revalidation);
        self.one_of(&[Keyword::Strict, Keyword::Lax, Keyword::Skip]);
        m.complete(self, SyntaxKind::RevalidationDecl)
    }
}
