//! Saxon syntax extensions: tuple and union item types, type aliases and context-item
//! function shorthands.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::parser::hooks::{HookTable, extend_after, extend_before};
use crate::syntax::{Keyword, SyntaxKind};

pub(crate) fn install(table: &mut HookTable) {
    extend_after(&mut table.item_type, |p| p.saxon_item_type());
    extend_after(&mut table.prolog_decl, |p| p.type_decl());
    extend_before(&mut table.primary_expr, |p| p.context_item_function());
}

impl Parser<'_> {
    fn saxon_item_type(&mut self) -> Parsed {
        if self.at(SyntaxKind::Tilde) {
            let m = self.mark();
            self.bump();
            let _ = self.eq_name_or_error();
            return m.complete(self, SyntaxKind::TypeAlias);
        }
        if !self.nth_at(1, SyntaxKind::ParenOpen) || self.name_len_at(0) != Some(1) {
            return Parsed::NotMatched;
        }
        if self.at_kw(Keyword::Tuple) {
            return self.tuple_type();
        }
        if self.at_kw(Keyword::Union) {
            return self.union_type();
        }
        Parsed::NotMatched
    }

    /// `tuple(name as T, opt? as T, *)`
    fn tuple_type(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Tuple);
        self.bump();
        if !self.at(SyntaxKind::ParenClose) {
            self.tuple_field();
            while self.eat(SyntaxKind::Comma) {
                if self.eat(SyntaxKind::Star) {
                    break;
                }
                self.tuple_field();
            }
        }
        self.expect_closing(SyntaxKind::ParenClose);
        m.complete(self, SyntaxKind::TupleType)
    }

    fn tuple_field(&mut self) {
        let m = self.mark();
        match self.current() {
            SyntaxKind::NCName => self.bump(),
            SyntaxKind::StringLiteralStart => {
                let _ = self.string_literal();
            }
            _ => self.error(DiagnosticKind::ExpectedName),
        }
        self.eat(SyntaxKind::Question);
        let _ = self.type_declaration();
        m.done(self, SyntaxKind::TupleField);
    }

    /// `union(xs:integer, xs:string)`
    fn union_type(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Union);
        self.bump();
        let _ = self.eq_name_or_error();
        while self.eat(SyntaxKind::Comma) {
            let _ = self.eq_name_or_error();
        }
        self.expect_closing(SyntaxKind::ParenClose);
        m.complete(self, SyntaxKind::UnionType)
    }

    /// `declare type name = ItemType`
    fn type_decl(&mut self) -> Parsed {
        if !(self.at_kw(Keyword::Declare) && self.nth_at_kw(1, Keyword::Type)) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::Type);
        let _ = self.eq_name_or_error();
        if self.expect(SyntaxKind::Equal) {
            let _ = self.item_type_or_error();
        }
        m.complete(self, SyntaxKind::TypeDecl)
    }

    /// `.{ E }` or `fn{ E }`, a function of the context item.
    fn context_item_function(&mut self) -> Parsed {
        let dot = self.at(SyntaxKind::Dot) && self.nth_adjacent(0);
        let fn_kw = self.at_kw(Keyword::Fn) && self.name_len_at(0) == Some(1);
        if !(dot || fn_kw) || !self.nth_at(1, SyntaxKind::BraceOpen) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        if dot {
            self.bump();
        } else {
            self.bump_kw(Keyword::Fn);
        }
        let _ = self.enclosed_expr();
        m.complete(self, SyntaxKind::ContextItemFunctionExpr)
    }
}
