//! Operator expressions, from `Expr` down to path steps.
//!
//! Each precedence level is a routine that parses its operand and then, while an operator
//! of its level follows, wraps what it has so far into a new node via `precede`. A level
//! that sees no operator leaves no node of its own, so `1` is a `NumericLiteral`, not a
//! tower of single-child wrappers.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::syntax::token_sets::{GENERAL_COMPARISON, NODE_COMPARISON};
use crate::syntax::{Keyword, SyntaxKind, TokenSet};

pub(crate) type Production<'src> = fn(&mut Parser<'src>) -> Parsed;
pub(crate) type Operator<'src> = fn(&mut Parser<'src>) -> bool;

const VALUE_COMPARISON: &[Keyword] = &[
    Keyword::Eq,
    Keyword::Ne,
    Keyword::Lt,
    Keyword::Le,
    Keyword::Gt,
    Keyword::Ge,
];

const FORWARD_AXES: &[Keyword] = &[
    Keyword::Child,
    Keyword::Descendant,
    Keyword::Attribute,
    Keyword::SelfAxis,
    Keyword::DescendantOrSelf,
    Keyword::FollowingSibling,
    Keyword::Following,
    Keyword::Namespace,
];

const REVERSE_AXES: &[Keyword] = &[
    Keyword::Parent,
    Keyword::Ancestor,
    Keyword::PrecedingSibling,
    Keyword::Preceding,
    Keyword::AncestorOrSelf,
];

const PATH_SEPARATORS: TokenSet = TokenSet::new(&[SyntaxKind::Slash, SyntaxKind::DoubleSlash]);

const LOOKUP_KEYS: TokenSet = TokenSet::new(&[
    SyntaxKind::NCName,
    SyntaxKind::IntegerLiteral,
    SyntaxKind::ParenOpen,
    SyntaxKind::Star,
]);

impl<'src> Parser<'src> {
    /// `ExprSingle ("," ExprSingle)*`, wrapped in `Expr` only when a comma follows.
    pub(crate) fn expr(&mut self) -> Parsed {
        let m = self.mark();
        let first = self.expr_single();
        if !first.is_matched() {
            return m.rollback_declined(self);
        }
        if !self.at(SyntaxKind::Comma) {
            m.drop(self);
            return first;
        }
        while self.eat(SyntaxKind::Comma) {
            let _ = self.expr_single_or_error();
        }
        m.complete(self, SyntaxKind::Expr)
    }

    pub(crate) fn expr_single(&mut self) -> Parsed {
        self.nested(|p| p.call_hook(|h| &h.expr_single))
    }

    pub(crate) fn expr_single_base(&mut self) -> Parsed {
        if self.at_flwor_start() {
            return self.flwor_expr();
        }
        if (self.at_kw(Keyword::Some) || self.at_kw(Keyword::Every))
            && self.nth_at(1, SyntaxKind::Dollar)
        {
            return self.quantified_expr();
        }
        if self.nth_at(1, SyntaxKind::ParenOpen) {
            if self.at_kw(Keyword::Switch) {
                return self.switch_expr();
            }
            if self.at_kw(Keyword::Typeswitch) {
                return self.typeswitch_expr();
            }
            if self.at_kw(Keyword::If) {
                return self.if_expr();
            }
        }
        if self.at_kw(Keyword::Try) && self.nth_at(1, SyntaxKind::BraceOpen) {
            return self.try_catch_expr();
        }
        self.or_expr()
    }

    /// Left-associative chain: `operand (op operand)*`. With `repeat` off the level is
    /// non-associative and takes at most one operator.
    pub(crate) fn binary(
        &mut self,
        kind: SyntaxKind,
        operand: Production<'src>,
        op: Operator<'src>,
        repeat: bool,
    ) -> Parsed {
        let m = self.mark();
        let mut result = operand(self);
        if !result.is_matched() {
            return m.rollback_declined(self);
        }
        let mut m = m;
        while op(self) {
            if !operand(self).is_matched() {
                self.error(DiagnosticKind::ExpectedExpression);
            }
            let done = m.done(self, kind);
            result = done.parsed(self);
            m = done.precede(self);
            if !repeat {
                break;
            }
        }
        m.drop(self);
        result
    }

    /// `operand kw1 kw2 Type`, as in `instance of` or `cast as`.
    fn typed(
        &mut self,
        kind: SyntaxKind,
        operand: Production<'src>,
        keywords: (Keyword, Keyword),
        ty: Production<'src>,
    ) -> Parsed {
        let m = self.mark();
        let lhs = operand(self);
        if !lhs.is_matched() {
            return m.rollback_declined(self);
        }
        let (first, second) = keywords;
        if !(self.at_kw(first) && self.nth_at_kw(1, second)) {
            m.drop(self);
            return lhs;
        }
        self.bump_kw(first);
        self.bump_kw(second);
        let _ = ty(self);
        m.complete(self, kind)
    }

    pub(crate) fn bump_op_kw(&mut self, kw: Keyword) -> bool {
        self.eat_kw(kw)
    }

    fn bump_op_in(&mut self, set: TokenSet) -> bool {
        if self.at_set(set) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn or_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::OrExpr,
            Self::and_expr,
            |p| p.bump_op_kw(Keyword::Or),
            true,
        )
    }

    fn and_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::AndExpr,
            Self::comparison_expr,
            |p| p.bump_op_kw(Keyword::And),
            true,
        )
    }

    fn comparison_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::ComparisonExpr,
            Self::contains_expr,
            Self::comparison_op,
            false,
        )
    }

    fn comparison_op(&mut self) -> bool {
        if self.bump_op_in(GENERAL_COMPARISON.union(NODE_COMPARISON)) {
            return true;
        }
        if self.eat_kw(Keyword::Is) {
            return true;
        }
        match VALUE_COMPARISON.iter().find(|kw| self.at_kw(**kw)) {
            Some(&kw) => {
                self.bump_kw(kw);
                true
            }
            None => false,
        }
    }

    /// Operand of a comparison. Full text adds `contains text` here.
    fn contains_expr(&mut self) -> Parsed {
        self.call_hook(|h| &h.contains_expr)
    }

    pub(crate) fn string_concat_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::StringConcatExpr,
            Self::range_expr,
            |p| p.bump_op_in(TokenSet::new(&[SyntaxKind::Concat])),
            true,
        )
    }

    fn range_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::RangeExpr,
            Self::additive_expr,
            |p| p.bump_op_kw(Keyword::To),
            false,
        )
    }

    pub(crate) fn additive_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::AdditiveExpr,
            Self::multiplicative_expr,
            |p| p.bump_op_in(TokenSet::new(&[SyntaxKind::Plus, SyntaxKind::Minus])),
            true,
        )
    }

    fn multiplicative_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::MultiplicativeExpr,
            Self::union_expr,
            |p| {
                p.bump_op_in(TokenSet::new(&[SyntaxKind::Star]))
                    || p.bump_op_kw(Keyword::Div)
                    || p.bump_op_kw(Keyword::Idiv)
                    || p.bump_op_kw(Keyword::Mod)
            },
            true,
        )
    }

    pub(crate) fn union_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::UnionExpr,
            Self::intersect_except_expr,
            |p| p.bump_op_kw(Keyword::Union) || p.bump_op_in(TokenSet::new(&[SyntaxKind::Pipe])),
            true,
        )
    }

    fn intersect_except_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::IntersectExceptExpr,
            Self::instanceof_expr,
            |p| p.bump_op_kw(Keyword::Intersect) || p.bump_op_kw(Keyword::Except),
            true,
        )
    }

    fn instanceof_expr(&mut self) -> Parsed {
        self.typed(
            SyntaxKind::InstanceofExpr,
            Self::treat_expr,
            (Keyword::Instance, Keyword::Of),
            Self::sequence_type_or_error,
        )
    }

    fn treat_expr(&mut self) -> Parsed {
        self.typed(
            SyntaxKind::TreatExpr,
            Self::castable_expr,
            (Keyword::Treat, Keyword::As),
            Self::sequence_type_or_error,
        )
    }

    fn castable_expr(&mut self) -> Parsed {
        self.typed(
            SyntaxKind::CastableExpr,
            Self::cast_expr,
            (Keyword::Castable, Keyword::As),
            Self::single_type,
        )
    }

    fn cast_expr(&mut self) -> Parsed {
        self.typed(
            SyntaxKind::CastExpr,
            Self::arrow_expr,
            (Keyword::Cast, Keyword::As),
            Self::single_type,
        )
    }

    fn arrow_expr(&mut self) -> Parsed {
        let m = self.mark();
        let mut result = self.unary_expr();
        if !result.is_matched() {
            return m.rollback_declined(self);
        }
        let mut m = m;
        while self.eat(SyntaxKind::Arrow) {
            self.arrow_function_specifier();
            if self.at(SyntaxKind::ParenOpen) {
                self.argument_list();
            } else {
                self.error_msg(DiagnosticKind::ExpectedToken, SyntaxKind::ParenOpen.name());
            }
            let done = m.done(self, SyntaxKind::ArrowExpr);
            result = done.parsed(self);
            m = done.precede(self);
        }
        m.drop(self);
        result
    }

    fn arrow_function_specifier(&mut self) {
        match self.current() {
            SyntaxKind::Dollar => {
                let _ = self.var_ref();
            }
            SyntaxKind::ParenOpen => {
                let _ = self.parenthesized_expr();
            }
            _ => {
                let _ = self.eq_name_or_error();
            }
        }
    }

    fn unary_expr(&mut self) -> Parsed {
        if !self.at(SyntaxKind::Plus) && !self.at(SyntaxKind::Minus) {
            return self.value_expr();
        }
        let m = self.mark();
        while self.at(SyntaxKind::Plus) || self.at(SyntaxKind::Minus) {
            self.bump();
        }
        if !self.value_expr().is_matched() {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        m.complete(self, SyntaxKind::UnaryExpr)
    }

    pub(crate) fn value_expr(&mut self) -> Parsed {
        self.call_hook(|h| &h.value_expr)
    }

    pub(crate) fn value_expr_base(&mut self) -> Parsed {
        if self.at_validate() {
            return self.validate_expr();
        }
        if self.at(SyntaxKind::PragmaStart) {
            return self.extension_expr();
        }
        self.simple_map_expr()
    }

    fn at_validate(&self) -> bool {
        if !self.at_kw(Keyword::Validate) {
            return false;
        }
        self.nth_at(1, SyntaxKind::BraceOpen)
            || (self.nth_at_kw(1, Keyword::Lax) || self.nth_at_kw(1, Keyword::Strict))
                && self.nth_at(2, SyntaxKind::BraceOpen)
            || self.nth_at_kw(1, Keyword::Type) && self.name_len_at(2).is_some()
    }

    fn validate_expr(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Validate);
        if !self.eat_kw(Keyword::Lax) && !self.eat_kw(Keyword::Strict) && self.eat_kw(Keyword::Type)
        {
            let _ = self.eq_name_or_error();
        }
        let _ = self.enclosed_expr_or_error();
        m.complete(self, SyntaxKind::ValidateExpr)
    }

    fn extension_expr(&mut self) -> Parsed {
        let m = self.mark();
        while self.at(SyntaxKind::PragmaStart) {
            self.pragma();
        }
        let _ = self.enclosed_expr_or_error();
        m.complete(self, SyntaxKind::ExtensionExpr)
    }

    /// `(# prefix:name contents #)`
    pub(crate) fn pragma(&mut self) {
        self.assert_current(SyntaxKind::PragmaStart);
        let m = self.mark();
        self.bump();
        let _ = self.eq_name_or_error();
        if self.at(SyntaxKind::PragmaContents) {
            self.bump();
        }
        self.expect(SyntaxKind::PragmaEnd);
        m.done(self, SyntaxKind::Pragma);
    }

    fn simple_map_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::SimpleMapExpr,
            Self::path_expr,
            |p| p.bump_op_in(TokenSet::new(&[SyntaxKind::Bang])),
            true,
        )
    }

    pub(crate) fn path_expr(&mut self) -> Parsed {
        match self.current() {
            SyntaxKind::Slash => {
                let m = self.mark();
                self.bump();
                let _ = self.relative_path_expr();
                m.complete(self, SyntaxKind::PathExpr)
            }
            SyntaxKind::DoubleSlash => {
                let m = self.mark();
                self.bump();
                if !self.relative_path_expr().is_matched() {
                    self.error(DiagnosticKind::ExpectedExpression);
                }
                m.complete(self, SyntaxKind::PathExpr)
            }
            _ => self.relative_path_expr(),
        }
    }

    fn relative_path_expr(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::RelativePathExpr,
            Self::step_expr,
            |p| p.bump_op_in(PATH_SEPARATORS),
            true,
        )
    }

    fn step_expr(&mut self) -> Parsed {
        self.postfix_expr().or_else(|| self.axis_step())
    }

    fn postfix_expr(&mut self) -> Parsed {
        let m = self.mark();
        let primary = self.primary_expr();
        if !primary.is_matched() {
            return m.rollback_declined(self);
        }
        let mut any = false;
        loop {
            match self.current() {
                SyntaxKind::BracketOpen => self.predicate(),
                SyntaxKind::ParenOpen => self.argument_list(),
                SyntaxKind::Question if LOOKUP_KEYS.contains(self.nth(1)) => self.lookup(),
                _ => break,
            }
            any = true;
        }
        if !any {
            m.drop(self);
            return primary;
        }
        m.complete(self, SyntaxKind::PostfixExpr)
    }

    pub(crate) fn primary_expr(&mut self) -> Parsed {
        self.call_hook(|h| &h.primary_expr)
    }

    fn axis_step(&mut self) -> Parsed {
        let m = self.mark();
        if self.eat(SyntaxKind::At) {
            if !self.node_test().is_matched() {
                self.error(DiagnosticKind::ExpectedName);
            }
        } else if self.eat(SyntaxKind::DoubleDot) {
            // `..` is a whole step on its own
        } else if let Some(axis) = self.at_axis() {
            self.bump_kw(axis);
            self.bump();
            if !self.node_test().is_matched() {
                self.error(DiagnosticKind::ExpectedName);
            }
        } else if !self.node_test().is_matched() {
            return m.rollback_declined(self);
        }
        while self.at(SyntaxKind::BracketOpen) {
            self.predicate();
        }
        m.complete(self, SyntaxKind::AxisStep)
    }

    fn at_axis(&self) -> Option<Keyword> {
        if !self.nth_at(1, SyntaxKind::DoubleColon) {
            return None;
        }
        FORWARD_AXES
            .iter()
            .chain(REVERSE_AXES)
            .copied()
            .find(|&kw| self.at_kw(kw))
    }

    fn node_test(&mut self) -> Parsed {
        self.kind_test().or_else(|| self.name_test())
    }

    pub(crate) fn name_test(&mut self) -> Parsed {
        let m = self.mark();
        if self.wildcard().is_matched() || self.eq_name().is_matched() {
            return m.complete(self, SyntaxKind::NameTest);
        }
        m.rollback_declined(self)
    }

    /// `*`, `*:local`, `prefix:*` or `Q{uri}*`.
    fn wildcard(&mut self) -> Parsed {
        let prefix_star = self.at(SyntaxKind::NCName)
            && self.nth_at(1, SyntaxKind::Colon)
            && self.nth_at(2, SyntaxKind::Star)
            && self.nth_adjacent(0)
            && self.nth_adjacent(1);
        let m = self.mark();
        if self.at(SyntaxKind::Star) {
            self.bump();
            if self.at(SyntaxKind::Colon)
                && self.nth_at(1, SyntaxKind::NCName)
                && self.nth_adjacent(0)
                && self.last_end == self.current_span().start()
            {
                self.bump();
                self.bump();
            }
        } else if prefix_star {
            self.bump();
            self.bump();
            self.bump();
        } else if self.at_braced_wildcard() {
            self.braced_uri_literal();
            self.bump();
        } else {
            return m.rollback_declined(self);
        }
        m.complete(self, SyntaxKind::Wildcard)
    }

    fn at_braced_wildcard(&self) -> bool {
        self.braced_uri_at(0)
            .is_some_and(|(len, _)| self.nth_at(len, SyntaxKind::Star))
    }

    pub(crate) fn predicate(&mut self) {
        self.assert_current(SyntaxKind::BracketOpen);
        let m = self.mark();
        self.bump();
        let _ = self.expr_or_error();
        self.expect_closing(SyntaxKind::BracketClose);
        m.done(self, SyntaxKind::Predicate);
    }

    /// `( arg, ... )`, where an argument may be the `?` placeholder.
    pub(crate) fn argument_list(&mut self) {
        self.assert_current(SyntaxKind::ParenOpen);
        let m = self.mark();
        self.bump();
        if !self.at(SyntaxKind::ParenClose) {
            self.argument();
            while self.eat(SyntaxKind::Comma) {
                self.argument();
            }
        }
        self.expect_closing(SyntaxKind::ParenClose);
        m.done(self, SyntaxKind::ArgumentList);
    }

    fn argument(&mut self) {
        let placeholder = self.at(SyntaxKind::Question)
            && matches!(self.nth(1), SyntaxKind::Comma | SyntaxKind::ParenClose);
        if placeholder {
            let m = self.mark();
            self.bump();
            m.done(self, SyntaxKind::ArgumentPlaceholder);
            return;
        }
        let _ = self.expr_single_or_error();
    }

    fn lookup(&mut self) {
        let m = self.mark();
        self.bump();
        self.key_specifier();
        m.done(self, SyntaxKind::Lookup);
    }

    pub(crate) fn key_specifier(&mut self) {
        match self.current() {
            SyntaxKind::NCName | SyntaxKind::IntegerLiteral | SyntaxKind::Star => self.bump(),
            SyntaxKind::ParenOpen => {
                let _ = self.parenthesized_expr();
            }
            _ => self.error(DiagnosticKind::ExpectedName),
        }
    }
}
