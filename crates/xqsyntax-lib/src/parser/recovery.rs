//! Resynchronisation after unrecoverable local errors.
//!
//! A missing token with an obvious continuation is only reported (see `expect`). When
//! nothing sensible follows, the offending tokens are wrapped in one `Error` node up to a
//! synchronisation point: a token in the caller's set, a closing bracket, a separator, a
//! keyword opening a new declaration, a keyword an enclosing production continues with
//! (`then`, `return`, ...), or end of input.

use super::core::Parser;
use super::outcome::Parsed;
use crate::diagnostics::DiagnosticKind;
use crate::syntax::token_sets::{CLOSERS, DECL_RECOVERY};
use crate::syntax::{Keyword, SyntaxKind, TokenSet};

impl Parser<'_> {
    /// `declare x`, `import schema|module` or `module namespace` ahead.
    pub(super) fn at_decl_start(&self) -> bool {
        self.at_kw(Keyword::Declare)
            && (self.nth_at(1, SyntaxKind::NCName) || self.nth_at(1, SyntaxKind::Percent))
            || self.at_kw(Keyword::Import)
                && (self.nth_at_kw(1, Keyword::Schema) || self.nth_at_kw(1, Keyword::Module))
            || self.at_kw(Keyword::Module) && self.nth_at_kw(1, Keyword::Namespace)
    }

    /// Runs `production` with `keywords` registered as continuations: recovery inside it
    /// stops in front of them and leaves them to the caller.
    pub(super) fn with_continuation<T>(
        &mut self,
        keywords: &'static [Keyword],
        production: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.continuations.push(keywords);
        let result = production(self);
        self.continuations.pop();
        result
    }

    fn at_continuation(&self) -> bool {
        if !self.at(SyntaxKind::NCName) {
            return false;
        }
        let text = self.current_text();
        self.continuations
            .iter()
            .rev()
            .flat_map(|keywords| keywords.iter())
            .any(|kw| kw.as_str() == text)
    }

    fn at_sync_point(&self, stop: TokenSet) -> bool {
        self.eof()
            || self.at_set(stop)
            || self.at_set(CLOSERS)
            || self.at_set(DECL_RECOVERY)
            || self.at(SyntaxKind::UnexpectedEndOfBlock)
            || self.at_decl_start()
            || self.at_continuation()
    }

    /// Wraps tokens up to the next synchronisation point in one `Error` node. Returns
    /// whether anything was consumed.
    pub(super) fn recover_until(&mut self, stop: TokenSet) -> bool {
        if self.at_sync_point(stop) {
            return false;
        }
        let m = self.mark();
        while !self.at_sync_point(stop) {
            self.bump();
        }
        m.done(self, SyntaxKind::Error);
        true
    }

    /// Expects a closing bracket. If it is missing, reports it, skips junk up to the
    /// next synchronisation point and takes the bracket when it turns up there.
    pub(super) fn expect_closing(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        if self.at(SyntaxKind::UnexpectedEndOfBlock) {
            self.bump();
            return false;
        }
        self.error_msg(DiagnosticKind::ExpectedToken, kind.name());
        if self.recover_until(TokenSet::new(&[kind])) {
            self.eat(kind);
        }
        false
    }

    /// Runs `production`, reporting `missing` without consuming anything when it declines.
    pub(super) fn required(
        &mut self,
        missing: DiagnosticKind,
        production: impl FnOnce(&mut Self) -> Parsed,
    ) -> Parsed {
        let result = production(self);
        if result.is_matched() {
            return result;
        }
        self.error(missing);
        Parsed::MatchedWithErrors
    }

    /// An `ExprSingle` the grammar cannot do without.
    pub(super) fn expr_single_or_error(&mut self) -> Parsed {
        self.required(DiagnosticKind::ExpectedExpression, |p| p.expr_single())
    }

    pub(super) fn expr_or_error(&mut self) -> Parsed {
        self.required(DiagnosticKind::ExpectedExpression, |p| p.expr())
    }
}
