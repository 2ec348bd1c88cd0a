//! Names, literals and the small lookahead helpers built on them.

use crate::diagnostics::DiagnosticKind;
use crate::lexer::Token;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::syntax::token_sets::NUMERIC_LITERALS;
use crate::syntax::{Keyword, SyntaxKind, TokenSet};

const STRING_BODY: TokenSet = TokenSet::new(&[
    SyntaxKind::StringLiteralContents,
    SyntaxKind::EscapedQuote,
    SyntaxKind::PredefinedEntityRef,
    SyntaxKind::CharRef,
    SyntaxKind::PartialEntityRef,
    SyntaxKind::EmptyEntityRef,
]);

const URI_BODY: TokenSet = TokenSet::new(&[
    SyntaxKind::BracedUriContents,
    SyntaxKind::PredefinedEntityRef,
    SyntaxKind::CharRef,
    SyntaxKind::PartialEntityRef,
    SyntaxKind::EmptyEntityRef,
]);

impl Parser<'_> {
    /// Number of significant tokens an EQName starting at lookahead `n` occupies, or
    /// `None` if there is no name there. Prefixed names must be written without spaces.
    pub(crate) fn name_len_at(&self, n: usize) -> Option<usize> {
        match self.nth(n) {
            SyntaxKind::NCName => {
                let prefixed = self.nth_at(n + 1, SyntaxKind::Colon)
                    && self.nth_at(n + 2, SyntaxKind::NCName)
                    && self.nth_adjacent(n)
                    && self.nth_adjacent(n + 1);
                Some(if prefixed { 3 } else { 1 })
            }
            SyntaxKind::BracedUriStart => {
                let (len, close) = self.braced_uri_at(n)?;
                let local = self.significant_ahead(n + len).next()?;
                (local.kind == SyntaxKind::NCName && local.span.start() == close.span.end())
                    .then_some(len + 1)
            }
            _ => None,
        }
    }

    /// Significant tokens a `Q{...}` literal at lookahead `n` occupies, braces included,
    /// plus its closing brace.
    pub(crate) fn braced_uri_at(&self, n: usize) -> Option<(usize, &Token)> {
        let mut ahead = self.significant_ahead(n);
        if ahead.next()?.kind != SyntaxKind::BracedUriStart {
            return None;
        }
        let mut len = 1;
        for token in ahead {
            if URI_BODY.contains(token.kind) {
                len += 1;
                continue;
            }
            return (token.kind == SyntaxKind::BracedUriEnd).then_some((len + 1, token));
        }
        None
    }

    pub(crate) fn at_eq_name(&self) -> bool {
        self.name_len_at(0).is_some()
    }

    /// Unprefixed name at lookahead `n` spelled as `kw`.
    pub(crate) fn nth_is_plain_kw(&self, n: usize, kw: Keyword) -> bool {
        self.nth_at_kw(n, kw) && self.name_len_at(n) == Some(1)
    }

    /// `QName` or `URIQualifiedName` node.
    pub(crate) fn eq_name(&mut self) -> Parsed {
        match self.name_len_at(0) {
            Some(_) if self.at(SyntaxKind::BracedUriStart) => {
                let m = self.mark();
                self.braced_uri_literal();
                self.bump();
                m.complete(self, SyntaxKind::URIQualifiedName)
            }
            Some(len) => {
                let m = self.mark();
                for _ in 0..len {
                    self.bump();
                }
                m.complete(self, SyntaxKind::QName)
            }
            None => Parsed::NotMatched,
        }
    }

    pub(crate) fn eq_name_or_error(&mut self) -> Parsed {
        self.required(DiagnosticKind::ExpectedName, |p| p.eq_name())
    }

    /// Unprefixed name, kept as a bare token.
    pub(crate) fn expect_ncname(&mut self) -> bool {
        if self.at(SyntaxKind::NCName) {
            self.bump();
            return true;
        }
        self.error(DiagnosticKind::ExpectedName);
        false
    }

    /// `$` followed by an EQName.
    pub(crate) fn var_name(&mut self) -> Parsed {
        if !self.at(SyntaxKind::Dollar) {
            self.error_msg(DiagnosticKind::ExpectedToken, SyntaxKind::Dollar.name());
            return Parsed::MatchedWithErrors;
        }
        self.bump();
        self.eq_name_or_error()
    }

    pub(crate) fn braced_uri_literal(&mut self) {
        self.assert_current(SyntaxKind::BracedUriStart);
        let m = self.mark();
        self.bump();
        while self.at_set(URI_BODY) {
            self.bump();
        }
        self.expect(SyntaxKind::BracedUriEnd);
        m.done(self, SyntaxKind::BracedURILiteral);
    }

    pub(crate) fn string_literal(&mut self) -> Parsed {
        if !self.at(SyntaxKind::StringLiteralStart) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump();
        while self.at_set(STRING_BODY) {
            self.bump();
        }
        self.expect(SyntaxKind::StringLiteralEnd);
        m.complete(self, SyntaxKind::StringLiteral)
    }

    pub(crate) fn string_literal_or_error(&mut self) -> Parsed {
        self.required(DiagnosticKind::ExpectedToken, |p| p.string_literal())
    }

    /// URI literals are plain string literals.
    pub(crate) fn uri_literal(&mut self) -> Parsed {
        if self.at(SyntaxKind::StringLiteralStart) {
            return self.string_literal();
        }
        self.error_msg(DiagnosticKind::ExpectedToken, "URI literal");
        Parsed::MatchedWithErrors
    }

    pub(crate) fn numeric_literal(&mut self) -> Parsed {
        if !self.at_set(NUMERIC_LITERALS) && !self.at(SyntaxKind::IncompleteExponent) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump();
        m.complete(self, SyntaxKind::NumericLiteral)
    }

    /// `at "uri", "uri"` location hints of imports.
    pub(crate) fn location_hints(&mut self) {
        if !self.at_kw(Keyword::At) {
            return;
        }
        let m = self.mark();
        self.bump_kw(Keyword::At);
        let _ = self.uri_literal();
        while self.eat(SyntaxKind::Comma) {
            let _ = self.uri_literal();
        }
        m.done(self, SyntaxKind::LocationHints);
    }
}
