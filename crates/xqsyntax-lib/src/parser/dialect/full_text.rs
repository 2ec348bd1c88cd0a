//! XQuery and XPath Full Text 3.0.
//!
//! `contains text` sits between comparisons and `||`, so the extension wraps the
//! comparison operand: whatever the base parsed becomes the left side of an
//! `FTContainsExpr` when `contains text` follows.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::parser::hooks::{Hook, HookTable, extend_after, wrap};
use crate::syntax::{Keyword, SyntaxKind};

pub(crate) fn install(table: &mut HookTable) {
    wrap(&mut table.contains_expr, |p, operand| p.ft_contains_expr(operand));
    extend_after(&mut table.prolog_decl, |p| p.ft_option_decl());
}

/// Match options after `using`.
const MATCH_OPTIONS: &[(Keyword, SyntaxKind)] = &[
    (Keyword::Language, SyntaxKind::FTLanguageOption),
    (Keyword::Wildcards, SyntaxKind::FTWildCardOption),
    (Keyword::Thesaurus, SyntaxKind::FTThesaurusOption),
    (Keyword::Stemming, SyntaxKind::FTStemOption),
    (Keyword::Stop, SyntaxKind::FTStopWordOption),
    (Keyword::Case, SyntaxKind::FTCaseOption),
    (Keyword::Lowercase, SyntaxKind::FTCaseOption),
    (Keyword::Uppercase, SyntaxKind::FTCaseOption),
    (Keyword::Diacritics, SyntaxKind::FTDiacriticsOption),
    (Keyword::Option, SyntaxKind::FTExtensionOption),
];

/// Option kinds spelled with a leading `no`.
const NEGATED_OPTIONS: &[(Keyword, SyntaxKind)] = &[
    (Keyword::Wildcards, SyntaxKind::FTWildCardOption),
    (Keyword::Thesaurus, SyntaxKind::FTThesaurusOption),
    (Keyword::Stemming, SyntaxKind::FTStemOption),
    (Keyword::Stop, SyntaxKind::FTStopWordOption),
];

impl<'src> Parser<'src> {
    fn ft_contains_expr(&mut self, operand: &Hook) -> Parsed {
        let m = self.mark();
        let lhs = operand(self);
        if !lhs.is_matched() {
            return m.rollback_declined(self);
        }
        if !(self.at_kw(Keyword::Contains) && self.nth_at_kw(1, Keyword::Text)) {
            m.drop(self);
            return lhs;
        }
        self.bump_kw(Keyword::Contains);
        self.bump_kw(Keyword::Text);
        self.ft_selection_or_error();
        if self.at_kw(Keyword::Without) && self.nth_at_kw(1, Keyword::Content) {
            let ignore = self.mark();
            self.bump_kw(Keyword::Without);
            self.bump_kw(Keyword::Content);
            if !self.union_expr().is_matched() {
                self.error(DiagnosticKind::ExpectedExpression);
            }
            ignore.done(self, SyntaxKind::FTIgnoreOption);
        }
        m.complete(self, SyntaxKind::FTContainsExpr)
    }

    fn ft_selection_or_error(&mut self) {
        if !self.ft_selection().is_matched() {
            self.error_msg(DiagnosticKind::ExpectedToken, "full-text selection");
        }
    }

    /// `FTOr` followed by positional filters.
    fn ft_selection(&mut self) -> Parsed {
        self.nested(|p| {
            let m = p.mark();
            if !p.ft_or().is_matched() {
                return m.rollback_declined(p);
            }
            while p.ft_pos_filter() {}
            m.complete(p, SyntaxKind::FTSelection)
        })
    }

    fn ft_or(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::FTOr,
            Self::ft_and,
            |p| p.bump_op_kw(Keyword::FtOr),
            true,
        )
    }

    fn ft_and(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::FTAnd,
            Self::ft_mild_not,
            |p| p.bump_op_kw(Keyword::FtAnd),
            true,
        )
    }

    fn ft_mild_not(&mut self) -> Parsed {
        self.binary(
            SyntaxKind::FTMildNot,
            Self::ft_unary_not,
            |p| {
                if p.at_kw(Keyword::Not) && p.nth_at_kw(1, Keyword::In) {
                    p.bump_kw(Keyword::Not);
                    p.bump_kw(Keyword::In);
                    true
                } else {
                    false
                }
            },
            true,
        )
    }

    fn ft_unary_not(&mut self) -> Parsed {
        if !self.at_kw(Keyword::FtNot) {
            return self.ft_primary_with_options();
        }
        let m = self.mark();
        self.bump_kw(Keyword::FtNot);
        if !self.ft_primary_with_options().is_matched() {
            self.error_msg(DiagnosticKind::ExpectedToken, "full-text selection");
        }
        m.complete(self, SyntaxKind::FTUnaryNot)
    }

    fn ft_primary_with_options(&mut self) -> Parsed {
        let m = self.mark();
        let primary = self.ft_primary();
        if !primary.is_matched() {
            return m.rollback_declined(self);
        }
        let options = self.ft_match_options();
        let weight = self.ft_weight();
        if !options && !weight {
            m.drop(self);
            return primary;
        }
        m.complete(self, SyntaxKind::FTPrimaryWithOptions)
    }

    fn ft_primary(&mut self) -> Parsed {
        match self.current() {
            SyntaxKind::StringLiteralStart | SyntaxKind::BraceOpen => {
                self.ft_words();
                if self.at_kw(Keyword::Occurs) {
                    let t = self.mark();
                    self.bump_kw(Keyword::Occurs);
                    self.ft_range(Self::additive_expr);
                    self.expect_kw(Keyword::Times);
                    t.done(self, SyntaxKind::FTTimes);
                }
                Parsed::Matched
            }
            SyntaxKind::ParenOpen => {
                self.bump();
                self.ft_selection_or_error();
                self.expect_closing(SyntaxKind::ParenClose);
                Parsed::Matched
            }
            SyntaxKind::PragmaStart => {
                let m = self.mark();
                while self.at(SyntaxKind::PragmaStart) {
                    self.pragma();
                }
                if self.expect(SyntaxKind::BraceOpen) {
                    if !self.at(SyntaxKind::BraceClose) {
                        let _ = self.ft_selection();
                    }
                    self.expect_closing(SyntaxKind::BraceClose);
                }
                m.complete(self, SyntaxKind::FTExtensionSelection)
            }
            _ => Parsed::NotMatched,
        }
    }

    /// `"words" any word` or `{ expr } phrase`.
    fn ft_words(&mut self) {
        let m = self.mark();
        if self.at(SyntaxKind::BraceOpen) {
            let _ = self.enclosed_expr();
        } else {
            let _ = self.string_literal();
        }
        let anyall = self.mark();
        let option = if self.eat_kw(Keyword::Any) {
            self.eat_kw(Keyword::Word);
            true
        } else if self.eat_kw(Keyword::All) {
            self.eat_kw(Keyword::Words);
            true
        } else {
            self.eat_kw(Keyword::Phrase)
        };
        if option {
            anyall.done(self, SyntaxKind::FTAnyallOption);
        } else {
            anyall.drop(self);
        }
        m.done(self, SyntaxKind::FTWords);
    }

    /// `exactly n`, `at least n`, `at most n` or `from n to m`.
    fn ft_range(&mut self, bound: fn(&mut Parser<'src>) -> Parsed) {
        let m = self.mark();
        if self.eat_kw(Keyword::Exactly) {
            self.ft_bound(bound);
        } else if self.at_kw(Keyword::At)
            && (self.nth_at_kw(1, Keyword::Least) || self.nth_at_kw(1, Keyword::Most))
        {
            self.bump_kw(Keyword::At);
            if !self.eat_kw(Keyword::Least) {
                self.bump_kw(Keyword::Most);
            }
            self.ft_bound(bound);
        } else if self.eat_kw(Keyword::From) {
            self.ft_bound(bound);
            if self.expect_kw(Keyword::To) {
                self.ft_bound(bound);
            }
        } else {
            self.error_msg(
                DiagnosticKind::ExpectedToken,
                "`exactly`, `at least`, `at most` or `from`",
            );
        }
        m.done(self, SyntaxKind::FTRange);
    }

    fn ft_bound(&mut self, bound: fn(&mut Parser<'src>) -> Parsed) {
        if !bound(self).is_matched() {
            self.error(DiagnosticKind::ExpectedExpression);
        }
    }

    fn ft_integer(&mut self) -> Parsed {
        if !self.at(SyntaxKind::IntegerLiteral) {
            return Parsed::NotMatched;
        }
        self.numeric_literal()
    }

    fn ft_pos_filter(&mut self) -> bool {
        if self.at_kw(Keyword::Ordered) {
            let m = self.mark();
            self.bump_kw(Keyword::Ordered);
            m.done(self, SyntaxKind::FTOrder);
        } else if self.at_kw(Keyword::Window) {
            let m = self.mark();
            self.bump_kw(Keyword::Window);
            self.ft_bound(Self::additive_expr);
            self.ft_unit();
            m.done(self, SyntaxKind::FTWindow);
        } else if self.at_kw(Keyword::Distance) {
            let m = self.mark();
            self.bump_kw(Keyword::Distance);
            self.ft_range(Self::additive_expr);
            self.ft_unit();
            m.done(self, SyntaxKind::FTDistance);
        } else if self.at_kw(Keyword::Same) || self.at_kw(Keyword::Different) {
            let m = self.mark();
            self.bump_remap(SyntaxKind::Keyword);
            self.one_of(&[Keyword::Sentence, Keyword::Paragraph]);
            m.done(self, SyntaxKind::FTScope);
        } else if self.at_kw(Keyword::At)
            && (self.nth_at_kw(1, Keyword::Start) || self.nth_at_kw(1, Keyword::End))
            || self.at_kw(Keyword::Entire) && self.nth_at_kw(1, Keyword::Content)
        {
            let m = self.mark();
            self.bump_remap(SyntaxKind::Keyword);
            self.bump_remap(SyntaxKind::Keyword);
            m.done(self, SyntaxKind::FTContent);
        } else {
            return false;
        }
        true
    }

    fn ft_unit(&mut self) {
        self.one_of(&[Keyword::Words, Keyword::Sentences, Keyword::Paragraphs]);
    }

    /// `using ...` repeated. Returns whether any option was present.
    fn ft_match_options(&mut self) -> bool {
        if !self.at_kw(Keyword::Using) {
            return false;
        }
        let m = self.mark();
        while self.eat_kw(Keyword::Using) {
            self.ft_match_option();
        }
        m.done(self, SyntaxKind::FTMatchOptions);
        true
    }

    fn ft_match_option(&mut self) {
        if self.at_kw(Keyword::No) {
            let Some(&(kw, kind)) = NEGATED_OPTIONS.iter().find(|(kw, _)| self.nth_at_kw(1, *kw))
            else {
                self.error_msg(DiagnosticKind::ExpectedToken, "match option");
                return;
            };
            let m = self.mark();
            self.bump_kw(Keyword::No);
            self.bump_kw(kw);
            if kw == Keyword::Stop {
                self.expect_kw(Keyword::Words);
            }
            m.done(self, kind);
            return;
        }
        let Some(&(kw, kind)) = MATCH_OPTIONS.iter().find(|(kw, _)| self.at_kw(*kw)) else {
            self.error_msg(DiagnosticKind::ExpectedToken, "match option");
            return;
        };
        let m = self.mark();
        self.bump_kw(kw);
        match kw {
            Keyword::Language => {
                let _ = self.string_literal_or_error();
            }
            Keyword::Thesaurus => self.ft_thesaurus_tail(),
            Keyword::Stop => self.ft_stop_words_tail(),
            Keyword::Case | Keyword::Diacritics => {
                self.one_of(&[Keyword::Insensitive, Keyword::Sensitive]);
            }
            Keyword::Option => {
                let _ = self.eq_name_or_error();
                let _ = self.string_literal_or_error();
            }
            _ => {}
        }
        m.done(self, kind);
    }

    /// After `thesaurus`: an id, `default`, or a parenthesized list of them.
    fn ft_thesaurus_tail(&mut self) {
        if self.eat(SyntaxKind::ParenOpen) {
            self.ft_thesaurus_id_or_default();
            while self.eat(SyntaxKind::Comma) {
                self.ft_thesaurus_id();
            }
            self.expect_closing(SyntaxKind::ParenClose);
        } else {
            self.ft_thesaurus_id_or_default();
        }
    }

    fn ft_thesaurus_id_or_default(&mut self) {
        if !self.eat_kw(Keyword::Default) {
            self.ft_thesaurus_id();
        }
    }

    /// `at "uri" relationship "rel" exactly 2 levels`
    fn ft_thesaurus_id(&mut self) {
        if !self.at_kw(Keyword::At) {
            self.error_msg(DiagnosticKind::ExpectedToken, Keyword::At.to_string());
            return;
        }
        let m = self.mark();
        self.bump_kw(Keyword::At);
        let _ = self.uri_literal();
        if self.eat_kw(Keyword::Relationship) {
            let _ = self.string_literal_or_error();
        }
        let has_range = self.at_kw(Keyword::Exactly)
            || self.at_kw(Keyword::From)
            || self.at_kw(Keyword::At)
                && (self.nth_at_kw(1, Keyword::Least) || self.nth_at_kw(1, Keyword::Most));
        if has_range {
            self.ft_range(Self::ft_integer);
            self.expect_kw(Keyword::Levels);
        }
        m.done(self, SyntaxKind::FTThesaurusID);
    }

    /// After `stop`: `words` then `default` or a word list, then `union`/`except` lists.
    fn ft_stop_words_tail(&mut self) {
        self.expect_kw(Keyword::Words);
        if !self.eat_kw(Keyword::Default) {
            self.ft_stop_words();
        }
        while self.eat_kw(Keyword::Union) || self.eat_kw(Keyword::Except) {
            self.ft_stop_words();
        }
    }

    fn ft_stop_words(&mut self) {
        let m = self.mark();
        if self.eat_kw(Keyword::At) {
            let _ = self.uri_literal();
        } else if self.eat(SyntaxKind::ParenOpen) {
            let _ = self.string_literal_or_error();
            while self.eat(SyntaxKind::Comma) {
                let _ = self.string_literal_or_error();
            }
            self.expect_closing(SyntaxKind::ParenClose);
        } else {
            self.error_msg(DiagnosticKind::ExpectedToken, "stop word list");
        }
        m.done(self, SyntaxKind::FTStopWords);
    }

    fn ft_weight(&mut self) -> bool {
        if !self.at_kw(Keyword::Weight) || !self.nth_at(1, SyntaxKind::BraceOpen) {
            return false;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Weight);
        let _ = self.enclosed_expr();
        m.done(self, SyntaxKind::FTWeight);
        true
    }

    /// `declare ft-option using ...`
    fn ft_option_decl(&mut self) -> Parsed {
        if !self.at_kw(Keyword::Declare) || !self.nth_at_kw(1, Keyword::FtOption) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::FtOption);
        if !self.ft_match_options() {
            self.error_msg(DiagnosticKind::ExpectedToken, Keyword::Using.to_string());
        }
        m.complete(self, SyntaxKind::FTOptionDecl)
    }
}
