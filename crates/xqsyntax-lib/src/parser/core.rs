//! Parser state machine and low-level operations.
//!
//! The parser never writes the tree directly. It appends [`Event`]s to an arena and
//! hands out index-based [`Marker`]s into it, so rolling back a speculative parse is a
//! truncation. The arena is replayed into a rowan green tree once parsing ends.

use std::cell::Cell;
use std::rc::Rc;

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::hooks::HookTable;
use super::marker::Marker;
use super::outcome::Parsed;
use crate::config::{Dialect, ParseOptions};
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics};
use crate::lexer::Token;
use crate::syntax::{Keyword, SyntaxKind, TokenSet};

const RED_ZONE: usize = 100 * 1024; // 100KB
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Ensure sufficient stack space for recursive productions.
#[inline]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Event {
    /// Opens a node. `forward_parent` points at the event of a marker created later by
    /// `precede`, which becomes this node's parent.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<u32>,
    },
    Finish,
    /// A token, possibly re-kinded (names consumed as keywords become `Keyword`).
    Token { kind: SyntaxKind, index: u32 },
    /// Placeholder of an open or dropped marker.
    Tombstone,
}

/// Per-`try` bookkeeping for MarkLogic's parenthesized catch clauses.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct TryScope {
    pub(super) first_vendor_catch: Option<TextRange>,
}

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    /// Index of the current significant token (never trivia).
    pub(super) pos: usize,
    /// Tokens before this index have been appended to `events`.
    pub(super) emitted: usize,
    /// End of the last consumed significant token.
    pub(super) last_end: TextSize,
    pub(super) events: Vec<Event>,
    pub(super) diagnostics: Diagnostics,
    lexical: Diagnostics,
    pub(super) dialect: Dialect,
    pub(super) hooks: HookTable,
    depth: u32,
    recursion_limit: u32,
    /// Index of the recursion-limit diagnostic, once the limit has been hit.
    pub(super) exhausted_at: Option<usize>,
    pub(super) open_markers: u32,
    pub(super) last_done: Option<SyntaxKind>,
    pub(super) try_scope: TryScope,
    /// Keywords the enclosing productions continue with, innermost last.
    pub(super) continuations: Vec<&'static [Keyword]>,
    pub(super) debug_fuel: Cell<u32>,
}

impl<'src> Parser<'src> {
    /// `tokens` must tile `source[options.start_offset..]`.
    pub fn new(source: &'src str, tokens: Vec<Token>, options: &ParseOptions) -> Self {
        let lexical = lexical_diagnostics(source, &tokens);
        let start = TextSize::from(options.start_offset as u32);
        let mut parser = Self {
            source,
            tokens,
            pos: 0,
            emitted: 0,
            last_end: start,
            events: Vec::new(),
            diagnostics: Diagnostics::new(),
            lexical,
            dialect: options.dialect,
            hooks: HookTable::for_dialect(options.dialect),
            depth: 0,
            recursion_limit: options.recursion_limit,
            exhausted_at: None,
            open_markers: 0,
            last_done: None,
            try_scope: TryScope::default(),
            continuations: Vec::new(),
            debug_fuel: Cell::new(super::invariants::DEBUG_FUEL),
        };
        parser.skip_trivia();
        parser
    }

    /// Runs the whole grammar and returns the green tree plus all diagnostics sorted by
    /// offset.
    pub fn parse(mut self) -> (GreenNode, Diagnostics) {
        self.events.push(Event::Start {
            kind: SyntaxKind::Module,
            forward_parent: None,
        });
        self.module_root();
        self.finish()
    }

    fn finish(mut self) -> (GreenNode, Diagnostics) {
        self.assert_markers_closed();
        self.emitted_through(self.tokens.len());
        self.events.push(Event::Finish);

        let green = self.build_tree();
        let mut diagnostics = std::mem::take(&mut self.lexical);
        diagnostics.merge_sorted(std::mem::take(&mut self.diagnostics));
        (green, diagnostics)
    }

    fn build_tree(&mut self) -> GreenNode {
        let mut builder = GreenNodeBuilder::new();
        let mut parents: Vec<SyntaxKind> = Vec::new();

        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Tombstone) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    parents.push(kind);
                    let mut next = forward_parent;
                    while let Some(idx) = next {
                        next = match std::mem::replace(&mut self.events[idx as usize], Event::Tombstone) {
                            Event::Start {
                                kind,
                                forward_parent,
                            } => {
                                parents.push(kind);
                                forward_parent
                            }
                            // The preceding marker was dropped.
                            _ => None,
                        };
                    }
                    for kind in parents.drain(..).rev() {
                        builder.start_node(kind.into());
                    }
                }
                Event::Finish => builder.finish_node(),
                Event::Token { kind, index } => {
                    let token = &self.tokens[index as usize];
                    builder.token(kind.into(), token.text(self.source));
                }
                Event::Tombstone => {}
            }
        }

        builder.finish()
    }

    // ---------------------------------------------------------------------------------
    // Lookahead

    #[inline]
    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Kind of the `n`th significant token ahead; `Error` past the end of input.
    pub(super) fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn nth_token(&self, n: usize) -> Option<&Token> {
        self.significant_ahead(n).next()
    }

    /// Significant tokens from lookahead `n` on. The whole scan costs one unit of
    /// lookahead fuel, however far it goes.
    pub(super) fn significant_ahead(&self, n: usize) -> impl Iterator<Item = &Token> {
        self.ensure_progress();
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .skip(n)
    }

    pub(super) fn nth_text(&self, n: usize) -> &'src str {
        self.nth_token(n).map_or("", |t| t.text(self.source))
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.nth_text(0)
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.end_offset()), |t| t.span)
    }

    pub(super) fn end_offset(&self) -> TextSize {
        self.tokens
            .last()
            .map_or(self.last_end, |t| t.span.end())
    }

    #[inline]
    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    #[inline]
    pub(super) fn nth_at(&self, n: usize, kind: SyntaxKind) -> bool {
        self.nth(n) == kind
    }

    pub(super) fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    pub(super) fn at_kw(&self, kw: Keyword) -> bool {
        self.nth_at_kw(0, kw)
    }

    pub(super) fn nth_at_kw(&self, n: usize, kw: Keyword) -> bool {
        self.nth_token(n)
            .is_some_and(|t| t.kind == SyntaxKind::NCName && t.text(self.source) == kw.as_str())
    }

    /// The `n`th and `n + 1`th significant tokens touch, with no trivia between them.
    pub(super) fn nth_adjacent(&self, n: usize) -> bool {
        match (self.nth_token(n), self.nth_token(n + 1)) {
            (Some(a), Some(b)) => a.span.end() == b.span.start(),
            _ => false,
        }
    }

    // ---------------------------------------------------------------------------------
    // Consumption

    fn skip_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.pos += 1;
        }
    }

    /// Appends every not yet emitted token before `end` to the event arena.
    fn emitted_through(&mut self, end: usize) {
        for index in self.emitted..end {
            self.events.push(Event::Token {
                kind: self.tokens[index].kind,
                index: index as u32,
            });
        }
        self.emitted = self.emitted.max(end);
    }

    /// Flushes pending trivia so it lands outside the node about to open.
    pub(super) fn flush_trivia(&mut self) {
        self.emitted_through(self.pos);
    }

    pub(super) fn bump(&mut self) {
        let kind = self.current();
        self.bump_remap(kind);
    }

    /// Consumes the current token, recording it with `kind`.
    pub(super) fn bump_remap(&mut self, kind: SyntaxKind) {
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.flush_trivia();

        let index = self.pos;
        self.events.push(Event::Token {
            kind,
            index: index as u32,
        });
        self.last_end = self.tokens[index].span.end();
        self.pos += 1;
        self.emitted = self.pos;
        self.skip_trivia();
    }

    pub(super) fn bump_kw(&mut self, kw: Keyword) {
        debug_assert!(self.at_kw(kw), "bump_kw({kw}) at {:?}", self.current_text());
        self.bump_remap(SyntaxKind::Keyword);
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_kw(&mut self, kw: Keyword) -> bool {
        if self.at_kw(kw) {
            self.bump_kw(kw);
            true
        } else {
            false
        }
    }

    pub(super) fn mark(&mut self) -> Marker {
        self.flush_trivia();
        let event = self.events.len() as u32;
        self.events.push(Event::Tombstone);
        self.open_markers += 1;
        Marker::new(event, self.pos, self.diagnostics.len(), self.last_end)
    }

    // ---------------------------------------------------------------------------------
    // Diagnostics

    pub(super) fn has_lexical_error_at(&self, offset: TextSize) -> bool {
        self.lexical
            .as_slice()
            .binary_search_by_key(&offset, |d| d.range().start())
            .is_ok()
    }

    /// Lexical errors inside `range`, which make the surrounding production imperfect. A
    /// zero-width end-of-block marker at the very end still belongs to the range.
    pub(super) fn has_lexical_error_in(&self, range: TextRange) -> bool {
        let diags = self.lexical.as_slice();
        let first = diags.partition_point(|d| d.range().start() < range.start());
        diags[first..]
            .iter()
            .take_while(|d| d.range().start() <= range.end())
            .any(|d| d.range().start() < range.end() || d.range().is_empty())
    }

    fn should_report(&self, at: TextSize) -> bool {
        if self.exhausted_at.is_some() {
            return false;
        }
        if self.current().is_lexical_error() && self.current_span().start() == at {
            return false;
        }
        if self.has_lexical_error_at(at) {
            return false;
        }
        self.diagnostics
            .last()
            .is_none_or(|last| last.range().start() != at)
    }

    /// Starts a diagnostic at `range` unless one is already recorded for its offset.
    pub(super) fn report(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
    ) -> Option<DiagnosticBuilder<'_>> {
        if !self.should_report(range.start()) {
            return None;
        }
        Some(self.diagnostics.report(kind, range))
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        if let Some(d) = self.report(kind, range) {
            d.emit();
        }
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, detail: impl Into<String>) {
        let range = self.current_span();
        if let Some(d) = self.report(kind, range) {
            d.message(detail).emit();
        }
    }

    /// On mismatch: emit diagnostic but don't consume. A zero-width end-of-block marker is
    /// absorbed silently, since its lexical diagnostic already says what is missing.
    pub(super) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        if self.at(SyntaxKind::UnexpectedEndOfBlock) {
            self.bump();
            return false;
        }
        self.error_msg(DiagnosticKind::ExpectedToken, kind.name());
        false
    }

    pub(super) fn expect_kw(&mut self, kw: Keyword) -> bool {
        if self.eat_kw(kw) {
            return true;
        }
        self.error_msg(DiagnosticKind::ExpectedToken, kw.to_string());
        false
    }

    /// Reports at the current token, then wraps it in an `Error` node.
    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind, detail: Option<&str>) {
        match detail {
            Some(detail) => self.error_msg(kind, detail),
            None => self.error(kind),
        }
        if !self.eof() {
            let m = self.mark();
            self.bump();
            m.done(self, SyntaxKind::Error);
        }
    }

    // ---------------------------------------------------------------------------------
    // Recursion

    /// Descends one nesting level. Past the limit, reports once and swallows the rest of
    /// the input into a single `Error` node so every caller unwinds at end of input.
    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.depth >= self.recursion_limit {
            if self.exhausted_at.is_none() {
                tracing::debug!(limit = self.recursion_limit, "recursion limit reached");
                self.exhausted_at = Some(self.diagnostics.len());
                let range = self.current_span();
                self.diagnostics
                    .report(DiagnosticKind::RecursionLimitExceeded, range)
                    .emit();
            }
            if !self.eof() {
                let m = self.mark();
                while !self.eof() {
                    self.bump();
                }
                m.done(self, SyntaxKind::Error);
            }
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    /// Runs a recursive production one nesting level down, on a stack that grows on demand.
    pub(super) fn nested(&mut self, f: impl FnOnce(&mut Self) -> Parsed) -> Parsed {
        if !self.enter_recursion() {
            return Parsed::MatchedWithErrors;
        }
        let result = ensure_sufficient_stack(|| f(self));
        self.exit_recursion();
        result
    }

    /// Calls a hook. The table entry is cloned first so the hook may borrow the parser.
    pub(super) fn call_hook(&mut self, pick: impl FnOnce(&HookTable) -> &super::hooks::Hook) -> Parsed {
        let hook = Rc::clone(pick(&self.hooks));
        hook(self)
    }
}

fn lexical_diagnostics(source: &str, tokens: &[Token]) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for token in tokens {
        if let Some(kind) = DiagnosticKind::for_sentinel(token.kind) {
            diagnostics.report(kind, token.span).emit();
        } else if token.kind == SyntaxKind::PredefinedEntityRef {
            let text = token.text(source);
            let name = &text[1..text.len() - 1];
            if !matches!(name, "lt" | "gt" | "amp" | "quot" | "apos") {
                diagnostics
                    .report(DiagnosticKind::UnknownEntityRef, token.span)
                    .message(name)
                    .emit();
            }
        }
    }
    diagnostics
}
