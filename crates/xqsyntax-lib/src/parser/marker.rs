//! Index checkpoints into the event arena.

use rowan::{TextRange, TextSize};

use super::core::{Event, Parser};
use super::outcome::Parsed;
use crate::syntax::SyntaxKind;

/// An open node. Must be closed with [`done`](Marker::done), discarded with
/// [`drop`](Marker::drop) or reverted with [`rollback`](Marker::rollback).
#[must_use = "markers must be closed, dropped or rolled back"]
#[derive(Debug)]
pub(crate) struct Marker {
    event: u32,
    token: usize,
    diagnostics: usize,
    last_end: TextSize,
    /// Set by `precede`: the start of the wrapped node. Such a marker has nothing to roll
    /// back to.
    preceded: Option<TextSize>,
}

/// A closed node, which can still be wrapped by a later node via [`precede`](Self::precede).
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompletedMarker {
    event: u32,
    range: TextRange,
    diagnostics: usize,
}

impl Marker {
    pub(super) fn new(event: u32, token: usize, diagnostics: usize, last_end: TextSize) -> Self {
        Self {
            event,
            token,
            diagnostics,
            last_end,
            preceded: None,
        }
    }

    pub(crate) fn done(self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        debug_assert!(kind.is_node(), "done({kind:?}) with a token kind");
        let slot = &mut p.events[self.event as usize];
        debug_assert_eq!(*slot, Event::Tombstone, "marker closed twice");
        *slot = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        p.open_markers -= 1;
        p.last_done = Some(kind);

        let start = self.preceded.unwrap_or_else(|| {
            p.tokens
                .get(self.token)
                .filter(|_| self.token < p.pos)
                .map_or(p.last_end, |t| t.span.start())
        });
        let range = if start <= p.last_end {
            TextRange::new(start, p.last_end)
        } else {
            TextRange::empty(start)
        };
        CompletedMarker {
            event: self.event,
            range,
            diagnostics: self.diagnostics,
        }
    }

    /// Abandons the grouping; everything parsed since the mark stays, flattened into the
    /// parent.
    pub(crate) fn drop(self, p: &mut Parser<'_>) {
        p.open_markers -= 1;
    }

    /// Reverts every event, consumed token and syntax diagnostic since the mark.
    pub(crate) fn rollback(self, p: &mut Parser<'_>) {
        debug_assert!(self.preceded.is_none(), "rollback of a preceding marker");
        p.events.truncate(self.event as usize);
        p.diagnostics.truncate(self.diagnostics);
        if p.exhausted_at.is_some_and(|at| at >= self.diagnostics) {
            p.exhausted_at = None;
        }
        p.pos = self.token;
        p.emitted = p.emitted.min(self.token);
        p.last_end = self.last_end;
        p.open_markers -= 1;
    }

    /// Shorthand for the common "declined" path.
    pub(crate) fn rollback_declined(self, p: &mut Parser<'_>) -> Parsed {
        tracing::trace!(token = self.token, "production declined");
        self.rollback(p);
        Parsed::NotMatched
    }

    /// Closes the node and reports whether its contents were clean.
    pub(crate) fn complete(self, p: &mut Parser<'_>, kind: SyntaxKind) -> Parsed {
        self.done(p, kind).parsed(p)
    }
}

impl CompletedMarker {
    /// Opens a new node that will become the parent of this one.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let event = p.events.len() as u32;
        p.events.push(Event::Tombstone);
        p.open_markers += 1;
        if let Event::Start { forward_parent, .. } = &mut p.events[self.event as usize] {
            *forward_parent = Some(event);
        }
        Marker {
            event,
            token: p.pos,
            diagnostics: self.diagnostics,
            last_end: p.last_end,
            preceded: Some(self.range.start()),
        }
    }

    pub(crate) fn range(&self) -> TextRange {
        self.range
    }

    /// `MatchedWithErrors` when any diagnostic, syntax or lexical, landed inside this node.
    pub(crate) fn parsed(&self, p: &Parser<'_>) -> Parsed {
        if p.diagnostics.len() > self.diagnostics || p.has_lexical_error_in(self.range) {
            Parsed::MatchedWithErrors
        } else {
            Parsed::Matched
        }
    }
}
