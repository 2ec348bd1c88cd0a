//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use crate::syntax::SyntaxKind;

/// Lookahead calls allowed between two consumed tokens.
pub(super) const DEBUG_FUEL: u32 = 16_384;

impl Parser<'_> {
    #[inline]
    pub(super) fn ensure_progress(&self) {
        assert!(
            self.debug_fuel.get() != 0,
            "parser is stuck: too many lookaheads"
        );
        self.debug_fuel.set(self.debug_fuel.get() - 1);
    }

    #[inline]
    pub(super) fn reset_debug_fuel(&self) {
        self.debug_fuel.set(DEBUG_FUEL);
    }

    pub(super) fn assert_markers_closed(&self) {
        assert_eq!(
            self.open_markers, 0,
            "broken parser invariant: {} marker(s) left open",
            self.open_markers
        );
    }

    #[inline]
    pub(super) fn assert_current(&self, expected: SyntaxKind) {
        let current = self.current();
        assert_eq!(
            current, expected,
            "broken parser invariant: expected {expected:?} but found {current:?} (upstream caller's responsibility)",
        );
    }
}
