//! Tri-state result of a grammar production.

/// What a production did with the input.
///
/// `NotMatched` guarantees nothing observable was consumed, so the caller may try the
/// next alternative. `MatchedWithErrors` means the production committed and recorded
/// diagnostics for what was missing or malformed.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parsed {
    Matched,
    MatchedWithErrors,
    NotMatched,
}

impl Parsed {
    #[inline]
    pub fn is_matched(self) -> bool {
        !matches!(self, Parsed::NotMatched)
    }

    #[inline]
    pub fn is_clean(self) -> bool {
        matches!(self, Parsed::Matched)
    }

    /// Ordered choice: runs `next` only when this alternative declined.
    #[inline]
    pub fn or_else(self, next: impl FnOnce() -> Parsed) -> Parsed {
        match self {
            Parsed::NotMatched => next(),
            matched => matched,
        }
    }

    /// Combines the outcomes of two parts of one committed production.
    #[inline]
    pub fn and(self, other: Parsed) -> Parsed {
        match (self, other) {
            (Parsed::Matched, Parsed::Matched) => Parsed::Matched,
            (Parsed::NotMatched, Parsed::NotMatched) => Parsed::NotMatched,
            _ => Parsed::MatchedWithErrors,
        }
    }
}

impl From<bool> for Parsed {
    fn from(matched: bool) -> Self {
        if matched {
            Parsed::Matched
        } else {
            Parsed::NotMatched
        }
    }
}
