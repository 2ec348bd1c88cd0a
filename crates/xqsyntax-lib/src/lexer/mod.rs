//! Stacked, restartable lexer.
//!
//! Produces span-based tokens without storing text; text is sliced from source only when
//! needed. Each token remembers the [`LexerState`] it was lexed in, so lexing can restart
//! at any token boundary and reproduce the same tokens as a cold start.
//!
//! ## Regions
//!
//! The lexer is a composition of region scanners (see [`Region`]). Entering an embedded
//! region (a string literal, a start tag, an enclosed expression, ...) pushes a frame;
//! the region's exit token pops it. An exit token with no matching frame is a no-op.
//!
//! ## Error handling
//!
//! Malformed input never stops the lexer. It becomes sentinel tokens (`BadCharacter`,
//! `PartialEntityRef`, ...) that tile the input like any other token. Input ending
//! inside an embedded region produces one zero-width `UnexpectedEndOfBlock`.

mod expr;
mod markup;
mod scan;
mod state;
mod text;
mod xqdoc;


use rowan::{TextRange, TextSize};

pub use state::{Frame, LexerState, Region};

use crate::syntax::SyntaxKind;
use state::Transition;

/// Span-based token plus the lexer state it started in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
    pub state: LexerState,
}

impl Token {
    /// Retrieves the text slice for this token. O(1) slice into source.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[std::ops::Range::<usize>::from(self.span)]
    }
}

/// One scanner decision: the token kind, its byte length and the stack transition.
struct Step {
    kind: SyntaxKind,
    len: usize,
    transition: Transition,
}

impl Step {
    fn new(kind: SyntaxKind, len: usize, transition: Transition) -> Self {
        Self {
            kind,
            len,
            transition,
        }
    }

    fn push(kind: SyntaxKind, len: usize, region: Region, sub: u8, exit: SyntaxKind) -> Self {
        Self::new(kind, len, Transition::Push { region, sub, exit })
    }
}

/// Lazy token iterator over `source[start..end]`.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    end: usize,
    state: LexerState,
}

impl<'src> Lexer<'src> {
    /// # Panics
    ///
    /// Panics if the range is out of bounds or does not fall on char boundaries, or if
    /// the source is longer than `u32::MAX` bytes.
    pub fn new(source: &'src str, start: usize, end: usize, state: LexerState) -> Self {
        assert!(
            u32::try_from(source.len()).is_ok(),
            "source of {} bytes exceeds the 4 GiB offset range",
            source.len()
        );
        assert!(
            start <= end && end <= source.len(),
            "lex range {start}..{end} out of bounds for source of length {}",
            source.len()
        );
        assert!(
            source.is_char_boundary(start) && source.is_char_boundary(end),
            "lex range {start}..{end} splits a character"
        );
        Self {
            source,
            pos: start,
            end,
            state,
        }
    }

    /// State the next token will be lexed in.
    pub fn state(&self) -> &LexerState {
        &self.state
    }

    fn step(&self) -> Step {
        let rest = &self.source[self.pos..self.end];
        let sub = self.state.sub_state();
        match self.state.region() {
            Region::Expr => expr::step(rest, &self.state),
            Region::StringLiteral => text::string_literal(rest, sub),
            Region::BracedUri => text::braced_uri(rest),
            Region::StringConstructor => text::string_constructor(rest),
            Region::Pragma => text::pragma(rest, sub),
            Region::ElemTag => markup::elem_tag(rest),
            Region::AttrValue => markup::attr_value(rest, sub),
            Region::ElemContent => markup::elem_content(rest),
            Region::ClosingTag => markup::closing_tag(rest),
            Region::DirComment => markup::dir_comment(rest),
            Region::CData => markup::cdata(rest),
            Region::DirPi => markup::dir_pi(rest, sub),
            Region::XQDoc => xqdoc::step(&self.source[..self.end], self.pos, sub),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pos >= self.end {
            if self.pos == self.source.len() && self.state.region() != Region::Expr {
                let at = TextSize::from(self.pos as u32);
                let token = Token {
                    kind: SyntaxKind::UnexpectedEndOfBlock,
                    span: TextRange::empty(at),
                    state: self.state.clone(),
                };
                self.state.reset();
                return Some(token);
            }
            return None;
        }

        let step = self.step();
        debug_assert!(step.len > 0, "scanner made no progress in {:?}", self.state);
        let start = self.pos;
        self.pos += step.len.max(scan::char_len(&self.source[start..]));
        let token = Token {
            kind: step.kind,
            span: TextRange::new((start as u32).into(), (self.pos as u32).into()),
            state: self.state.clone(),
        };
        self.state.apply(step.kind, step.transition);
        Some(token)
    }
}

/// Lexes `source[start..end]` starting in `state`.
///
/// Restarting from any token's `(span.start(), state)` reproduces the remaining tokens.
pub fn lex(source: &str, start: usize, end: usize, state: LexerState) -> Vec<Token> {
    let tokens: Vec<Token> = Lexer::new(source, start, end, state).collect();
    tracing::debug!(start, end, tokens = tokens.len(), "lexed");
    tokens
}

/// Last token starting at or before `offset` whose state has no open frames. Its
/// [`LexerState::exact_code`] restores lexing there exactly.
pub fn restart_point(tokens: &[Token], offset: usize) -> Option<&Token> {
    let offset = TextSize::try_from(offset).unwrap_or(TextSize::from(u32::MAX));
    let end = tokens.partition_point(|t| t.span.start() <= offset);
    tokens[..end].iter().rev().find(|t| t.state.depth() == 0)
}

/// Lexes the whole source from the base state.
pub fn tokenize(source: &str) -> Vec<Token> {
    lex(source, 0, source.len(), LexerState::default())
}
