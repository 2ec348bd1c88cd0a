//! Lexer state: the active region plus an explicit stack of embedded-region frames.
//!
//! Regions are the independently defined tokenizers the lexer switches between (the
//! expression region, a string literal body, a start tag's attribute list, ...). Entering
//! a region pushes a frame remembering where to resume and which token kind exits it.
//!
//! The frame stack is persistent: pushing allocates one node pointing at its parent, and
//! cloning a state shares every node. Each token keeps its own state for O(1) memory no
//! matter how deeply the input nests.
//!
//! Externally the state of the *active* region is a single integer,
//! `code = region << 8 | sub_state`. The code carries no frames, so it identifies a
//! lexical position exactly only when the stack is empty (see
//! [`LexerState::exact_code`]). A token's saved state restarts lexing from anywhere.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::Error;
use crate::syntax::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Region {
    #[default]
    Expr = 0,
    /// Sub-state 0 for `"`, 1 for `'`.
    StringLiteral = 1,
    BracedUri = 2,
    StringConstructor = 3,
    /// Attribute list of a direct start tag.
    ElemTag = 4,
    /// Sub-state 0 for `"`, 1 for `'`.
    AttrValue = 5,
    ElemContent = 6,
    ClosingTag = 7,
    DirComment = 8,
    CData = 9,
    /// Sub-state 0 before the target, 1 in the contents.
    DirPi = 10,
    /// Sub-states: 0 before the name, 1 after the prefix, 2 after the colon, 3 contents.
    Pragma = 11,
    /// Sub-state low bits count nested comments; `XQDOC_PARAM` marks a pending `@param`.
    XQDoc = 12,
}

pub(super) const XQDOC_PARAM: u8 = 0x80;

impl Region {
    fn from_u8(value: u8) -> Option<Region> {
        Some(match value {
            0 => Region::Expr,
            1 => Region::StringLiteral,
            2 => Region::BracedUri,
            3 => Region::StringConstructor,
            4 => Region::ElemTag,
            5 => Region::AttrValue,
            6 => Region::ElemContent,
            7 => Region::ClosingTag,
            8 => Region::DirComment,
            9 => Region::CData,
            10 => Region::DirPi,
            11 => Region::Pragma,
            12 => Region::XQDoc,
            _ => return None,
        })
    }

    fn max_sub_state(self) -> u8 {
        match self {
            Region::StringLiteral | Region::AttrValue | Region::DirPi => 1,
            Region::Pragma => 3,
            Region::XQDoc => u8::MAX,
            _ => 0,
        }
    }
}

/// Saved caller state of an embedded region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub resume_region: Region,
    pub resume_sub: u8,
    /// Token kind that leaves the embedded region.
    pub exit: SyntaxKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LexerState {
    region: Region,
    sub: u8,
    frames: FrameStack,
}

/// Immutable linked stack of frames; `None` is the empty stack.
#[derive(Clone, Default)]
struct FrameStack(Option<Arc<FrameNode>>);

struct FrameNode {
    frame: Frame,
    /// Number of frames up to and including this one.
    depth: usize,
    parent: Option<Arc<FrameNode>>,
}

impl FrameStack {
    fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |node| node.depth)
    }

    fn top(&self) -> Option<&Frame> {
        self.0.as_ref().map(|node| &node.frame)
    }

    fn push(&mut self, frame: Frame) {
        let depth = self.len() + 1;
        let parent = self.0.take();
        self.0 = Some(Arc::new(FrameNode {
            frame,
            depth,
            parent,
        }));
    }

    fn pop(&mut self) -> Option<Frame> {
        let node = self.0.take()?;
        self.0 = node.parent.clone();
        Some(node.frame)
    }

    /// Innermost frame first.
    fn iter(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.0.as_deref(), |node| node.parent.as_deref())
            .map(|node| &node.frame)
    }
}

// Comparison, hashing, formatting and dropping walk the chain iteratively, so no stack
// depth recurses.

impl PartialEq for FrameStack {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.0.as_ref();
        let mut b = other.0.as_ref();
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if Arc::ptr_eq(x, y) {
                        return true;
                    }
                    if x.depth != y.depth || x.frame != y.frame {
                        return false;
                    }
                    a = x.parent.as_ref();
                    b = y.parent.as_ref();
                }
                _ => return false,
            }
        }
    }
}

impl Eq for FrameStack {}

impl Hash for FrameStack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for frame in self.iter() {
            frame.hash(state);
        }
    }
}

impl fmt::Debug for FrameStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Drop for FrameNode {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// What the active region asks of the stack after emitting a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Transition {
    Stay,
    Push {
        region: Region,
        sub: u8,
        exit: SyntaxKind,
    },
    Switch {
        region: Region,
        sub: u8,
    },
    /// Leave the active region unconditionally.
    Pop,
    /// Leave the active region if the token is the top frame's exit kind.
    Exit,
}

impl LexerState {
    /// Decodes a public state code into a state with an empty frame stack.
    ///
    /// # Panics
    ///
    /// Panics if `code` names no region/sub-state. The state space is closed, so an
    /// unknown code is a defect in the caller. Use [`LexerState::try_from_code`] to
    /// validate untrusted input.
    pub fn from_code(code: u32) -> LexerState {
        match LexerState::try_from_code(code) {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_from_code(code: u32) -> Result<LexerState, Error> {
        let invalid = || Error::InvalidLexerState { code };
        if code > 0xFFFF {
            return Err(invalid());
        }
        let region = Region::from_u8((code >> 8) as u8).ok_or_else(invalid)?;
        let sub = (code & 0xFF) as u8;
        if sub > region.max_sub_state() {
            return Err(invalid());
        }
        Ok(LexerState {
            region,
            sub,
            frames: FrameStack::default(),
        })
    }

    /// Code of the active region and sub-state. Lossy when frames are open.
    pub fn code(&self) -> u32 {
        ((self.region as u32) << 8) | self.sub as u32
    }

    /// The code, if it restores this state exactly, i.e. no frames are open.
    pub fn exact_code(&self) -> Option<u32> {
        (self.frames.len() == 0).then(|| self.code())
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn sub_state(&self) -> u8 {
        self.sub
    }

    /// Open frames, innermost first.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_base(&self) -> bool {
        self.region == Region::Expr && self.frames.len() == 0
    }

    pub(super) fn top_exit(&self) -> Option<SyntaxKind> {
        self.frames.top().map(|f| f.exit)
    }

    pub(super) fn reset(&mut self) {
        *self = LexerState::default();
    }

    pub(super) fn apply(&mut self, kind: SyntaxKind, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Push { region, sub, exit } => {
                tracing::trace!(?region, ?exit, depth = self.frames.len() + 1, "push lexer frame");
                self.frames.push(Frame {
                    resume_region: self.region,
                    resume_sub: self.sub,
                    exit,
                });
                self.region = region;
                self.sub = sub;
            }
            Transition::Switch { region, sub } => {
                self.region = region;
                self.sub = sub;
            }
            Transition::Pop => self.pop(),
            Transition::Exit => match self.frames.top() {
                Some(frame) if frame.exit == kind => self.pop(),
                Some(_) => {}
                None => self.pop(),
            },
        }
    }

    /// Popping an empty stack falls back to the base region instead of failing.
    fn pop(&mut self) {
        match self.frames.pop() {
            Some(frame) => {
                tracing::trace!(resume = ?frame.resume_region, depth = self.frames.len(), "pop lexer frame");
                self.region = frame.resume_region;
                self.sub = frame.resume_sub;
            }
            None => {
                self.region = Region::Expr;
                self.sub = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        let state = LexerState::from_code(0x0B02);
        assert_eq!(state.region(), Region::Pragma);
        assert_eq!(state.sub_state(), 2);
        assert_eq!(state.code(), 0x0B02);
        assert!(LexerState::from_code(0).is_base());
    }

    #[test]
    fn undefined_codes_are_rejected() {
        assert!(LexerState::try_from_code(0x0D00).is_err());
        assert!(LexerState::try_from_code(0x0102).is_err());
        assert!(LexerState::try_from_code(0x1_0000).is_err());
        assert!(LexerState::try_from_code(0x0CFF).is_ok());
    }

    #[test]
    #[should_panic(expected = "invalid lexer state")]
    fn from_code_panics_on_undefined_code() {
        let _ = LexerState::from_code(0x0F00);
    }

    #[test]
    fn push_exit_pop() {
        let mut state = LexerState::default();
        state.apply(
            SyntaxKind::BraceOpen,
            Transition::Push {
                region: Region::Expr,
                sub: 0,
                exit: SyntaxKind::BraceClose,
            },
        );
        assert_eq!(state.depth(), 1);

        // A mismatched exit leaves the frame alone.
        state.apply(SyntaxKind::StringInterpolationClose, Transition::Exit);
        assert_eq!(state.depth(), 1);

        state.apply(SyntaxKind::BraceClose, Transition::Exit);
        assert!(state.is_base());

        // Exit with nothing to pop is a no-op.
        state.apply(SyntaxKind::BraceClose, Transition::Exit);
        assert!(state.is_base());
    }

    fn brace_push() -> Transition {
        Transition::Push {
            region: Region::Expr,
            sub: 0,
            exit: SyntaxKind::BraceClose,
        }
    }

    #[test]
    fn clones_share_frames() {
        let mut state = LexerState::default();
        state.apply(SyntaxKind::BraceOpen, brace_push());
        let saved = state.clone();
        state.apply(SyntaxKind::BraceOpen, brace_push());

        assert_eq!(saved.depth(), 1);
        assert_eq!(state.depth(), 2);
        assert_ne!(saved, state);
        assert_eq!(saved.exact_code(), None);
        assert_eq!(LexerState::default().exact_code(), Some(0));

        state.apply(SyntaxKind::BraceClose, Transition::Exit);
        assert_eq!(state, saved);
        assert_eq!(state.frames().count(), 1);
    }

    #[test]
    fn deep_stacks_compare_and_drop() {
        let mut a = LexerState::default();
        let mut b = LexerState::default();
        for _ in 0..200_000 {
            a.apply(SyntaxKind::BraceOpen, brace_push());
            b.apply(SyntaxKind::BraceOpen, brace_push());
        }
        assert_eq!(a, b);
        assert_eq!(a.depth(), 200_000);
        drop(a);
        drop(b);
    }
}
