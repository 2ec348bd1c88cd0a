//! Parser infrastructure for XQuery and its extension dialects.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//!
//! - Event arena: productions append start/token/finish events; markers are indices into
//!   the arena, so speculation is a truncation and `precede` wraps retroactively
//! - Contextual keywords: the lexer emits names, the grammar decides which are keywords
//!   and remaps the ones it consumes to `Keyword`
//! - Hook table: dialects layer their productions onto a fixed set of entry points
//!   instead of forking the grammar (see [`hooks`])
//! - Trivia: whitespace and comments are flushed before a node opens, so they end up
//!   between nodes rather than at their edges
//!
//! # Recovery Strategy
//!
//! The parser is total: every input yields a tree covering all of it. Recovery follows
//! these rules:
//!
//! 1. Missing expected tokens emit a diagnostic but don't consume (the caller may handle
//!    what is there)
//! 2. Tokens no production accepts are wrapped in `SyntaxKind::Error` nodes up to a
//!    synchronisation point: `;`, a declaration keyword, a closing bracket or EOF
//! 3. Lexical sentinels already carry a diagnostic; no second one is stacked at the same
//!    offset
//! 4. On recursion limit, remaining input goes into a single Error node

mod core;
mod dialect;
mod grammar;
mod hooks;
mod invariants;
mod marker;
mod outcome;
mod recovery;

#[cfg(test)]
mod tests;

pub use core::Parser;
pub use outcome::Parsed;

use rowan::GreenNode;

use crate::config::{Dialect, ParseOptions};
use crate::diagnostics::Diagnostics;
use crate::lexer::lex;
use crate::syntax::{CstPrinter, SyntaxNode};

/// Parse result: the green tree plus every lexical and syntax diagnostic, sorted by
/// offset.
///
/// The tree is always complete. `Error` nodes mark where recovery kicked in.
#[derive(Debug, Clone)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Diagnostics,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Creates a typed view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (GreenNode, Diagnostics) {
        (self.green, self.diagnostics)
    }

    /// Outline printer over the tree; see [`CstPrinter`] for its options.
    pub fn printer(&self) -> CstPrinter {
        CstPrinter::new(self.syntax())
    }

    /// Indented outline of the tree without trivia, for tests and tooling.
    pub fn debug_tree(&self) -> String {
        self.printer().dump()
    }
}

/// Parses a whole query with the given dialects enabled.
pub fn parse(source: &str, dialect: Dialect) -> Parse {
    parse_with(source, &ParseOptions::new(dialect))
}

/// Parses `source[options.start_offset..]`, lexing from `options.start_state`. The root
/// node covers exactly that suffix.
pub fn parse_with(source: &str, options: &ParseOptions) -> Parse {
    let _span = tracing::debug_span!("parse", dialect = %options.dialect, len = source.len())
        .entered();
    let tokens = lex(
        source,
        options.start_offset,
        source.len(),
        options.start_state.clone(),
    );
    let (green, diagnostics) = Parser::new(source, tokens, options).parse();
    tracing::debug!(diagnostics = diagnostics.len(), "parsed");
    Parse { green, diagnostics }
}
