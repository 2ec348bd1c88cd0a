//! xqsyntax: error-tolerant lossless parser for XQuery, XPath and their extension dialects.
//!
//! # Example
//!
//! ```
//! use xqsyntax_lib::{Dialect, parse};
//!
//! let source = r#"declare variable $greeting := "hello"; <p>{ $greeting }</p>"#;
//! let parse = parse(source, Dialect::XQUERY);
//! assert!(parse.diagnostics().is_empty());
//! eprintln!("{}", parse.debug_tree());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod syntax;

pub use config::{DEFAULT_RECURSION_LIMIT, Dialect, ParseOptions};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsPrinter};
pub use lexer::{Lexer, LexerState, Region, Token, lex, restart_point, tokenize};
pub use parser::{Parse, parse, parse_with};
pub use syntax::{CstPrinter, Keyword, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Errors at the fallible edges of the API. Malformed input is never one of these; it
/// becomes diagnostics on a complete tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid lexer state code {code:#06x}")]
    InvalidLexerState { code: u32 },

    #[error("unknown dialect `{0}`")]
    UnknownDialect(String),
}

pub type Result<T> = std::result::Result<T, Error>;
