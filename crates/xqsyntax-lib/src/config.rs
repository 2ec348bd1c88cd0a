//! Parser configuration: which extension grammars are reachable and where parsing starts.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::lexer::LexerState;

/// Nesting depth at which the parser stops descending and swallows the rest of the input.
pub const DEFAULT_RECURSION_LIMIT: u32 = 1024;

bitflags! {
    /// Optional grammars layered on top of XQuery 3.1. Each flag is independent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Dialect: u8 {
        /// XQuery and XPath Full Text 3.0.
        const FULL_TEXT = 1 << 0;
        /// XQuery Update Facility 3.0.
        const UPDATE = 1 << 1;
        /// XQuery Scripting Extension 1.0.
        const SCRIPTING = 1 << 2;
        /// MarkLogic 1.0-ml.
        const MARKLOGIC = 1 << 3;
        const SAXON = 1 << 4;
        const BASEX = 1 << 5;
    }
}

const NAMES: &[(&str, Dialect)] = &[
    ("full-text", Dialect::FULL_TEXT),
    ("update", Dialect::UPDATE),
    ("scripting", Dialect::SCRIPTING),
    ("marklogic", Dialect::MARKLOGIC),
    ("saxon", Dialect::SAXON),
    ("basex", Dialect::BASEX),
];

impl Dialect {
    /// Plain XQuery 3.1.
    pub const XQUERY: Dialect = Dialect::empty();

    fn from_alias(name: &str) -> Option<Dialect> {
        let name = name.to_ascii_lowercase();
        let found = match name.as_str() {
            "xquery" => Dialect::XQUERY,
            "all" => Dialect::all(),
            "fulltext" | "ft" => Dialect::FULL_TEXT,
            "xquf" => Dialect::UPDATE,
            "sx" => Dialect::SCRIPTING,
            "ml" => Dialect::MARKLOGIC,
            other => NAMES.iter().find(|(n, _)| *n == other)?.1,
        };
        Some(found)
    }
}

/// Comma separated dialect names, e.g. `full-text,update`. An empty string is plain XQuery.
impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .try_fold(Dialect::XQUERY, |acc, part| {
                Dialect::from_alias(part)
                    .map(|d| acc | d)
                    .ok_or_else(|| Error::UnknownDialect(part.to_string()))
            })
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("xquery");
        }
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(_, d)| self.contains(*d))
            .map(|(n, _)| *n)
            .collect();
        f.write_str(&names.join(","))
    }
}

/// Everything `parse_with` needs beyond the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub dialect: Dialect,
    /// Byte offset in the source where parsing begins.
    pub start_offset: usize,
    /// Lexer state at `start_offset`, as saved on a token from an earlier lex.
    pub start_state: LexerState,
    pub recursion_limit: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::XQUERY,
            start_offset: 0,
            start_state: LexerState::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl ParseOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_start(mut self, offset: usize, state: LexerState) -> Self {
        self.start_offset = offset;
        self.start_state = state;
        self
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }
}
