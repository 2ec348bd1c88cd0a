//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that the command builders compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use xqsyntax_lib::Dialect;

/// Query file, or `-` for stdin (positional).
pub fn query_path_arg() -> Arg {
    Arg::new("query_path")
        .value_name("QUERY")
        .value_parser(value_parser!(PathBuf))
        .help("Query file, or - to read stdin")
}

/// Inline query text (-q/--query).
pub fn query_text_arg() -> Arg {
    Arg::new("query_text")
        .short('q')
        .long("query")
        .value_name("TEXT")
        .conflicts_with("query_path")
        .help("Inline query text")
}

/// Extension grammars (-d/--dialect).
pub fn dialect_arg() -> Arg {
    Arg::new("dialect")
        .short('d')
        .long("dialect")
        .value_name("LIST")
        .default_value("xquery")
        .value_parser(value_parser!(Dialect))
        .help("Comma separated dialects: full-text, update, scripting, marklogic, saxon, basex, all")
}

/// Byte offset to start at (--from).
pub fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .value_name("OFFSET")
        .default_value("0")
        .value_parser(value_parser!(usize))
        .help("Byte offset where lexing and parsing start")
}

/// Lexer state code at --from (--state).
pub fn state_arg() -> Arg {
    Arg::new("state")
        .long("state")
        .value_name("CODE")
        .value_parser(parse_state_code)
        .help("Lexer state code at --from, as printed by `tokens` (decimal or 0x hex); past offset 0 it must be exact there")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Machine readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text")
}

/// Include whitespace and comments in the tree (--trivia).
pub fn trivia_arg() -> Arg {
    Arg::new("trivia")
        .long("trivia")
        .action(ArgAction::SetTrue)
        .help("Include whitespace and comment tokens")
}

/// Show source positions (--spans).
pub fn spans_arg() -> Arg {
    Arg::new("spans")
        .long("spans")
        .action(ArgAction::SetTrue)
        .help("Show byte ranges")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Log parser activity to stderr (-v debug, -vv trace)")
}

pub(super) fn parse_state_code(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid state code `{s}`: {e}"))
}
