//! Print the token stream, one token per line or as JSON.
//!
//! Every token carries the lexer state it started in. Feeding a token's offset and
//! state code back through `--from`/`--state` resumes lexing there.

use std::fmt::Write;

use serde::Serialize;
use xqsyntax_lib::Token;

use super::input::{InputArgs, fail};

pub struct TokensArgs {
    pub input: InputArgs,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenRecord<'a> {
    kind: String,
    start: u32,
    end: u32,
    text: &'a str,
    state: u32,
}

impl<'a> TokenRecord<'a> {
    fn new(token: &Token, source: &'a str) -> Self {
        Self {
            kind: format!("{:?}", token.kind),
            start: token.span.start().into(),
            end: token.span.end().into(),
            text: token.text(source),
            state: token.state.code(),
        }
    }
}

pub fn run(args: TokensArgs) {
    let input = args.input.load().unwrap_or_else(|e| fail(e));
    let tokens = input.tokens();
    if args.json {
        let json = render_json(&tokens, &input.text).unwrap_or_else(|e| fail(e));
        println!("{json}");
    } else {
        print!("{}", render_text(&tokens, &input.text));
    }
}

/// `start..end Kind "text" state`, one line per token.
pub(crate) fn render_text(tokens: &[Token], source: &str) -> String {
    let mut out = String::new();
    for token in tokens {
        let record = TokenRecord::new(token, source);
        writeln!(
            out,
            "{}..{} {} {:?} {:#06x}",
            record.start, record.end, record.kind, record.text, record.state
        )
        .expect("String write never fails");
    }
    out
}

pub(crate) fn render_json(tokens: &[Token], source: &str) -> serde_json::Result<String> {
    let records: Vec<_> = tokens.iter().map(|t| TokenRecord::new(t, source)).collect();
    serde_json::to_string_pretty(&records)
}
