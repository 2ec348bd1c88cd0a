//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror the command `*Args` but are populated from clap
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use xqsyntax_lib::Dialect;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::input::InputArgs;
use crate::commands::tokens::TokensArgs;

/// Flags shared by every command.
pub struct InputParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub dialect: Dialect,
    pub from: usize,
    pub state: Option<u32>,
    pub color: ColorChoice,
}

impl InputParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            dialect: m.get_one::<Dialect>("dialect").copied().unwrap_or_default(),
            from: m.get_one::<usize>("from").copied().unwrap_or(0),
            state: m.get_one::<u32>("state").copied(),
            color: parse_color(m),
        }
    }
}

impl From<InputParams> for InputArgs {
    fn from(p: InputParams) -> Self {
        Self {
            query_path: p.query_path,
            query_text: p.query_text,
            dialect: p.dialect,
            from: p.from,
            state: p.state,
        }
    }
}

pub struct AstParams {
    pub input: InputParams,
    pub trivia: bool,
    pub spans: bool,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            trivia: m.get_flag("trivia"),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            color: p.input.color.should_colorize(),
            input: p.input.into(),
            trivia: p.trivia,
            spans: p.spans,
        }
    }
}

pub struct TokensParams {
    pub input: InputParams,
    pub json: bool,
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            input: p.input.into(),
            json: p.json,
        }
    }
}

pub struct CheckParams {
    pub input: InputParams,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            color: p.input.color.should_colorize(),
            input: p.input.into(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
