//! Tests for CLI dispatch logic: flag parsing and params extraction.

use std::path::PathBuf;

use xqsyntax_lib::Dialect;

use super::args::parse_state_code;
use super::*;
use crate::cli::commands::{ast_command, check_command, tokens_command};

#[test]
fn ast_defaults() {
    let m = ast_command()
        .try_get_matches_from(["ast", "query.xq"])
        .unwrap();
    let params = AstParams::from_matches(&m);
    assert_eq!(params.input.query_path, Some(PathBuf::from("query.xq")));
    assert_eq!(params.input.query_text, None);
    assert_eq!(params.input.dialect, Dialect::XQUERY);
    assert_eq!(params.input.from, 0);
    assert_eq!(params.input.state, None);
    assert_eq!(params.input.color, ColorChoice::Auto);
    assert!(!params.trivia && !params.spans);
}

#[test]
fn ast_outline_flags() {
    let m = ast_command()
        .try_get_matches_from(["ast", "-q", "1", "--trivia", "--spans"])
        .unwrap();
    let params = AstParams::from_matches(&m);
    assert!(params.trivia);
    assert!(params.spans);
}

#[test]
fn dialect_list_is_parsed() {
    let m = check_command()
        .try_get_matches_from(["check", "-q", "1", "--dialect", "update,ml"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.input.query_text.as_deref(), Some("1"));
    assert_eq!(params.input.dialect, Dialect::UPDATE | Dialect::MARKLOGIC);
}

#[test]
fn unknown_dialect_is_rejected() {
    let result = check_command().try_get_matches_from(["check", "-q", "1", "-d", "exist"]);
    let err = result.err().expect("unknown dialect should fail");
    assert!(err.to_string().contains("unknown dialect `exist`"));
}

#[test]
fn query_file_and_inline_text_conflict() {
    let result = ast_command().try_get_matches_from(["ast", "query.xq", "-q", "1"]);
    assert!(result.is_err());
}

#[test]
fn tokens_resume_flags() {
    let m = tokens_command()
        .try_get_matches_from([
            "tokens", "-q", "<a>1</a>", "--from", "3", "--state", "0x0600", "--json",
        ])
        .unwrap();
    let params = TokensParams::from_matches(&m);
    assert!(params.json);
    assert_eq!(params.input.from, 3);
    assert_eq!(params.input.state, Some(0x0600));
}

#[test]
fn color_choice() {
    let m = ast_command()
        .try_get_matches_from(["ast", "-q", "1", "--color", "never"])
        .unwrap();
    assert_eq!(AstParams::from_matches(&m).input.color, ColorChoice::Never);

    let result = ast_command().try_get_matches_from(["ast", "-q", "1", "--color", "sometimes"]);
    assert!(result.is_err());
}

#[test]
fn verbosity_reaches_subcommands() {
    let m = build_cli()
        .try_get_matches_from(["xqsyntax", "-vv", "check", "-q", "1"])
        .unwrap();
    let (name, sub) = m.subcommand().unwrap();
    assert_eq!(name, "check");
    assert_eq!(sub.get_count("verbose"), 2);
}

#[test]
fn state_codes_accept_hex_and_decimal() {
    assert_eq!(parse_state_code("0x0102"), Ok(0x0102));
    assert_eq!(parse_state_code("258"), Ok(258));
    assert!(parse_state_code("0xZZ").is_err());
}
