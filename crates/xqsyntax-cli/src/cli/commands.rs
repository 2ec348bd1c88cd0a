//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Input, dialect and start position flags every command takes.
fn with_input_args(cmd: Command) -> Command {
    cmd.arg(query_path_arg())
        .arg(query_text_arg())
        .arg(dialect_arg())
        .arg(from_arg())
        .arg(state_arg())
        .arg(color_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("xqsyntax")
        .about("Error tolerant XQuery parser: syntax trees, tokens and diagnostics")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(ast_command())
        .subcommand(tokens_command())
        .subcommand(check_command())
}

/// Print the concrete syntax tree.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Print the syntax tree of a query")
        .override_usage(
            "\
  xqsyntax ast <QUERY>
  xqsyntax ast -q <TEXT> [-d <LIST>]",
        )
        .after_help(
            r#"EXAMPLES:
  xqsyntax ast query.xq                         # tree, diagnostics on stderr
  xqsyntax ast -q 'for $x in 1 to 3 return $x'  # inline query
  xqsyntax ast -d update -q 'delete node $x'    # with an extension grammar
  xqsyntax ast query.xq --trivia --spans        # every token, with byte ranges"#,
        )
        .arg(trivia_arg())
        .arg(spans_arg());
    with_input_args(cmd)
}

/// Print the token stream with each token's start state.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Print the tokens of a query")
        .override_usage(
            "\
  xqsyntax tokens <QUERY> [--json]
  xqsyntax tokens -q <TEXT> [--from <OFFSET> --state <CODE>]",
        )
        .after_help(
            r#"EXAMPLES:
  xqsyntax tokens -q '<a>{1}</a>'                      # kind, span, text, state
  xqsyntax tokens query.xq --json                      # JSON array
  xqsyntax tokens query.xq --from 120 --state <CODE>   # resume at a printed token"#,
        )
        .arg(json_arg());
    with_input_args(cmd)
}

/// Report diagnostics, failing when there are any.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Report syntax errors, exiting non-zero when there are any")
        .override_usage(
            "\
  xqsyntax check <QUERY>
  xqsyntax check -q <TEXT> [-d <LIST>]",
        )
        .after_help(
            r#"EXAMPLES:
  xqsyntax check query.xq            # silent on success
  xqsyntax check -d all query.xqy    # every extension grammar"#,
        );
    with_input_args(cmd)
}
