mod cli;
mod commands;

use cli::{AstParams, CheckParams, TokensParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };
    init_tracing(m.get_count("verbose"));

    match name {
        "ast" => commands::ast::run(AstParams::from_matches(m).into()),
        "tokens" => commands::tokens::run(TokensParams::from_matches(m).into()),
        "check" => commands::check::run(CheckParams::from_matches(m).into()),
        _ => unreachable!("clap should have caught this"),
    }
}

/// `RUST_LOG` wins over `-v`. Logs go to stderr so they never mix with command output.
fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = match verbosity {
        0 => "warn",
        1 => "xqsyntax_lib=debug",
        _ => "xqsyntax_lib=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}
