use super::input::{InputArgs, fail};

pub struct CheckArgs {
    pub input: InputArgs,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let input = args.input.load().unwrap_or_else(|e| fail(e));
    let parse = input.parse();
    let diagnostics = parse.diagnostics();
    tracing::info!(diagnostics = diagnostics.len(), "checked {}", input.name);

    if diagnostics.has_errors() {
        input.report(diagnostics, args.color);
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
