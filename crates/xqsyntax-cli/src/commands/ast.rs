//! Print the syntax tree of a query.

use super::input::{InputArgs, fail};

pub struct AstArgs {
    pub input: InputArgs,
    pub color: bool,
    pub trivia: bool,
    pub spans: bool,
}

/// The tree always prints; diagnostics, if any, go to stderr first.
pub fn run(args: AstArgs) {
    let input = args.input.load().unwrap_or_else(|e| fail(e));
    let parse = input.parse();
    if !parse.diagnostics().is_empty() {
        input.report(parse.diagnostics(), args.color);
    }
    let tree = parse
        .printer()
        .with_trivia(args.trivia)
        .with_spans(args.spans)
        .dump();
    print!("{tree}");
}
