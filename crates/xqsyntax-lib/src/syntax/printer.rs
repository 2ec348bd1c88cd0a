//! Indented text dump of a syntax tree.

use std::fmt::Write;

use rowan::{NodeOrToken, TextRange};

use super::SyntaxNode;

/// Builder for rendering a CST as an indented outline.
///
/// Nodes print as their kind, tokens as kind plus quoted text:
///
/// ```text
/// Module
///   MainModule
///     QueryBody
///       NumericLiteral
///         IntegerLiteral "1"
/// ```
pub struct CstPrinter {
    root: SyntaxNode,
    trivia: bool,
    spans: bool,
}

impl CstPrinter {
    pub fn new(root: SyntaxNode) -> Self {
        Self {
            root,
            trivia: false,
            spans: false,
        }
    }

    /// Also print whitespace and comment tokens.
    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    /// Append `[start..end]` to every line.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&self.root, 0, &mut out)
            .expect("String write never fails");
        out
    }

    fn format(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        writeln!(w, "{}{:?}{}", prefix, node.kind(), self.span_str(node.text_range()))?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        writeln!(
                            w,
                            "{}  {:?}{} {:?}",
                            prefix,
                            t.kind(),
                            self.span_str(t.text_range()),
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn span_str(&self, range: TextRange) -> String {
        if self.spans {
            format!(" [{}..{}]", u32::from(range.start()), u32::from(range.end()))
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dialect, parse};

    #[test]
    fn spans_and_trivia() {
        let parse = parse("1 +2", Dialect::XQUERY);
        let dump = parse.printer().with_trivia(true).with_spans(true).dump();
        insta::assert_snapshot!(dump, @r#"
        Module [0..4]
          MainModule [0..4]
            QueryBody [0..4]
              AdditiveExpr [0..4]
                NumericLiteral [0..1]
                  IntegerLiteral [0..1] "1"
                Whitespace [1..2] " "
                Plus [2..3] "+"
                NumericLiteral [3..4]
                  IntegerLiteral [3..4] "2"
        "#);
    }
}
