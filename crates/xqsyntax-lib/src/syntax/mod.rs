//! Token/node kinds and the rowan language binding.

mod keyword;
mod kind;
mod printer;

pub use keyword::Keyword;
pub(crate) use keyword::MARKLOGIC_NODE_TESTS;
pub use kind::{KindCategory, SyntaxKind, TokenSet, token_sets};
pub use printer::CstPrinter;

use rowan::Language;

/// Language tag for rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XqLang {}

impl Language for XqLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0).expect("raw kind produced by this crate")
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<XqLang>;
pub type SyntaxToken = rowan::SyntaxToken<XqLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;
