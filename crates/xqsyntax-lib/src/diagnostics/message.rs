use rowan::TextRange;
use smallvec::SmallVec;

/// Diagnostic kinds, grouped by the stage that detects them.
///
/// Lexical kinds come from sentinel tokens and are reported once per parse, independent
/// of backtracking. Syntactic and structural kinds are reported by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Malformed tokens
    BadCharacter,
    PartialEntityRef,
    EmptyEntityRef,
    UnexpectedEndOfBlock,
    UnterminatedComment,
    IncompleteExponent,

    // Something required is missing or something stray is present
    ExpectedToken,
    ExpectedExpression,
    ExpectedType,
    ExpectedName,
    UnexpectedToken,
    RecursionLimitExceeded,

    // Well-formed tokens in a shape the grammar rejects
    MisplacedHeaderDecl,
    MismatchedEndTag,
    MultipleVendorCatchClauses,
    UnknownDeclaration,
    UnknownEntityRef,
}

impl DiagnosticKind {
    /// Diagnostic carried by a malformed-input sentinel token.
    pub fn for_sentinel(kind: crate::SyntaxKind) -> Option<DiagnosticKind> {
        use crate::SyntaxKind;
        Some(match kind {
            SyntaxKind::BadCharacter => Self::BadCharacter,
            SyntaxKind::PartialEntityRef => Self::PartialEntityRef,
            SyntaxKind::EmptyEntityRef => Self::EmptyEntityRef,
            SyntaxKind::UnexpectedEndOfBlock => Self::UnexpectedEndOfBlock,
            SyntaxKind::UnterminatedComment => Self::UnterminatedComment,
            SyntaxKind::IncompleteExponent => Self::IncompleteExponent,
            _ => return None,
        })
    }

    pub fn is_lexical(&self) -> bool {
        *self <= Self::IncompleteExponent
    }

    pub fn is_structural(&self) -> bool {
        *self >= Self::MisplacedHeaderDecl
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::BadCharacter => "unexpected character",
            Self::PartialEntityRef => "incomplete entity reference",
            Self::EmptyEntityRef => "empty entity reference",
            Self::UnexpectedEndOfBlock => "unexpected end of block",
            Self::UnterminatedComment => "unterminated comment",
            Self::IncompleteExponent => "incomplete double exponent",

            Self::ExpectedToken => "expected token",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedType => "expected a type",
            Self::ExpectedName => "expected a name",
            Self::UnexpectedToken => "unexpected token",
            Self::RecursionLimitExceeded => "expression nested too deeply",

            Self::MisplacedHeaderDecl => "header declaration after body declaration",
            Self::MismatchedEndTag => "end tag does not match start tag",
            Self::MultipleVendorCatchClauses => "multiple vendor catch clauses",
            Self::UnknownDeclaration => "unknown declaration",
            Self::UnknownEntityRef => "unknown entity reference",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::ExpectedToken => "expected {}".to_string(),
            Self::UnexpectedToken => "unexpected {}".to_string(),
            Self::MismatchedEndTag => "expected end tag `{}`".to_string(),
            Self::UnknownDeclaration => "unknown declaration `{}`".to_string(),
            Self::UnknownEntityRef => "unknown entity reference `{}`".to_string(),
            Self::MisplacedHeaderDecl => "{} must precede body declarations".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One error attached to a source range. Ranges are absolute offsets into the text
/// handed to `parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    /// Almost always zero or one entry.
    pub(crate) related: SmallVec<[RelatedInfo; 1]>,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: SmallVec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
