//! Contextual keywords.
//!
//! XQuery reserves almost no words: `for`, `element` or `return` are ordinary names
//! outside the positions where the grammar expects them. The lexer therefore emits
//! `NCName` for all of them and the parser compares names against this table.

macro_rules! keywords {
    ( $( $variant:ident => $text:literal, )* ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $( $variant, )*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[ $( Keyword::$variant, )* ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( Keyword::$variant => $text, )*
                }
            }

            pub fn lookup(text: &str) -> Option<Keyword> {
                match text {
                    $( $text => Some(Keyword::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    After => "after",
    All => "all",
    Allowing => "allowing",
    Ancestor => "ancestor",
    AncestorOrSelf => "ancestor-or-self",
    And => "and",
    Any => "any",
    Array => "array",
    ArrayNode => "array-node",
    As => "as",
    Ascending => "ascending",
    At => "at",
    Attribute => "attribute",
    BaseUri => "base-uri",
    Before => "before",
    Binary => "binary",
    Block => "block",
    BooleanNode => "boolean-node",
    BoundarySpace => "boundary-space",
    Break => "break",
    By => "by",
    Case => "case",
    Cast => "cast",
    Castable => "castable",
    Catch => "catch",
    Child => "child",
    Collation => "collation",
    Comment => "comment",
    Construction => "construction",
    Contains => "contains",
    Content => "content",
    Context => "context",
    Continue => "continue",
    Copy => "copy",
    CopyNamespaces => "copy-namespaces",
    Count => "count",
    DecimalFormat => "decimal-format",
    DecimalSeparator => "decimal-separator",
    Declare => "declare",
    Default => "default",
    Delete => "delete",
    Descendant => "descendant",
    DescendantOrSelf => "descendant-or-self",
    Descending => "descending",
    Diacritics => "diacritics",
    Different => "different",
    Digit => "digit",
    Distance => "distance",
    Div => "div",
    Document => "document",
    DocumentNode => "document-node",
    Element => "element",
    Else => "else",
    Empty => "empty",
    EmptySequence => "empty-sequence",
    Encoding => "encoding",
    End => "end",
    Entire => "entire",
    Eq => "eq",
    Every => "every",
    Exactly => "exactly",
    Except => "except",
    Exit => "exit",
    ExponentSeparator => "exponent-separator",
    External => "external",
    First => "first",
    Fn => "fn",
    Following => "following",
    FollowingSibling => "following-sibling",
    For => "for",
    From => "from",
    FtAnd => "ftand",
    FtNot => "ftnot",
    FtOption => "ft-option",
    FtOr => "ftor",
    Function => "function",
    Ge => "ge",
    Greatest => "greatest",
    Group => "group",
    GroupingSeparator => "grouping-separator",
    Gt => "gt",
    Idiv => "idiv",
    If => "if",
    Import => "import",
    In => "in",
    Infinity => "infinity",
    Inherit => "inherit",
    Insensitive => "insensitive",
    Insert => "insert",
    Instance => "instance",
    Intersect => "intersect",
    Into => "into",
    Invoke => "invoke",
    Is => "is",
    Item => "item",
    Language => "language",
    Last => "last",
    Lax => "lax",
    Le => "le",
    Least => "least",
    Let => "let",
    Levels => "levels",
    Loop => "loop",
    Lowercase => "lowercase",
    Lt => "lt",
    Map => "map",
    MinusSign => "minus-sign",
    Mod => "mod",
    Modify => "modify",
    Module => "module",
    Most => "most",
    NaN => "NaN",
    Namespace => "namespace",
    NamespaceNode => "namespace-node",
    Ne => "ne",
    Next => "next",
    No => "no",
    NoInherit => "no-inherit",
    NoPreserve => "no-preserve",
    Node => "node",
    Nodes => "nodes",
    Not => "not",
    NullNode => "null-node",
    NumberNode => "number-node",
    ObjectNode => "object-node",
    Occurs => "occurs",
    Of => "of",
    Only => "only",
    Option => "option",
    Or => "or",
    Order => "order",
    Ordered => "ordered",
    Ordering => "ordering",
    Paragraph => "paragraph",
    Paragraphs => "paragraphs",
    Parent => "parent",
    PatternSeparator => "pattern-separator",
    PerMille => "per-mille",
    Percent => "percent",
    Phrase => "phrase",
    Preceding => "preceding",
    PrecedingSibling => "preceding-sibling",
    Preserve => "preserve",
    Previous => "previous",
    Private => "private",
    ProcessingInstruction => "processing-instruction",
    Relationship => "relationship",
    Rename => "rename",
    Replace => "replace",
    Return => "return",
    Returning => "returning",
    Revalidation => "revalidation",
    Same => "same",
    Satisfies => "satisfies",
    Schema => "schema",
    SchemaAttribute => "schema-attribute",
    SchemaElement => "schema-element",
    Score => "score",
    SelfAxis => "self",
    Sensitive => "sensitive",
    Sentence => "sentence",
    Sentences => "sentences",
    Skip => "skip",
    Sliding => "sliding",
    Some => "some",
    Stable => "stable",
    Start => "start",
    Stemming => "stemming",
    Stop => "stop",
    Strict => "strict",
    Strip => "strip",
    Switch => "switch",
    Text => "text",
    Then => "then",
    Thesaurus => "thesaurus",
    Times => "times",
    To => "to",
    Transform => "transform",
    Treat => "treat",
    Try => "try",
    Tuple => "tuple",
    Tumbling => "tumbling",
    Type => "type",
    Typeswitch => "typeswitch",
    Union => "union",
    Unordered => "unordered",
    Update => "update",
    Updating => "updating",
    Uppercase => "uppercase",
    Using => "using",
    Validate => "validate",
    Value => "value",
    Variable => "variable",
    Version => "version",
    Weight => "weight",
    When => "when",
    Where => "where",
    While => "while",
    Wildcards => "wildcards",
    Window => "window",
    With => "with",
    Without => "without",
    Word => "word",
    Words => "words",
    Xquery => "xquery",
    ZeroDigit => "zero-digit",
}

/// Names that never start a function call because they open a kind test or a
/// keyword-led expression instead.
const RESERVED_FUNCTION_NAMES: &[Keyword] = &[
    Keyword::Array,
    Keyword::Attribute,
    Keyword::Comment,
    Keyword::DocumentNode,
    Keyword::Element,
    Keyword::EmptySequence,
    Keyword::Function,
    Keyword::If,
    Keyword::Item,
    Keyword::Map,
    Keyword::NamespaceNode,
    Keyword::Node,
    Keyword::ProcessingInstruction,
    Keyword::SchemaAttribute,
    Keyword::SchemaElement,
    Keyword::Switch,
    Keyword::Text,
    Keyword::Typeswitch,
];

/// MarkLogic node tests. With that dialect enabled they win over function calls.
pub(crate) const MARKLOGIC_NODE_TESTS: &[Keyword] = &[
    Keyword::Binary,
    Keyword::ObjectNode,
    Keyword::ArrayNode,
    Keyword::NumberNode,
    Keyword::BooleanNode,
    Keyword::NullNode,
];

impl Keyword {
    pub fn is_reserved_function_name(self) -> bool {
        RESERVED_FUNCTION_NAMES.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_as_str() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::lookup(kw.as_str()), Some(*kw));
        }
        assert_eq!(Keyword::lookup("FOR"), None);
    }

    #[test]
    fn reserved_names() {
        assert!(Keyword::Node.is_reserved_function_name());
        assert!(!Keyword::Count.is_reserved_function_name());
    }
}
