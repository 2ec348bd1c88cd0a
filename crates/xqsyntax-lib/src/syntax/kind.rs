//! Syntax kinds for XQuery and its extension dialects.
//!
//! `SyntaxKind` serves dual roles: token kinds (from the lexer) and node kinds (from the
//! parser). Logos derives recognition for the expression region only; tokens of embedded
//! regions (markup, string bodies, pragmas, xqDoc) are produced by hand-written scanners
//! and carry no logos attributes, and neither do node kinds.
//!
//! Every kind has a display name (`name()`) and a coarse classification (`category()`).

use logos::Logos;

macro_rules! syntax_kinds {
    (
        tokens { $( $( #[$($attr:tt)*] )* $token:ident => $token_name:literal, )* }
        nodes { $( $node:ident => $node_name:literal, )* }
    ) => {
        /// All token and node kinds. Tokens first, then `Error`, then nodes, then `__LAST`.
        /// `#[repr(u16)]` enables the bounds-checked transmute in `kind_from_raw`.
        #[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $( $( #[$($attr)*] )* $token, )*
            $( $node, )*
            #[doc(hidden)]
            __LAST,
        }

        impl SyntaxKind {
            /// Human-readable name used in diagnostics and tooling.
            pub fn name(self) -> &'static str {
                match self {
                    $( SyntaxKind::$token => $token_name, )*
                    $( SyntaxKind::$node => $node_name, )*
                    SyntaxKind::__LAST => "<last>",
                }
            }
        }
    };
}

syntax_kinds! {
    tokens {
        #[token("(")]
        ParenOpen => "`(`",
        #[token(")")]
        ParenClose => "`)`",
        #[token("[")]
        BracketOpen => "`[`",
        #[token("]")]
        BracketClose => "`]`",
        #[token("{")]
        BraceOpen => "`{`",
        #[token("}")]
        BraceClose => "`}`",
        #[token(",")]
        Comma => "`,`",
        #[token(";")]
        Semicolon => "`;`",
        #[token(":")]
        Colon => "`:`",
        #[token("::")]
        DoubleColon => "`::`",
        #[token(":=")]
        Assign => "`:=`",
        #[token("$")]
        Dollar => "`$`",
        #[token("@")]
        At => "`@`",
        #[token("#")]
        Hash => "`#`",
        #[token("%")]
        Percent => "`%`",
        #[token("=")]
        Equal => "`=`",
        #[token("!=")]
        NotEqual => "`!=`",
        /// Comparison `<`; a well-formed start tag lexes as `DirElemOpen` instead.
        #[token("<")]
        LessThan => "`<`",
        #[token("<=")]
        LessEqual => "`<=`",
        #[token(">")]
        GreaterThan => "`>`",
        #[token(">=")]
        GreaterEqual => "`>=`",
        #[token("<<")]
        NodePrecedes => "`<<`",
        #[token(">>")]
        NodeFollows => "`>>`",
        #[token("|")]
        Pipe => "`|`",
        #[token("||")]
        Concat => "`||`",
        #[token("!")]
        Bang => "`!`",
        #[token("+")]
        Plus => "`+`",
        #[token("-")]
        Minus => "`-`",
        #[token("*")]
        Star => "`*`",
        #[token("/")]
        Slash => "`/`",
        #[token("//")]
        DoubleSlash => "`//`",
        #[token(".")]
        Dot => "`.`",
        #[token("..")]
        DoubleDot => "`..`",
        #[token("?")]
        Question => "`?`",
        #[token("=>")]
        Arrow => "`=>`",
        #[token("~")]
        Tilde => "`~`",

        /// XML NCName. Keywords are names too; the parser remaps the ones it consumes
        /// as keywords to `Keyword`.
        #[regex(r"[A-Z_a-z\x{C0}-\x{D6}\x{D8}-\x{F6}\x{F8}-\x{2FF}\x{370}-\x{37D}\x{37F}-\x{1FFF}\x{200C}-\x{200D}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}\x{10000}-\x{EFFFF}][A-Z_a-z0-9.\-\x{B7}\x{C0}-\x{D6}\x{D8}-\x{F6}\x{F8}-\x{37D}\x{37F}-\x{1FFF}\x{200C}-\x{200D}\x{203F}-\x{2040}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}\x{10000}-\x{EFFFF}]*")]
        NCName => "name",
        Keyword => "keyword",
        #[regex(r"[0-9]+")]
        IntegerLiteral => "integer literal",
        #[regex(r"\.[0-9]+|[0-9]+\.[0-9]*")]
        DecimalLiteral => "decimal literal",
        #[regex(r"(\.[0-9]+|[0-9]+(\.[0-9]*)?)[eE][+\-]?[0-9]+")]
        DoubleLiteral => "double literal",

        #[token("\"")]
        #[token("'")]
        StringLiteralStart => "string start",
        StringLiteralContents => "string contents",
        StringLiteralEnd => "string end",
        /// Doubled delimiter inside a string literal or attribute value.
        EscapedQuote => "escaped quote",
        PredefinedEntityRef => "entity reference",
        CharRef => "character reference",

        #[token("Q{")]
        BracedUriStart => "`Q{`",
        BracedUriContents => "URI",
        BracedUriEnd => "`}`",

        #[token("``[")]
        StringConstructorStart => "``` ``[ ```",
        StringConstructorContents => "string constructor contents",
        StringInterpolationOpen => "`` `{ ``",
        StringInterpolationClose => "`` }` ``",
        StringConstructorEnd => "``` ]`` ```",

        #[token("(#")]
        PragmaStart => "`(#`",
        PragmaContents => "pragma contents",
        PragmaEnd => "`#)`",

        /// `<` opening a direct element constructor, decided by the lexer.
        DirElemOpen => "`<`",
        DirTagClose => "`>`",
        DirSelfClose => "`/>`",
        DirEndTagOpen => "`</`",
        DirEndTagClose => "`>`",
        DirAttrValueStart => "attribute value start",
        DirAttrValueContents => "attribute value contents",
        DirAttrValueEnd => "attribute value end",
        DirElemText => "element text",
        /// `{{` or `}}` inside element content or an attribute value.
        DirBraceEscape => "escaped brace",
        DirCommentStart => "`<!--`",
        DirCommentContents => "comment contents",
        DirCommentEnd => "`-->`",
        CDataStart => "`<![CDATA[`",
        CDataContents => "CDATA contents",
        CDataEnd => "`]]>`",
        DirPiStart => "`<?`",
        DirPiContents => "processing instruction contents",
        DirPiEnd => "`?>`",

        #[regex(r"[ \t\r\n]+")]
        Whitespace => "whitespace",
        Comment => "comment",
        XQDocStart => "`(:~`",
        XQDocContents => "xqDoc contents",
        XQDocTag => "xqDoc tag",
        XQDocVariable => "xqDoc variable",
        XQDocEnd => "`:)`",

        /// Coalesced run of characters that start no token.
        BadCharacter => "bad character",
        /// `&name` or `&#..` without its terminating `;`.
        PartialEntityRef => "partial entity reference",
        EmptyEntityRef => "`&;`",
        /// Zero-width marker for input ending inside an embedded region.
        UnexpectedEndOfBlock => "end of block",
        UnterminatedComment => "unterminated comment",
        #[regex(r"(\.[0-9]+|[0-9]+(\.[0-9]*)?)[eE][+\-]?")]
        IncompleteExponent => "incomplete exponent",

        /// Error node; also returned by lookahead past the end of input.
        Error => "error",
    }
    nodes {
        Module => "module",
        VersionDecl => "version declaration",
        MainModule => "main module",
        LibraryModule => "library module",
        ModuleDecl => "module declaration",
        Prolog => "prolog",
        QueryBody => "query body",

        DefaultNamespaceDecl => "default namespace declaration",
        BoundarySpaceDecl => "boundary-space declaration",
        DefaultCollationDecl => "default collation declaration",
        BaseUriDecl => "base-uri declaration",
        ConstructionDecl => "construction declaration",
        OrderingModeDecl => "ordering mode declaration",
        EmptyOrderDecl => "empty order declaration",
        CopyNamespacesDecl => "copy-namespaces declaration",
        DecimalFormatDecl => "decimal-format declaration",
        DecimalFormatProperty => "decimal-format property",
        SchemaImport => "schema import",
        SchemaPrefix => "schema prefix",
        ModuleImport => "module import",
        LocationHints => "location hints",
        NamespaceDecl => "namespace declaration",
        ContextItemDecl => "context item declaration",
        VarDecl => "variable declaration",
        FunctionDecl => "function declaration",
        ParamList => "parameter list",
        Param => "parameter",
        FunctionBody => "function body",
        Annotation => "annotation",
        OptionDecl => "option declaration",
        FTOptionDecl => "ft-option declaration",
        RevalidationDecl => "revalidation declaration",
        TypeDecl => "type declaration",

        Expr => "expression",
        EnclosedExpr => "enclosed expression",
        FLWORExpr => "FLWOR expression",
        ForClause => "for clause",
        ForBinding => "for binding",
        LetClause => "let clause",
        LetBinding => "let binding",
        WindowClause => "window clause",
        WindowStartCondition => "window start condition",
        WindowEndCondition => "window end condition",
        WindowVars => "window variables",
        CountClause => "count clause",
        WhereClause => "where clause",
        GroupByClause => "group by clause",
        GroupingSpec => "grouping specification",
        OrderByClause => "order by clause",
        OrderSpec => "order specification",
        OrderModifier => "order modifier",
        ReturnClause => "return clause",
        PositionalVar => "positional variable",
        AllowingEmpty => "allowing empty",
        FTScoreVar => "score variable",
        TypeDeclaration => "type declaration",
        QuantifiedExpr => "quantified expression",
        QuantifiedBinding => "quantified binding",
        SwitchExpr => "switch expression",
        SwitchCaseClause => "switch case clause",
        SwitchDefaultClause => "switch default clause",
        TypeswitchExpr => "typeswitch expression",
        CaseClause => "case clause",
        DefaultCaseClause => "default case clause",
        IfExpr => "if expression",
        TryCatchExpr => "try/catch expression",
        TryClause => "try clause",
        CatchClause => "catch clause",
        CatchErrorList => "catch error list",

        OrExpr => "or expression",
        AndExpr => "and expression",
        ComparisonExpr => "comparison expression",
        StringConcatExpr => "string concatenation",
        RangeExpr => "range expression",
        AdditiveExpr => "additive expression",
        MultiplicativeExpr => "multiplicative expression",
        UnionExpr => "union expression",
        IntersectExceptExpr => "intersect/except expression",
        InstanceofExpr => "instance of expression",
        TreatExpr => "treat expression",
        CastableExpr => "castable expression",
        CastExpr => "cast expression",
        ArrowExpr => "arrow expression",
        UnaryExpr => "unary expression",
        ValidateExpr => "validate expression",
        ExtensionExpr => "extension expression",
        Pragma => "pragma",
        SimpleMapExpr => "simple map expression",
        PathExpr => "path expression",
        RelativePathExpr => "relative path expression",
        AxisStep => "axis step",
        NameTest => "name test",
        Wildcard => "wildcard",
        PostfixExpr => "postfix expression",
        Predicate => "predicate",
        ArgumentList => "argument list",
        ArgumentPlaceholder => "argument placeholder",
        Lookup => "lookup",
        UnaryLookup => "unary lookup",

        NumericLiteral => "numeric literal",
        StringLiteral => "string literal",
        VarRef => "variable reference",
        ParenthesizedExpr => "parenthesized expression",
        ContextItemExpr => "context item expression",
        FunctionCall => "function call",
        OrderedExpr => "ordered expression",
        UnorderedExpr => "unordered expression",
        NamedFunctionRef => "named function reference",
        InlineFunctionExpr => "inline function expression",
        MapConstructor => "map constructor",
        MapConstructorEntry => "map constructor entry",
        SquareArrayConstructor => "square array constructor",
        CurlyArrayConstructor => "curly array constructor",
        StringConstructor => "string constructor",
        StringConstructorInterpolation => "string constructor interpolation",
        QName => "QName",
        URIQualifiedName => "URI-qualified name",
        BracedURILiteral => "braced URI literal",

        DirElemConstructor => "direct element constructor",
        DirAttribute => "direct attribute",
        DirAttributeValue => "direct attribute value",
        DirCommentConstructor => "direct comment constructor",
        CDataSection => "CDATA section",
        DirPIConstructor => "direct processing instruction constructor",
        CompDocConstructor => "computed document constructor",
        CompElemConstructor => "computed element constructor",
        CompAttrConstructor => "computed attribute constructor",
        CompNamespaceConstructor => "computed namespace constructor",
        CompTextConstructor => "computed text constructor",
        CompCommentConstructor => "computed comment constructor",
        CompPIConstructor => "computed processing instruction constructor",

        SequenceType => "sequence type",
        EmptySequenceType => "empty-sequence()",
        AnyItemType => "item()",
        AtomicOrUnionType => "atomic or union type",
        ParenthesizedItemType => "parenthesized item type",
        SingleType => "single type",
        AnyKindTest => "node()",
        DocumentTest => "document-node test",
        TextTest => "text()",
        CommentTest => "comment()",
        NamespaceNodeTest => "namespace-node()",
        PITest => "processing-instruction test",
        AttributeTest => "attribute test",
        SchemaAttributeTest => "schema-attribute test",
        ElementTest => "element test",
        SchemaElementTest => "schema-element test",
        FunctionTest => "function test",
        MapTest => "map test",
        ArrayTest => "array test",

        FTContainsExpr => "full-text contains expression",
        FTSelection => "full-text selection",
        FTOr => "ftor",
        FTAnd => "ftand",
        FTMildNot => "not in",
        FTUnaryNot => "ftnot",
        FTPrimaryWithOptions => "full-text primary",
        FTWords => "full-text words",
        FTAnyallOption => "any/all option",
        FTTimes => "occurs times",
        FTRange => "full-text range",
        FTOrder => "ordered filter",
        FTWindow => "window filter",
        FTDistance => "distance filter",
        FTScope => "scope filter",
        FTContent => "content filter",
        FTMatchOptions => "match options",
        FTLanguageOption => "language option",
        FTWildCardOption => "wildcards option",
        FTThesaurusOption => "thesaurus option",
        FTThesaurusID => "thesaurus id",
        FTStemOption => "stemming option",
        FTStopWordOption => "stop words option",
        FTStopWords => "stop words",
        FTCaseOption => "case option",
        FTDiacriticsOption => "diacritics option",
        FTExtensionOption => "extension option",
        FTWeight => "weight",
        FTIgnoreOption => "without content",
        FTExtensionSelection => "full-text extension selection",

        InsertExpr => "insert expression",
        InsertTarget => "insert target",
        DeleteExpr => "delete expression",
        ReplaceExpr => "replace expression",
        RenameExpr => "rename expression",
        CopyModifyExpr => "copy/modify expression",
        CopyBinding => "copy binding",
        TransformWithExpr => "transform with expression",
        DynamicUpdatingFunctionCall => "dynamic updating function call",

        ApplyStatement => "apply statement",
        AssignStatement => "assignment statement",
        BlockStatement => "block statement",
        BlockExpr => "block expression",
        BreakStatement => "break statement",
        ContinueStatement => "continue statement",
        ExitStatement => "exit statement",
        VarDeclStatement => "variable declaration statement",
        WhileStatement => "while statement",

        BinaryConstructor => "binary constructor",
        ObjectNodeConstructor => "object-node constructor",
        ObjectNodeEntry => "object-node entry",
        ArrayNodeConstructor => "array-node constructor",
        NumberNodeConstructor => "number-node constructor",
        BooleanNodeConstructor => "boolean-node constructor",
        NullNodeConstructor => "null-node constructor",
        BinaryTest => "binary()",
        ObjectNodeTest => "object-node test",
        ArrayNodeTest => "array-node test",
        NumberNodeTest => "number-node test",
        BooleanNodeTest => "boolean-node test",
        NullNodeTest => "null-node()",

        TupleType => "tuple type",
        TupleField => "tuple field",
        UnionType => "union type",
        TypeAlias => "type alias",
        ContextItemFunctionExpr => "context item function",

        UpdateExpr => "update expression",
    }
}

use SyntaxKind::*;

/// Coarse classification of a kind, for consumers such as highlighters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindCategory {
    Punctuation,
    Name,
    Literal,
    Markup,
    Trivia,
    Sentinel,
    Node,
}

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Whitespace | Comment | XQDocStart | XQDocContents | XQDocTag | XQDocVariable | XQDocEnd
        )
    }

    /// Malformed-input sentinels. Each one carries a lexical diagnostic.
    #[inline]
    pub fn is_lexical_error(self) -> bool {
        matches!(
            self,
            BadCharacter
                | PartialEntityRef
                | EmptyEntityRef
                | UnexpectedEndOfBlock
                | UnterminatedComment
                | IncompleteExponent
        )
    }

    #[inline]
    pub fn is_token(self) -> bool {
        self < Error
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self >= Error && self < __LAST
    }

    pub fn category(self) -> KindCategory {
        if self.is_trivia() {
            return KindCategory::Trivia;
        }
        if self.is_lexical_error() {
            return KindCategory::Sentinel;
        }
        if self.is_node() {
            return KindCategory::Node;
        }
        match self {
            NCName | Keyword => KindCategory::Name,
            IntegerLiteral
            | DecimalLiteral
            | DoubleLiteral
            | StringLiteralStart
            | StringLiteralContents
            | StringLiteralEnd
            | EscapedQuote
            | PredefinedEntityRef
            | CharRef
            | BracedUriStart
            | BracedUriContents
            | BracedUriEnd
            | StringConstructorStart
            | StringConstructorContents
            | StringInterpolationOpen
            | StringInterpolationClose
            | StringConstructorEnd => KindCategory::Literal,
            DirElemOpen | DirTagClose | DirSelfClose | DirEndTagOpen | DirEndTagClose
            | DirAttrValueStart | DirAttrValueContents | DirAttrValueEnd | DirElemText
            | DirBraceEscape | DirCommentStart | DirCommentContents | DirCommentEnd
            | CDataStart | CDataContents | CDataEnd | DirPiStart | DirPiContents | DirPiEnd
            | PragmaStart | PragmaContents | PragmaEnd => KindCategory::Markup,
            _ => KindCategory::Punctuation,
        }
    }

    /// Converts a raw discriminant back into a kind, if it names one.
    pub fn from_raw(raw: u16) -> Option<SyntaxKind> {
        if raw < __LAST as u16 {
            // SAFETY: in bounds, and SyntaxKind is repr(u16) with contiguous discriminants
            Some(unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
        } else {
            None
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// 128-bit set of token kinds for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0
                && let Some(kind) = SyntaxKind::from_raw(i)
            {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const TRIVIA: TokenSet = TokenSet::new(&[
        Whitespace,
        Comment,
        XQDocStart,
        XQDocContents,
        XQDocTag,
        XQDocVariable,
        XQDocEnd,
    ]);

    pub const GENERAL_COMPARISON: TokenSet = TokenSet::new(&[
        Equal,
        NotEqual,
        LessThan,
        LessEqual,
        GreaterThan,
        GreaterEqual,
    ]);

    pub const NODE_COMPARISON: TokenSet = TokenSet::new(&[NodePrecedes, NodeFollows]);

    pub const NUMERIC_LITERALS: TokenSet =
        TokenSet::new(&[IntegerLiteral, DecimalLiteral, DoubleLiteral]);

    pub const OCCURRENCE: TokenSet = TokenSet::new(&[Question, Star, Plus]);

    /// Closing brackets of enclosing constructs; error scans never swallow these.
    pub const CLOSERS: TokenSet = TokenSet::new(&[
        ParenClose,
        BracketClose,
        BraceClose,
        StringInterpolationClose,
        PragmaEnd,
        DirEndTagOpen,
    ]);

    /// Resynchronization points for a declaration or statement-level error scan.
    pub const DECL_RECOVERY: TokenSet = TokenSet::new(&[Semicolon]);

    /// Tokens after which an expression operand is still expected.
    pub const EXPR_END: TokenSet = TokenSet::new(&[
        Comma,
        Semicolon,
        ParenClose,
        BracketClose,
        BraceClose,
        StringInterpolationClose,
    ]);
}
