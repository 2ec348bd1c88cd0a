//! Modules, the prolog and its declarations.

use rowan::{TextRange, TextSize};

use crate::config::Dialect;
use crate::diagnostics::DiagnosticKind;
use crate::parser::Parsed;
use crate::parser::core::Parser;
use crate::syntax::{Keyword, SyntaxKind};

/// Setters, imports and namespace declarations. They must precede every body declaration.
const HEADER_DECLS: &[SyntaxKind] = &[
    SyntaxKind::DefaultNamespaceDecl,
    SyntaxKind::BoundarySpaceDecl,
    SyntaxKind::DefaultCollationDecl,
    SyntaxKind::BaseUriDecl,
    SyntaxKind::ConstructionDecl,
    SyntaxKind::OrderingModeDecl,
    SyntaxKind::EmptyOrderDecl,
    SyntaxKind::CopyNamespacesDecl,
    SyntaxKind::DecimalFormatDecl,
    SyntaxKind::SchemaImport,
    SyntaxKind::ModuleImport,
    SyntaxKind::NamespaceDecl,
    SyntaxKind::FTOptionDecl,
    SyntaxKind::RevalidationDecl,
];

const BODY_DECLS: &[SyntaxKind] = &[
    SyntaxKind::ContextItemDecl,
    SyntaxKind::VarDecl,
    SyntaxKind::FunctionDecl,
    SyntaxKind::OptionDecl,
    SyntaxKind::TypeDecl,
];

const DECIMAL_FORMAT_PROPERTIES: &[Keyword] = &[
    Keyword::DecimalSeparator,
    Keyword::GroupingSeparator,
    Keyword::Infinity,
    Keyword::MinusSign,
    Keyword::NaN,
    Keyword::Percent,
    Keyword::PerMille,
    Keyword::ZeroDigit,
    Keyword::Digit,
    Keyword::PatternSeparator,
    Keyword::ExponentSeparator,
];

/// Names that make `declare name` an operator expression on a `declare` element.
const OPERATOR_KEYWORDS: &[Keyword] = &[
    Keyword::And,
    Keyword::Or,
    Keyword::Eq,
    Keyword::Ne,
    Keyword::Lt,
    Keyword::Le,
    Keyword::Gt,
    Keyword::Ge,
    Keyword::Is,
    Keyword::Div,
    Keyword::Idiv,
    Keyword::Mod,
    Keyword::To,
    Keyword::Union,
    Keyword::Intersect,
    Keyword::Except,
    Keyword::Instance,
    Keyword::Treat,
    Keyword::Cast,
    Keyword::Castable,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrologState {
    NotMatched,
    Header,
    Body,
    Unknown,
}

impl Parser<'_> {
    /// Children of the root `Module` node. MarkLogic allows several modules separated by
    /// `;`, one per transaction.
    pub(crate) fn module_root(&mut self) {
        self.module();
        while self.dialect.contains(Dialect::MARKLOGIC) && self.eat(SyntaxKind::Semicolon) {
            if self.eof() {
                break;
            }
            self.module();
        }
        if self.eof() {
            return;
        }
        self.error_msg(DiagnosticKind::UnexpectedToken, self.current().name());
        let m = self.mark();
        while !self.eof() {
            self.bump();
        }
        m.done(self, SyntaxKind::Error);
    }

    fn module(&mut self) {
        self.version_decl();
        if self.at_kw(Keyword::Module) && self.nth_at_kw(1, Keyword::Namespace) {
            self.library_module();
        } else {
            let _ = self.main_module();
        }
    }

    /// `xquery version "3.1" encoding "utf-8";` or `xquery encoding "utf-8";`
    fn version_decl(&mut self) {
        if !self.at_kw(Keyword::Xquery)
            || !(self.nth_at_kw(1, Keyword::Version) || self.nth_at_kw(1, Keyword::Encoding))
        {
            return;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Xquery);
        if self.eat_kw(Keyword::Version) {
            let _ = self.string_literal_or_error();
            if self.eat_kw(Keyword::Encoding) {
                let _ = self.string_literal_or_error();
            }
        } else {
            self.bump_kw(Keyword::Encoding);
            let _ = self.string_literal_or_error();
        }
        self.expect(SyntaxKind::Semicolon);
        m.done(self, SyntaxKind::VersionDecl);
    }

    fn library_module(&mut self) {
        let m = self.mark();
        let decl = self.mark();
        self.bump_kw(Keyword::Module);
        self.bump_kw(Keyword::Namespace);
        self.expect_ncname();
        self.expect(SyntaxKind::Equal);
        let _ = self.uri_literal();
        self.expect(SyntaxKind::Semicolon);
        decl.done(self, SyntaxKind::ModuleDecl);
        self.prolog();
        m.done(self, SyntaxKind::LibraryModule);
    }

    fn main_module(&mut self) -> Parsed {
        let m = self.mark();
        let has_prolog = self.prolog();
        if !self.call_hook(|h| &h.query_body).is_matched() {
            if !has_prolog {
                return m.rollback_declined(self);
            }
            self.error(DiagnosticKind::ExpectedExpression);
        }
        m.complete(self, SyntaxKind::MainModule)
    }

    pub(crate) fn query_body(&mut self) -> Parsed {
        let m = self.mark();
        if !self.expr().is_matched() {
            return m.rollback_declined(self);
        }
        m.complete(self, SyntaxKind::QueryBody)
    }

    // ---------------------------------------------------------------------------------
    // Prolog

    /// Declarations up to the query body. Returns whether a `Prolog` node was produced.
    fn prolog(&mut self) -> bool {
        let m = self.mark();
        let mut state = PrologState::NotMatched;
        loop {
            let start = self.current_span().start();
            if self.call_hook(|h| &h.prolog_decl).is_matched() {
                let kind = self.last_done.unwrap_or(SyntaxKind::Error);
                state = self.check_decl_order(state, kind, start);
                self.expect(SyntaxKind::Semicolon);
            } else if self.at_unknown_decl() {
                self.unknown_decl();
                if state == PrologState::NotMatched {
                    state = PrologState::Unknown;
                }
                self.eat(SyntaxKind::Semicolon);
            } else if self.at(SyntaxKind::Semicolon) && state != PrologState::NotMatched {
                self.error_and_bump(DiagnosticKind::UnexpectedToken, Some("`;`"));
            } else {
                break;
            }
        }
        if state == PrologState::NotMatched {
            m.drop(self);
            return false;
        }
        m.done(self, SyntaxKind::Prolog);
        true
    }

    fn check_decl_order(
        &mut self,
        state: PrologState,
        kind: SyntaxKind,
        start: TextSize,
    ) -> PrologState {
        if HEADER_DECLS.contains(&kind) {
            if state != PrologState::Body {
                return PrologState::Header;
            }
            let range = TextRange::new(start, self.last_end);
            if let Some(d) = self.report(DiagnosticKind::MisplacedHeaderDecl, range) {
                d.message(kind.name()).emit();
            }
            return PrologState::Body;
        }
        if BODY_DECLS.contains(&kind) {
            return PrologState::Body;
        }
        match state {
            PrologState::NotMatched => PrologState::Unknown,
            other => other,
        }
    }

    /// `declare name` that no declaration production accepted.
    fn at_unknown_decl(&self) -> bool {
        self.at_kw(Keyword::Declare)
            && self.nth_at(1, SyntaxKind::NCName)
            && !OPERATOR_KEYWORDS.iter().any(|&kw| self.nth_at_kw(1, kw))
    }

    fn unknown_decl(&mut self) {
        let name = self.nth_text(1).to_owned();
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        let range = self.current_span();
        self.bump();
        if let Some(d) = self.report(DiagnosticKind::UnknownDeclaration, range) {
            d.message(name).emit();
        }
        while !self.eof() && !self.at(SyntaxKind::Semicolon) && !self.at_decl_start() {
            self.bump();
        }
        m.done(self, SyntaxKind::Error);
    }

    pub(crate) fn prolog_decl(&mut self) -> Parsed {
        if self.at_kw(Keyword::Import) {
            if self.nth_at_kw(1, Keyword::Schema) {
                return self.schema_import();
            }
            if self.nth_at_kw(1, Keyword::Module) {
                return self.module_import();
            }
            return Parsed::NotMatched;
        }
        if !self.at_kw(Keyword::Declare) {
            return Parsed::NotMatched;
        }
        if self.nth_at_kw(1, Keyword::Default) {
            return self.default_decl();
        }
        let kw = Keyword::lookup(self.nth_text(1)).filter(|_| self.nth_at(1, SyntaxKind::NCName));
        let Some(kw) = kw else {
            return self.annotated_decl();
        };
        match kw {
            Keyword::BoundarySpace => self.setter(
                SyntaxKind::BoundarySpaceDecl,
                &[Keyword::Preserve, Keyword::Strip],
            ),
            Keyword::Construction => self.setter(
                SyntaxKind::ConstructionDecl,
                &[Keyword::Strip, Keyword::Preserve],
            ),
            Keyword::Ordering => self.setter(
                SyntaxKind::OrderingModeDecl,
                &[Keyword::Ordered, Keyword::Unordered],
            ),
            Keyword::BaseUri => self.uri_setter(SyntaxKind::BaseUriDecl),
            Keyword::CopyNamespaces => self.copy_namespaces_decl(),
            Keyword::DecimalFormat => self.decimal_format_decl(),
            Keyword::Namespace => self.namespace_decl(),
            Keyword::Context => self.context_item_decl(),
            Keyword::Option => self.option_decl(),
            _ => self.annotated_decl(),
        }
    }

    /// `declare <name> mode`, where the mode is one of `modes`.
    fn setter(&mut self, kind: SyntaxKind, modes: &[Keyword]) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_remap(SyntaxKind::Keyword);
        self.one_of(modes);
        m.complete(self, kind)
    }

    pub(crate) fn one_of(&mut self, modes: &[Keyword]) -> bool {
        match modes.iter().find(|&&kw| self.at_kw(kw)) {
            Some(&kw) => {
                self.bump_kw(kw);
                true
            }
            None => {
                let expected: Vec<String> = modes.iter().map(ToString::to_string).collect();
                self.error_msg(DiagnosticKind::ExpectedToken, expected.join(" or "));
                false
            }
        }
    }

    fn uri_setter(&mut self, kind: SyntaxKind) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_remap(SyntaxKind::Keyword);
        let _ = self.uri_literal();
        m.complete(self, kind)
    }

    /// Declarations spelled `declare default ...`.
    fn default_decl(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::Default);
        let kind = if self.eat_kw(Keyword::Element) || self.eat_kw(Keyword::Function) {
            self.expect_kw(Keyword::Namespace);
            let _ = self.uri_literal();
            SyntaxKind::DefaultNamespaceDecl
        } else if self.eat_kw(Keyword::Collation) {
            let _ = self.uri_literal();
            SyntaxKind::DefaultCollationDecl
        } else if self.eat_kw(Keyword::Order) {
            self.expect_kw(Keyword::Empty);
            self.one_of(&[Keyword::Greatest, Keyword::Least]);
            SyntaxKind::EmptyOrderDecl
        } else if self.eat_kw(Keyword::DecimalFormat) {
            self.decimal_format_properties();
            SyntaxKind::DecimalFormatDecl
        } else {
            return m.rollback_declined(self);
        };
        m.complete(self, kind)
    }

    fn copy_namespaces_decl(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::CopyNamespaces);
        self.one_of(&[Keyword::Preserve, Keyword::NoPreserve]);
        if self.expect(SyntaxKind::Comma) {
            self.one_of(&[Keyword::Inherit, Keyword::NoInherit]);
        }
        m.complete(self, SyntaxKind::CopyNamespacesDecl)
    }

    fn decimal_format_decl(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::DecimalFormat);
        let _ = self.eq_name_or_error();
        self.decimal_format_properties();
        m.complete(self, SyntaxKind::DecimalFormatDecl)
    }

    fn decimal_format_properties(&mut self) {
        while let Some(&kw) = DECIMAL_FORMAT_PROPERTIES
            .iter()
            .find(|&&kw| self.at_kw(kw) && self.nth_at(1, SyntaxKind::Equal))
        {
            let p = self.mark();
            self.bump_kw(kw);
            self.bump();
            let _ = self.string_literal_or_error();
            p.done(self, SyntaxKind::DecimalFormatProperty);
        }
    }

    /// `import schema (namespace p = | default element namespace)? "uri" (at "hint")?`
    fn schema_import(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Import);
        self.bump_kw(Keyword::Schema);
        if self.at_kw(Keyword::Namespace) {
            let prefix = self.mark();
            self.bump_kw(Keyword::Namespace);
            self.expect_ncname();
            self.expect(SyntaxKind::Equal);
            prefix.done(self, SyntaxKind::SchemaPrefix);
        } else if self.at_kw(Keyword::Default) {
            let prefix = self.mark();
            self.bump_kw(Keyword::Default);
            self.expect_kw(Keyword::Element);
            self.expect_kw(Keyword::Namespace);
            prefix.done(self, SyntaxKind::SchemaPrefix);
        }
        let _ = self.uri_literal();
        self.location_hints();
        m.complete(self, SyntaxKind::SchemaImport)
    }

    fn module_import(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Import);
        self.bump_kw(Keyword::Module);
        if self.eat_kw(Keyword::Namespace) {
            self.expect_ncname();
            self.expect(SyntaxKind::Equal);
        }
        let _ = self.uri_literal();
        self.location_hints();
        m.complete(self, SyntaxKind::ModuleImport)
    }

    fn namespace_decl(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::Namespace);
        self.expect_ncname();
        self.expect(SyntaxKind::Equal);
        let _ = self.uri_literal();
        m.complete(self, SyntaxKind::NamespaceDecl)
    }

    fn context_item_decl(&mut self) -> Parsed {
        if !self.nth_at_kw(2, Keyword::Item) {
            return Parsed::NotMatched;
        }
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::Context);
        self.bump_kw(Keyword::Item);
        if self.eat_kw(Keyword::As) {
            let _ = self.item_type_or_error();
        }
        self.initializer();
        m.complete(self, SyntaxKind::ContextItemDecl)
    }

    /// `:= value`, `external` or `external := default`.
    fn initializer(&mut self) {
        if self.eat(SyntaxKind::Assign) {
            let _ = self.expr_single_or_error();
        } else if self.eat_kw(Keyword::External) {
            if self.eat(SyntaxKind::Assign) {
                let _ = self.expr_single_or_error();
            }
        } else {
            self.error_msg(DiagnosticKind::ExpectedToken, "`:=` or `external`");
        }
    }

    fn option_decl(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        self.bump_kw(Keyword::Option);
        let _ = self.eq_name_or_error();
        let _ = self.string_literal_or_error();
        m.complete(self, SyntaxKind::OptionDecl)
    }

    /// `declare %a variable ...` or `declare %a function ...`. Declines when neither
    /// keyword follows and no annotation was written.
    fn annotated_decl(&mut self) -> Parsed {
        let m = self.mark();
        self.bump_kw(Keyword::Declare);
        let annotated = self.annotations();
        if self.at_kw(Keyword::Variable) {
            self.bump_kw(Keyword::Variable);
            let _ = self.var_name();
            let _ = self.type_declaration();
            self.initializer();
            return m.complete(self, SyntaxKind::VarDecl);
        }
        if self.at_kw(Keyword::Function) {
            self.bump_kw(Keyword::Function);
            let _ = self.eq_name_or_error();
            self.param_list();
            let _ = self.type_declaration();
            if !self.eat_kw(Keyword::External) {
                self.function_body();
            }
            return m.complete(self, SyntaxKind::FunctionDecl);
        }
        if !annotated {
            return m.rollback_declined(self);
        }
        self.error_msg(DiagnosticKind::ExpectedToken, "`variable` or `function`");
        m.complete(self, SyntaxKind::Error)
    }

    /// `%name` or `%name("literal", 1)` annotations. Update 1.0 spells `updating` and
    /// MarkLogic spells `private` without the `%`. Returns whether any were present.
    pub(crate) fn annotations(&mut self) -> bool {
        let mut any = false;
        loop {
            if self.at(SyntaxKind::Percent) {
                self.annotation();
            } else if let Some(kw) = self.bare_annotation() {
                let m = self.mark();
                self.bump_kw(kw);
                m.done(self, SyntaxKind::Annotation);
            } else {
                return any;
            }
            any = true;
        }
    }

    fn bare_annotation(&self) -> Option<Keyword> {
        let kw = if self.dialect.contains(Dialect::UPDATE) && self.at_kw(Keyword::Updating) {
            Keyword::Updating
        } else if self.dialect.contains(Dialect::MARKLOGIC) && self.at_kw(Keyword::Private) {
            Keyword::Private
        } else {
            return None;
        };
        let decl_follows = self.nth_at_kw(1, Keyword::Function)
            || self.nth_at_kw(1, Keyword::Variable)
            || self.nth_at(1, SyntaxKind::Percent);
        decl_follows.then_some(kw)
    }

    fn annotation(&mut self) {
        let m = self.mark();
        self.bump();
        let _ = self.eq_name_or_error();
        if self.eat(SyntaxKind::ParenOpen) {
            self.annotation_literal();
            while self.eat(SyntaxKind::Comma) {
                self.annotation_literal();
            }
            self.expect_closing(SyntaxKind::ParenClose);
        }
        m.done(self, SyntaxKind::Annotation);
    }

    fn annotation_literal(&mut self) {
        let literal = self.string_literal().or_else(|| self.numeric_literal());
        if !literal.is_matched() {
            self.error_msg(DiagnosticKind::ExpectedToken, "literal");
        }
    }

    /// `( $a as T, $b )`
    pub(crate) fn param_list(&mut self) {
        let m = self.mark();
        if self.expect(SyntaxKind::ParenOpen) {
            if self.at(SyntaxKind::Dollar) {
                self.param();
                while self.eat(SyntaxKind::Comma) {
                    self.param();
                }
            }
            self.expect_closing(SyntaxKind::ParenClose);
        }
        m.done(self, SyntaxKind::ParamList);
    }

    fn param(&mut self) {
        let m = self.mark();
        let _ = self.var_name();
        let _ = self.type_declaration();
        m.done(self, SyntaxKind::Param);
    }

    /// Braced function body. Under scripting it holds a statement sequence.
    pub(crate) fn function_body(&mut self) {
        if !self.at(SyntaxKind::BraceOpen) {
            self.error_msg(DiagnosticKind::ExpectedToken, SyntaxKind::BraceOpen.name());
            return;
        }
        let m = self.mark();
        self.bump();
        if self.dialect.contains(Dialect::SCRIPTING) {
            self.block_contents();
        } else {
            let _ = self.expr();
        }
        self.expect_closing(SyntaxKind::BraceClose);
        m.done(self, SyntaxKind::FunctionBody);
    }
}
