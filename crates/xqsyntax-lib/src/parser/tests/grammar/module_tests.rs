use indoc::indoc;

use crate::parser::tests::{child_kinds, dump, first_node, parse_clean};
use crate::{Dialect, DiagnosticKind, SyntaxKind, parse};

#[test]
fn empty_input() {
    insta::assert_snapshot!(dump(""), @"Module");
}

#[test]
fn version_and_prolog() {
    insta::assert_snapshot!(dump(r#"xquery version "3.1"; declare namespace p = "u"; 1"#), @r#"
    Module
      VersionDecl
        Keyword "xquery"
        Keyword "version"
        StringLiteral
          StringLiteralStart "\""
          StringLiteralContents "3.1"
          StringLiteralEnd "\""
        Semicolon ";"
      MainModule
        Prolog
          NamespaceDecl
            Keyword "declare"
            Keyword "namespace"
            NCName "p"
            Equal "="
            StringLiteral
              StringLiteralStart "\""
              StringLiteralContents "u"
              StringLiteralEnd "\""
          Semicolon ";"
        QueryBody
          NumericLiteral
            IntegerLiteral "1"
    "#);
}

#[test]
fn library_module() {
    let parse = parse_clean(
        indoc! {r#"
            module namespace m = "urn:m";
            import module namespace o = "urn:o" at "o.xq";
            declare %private function m:f($a as xs:string) as xs:string { $a };
        "#},
        Dialect::XQUERY,
    );
    let library = first_node(&parse, SyntaxKind::LibraryModule).unwrap();
    assert_eq!(
        child_kinds(&library),
        [SyntaxKind::ModuleDecl, SyntaxKind::Prolog]
    );
    let prolog = first_node(&parse, SyntaxKind::Prolog).unwrap();
    assert_eq!(
        child_kinds(&prolog),
        [SyntaxKind::ModuleImport, SyntaxKind::FunctionDecl]
    );
}

#[test]
fn every_setter_parses() {
    let parse = parse_clean(
        indoc! {r#"
            declare boundary-space preserve;
            declare default collation "http://c";
            declare base-uri "http://b";
            declare construction strip;
            declare ordering unordered;
            declare default order empty least;
            declare copy-namespaces no-preserve, inherit;
            declare decimal-format d decimal-separator = "," grouping-separator = ".";
            declare default element namespace "http://e";
            declare context item as node() := .;
            declare variable $v as xs:integer external := 3;
            declare option o "value";
            $v
        "#},
        Dialect::XQUERY,
    );
    let prolog = first_node(&parse, SyntaxKind::Prolog).unwrap();
    let decls: Vec<_> = child_kinds(&prolog);
    assert_eq!(
        decls,
        [
            SyntaxKind::BoundarySpaceDecl,
            SyntaxKind::DefaultCollationDecl,
            SyntaxKind::BaseUriDecl,
            SyntaxKind::ConstructionDecl,
            SyntaxKind::OrderingModeDecl,
            SyntaxKind::EmptyOrderDecl,
            SyntaxKind::CopyNamespacesDecl,
            SyntaxKind::DecimalFormatDecl,
            SyntaxKind::DefaultNamespaceDecl,
            SyntaxKind::ContextItemDecl,
            SyntaxKind::VarDecl,
            SyntaxKind::OptionDecl,
        ]
    );
}

#[test]
fn header_declaration_after_body_declaration() {
    let source = r#"declare variable $x := 1; declare namespace p = "u"; $x"#;
    let parse = parse(source, Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), DiagnosticKind::MisplacedHeaderDecl);
    assert_eq!(&source[diags[0].range()], r#"declare namespace p = "u""#);
    assert_eq!(
        diags[0].message(),
        "namespace declaration must precede body declarations"
    );
    // The declaration is kept in the tree.
    assert!(first_node(&parse, SyntaxKind::NamespaceDecl).is_some());
}

#[test]
fn unknown_declaration() {
    let source = "declare foo bar baz; 1";
    let parse = parse(source, Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), DiagnosticKind::UnknownDeclaration);
    assert_eq!(diags[0].message(), "unknown declaration `foo`");
    assert_eq!(&source[diags[0].range()], "foo");
    let error = first_node(&parse, SyntaxKind::Error).unwrap();
    assert_eq!(error.text().to_string(), "declare foo bar baz");
    assert!(first_node(&parse, SyntaxKind::QueryBody).is_some());
}

#[test]
fn declare_as_element_name() {
    // `declare` followed by an operator is a path step, not a declaration.
    let parse = parse_clean("declare or 1", Dialect::XQUERY);
    assert!(first_node(&parse, SyntaxKind::Prolog).is_none());
    assert!(first_node(&parse, SyntaxKind::OrExpr).is_some());
}
