use crate::parser::tests::{dump, first_node, node_kinds, parse_clean};
use crate::{Dialect, SyntaxKind};

#[test]
fn self_closing_element() {
    insta::assert_snapshot!(dump("<a/>"), @r#"
    Module
      MainModule
        QueryBody
          DirElemConstructor
            DirElemOpen "<"
            NCName "a"
            DirSelfClose "/>"
    "#);
}

#[test]
fn element_with_attribute_and_enclosed_content() {
    insta::assert_snapshot!(dump(r#"<a x="1">t{$y}</a>"#), @r#"
    Module
      MainModule
        QueryBody
          DirElemConstructor
            DirElemOpen "<"
            NCName "a"
            DirAttribute
              NCName "x"
              Equal "="
              DirAttributeValue
                DirAttrValueStart "\""
                DirAttrValueContents "1"
                DirAttrValueEnd "\""
            DirTagClose ">"
            DirElemText "t"
            EnclosedExpr
              BraceOpen "{"
              VarRef
                Dollar "$"
                QName
                  NCName "y"
              BraceClose "}"
            DirEndTagOpen "</"
            NCName "a"
            DirEndTagClose ">"
    "#);
}

#[test]
fn nested_markup() {
    let parse = parse_clean(
        "<a><!-- note --><![CDATA[<raw>]]><?pi data?><b>&amp;&#x41;</b></a>",
        Dialect::XQUERY,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::DirCommentConstructor,
        SyntaxKind::CDataSection,
        SyntaxKind::DirPIConstructor,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
    let elements = kinds
        .iter()
        .filter(|k| **k == SyntaxKind::DirElemConstructor)
        .count();
    assert_eq!(elements, 2);
}

#[test]
fn mismatched_end_tag() {
    let parse = crate::parse("<a></b>", Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind(), crate::DiagnosticKind::MismatchedEndTag);
    assert_eq!(diags[0].message(), "expected end tag `a`");
    assert_eq!(u32::from(diags[0].range().start()), 5);
    assert_eq!(diags[0].related()[0].message(), "start tag");
}

#[test]
fn computed_constructors() {
    let parse = parse_clean(
        r#"element e { attribute a { 1 }, text { "t" } }, element { "n" } { () }, document { comment { "c" } }"#,
        Dialect::XQUERY,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::CompElemConstructor,
        SyntaxKind::CompAttrConstructor,
        SyntaxKind::CompTextConstructor,
        SyntaxKind::CompDocConstructor,
        SyntaxKind::CompCommentConstructor,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn constructor_keyword_without_body_is_a_name() {
    let parse = parse_clean("element", Dialect::XQUERY);
    let step = first_node(&parse, SyntaxKind::AxisStep).unwrap();
    assert_eq!(step.text().to_string(), "element");
}
