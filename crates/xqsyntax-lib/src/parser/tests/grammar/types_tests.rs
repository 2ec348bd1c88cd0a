use crate::parser::tests::{dump, first_node, node_kinds, parse_clean};
use crate::{Dialect, SyntaxKind};

#[test]
fn instance_of_sequence_type() {
    insta::assert_snapshot!(dump("$x instance of element()*"), @r#"
    Module
      MainModule
        QueryBody
          InstanceofExpr
            VarRef
              Dollar "$"
              QName
                NCName "x"
            Keyword "instance"
            Keyword "of"
            SequenceType
              ElementTest
                Keyword "element"
                ParenOpen "("
                ParenClose ")"
              Star "*"
    "#);
}

#[test]
fn kind_tests() {
    let parse = parse_clean(
        "$x treat as document-node(element(a, xs:untyped?)), \
         $y instance of attribute(*), \
         $z instance of processing-instruction('pi'), \
         $w instance of schema-element(s) | text()",
        Dialect::XQUERY,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::DocumentTest,
        SyntaxKind::ElementTest,
        SyntaxKind::AttributeTest,
        SyntaxKind::PITest,
        SyntaxKind::SchemaElementTest,
        SyntaxKind::TextTest,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn function_map_and_array_types() {
    let parse = parse_clean(
        "$f instance of function(xs:string) as item()*, \
         $g instance of function(*), \
         $m instance of map(xs:string, array(*)), \
         $e instance of empty-sequence()",
        Dialect::XQUERY,
    );
    let kinds = node_kinds(&parse);
    for kind in [
        SyntaxKind::FunctionTest,
        SyntaxKind::AnyItemType,
        SyntaxKind::MapTest,
        SyntaxKind::ArrayTest,
        SyntaxKind::EmptySequenceType,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn document_test_requires_element_test() {
    let parse = crate::parse("$x instance of document-node(text())", Dialect::XQUERY);
    let diags = parse.diagnostics().as_slice();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message(), "expected a type: element test");
    assert!(first_node(&parse, SyntaxKind::DocumentTest).is_some());
}
