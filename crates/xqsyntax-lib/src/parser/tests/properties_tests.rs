use proptest::prelude::*;
use rowan::{TextRange, TextSize};

use crate::config::{Dialect, ParseOptions};
use crate::lexer::tokenize;
use crate::parser::{parse, parse_with};
use crate::syntax::SyntaxElement;

fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "for $x in ", "let $y := ", " return ", " where ", "if (", ") then ", " else ",
        "declare variable $v := 1;", "declare function f() { 1 };", "import module \"m\";",
        "declare namespace p = \"u\";", "<a>", "</a>", "<b x='{1}'/>", "{", "}", "(", ")",
        "[", "]", ",", ";", " + ", " = ", " || ", "!", "/", "//", "@id", "map {", "\"s\"",
        "1", "2.5", "$x", "f(", "#1", " contains text ", " ftand ", "insert node ",
        " into ", "delete node ", "while (", "variable $z := ", "object-node {", "catch ($e)",
        "try {", "tuple(", "~t", ".{", " update ", "(: c :)", "``[", "`{", "}`", "]``",
        "&amp;", "<!--", "-->", "typeswitch (", "case ", "default ", " instance of ",
        "element()", "xs:integer", "?", "*", " ", "\n",
    ])
}

fn query_like() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::collection::vec(fragment(), 0..32).prop_map(|parts| parts.concat()),
        1 => "\\PC{0,48}",
    ]
}

fn dialect() -> impl Strategy<Value = Dialect> {
    (0u8..64).prop_map(Dialect::from_bits_truncate)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn tree_covers_the_whole_input(source in query_like(), dialect in dialect()) {
        let parse = parse(&source, dialect);
        let root = parse.syntax();
        prop_assert_eq!(root.text().to_string(), source.as_str());
        prop_assert_eq!(
            root.text_range(),
            TextRange::up_to(TextSize::of(source.as_str()))
        );
    }

    #[test]
    fn leaves_are_the_lexer_tokens(source in query_like(), dialect in dialect()) {
        let parse = parse(&source, dialect);
        let leaves: Vec<_> = parse
            .syntax()
            .descendants_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .map(|t| t.text_range())
            .collect();
        let spans: Vec<_> = tokenize(&source).iter().map(|t| t.span).collect();
        prop_assert_eq!(leaves, spans);
    }

    #[test]
    fn parsing_is_deterministic(source in query_like(), dialect in dialect()) {
        let first = parse(&source, dialect);
        let second = parse(&source, dialect);
        prop_assert_eq!(first.green(), second.green());
        prop_assert_eq!(first.diagnostics().as_slice(), second.diagnostics().as_slice());
    }

    #[test]
    fn diagnostics_are_sorted_and_in_bounds(source in query_like(), dialect in dialect()) {
        let parse = parse(&source, dialect);
        let len = TextSize::of(source.as_str());
        let starts: Vec<_> = parse.diagnostics().iter().map(|d| d.range().start()).collect();
        prop_assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(parse.diagnostics().iter().all(|d| d.range().end() <= len));
    }

    #[test]
    fn parse_from_any_token(source in query_like(), dialect in dialect(), pick in any::<prop::sample::Index>()) {
        let tokens = tokenize(&source);
        prop_assume!(!tokens.is_empty());
        let token = &tokens[pick.index(tokens.len())];
        let start: usize = token.span.start().into();
        let options = ParseOptions::new(dialect).with_start(start, token.state.clone());
        let parse = parse_with(&source, &options);
        prop_assert_eq!(parse.syntax().text().to_string(), &source[start..]);
    }
}

fn repeated_unit() -> impl Strategy<Value = String> {
    let unit = prop::sample::select(vec![
        "(", "{", "[", "<a>", "<a b='", "if (", "for $x in ", "Q{&amp;", "\"&amp;", "map {",
        "``[`{", "(: ", "element e {", "$x contains text (", "while (", "-", "./",
    ]);
    (unit, 500usize..3000).prop_map(|(unit, count)| unit.repeat(count))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn long_repetitive_input_stays_total(source in repeated_unit(), dialect in dialect()) {
        let parse = parse(&source, dialect);
        prop_assert_eq!(parse.syntax().text().to_string(), source.as_str());
        let len = TextSize::of(source.as_str());
        prop_assert!(parse.diagnostics().iter().all(|d| d.range().end() <= len));
    }
}
