use crate::definitions::{Definitions, DefinitionsError};
use crate::generator::{Construction, Lexer};
use crate::parser;
use ::regex::Regex as LibRegex;
use proptest::prelude::*;

/// The little language used by the end-to-end scenarios: reserved words first so
/// they take priority over `id`, plus an assignment symbol for string tests.
const LANG: &str = "
# scenario language
pr: if | else | while
id: [a-zA-Z]([a-zA-Z]|[0-9])*
num: [0-9]+
sym: =
";

fn lang_lexer(method: Construction) -> Lexer {
    let definitions: Definitions = parser::definitions(LANG)
        .try_into()
        .expect("scenario definitions are valid");
    Lexer::generate(&definitions, method)
}

fn both_routes() -> [Lexer; 2] {
    [
        lang_lexer(Construction::Followpos),
        lang_lexer(Construction::Thompson),
    ]
}

fn scan(lexer: &Lexer, input: &str) -> Vec<String> {
    lexer
        .scanner()
        .scan(input)
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn identifier_vs_reserved_word() {
    for lexer in &both_routes() {
        assert_eq!(
            scan(lexer, "if x1 42"),
            ["<if, PR>", "<x1, id>", "<42, num>"]
        );
    }
}

#[test]
fn longest_match_beats_reserved_prefix() {
    // "while2" is a longer id match than the reserved word "while"
    for lexer in &both_routes() {
        assert_eq!(scan(lexer, "while2"), ["<while2, id>"]);
    }
}

#[test]
fn unknown_character_recovers() {
    for lexer in &both_routes() {
        assert_eq!(scan(lexer, "x$y"), ["<x, id>", "<$, erro!>", "<y, id>"]);
    }
}

#[test]
fn line_comment_contributes_no_tokens() {
    for lexer in &both_routes() {
        assert_eq!(scan(lexer, "x // comment\ny"), ["<x, id>", "<y, id>"]);
    }
}

#[test]
fn string_literal() {
    for lexer in &both_routes() {
        assert_eq!(
            scan(lexer, r#"s = "a\"b""#),
            ["<s, id>", "<=, sym>", r#"<"a\"b", str>"#]
        );
    }
}

#[test]
fn empty_definitions_is_fatal_empty_input_is_not() {
    let result: Result<Definitions, _> = parser::definitions("").try_into();
    assert_eq!(result.unwrap_err(), DefinitionsError::Empty);

    for lexer in &both_routes() {
        assert_eq!(scan(lexer, ""), Vec::<String>::new());
    }
}

#[test]
fn pattern_priority_without_reserved_override() {
    // "ab" is recognizable under both patterns; the first-declared one is emitted
    let definitions: Definitions = parser::definitions("word: ab\nletters: [ab]+\n")
        .try_into()
        .unwrap();
    for method in [Construction::Followpos, Construction::Thompson] {
        let lexer = Lexer::generate(&definitions, method);
        let mut scanner = lexer.scanner();
        let tokens = scanner.scan("ab ba");
        assert_eq!(tokens[0].to_string(), "<ab, word>");
        assert_eq!(tokens[1].to_string(), "<ba, letters>");
    }
}

#[test]
fn combined_dfa_classifies_whole_lexemes() {
    for lexer in &both_routes() {
        let dfa = lexer.dfa();
        assert_eq!(dfa.accepts("if"), Some("pr"));
        assert_eq!(dfa.accepts("while"), Some("pr"));
        assert_eq!(dfa.accepts("x1"), Some("id"));
        assert_eq!(dfa.accepts("42"), Some("num"));
        assert_eq!(dfa.accepts("="), Some("sym"));
        assert_eq!(dfa.accepts("4x"), None);
        assert_eq!(dfa.accepts(""), None);
    }
}

#[test]
fn generated_stages_are_inspectable() {
    let lexer = lang_lexer(Construction::Followpos);
    let names: Vec<&str> = lexer.per_pattern().iter().map(|a| a.pattern()).collect();
    assert_eq!(names, ["pr", "id", "num", "sym"]);
    assert_eq!(
        lexer.combined().patterns().len(),
        lexer.dfa().patterns().len()
    );
    // every stage renders
    for automaton in lexer.per_pattern() {
        assert!(!automaton.to_table().is_empty());
        assert!(!automaton.dump().is_empty());
    }
    assert!(!lexer.combined().to_table().is_empty());
    assert!(!lexer.dfa().dump().is_empty());
}

#[test]
fn determinized_dfa_is_well_formed() {
    for lexer in &both_routes() {
        let dfa = lexer.dfa();
        // sorted, duplicate-free alphabet without ε
        assert!(dfa.alphabet().windows(2).all(|w| w[0] < w[1]));
        // complete transition rows, one (optional) target per symbol
        for state in dfa.states() {
            assert_eq!(state.transitions().len(), dfa.alphabet().len());
            for target in state.transitions().iter().flatten() {
                assert!(*target < dfa.states().len());
            }
        }
        assert!(dfa.initial_state_index() < dfa.states().len());
    }
}

fn random_regex() -> impl Strategy<Value = String> {
    "[a-d]".prop_recursive(8, 64, 10, |inner| {
        prop_oneof![
            4 => prop::collection::vec(inner.clone(), 1..5)
                .prop_map(|vec| format!("({})", vec.join(""))),
            3 => prop::collection::vec(inner.clone(), 1..4).prop_map(|vec| vec.join("|")),
            1 => inner.clone().prop_map(|r| format!("({r})*")),
            1 => inner.clone().prop_map(|r| format!("({r})+")),
            1 => inner.clone().prop_map(|r| format!("({r})?")),
        ]
    })
}

proptest! {
    /// Both construction routes agree with the `regex` crate on the language of a
    /// random expression.
    #[test]
    fn construction_routes_match_the_regex_crate(
        regex_str in random_regex(),
        inputs in prop::collection::vec("[a-d]{0,8}", 16)
    ) {
        let regex = parser::regex(&regex_str).unwrap();
        let followpos_dfa = regex.to_dfa("p");
        let thompson_dfa = regex.to_nfa("p").to_dfa();
        let oracle = LibRegex::new(&format!("^({regex_str})$")).unwrap();

        for input in &inputs {
            let expected = oracle.is_match(input);
            assert_eq!(followpos_dfa.accepts(input).is_some(), expected, "followpos on {input:?}");
            assert_eq!(thompson_dfa.accepts(input).is_some(), expected, "thompson on {input:?}");
        }
    }

    /// Tokenization is identical through either construction route.
    #[test]
    fn both_routes_tokenize_identically(input in "[a-zA-Z0-9 =$%.]{0,40}") {
        let [followpos, thompson] = both_routes();
        assert_eq!(scan(&followpos, &input), scan(&thompson, &input));
    }

    /// Without whitespace, comments or quotes every input character lands in
    /// exactly one lexeme, so the lexemes concatenate back to the input; error
    /// lexemes are single characters.
    #[test]
    fn scanning_consumes_every_character(input in "[a-zA-Z0-9=$%.]{0,40}") {
        let lexer = lang_lexer(Construction::Followpos);
        let mut scanner = lexer.scanner();
        let tokens = scanner.scan(&input);
        let rebuilt: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(rebuilt, input);
        for token in tokens.iter().filter(|t| t.is_error()) {
            assert_eq!(token.lexeme.chars().count(), 1);
        }
    }

    /// Scanning only ever records a lexeme's first pattern in the symbol table, or
    /// promotes it to PR; it never flips between ordinary patterns.
    #[test]
    fn symbol_table_is_monotonic(words in prop::collection::vec("[a-z]{1,4}", 1..20)) {
        let lexer = lang_lexer(Construction::Followpos);
        let mut scanner = lexer.scanner();
        let mut seen: Vec<(String, String)> = Vec::new();
        for word in &words {
            for token in scanner.scan(word) {
                match seen.iter().find(|(lexeme, _)| lexeme == &token.lexeme) {
                    Some((_, first)) => assert_eq!(first, &*token.pattern),
                    None => seen.push((token.lexeme.clone(), token.pattern.to_string())),
                }
            }
        }
    }
}
