mod support;

use cfg_derivation::{DiagnosticKind, Expansion, GrammarProperties, Parser};
use test_case::test_case;

#[test_case(&[("S", "A"), ("A", "A|a")], true ; "reachable realizable cycle")]
#[test_case(&[("S", "A|b"), ("A", "A")], false ; "unrealizable cycle")]
#[test_case(&[("S", "a"), ("A", "A|a")], false ; "unreachable cycle")]
#[test_case(&[("S", "SN|a"), ("N", "")], true ; "cycle through nullable")]
#[test_case(&[("S", "aSb|")], false ; "acyclic")]
fn test_unbounded_ambiguity(rules: &[(&str, &str)], expected: bool) {
    support::init_logger();
    let grammar = support::grammar(rules);
    let properties = GrammarProperties::new(&grammar);
    assert_eq!(properties.unbounded_ambiguity(), expected);
}

#[test]
fn test_property_sets() {
    support::init_logger();
    let grammar = support::grammar(&[
        ("S", "aB|C"),
        ("B", "|b"),
        ("C", "cC"),
        ("D", "B"),
        ("E", "E"),
    ]);
    let properties = GrammarProperties::new(&grammar);

    assert_eq!(properties.unreachable().names(&grammar), ["D", "E"]);
    assert_eq!(properties.unrealizable().names(&grammar), ["C", "E"]);
    assert_eq!(properties.nullable().names(&grammar), ["B", "D"]);
    assert_eq!(properties.cyclic().names(&grammar), ["E"]);
    assert!(!properties.unbounded_ambiguity());
}

#[test]
fn test_cyclic_through_nullable_symbols() {
    let grammar = support::grammar(&[("S", "ASA|x"), ("A", "")]);
    let properties = GrammarProperties::new(&grammar);
    assert_eq!(properties.nullable().names(&grammar), ["A"]);
    assert_eq!(properties.cyclic().names(&grammar), ["S"]);
    assert!(properties.unbounded_ambiguity());
}

#[test]
fn test_diagnostics() {
    support::init_logger();
    let grammar = support::grammar(&[("S", "A|b"), ("A", "A"), ("B", "b"), ("C", "c")]);
    let properties = GrammarProperties::new(&grammar);
    let diagnostics = properties.diagnostics();

    let kinds: Vec<DiagnosticKind> = diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::Unreachable,
            DiagnosticKind::Unrealizable,
            DiagnosticKind::Cyclic {
                unbounded_ambiguity: false
            },
        ]
    );
    let messages: Vec<String> = diagnostics
        .iter()
        .map(|d| d.display(&grammar).to_string())
        .collect();
    assert_eq!(
        messages,
        [
            "Nonterminals B, C are unreachable from the start symbol S.",
            "Nonterminal A is unrealizable (cannot generate any strings).",
            "Nonterminal A is cyclic.",
        ]
    );
}

#[test]
fn test_unbounded_ambiguity_message() {
    let grammar = support::grammar(&[("S", "A"), ("A", "A|a")]);
    let diagnostics = GrammarProperties::new(&grammar).diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].display(&grammar).to_string(),
        "Nonterminal A is cyclic, so some strings have infinitely many derivations."
    );
}

#[test]
fn test_no_diagnostics() {
    let grammar = support::grammar(&[("S", "aSb|")]);
    assert!(GrammarProperties::new(&grammar).diagnostics().is_empty());
}

#[test]
fn test_nullable_nonterminals_derive_empty_trees() {
    support::init_logger();
    let grammar = support::grammar(&[("S", "AB|x"), ("A", "a|"), ("B", "AA|b"), ("C", "c")]);
    let properties = GrammarProperties::new(&grammar);
    assert_eq!(properties.nullable().names(&grammar), ["S", "A", "B"]);

    let mut expansion = Expansion::new(&grammar, 10_000);
    let depth = grammar.num_nonterminals();
    for _ in 0..depth {
        expansion.expand().unwrap();
    }
    for sym in properties.nullable() {
        assert!(
            expansion
                .derivations(sym)
                .iter()
                .any(|tree| tree.leaves() == 0),
            "no empty derivation for {:?}",
            grammar.name(sym)
        );
    }

    let parse = Parser::new(&grammar).parse_names::<&str>(&[]);
    assert_eq!(parse.trees.len(), 1);
    assert_eq!(parse.trees[0].leaves(), 0);
}
