mod support;

use cfg_derivation::{enumerate, EnumerationError, EnumerationLimits, Expansion, Parser, Tree};
use test_case::test_case;

#[test]
fn test_finite_language_fixed_point() {
    support::init_logger();
    let grammar = support::grammar(&[("S", "a|b")]);
    let start = grammar.start().unwrap();
    let mut expansion = Expansion::new(&grammar, 10_000);

    assert_eq!(expansion.size(), 0);
    expansion.expand().unwrap();
    assert_eq!(expansion.size(), 2);
    expansion.expand().unwrap();
    assert_eq!(expansion.size(), 2);
    assert_eq!(expansion.depth(), 2);

    let expected = [
        Tree::nonterminal(start, [grammar.leaf(grammar.symbol("a").unwrap())]),
        Tree::nonterminal(start, [grammar.leaf(grammar.symbol("b").unwrap())]),
    ];
    assert_eq!(expansion.derivations(start), expected);
    for tree in expansion.derivations(start) {
        assert_eq!(tree.children().len(), 1);
        assert!(tree.children()[0].is_terminal());
    }
}

#[test]
fn test_run_to_fixed_point() {
    let grammar = support::grammar(&[("S", "AA"), ("A", "a|")]);
    let enumeration = enumerate(&grammar, EnumerationLimits::default());

    assert!(enumeration.exhaustive);
    assert_eq!(enumeration.depth, 3);
    let mut sentences = support::sentences(&enumeration.trees);
    sentences.sort();
    assert_eq!(sentences, ["", "a", "a", "a a"]);
}

#[test]
fn test_work_limit_keeps_last_step() {
    support::init_logger();
    let grammar = support::grammar(&[("S", "aS|a")]);
    let start = grammar.start().unwrap();
    let mut expansion = Expansion::new(&grammar, 20);

    // Costs 2, then 6 + 2.
    expansion.expand().unwrap();
    expansion.expand().unwrap();
    assert_eq!(expansion.cost(), 10);
    assert_eq!(expansion.expand(), Err(EnumerationError::WorkLimitExceeded));

    assert_eq!(expansion.depth(), 2);
    assert_eq!(expansion.size(), 2);
    assert_eq!(
        support::sentences(expansion.derivations(start)),
        ["a a", "a"]
    );
    assert!(expansion.cost() > 20);
    assert_eq!(
        EnumerationError::WorkLimitExceeded.to_string(),
        "work limit exceeded"
    );
}

#[test_case(Some(1), &["a"] ; "one step")]
#[test_case(Some(3), &["a a a", "a a", "a"] ; "three steps")]
fn test_depth_bounded(max_depth: Option<usize>, expected: &[&str]) {
    let grammar = support::grammar(&[("S", "aS|a")]);
    let limits = EnumerationLimits {
        work: 10_000,
        max_depth,
    };
    let enumeration = enumerate(&grammar, limits);

    assert!(!enumeration.exhaustive);
    assert_eq!(enumeration.depth, max_depth.unwrap());
    assert_eq!(support::sentences(&enumeration.trees), expected);
}

#[test]
fn test_default_depth() {
    let grammar = support::grammar(&[("S", "aS|a"), ("A", "x")]);
    let limits = EnumerationLimits::default();
    assert_eq!(limits.max_depth_for(&grammar), 11);

    let enumeration = enumerate(&grammar, limits);
    assert!(!enumeration.exhaustive);
    assert_eq!(enumeration.depth, 11);
    assert_eq!(enumeration.trees.len(), 11);
}

#[test]
fn test_run_stops_at_work_limit() {
    support::init_logger();
    let grammar = support::grammar(&[("S", "SS|a")]);
    let start = grammar.start().unwrap();
    let mut expansion = Expansion::new(&grammar, 10_000);
    let enumeration = expansion.run(10);

    assert!(!enumeration.exhaustive);
    assert!(enumeration.depth < 10);
    assert_eq!(enumeration.depth, expansion.depth());
    assert_eq!(enumeration.trees, expansion.derivations(start));
    assert!(expansion.cost() > 10_000);
}

#[test]
fn test_unrealizable_start() {
    let grammar = support::grammar(&[("S", "S")]);
    let enumeration = enumerate(&grammar, EnumerationLimits::default());
    assert!(enumeration.exhaustive);
    assert_eq!(enumeration.depth, 1);
    assert!(enumeration.trees.is_empty());
}

#[test]
fn test_repeated_production_matches_parser() {
    let grammar = support::grammar(&[("S", "a|a")]);
    let enumeration = enumerate(&grammar, EnumerationLimits::default());

    assert!(enumeration.exhaustive);
    assert_eq!(support::sentences(&enumeration.trees), ["a"]);
    let parse = Parser::new(&grammar).parse_names(&["a"]);
    assert_eq!(parse.trees, enumeration.trees);
}
