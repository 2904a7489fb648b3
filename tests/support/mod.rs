#![allow(dead_code)]

use cfg_derivation::{Grammar, Tree};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a grammar from `(lhs, alternatives)` pairs, where alternatives are separated by `|`
/// and every character is one symbol.
pub fn grammar(rules: &[(&str, &str)]) -> Grammar {
    let mut grammar = Grammar::new();
    for &(lhs, alternatives) in rules {
        grammar.add_alternatives(lhs, alternatives);
    }
    grammar
}

pub fn sentences<'a>(trees: impl IntoIterator<Item = &'a Tree>) -> Vec<&'a str> {
    trees.into_iter().map(|tree| tree.sentence()).collect()
}
