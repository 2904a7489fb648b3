//! Sets of symbols in the form of bit vectors.

use std::iter;

use bit_vec::BitVec;

use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// A set of symbols in the form of a bit vector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        SymbolBitSet {
            bit_vec: BitVec::new(),
        }
    }

    /// Constructs a `SymbolBitSet` with room for every symbol of the grammar.
    pub fn from_elem(grammar: &Grammar, elem: bool) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(grammar.num_syms(), elem),
        }
    }

    /// Constructs the set of the grammar's terminal symbols.
    pub fn terminal(grammar: &Grammar) -> Self {
        let mut set = Self::from_elem(grammar, true);
        for lhs in grammar.nonterminals() {
            set.set(lhs, false);
        }
        set
    }

    /// Constructs the set of nonterminals that have an empty production.
    pub fn nulling(grammar: &Grammar) -> Self {
        let mut set = Self::from_elem(grammar, false);
        for (lhs, rhs) in grammar.productions() {
            if rhs.is_empty() {
                set.set(lhs, true);
            }
        }
        set
    }

    /// Constructs the set of all nonterminals.
    pub fn nonterminal(grammar: &Grammar) -> Self {
        let mut set = Self::terminal(grammar);
        set.negate();
        set
    }

    pub fn set(&mut self, sym: Symbol, elem: bool) {
        self.bit_vec.set(sym.usize(), elem);
    }

    /// Checks whether a given symbol is in this set. Symbols beyond the set's capacity are
    /// not members.
    pub fn contains(&self, sym: Symbol) -> bool {
        self.bit_vec.get(sym.usize()).unwrap_or(false)
    }

    pub fn negate(&mut self) {
        self.bit_vec.negate();
    }

    pub fn union(&mut self, other: &SymbolBitSet) {
        self.bit_vec.or(&other.bit_vec);
    }

    /// Removes every member of `other` from this set.
    pub fn difference(&mut self, other: &SymbolBitSet) {
        self.bit_vec.difference(&other.bit_vec);
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }

    /// Returns the number of symbols in the set.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Checks whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.bit_vec.none()
    }

    /// Returns the names of members, in the order the grammar defines its nonterminals,
    /// followed by any other members in symbol order.
    pub fn names<'g>(&self, grammar: &'g Grammar) -> Vec<&'g str> {
        let mut ordered: Vec<Symbol> = grammar
            .nonterminals()
            .filter(|&sym| self.contains(sym))
            .collect();
        ordered.extend(self.iter().filter(|&sym| !grammar.is_nonterminal(sym)));
        ordered
            .into_iter()
            .filter_map(|sym| grammar.name(sym))
            .collect()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a SymbolBitSet {
    type Item = Symbol;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_and_nonterminal_sets() {
        let mut grammar = Grammar::new();
        grammar.add_alternatives("S", "aT|");
        grammar.add_alternatives("T", "b");
        let sym = |name: &str| grammar.symbol(name).unwrap();
        let [s, a, t, b] = [sym("S"), sym("a"), sym("T"), sym("b")];

        let terminal = SymbolBitSet::terminal(&grammar);
        assert_eq!(terminal.iter().collect::<Vec<_>>(), [a, b]);
        let nonterminal = SymbolBitSet::nonterminal(&grammar);
        assert_eq!(nonterminal.count(), 2);
        assert!(nonterminal.contains(s) && nonterminal.contains(t));
        assert_eq!(SymbolBitSet::nulling(&grammar).names(&grammar), ["S"]);
        assert!(!terminal.contains(grammar.sym_source().fresh()));
        assert!(SymbolBitSet::new().is_empty());
    }
}
