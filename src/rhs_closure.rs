//! RHS closure. In some sense, it is a reverse of breadth first search (reverse BFS).

use crate::grammar::{Grammar, Production};
use crate::symbol::{Symbol, SymbolBitSet};

/// Records, for every symbol, the productions whose RHS contains it.
pub struct RhsClosure<'a> {
    derived_by: Vec<Derivation<'a>>,
    work_stack: Vec<Symbol>,
}

struct Derivation<'a> {
    sym: Symbol,
    lhs: Symbol,
    rhs: &'a Production,
}

impl<'a> RhsClosure<'a> {
    /// Records information which is needed to calculate the RHS transitive closure.
    pub fn new(grammar: &'a Grammar) -> Self {
        let mut derived_by = vec![];
        for (lhs, rhs) in grammar.productions() {
            derived_by.extend(rhs.iter().map(|&sym| Derivation { sym, lhs, rhs }));
        }
        derived_by.sort_by_key(|derivation| derivation.sym);

        RhsClosure {
            derived_by,
            work_stack: vec![],
        }
    }

    /// Calculates the RHS transitive closure. A LHS gets the property once every symbol of one
    /// of its productions has it. Productions with an empty RHS are never visited, so their LHS
    /// must be part of the initial `property` if it should have it.
    pub fn rhs_closure(&mut self, property: &mut SymbolBitSet) {
        self.work_stack.extend(property.iter());

        while let Some(work_sym) = self.work_stack.pop() {
            for derivation in find(&self.derived_by[..], work_sym) {
                if !property.contains(derivation.lhs)
                    && derivation.rhs.iter().all(|&sym| property.contains(sym))
                {
                    property.set(derivation.lhs, true);
                    self.work_stack.push(derivation.lhs);
                }
            }
        }
    }
}

fn find<'a, 'b>(derived_by: &'b [Derivation<'a>], key_sym: Symbol) -> &'b [Derivation<'a>] {
    let start = derived_by.partition_point(|derivation| derivation.sym < key_sym);
    let len = derived_by[start..]
        .iter()
        .take_while(|derivation| derivation.sym == key_sym)
        .count();
    &derived_by[start..start + len]
}
