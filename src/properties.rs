//! Statically computable properties of a grammar.
//!
//! All four analyses are monotone fixed points over the set of nonterminals, so each of them
//! terminates.

use std::collections::VecDeque;
use std::fmt;

use bit_matrix::BitMatrix;
use log::{debug, warn};

use crate::grammar::Grammar;
use crate::rhs_closure::RhsClosure;
use crate::symbol::{Symbol, SymbolBitSet};

/// Contains the unreachable, unrealizable, nullable and cyclic nonterminals of a grammar.
pub struct GrammarProperties<'g> {
    grammar: &'g Grammar,
    unreachable: SymbolBitSet,
    unrealizable: SymbolBitSet,
    nullable: SymbolBitSet,
    cyclic: SymbolBitSet,
}

/// A problem found in a grammar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    /// What is wrong with the nonterminals.
    pub kind: DiagnosticKind,
    /// The affected nonterminals, in order of definition.
    pub nonterminals: Vec<Symbol>,
}

/// The kind of a grammar problem.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DiagnosticKind {
    /// Cannot be reached from the start symbol.
    Unreachable,
    /// Cannot generate any strings.
    Unrealizable,
    /// Can derive itself.
    Cyclic {
        /// Whether some strings have infinitely many derivations as a consequence.
        unbounded_ambiguity: bool,
    },
}

/// Displays a diagnostic with the grammar's symbol names.
#[derive(Clone, Copy)]
pub struct DisplayDiagnostic<'a> {
    diagnostic: &'a Diagnostic,
    grammar: &'a Grammar,
}

impl<'g> GrammarProperties<'g> {
    /// Analyzes the grammar.
    pub fn new(grammar: &'g Grammar) -> Self {
        let unreachable = unreachable_syms(grammar);
        let unrealizable = unrealizable_syms(grammar);
        let nullable = nullable_syms(grammar);
        let cyclic = cyclic_syms(grammar, &nullable);

        let properties = GrammarProperties {
            grammar,
            unreachable,
            unrealizable,
            nullable,
            cyclic,
        };
        properties.log();
        properties
    }

    /// Nonterminals that cannot be reached from the start symbol.
    pub fn unreachable(&self) -> &SymbolBitSet {
        &self.unreachable
    }

    /// Nonterminals that do not generate any strings.
    pub fn unrealizable(&self) -> &SymbolBitSet {
        &self.unrealizable
    }

    /// Nonterminals that can generate the null string.
    pub fn nullable(&self) -> &SymbolBitSet {
        &self.nullable
    }

    /// Nonterminals that can derive themselves.
    pub fn cyclic(&self) -> &SymbolBitSet {
        &self.cyclic
    }

    /// Some strings have infinitely many derivations. This occurs if and only if a cyclic
    /// nonterminal is both reachable and realizable.
    pub fn unbounded_ambiguity(&self) -> bool {
        self.cyclic
            .iter()
            .any(|sym| !self.unreachable.contains(sym) && !self.unrealizable.contains(sym))
    }

    /// Lists the problems of the grammar: unreachable, unrealizable and cyclic nonterminals,
    /// in that order. Categories without members are left out.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let categories = [
            (DiagnosticKind::Unreachable, &self.unreachable),
            (DiagnosticKind::Unrealizable, &self.unrealizable),
            (
                DiagnosticKind::Cyclic {
                    unbounded_ambiguity: self.unbounded_ambiguity(),
                },
                &self.cyclic,
            ),
        ];
        categories
            .into_iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(kind, set)| Diagnostic {
                kind,
                nonterminals: self
                    .grammar
                    .nonterminals()
                    .filter(|&sym| set.contains(sym))
                    .collect(),
            })
            .collect()
    }

    fn log(&self) {
        for diagnostic in self.diagnostics() {
            warn!("{}", diagnostic.display(self.grammar));
        }
        if !self.nullable.is_empty() {
            debug!("nullable: {:?}", self.nullable.names(self.grammar));
        }
    }
}

/// Returns the complement of the set reached by a breadth-first traversal from the start
/// symbol.
fn unreachable_syms(grammar: &Grammar) -> SymbolBitSet {
    let mut reachable = SymbolBitSet::from_elem(grammar, false);
    let mut queue: VecDeque<Symbol> = grammar.start().into_iter().collect();
    while let Some(lhs) = queue.pop_front() {
        if reachable.contains(lhs) {
            continue;
        }
        reachable.set(lhs, true);
        for rhs in grammar.expansions(lhs).unwrap_or_default() {
            for &sym in rhs.iter() {
                if grammar.is_nonterminal(sym) {
                    queue.push_back(sym);
                }
            }
        }
    }
    let mut unreachable = SymbolBitSet::nonterminal(grammar);
    unreachable.difference(&reachable);
    unreachable
}

/// Returns the nonterminals that are not realizable. Terminals and the LHS of an empty
/// production are realizable from the start.
fn unrealizable_syms(grammar: &Grammar) -> SymbolBitSet {
    let mut realizable = SymbolBitSet::terminal(grammar);
    realizable.union(&SymbolBitSet::nulling(grammar));
    RhsClosure::new(grammar).rhs_closure(&mut realizable);
    realizable.negate();
    realizable
}

/// Returns the set of nullable nonterminals.
fn nullable_syms(grammar: &Grammar) -> SymbolBitSet {
    let mut nullable = SymbolBitSet::nulling(grammar);
    RhsClosure::new(grammar).rhs_closure(&mut nullable);
    nullable
}

/// Returns the trivial expansion matrix. A nonterminal trivially expands to every symbol of an
/// all-nullable production, and to the single non-nullable symbol of a production, if it is
/// a nonterminal.
fn trivial_expansion_matrix(grammar: &Grammar, nullable: &SymbolBitSet) -> BitMatrix {
    let num_syms = grammar.num_syms();
    let mut trivial_expansion = BitMatrix::new(num_syms, num_syms);

    for (lhs, rhs) in grammar.productions() {
        let mut non_null = rhs.iter().copied().filter(|&sym| !nullable.contains(sym));
        match (non_null.next(), non_null.next()) {
            (None, _) => {
                for &sym in rhs.iter() {
                    trivial_expansion.set(lhs.usize(), sym.usize(), true);
                }
            }
            (Some(sym), None) if grammar.is_nonterminal(sym) => {
                trivial_expansion.set(lhs.usize(), sym.usize(), true);
            }
            _ => {}
        }
    }

    trivial_expansion.transitive_closure();
    trivial_expansion
}

/// Returns the nonterminals that appear in their own closed trivial expansion.
fn cyclic_syms(grammar: &Grammar, nullable: &SymbolBitSet) -> SymbolBitSet {
    let trivial_expansion = trivial_expansion_matrix(grammar, nullable);
    let mut cyclic = SymbolBitSet::from_elem(grammar, false);
    for lhs in grammar.nonterminals() {
        if trivial_expansion[(lhs.usize(), lhs.usize())] {
            cyclic.set(lhs, true);
        }
    }
    cyclic
}

impl Diagnostic {
    /// Returns an object that displays the diagnostic with the grammar's symbol names.
    pub fn display<'a>(&'a self, grammar: &'a Grammar) -> DisplayDiagnostic<'a> {
        DisplayDiagnostic {
            diagnostic: self,
            grammar,
        }
    }
}

impl<'a> fmt::Display for DisplayDiagnostic<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = |sym| self.grammar.name(sym).unwrap_or("?");
        let nonterminals = &self.diagnostic.nonterminals;
        let (noun, verb) = if nonterminals.len() == 1 {
            ("Nonterminal", "is")
        } else {
            ("Nonterminals", "are")
        };
        write!(f, "{} ", noun)?;
        for (i, &sym) in nonterminals.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name(sym))?;
        }
        write!(f, " {} ", verb)?;
        match self.diagnostic.kind {
            DiagnosticKind::Unreachable => match self.grammar.start() {
                Some(start) => write!(f, "unreachable from the start symbol {}", name(start))?,
                None => f.write_str("unreachable")?,
            },
            DiagnosticKind::Unrealizable => {
                f.write_str("unrealizable (cannot generate any strings)")?;
            }
            DiagnosticKind::Cyclic {
                unbounded_ambiguity: true,
            } => f.write_str("cyclic, so some strings have infinitely many derivations")?,
            DiagnosticKind::Cyclic {
                unbounded_ambiguity: false,
            } => f.write_str("cyclic")?,
        }
        f.write_str(".")
    }
}
