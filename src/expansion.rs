//! Bounded enumeration of derivation trees.
//!
//! Each step rebuilds the trees of every nonterminal from the trees of the previous step, so
//! after `d` steps a nonterminal holds every derivation tree of depth at most `d`.

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use rpds::List;

use crate::grammar::Grammar;
use crate::limits::{EnumerationError, EnumerationLimits};
use crate::symbol::Symbol;
use crate::tree::Tree;

/// Trees discovered so far for every nonterminal.
pub struct Expansion<'g> {
    grammar: &'g Grammar,
    limit: u64,
    languages: IndexMap<Symbol, Vec<Tree>>,
    /// Cumulative cost over all steps, including a failed one.
    cost: u64,
    depth: usize,
}

/// The outcome of [`Expansion::run`].
#[derive(Clone, Debug)]
pub struct Enumeration {
    /// Derivation trees of the start symbol.
    pub trees: Vec<Tree>,
    /// The language is finite and every tree was found.
    pub exhaustive: bool,
    /// Number of successful steps. Without `exhaustive`, `trees` holds the derivations of depth
    /// at most this.
    pub depth: usize,
}

impl<'g> Expansion<'g> {
    /// Starts with an empty language for each nonterminal.
    pub fn new(grammar: &'g Grammar, work_limit: u64) -> Self {
        Expansion {
            grammar,
            limit: work_limit,
            languages: grammar.nonterminals().map(|lhs| (lhs, vec![])).collect(),
            cost: 0,
            depth: 0,
        }
    }

    /// Given the trees up to depth `n`, computes the trees up to depth `n + 1`. Equal trees
    /// built from repeated productions are kept once.
    ///
    /// Fails without changing the trees or the depth once the cumulative cost goes above the
    /// work limit.
    pub fn expand(&mut self) -> Result<(), EnumerationError> {
        let grammar = self.grammar;
        let mut languages: IndexMap<Symbol, Vec<Tree>> =
            IndexMap::with_capacity(self.languages.len());
        for lhs in grammar.nonterminals() {
            let mut trees = IndexSet::new();
            for rhs in grammar.expansions(lhs).unwrap_or_default() {
                for children in self.products(rhs) {
                    let tree = Tree::nonterminal(lhs, children.iter().cloned());
                    let cost = (tree.height() as u64).saturating_mul(tree.width() as u64);
                    self.cost = self.cost.saturating_add(cost);
                    if self.cost > self.limit {
                        warn!(
                            "work limit {} exceeded at depth {}",
                            self.limit,
                            self.depth + 1
                        );
                        return Err(EnumerationError::WorkLimitExceeded);
                    }
                    trees.insert(tree);
                }
            }
            languages.insert(lhs, trees.into_iter().collect());
        }
        self.languages = languages;
        self.depth += 1;
        debug!("depth {}: {} trees", self.depth, self.size());
        Ok(())
    }

    /// Every sequence of children for `rhs`, combining the current trees of its nonterminals.
    /// Built from the right, so each sequence reads left to right from its head.
    fn products(&self, rhs: &[Symbol]) -> Vec<List<Tree>> {
        let mut partials = vec![List::new()];
        for &sym in rhs.iter().rev() {
            partials = match self.languages.get(&sym) {
                Some(trees) => {
                    let mut next = Vec::with_capacity(trees.len() * partials.len());
                    for tree in trees {
                        next.extend(partials.iter().map(|rest| rest.push_front(tree.clone())));
                    }
                    next
                }
                None => {
                    let leaf = self.grammar.leaf(sym);
                    partials
                        .iter()
                        .map(|rest| rest.push_front(leaf.clone()))
                        .collect()
                }
            };
        }
        partials
    }

    /// The current trees of a nonterminal. Empty for a terminal.
    pub fn derivations(&self, sym: Symbol) -> &[Tree] {
        self.languages
            .get(&sym)
            .map(|trees| &trees[..])
            .unwrap_or_default()
    }

    /// Number of successful steps.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of trees over all nonterminals.
    pub fn size(&self) -> usize {
        self.languages.values().map(Vec::len).sum()
    }

    /// Cumulative cost of all trees built so far.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Expands until the depth reaches `max_depth`, the work limit is hit, or the number of
    /// trees stops growing. In the last case, the language is finite.
    pub fn run(&mut self, max_depth: usize) -> Enumeration {
        let mut exhaustive = false;
        let mut last_size = self.size();
        while self.depth < max_depth {
            if self.expand().is_err() {
                break;
            }
            let size = self.size();
            if size == last_size {
                exhaustive = true;
                break;
            }
            last_size = size;
        }
        let trees = match self.grammar.start() {
            Some(start) => self.derivations(start).to_vec(),
            None => vec![],
        };
        Enumeration {
            trees,
            exhaustive,
            depth: self.depth,
        }
    }
}

/// Enumerates the derivation trees of the start symbol within the given limits.
pub fn enumerate(grammar: &Grammar, limits: EnumerationLimits) -> Enumeration {
    Expansion::new(grammar, limits.work).run(limits.max_depth_for(grammar))
}
