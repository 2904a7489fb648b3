//! A chart parser in the style of Earley, which scans the input from right to left and keeps
//! every distinct derivation tree.
//!
//! Chart positions are built from the end of the input down to 0. Each position starts from
//! the items scanned over the input symbol at that position, then grows by completion and
//! prediction until no new item appears, or until it holds more items than
//! [`ParseLimits::state_size`] allows. Derivation trees are kept whole, so an item is
//! identified by the trees it has matched, not only by its dotted rule.

mod item;

use std::collections::VecDeque;
use std::rc::Rc;

use indexmap::IndexSet;
use log::{debug, trace, warn};

use crate::grammar::Grammar;
use crate::limits::ParseLimits;
use crate::symbol::Symbol;
use crate::tree::Tree;

use self::item::Item;

/// The chart parser.
#[derive(Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
    limits: ParseLimits,
    /// Synthetic LHS of the item that derives the start symbol.
    root: Symbol,
}

/// The outcome of a parse.
#[derive(Clone, Debug, Default)]
pub struct Parse {
    /// Distinct derivation trees of the start symbol.
    pub trees: Vec<Tree>,
    /// Some chart position hit the size limit, so `trees` may be incomplete.
    pub truncated: bool,
}

type ItemSet = IndexSet<Item>;

impl<'g> Parser<'g> {
    /// Creates a parser with default limits.
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::with_limits(grammar, ParseLimits::default())
    }

    /// Creates a parser with the given limits.
    pub fn with_limits(grammar: &'g Grammar, limits: ParseLimits) -> Self {
        Parser {
            grammar,
            limits,
            root: grammar.sym_source().fresh(),
        }
    }

    /// Parses a sentence of interned symbols.
    pub fn parse(&self, input: &[Symbol]) -> Parse {
        let tokens: Vec<Option<Symbol>> = input.iter().copied().map(Some).collect();
        self.parse_tokens(&tokens[..])
    }

    /// Parses a sentence given by symbol names. A name the grammar does not know cannot be
    /// matched by any production.
    pub fn parse_names<S: AsRef<str>>(&self, input: &[S]) -> Parse {
        let tokens: Vec<Option<Symbol>> = input
            .iter()
            .map(|name| self.grammar.symbol(name.as_ref()))
            .collect();
        self.parse_tokens(&tokens[..])
    }

    fn parse_tokens(&self, input: &[Option<Symbol>]) -> Parse {
        let start = match self.grammar.start() {
            Some(start) => start,
            None => return Parse::default(),
        };
        let len = input.len();
        let mut chart: Vec<ItemSet> = Vec::with_capacity(len + 1);
        chart.resize_with(len + 1, ItemSet::default);
        let mut truncated = false;

        for pos in (0..=len).rev() {
            let mut queue = VecDeque::new();
            if pos == len {
                // Initial state, starting from the end of the input.
                let rhs: Rc<[Symbol]> = Rc::from(&[start][..]);
                queue.push_back(Item::predict(self.root, rhs, len));
            } else if let Some(sym) = input[pos].filter(|&sym| !self.grammar.is_nonterminal(sym)) {
                // Scan a terminal symbol.
                let leaf = self.grammar.leaf(sym);
                queue.extend(
                    chart[pos + 1]
                        .iter()
                        .filter(|item| item.matches(sym))
                        .map(|item| item.advance(leaf.clone())),
                );
            }
            let state = self.closure(pos, queue, &chart[..], &mut truncated);
            debug!("position {}: {} items", pos, state.len());
            chart[pos] = state;
        }

        let trees = chart[0]
            .iter()
            .filter(|item| item.lhs() == self.root && item.is_finished())
            .map(Item::complete_root)
            .collect();
        Parse { trees, truncated }
    }

    /// Completes and predicts from the seed items until the set for `pos` is closed.
    fn closure(
        &self,
        pos: usize,
        mut queue: VecDeque<Item>,
        chart: &[ItemSet],
        truncated: &mut bool,
    ) -> ItemSet {
        let mut state = ItemSet::default();
        // Trees of zero width completed at this position.
        let mut empties: IndexSet<Tree> = IndexSet::new();

        while let Some(item) = queue.pop_front() {
            // Guard against unlimited expansion.
            if state.len() > self.limits.state_size {
                warn!(
                    "position {} exceeds {} items; derivations are truncated",
                    pos, self.limits.state_size
                );
                *truncated = true;
                break;
            }
            if !state.insert(item.clone()) {
                continue;
            }
            trace!("{}", item.display(self.grammar));

            if item.is_finished() {
                if item.lhs() == self.root {
                    continue;
                }
                // Complete a production.
                let tree = item.complete();
                let end = item.finish();
                if end == pos {
                    empties.insert(tree.clone());
                }
                let parents = if end == pos { &state } else { &chart[end] };
                queue.extend(
                    parents
                        .iter()
                        .filter(|parent| parent.matches(item.lhs()))
                        .map(|parent| parent.advance(tree.clone())),
                );
            } else {
                // Predict: expand a nonterminal.
                let sym = item.next_symbol();
                if let Some(rhss) = self.grammar.expansions(sym) {
                    queue.extend(rhss.iter().map(|rhs| Item::predict(sym, rhs.clone(), pos)));
                    queue.extend(
                        empties
                            .iter()
                            .filter(|tree| tree.symbol() == sym)
                            .map(|tree| item.advance(tree.clone())),
                    );
                }
            }
        }
        state
    }
}

impl Parse {
    /// Checks whether every derivation was found.
    pub fn is_complete(&self) -> bool {
        !self.truncated
    }

    /// Checks whether the sentence has more than one derivation.
    pub fn is_ambiguous(&self) -> bool {
        self.trees.len() > 1
    }
}
