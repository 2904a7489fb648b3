use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rpds::List;

use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use crate::tree::Tree;

/// A partially matched production. Matching proceeds from the right end of the RHS toward the
/// left, so the subtrees matched so far, read from the head of `parsed`, are already in
/// left-to-right order.
#[derive(Clone)]
pub(crate) struct Item {
    lhs: Symbol,
    rhs: Production,
    /// Number of RHS symbols not yet matched.
    pending: usize,
    /// The input position where the match began; the right boundary.
    finish: usize,
    parsed: List<Tree>,
    hash: u64,
}

pub(crate) struct DisplayItem<'a> {
    item: &'a Item,
    grammar: &'a Grammar,
}

impl Item {
    /// An item at the end of a RHS, with nothing matched.
    pub(crate) fn predict(lhs: Symbol, rhs: Production, finish: usize) -> Self {
        let pending = rhs.len();
        Item::with_hash(lhs, rhs, pending, finish, List::new())
    }

    /// Advances the item over its next symbol, matched by `tree`.
    pub(crate) fn advance(&self, tree: Tree) -> Self {
        assert!(!self.is_finished(), "advancing a finished item");
        Item::with_hash(
            self.lhs,
            self.rhs.clone(),
            self.pending - 1,
            self.finish,
            self.parsed.push_front(tree),
        )
    }

    fn with_hash(
        lhs: Symbol,
        rhs: Production,
        pending: usize,
        finish: usize,
        parsed: List<Tree>,
    ) -> Self {
        let mut hasher = DefaultHasher::new();
        lhs.hash(&mut hasher);
        rhs.hash(&mut hasher);
        hasher.write_usize(pending);
        hasher.write_usize(finish);
        for tree in parsed.iter() {
            tree.hash(&mut hasher);
        }
        Item {
            lhs,
            rhs,
            pending,
            finish,
            parsed,
            hash: hasher.finish(),
        }
    }

    pub(crate) fn lhs(&self) -> Symbol {
        self.lhs
    }

    pub(crate) fn finish(&self) -> usize {
        self.finish
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.pending == 0
    }

    /// Checks whether the next symbol to match is `sym`.
    pub(crate) fn matches(&self, sym: Symbol) -> bool {
        self.pending > 0 && self.rhs[self.pending - 1] == sym
    }

    /// The rightmost unmatched symbol.
    pub(crate) fn next_symbol(&self) -> Symbol {
        assert!(!self.is_finished(), "next symbol of a finished item");
        self.rhs[self.pending - 1]
    }

    /// Builds the derivation tree of a finished item.
    pub(crate) fn complete(&self) -> Tree {
        assert!(self.is_finished(), "completing an unfinished item");
        Tree::nonterminal(self.lhs, self.parsed.iter().cloned())
    }

    /// Extracts the single derivation matched by a finished root item.
    pub(crate) fn complete_root(&self) -> Tree {
        assert!(self.is_finished(), "completing an unfinished root item");
        assert_eq!(
            self.parsed.len(),
            1,
            "root item must match exactly one tree"
        );
        self.parsed
            .first()
            .cloned()
            .expect("root item must match exactly one tree")
    }

    pub(crate) fn display<'a>(&'a self, grammar: &'a Grammar) -> DisplayItem<'a> {
        DisplayItem {
            item: self,
            grammar,
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.finish == other.finish
            && self.pending == other.pending
            && self.lhs == other.lhs
            && (Rc::ptr_eq(&self.rhs, &other.rhs) || self.rhs == other.rhs)
            && self.parsed == other.parsed
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Item")
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .field("pending", &self.pending)
            .field("finish", &self.finish)
            .field("parsed", &self.parsed.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> fmt::Display for DisplayItem<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = |sym| self.grammar.name(sym).unwrap_or("<root>");
        let item = self.item;
        write!(f, "({} ->", name(item.lhs))?;
        for &sym in &item.rhs[..item.pending] {
            write!(f, " {}", name(sym))?;
        }
        f.write_str(" .")?;
        for tree in item.parsed.iter() {
            write!(f, " {}", name(tree.symbol()))?;
        }
        write!(f, ", {})", item.finish)
    }
}
