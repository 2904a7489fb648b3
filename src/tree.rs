//! Derivation trees.
//!
//! A tree is an immutable, reference-counted node. Cloning a tree only bumps a reference count,
//! so trees built by the parser and the enumerator share their subtrees freely. Every metric,
//! including the structural hash, is computed once when the node is built.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::rc::Rc;

use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// A derivation tree, or one of its subtrees.
#[derive(Clone)]
pub struct Tree(Rc<Node>);

struct Node {
    kind: Kind,
    hash: u64,
    height: usize,
    width: usize,
    leaves: usize,
    sentence: Rc<str>,
}

#[derive(PartialEq)]
enum Kind {
    Terminal(Symbol),
    NonTerminal(Symbol, Box<[Tree]>),
}

/// Displays a tree in bracketed form, such as `S(a S() b)`.
#[derive(Clone, Copy)]
pub struct DisplayTree<'a> {
    tree: &'a Tree,
    grammar: &'a Grammar,
}

impl Tree {
    /// Creates a leaf for a terminal symbol with the given name.
    pub fn terminal(sym: Symbol, name: Rc<str>) -> Self {
        let mut hasher = DefaultHasher::new();
        hasher.write_u8(0);
        sym.hash(&mut hasher);
        Tree(Rc::new(Node {
            kind: Kind::Terminal(sym),
            hash: hasher.finish(),
            height: 1,
            width: 1,
            leaves: 1,
            sentence: name,
        }))
    }

    /// Creates an internal node for a nonterminal symbol. With no children, the node stands
    /// for an empty derivation.
    pub fn nonterminal<I>(sym: Symbol, children: I) -> Self
    where
        I: IntoIterator<Item = Tree>,
    {
        let children: Box<[Tree]> = children.into_iter().collect();
        let mut hasher = DefaultHasher::new();
        hasher.write_u8(1);
        sym.hash(&mut hasher);
        hasher.write_usize(children.len());
        let mut height = 1;
        let mut width = 0;
        let mut leaves = 0;
        let mut sentence = String::new();
        for child in &children[..] {
            hasher.write_u64(child.0.hash);
            height = height.max(child.height());
            width += child.width();
            leaves += child.leaves();
            if !child.sentence().is_empty() {
                if !sentence.is_empty() {
                    sentence.push(' ');
                }
                sentence.push_str(child.sentence());
            }
        }
        Tree(Rc::new(Node {
            kind: Kind::NonTerminal(sym, children),
            hash: hasher.finish(),
            height: height + 1,
            width: width.max(1),
            leaves,
            sentence: Rc::from(sentence),
        }))
    }

    /// The symbol at the root of this tree.
    pub fn symbol(&self) -> Symbol {
        match self.0.kind {
            Kind::Terminal(sym) | Kind::NonTerminal(sym, _) => sym,
        }
    }

    /// Checks whether this tree is a terminal leaf.
    pub fn is_terminal(&self) -> bool {
        matches!(self.0.kind, Kind::Terminal(_))
    }

    /// Subtrees in left-to-right order. Empty for a terminal and for an empty derivation.
    pub fn children(&self) -> &[Tree] {
        match self.0.kind {
            Kind::Terminal(_) => &[],
            Kind::NonTerminal(_, ref children) => &children[..],
        }
    }

    /// Number of levels: 1 for a terminal. A nonterminal has one more level than its tallest
    /// child, counting an empty derivation as if it had a single leaf.
    pub fn height(&self) -> usize {
        self.0.height
    }

    /// Number of columns needed to lay the tree out, at least 1.
    pub fn width(&self) -> usize {
        self.0.width
    }

    /// Number of terminal leaves.
    pub fn leaves(&self) -> usize {
        self.0.leaves
    }

    /// The derived terminal sentence, with symbols separated by spaces.
    pub fn sentence(&self) -> &str {
        &self.0.sentence
    }

    /// Returns an object that displays the tree with the grammar's symbol names.
    pub fn display<'a>(&'a self, grammar: &'a Grammar) -> DisplayTree<'a> {
        DisplayTree {
            tree: self,
            grammar,
        }
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
            || (self.0.hash == other.0.hash && self.0.kind == other.0.kind)
    }
}

impl Eq for Tree {}

impl Hash for Tree {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl Drop for Node {
    // Frees uniquely owned descendants in a loop, so that deep trees do not overflow the stack.
    fn drop(&mut self) {
        let mut stack = match self.kind {
            Kind::NonTerminal(_, ref mut children) => mem::take(children).into_vec(),
            Kind::Terminal(_) => return,
        };
        while let Some(Tree(node)) = stack.pop() {
            if let Ok(mut node) = Rc::try_unwrap(node) {
                if let Kind::NonTerminal(_, ref mut children) = node.kind {
                    stack.extend(mem::take(children).into_vec());
                }
            }
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.kind {
            Kind::Terminal(sym) => f.debug_tuple("Terminal").field(&sym).finish(),
            Kind::NonTerminal(sym, ref children) => f
                .debug_tuple("NonTerminal")
                .field(&sym)
                .field(children)
                .finish(),
        }
    }
}

impl<'a> fmt::Display for DisplayTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = self.grammar.name(self.tree.symbol()).unwrap_or("?");
        f.write_str(name)?;
        if self.tree.is_terminal() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, child) in self.tree.children().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", child.display(self.grammar))?;
        }
        f.write_str(")")
    }
}

/// Orders trees first by the length of the derived sentence, then by the sentence, then by
/// height.
pub fn cmp_ascending(a: &Tree, b: &Tree) -> Ordering {
    a.sentence()
        .chars()
        .count()
        .cmp(&b.sentence().chars().count())
        .then_with(|| a.sentence().cmp(b.sentence()))
        .then_with(|| a.height().cmp(&b.height()))
}

/// Sorts trees in ascending order. Equal trees keep their relative order.
pub fn sort_ascending(trees: &mut [Tree]) {
    trees.sort_by(cmp_ascending);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(tree: &Tree) -> u64 {
        let mut hasher = DefaultHasher::new();
        tree.hash(&mut hasher);
        hasher.finish()
    }

    fn symbols() -> (Symbol, Symbol, Symbol) {
        (Symbol::from(0u32), Symbol::from(1u32), Symbol::from(2u32))
    }

    #[test]
    fn test_structural_equality() {
        let (s, a, b) = symbols();
        let build = || {
            Tree::nonterminal(
                s,
                [
                    Tree::terminal(a, Rc::from("a")),
                    Tree::nonterminal(s, []),
                    Tree::terminal(b, Rc::from("b")),
                ],
            )
        };
        let left = build();
        let right = build();
        assert!(!Rc::ptr_eq(&left.0, &right.0));
        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));

        let other = Tree::nonterminal(s, [Tree::terminal(a, Rc::from("a"))]);
        assert_ne!(left, other);
    }

    #[test]
    fn test_metrics() {
        let (s, a, b) = symbols();
        let empty = Tree::nonterminal(s, []);
        assert_eq!((empty.height(), empty.width(), empty.leaves()), (2, 1, 0));
        assert_eq!(empty.sentence(), "");

        let leaf = Tree::terminal(a, Rc::from("a"));
        assert_eq!((leaf.height(), leaf.width()), (1, 1));

        let tree = Tree::nonterminal(s, [leaf.clone(), empty, Tree::terminal(b, Rc::from("b"))]);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.width(), 3);
        assert_eq!(tree.leaves(), 2);
        assert_eq!(tree.sentence(), "a b");
        assert_eq!(tree.children()[0], leaf);
    }

    #[test]
    fn test_variants_differ() {
        let (s, _, _) = symbols();
        let leaf = Tree::terminal(s, Rc::from("S"));
        let node = Tree::nonterminal(s, []);
        assert_ne!(leaf, node);
    }

    #[test]
    fn test_drop_deep_tree() {
        let (s, a, _) = symbols();
        let mut tree = Tree::terminal(a, Rc::from("a"));
        for _ in 0..200_000 {
            tree = Tree::nonterminal(s, [tree]);
        }
        assert_eq!(tree.height(), 200_001);
        let shared = tree.children()[0].clone();
        drop(tree);
        assert_eq!(shared.height(), 200_000);
        assert_eq!(shared.sentence(), "a");
    }

    #[test]
    fn test_ascending_order() {
        let (s, a, b) = symbols();
        let leaf_a = Tree::terminal(a, Rc::from("a"));
        let leaf_b = Tree::terminal(b, Rc::from("b"));
        let ab = Tree::nonterminal(s, [leaf_a.clone(), leaf_b.clone()]);
        let only_b = Tree::nonterminal(s, [leaf_b]);
        let tall_a = Tree::nonterminal(s, [Tree::nonterminal(s, [leaf_a.clone()])]);
        let only_a = Tree::nonterminal(s, [leaf_a]);
        let mut trees = vec![ab.clone(), tall_a.clone(), only_b.clone(), only_a.clone()];
        sort_ascending(&mut trees);
        assert_eq!(trees, [only_a, tall_a, only_b, ab]);
    }
}
