//! Definitions of the context-free grammar type and its rules.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::symbol::{Symbol, SymbolSource};
use crate::tree::Tree;

/// The marker for an empty alternative in textual input.
pub const EPSILON: char = '\u{03b5}';

/// One alternative expansion of a nonterminal. Shared, so that parser items can refer to it
/// without copying.
pub type Production = Rc<[Symbol]>;

/// Context-free grammar type.
///
/// Nonterminals are kept in order of definition. The left-hand side of the first production
/// is the start symbol. Any symbol without productions is a terminal.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    /// The symbol source.
    sym_source: SymbolSource,
    /// Alternatives of every nonterminal, in order of definition.
    productions: IndexMap<Symbol, Vec<Production>>,
}

/// The rule builder.
pub struct RuleBuilder<'a> {
    lhs: Symbol,
    grammar: &'a mut Grammar,
}

impl Grammar {
    /// Creates an empty context-free grammar.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an immutable reference to the grammar's symbol source.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Returns the symbol for the given name, interning it if needed.
    pub fn intern(&mut self, name: &str) -> Symbol {
        self.sym_source.intern(name)
    }

    /// Looks up the symbol for a name.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.sym_source.symbol(name)
    }

    /// Returns the name of a symbol.
    pub fn name(&self, sym: Symbol) -> Option<&str> {
        self.sym_source.name(sym)
    }

    /// Returns the number of symbols in use, terminals included.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Adds a production to the grammar.
    pub fn add_production<I, S>(&mut self, lhs: &str, rhs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lhs = self.intern(lhs);
        let rhs: Vec<Symbol> = rhs
            .into_iter()
            .map(|name| self.intern(name.as_ref()))
            .collect();
        self.add_rule(lhs, &rhs[..]);
    }

    /// Adds a production with already interned symbols.
    pub fn add_rule(&mut self, lhs: Symbol, rhs: &[Symbol]) {
        self.productions.entry(lhs).or_default().push(Rc::from(rhs));
    }

    /// Adds one production for every `|`-separated alternative. Each alternative is read as a
    /// sequence of one-character symbols; an empty alternative is an empty production.
    pub fn add_alternatives(&mut self, lhs: &str, alternatives: &str) {
        for alternative in alternatives.split('|') {
            self.add_production(lhs, symbols_from_str(alternative));
        }
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: &str) -> RuleBuilder<'_> {
        let lhs = self.intern(lhs);
        RuleBuilder { lhs, grammar: self }
    }

    /// Start symbol (the nonterminal on the left of the first production).
    pub fn start(&self) -> Option<Symbol> {
        self.productions.keys().next().copied()
    }

    /// Nonterminals of the grammar, in order of definition.
    pub fn nonterminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.productions.keys().copied()
    }

    /// Returns the number of nonterminals.
    pub fn num_nonterminals(&self) -> usize {
        self.productions.len()
    }

    /// Expansions of a nonterminal, or `None` for a terminal.
    pub fn expansions(&self, sym: Symbol) -> Option<&[Production]> {
        self.productions.get(&sym).map(|rhss| &rhss[..])
    }

    /// Checks whether the symbol has at least one production.
    pub fn is_nonterminal(&self, sym: Symbol) -> bool {
        self.productions.contains_key(&sym)
    }

    /// Iterates over all productions as `(lhs, rhs)` pairs, grouped by nonterminal.
    pub fn productions(&self) -> impl Iterator<Item = (Symbol, &Production)> + '_ {
        self.productions
            .iter()
            .flat_map(|(&lhs, rhss)| rhss.iter().map(move |rhs| (lhs, rhs)))
    }

    /// Creates a leaf of a derivation tree.
    pub fn leaf(&self, sym: Symbol) -> Tree {
        let name = self.sym_source.name_rc(sym).unwrap_or_else(|| Rc::from(""));
        Tree::terminal(sym, name)
    }
}

impl<'a> RuleBuilder<'a> {
    /// Starts building a new rule with the given LHS.
    pub fn rule(self, lhs: &str) -> Self {
        let lhs = self.grammar.intern(lhs);
        RuleBuilder {
            lhs,
            grammar: self.grammar,
        }
    }

    /// Adds a rule alternative to the grammar.
    pub fn rhs<I, S>(self, syms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rhs: Vec<Symbol> = syms
            .into_iter()
            .map(|name| self.grammar.intern(name.as_ref()))
            .collect();
        self.grammar.add_rule(self.lhs, &rhs[..]);
        self
    }
}

/// Splits a sentence into one-character symbols, skipping whitespace and the `ε` marker.
pub fn symbols_from_str(s: &str) -> Vec<String> {
    s.chars()
        .filter(|&c| !c.is_whitespace() && c != EPSILON)
        .map(String::from)
        .collect()
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = |sym| self.name(sym).unwrap_or("?");
        for (lhs, rhss) in &self.productions {
            write!(f, "{} \u{2192} ", name(*lhs))?;
            for (i, rhs) in rhss.iter().enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                if rhs.is_empty() {
                    write!(f, "{}", EPSILON)?;
                }
                for (j, &sym) in rhs.iter().enumerate() {
                    if j > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(name(sym))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
