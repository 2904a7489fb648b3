//! Source of interned symbols.

use std::rc::Rc;

use indexmap::IndexSet;

use crate::symbol::Symbol;

/// A source of symbols. Every distinct name is interned into exactly one symbol, and the
/// symbol's ID is the position of its name in the table.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    names: IndexSet<Rc<str>>,
}

impl SymbolSource {
    /// Creates a source of symbols with an empty symbol space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves the symbol for a name, or generates a new one if the name was not seen before.
    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(id) = self.names.get_index_of(name) {
            return Symbol::from(id);
        }
        let (id, _) = self.names.insert_full(Rc::from(name));
        Symbol::from(id)
    }

    /// Looks up the symbol for a name without interning it.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.names.get_index_of(name).map(Symbol::from)
    }

    /// Returns the name of a symbol.
    pub fn name(&self, sym: Symbol) -> Option<&str> {
        self.names.get_index(sym.usize()).map(|name| &name[..])
    }

    /// Returns a shared handle to the name of a symbol.
    pub fn name_rc(&self, sym: Symbol) -> Option<Rc<str>> {
        self.names.get_index(sym.usize()).cloned()
    }

    /// Returns a symbol that no name maps to. Meant for synthetic symbols, such as the root of
    /// a parse.
    pub fn fresh(&self) -> Symbol {
        Symbol::from(self.num_syms())
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut source = SymbolSource::new();
        let a = source.intern("a");
        let b = source.intern("b");
        assert_ne!(a, b);
        assert_eq!(source.intern("a"), a);
        assert_eq!(source.num_syms(), 2);
        assert_eq!(source.name(b), Some("b"));
        assert_eq!(source.symbol("c"), None);
    }

    #[test]
    fn test_fresh_symbol_has_no_name() {
        let mut source = SymbolSource::new();
        source.intern("S");
        let fresh = source.fresh();
        assert_eq!(source.name(fresh), None);
        assert_eq!(source.symbol("S").map(Symbol::usize), Some(0));
        assert_eq!(fresh.usize(), 1);
    }
}
