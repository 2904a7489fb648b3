//! Library for exploring the derivations of small context-free grammars. Finds every
//! derivation tree of a sentence, enumerates derivation trees up to a bounded depth, and
//! computes the static properties of a grammar.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod earley;
pub mod expansion;
pub mod grammar;
pub mod limits;
pub mod properties;
mod rhs_closure;
pub mod symbol;
pub mod tree;

pub use crate::earley::{Parse, Parser};
pub use crate::expansion::{enumerate, Enumeration, Expansion};
pub use crate::grammar::{symbols_from_str, Grammar, Production, RuleBuilder, EPSILON};
pub use crate::limits::{EnumerationError, EnumerationLimits, ParseLimits};
pub use crate::properties::{Diagnostic, DiagnosticKind, GrammarProperties};
pub use crate::symbol::Symbol;
pub use crate::tree::Tree;
