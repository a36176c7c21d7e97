//! Sets of symbols, such as terminals or nullable symbols.

use std::ops;

use bit_vec::BitVec;

use crate::local_prelude::*;

/// A set of symbols backed by a bit vector indexed by [`Symbol::usize`].
///
/// The vector grows when a symbol past its end is inserted. Symbols past the end
/// are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

impl SymbolBitSet {
    /// Constructs an empty set.
    pub fn new() -> Self {
        SymbolBitSet::default()
    }

    /// Constructs a set sized for every symbol of the grammar, with all bits equal to
    /// `elem`.
    pub fn from_elem(grammar: &Cfg, elem: bool) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(grammar.num_syms(), elem),
        }
    }

    /// Includes or excludes a symbol.
    pub fn set(&mut self, sym: Symbol, elem: bool) {
        let index = sym.usize();
        if index >= self.bit_vec.len() {
            if !elem {
                return;
            }
            self.bit_vec.grow(index + 1 - self.bit_vec.len(), false);
        }
        self.bit_vec.set(index, elem);
    }

    /// Adds a symbol. Returns whether it was absent.
    pub fn insert(&mut self, sym: Symbol) -> bool {
        let absent = !self[sym];
        self.set(sym, true);
        absent
    }

    /// Iterates over symbols in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.bit_vec
            .iter()
            .enumerate()
            .filter_map(|(id, present)| present.then(|| Symbol::from(id)))
    }

    /// The number of symbols the set has room for.
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bit_vec.none()
    }

    /// Checks whether every symbol the set has room for is included.
    pub fn all(&self) -> bool {
        self.bit_vec.all()
    }
}

impl Extend<Symbol> for SymbolBitSet {
    fn extend<I: IntoIterator<Item = Symbol>>(&mut self, iter: I) {
        for sym in iter {
            self.set(sym, true);
        }
    }
}

impl FromIterator<Symbol> for SymbolBitSet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut set = SymbolBitSet::new();
        set.extend(iter);
        set
    }
}

impl ops::Index<Symbol> for SymbolBitSet {
    type Output = bool;

    fn index(&self, sym: Symbol) -> &bool {
        if self.bit_vec.get(sym.usize()).unwrap_or(false) {
            &true
        } else {
            &false
        }
    }
}

impl Cfg {
    /// Returns the set of symbols that derive the empty string.
    pub fn nullable_symbols(&self) -> SymbolBitSet {
        let mut nullable = SymbolBitSet::from_elem(self, false);
        nullable.extend(self.rules().filter(|rule| rule.rhs.is_empty()).map(|rule| rule.lhs));
        self.rhs_closure_for_all(&mut nullable);
        nullable
    }

    /// Returns the set of symbols that derive some string of terminals. Terminals
    /// are productive by themselves.
    pub fn productive_symbols(&self) -> SymbolBitSet {
        let mut productive = SymbolBitSet::from_elem(self, false);
        productive.extend(self.terminals());
        productive.extend(self.rules().filter(|rule| rule.rhs.is_empty()).map(|rule| rule.lhs));
        self.rhs_closure_for_all(&mut productive);
        productive
    }

    /// Returns the set of symbols which appear in the grammar's rules.
    pub fn used_symbols(&self) -> SymbolBitSet {
        let mut used = SymbolBitSet::from_elem(self, false);
        for rule in self.rules() {
            used.set(rule.lhs, true);
            used.extend(rule.rhs.iter().copied());
        }
        used
    }
}
