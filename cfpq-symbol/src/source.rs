//! Source

use std::borrow::Cow;
use std::sync::Arc;

use crate::Symbol;

/// Name of a symbol. Shared between grammars derived from one another.
pub type SymbolName = Arc<str>;

/// A source of numeric symbols.
///
/// Every generated symbol may carry a name. Gensyms, the symbols created
/// during grammar transformations, usually have none.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    names: Vec<Option<SymbolName>>,
}

impl SymbolSource {
    /// Creates a source of numeric symbols with an empty symbol space.
    pub fn new() -> Self {
        Self { names: vec![] }
    }

    /// Returns generated symbols.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        let mut result = [Symbol::default(); N];
        for dest in &mut result {
            *dest = self.next_sym(None);
        }
        result
    }

    /// Generates a new unique symbol.
    ///
    /// If a name is given, it will be recorded.
    pub fn next_sym(&mut self, name: Option<Cow<str>>) -> Symbol {
        let ret = Symbol::from(self.names.len());
        self.names.push(name.map(|name| SymbolName::from(&*name)));
        ret
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.names.len()
    }

    /// Returns the recorded name of the symbol, if any.
    pub fn get_name(&self, sym: Symbol) -> Option<&str> {
        self.names.get(sym.usize()).and_then(|name| name.as_deref())
    }

    /// Returns the symbol's name, or `g<id>` for gensyms.
    pub fn name_of(&self, sym: Symbol) -> Cow<'_, str> {
        match self.get_name(sym) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("g{}", sym.usize())),
        }
    }

    /// Finds the first symbol with the given name.
    pub fn find(&self, name: &str) -> Option<Symbol> {
        self.names
            .iter()
            .position(|candidate| candidate.as_deref() == Some(name))
            .map(Symbol::from)
    }

    /// Iterates over all symbols generated so far.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + use<> {
        (0..self.num_syms()).map(Symbol::from)
    }

    /// Returns an infinite iterator of symbols in ID order, without
    /// recording them anywhere.
    pub fn generate_fresh() -> impl Iterator<Item = Symbol> {
        (0..).map(Symbol::from)
    }
}

