//! A type that can represent symbols in a context-free grammar. Symbols are distinguished by their
//! IDs. Names are optional and live in the [`SymbolSource`] that generated the symbol.

#![deny(unsafe_code)]

mod source;
mod symbol;

pub use self::source::{SymbolName, SymbolSource};
pub use self::symbol::Symbol;
