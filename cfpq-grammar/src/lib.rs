//! Context-free grammars for path querying. Grammars are built with a rule builder or loaded
//! from text, then handed to the normalizer.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod cfg;
pub mod load;
pub mod rule_builder;
pub mod symbol_bit_set;

pub use crate::cfg::{Cfg, CfgRule};
pub use crate::load::{CfgLoadExt, GrammarSyntaxError};
pub use crate::rule_builder::RuleBuilder;
pub use crate::symbol_bit_set::SymbolBitSet;
pub use cfpq_symbol::{Symbol, SymbolSource};

pub(crate) mod local_prelude {
    pub use crate::cfg::{Cfg, CfgRule};
    pub use crate::symbol_bit_set::SymbolBitSet;
    pub use cfpq_symbol::{Symbol, SymbolSource};
}
