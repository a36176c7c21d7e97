//! Normalization of context-free grammars.
//!
//! A grammar is brought to weak Chomsky normal form in three steps: unit rules are
//! eliminated, useless rules are removed, and the remaining long or mixed bodies are
//! split with fresh variables.

#![deny(unsafe_code)]

mod normalize;
pub mod useful;
mod weak_cnf;

pub use crate::normalize::{CfgNormalizeExt, normalize};
pub use crate::useful::{RuleUsefulness, Usefulness, UsefulnessForRule};
pub use crate::weak_cnf::{Production, WeakCnf};
