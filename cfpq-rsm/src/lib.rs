//! Extended context-free grammars and the recursive state machines compiled
//! from them.

#![deny(unsafe_code)]

mod ecfg;
mod rsm;

pub use crate::ecfg::{DEFAULT_START, Ecfg, EcfgError};
pub use crate::rsm::{Rsm, minimize_rsm};
