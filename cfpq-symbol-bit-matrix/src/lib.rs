//! Relations between grammar symbols, `R(A, B)`, stored as bit matrices.

#![deny(unsafe_code)]

mod symbol_bit_matrix;

pub use crate::symbol_bit_matrix::{CfgSymbolBitMatrixExt, SymbolBitMatrix};
