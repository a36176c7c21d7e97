//! Context-free path querying.
//!
//! Given a graph and a grammar in weak Chomsky normal form, both algorithms
//! compute every triple `(A, u, v)` such that a path from `u` to `v` spells a
//! word derived from `A`. They always agree.
//!
//! ```text
//! let grammar = normalize("S -> a S b S | $", "S")?;
//! let pairs = matrix_closure(&graph, &grammar, &NodeQuery::all());
//! ```

#![deny(unsafe_code)]

mod engine;
mod hellings;
mod matrix;

pub use crate::engine::{Algorithm, ClosureEngine, ClosureStats, UnknownAlgorithm};
pub use crate::hellings::{HellingsClosure, hellings_closure};
pub use crate::matrix::{MatrixClosure, matrix_closure};
