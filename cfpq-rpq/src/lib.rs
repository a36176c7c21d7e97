//! Regular path querying.
//!
//! Two algorithms answer the same queries: [`bfs_rpq`] walks the graph and the
//! query automaton in lockstep, and [`tensor_rpq`] closes their intersection.

#![deny(unsafe_code)]

mod bfs;
mod tensor;

pub use crate::bfs::{BfsAnswer, BfsMode, bfs_rpq, bfs_rpq_regex};
pub use crate::tensor::{regex_rpq, tensor_rpq};
