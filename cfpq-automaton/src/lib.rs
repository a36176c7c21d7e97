//! Edge-labeled graphs and finite automata.
//!
//! Automata decompose into one boolean matrix per label. Intersection works on
//! those matrices through Kronecker products. Graphs turn into automata whose
//! states are nodes.

#![deny(unsafe_code)]

mod automaton;
mod decompose;
mod determinize;
mod epsilon;
mod graph;
mod intersect;
mod query;
mod state_index;

pub use crate::automaton::{Automaton, State};
pub use crate::decompose::Decomposition;
pub use crate::epsilon::EpsilonNfa;
pub use crate::graph::{Edge, Graph, GraphInfo, NodeId};
pub use crate::intersect::intersect;
pub use crate::query::{NodeQuery, Relation};
pub use crate::state_index::StateIndex;
pub use cfpq_bool_matrix::BoolMatrix;
