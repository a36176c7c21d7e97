//! Context-free and regular path querying on edge-labeled graphs.
//!
//! The components live in their own crates and are re-exported here. The
//! functions at the top level are the usual entry points.

#![deny(unsafe_code)]

pub use cfpq_automaton as automaton;
pub use cfpq_automaton::{
    Automaton, Decomposition, Edge, Graph, GraphInfo, NodeId, NodeQuery, Relation, intersect,
};
pub use cfpq_bool_matrix::BoolMatrix;
#[cfg(feature = "cfpq-closure")]
pub use cfpq_closure as closure;
#[cfg(feature = "cfpq-closure")]
pub use cfpq_closure::{Algorithm, hellings_closure, matrix_closure};
#[cfg(feature = "cfpq-cyk")]
pub use cfpq_cyk as cyk;
#[cfg(feature = "cfpq-cyk")]
pub use cfpq_cyk::cyk_accepts;
pub use cfpq_grammar::*;
pub use cfpq_normalize as normalize;
pub use cfpq_normalize::{CfgNormalizeExt, Production, WeakCnf, normalize};
#[cfg(feature = "cfpq-regexp")]
pub use cfpq_regexp as regexp;
#[cfg(feature = "cfpq-regexp")]
pub use cfpq_regexp::Regex;
#[cfg(feature = "cfpq-rpq")]
pub use cfpq_rpq as rpq;
#[cfg(feature = "cfpq-rpq")]
pub use cfpq_rpq::{BfsAnswer, BfsMode, bfs_rpq};
#[cfg(feature = "cfpq-rsm")]
pub use cfpq_rsm as rsm;
pub use cfpq_symbol::*;
#[cfg(feature = "cfpq-symbol-bit-matrix")]
pub use cfpq_symbol_bit_matrix as symbol_bit_matrix;

/// Splits an automaton into its state index and one boolean matrix per label.
pub fn to_matrices<S: Clone>(automaton: &Automaton<S>) -> Decomposition<S> {
    automaton.to_matrices()
}

/// Runs the chosen closure algorithm on a grammar given as text.
#[cfg(feature = "cfpq-closure")]
pub fn query_text(
    algorithm: Algorithm,
    graph: &Graph,
    grammar: &str,
    start: &str,
    query: &NodeQuery,
) -> Result<std::collections::BTreeSet<(NodeId, NodeId)>, GrammarSyntaxError> {
    let grammar = normalize(grammar, start)?;
    Ok(algorithm.engine().query(graph, &grammar, query))
}
