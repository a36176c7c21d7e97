//! Closure as a fixed point of boolean matrix products.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use cfpq_automaton::{Graph, NodeId, NodeQuery, Relation};
use cfpq_bool_matrix::BoolMatrix;
use cfpq_normalize::WeakCnf;
use cfpq_symbol::Symbol;

use crate::engine::{ClosureEngine, ClosureStats, initial_triples};

/// Keeps one node-by-node matrix per variable and applies `M[A] |= M[B] · M[C]`
/// for every `A ::= B C` until a full sweep changes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatrixClosure;

impl ClosureEngine for MatrixClosure {
    fn name(&self) -> &'static str {
        "matrix"
    }

    fn closure(&self, graph: &Graph, grammar: &WeakCnf) -> (Relation<Symbol>, ClosureStats) {
        let index = graph.node_index();
        let nodes: Vec<NodeId> = graph.nodes().collect();
        let size = nodes.len();

        let mut matrices: BTreeMap<Symbol, BoolMatrix> = grammar
            .variables()
            .iter()
            .map(|&variable| (variable, BoolMatrix::square(size)))
            .collect();
        for (head, source, target) in initial_triples(graph, grammar) {
            matrices
                .entry(head)
                .or_insert_with(|| BoolMatrix::square(size))
                .set(index[&source], index[&target], true);
        }
        let binary: Vec<_> = grammar.binary_productions().collect();

        let count = |matrices: &BTreeMap<Symbol, BoolMatrix>| -> usize {
            matrices.values().map(BoolMatrix::count_ones).sum()
        };
        let mut stats = ClosureStats {
            rounds: 0,
            sizes: vec![count(&matrices)],
        };
        let zero = BoolMatrix::square(size);
        loop {
            let mut changed = false;
            for &(head, left, right) in &binary {
                let left = matrices.get(&left).unwrap_or(&zero);
                let right = matrices.get(&right).unwrap_or(&zero);
                let product = left.mul(right);
                changed |= matrices
                    .entry(head)
                    .or_insert_with(|| BoolMatrix::square(size))
                    .union_with(&product);
            }
            stats.rounds += 1;
            stats.sizes.push(count(&matrices));
            trace!("matrix closure round {}: {:?}", stats.rounds, stats.sizes.last());
            if !changed {
                break;
            }
        }
        debug!(
            "matrix closure over {} nodes finished after {} rounds",
            size, stats.rounds
        );

        let mut relation = Relation::new();
        for (&variable, matrix) in &matrices {
            for (i, j) in matrix.iter_ones() {
                relation.insert(variable, nodes[i], nodes[j]);
            }
        }
        (relation, stats)
    }
}

/// Pairs of query nodes joined by a path whose labels the start variable
/// derives, computed with [`MatrixClosure`].
pub fn matrix_closure(graph: &Graph, grammar: &WeakCnf, query: &NodeQuery) -> BTreeSet<(NodeId, NodeId)> {
    MatrixClosure.query(graph, grammar, query)
}
