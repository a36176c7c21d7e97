//! The interface shared by closure algorithms.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use cfpq_automaton::{Graph, NodeId, NodeQuery, Relation};
use cfpq_normalize::WeakCnf;
use cfpq_symbol::Symbol;

use crate::hellings::HellingsClosure;
use crate::matrix::MatrixClosure;

/// Progress of one closure computation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClosureStats {
    /// Number of rounds, including the last one, which derives nothing new.
    pub rounds: usize,
    /// Size of the relation after seeding, then after every round.
    pub sizes: Vec<usize>,
}

impl ClosureStats {
    /// Checks that the relation never shrank.
    pub fn is_monotone(&self) -> bool {
        self.sizes.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// An algorithm computing every triple `(A, u, v)` such that some path from
/// `u` to `v` spells a word derived from the variable `A`.
pub trait ClosureEngine: Send + Sync {
    /// Short name of the algorithm.
    fn name(&self) -> &'static str;

    /// Computes the full relation over all variables and all nodes.
    fn closure(&self, graph: &Graph, grammar: &WeakCnf) -> (Relation<Symbol>, ClosureStats);

    /// Pairs derived from the start variable, restricted to the query's nodes.
    fn query(&self, graph: &Graph, grammar: &WeakCnf, query: &NodeQuery) -> BTreeSet<(NodeId, NodeId)> {
        let Some(start) = grammar.start() else {
            return BTreeSet::new();
        };
        let (relation, _) = self.closure(graph, grammar);
        relation.project(&start, query)
    }
}

/// The triples that hold before any binary production is applied: `(A, u, u)`
/// for every node and `A ::= ()`, and `(A, u, v)` for every edge labeled with
/// `a` and `A ::= a`.
pub(crate) fn initial_triples(graph: &Graph, grammar: &WeakCnf) -> Vec<(Symbol, NodeId, NodeId)> {
    let mut by_label: BTreeMap<String, Vec<Symbol>> = BTreeMap::new();
    for (head, terminal) in grammar.terminal_productions() {
        by_label
            .entry(grammar.name_of(terminal).into_owned())
            .or_default()
            .push(head);
    }
    let mut triples = vec![];
    for head in grammar.epsilon_heads() {
        triples.extend(graph.nodes().map(|node| (head, node, node)));
    }
    for edge in graph.edges() {
        for &head in by_label.get(&edge.label).into_iter().flatten() {
            triples.push((head, edge.source, edge.target));
        }
    }
    triples
}

/// Selects a closure algorithm at run time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// Fixed point of boolean matrix products.
    #[default]
    Matrix,
    /// Hellings' worklist algorithm.
    Hellings,
}

/// A name that does not denote a closure algorithm.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown closure algorithm `{0}`, expected `matrix` or `hellings`")]
pub struct UnknownAlgorithm(pub String);

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Matrix, Algorithm::Hellings];

    pub fn engine(self) -> &'static dyn ClosureEngine {
        match self {
            Algorithm::Matrix => &MatrixClosure,
            Algorithm::Hellings => &HellingsClosure,
        }
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "matrix" => Ok(Algorithm::Matrix),
            "hellings" => Ok(Algorithm::Hellings),
            _ => Err(UnknownAlgorithm(name.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.engine().name())
    }
}
