//! Edge-labeled directed multigraphs.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use crate::automaton::Automaton;
use crate::query::NodeQuery;

/// Identifier of a graph node.
pub type NodeId = usize;

/// A directed edge with one label.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Edge {
    pub source: NodeId,
    pub label: String,
    pub target: NodeId,
}

/// A directed multigraph with labeled edges. Parallel edges with equal labels
/// are kept.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph {
    nodes: BTreeSet<NodeId>,
    edges: Vec<Edge>,
}

/// Summary of a graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GraphInfo {
    pub num_nodes: usize,
    pub num_edges: usize,
    /// Distinct edge labels, sorted.
    pub labels: Vec<String>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an isolated node, or does nothing if it exists.
    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Adds an edge and both of its nodes.
    pub fn add_edge(&mut self, source: NodeId, label: impl Into<String>, target: NodeId) {
        self.nodes.insert(source);
        self.nodes.insert(target);
        self.edges.push(Edge {
            source,
            label: label.into(),
            target,
        });
    }

    /// Nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges[..]
    }

    /// Distinct edge labels.
    pub fn labels(&self) -> BTreeSet<&str> {
        self.edges.iter().map(|edge| &edge.label[..]).collect()
    }

    /// Node count, edge count and sorted labels.
    pub fn info(&self) -> GraphInfo {
        GraphInfo {
            num_nodes: self.num_nodes(),
            num_edges: self.edges.len(),
            labels: self.labels().into_iter().map(str::to_string).collect(),
        }
    }

    /// Dense 0-based positions of nodes in ascending node order.
    pub fn node_index(&self) -> BTreeMap<NodeId, usize> {
        self.nodes().enumerate().map(|(i, node)| (node, i)).collect()
    }

    /// Builds two cycles that share node `0`.
    ///
    /// The first cycle `0 → 1 → … → n → 0` is labeled with the first label, and
    /// the second cycle `0 → n+1 → … → n+m → 0` with the second.
    pub fn two_cycles(n: usize, m: usize, (first, second): (&str, &str)) -> Self {
        let mut graph = Graph::new();
        graph.add_node(0);
        for i in 0..n {
            graph.add_edge(i, first, i + 1);
        }
        graph.add_edge(n, first, 0);
        let mut previous = 0;
        for i in n + 1..=n + m {
            graph.add_edge(previous, second, i);
            previous = i;
        }
        graph.add_edge(previous, second, 0);
        graph
    }

    /// Views the graph as a nondeterministic automaton whose states are nodes.
    ///
    /// Start and final states come from the query, with every node as the
    /// default. Query nodes missing from the graph become isolated states.
    pub fn to_nfa(&self, query: &NodeQuery) -> Automaton<NodeId> {
        let mut nfa = Automaton::new();
        let mut states: BTreeSet<NodeId> = self.nodes.clone();
        states.extend(query.start_nodes.iter().flatten());
        states.extend(query.final_nodes.iter().flatten());
        for &node in &states {
            nfa.add_state(node);
        }
        for node in query.start_nodes_in(self) {
            nfa.add_start(node);
        }
        for node in query.final_nodes_in(self) {
            nfa.add_final(node);
        }
        for edge in &self.edges {
            nfa.add_transition(edge.source, &edge.label, edge.target);
        }
        nfa
    }

    /// Pairs `(u, v)` joined by a non-empty path, ignoring labels, with `u` a
    /// start node and `v` a final node of the query.
    pub fn reachable_pairs(&self, query: &NodeQuery) -> BTreeSet<(NodeId, NodeId)> {
        let decomposition = self.to_nfa(query).to_matrices();
        let mut reach = decomposition.adjacency();
        reach.transitive_closure();
        trace!("{} reachable pairs before filtering", reach.count_ones());
        reach
            .iter_ones()
            .filter(|&(from, to)| decomposition.start.contains(&from) && decomposition.finals.contains(&to))
            .map(|(from, to)| (*decomposition.states.state(from), *decomposition.states.state(to)))
            .collect()
    }
}
