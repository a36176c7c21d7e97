//! Projection of reachability relations onto queried nodes.

use std::collections::BTreeSet;

use crate::graph::{Graph, NodeId};

/// The nodes a query starts from and ends at. `None` stands for every node of
/// the graph.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeQuery {
    pub start_nodes: Option<BTreeSet<NodeId>>,
    pub final_nodes: Option<BTreeSet<NodeId>>,
}

impl NodeQuery {
    /// A query over all nodes.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_start_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.start_nodes = Some(nodes.into_iter().collect());
        self
    }

    pub fn with_final_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.final_nodes = Some(nodes.into_iter().collect());
        self
    }

    pub fn is_start(&self, node: NodeId) -> bool {
        self.start_nodes
            .as_ref()
            .is_none_or(|nodes| nodes.contains(&node))
    }

    pub fn is_final(&self, node: NodeId) -> bool {
        self.final_nodes
            .as_ref()
            .is_none_or(|nodes| nodes.contains(&node))
    }

    /// Start nodes, resolved against the graph.
    pub fn start_nodes_in(&self, graph: &Graph) -> BTreeSet<NodeId> {
        match &self.start_nodes {
            Some(nodes) => nodes.clone(),
            None => graph.nodes().collect(),
        }
    }

    /// Final nodes, resolved against the graph.
    pub fn final_nodes_in(&self, graph: &Graph) -> BTreeSet<NodeId> {
        match &self.final_nodes {
            Some(nodes) => nodes.clone(),
            None => graph.nodes().collect(),
        }
    }
}

/// A set of `(symbol, source, target)` triples.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relation<L> {
    triples: BTreeSet<(L, NodeId, NodeId)>,
}

impl<L: Ord> Default for Relation<L> {
    fn default() -> Self {
        Relation {
            triples: BTreeSet::new(),
        }
    }
}

impl<L: Ord + Clone> Relation<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple. Returns whether it was new.
    pub fn insert(&mut self, symbol: L, source: NodeId, target: NodeId) -> bool {
        self.triples.insert((symbol, source, target))
    }

    pub fn contains(&self, symbol: &L, source: NodeId, target: NodeId) -> bool {
        self.triples.contains(&(symbol.clone(), source, target))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(L, NodeId, NodeId)> {
        self.triples.iter()
    }

    /// All `(source, target)` pairs of one symbol.
    pub fn pairs_of(&self, symbol: &L) -> BTreeSet<(NodeId, NodeId)> {
        self.triples
            .iter()
            .filter(|(sym, _, _)| sym == symbol)
            .map(|&(_, source, target)| (source, target))
            .collect()
    }

    /// The answer to a query: pairs of `symbol` that start at a start node and end
    /// at a final node.
    pub fn project(&self, symbol: &L, query: &NodeQuery) -> BTreeSet<(NodeId, NodeId)> {
        self.pairs_of(symbol)
            .into_iter()
            .filter(|&(source, target)| query.is_start(source) && query.is_final(target))
            .collect()
    }
}

impl<L: Ord> FromIterator<(L, NodeId, NodeId)> for Relation<L> {
    fn from_iter<I: IntoIterator<Item = (L, NodeId, NodeId)>>(iter: I) -> Self {
        Relation {
            triples: iter.into_iter().collect(),
        }
    }
}

impl<L: Ord> Extend<(L, NodeId, NodeId)> for Relation<L> {
    fn extend<I: IntoIterator<Item = (L, NodeId, NodeId)>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}
