#![allow(dead_code)]

use std::collections::BTreeSet;

use cfpq::{Graph, NodeId};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A single path `0 → 1 → … → n` spelling the characters of `text`.
pub fn path_graph(text: &str) -> Graph {
    let mut graph = Graph::new();
    graph.add_node(0);
    for (i, ch) in text.chars().enumerate() {
        graph.add_edge(i, ch.to_string(), i + 1);
    }
    graph
}

/// Every node `i` has edges `a` and `b` to `(i + 1) % size` and `c` to `(i * 2) % size`.
pub fn dense_graph(size: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 0..size {
        graph.add_edge(i, "a", (i + 1) % size);
        graph.add_edge(i, "b", (i + 1) % size);
        graph.add_edge(i, "c", (i * 2) % size);
    }
    graph
}

pub fn pairs(pairs: &[(NodeId, NodeId)]) -> BTreeSet<(NodeId, NodeId)> {
    pairs.iter().copied().collect()
}
