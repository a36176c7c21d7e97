//! Multiple-source BFS over the direct sum of a query automaton and a graph.
//!
//! The frontier has one block of rows per source. Inside a block, row `q` holds
//! the graph nodes reached in query state `q`, plus the bit of `q` itself in the
//! first columns. Multiplying by `Q ⊕ G` moves both parts one edge forward, and
//! the graph part is then moved to the rows of the query states it reached.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use cfpq_automaton::{Automaton, Decomposition, Graph, NodeId, NodeQuery, State};
use cfpq_bool_matrix::BoolMatrix;
use cfpq_regexp::{Regex, RegexError};

/// How answers are attributed to start nodes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum BfsMode {
    /// All start nodes form one source.
    #[default]
    Joint,
    /// All start nodes together, answered as `(start, reached)` pairs. Each
    /// start node still gets a block of rows so that reached nodes keep their
    /// source.
    JointPairs,
    /// Every start node is a source of its own.
    Separate,
}

/// The result of [`bfs_rpq`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BfsAnswer {
    /// Final nodes reached from any start node.
    Reached(BTreeSet<NodeId>),
    /// `(start, reached)` pairs over all start nodes.
    Pairs(BTreeSet<(NodeId, NodeId)>),
    /// Sorted final nodes reached from each start node. Every start node has
    /// an entry.
    BySource(BTreeMap<NodeId, Vec<NodeId>>),
}

impl BfsAnswer {
    /// Final nodes reached from any start node.
    pub fn reached(&self) -> BTreeSet<NodeId> {
        match self {
            BfsAnswer::Reached(nodes) => nodes.clone(),
            BfsAnswer::Pairs(pairs) => pairs.iter().map(|&(_, node)| node).collect(),
            BfsAnswer::BySource(by_source) => by_source.values().flatten().copied().collect(),
        }
    }

    /// `(start, reached)` pairs, unless the search merged its sources.
    pub fn pairs(&self) -> Option<BTreeSet<(NodeId, NodeId)>> {
        match self {
            BfsAnswer::Reached(_) => None,
            BfsAnswer::Pairs(pairs) => Some(pairs.clone()),
            BfsAnswer::BySource(by_source) => Some(
                by_source
                    .iter()
                    .flat_map(|(&source, nodes)| nodes.iter().map(move |&node| (source, node)))
                    .collect(),
            ),
        }
    }
}

/// Finds the final nodes of the query reachable from its start nodes along a
/// path whose labels the automaton accepts.
///
/// The automaton may be nondeterministic. The empty path counts when a start
/// node is final and the automaton accepts the empty word.
pub fn bfs_rpq<S: State>(
    graph: &Graph,
    automaton: &Automaton<S>,
    query: &NodeQuery,
    mode: BfsMode,
) -> BfsAnswer {
    let query_matrices = automaton.to_matrices();
    let graph_matrices = graph.to_nfa(query).to_matrices();
    let k = query_matrices.num_states();

    let sources: Vec<BTreeSet<usize>> = match mode {
        BfsMode::Joint => vec![graph_matrices.start.clone()],
        BfsMode::JointPairs | BfsMode::Separate => graph_matrices
            .start
            .iter()
            .map(|&id| BTreeSet::from([id]))
            .collect(),
    };
    let visited = search(&query_matrices, &graph_matrices, &sources);

    let reached_from = |block: usize| -> Vec<NodeId> {
        let mut nodes = BTreeSet::new();
        for &state in &query_matrices.finals {
            for col in visited.iter_row(block * k + state).filter(|&col| col >= k) {
                if graph_matrices.finals.contains(&(col - k)) {
                    nodes.insert(*graph_matrices.states.state(col - k));
                }
            }
        }
        nodes.into_iter().collect()
    };
    match mode {
        BfsMode::Joint => BfsAnswer::Reached(reached_from(0).into_iter().collect()),
        BfsMode::JointPairs => BfsAnswer::Pairs(
            graph_matrices
                .start
                .iter()
                .enumerate()
                .flat_map(|(block, &id)| {
                    let source = *graph_matrices.states.state(id);
                    reached_from(block).into_iter().map(move |node| (source, node))
                })
                .collect(),
        ),
        BfsMode::Separate => BfsAnswer::BySource(
            graph_matrices
                .start
                .iter()
                .enumerate()
                .map(|(block, &id)| (*graph_matrices.states.state(id), reached_from(block)))
                .collect(),
        ),
    }
}

/// Parses the regular expression and runs [`bfs_rpq`] with its minimal DFA.
pub fn bfs_rpq_regex(
    graph: &Graph,
    regex: &str,
    query: &NodeQuery,
    mode: BfsMode,
) -> Result<BfsAnswer, RegexError> {
    let dfa = Regex::parse(regex)?.to_dfa();
    Ok(bfs_rpq(graph, &dfa, query, mode))
}

/// Runs the search to a fixed point and returns the visited matrix.
fn search<S>(
    query: &Decomposition<S>,
    graph: &Decomposition<NodeId>,
    sources: &[BTreeSet<usize>],
) -> BoolMatrix {
    let k = query.num_states();
    let width = k + graph.num_states();
    let num_rows = sources.len() * k;
    let steps: Vec<BoolMatrix> = query
        .matrices
        .iter()
        .filter_map(|(label, matrix)| graph.matrix(label).map(|other| matrix.direct_sum(other)))
        .collect();

    let mut frontier = BoolMatrix::new(num_rows, width);
    for (block, source) in sources.iter().enumerate() {
        for &state in &query.start {
            let row = block * k + state;
            frontier.set(row, state, true);
            for &node in source {
                frontier.set(row, k + node, true);
            }
        }
    }
    let mut visited = frontier.clone();
    let mut rounds = 0;
    loop {
        let mut next = BoolMatrix::new(num_rows, width);
        for step in &steps {
            let product = frontier.mul(step);
            for row in 0..num_rows {
                let mut nodes = product.row(row).clone();
                for col in 0..k {
                    nodes.set(col, false);
                }
                if nodes.none() {
                    continue;
                }
                // Every query state reached addresses a row of the same block.
                let block = row / k;
                for state in product.iter_row(row).take_while(|&col| col < k) {
                    let target = block * k + state;
                    next.set(target, state, true);
                    next.union_row(target, &nodes);
                }
            }
        }
        rounds += 1;
        let fresh = next.difference(&visited);
        if !visited.union_with(&next) {
            break;
        }
        trace!("BFS round {}: {} new entries", rounds, fresh.count_ones());
        frontier = anchor(fresh, k);
    }
    debug!(
        "BFS over {} sources finished after {} rounds",
        sources.len(),
        rounds
    );
    visited
}

/// Restores the query state bit of every row that holds graph nodes.
fn anchor(mut frontier: BoolMatrix, k: usize) -> BoolMatrix {
    for row in 0..frontier.num_rows() {
        if frontier.iter_row(row).any(|col| col >= k) {
            frontier.set(row, row % k, true);
        }
    }
    frontier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nondeterministic_query() {
        // a b | a c, with the two branches split at the first step.
        let mut nfa = Automaton::new();
        nfa.add_start(0);
        nfa.add_transition(0, "a", 1);
        nfa.add_transition(0, "a", 2);
        nfa.add_transition(1, "b", 3);
        nfa.add_transition(2, "c", 3);
        nfa.add_final(3);
        let mut graph = Graph::new();
        graph.add_edge(0, "a", 1);
        graph.add_edge(1, "b", 2);
        graph.add_edge(1, "c", 3);
        graph.add_edge(0, "b", 4);
        let query = NodeQuery::all().with_start_nodes([0]);
        let answer = bfs_rpq(&graph, &nfa, &query, BfsMode::Joint);
        assert_eq!(answer, BfsAnswer::Reached(BTreeSet::from([2, 3])));
    }

    #[test]
    fn test_empty_automaton() {
        let graph = Graph::two_cycles(1, 1, ("a", "b"));
        let answer = bfs_rpq(&graph, &Automaton::<usize>::new(), &NodeQuery::all(), BfsMode::Separate);
        assert_eq!(answer.pairs(), Some(BTreeSet::new()));
        assert_eq!(answer.reached(), BTreeSet::new());
    }

    #[test]
    fn test_joint_pairs_keep_sources() {
        let mut graph = Graph::new();
        graph.add_edge(0, "a", 2);
        graph.add_edge(1, "a", 2);
        graph.add_edge(2, "b", 3);
        let dfa = Regex::parse("a b").unwrap().to_dfa();
        let query = NodeQuery::all().with_start_nodes([0, 1, 2]);
        let answer = bfs_rpq(&graph, &dfa, &query, BfsMode::JointPairs);
        assert_eq!(answer, BfsAnswer::Pairs(BTreeSet::from([(0, 3), (1, 3)])));
        assert_eq!(answer.reached(), BTreeSet::from([3]));
    }
}
