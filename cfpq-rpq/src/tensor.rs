//! Path queries through the intersection of the graph with the query automaton.

use std::collections::BTreeSet;

use log::debug;

use cfpq_automaton::{Automaton, Graph, NodeId, NodeQuery, State, intersect};
use cfpq_regexp::{Regex, RegexError};

/// Pairs `(u, v)` of a start node and a final node joined by a path whose labels
/// the automaton accepts.
///
/// The graph, viewed as an automaton, is intersected with the query automaton,
/// and the transitive closure of the product's adjacency matrix gives the
/// paths. The empty path counts when a start node is final and the automaton
/// accepts the empty word.
pub fn tensor_rpq<S: State>(
    graph: &Graph,
    automaton: &Automaton<S>,
    query: &NodeQuery,
) -> BTreeSet<(NodeId, NodeId)> {
    let product = intersect(&graph.to_nfa(query), automaton);
    let mut reach = product.to_matrices().adjacency();
    reach.transitive_closure();
    let node = |id: usize| product.state(id).0;

    let mut pairs: BTreeSet<_> = reach
        .iter_ones()
        .filter(|&(from, to)| product.is_start(from) && product.is_final(to))
        .map(|(from, to)| (node(from), node(to)))
        .collect();
    pairs.extend(
        product
            .start_ids()
            .iter()
            .filter(|&&id| product.is_final(id))
            .map(|&id| (node(id), node(id))),
    );
    debug!(
        "tensor query over {} product states found {} pairs",
        product.num_states(),
        pairs.len()
    );
    pairs
}

/// Parses the regular expression and runs [`tensor_rpq`] with its minimal DFA.
pub fn regex_rpq(
    graph: &Graph,
    regex: &str,
    query: &NodeQuery,
) -> Result<BTreeSet<(NodeId, NodeId)>, RegexError> {
    let dfa = Regex::parse(regex)?.to_dfa();
    Ok(tensor_rpq(graph, &dfa, query))
}
