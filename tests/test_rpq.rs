#![cfg(feature = "cfpq-rpq")]

mod support;

use std::collections::BTreeSet;

use cfpq::rpq::{regex_rpq, tensor_rpq};
use cfpq::{BfsMode, Graph, NodeQuery, Regex, bfs_rpq};
use test_case::test_case;

use support::{dense_graph, init_logging, pairs};

#[test]
fn test_two_cycles_star() {
    init_logging();
    let graph = Graph::two_cycles(1, 2, ("a", "b"));
    let query = NodeQuery::all().with_start_nodes([0, 2]).with_final_nodes([2, 1]);
    let dfa = Regex::parse("(a|b)*").unwrap().to_dfa();
    let expected = pairs(&[(0, 1), (0, 2), (2, 1), (2, 2)]);
    assert_eq!(bfs_rpq(&graph, &dfa, &query, BfsMode::Separate).pairs(), Some(expected.clone()));
    assert_eq!(tensor_rpq(&graph, &dfa, &query), expected);
}

#[test_case("a* b" ; "a star b")]
#[test_case("(a | c)* b c" ; "mixed")]
#[test_case("c c c | a b" ; "alternatives")]
#[test_case("(a b)* c*" ; "nested stars")]
fn test_separate_and_joint_agree(regex: &str) {
    init_logging();
    let graph = dense_graph(9);
    let dfa = Regex::parse(regex).unwrap().to_dfa();
    for query in [
        NodeQuery::all(),
        NodeQuery::all().with_start_nodes([0, 4]),
        NodeQuery::all().with_start_nodes([1, 2, 3]).with_final_nodes([0, 5, 8]),
    ] {
        let separate = bfs_rpq(&graph, &dfa, &query, BfsMode::Separate);
        let joint = bfs_rpq(&graph, &dfa, &query, BfsMode::Joint);
        let joint_pairs = bfs_rpq(&graph, &dfa, &query, BfsMode::JointPairs);
        assert_eq!(separate.reached(), joint.reached());
        assert_eq!(separate.pairs(), Some(tensor_rpq(&graph, &dfa, &query)));
        assert_eq!(joint_pairs.pairs(), separate.pairs());
    }
}

#[test]
fn test_labels_outside_graph() {
    let graph = Graph::two_cycles(2, 2, ("a", "b"));
    let answer = regex_rpq(&graph, "x y", &NodeQuery::all()).unwrap();
    assert_eq!(answer, BTreeSet::new());
}
