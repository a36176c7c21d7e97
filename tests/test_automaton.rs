#![cfg(feature = "cfpq-regexp")]

use cfpq::{Automaton, BoolMatrix, Graph, NodeQuery, Regex, intersect, to_matrices};

#[test]
fn test_to_matrices() {
    let dfa = Regex::parse("a b*").unwrap().to_dfa();
    let decomposition = to_matrices(&dfa);
    assert_eq!(decomposition.num_states(), 2);
    let mut a = BoolMatrix::square(2);
    a.set(0, 1, true);
    let mut b = BoolMatrix::square(2);
    b.set(1, 1, true);
    assert_eq!(decomposition.matrix("a"), Some(&a));
    assert_eq!(decomposition.matrix("b"), Some(&b));
    assert_eq!(decomposition.to_automaton(), dfa);
}

#[test]
fn test_intersect_regexes() {
    let first = Regex::parse("(a | b)* a").unwrap().to_dfa();
    let second = Regex::parse("a (a | b)*").unwrap().to_dfa();
    let product = intersect(&first, &second);
    assert_eq!(product.num_states(), first.num_states() * second.num_states());
    let expected = Regex::parse("a | a (a | b)* a").unwrap().to_dfa();
    assert!(product.is_equivalent_to(&expected));
}

#[test]
fn test_graph_intersection() {
    let graph = Graph::two_cycles(2, 1, ("a", "b"));
    let nfa = graph.to_nfa(&NodeQuery::all().with_start_nodes([0]).with_final_nodes([0]));
    let dfa = Regex::parse("(a a a)*").unwrap().to_dfa();
    let product = intersect(&nfa, &dfa);
    for len in 0..10 {
        let word = vec!["a"; len];
        assert_eq!(product.accepts(&word[..]), len % 3 == 0);
    }
    assert!(!product.accepts(&["b", "b"]));
    let union: Automaton = product.union(&Regex::parse("b b").unwrap().to_nfa());
    assert!(union.accepts(&["b", "b"]));
}
