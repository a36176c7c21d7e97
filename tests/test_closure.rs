#![cfg(feature = "cfpq-closure")]

mod support;

use std::thread;

use cfpq::closure::{ClosureEngine, HellingsClosure, MatrixClosure};
use cfpq::{Algorithm, Graph, NodeQuery, WeakCnf, normalize, query_text};
use test_case::test_case;

use support::{dense_graph, init_logging, pairs};

const GRAMMARS: [&str; 5] = [
    "S -> a b",
    "S -> a S b S | $",
    "S -> a S | P\nP -> b P | b",
    "S -> a S | P\nP -> b P | $",
    "S -> A B | c\nA -> a A | a\nB -> S b | b c",
];

#[test_case(Algorithm::Matrix ; "matrix")]
#[test_case(Algorithm::Hellings ; "hellings")]
fn test_two_cycles(algorithm: Algorithm) {
    init_logging();
    let graph = Graph::two_cycles(2, 1, ("a", "b"));
    let all = NodeQuery::all();
    let run = |text: &str| query_text(algorithm, &graph, text, "S", &all).unwrap();

    assert_eq!(run("S -> a b"), pairs(&[(2, 3)]));
    assert_eq!(
        run("S -> a S b S | $"),
        pairs(&[(0, 0), (1, 1), (0, 3), (2, 0), (2, 3), (3, 3), (2, 2), (1, 0), (1, 3)])
    );
    assert_eq!(
        run("S -> a S | P\nP -> b P | b"),
        pairs(&[(0, 0), (0, 3), (2, 0), (3, 0), (2, 3), (3, 3), (1, 0), (1, 3)])
    );
    assert_eq!(
        run("S -> a S | P\nP -> b P | $"),
        pairs(&[
            (0, 0), (0, 1), (0, 2), (0, 3),
            (1, 0), (1, 1), (1, 2), (1, 3),
            (2, 0), (2, 1), (2, 2), (2, 3),
            (3, 0), (3, 3),
        ])
    );
}

#[test]
fn test_algorithms_agree() {
    init_logging();
    let graphs = [
        Graph::two_cycles(2, 1, ("a", "b")),
        Graph::two_cycles(3, 4, ("a", "b")),
        dense_graph(7),
    ];
    for graph in &graphs {
        for text in GRAMMARS {
            let grammar = normalize(text, "S").unwrap();
            let (matrix, matrix_stats) = MatrixClosure.closure(graph, &grammar);
            let (hellings, hellings_stats) = HellingsClosure.closure(graph, &grammar);
            assert_eq!(matrix, hellings, "{}", text);
            assert!(matrix_stats.is_monotone());
            assert!(hellings_stats.is_monotone());
        }
    }
}

#[test]
fn test_idempotent() {
    let graph = dense_graph(6);
    let grammar = normalize("S -> a S b S | c", "S").unwrap();
    let query = NodeQuery::all().with_start_nodes([0, 1]).with_final_nodes([2, 3, 4]);
    for algorithm in Algorithm::ALL {
        let engine = algorithm.engine();
        let first = engine.query(&graph, &grammar, &query);
        let second = engine.query(&graph, &grammar, &query);
        assert_eq!(first, second);
        assert!(first.iter().all(|&(u, v)| [0, 1].contains(&u) && [2, 3, 4].contains(&v)));
    }
}

#[test]
fn test_grammar_errors() {
    let graph = Graph::two_cycles(1, 1, ("a", "b"));
    let all = NodeQuery::all();
    assert!(query_text(Algorithm::Matrix, &graph, "", "S", &all).is_err());
    assert!(query_text(Algorithm::Hellings, &graph, "S -> a B", "S", &all).is_err());
    assert!(query_text(Algorithm::Matrix, &graph, "S -> a", "T", &all).is_err());
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_parallel_queries() {
    assert_send_sync::<Graph>();
    assert_send_sync::<WeakCnf>();
    assert_send_sync::<MatrixClosure>();
    assert_send_sync::<HellingsClosure>();

    let graph = &dense_graph(5);
    let grammars: Vec<WeakCnf> = GRAMMARS
        .iter()
        .map(|text| normalize(text, "S").unwrap())
        .collect();
    let sequential: Vec<_> = grammars
        .iter()
        .map(|grammar| MatrixClosure.closure(graph, grammar).0)
        .collect();
    let parallel: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = grammars
            .iter()
            .map(|grammar| scope.spawn(move || HellingsClosure.closure(graph, grammar).0))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });
    assert_eq!(sequential, parallel);
}
