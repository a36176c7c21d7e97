#![cfg(all(feature = "cfpq-cyk", feature = "cfpq-closure"))]

mod support;

use cfpq::{Cfg, CfgLoadExt, NodeQuery, cyk_accepts, hellings_closure, matrix_closure, normalize};
use test_case::test_case;

use support::{init_logging, path_graph};

fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut last = vec![String::new()];
    for _ in 0..max_len {
        last = last
            .iter()
            .flat_map(|word| {
                alphabet.iter().map(move |&ch| {
                    let mut longer = word.clone();
                    longer.push(ch);
                    longer
                })
            })
            .collect();
        words.extend(last.iter().cloned());
    }
    words
}

#[test_case("S -> a S b S | x S y S | $", &['a', 'b', 'x', 'y'], 4 ; "dyck")]
#[test_case("S -> a S | P\nP -> b P | Q\nQ -> c Q | c", &['a', 'b', 'c'], 5 ; "chain")]
#[test_case("S -> A B\nA -> a A | $\nB -> b B | $", &['a', 'b'], 5 ; "nullable")]
#[test_case("S -> a S a | b S b | a | b | $", &['a', 'b'], 6 ; "palindromes")]
fn test_cyk_agrees_with_paths(text: &str, alphabet: &[char], max_len: usize) {
    init_logging();
    let cfg = Cfg::load(text, "S").unwrap();
    let grammar = normalize(text, "S").unwrap();
    for word in words(alphabet, max_len) {
        let graph = path_graph(&word);
        let end = word.chars().count();
        let query = NodeQuery::all().with_start_nodes([0]).with_final_nodes([end]);
        let on_path = matrix_closure(&graph, &grammar, &query).contains(&(0, end));
        assert_eq!(cyk_accepts(&cfg, &word), on_path, "{:?}", word);
        assert_eq!(
            hellings_closure(&graph, &grammar, &query).contains(&(0, end)),
            on_path,
            "{:?}",
            word
        );
    }
}

#[test]
fn test_palindromes() {
    let cfg = Cfg::load("S -> a S a | b S b | a | b | $", "S").unwrap();
    for word in ["", "a", "aba", "abba", "babbab"] {
        assert!(cyk_accepts(&cfg, word), "{:?}", word);
    }
    for word in ["ab", "aab", "abab"] {
        assert!(!cyk_accepts(&cfg, word), "{:?}", word);
    }
}
