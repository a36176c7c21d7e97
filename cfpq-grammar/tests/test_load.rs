use cfpq_grammar::{Cfg, CfgLoadExt, GrammarSyntaxError};
use test_case::test_case;

#[test_case("S -> a b", 1, 2 ; "single rule")]
#[test_case("S -> a S b S | $", 2, 2 ; "dyck")]
#[test_case("S -> a S | P\nP -> b P | b", 4, 2 ; "two heads")]
#[test_case("S -> a S | P\n\nP -> b P | $\n", 4, 2 ; "blank lines")]
#[test_case("S -> a\nS -> b", 2, 2 ; "repeated head")]
fn test_load_counts(text: &str, num_rules: usize, num_terminals: usize) {
    let cfg = Cfg::load(text, "S").unwrap();
    assert_eq!(cfg.rules().count(), num_rules);
    assert_eq!(cfg.terminals().count(), num_terminals);
}

#[test]
fn test_load_reuses_terminals() {
    let cfg = Cfg::load("S -> a S a | a", "S").unwrap();
    let a = cfg.sym_by_name("a").unwrap();
    assert!(cfg.is_terminal(a));
    assert_eq!(cfg.terminals().collect::<Vec<_>>(), vec![a]);
}

#[test]
fn test_load_start_symbol() {
    let cfg = Cfg::load("P -> b\nS -> P P", "S").unwrap();
    assert_eq!(cfg.start(), cfg.sym_by_name("S"));
    assert_eq!(cfg.variables().len(), 2);
}

#[test]
fn test_load_error_messages() {
    let err = Cfg::load("S -> a B", "S").unwrap_err();
    assert_eq!(err.to_string(), "undefined variable `B` at line 1");
    let err = Cfg::load("S a", "S").unwrap_err();
    assert_eq!(err.to_string(), "parse error at line 1: expected `->`");
    let err = Cfg::load("", "S").unwrap_err();
    assert!(matches!(err, GrammarSyntaxError::Empty));
}

#[test]
fn test_load_path_missing_file() {
    let err = Cfg::load_path("/nonexistent/grammar.txt", "S").unwrap_err();
    assert!(matches!(err, GrammarSyntaxError::Io(_)));
}
