use cfpq_grammar::{Cfg, CfgLoadExt};
use cfpq_normalize::{CfgNormalizeExt, Production};
use test_case::test_case;

#[test_case("S -> A | a\nA -> B | b\nB -> c", 6 ; "unit chain")]
#[test_case("S -> A\nA -> S | a", 2 ; "unit cycle")]
#[test_case("S -> a S | b", 2 ; "no unit rules")]
fn test_eliminate_unit_rules(text: &str, num_rules: usize) {
    let mut cfg = Cfg::load(text, "S").unwrap();
    cfg.eliminate_unit_rules();
    assert!(
        cfg.rules()
            .all(|rule| rule.rhs.len() != 1 || cfg.is_terminal(rule.rhs[0]))
    );
    assert_eq!(cfg.rules().count(), num_rules);
}

#[test_case("S -> a | A\nA -> A b\nB -> b", 1 ; "unproductive and unreachable")]
#[test_case("S -> A B\nA -> a\nB -> b\nC -> c", 3 ; "unreachable only")]
#[test_case("S -> a S b S | $", 2 ; "all useful")]
fn test_remove_useless_rules(text: &str, num_rules: usize) {
    let mut cfg = Cfg::load(text, "S").unwrap();
    cfg.remove_useless_rules();
    assert_eq!(cfg.rules().count(), num_rules);
}

#[test]
fn test_lift_terminals_shares_variables() {
    let mut cfg = Cfg::load("S -> a S a | a", "S").unwrap();
    cfg.lift_terminals();
    let lifted = cfg.sym_by_name("a#").unwrap();
    let a = cfg.sym_by_name("a").unwrap();
    assert_eq!(cfg.rules().count(), 3);
    assert!(cfg.rules().any(|rule| rule.lhs == lifted && rule.rhs[..] == [a]));
    for rule in cfg.rules().filter(|rule| rule.rhs.len() >= 2) {
        assert!(rule.rhs.iter().all(|&sym| !cfg.is_terminal(sym)));
    }
}

#[test_case("S -> a S b S | $", true ; "dyck")]
#[test_case("S -> S S | a", false ; "no empty word")]
#[test_case("S -> A B\nA -> $\nB -> b | $", false ; "nullable through binary")]
fn test_weak_cnf_keeps_start_epsilon(text: &str, start_epsilon: bool) {
    let grammar = Cfg::load(text, "S").unwrap().to_weak_cnf();
    assert_eq!(grammar.has_start_epsilon(), start_epsilon);
    assert!(grammar.productions().iter().all(|production| match *production {
        Production::Terminal { terminal, .. } => grammar.terminals().contains(&terminal),
        Production::Binary { left, right, .. } => {
            grammar.variables().contains(&left) && grammar.variables().contains(&right)
        }
        Production::Epsilon { .. } => true,
    }));
}
