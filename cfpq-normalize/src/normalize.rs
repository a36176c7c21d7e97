//! Rewrites of a grammar towards Chomsky normal form.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use log::debug;

use cfpq_grammar::{Cfg, CfgLoadExt, CfgRule, GrammarSyntaxError};
use cfpq_symbol::Symbol;
use cfpq_symbol_bit_matrix::CfgSymbolBitMatrixExt;

use crate::useful;
use crate::weak_cnf::WeakCnf;

/// Normalization steps on context-free grammars.
pub trait CfgNormalizeExt {
    /// Replaces every unit rule `A ::= B` with the non-unit rules of each variable
    /// that `A` derives through unit rules alone.
    fn eliminate_unit_rules(&mut self);
    /// Removes rules with unproductive symbols, then rules unreachable from the
    /// start symbol.
    fn remove_useless_rules(&mut self);
    /// In every rule with two or more RHS symbols, replaces each terminal `a`
    /// with a fresh variable `T ::= a`. One variable is shared per terminal.
    fn lift_terminals(&mut self);
    /// Returns an equivalent grammar in weak CNF.
    fn to_weak_cnf(&self) -> WeakCnf;
    /// Returns a grammar in CNF without `A ::= ()` rules. It generates the same
    /// language, except for the empty string.
    fn to_cnf(&self) -> WeakCnf;
}

impl CfgNormalizeExt for Cfg {
    fn eliminate_unit_rules(&mut self) {
        let is_unit = |grammar: &Cfg, rule: &CfgRule| match rule.rhs[..] {
            [sym] => !grammar.is_terminal(sym),
            _ => false,
        };
        if !self.rules().any(|rule| is_unit(self, rule)) {
            return;
        }
        let unit_derivation = self.unit_derivation_matrix();

        let mut bodies: BTreeMap<Symbol, Vec<Rc<[Symbol]>>> = BTreeMap::new();
        for rule in self.rules().filter(|rule| !is_unit(self, rule)) {
            bodies.entry(rule.lhs).or_default().push(rule.rhs.clone());
        }
        let mut inherited = vec![];
        for (lhs, derived) in unit_derivation.iter_pairs() {
            for rhs in bodies.get(&derived).into_iter().flatten() {
                inherited.push(CfgRule {
                    lhs,
                    rhs: rhs.clone(),
                });
            }
        }

        let units: Vec<bool> = self.rules().map(|rule| is_unit(self, rule)).collect();
        let mut units = units.into_iter();
        self.retain(|_| !units.next().unwrap_or(false));
        for rule in inherited {
            self.add_rule(rule);
        }
        self.sort();
        self.dedup();
    }

    fn remove_useless_rules(&mut self) {
        useful::remove_useless_rules(self);
    }

    fn lift_terminals(&mut self) {
        let mut lifted: HashMap<Symbol, Symbol> = HashMap::new();
        let mut rewritten = vec![];
        let rules: Vec<CfgRule> = self.rules().cloned().collect();
        for rule in &rules {
            if rule.rhs.len() < 2 || !rule.rhs.iter().any(|&sym| self.is_terminal(sym)) {
                continue;
            }
            let rhs: Vec<Symbol> = rule
                .rhs
                .iter()
                .map(|&sym| {
                    if !self.is_terminal(sym) {
                        return sym;
                    }
                    *lifted.entry(sym).or_insert_with(|| {
                        let name = format!("{}#", self.name_of(sym));
                        self.next_sym(Some(name.into()))
                    })
                })
                .collect();
            rewritten.push((rule.clone(), CfgRule::new(rule.lhs, rhs)));
        }
        if rewritten.is_empty() {
            return;
        }
        self.retain(|rule| !rewritten.iter().any(|(before, _)| before == rule));
        for (_, after) in rewritten {
            self.add_rule(after);
        }
        let mut lifted: Vec<_> = lifted.into_iter().collect();
        lifted.sort();
        for (terminal, variable) in lifted {
            self.rule(variable).rhs([terminal]);
        }
    }

    fn to_weak_cnf(&self) -> WeakCnf {
        let mut cfg = self.clone();
        cfg.limit_rhs_len(None);
        cfg.eliminate_unit_rules();
        debug!("after unit elimination: {} rules", cfg.rules().count());
        cfg.remove_useless_rules();
        debug!("after useless rule removal: {} rules", cfg.rules().count());
        cfg.lift_terminals();
        cfg.binarize();
        debug!("weak CNF: {} rules", cfg.rules().count());
        WeakCnf::from_normalized(cfg)
    }

    fn to_cnf(&self) -> WeakCnf {
        let mut cfg = self.clone();
        cfg.binarize();
        cfg.eliminate_nulling_rules();
        cfg.eliminate_unit_rules();
        cfg.remove_useless_rules();
        cfg.lift_terminals();
        debug!("CNF: {} rules", cfg.rules().count());
        WeakCnf::from_normalized(cfg)
    }
}

/// Loads a grammar from text and brings it to weak CNF.
pub fn normalize(text: &str, start: &str) -> Result<WeakCnf, GrammarSyntaxError> {
    let cfg = Cfg::load(text, start)?;
    Ok(cfg.to_weak_cnf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_of(cfg: &Cfg) -> Vec<(Symbol, Vec<Symbol>)> {
        let mut rules: Vec<_> = cfg.rules().map(|rule| (rule.lhs, rule.rhs.to_vec())).collect();
        rules.sort();
        rules
    }

    #[test]
    fn test_eliminate_unit_rules() {
        let mut cfg = Cfg::new();
        let [start, p, q] = cfg.sym();
        let [a, b] = cfg.lexemes(["a", "b"]);
        cfg.rule(start)
            .rhs([p])
            .rhs([a, start])
            .rule(p)
            .rhs([q])
            .rhs([p])
            .rule(q)
            .rhs([b]);
        cfg.eliminate_unit_rules();
        assert_eq!(
            rules_of(&cfg),
            vec![
                (start, vec![a, start]),
                (start, vec![b]),
                (p, vec![b]),
                (q, vec![b]),
            ]
        );
    }

    #[test]
    fn test_lift_terminals_shares_variables() {
        let mut cfg = Cfg::new();
        let [start] = cfg.sym();
        let [a, b] = cfg.lexemes(["a", "b"]);
        cfg.rule(start).rhs([a, start, a]).rhs([b]);
        cfg.lift_terminals();

        let lifted_a = cfg.sym_by_name("a#").unwrap();
        assert!(cfg.sym_by_name("b#").is_none());
        assert_eq!(
            rules_of(&cfg),
            vec![
                (start, vec![b]),
                (start, vec![lifted_a, start, lifted_a]),
                (lifted_a, vec![a]),
            ]
        );
    }
}
