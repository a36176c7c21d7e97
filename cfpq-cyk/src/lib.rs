//! Membership checking with the Cocke-Younger-Kasami algorithm.
//!
//! The grammar is brought to Chomsky normal form once. The empty word is
//! handled separately, since the normal form cannot generate it.

#![deny(unsafe_code)]

use std::collections::BTreeMap;

use bit_vec::BitVec;
use log::{debug, trace};

use cfpq_grammar::Cfg;
use cfpq_normalize::{CfgNormalizeExt, WeakCnf};
use cfpq_symbol::Symbol;

/// A grammar prepared for membership checks.
#[derive(Clone, Debug)]
pub struct Cyk {
    cnf: WeakCnf,
    accepts_empty: bool,
    /// Heads of `A ::= a`, keyed by the terminal's name.
    by_terminal: BTreeMap<String, Vec<Symbol>>,
    binary: Vec<(Symbol, Symbol, Symbol)>,
}

impl Cyk {
    pub fn new(cfg: &Cfg) -> Self {
        let cnf = cfg.to_cnf();
        let mut by_terminal: BTreeMap<String, Vec<Symbol>> = BTreeMap::new();
        for (head, terminal) in cnf.terminal_productions() {
            by_terminal
                .entry(cnf.name_of(terminal).into_owned())
                .or_default()
                .push(head);
        }
        let binary = cnf.binary_productions().collect();
        debug!(
            "CYK grammar with {} variables and {} productions",
            cnf.variables().len(),
            cnf.productions().len()
        );
        Cyk {
            accepts_empty: cfg.generates_epsilon(),
            by_terminal,
            binary,
            cnf,
        }
    }

    /// The grammar in Chomsky normal form.
    pub fn cnf(&self) -> &WeakCnf {
        &self.cnf
    }

    /// Checks whether the grammar generates the text, reading every character as
    /// one terminal.
    pub fn accepts(&self, text: &str) -> bool {
        let tokens: Vec<String> = text.chars().map(String::from).collect();
        self.accepts_tokens(&tokens)
    }

    /// Checks whether the grammar generates the sequence of terminals.
    pub fn accepts_tokens<T: AsRef<str>>(&self, tokens: &[T]) -> bool {
        let n = tokens.len();
        if n == 0 {
            return self.accepts_empty;
        }
        let Some(start) = self.cnf.start() else {
            return false;
        };
        let num_syms = self.cnf.num_syms();
        // `table[i * n + j]` holds the variables deriving `tokens[i..=j]`.
        let mut table = vec![BitVec::from_elem(num_syms, false); n * n];
        for (i, token) in tokens.iter().enumerate() {
            for &head in self.by_terminal.get(token.as_ref()).into_iter().flatten() {
                table[i * n + i].set(head.usize(), true);
            }
        }
        for span in 1..n {
            for i in 0..n - span {
                let j = i + span;
                let mut cell = BitVec::from_elem(num_syms, false);
                for k in i..j {
                    let left = &table[i * n + k];
                    let right = &table[(k + 1) * n + j];
                    for &(head, b, c) in &self.binary {
                        if left[b.usize()] && right[c.usize()] {
                            cell.set(head.usize(), true);
                        }
                    }
                }
                table[i * n + j] = cell;
            }
        }
        let accepted = table[n - 1][start.usize()];
        trace!("CYK on {} tokens: {}", n, accepted);
        accepted
    }
}

/// Membership checks on grammars.
pub trait CfgCykExt {
    /// Checks whether the grammar generates the text, one terminal per character.
    fn cyk_accepts(&self, text: &str) -> bool;
}

impl CfgCykExt for Cfg {
    fn cyk_accepts(&self, text: &str) -> bool {
        Cyk::new(self).accepts(text)
    }
}

/// Checks whether the grammar generates the text, one terminal per character.
pub fn cyk_accepts(cfg: &Cfg, text: &str) -> bool {
    Cyk::new(cfg).accepts(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfpq_grammar::CfgLoadExt;

    #[test]
    fn test_multi_char_tokens() {
        let cfg = Cfg::load("S -> if S else S | x", "S").unwrap();
        let cyk = Cyk::new(&cfg);
        assert!(cyk.accepts_tokens(&["if", "x", "else", "x"]));
        assert!(!cyk.accepts_tokens(&["if", "x"]));
        assert!(!cyk.accepts("ifxelsex"));
    }

    #[test]
    fn test_cnf_has_no_epsilon() {
        let cfg = Cfg::load("S -> a S b S | $", "S").unwrap();
        let cyk = Cyk::new(&cfg);
        assert_eq!(cyk.cnf().epsilon_heads().count(), 0);
        assert!(cyk.accepts(""));
    }
}
