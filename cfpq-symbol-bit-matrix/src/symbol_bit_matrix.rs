use std::ops;

use bit_matrix::BitMatrix;
use log::trace;

use cfpq_grammar::Cfg;
use cfpq_symbol::{Symbol, SymbolSource};

/// A relation `R(A, B)` between grammar symbols, one row and one column per symbol.
#[derive(Clone, Debug)]
pub struct SymbolBitMatrix {
    bit_matrix: BitMatrix,
}

impl SymbolBitMatrix {
    fn new(num_syms: usize) -> Self {
        SymbolBitMatrix {
            bit_matrix: BitMatrix::new(num_syms, num_syms),
        }
    }

    fn set(&mut self, row: Symbol, col: Symbol, included: bool) {
        self.bit_matrix.set(row.usize(), col.usize(), included);
    }

    /// The number of symbols on each side of the relation.
    pub fn num_syms(&self) -> usize {
        self.bit_matrix.size().0
    }

    /// Symbols `B` with `R(row, B)`, in ascending order.
    pub fn iter_row_syms(&self, row: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        self.bit_matrix
            .iter_row(row.usize())
            .zip(SymbolSource::generate_fresh())
            .filter_map(|(present, sym)| present.then_some(sym))
    }

    /// Iterates over all pairs in the relation.
    pub fn iter_pairs(&self) -> impl Iterator<Item = (Symbol, Symbol)> + '_ {
        SymbolSource::generate_fresh()
            .take(self.num_syms())
            .flat_map(move |row| self.iter_row_syms(row).map(move |col| (row, col)))
    }
}

impl ops::Index<(Symbol, Symbol)> for SymbolBitMatrix {
    type Output = bool;

    fn index(&self, (row, col): (Symbol, Symbol)) -> &bool {
        let size = self.num_syms();
        if row.usize() < size && col.usize() < size && self.bit_matrix[(row.usize(), col.usize())] {
            &true
        } else {
            &false
        }
    }
}

/// Relations between the symbols of a grammar.
pub trait CfgSymbolBitMatrixExt {
    /// `A` derives a sentential form containing `B`, in zero or more steps.
    fn reachability_matrix(&self) -> SymbolBitMatrix;
    /// `A` derives the variable `B` alone, in one or more steps that use unit rules
    /// such as `A ::= B` only.
    fn unit_derivation_matrix(&self) -> SymbolBitMatrix;
}

impl CfgSymbolBitMatrixExt for Cfg {
    fn reachability_matrix(&self) -> SymbolBitMatrix {
        let mut reachability = SymbolBitMatrix::new(self.num_syms());
        for rule in self.rules() {
            for &sym in rule.rhs.iter() {
                reachability.set(rule.lhs, sym, true);
            }
        }
        reachability.bit_matrix.transitive_closure();
        reachability.bit_matrix.reflexive_closure();
        reachability
    }

    fn unit_derivation_matrix(&self) -> SymbolBitMatrix {
        let mut unit_derivation = SymbolBitMatrix::new(self.num_syms());
        for rule in self.rules() {
            // `A ::= A` derives nothing new.
            if let [sym] = rule.rhs[..] {
                if rule.lhs != sym && !self.is_terminal(sym) {
                    unit_derivation.set(rule.lhs, sym, true);
                }
            }
        }
        unit_derivation.bit_matrix.transitive_closure();
        trace!(
            "unit derivation pairs: {}",
            unit_derivation.iter_pairs().count()
        );
        unit_derivation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_derivation_is_transitive() {
        let mut cfg = Cfg::new();
        let [a, b, c] = cfg.sym();
        let [x] = cfg.lexemes(["x"]);
        cfg.rule(a).rhs([b]).rule(b).rhs([c]).rule(c).rhs([x]).rhs([c]);

        let units = cfg.unit_derivation_matrix();
        assert!(units[(a, b)]);
        assert!(units[(a, c)]);
        assert!(units[(b, c)]);
        assert!(!units[(c, x)]);
        assert!(!units[(c, c)]);
        assert_eq!(units.iter_pairs().count(), 3);
    }

    #[test]
    fn test_reachability_is_reflexive() {
        let mut cfg = Cfg::new();
        let [start, a, unreachable] = cfg.sym();
        let [x] = cfg.lexemes(["x"]);
        cfg.rule(start).rhs([a, x]).rule(unreachable).rhs([a]);

        let reach = cfg.reachability_matrix();
        assert!(reach[(start, start)]);
        assert!(reach[(start, a)]);
        assert!(reach[(start, x)]);
        assert!(!reach[(start, unreachable)]);
    }
}
