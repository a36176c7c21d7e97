//! Grammar rules can be built with the builder pattern.

use crate::local_prelude::*;

/// Adds alternatives for one left-hand side, as in
/// `cfg.rule(s).rhs([a, s, b]).rhs([])`.
pub struct RuleBuilder<'a> {
    lhs: Symbol,
    grammar: &'a mut Cfg,
}

impl<'a> RuleBuilder<'a> {
    /// Creates a rule builder for the given LHS.
    pub fn new(grammar: &'a mut Cfg, lhs: Symbol) -> Self {
        RuleBuilder { lhs, grammar }
    }

    /// Switches to another LHS.
    pub fn rule(mut self, lhs: Symbol) -> Self {
        self.lhs = lhs;
        self
    }

    /// Adds a rule alternative to the grammar.
    pub fn rhs(self, syms: impl AsRef<[Symbol]>) -> Self {
        self.grammar.add_rule(CfgRule::new(self.lhs, syms));
        self
    }
}
