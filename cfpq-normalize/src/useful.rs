//! Analysis of rule usefulness.

use log::trace;

use cfpq_grammar::{Cfg, CfgRule, SymbolBitSet};
use cfpq_symbol::Symbol;
use cfpq_symbol_bit_matrix::CfgSymbolBitMatrixExt;

/// Contains the information about usefulness of the grammar's rules.
/// Useful rules are both reachable and productive.
///
/// Reachability is computed over productive rules only, so a symbol that can only
/// be reached through an unproductive rule is unreachable.
pub struct Usefulness<'a> {
    grammar: &'a Cfg,
    reachable_syms: SymbolBitSet,
    productivity: SymbolBitSet,
}

/// Usefulness of a single rule, together with the reason for its uselessness.
#[derive(Copy, Clone, Debug)]
pub struct UsefulnessForRule<'a> {
    rule: &'a CfgRule,
    usefulness: RuleUsefulness,
}

/// The reason for a rule's uselessness.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RuleUsefulness {
    /// Indicates whether the rule is reachable from the start symbol.
    pub reachable: bool,
    /// Indicates whether all symbols on the RHS derive some terminal string.
    pub productive: bool,
}

impl<'a> UsefulnessForRule<'a> {
    pub fn rule(&self) -> &'a CfgRule {
        self.rule
    }

    pub fn usefulness(&self) -> RuleUsefulness {
        self.usefulness
    }
}

impl RuleUsefulness {
    pub fn is_useless(&self) -> bool {
        !self.reachable || !self.productive
    }
}

impl<'a> Usefulness<'a> {
    /// Analyzes usefulness of the grammar's rules. In particular, it checks for reachable
    /// and productive symbols.
    ///
    /// Without a start symbol, every productive rule counts as reachable.
    pub fn new(grammar: &'a Cfg) -> Self {
        let mut productivity = grammar.productive_symbols();

        let mut productive_grammar = grammar.clone();
        productive_grammar.retain(|rule| rule.rhs.iter().all(|&sym| productivity[sym]));

        let mut reachable_syms = SymbolBitSet::from_elem(grammar, false);
        match grammar.start() {
            Some(start) => {
                let reachability = productive_grammar.reachability_matrix();
                for sym in reachability.iter_row_syms(start) {
                    reachable_syms.set(sym, true);
                }
            }
            None => reachable_syms.extend(productive_grammar.used_symbols().iter()),
        }

        // Symbols that appear nowhere don't make the grammar less useful.
        let used_syms = grammar.used_symbols();
        for sym in grammar.sym_source().symbols() {
            if !used_syms[sym] {
                productivity.set(sym, true);
                reachable_syms.set(sym, true);
            }
        }

        Usefulness {
            grammar,
            productivity,
            reachable_syms,
        }
    }

    /// Checks whether a symbol is productive. Can be used to determine the precise reason
    /// of a rule's unproductiveness.
    pub fn productivity(&self, sym: Symbol) -> bool {
        self.productivity[sym]
    }

    /// Checks whether a symbol is reachable from the start symbol.
    pub fn reachability(&self, sym: Symbol) -> bool {
        self.reachable_syms[sym]
    }

    /// Checks whether all rules in the grammar are useful.
    pub fn all_useful(&self) -> bool {
        self.all_productive() && self.all_reachable()
    }

    /// Checks whether all rules in the grammar are productive.
    pub fn all_productive(&self) -> bool {
        self.productivity.all()
    }

    /// Checks whether all rules in the grammar are reachable.
    pub fn all_reachable(&self) -> bool {
        self.reachable_syms.all()
    }

    pub fn rule_usefulness(&self, rule: &'a CfgRule) -> UsefulnessForRule<'a> {
        let productive = rule.rhs.iter().all(|&sym| self.productivity[sym]);
        let reachable = self.reachable_syms[rule.lhs];
        UsefulnessForRule {
            rule,
            usefulness: RuleUsefulness {
                productive,
                reachable,
            },
        }
    }

    /// Returns an iterator over the grammar's useless rules.
    pub fn useless_rules(&self) -> impl Iterator<Item = UsefulnessForRule<'a>> + '_ {
        self.grammar
            .rules()
            .map(|rule| self.rule_usefulness(rule))
            .filter(|rule_usefulness| rule_usefulness.usefulness().is_useless())
    }

    /// Turns the analysis into a predicate that holds for useful rules.
    pub fn into_rule_filter(self) -> impl Fn(&CfgRule) -> bool + use<> {
        let Usefulness {
            productivity,
            reachable_syms,
            ..
        } = self;
        move |rule| {
            reachable_syms[rule.lhs] && rule.rhs.iter().all(|&sym| productivity[sym])
        }
    }
}

/// Removes useless rules. The language represented by the grammar doesn't change.
pub(crate) fn remove_useless_rules(grammar: &mut Cfg) {
    let usefulness = Usefulness::new(grammar);
    if usefulness.all_useful() {
        return;
    }
    for useless in usefulness.useless_rules() {
        trace!(
            "useless rule {:?} ::= {:?}: {:?}",
            useless.rule().lhs,
            useless.rule().rhs,
            useless.usefulness()
        );
    }
    let rule_is_useful = usefulness.into_rule_filter();
    grammar.retain(rule_is_useful);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unproductive_and_unreachable() {
        let mut cfg = Cfg::new();
        let [start, loops, orphan] = cfg.sym();
        let [a] = cfg.lexemes(["a"]);
        cfg.rule(start)
            .rhs([a])
            .rhs([loops, a])
            .rule(loops)
            .rhs([loops])
            .rule(orphan)
            .rhs([a]);
        cfg.set_start(start);

        let usefulness = Usefulness::new(&cfg);
        assert!(usefulness.productivity(start));
        assert!(!usefulness.productivity(loops));
        assert!(usefulness.productivity(orphan));
        assert!(!usefulness.reachability(orphan));
        assert!(!usefulness.reachability(loops));
        assert_eq!(usefulness.useless_rules().count(), 3);

        remove_useless_rules(&mut cfg);
        let rules: Vec<_> = cfg.rules().map(|rule| (rule.lhs, rule.rhs.to_vec())).collect();
        assert_eq!(rules, vec![(start, vec![a])]);
    }

    #[test]
    fn test_useful_grammar_is_untouched() {
        let mut cfg = Cfg::new();
        let [start] = cfg.sym();
        let [a] = cfg.lexemes(["a"]);
        cfg.rule(start).rhs([a, start]).rhs([]);
        cfg.set_start(start);
        assert!(Usefulness::new(&cfg).all_useful());
    }
}
