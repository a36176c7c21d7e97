//! Definitions of the context-free grammar type and its rules.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::rc::Rc;
use std::{mem, ops};

use log::trace;

use crate::local_prelude::*;
use crate::rule_builder::RuleBuilder;

/// Context-free grammar type.
///
/// A context-free grammar can be though of as a regular expression
/// equipped with recursion.
#[derive(Clone, Debug, Default)]
pub struct Cfg {
    /// The symbol source.
    sym_source: SymbolSource,
    /// The set of terminal symbols.
    lexemes: SymbolBitSet,
    /// The array of rules.
    rules: Vec<CfgRule>,
    /// Start symbol.
    start: Option<Symbol>,
    rhs_len_invariant: Option<usize>,
}

/// Standard grammar rule representation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CfgRule {
    /// The rule's left-hand side symbol.
    pub lhs: Symbol,
    /// The rule's right-hand side symbols.
    pub rhs: Rc<[Symbol]>,
}

impl Cfg {
    /// Creates an empty context-free grammar.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context-free grammar with the given symbol source.
    ///
    /// Symbols will be generated with this symbol source.
    pub fn with_sym_source(sym_source: SymbolSource) -> Self {
        Cfg {
            sym_source,
            ..Cfg::default()
        }
    }

    /// Returns generated variables.
    pub fn sym<const N: usize>(&mut self) -> [Symbol; N] {
        self.sym_source_mut().sym()
    }

    /// Generates a new unique variable.
    ///
    /// If a name is given, it will be recorded within the symbol
    /// source.
    pub fn next_sym(&mut self, name: Option<Cow<str>>) -> Symbol {
        self.sym_source_mut().next_sym(name)
    }

    /// Generates a new unique terminal symbol.
    pub fn lexeme(&mut self, name: Option<Cow<str>>) -> Symbol {
        let result = self.sym_source_mut().next_sym(name);
        self.lexemes.set(result, true);
        result
    }

    /// Marks an existing symbol as a terminal.
    pub fn mark_terminal(&mut self, sym: Symbol) {
        self.lexemes.set(sym, true);
    }

    /// Returns the named terminal symbols, creating them in order.
    pub fn lexemes<const N: usize>(&mut self, names: [&str; N]) -> [Symbol; N] {
        names.map(|name| self.lexeme(Some(name.into())))
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source().num_syms()
    }

    /// Assigns the start symbol.
    pub fn set_start(&mut self, start: Symbol) {
        self.start = Some(start);
    }

    /// Returns the start symbol, if one was assigned.
    pub fn start(&self) -> Option<Symbol> {
        self.start
    }

    /// Checks whether the symbol is a terminal.
    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.lexemes[sym]
    }

    /// Iterates over the terminal symbols.
    pub fn terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.lexemes.iter()
    }

    /// Returns variables that appear in the grammar, including the start symbol.
    pub fn variables(&self) -> Vec<Symbol> {
        let mut used = self.used_symbols();
        if let Some(start) = self.start {
            used.set(start, true);
        }
        used.iter().filter(|&sym| !self.is_terminal(sym)).collect()
    }

    /// Returns the name of the symbol, or a generated name.
    pub fn name_of(&self, sym: Symbol) -> Cow<'_, str> {
        self.sym_source.name_of(sym)
    }

    /// Finds a symbol by name.
    pub fn sym_by_name(&self, name: &str) -> Option<Symbol> {
        self.sym_source.find(name)
    }

    /// Modifies this grammar so that every rule RHS has at most `limit` symbols.
    /// Long rules are rewritten into right-branching chains of fresh variables.
    ///
    /// # Invariants
    ///
    /// All rule RHS' have at most `n` symbols at all times until another
    /// call to this method.
    pub fn limit_rhs_len(&mut self, limit: Option<usize>) {
        debug_assert!(limit.is_none_or(|limit| limit >= 2));
        self.rhs_len_invariant = limit;
        let mut container = mem::take(&mut self.rules);
        container.retain(|rule| self.maybe_process_rule(rule));
        self.rules.extend(container);
    }

    /// Ensures that every rule RHS has at most two symbols.
    pub fn binarize(&mut self) {
        self.limit_rhs_len(Some(2));
    }

    /// The grammar rewrites and stores rules with a certain range of RHS lengths.
    /// This method returns this range.
    pub fn rule_rhs_len_allowed_range(&self) -> ops::Range<usize> {
        0..self.rhs_len_invariant.map_or(usize::MAX, |limit| limit + 1)
    }

    /// Ensures the grammar is binarized and eliminates all nulling rules, which have the
    /// form `A ::= ()`. For every binary rule with a nullable symbol, a shorter alternative
    /// is added.
    ///
    /// The language represented by the grammar is preserved, except for the lack of
    /// the empty string. Returns whether the start symbol derived the empty string.
    pub fn eliminate_nulling_rules(&mut self) -> bool {
        self.binarize();

        let nullable = self.nullable_symbols();
        let start_nullable = self.start.is_some_and(|start| nullable[start]);
        if nullable.iter().next().is_none() {
            // Nothing to do.
            return start_nullable;
        }

        let mut rewritten_work = vec![];
        for rule in self.rules() {
            // Here, all rules are binarized.
            debug_assert!(rule.rhs.len() <= 2);
            if let [left, right] = rule.rhs[..] {
                if nullable[left] {
                    rewritten_work.push(CfgRule::new(rule.lhs, [right]));
                }
                if nullable[right] {
                    rewritten_work.push(CfgRule::new(rule.lhs, [left]));
                }
            }
        }
        trace!(
            "nulling elimination added {} rules",
            rewritten_work.len()
        );
        self.rules.extend(rewritten_work);
        self.rules.retain(|rule| !rule.rhs.is_empty());
        self.sort();
        self.dedup();

        start_nullable
    }

    /// Checks whether the start symbol derives the empty string.
    pub fn generates_epsilon(&self) -> bool {
        self.start
            .is_some_and(|start| self.nullable_symbols()[start])
    }

    /// Returns an iterator over the list of grammar rules.
    pub fn rules(&self) -> impl Iterator<Item = &CfgRule> {
        self.rules.iter()
    }

    /// Sorts the rule array.
    pub fn sort(&mut self) {
        self.rules.sort_by_key(|rule| (rule.lhs, rule.rhs.clone()));
    }

    /// Removes consecutive duplicate rules.
    pub fn dedup(&mut self) {
        self.rules.dedup_by_key(|rule| (rule.lhs, rule.rhs.clone()));
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Allows mutable access to the symbol source through a reference.
    pub fn sym_source_mut(&mut self) -> &mut SymbolSource {
        &mut self.sym_source
    }

    /// Retains only the rules specified by the predicate.
    ///
    /// In other words, removes all the rules for which `f(&rule)`
    /// returns false.
    pub fn retain(&mut self, f: impl FnMut(&CfgRule) -> bool) {
        self.rules.retain(f);
    }

    fn maybe_process_rule(&mut self, rule: &CfgRule) -> bool {
        if self.rule_rhs_len_allowed_range().contains(&rule.rhs.len()) {
            return true;
        }
        let limit = self.rule_rhs_len_allowed_range().end - 1;

        // Rewrite to a chain of rules.
        // From `LHS ⸬= A B C … X Y Z` to:
        // ____________________
        // | LHS ⸬= A  S0
        // | S0  ⸬= B  S1
        // | …
        // | Sm  ⸬= X  Sn
        // | Sn  ⸬= Y  Z
        let mut lhs = rule.lhs;
        let mut rest = &rule.rhs[..];
        while rest.len() > limit {
            let (head, tail) = rest.split_at(limit - 1);
            let next = self.next_sym(None);
            let mut rhs = head.to_vec();
            rhs.push(next);
            self.rules.push(CfgRule::new(lhs, rhs));
            lhs = next;
            rest = tail;
        }
        self.rules.push(CfgRule::new(lhs, rest));

        false
    }

    /// Adds a rule to this grammar, binarizing or limiting its length
    /// if [`fn limit_rhs_len`] was called.
    ///
    /// [`fn limit_rhs_len`]: Self::limit_rhs_len
    pub fn add_rule(&mut self, rule: CfgRule) {
        if self.maybe_process_rule(&rule) {
            self.rules.push(rule);
        }
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder::new(self, lhs)
    }

    /// If **all** symbols on the RHS have the property, the LHS has it too.
    /// Updates the given symbol set according to the above, and does it
    /// transitively.
    pub fn rhs_closure_for_all(&self, property: &mut SymbolBitSet) {
        let mut work_stack: Vec<Symbol> = property.iter().collect();

        let mut occurences: BTreeMap<Symbol, Vec<usize>> = BTreeMap::new();
        for (rule_id, rule) in self.rules.iter().enumerate() {
            let mut rhs_syms = rule.rhs.to_vec();
            rhs_syms.sort();
            rhs_syms.dedup();
            for sym in rhs_syms {
                occurences.entry(sym).or_default().push(rule_id);
            }
        }

        while let Some(work_sym) = work_stack.pop() {
            for &rule_id in occurences.get(&work_sym).into_iter().flatten() {
                let rule = &self.rules[rule_id];
                if !property[rule.lhs] && rule.rhs.iter().all(|&sym| property[sym]) {
                    property.set(rule.lhs, true);
                    work_stack.push(rule.lhs);
                }
            }
        }
    }

    /// Formats the grammar to a `String`. The output looks like this:
    ///
    /// ```ignore
    /// S ::= a S b S;
    /// S ::= ();
    /// g4 ::= S b;
    /// ```
    ///
    /// Gensyms are displayed as `g` followed by their ID.
    pub fn stringify_to_bnf(&self) -> String {
        let mut result = String::new();
        for rule in self.rules() {
            let _ = writeln!(&mut result, "{};", self.stringify_rule(rule));
        }
        result
    }

    /// Formats a single rule as `lhs ::= rhs`, without the semicolon.
    pub fn stringify_rule(&self, rule: &CfgRule) -> String {
        let lhs = self.name_of(rule.lhs);
        let rhs = if rule.rhs.is_empty() {
            "()".to_string()
        } else {
            rule.rhs
                .iter()
                .map(|&sym| self.name_of(sym))
                .collect::<Vec<_>>()
                .join(" ")
        };
        format!("{} ::= {}", lhs, rhs)
    }
}

impl CfgRule {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: impl AsRef<[Symbol]>) -> Self {
        CfgRule {
            lhs,
            rhs: rhs.as_ref().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_rhs_len_builds_right_branching_chain() {
        let mut cfg = Cfg::new();
        let [start] = cfg.sym();
        let [a, b, c, d] = cfg.lexemes(["a", "b", "c", "d"]);
        cfg.rule(start).rhs([a, b, c, d]);
        cfg.binarize();

        let rules: Vec<_> = cfg.rules().cloned().collect();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].lhs, start);
        assert_eq!(rules[0].rhs[0], a);
        assert_eq!(rules[1].lhs, rules[0].rhs[1]);
        assert_eq!(rules[1].rhs[0], b);
        assert_eq!(&rules[2].rhs[..], &[c, d]);
        assert!(cfg.rules().all(|rule| rule.rhs.len() <= 2));
    }

    #[test]
    fn test_eliminate_nulling_rules() {
        let mut cfg = Cfg::new();
        let [start, a] = cfg.sym();
        let [x] = cfg.lexemes(["x"]);
        cfg.rule(start).rhs([a, x]).rule(a).rhs([]).rhs([x]);
        cfg.set_start(start);

        assert!(!cfg.eliminate_nulling_rules());
        let mut rules: Vec<_> = cfg.rules().map(|rule| (rule.lhs, rule.rhs.to_vec())).collect();
        rules.sort();
        assert_eq!(
            rules,
            vec![(start, vec![a, x]), (start, vec![x]), (a, vec![x])]
        );
    }

    #[test]
    fn test_generates_epsilon() {
        let mut cfg = Cfg::new();
        let [start, a, b] = cfg.sym();
        cfg.rule(start).rhs([a, b]).rule(a).rhs([]).rule(b).rhs([a, a]);
        cfg.set_start(start);
        assert!(cfg.generates_epsilon());

        let [x] = cfg.lexemes(["x"]);
        cfg.retain(|rule| rule.lhs != b);
        cfg.rule(b).rhs([x]);
        assert!(!cfg.generates_epsilon());
    }
}
