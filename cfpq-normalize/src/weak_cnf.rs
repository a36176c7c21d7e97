//! Grammars in weak Chomsky normal form.

use std::borrow::Cow;
use std::fmt;

use cfpq_grammar::{Cfg, CfgRule};
use cfpq_symbol::{Symbol, SymbolSource};

/// A production of a grammar in weak Chomsky normal form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Production {
    /// `A ::= ()`
    Epsilon { head: Symbol },
    /// `A ::= a`
    Terminal { head: Symbol, terminal: Symbol },
    /// `A ::= B C`
    Binary {
        head: Symbol,
        left: Symbol,
        right: Symbol,
    },
}

impl Production {
    /// The production's head variable.
    pub fn head(&self) -> Symbol {
        match *self {
            Production::Epsilon { head }
            | Production::Terminal { head, .. }
            | Production::Binary { head, .. } => head,
        }
    }

    fn body(&self) -> Vec<Symbol> {
        match *self {
            Production::Epsilon { .. } => vec![],
            Production::Terminal { terminal, .. } => vec![terminal],
            Production::Binary { left, right, .. } => vec![left, right],
        }
    }
}

/// A context-free grammar whose bodies are empty, a single terminal or two variables.
///
/// It is built once per query and owns its symbol names, so it can be shared
/// between threads.
#[derive(Clone, Debug)]
pub struct WeakCnf {
    sym_source: SymbolSource,
    start: Option<Symbol>,
    variables: Vec<Symbol>,
    terminals: Vec<Symbol>,
    productions: Vec<Production>,
}

impl WeakCnf {
    /// Classifies the rules of a normalized grammar.
    ///
    /// # Panics
    ///
    /// Panics if a rule has none of the three shapes.
    pub(crate) fn from_normalized(mut cfg: Cfg) -> Self {
        cfg.sort();
        cfg.dedup();
        let productions = cfg
            .rules()
            .map(|rule| match rule.rhs[..] {
                [] => Production::Epsilon { head: rule.lhs },
                [terminal] if cfg.is_terminal(terminal) => Production::Terminal {
                    head: rule.lhs,
                    terminal,
                },
                [left, right] if !cfg.is_terminal(left) && !cfg.is_terminal(right) => {
                    Production::Binary {
                        head: rule.lhs,
                        left,
                        right,
                    }
                }
                _ => unreachable!(
                    "rule {} is not in weak CNF",
                    cfg.stringify_rule(rule)
                ),
            })
            .collect();
        WeakCnf {
            start: cfg.start(),
            variables: cfg.variables(),
            terminals: cfg.terminals().collect(),
            productions,
            sym_source: cfg.sym_source().clone(),
        }
    }

    /// The start variable, if the grammar has one.
    pub fn start(&self) -> Option<Symbol> {
        self.start
    }

    /// Variables in use, including the start variable.
    pub fn variables(&self) -> &[Symbol] {
        &self.variables[..]
    }

    /// Terminals of the grammar, including those no longer used by any production.
    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals[..]
    }

    /// All productions, sorted.
    pub fn productions(&self) -> &[Production] {
        &self.productions[..]
    }

    /// Heads of `A ::= ()` productions.
    pub fn epsilon_heads(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.productions.iter().filter_map(|production| match *production {
            Production::Epsilon { head } => Some(head),
            _ => None,
        })
    }

    /// Productions of the form `A ::= a`, as `(A, a)`.
    pub fn terminal_productions(&self) -> impl Iterator<Item = (Symbol, Symbol)> + '_ {
        self.productions.iter().filter_map(|production| match *production {
            Production::Terminal { head, terminal } => Some((head, terminal)),
            _ => None,
        })
    }

    /// Productions of the form `A ::= B C`, as `(A, B, C)`.
    pub fn binary_productions(&self) -> impl Iterator<Item = (Symbol, Symbol, Symbol)> + '_ {
        self.productions.iter().filter_map(|production| match *production {
            Production::Binary { head, left, right } => Some((head, left, right)),
            _ => None,
        })
    }

    /// Checks whether the start variable has an `S ::= ()` production.
    pub fn has_start_epsilon(&self) -> bool {
        self.start
            .is_some_and(|start| self.epsilon_heads().any(|head| head == start))
    }

    /// Returns the name of the symbol, or a generated name.
    pub fn name_of(&self, sym: Symbol) -> Cow<'_, str> {
        self.sym_source.name_of(sym)
    }

    /// Finds a symbol by name.
    pub fn sym_by_name(&self, name: &str) -> Option<Symbol> {
        self.sym_source.find(name)
    }

    /// Number of symbols, which bounds every symbol's index.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Converts the grammar back into the general representation.
    pub fn to_cfg(&self) -> Cfg {
        let mut cfg = Cfg::with_sym_source(self.sym_source.clone());
        for &terminal in &self.terminals {
            cfg.mark_terminal(terminal);
        }
        if let Some(start) = self.start {
            cfg.set_start(start);
        }
        for production in &self.productions {
            cfg.add_rule(CfgRule::new(production.head(), production.body()));
        }
        cfg
    }
}

impl fmt::Display for WeakCnf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for production in &self.productions {
            write!(f, "{} ::=", self.name_of(production.head()))?;
            let body = production.body();
            if body.is_empty() {
                write!(f, " ()")?;
            }
            for sym in body {
                write!(f, " {}", self.name_of(sym))?;
            }
            writeln!(f, ";")?;
        }
        Ok(())
    }
}
