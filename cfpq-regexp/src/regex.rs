//! Regular expression trees and their automata.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use cfpq_automaton::{Automaton, EpsilonNfa};

use crate::parse::{RegexError, parse};

/// A regular expression over labels.
///
/// `Union(vec![])` denotes the empty language and `Concat(vec![])` the empty word.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Regex {
    Epsilon,
    Label(String),
    Concat(Vec<Regex>),
    Union(Vec<Regex>),
    Star(Box<Regex>),
}

impl Regex {
    /// Parses a regular expression. See [`parse`](crate::parse()).
    pub fn parse(text: &str) -> Result<Self, RegexError> {
        parse(text)
    }

    /// A single label.
    pub fn label(label: impl Into<String>) -> Self {
        Regex::Label(label.into())
    }

    /// The expression that matches no word.
    pub fn empty() -> Self {
        Regex::Union(vec![])
    }

    /// `self | other`
    pub fn union(self, other: Regex) -> Self {
        match (self, other) {
            (Regex::Union(mut left), Regex::Union(right)) => {
                left.extend(right);
                Regex::Union(left)
            }
            (Regex::Union(mut left), right) => {
                left.push(right);
                Regex::Union(left)
            }
            (left, right) => Regex::Union(vec![left, right]),
        }
    }

    /// `self other`
    pub fn concat(self, other: Regex) -> Self {
        match (self, other) {
            (Regex::Concat(mut left), Regex::Concat(right)) => {
                left.extend(right);
                Regex::Concat(left)
            }
            (Regex::Concat(mut left), right) => {
                left.push(right);
                Regex::Concat(left)
            }
            (left, right) => Regex::Concat(vec![left, right]),
        }
    }

    /// `self*`
    pub fn star(self) -> Self {
        match self {
            star @ Regex::Star(_) => star,
            other => Regex::Star(Box::new(other)),
        }
    }

    /// Labels occurring in the expression.
    pub fn labels(&self) -> BTreeSet<&str> {
        let mut labels = BTreeSet::new();
        let mut work = vec![self];
        while let Some(regex) = work.pop() {
            match regex {
                Regex::Epsilon => {}
                Regex::Label(label) => {
                    labels.insert(&label[..]);
                }
                Regex::Concat(items) | Regex::Union(items) => work.extend(items),
                Regex::Star(inner) => work.push(&**inner),
            }
        }
        labels
    }

    /// Adds the expression to the automaton as a fragment with one entry and one exit.
    fn build(&self, nfa: &mut EpsilonNfa) -> (usize, usize) {
        match self {
            Regex::Epsilon => {
                let (entry, exit) = (nfa.add_state(), nfa.add_state());
                nfa.add_epsilon(entry, exit);
                (entry, exit)
            }
            Regex::Label(label) => {
                let (entry, exit) = (nfa.add_state(), nfa.add_state());
                nfa.add_transition(entry, label, exit);
                (entry, exit)
            }
            Regex::Concat(items) => {
                let entry = nfa.add_state();
                let mut exit = entry;
                for item in items {
                    let (item_entry, item_exit) = item.build(nfa);
                    nfa.add_epsilon(exit, item_entry);
                    exit = item_exit;
                }
                (entry, exit)
            }
            Regex::Union(items) => {
                let (entry, exit) = (nfa.add_state(), nfa.add_state());
                for item in items {
                    let (item_entry, item_exit) = item.build(nfa);
                    nfa.add_epsilon(entry, item_entry);
                    nfa.add_epsilon(item_exit, exit);
                }
                (entry, exit)
            }
            Regex::Star(inner) => {
                let (entry, exit) = (nfa.add_state(), nfa.add_state());
                let (inner_entry, inner_exit) = inner.build(nfa);
                nfa.add_epsilon(entry, exit);
                nfa.add_epsilon(entry, inner_entry);
                nfa.add_epsilon(inner_exit, inner_entry);
                nfa.add_epsilon(inner_exit, exit);
                (entry, exit)
            }
        }
    }

    /// Thompson's construction.
    pub fn to_epsilon_nfa(&self) -> EpsilonNfa {
        let mut nfa = EpsilonNfa::new();
        let (entry, exit) = self.build(&mut nfa);
        nfa.set_start(entry);
        nfa.set_final(exit);
        nfa
    }

    /// An automaton without ε-transitions for the same language.
    pub fn to_nfa(&self) -> Automaton<usize> {
        self.to_epsilon_nfa().to_nfa()
    }

    /// The minimal deterministic automaton for the same language.
    pub fn to_dfa(&self) -> Automaton<usize> {
        self.to_nfa().minimize()
    }
}

impl FromStr for Regex {
    type Err = RegexError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

impl fmt::Display for Regex {
    /// Writes the expression in the syntax accepted by [`parse`](crate::parse()). The empty
    /// language has no such syntax and is written as `∅`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Regex::Epsilon => write!(f, "$"),
            Regex::Label(label) => write!(f, "{}", label),
            Regex::Concat(items) if items.is_empty() => write!(f, "$"),
            Regex::Concat(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    match item {
                        Regex::Union(alternatives) if alternatives.len() > 1 => {
                            write!(f, "({})", item)?
                        }
                        _ => write!(f, "{}", item)?,
                    }
                }
                Ok(())
            }
            Regex::Union(items) if items.is_empty() => write!(f, "∅"),
            Regex::Union(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Regex::Star(inner) => match **inner {
                Regex::Label(_) | Regex::Epsilon => write!(f, "{}*", inner),
                _ => write!(f, "({})*", inner),
            },
        }
    }
}
