//! Recursive state machines.

use std::collections::BTreeMap;

use log::debug;

use cfpq_automaton::Automaton;

use crate::ecfg::Ecfg;

/// One automaton, called a box, per variable of an extended grammar.
///
/// Box transitions are labeled with terminals and variable names alike.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rsm {
    start: String,
    boxes: BTreeMap<String, Automaton<usize>>,
}

impl Rsm {
    /// Compiles every body of the grammar into an automaton without
    /// ε-transitions.
    pub fn from_ecfg(ecfg: &Ecfg) -> Self {
        let boxes = ecfg
            .productions()
            .map(|(head, body)| (head.to_string(), body.to_nfa()))
            .collect();
        Rsm {
            start: ecfg.start().to_string(),
            boxes,
        }
    }

    /// Replaces every box with its minimal deterministic automaton.
    pub fn minimize(self) -> Self {
        let boxes: BTreeMap<_, _> = self
            .boxes
            .into_iter()
            .map(|(head, nfa)| {
                let minimal = nfa.minimize();
                debug!(
                    "minimized box {}: {} states to {}",
                    head,
                    nfa.num_states(),
                    minimal.num_states()
                );
                (head, minimal)
            })
            .collect();
        Rsm {
            start: self.start,
            boxes,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// The box of a variable.
    pub fn box_for(&self, variable: &str) -> Option<&Automaton<usize>> {
        self.boxes.get(variable)
    }

    /// All `(variable, box)` pairs, ordered by variable.
    pub fn boxes(&self) -> impl Iterator<Item = (&str, &Automaton<usize>)> {
        self.boxes.iter().map(|(head, nfa)| (&head[..], nfa))
    }

    /// Total number of states over all boxes.
    pub fn num_states(&self) -> usize {
        self.boxes.values().map(Automaton::num_states).sum()
    }
}

/// Replaces every box of the machine with its minimal equivalent.
pub fn minimize_rsm(rsm: Rsm) -> Rsm {
    rsm.minimize()
}
