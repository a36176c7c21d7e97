//! Automata with ε-transitions.

use std::collections::{BTreeMap, BTreeSet};

use crate::automaton::Automaton;

/// A nondeterministic automaton that may move between states without reading
/// a label. States are plain indices.
#[derive(Clone, Debug, Default)]
pub struct EpsilonNfa {
    automaton: Automaton<usize>,
    epsilon: BTreeMap<usize, BTreeSet<usize>>,
}

impl EpsilonNfa {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fresh state and returns its index.
    pub fn add_state(&mut self) -> usize {
        let id = self.automaton.num_states();
        self.automaton.add_state(id)
    }

    pub fn num_states(&self) -> usize {
        self.automaton.num_states()
    }

    pub fn set_start(&mut self, state: usize) {
        self.automaton.set_start_by_index(state);
    }

    pub fn set_final(&mut self, state: usize) {
        self.automaton.set_final_by_index(state);
    }

    pub fn add_transition(&mut self, from: usize, label: &str, to: usize) {
        self.automaton.add_transition_by_index(from, label, to);
    }

    pub fn add_epsilon(&mut self, from: usize, to: usize) {
        assert!(from < self.num_states() && to < self.num_states());
        self.epsilon.entry(from).or_default().insert(to);
    }

    /// States reachable from `states` through ε-transitions alone, `states` included.
    pub fn epsilon_closure(&self, states: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut closure = states.clone();
        let mut stack: Vec<usize> = states.iter().copied().collect();
        while let Some(state) = stack.pop() {
            for &next in self.epsilon.get(&state).into_iter().flatten() {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }
        closure
    }

    /// Checks whether the automaton accepts the word.
    pub fn accepts<L: AsRef<str>>(&self, word: &[L]) -> bool {
        let mut current = self.epsilon_closure(self.automaton.start_ids());
        for label in word {
            current = self.epsilon_closure(&self.automaton.step(&current, label.as_ref()));
        }
        current.iter().any(|&id| self.automaton.is_final(id))
    }

    /// Removes ε-transitions. States keep their indices.
    ///
    /// A state gets the labeled transitions of every state in its ε-closure, and
    /// is final if its ε-closure holds a final state.
    pub fn to_nfa(&self) -> Automaton<usize> {
        let mut nfa = Automaton::new();
        for id in 0..self.num_states() {
            nfa.add_state(id);
        }
        for &id in self.automaton.start_ids() {
            nfa.set_start_by_index(id);
        }
        let labels: Vec<&str> = self.automaton.labels().collect();
        for id in 0..self.num_states() {
            let closure = self.epsilon_closure(&BTreeSet::from([id]));
            if closure.iter().any(|&member| self.automaton.is_final(member)) {
                nfa.set_final_by_index(id);
            }
            for &label in &labels {
                for to in self.automaton.step(&closure, label) {
                    nfa.add_transition_by_index(id, label, to);
                }
            }
        }
        nfa
    }
}
