//! Finite automata over string labels.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::Hash;

use crate::state_index::StateIndex;

/// Types that can name automaton states.
pub trait State: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> State for T {}

/// A labeled finite automaton.
///
/// States are kept in a [`StateIndex`], so every state also has a dense index.
/// Transitions are stored per label as `(from, to)` index pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton<S = usize> {
    states: StateIndex<S>,
    start: BTreeSet<usize>,
    finals: BTreeSet<usize>,
    transitions: BTreeMap<String, BTreeSet<(usize, usize)>>,
}

impl<S: State> Default for Automaton<S> {
    fn default() -> Self {
        Automaton {
            states: StateIndex::new(),
            start: BTreeSet::new(),
            finals: BTreeSet::new(),
            transitions: BTreeMap::new(),
        }
    }
}

impl<S: State> Automaton<S> {
    /// Creates an automaton without states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state, or returns the index of an existing one.
    pub fn add_state(&mut self, state: S) -> usize {
        self.states.insert(state)
    }

    /// Adds a state and marks it as a start state.
    pub fn add_start(&mut self, state: S) -> usize {
        let id = self.add_state(state);
        self.start.insert(id);
        id
    }

    /// Adds a state and marks it as a final state.
    pub fn add_final(&mut self, state: S) -> usize {
        let id = self.add_state(state);
        self.finals.insert(id);
        id
    }

    /// Adds a transition between two states, adding the states if needed.
    pub fn add_transition(&mut self, from: S, label: &str, to: S) {
        let from = self.add_state(from);
        let to = self.add_state(to);
        self.add_transition_by_index(from, label, to);
    }

    /// Adds a transition between two existing states.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn add_transition_by_index(&mut self, from: usize, label: &str, to: usize) {
        assert!(from < self.num_states() && to < self.num_states());
        if let Some(pairs) = self.transitions.get_mut(label) {
            pairs.insert((from, to));
        } else {
            self.transitions
                .insert(label.to_string(), BTreeSet::from([(from, to)]));
        }
    }

    /// Marks an existing state as a start state.
    pub fn set_start_by_index(&mut self, id: usize) {
        assert!(id < self.num_states());
        self.start.insert(id);
    }

    /// Marks an existing state as a final state.
    pub fn set_final_by_index(&mut self, id: usize) {
        assert!(id < self.num_states());
        self.finals.insert(id);
    }

    /// Looks up the index of a state.
    pub fn state_id(&self, state: &S) -> Option<usize> {
        self.states.get(state)
    }

    /// The state with the given index.
    pub fn state(&self, id: usize) -> &S {
        self.states.state(id)
    }
}

impl<S> Automaton<S> {
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// The state index.
    pub fn states(&self) -> &StateIndex<S> {
        &self.states
    }

    /// Indices of start states.
    pub fn start_ids(&self) -> &BTreeSet<usize> {
        &self.start
    }

    /// Indices of final states.
    pub fn final_ids(&self) -> &BTreeSet<usize> {
        &self.finals
    }

    pub fn is_start(&self, id: usize) -> bool {
        self.start.contains(&id)
    }

    pub fn is_final(&self, id: usize) -> bool {
        self.finals.contains(&id)
    }

    /// Labels with at least one transition, in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(|label| &label[..])
    }

    /// Transitions under one label as `(from, to)` index pairs.
    pub fn transitions(&self, label: &str) -> Option<&BTreeSet<(usize, usize)>> {
        self.transitions.get(label)
    }

    /// All transitions as `(from, label, to)`.
    pub fn iter_transitions(&self) -> impl Iterator<Item = (usize, &str, usize)> {
        self.transitions.iter().flat_map(|(label, pairs)| {
            pairs.iter().map(move |&(from, to)| (from, &label[..], to))
        })
    }

    /// Number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.transitions.values().map(BTreeSet::len).sum()
    }

    /// Targets of transitions from `from` under `label`.
    pub fn successors<'a>(&'a self, from: usize, label: &str) -> impl Iterator<Item = usize> + 'a {
        self.transitions
            .get(label)
            .into_iter()
            .flat_map(move |pairs| pairs.range((from, 0)..=(from, usize::MAX)))
            .map(|&(_, to)| to)
    }

    /// States reached from any of `from` under `label`.
    pub fn step(&self, from: &BTreeSet<usize>, label: &str) -> BTreeSet<usize> {
        from.iter()
            .flat_map(|&id| self.successors(id, label))
            .collect()
    }

    /// Checks whether the automaton accepts the word.
    pub fn accepts<L: AsRef<str>>(&self, word: &[L]) -> bool {
        let mut current = self.start.clone();
        for label in word {
            if current.is_empty() {
                return false;
            }
            current = self.step(&current, label.as_ref());
        }
        current.iter().any(|id| self.finals.contains(id))
    }

    /// Checks whether there is at most one start state and at most one transition
    /// per state and label.
    pub fn is_deterministic(&self) -> bool {
        self.start.len() <= 1
            && self.transitions.values().all(|pairs| {
                pairs
                    .iter()
                    .zip(pairs.iter().skip(1))
                    .all(|(&(from_a, _), &(from_b, _))| from_a != from_b)
            })
    }

    /// The same automaton with its states replaced by their indices.
    pub fn reindex(&self) -> Automaton<usize> {
        Automaton {
            states: (0..self.num_states()).collect(),
            start: self.start.clone(),
            finals: self.finals.clone(),
            transitions: self.transitions.clone(),
        }
    }

    /// The automaton accepting the union of both languages.
    ///
    /// States of `self` keep their indices, and states of `other` follow them.
    pub fn union<T>(&self, other: &Automaton<T>) -> Automaton<usize> {
        let offset = self.num_states();
        let mut result = self.reindex();
        for id in 0..other.num_states() {
            result.add_state(offset + id);
        }
        for &id in other.start_ids() {
            result.set_start_by_index(offset + id);
        }
        for &id in other.final_ids() {
            result.set_final_by_index(offset + id);
        }
        for (from, label, to) in other.iter_transitions() {
            result.add_transition_by_index(offset + from, label, offset + to);
        }
        result
    }
}
