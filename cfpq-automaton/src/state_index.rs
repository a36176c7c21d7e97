//! Dense numbering of automaton states.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops;

/// Assigns each distinct state a dense 0-based index, in insertion order.
#[derive(Clone, Debug)]
pub struct StateIndex<S> {
    states: Vec<S>,
    index: HashMap<S, usize>,
}

impl<S> Default for StateIndex<S> {
    fn default() -> Self {
        StateIndex {
            states: vec![],
            index: HashMap::new(),
        }
    }
}

impl<S: Clone + Eq + Hash> StateIndex<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the state, assigning the next free index to a new state.
    pub fn insert(&mut self, state: S) -> usize {
        if let Some(&id) = self.index.get(&state) {
            return id;
        }
        let id = self.states.len();
        self.index.insert(state.clone(), id);
        self.states.push(state);
        id
    }

    /// Looks up the index of a state.
    pub fn get(&self, state: &S) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// Checks whether the state has an index.
    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }
}

impl<S> StateIndex<S> {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The state with the given index.
    pub fn state(&self, id: usize) -> &S {
        &self.states[id]
    }

    /// States in index order.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }
}

impl<S> ops::Index<usize> for StateIndex<S> {
    type Output = S;

    fn index(&self, id: usize) -> &S {
        &self.states[id]
    }
}

impl<S: PartialEq> PartialEq for StateIndex<S> {
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
    }
}

impl<S: Eq> Eq for StateIndex<S> {}

impl<S: Clone + Eq + Hash> FromIterator<S> for StateIndex<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = StateIndex::new();
        for state in iter {
            index.insert(state);
        }
        index
    }
}
