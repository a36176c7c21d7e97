//! Product construction through Kronecker products.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::automaton::{Automaton, State};
use crate::decompose::Decomposition;
use crate::state_index::StateIndex;

/// Computes the automaton accepting the intersection of both languages.
///
/// The product state `(p, q)` has index `index(p) * |second| + index(q)`. It is a
/// start state iff both components are, and final iff both components are. Only
/// labels present in both automata get transitions. Every pair of states is a
/// product state, even when no transition reaches it.
pub fn intersect<A: State, B: State>(first: &Automaton<A>, second: &Automaton<B>) -> Automaton<(A, B)> {
    let first = first.to_matrices();
    let second = second.to_matrices();
    let width = second.num_states();

    let mut states = StateIndex::new();
    for p in first.states.iter() {
        for q in second.states.iter() {
            states.insert((p.clone(), q.clone()));
        }
    }
    let pairs = |left: &BTreeSet<usize>, right: &BTreeSet<usize>| -> BTreeSet<usize> {
        left.iter()
            .flat_map(|&i| right.iter().map(move |&j| i * width + j))
            .collect()
    };

    let mut matrices = BTreeMap::new();
    for (label, matrix) in &first.matrices {
        if let Some(other) = second.matrix(label) {
            matrices.insert(label.clone(), matrix.kron(other));
        }
    }
    debug!(
        "intersection: {} x {} states, {} shared labels",
        first.num_states(),
        width,
        matrices.len()
    );

    Decomposition {
        states,
        start: pairs(&first.start, &second.start),
        finals: pairs(&first.finals, &second.finals),
        matrices,
    }
    .to_automaton()
}

impl<S: State> Automaton<S> {
    /// Shorthand for [`intersect`].
    pub fn intersect<T: State>(&self, other: &Automaton<T>) -> Automaton<(S, T)> {
        intersect(self, other)
    }
}
