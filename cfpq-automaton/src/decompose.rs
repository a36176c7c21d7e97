//! Boolean matrix decomposition of automata.

use std::collections::{BTreeMap, BTreeSet};

use cfpq_bool_matrix::BoolMatrix;

use crate::automaton::{Automaton, State};
use crate::state_index::StateIndex;

/// An automaton as one square boolean matrix per label.
///
/// `matrices[label][i][j]` is set iff there is a transition from the state with
/// index `i` to the state with index `j` under `label`.
#[derive(Clone, Debug)]
pub struct Decomposition<S> {
    pub states: StateIndex<S>,
    pub start: BTreeSet<usize>,
    pub finals: BTreeSet<usize>,
    pub matrices: BTreeMap<String, BoolMatrix>,
}

impl<S: Clone> Automaton<S> {
    /// Decomposes the automaton into per-label adjacency matrices. State indices
    /// are the automaton's own, in construction order.
    pub fn to_matrices(&self) -> Decomposition<S> {
        let size = self.num_states();
        let mut matrices = BTreeMap::new();
        for label in self.labels() {
            let mut matrix = BoolMatrix::square(size);
            for &(from, to) in self.transitions(label).into_iter().flatten() {
                matrix.set(from, to, true);
            }
            matrices.insert(label.to_string(), matrix);
        }
        Decomposition {
            states: self.states().clone(),
            start: self.start_ids().clone(),
            finals: self.final_ids().clone(),
            matrices,
        }
    }
}

impl<S> Decomposition<S> {
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// The matrix of one label.
    pub fn matrix(&self, label: &str) -> Option<&BoolMatrix> {
        self.matrices.get(label)
    }

    /// The OR of all label matrices.
    pub fn adjacency(&self) -> BoolMatrix {
        let mut result = BoolMatrix::square(self.num_states());
        for matrix in self.matrices.values() {
            result.union_with(matrix);
        }
        result
    }
}

impl<S: State> Decomposition<S> {
    /// Rebuilds a concrete automaton. Labels with all-zero matrices disappear.
    pub fn to_automaton(&self) -> Automaton<S> {
        let mut automaton = Automaton::new();
        for state in self.states.iter() {
            automaton.add_state(state.clone());
        }
        for &id in &self.start {
            automaton.set_start_by_index(id);
        }
        for &id in &self.finals {
            automaton.set_final_by_index(id);
        }
        for (label, matrix) in &self.matrices {
            for (from, to) in matrix.iter_ones() {
                automaton.add_transition_by_index(from, label, to);
            }
        }
        automaton
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decomposition() {
        let mut nfa = Automaton::new();
        nfa.add_start("x");
        nfa.add_final("z");
        nfa.add_transition("x", "a", "y");
        nfa.add_transition("y", "b", "z");
        nfa.add_transition("x", "a", "z");

        let decomposition = nfa.to_matrices();
        assert_eq!(decomposition.num_states(), 3);
        assert_eq!(decomposition.states.get(&"y"), Some(1));
        let a = decomposition.matrix("a").unwrap();
        assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![(0, 1), (0, 2)]);
        assert!(decomposition.matrix("c").is_none());
        assert_eq!(decomposition.adjacency().count_ones(), 3);
        assert_eq!(decomposition.to_automaton(), nfa);
    }
}
