//! Subset construction and minimization.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::{debug, trace};

use crate::automaton::Automaton;
use crate::state_index::StateIndex;

impl<S> Automaton<S> {
    /// Builds an equivalent deterministic automaton with the subset construction.
    ///
    /// Only subsets reachable from the start set become states. The result always
    /// has exactly one start state, even for an automaton without start states.
    pub fn determinize(&self) -> Automaton<usize> {
        let labels: Vec<&str> = self.labels().collect();
        let mut subsets: StateIndex<BTreeSet<usize>> = StateIndex::new();
        let mut dfa = Automaton::new();
        let mut work = VecDeque::new();

        let start = self.start_ids().clone();
        subsets.insert(start.clone());
        dfa.add_start(0);
        work.push_back(start);

        while let Some(subset) = work.pop_front() {
            let from = subsets.get(&subset).unwrap_or_default();
            if subset.iter().any(|&id| self.is_final(id)) {
                dfa.set_final_by_index(from);
            }
            for &label in &labels {
                let target = self.step(&subset, label);
                if target.is_empty() {
                    continue;
                }
                let known = subsets.contains(&target);
                let to = subsets.insert(target.clone());
                if !known {
                    dfa.add_state(to);
                    work.push_back(target);
                }
                dfa.add_transition_by_index(from, label, to);
            }
        }
        trace!(
            "subset construction: {} states to {}",
            self.num_states(),
            dfa.num_states()
        );
        dfa
    }

    /// Builds the minimal deterministic automaton for the same language.
    ///
    /// States are numbered in breadth-first order from the start state, following
    /// labels in sorted order, so two automata for one language minimize to equal
    /// values. A state that cannot reach a final state is dropped together with
    /// its transitions.
    pub fn minimize(&self) -> Automaton<usize> {
        let dfa = self.determinize();
        let labels: Vec<&str> = dfa.labels().collect();
        let num_states = dfa.num_states();
        // An implicit dead state with index `num_states` completes the transition function.
        let dead = num_states;
        let delta: Vec<Vec<usize>> = (0..num_states)
            .map(|id| {
                labels
                    .iter()
                    .map(|&label| dfa.successors(id, label).next().unwrap_or(dead))
                    .collect()
            })
            .collect();
        let next = |id: usize, label: usize| if id == dead { dead } else { delta[id][label] };

        // Moore's partition refinement.
        let mut block: Vec<usize> = (0..=num_states)
            .map(|id| usize::from(id != dead && dfa.is_final(id)))
            .collect();
        let mut num_blocks = block.iter().collect::<BTreeSet<_>>().len();
        loop {
            let mut signatures: StateIndex<(usize, Vec<usize>)> = StateIndex::new();
            let refined: Vec<usize> = (0..=num_states)
                .map(|id| {
                    let targets = (0..labels.len()).map(|label| block[next(id, label)]).collect();
                    signatures.insert((block[id], targets))
                })
                .collect();
            block = refined;
            if signatures.len() == num_blocks {
                break;
            }
            num_blocks = signatures.len();
        }

        let dead_block = block[dead];
        let mut renumbered: BTreeMap<usize, usize> = BTreeMap::new();
        let mut minimal = Automaton::new();
        if block[0] == dead_block {
            minimal.add_start(0);
            debug!("minimized to the empty language");
            return minimal;
        }
        // Canonical numbering. The start state is always index 0 after determinization.
        let mut work = VecDeque::from([0]);
        renumbered.insert(block[0], 0);
        minimal.add_start(0);
        while let Some(representative) = work.pop_front() {
            let from = renumbered[&block[representative]];
            if dfa.is_final(representative) {
                minimal.set_final_by_index(from);
            }
            for (label_id, &label) in labels.iter().enumerate() {
                let target = next(representative, label_id);
                if block[target] == dead_block {
                    continue;
                }
                let to = match renumbered.get(&block[target]) {
                    Some(&to) => to,
                    None => {
                        let to = renumbered.len();
                        renumbered.insert(block[target], to);
                        minimal.add_state(to);
                        work.push_back(target);
                        to
                    }
                };
                minimal.add_transition_by_index(from, label, to);
            }
        }
        debug!(
            "minimized automaton: {} states to {}",
            self.num_states(),
            minimal.num_states()
        );
        minimal
    }

    /// Checks whether both automata accept the same language.
    pub fn is_equivalent_to<T>(&self, other: &Automaton<T>) -> bool {
        self.minimize() == other.minimize()
    }
}
