//! Hellings' worklist closure.

use std::collections::{BTreeSet, HashMap};
use std::mem;

use log::{debug, trace};

use cfpq_automaton::{Graph, NodeId, NodeQuery, Relation};
use cfpq_normalize::WeakCnf;
use cfpq_symbol::Symbol;

use crate::engine::{ClosureEngine, ClosureStats, initial_triples};

/// Derives new triples from a worklist. Every triple enters the worklist once,
/// at the moment it is added to the relation.
///
/// A round processes the triples that were queued when it began, so the rounds
/// of [`ClosureStats`] are generations of derived triples.
#[derive(Clone, Copy, Debug, Default)]
pub struct HellingsClosure;

type Triple = (Symbol, NodeId, NodeId);

#[derive(Default)]
struct Worklist {
    relation: Relation<Symbol>,
    /// `(A, u)` for every triple `(A, u, v)`, keyed by `v`.
    ending_at: HashMap<NodeId, Vec<(Symbol, NodeId)>>,
    /// `(A, v)` for every triple `(A, u, v)`, keyed by `u`.
    starting_at: HashMap<NodeId, Vec<(Symbol, NodeId)>>,
    queue: Vec<Triple>,
}

impl Worklist {
    fn add(&mut self, (symbol, source, target): Triple) {
        if self.relation.insert(symbol, source, target) {
            self.ending_at.entry(target).or_default().push((symbol, source));
            self.starting_at.entry(source).or_default().push((symbol, target));
            self.queue.push((symbol, source, target));
        }
    }
}

impl ClosureEngine for HellingsClosure {
    fn name(&self) -> &'static str {
        "hellings"
    }

    fn closure(&self, graph: &Graph, grammar: &WeakCnf) -> (Relation<Symbol>, ClosureStats) {
        // `A ::= B C` as `B -> [(A, C)]` and `C -> [(A, B)]`.
        let mut by_left: HashMap<Symbol, Vec<(Symbol, Symbol)>> = HashMap::new();
        let mut by_right: HashMap<Symbol, Vec<(Symbol, Symbol)>> = HashMap::new();
        for (head, left, right) in grammar.binary_productions() {
            by_left.entry(left).or_default().push((head, right));
            by_right.entry(right).or_default().push((head, left));
        }

        let mut work = Worklist::default();
        for triple in initial_triples(graph, grammar) {
            work.add(triple);
        }
        let mut stats = ClosureStats {
            rounds: 0,
            sizes: vec![work.relation.len()],
        };

        while !work.queue.is_empty() {
            let batch = mem::take(&mut work.queue);
            for (symbol, source, target) in batch {
                let mut derived = vec![];
                // (C, w, source) and (symbol, source, target) with A ::= C symbol.
                for &(other, w) in work.ending_at.get(&source).into_iter().flatten() {
                    for &(head, left) in by_right.get(&symbol).into_iter().flatten() {
                        if left == other {
                            derived.push((head, w, target));
                        }
                    }
                }
                // (symbol, source, target) and (C, target, w) with A ::= symbol C.
                for &(other, w) in work.starting_at.get(&target).into_iter().flatten() {
                    for &(head, right) in by_left.get(&symbol).into_iter().flatten() {
                        if right == other {
                            derived.push((head, source, w));
                        }
                    }
                }
                for triple in derived {
                    work.add(triple);
                }
            }
            stats.rounds += 1;
            stats.sizes.push(work.relation.len());
            trace!("hellings round {}: {} triples", stats.rounds, work.relation.len());
        }
        debug!(
            "hellings closure over {} nodes finished after {} rounds with {} triples",
            graph.num_nodes(),
            stats.rounds,
            work.relation.len()
        );
        (work.relation, stats)
    }
}

/// Pairs of query nodes joined by a path whose labels the start variable
/// derives, computed with [`HellingsClosure`].
pub fn hellings_closure(graph: &Graph, grammar: &WeakCnf, query: &NodeQuery) -> BTreeSet<(NodeId, NodeId)> {
    HellingsClosure.query(graph, grammar, query)
}
