// Epsilon-closure engine
//
// Breadth-first enumeration of everything reachable over epsilon
// transitions alone. The walk is iterative and dedups by state identity,
// so epsilon cycles terminate.

use crate::graph::Nfa;
use crate::state::{Label, StateId};
use crate::Symbol;
use ahash::AHashSet;

impl<S: Symbol> Nfa<S> {
    /// Ordered, deduplicated epsilon-closure of `seeds`.
    ///
    /// The seeds come first, in their given order; expansion then proceeds
    /// breadth-first by queue position, appending each epsilon successor
    /// not already enqueued, in target order. The returned sequence is the
    /// enqueue order. Each identity is enqueued at most once.
    pub fn epsilon_closure(&self, seeds: &[StateId]) -> Vec<StateId> {
        let mut seen: AHashSet<StateId> = AHashSet::default();
        let mut queue: Vec<StateId> = Vec::with_capacity(seeds.len());
        for &seed in seeds {
            if seen.insert(seed) {
                queue.push(seed);
            }
        }
        let mut cursor = 0;
        while cursor < queue.len() {
            let id = queue[cursor];
            cursor += 1;
            if let Some(target) = self.transition(id, &Label::Epsilon) {
                for next in target.iter() {
                    if seen.insert(next) {
                        queue.push(next);
                    }
                }
            }
        }
        queue
    }
}

/// Order-independent identity-set key for a frontier: sorted and
/// deduplicated.
///
/// Two frontiers describe the same automaton configuration iff their
/// canonical keys are equal. The compiled transition table and the subset
/// construction both key on this.
pub fn canonical_key(states: &[StateId]) -> Vec<StateId> {
    let mut key = states.to_vec();
    key.sort_unstable();
    key.dedup();
    key
}
