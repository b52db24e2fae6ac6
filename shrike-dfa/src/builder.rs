// Subset-construction builder
//
// Worklist powerset construction: every reachable frontier of the source
// automaton becomes one DFA state, keyed by its canonical identity set, so
// cyclic inputs terminate once every distinct frontier has been visited.

use crate::dfa::{Dfa, DfaState};
use crate::{DfaError, DfaResult};
use ahash::{AHashMap, AHashSet};
use shrike_nfa::{canonical_key, Label, Nfa, StateId, Symbol};
use tracing::debug;

/// Builds a [`Dfa`] from an automaton root via subset construction.
pub struct DfaBuilder {
    /// Maximum number of DFA states to create (0 = unlimited).
    max_states: usize,
}

impl DfaBuilder {
    pub fn new(max_states: usize) -> Self {
        Self { max_states }
    }

    /// Convert the automaton rooted at `root`.
    ///
    /// The initial DFA state is the epsilon-closure of `{root}`. A DFA
    /// state is accepting iff any member state is accepting. Fails with
    /// [`DfaError::StateLimitExceeded`] when the number of distinct
    /// frontiers grows past the configured limit.
    pub fn build<S: Symbol>(&self, nfa: &Nfa<S>, root: StateId) -> DfaResult<Dfa<S>> {
        let start = nfa.epsilon_closure(&[root]);
        let start_key = canonical_key(&start);
        let start_accepting = start.iter().any(|&id| nfa.is_accepting(id));

        let mut dfa = Dfa::new(DfaState::new(0, start_key.clone(), start_accepting));
        let mut state_map: AHashMap<Vec<StateId>, usize> = AHashMap::default();
        state_map.insert(start_key, 0);

        // Worklist entries carry the closure-ordered frontier beside the
        // DFA id so move sets are computed in frontier order.
        let mut worklist: Vec<(Vec<StateId>, usize)> = vec![(start, 0)];

        while let Some((frontier, dfa_id)) = worklist.pop() {
            for symbol in frontier_symbols(nfa, &frontier) {
                let moved = nfa.move_set(&frontier, &symbol);
                debug_assert!(!moved.is_empty());
                let closed = nfa.epsilon_closure(&moved);
                let key = canonical_key(&closed);

                let target_id = if let Some(&id) = state_map.get(&key) {
                    id
                } else {
                    let accepting = closed.iter().any(|&id| nfa.is_accepting(id));
                    let id = dfa.add_state(key.clone(), accepting);
                    if self.max_states > 0 && dfa.state_count() > self.max_states {
                        return Err(DfaError::StateLimitExceeded {
                            states: dfa.state_count(),
                            max: self.max_states,
                        });
                    }
                    state_map.insert(key, id);
                    worklist.push((closed, id));
                    id
                };

                dfa.set_transition(dfa_id, symbol, target_id);
            }
        }

        debug!(states = dfa.state_count(), "subset construction complete");
        Ok(dfa)
    }
}

impl Default for DfaBuilder {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Distinct non-epsilon symbols labelling an outgoing transition of any
/// frontier member, in first-occurrence order.
fn frontier_symbols<S: Symbol>(nfa: &Nfa<S>, frontier: &[StateId]) -> Vec<S> {
    let mut seen: AHashSet<S> = AHashSet::default();
    let mut symbols = Vec::new();
    for &id in frontier {
        if let Some(state) = nfa.state(id) {
            for (label, _) in state.transitions() {
                if let Label::Symbol(sym) = label {
                    if seen.insert(sym.clone()) {
                        symbols.push(sym.clone());
                    }
                }
            }
        }
    }
    symbols
}
