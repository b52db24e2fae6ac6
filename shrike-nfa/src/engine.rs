// Longest-match simulation engine
//
// Classic subset simulation: a single set-valued frontier tracks every
// nondeterministic branch at once, so the engine reports the longest
// consumed length at which some branch accepts without ever enumerating
// individual paths.

use crate::graph::Nfa;
use crate::state::{Label, StateId};
use crate::Symbol;
use ahash::AHashSet;
use tracing::trace;

impl<S: Symbol> Nfa<S> {
    /// Union of the frontier states' targets for one symbol, in frontier
    /// order then target order, deduplicated by identity. States without a
    /// transition on the symbol contribute nothing.
    pub fn move_set(&self, frontier: &[StateId], symbol: &S) -> Vec<StateId> {
        let label = Label::Symbol(symbol.clone());
        let mut seen: AHashSet<StateId> = AHashSet::default();
        let mut moved = Vec::new();
        for &id in frontier {
            if let Some(target) = self.transition(id, &label) {
                for next in target.iter() {
                    if seen.insert(next) {
                        moved.push(next);
                    }
                }
            }
        }
        moved
    }

    /// Length in symbols of the longest successful run of `input` from
    /// `root`, or `None` when no run succeeds under the requested mode.
    ///
    /// With `full` set, the entire input must be consumed and the final
    /// frontier must contain an accepting state; the exact input length is
    /// then returned, and accepting prefixes are never substituted for a
    /// failed full match. Without `full`, the longest prefix length at
    /// which some branch accepted is returned, regardless of leftover
    /// input.
    ///
    /// The input is pulled one symbol at a time and never past the point
    /// where every branch is stuck, so lazily produced inputs are only
    /// consumed as far as needed. `None` is distinct from `Some(0)`: an
    /// accepting start frontier matches the empty prefix at length zero.
    pub fn match_len<I>(&self, root: StateId, input: I, full: bool) -> Option<usize>
    where
        I: IntoIterator<Item = S>,
    {
        let mut input = input.into_iter();
        let mut frontier = self.epsilon_closure(&[root]);
        let mut best: Option<usize> = None;
        let mut consumed = 0usize;

        let exhausted = loop {
            if frontier.iter().any(|&id| self.is_accepting(id)) {
                best = Some(consumed);
            }
            let Some(symbol) = input.next() else {
                break true;
            };
            let moved = self.move_set(&frontier, &symbol);
            if moved.is_empty() {
                trace!(consumed, "every branch stuck, halting consumption");
                break false;
            }
            frontier = self.epsilon_closure(&moved);
            consumed += 1;
        };

        if full {
            // The final frontier accepted iff the candidate was refreshed
            // on the last iteration.
            if exhausted && best == Some(consumed) {
                best
            } else {
                None
            }
        } else {
            best
        }
    }
}
