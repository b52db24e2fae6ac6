// Deterministic finite automaton produced by subset construction
//
// Each DFA state is an identity set of source-NFA states; transitions map
// a symbol to exactly one successor and there are no epsilon transitions.

use ahash::AHashMap;
use shrike_nfa::{StateId, Symbol};
use std::fmt;

/// A single DFA state.
#[derive(Debug, Clone)]
pub struct DfaState<S> {
    /// State id (index into the owning [`Dfa`]).
    pub id: usize,

    /// Source-NFA states comprising this state, as a sorted identity set.
    pub members: Vec<StateId>,

    /// Transitions: symbol -> successor state id.
    pub(crate) transitions: AHashMap<S, usize>,

    /// Whether any member state is accepting.
    pub accepting: bool,
}

impl<S: Symbol> DfaState<S> {
    pub(crate) fn new(id: usize, members: Vec<StateId>, accepting: bool) -> Self {
        Self {
            id,
            members,
            transitions: AHashMap::default(),
            accepting,
        }
    }

    /// Successor for a symbol, if present.
    pub fn next_state(&self, symbol: &S) -> Option<usize> {
        self.transitions.get(symbol).copied()
    }

    /// Number of outgoing transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Iterate the outgoing transitions. Order is unspecified.
    pub fn transitions(&self) -> impl Iterator<Item = (&S, usize)> {
        self.transitions.iter().map(|(sym, &next)| (sym, next))
    }
}

/// A deterministic finite automaton over symbols `S`.
#[derive(Clone)]
pub struct Dfa<S> {
    pub(crate) states: Vec<DfaState<S>>,
}

impl<S: Symbol> Dfa<S> {
    pub(crate) fn new(initial: DfaState<S>) -> Self {
        Self {
            states: vec![initial],
        }
    }

    pub(crate) fn add_state(&mut self, members: Vec<StateId>, accepting: bool) -> usize {
        let id = self.states.len();
        self.states.push(DfaState::new(id, members, accepting));
        id
    }

    pub(crate) fn set_transition(&mut self, id: usize, symbol: S, next: usize) {
        self.states[id].transitions.insert(symbol, next);
    }

    /// Borrow a state by id.
    pub fn state(&self, id: usize) -> Option<&DfaState<S>> {
        self.states.get(id)
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Id of the initial state (the closure of the construction root).
    pub fn initial_state(&self) -> usize {
        0
    }

    /// Whether a state is accepting. Unknown ids read as non-accepting.
    pub fn is_accepting(&self, id: usize) -> bool {
        self.state(id).map(|s| s.accepting).unwrap_or(false)
    }

    /// Successor of `id` on `symbol`.
    pub fn next_state(&self, id: usize, symbol: &S) -> Option<usize> {
        self.state(id).and_then(|s| s.next_state(symbol))
    }

    /// Longest-match evaluation with the same contract as the source
    /// automaton's `match_len`.
    ///
    /// With `full` set, the entire input must be consumed and the walk
    /// must end in an accepting state; otherwise the longest accepting
    /// prefix length is returned. `None` means no successful run under
    /// the requested mode.
    pub fn match_len<I>(&self, input: I, full: bool) -> Option<usize>
    where
        I: IntoIterator<Item = S>,
    {
        let mut input = input.into_iter();
        let mut current = self.initial_state();
        let mut best: Option<usize> = None;
        let mut consumed = 0usize;

        let exhausted = loop {
            if self.is_accepting(current) {
                best = Some(consumed);
            }
            let Some(symbol) = input.next() else {
                break true;
            };
            match self.next_state(current, &symbol) {
                Some(next) => {
                    current = next;
                    consumed += 1;
                }
                None => break false,
            }
        };

        if full {
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

impl<S: Symbol> fmt::Debug for Dfa<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dfa")
            .field("state_count", &self.states.len())
            .field("initial_state", &self.initial_state())
            .finish()
    }
}
