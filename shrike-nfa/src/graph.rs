// Nfa arena - the mutable state graph
//
// Nodes live in an arena and are addressed by StateId, so the graph can be
// cyclic and a node can be shared as the target of many transitions.
// Wiring happens after creation by assigning transition entries.

use crate::state::{Label, State, StateId, Target};
use crate::{NfaError, NfaResult, Symbol};
use ahash::AHashSet;

/// A nondeterministic finite automaton: an arena of mutable state nodes
/// wired by labeled (and epsilon) transitions.
///
/// States are never removed, so every [`StateId`] minted by this arena
/// stays valid for its lifetime. Addressing a state with an id from a
/// different automaton is a caller bug. Cloning the automaton clones the
/// arena; ids carry over positionally.
#[derive(Debug, Clone)]
pub struct Nfa<S> {
    states: Vec<State<S>>,
}

impl<S: Symbol> Default for Nfa<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol> Nfa<S> {
    /// Create an empty automaton.
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Add a standalone state with no transitions. Such a state is
    /// accepting by default.
    pub fn add_state(&mut self) -> StateId {
        self.push_state(State::new(true))
    }

    /// Add a state constructed from a mapping of labels to targets.
    ///
    /// The new state is accepting when the mapping is empty and
    /// non-accepting otherwise; wiring more transitions later does not
    /// re-derive the flag. Every target must be non-empty and reference
    /// states already present in this arena (self-loops and back edges are
    /// wired afterwards with [`Nfa::set_transition`]).
    pub fn add_state_with<I>(&mut self, transitions: I) -> NfaResult<StateId>
    where
        I: IntoIterator<Item = (Label<S>, Target)>,
    {
        let mut state = State::new(true);
        for (label, target) in transitions {
            self.check_target(&label, &target)?;
            state.transitions.insert(label, target);
        }
        state.accepting = state.transitions.is_empty();
        Ok(self.push_state(state))
    }

    fn push_state(&mut self, state: State<S>) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(state);
        id
    }

    fn check_target(&self, label: &Label<S>, target: &Target) -> NfaResult<()> {
        if target.is_empty() {
            return Err(NfaError::MalformedAutomaton(format!(
                "transition on {label:?} has an empty target set"
            )));
        }
        for id in target.iter() {
            if id.index() >= self.states.len() {
                return Err(NfaError::MalformedAutomaton(format!(
                    "transition on {label:?} references unknown state {id:?}"
                )));
            }
        }
        Ok(())
    }

    /// Number of states in the arena.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Borrow a state node.
    pub fn state(&self, id: StateId) -> Option<&State<S>> {
        self.states.get(id.index())
    }

    /// Whether `id` is an accepting state.
    pub fn is_accepting(&self, id: StateId) -> bool {
        self.state(id).map(|s| s.accepting).unwrap_or(false)
    }

    /// Force the accepting flag on. Returns the same id so wiring code can
    /// keep chaining on the node.
    pub fn set_accepting(&mut self, id: StateId) -> StateId {
        self.states[id.index()].accepting = true;
        id
    }

    /// Force the accepting flag off.
    pub fn clear_accepting(&mut self, id: StateId) -> StateId {
        self.states[id.index()].accepting = false;
        id
    }

    /// Flip the accepting flag.
    pub fn toggle_accepting(&mut self, id: StateId) -> StateId {
        let state = &mut self.states[id.index()];
        state.accepting = !state.accepting;
        id
    }

    /// Look up the target of one transition entry.
    pub fn transition(&self, id: StateId, label: &Label<S>) -> Option<&Target> {
        self.state(id).and_then(|s| s.transition(label))
    }

    /// Insert or replace a transition entry.
    ///
    /// Fails with [`NfaError::MalformedAutomaton`] when the target is empty
    /// or references a state outside this arena.
    pub fn set_transition(
        &mut self,
        id: StateId,
        label: Label<S>,
        target: Target,
    ) -> NfaResult<()> {
        self.check_target(&label, &target)?;
        self.states[id.index()].transitions.insert(label, target);
        Ok(())
    }

    /// Remove a transition entry, returning its previous target.
    pub fn remove_transition(&mut self, id: StateId, label: &Label<S>) -> Option<Target> {
        self.states[id.index()].transitions.remove(label)
    }

    /// All states reachable from `root` over any transition, epsilon
    /// included, in breadth-first order, deduplicated by identity.
    pub fn reachable(&self, root: StateId) -> Vec<StateId> {
        let mut seen: AHashSet<StateId> = AHashSet::default();
        let mut order = vec![root];
        seen.insert(root);
        let mut cursor = 0;
        while cursor < order.len() {
            let id = order[cursor];
            cursor += 1;
            for (_, target) in self.states[id.index()].transitions() {
                for next in target.iter() {
                    if seen.insert(next) {
                        order.push(next);
                    }
                }
            }
        }
        order
    }

    /// The alphabet visible from `root`: every distinct non-epsilon symbol
    /// labelling a transition of a reachable state. Enumeration order is
    /// unspecified.
    pub fn symbols(&self, root: StateId) -> Vec<S> {
        let mut seen: AHashSet<S> = AHashSet::default();
        let mut symbols = Vec::new();
        for id in self.reachable(root) {
            for (label, _) in self.states[id.index()].transitions() {
                if let Label::Symbol(sym) = label {
                    if seen.insert(sym.clone()) {
                        symbols.push(sym.clone());
                    }
                }
            }
        }
        symbols
    }

    /// True when every state reachable from `root` is deterministic: no
    /// epsilon transitions and no branching targets.
    pub fn is_deterministic(&self, root: StateId) -> bool {
        self.reachable(root).into_iter().all(|id| {
            self.states[id.index()]
                .transitions()
                .all(|(label, target)| !label.is_epsilon() && matches!(target, Target::Single(_)))
        })
    }
}
