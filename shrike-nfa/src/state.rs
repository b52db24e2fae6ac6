// State graph leaf types
//
// This module defines the building blocks of the state graph:
// - StateId: stable arena index used as node identity
// - Label: a transition label (an input symbol or the epsilon sentinel)
// - Target: the successor(s) of one transition entry
// - State: a single automaton node

use crate::Symbol;
use ahash::AHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Stable identity of a state node within its owning [`Nfa`](crate::Nfa).
///
/// Ids are minted by the arena and stay valid for its whole lifetime; id
/// equality is the dedup key for every set-valued algorithm in this crate.
/// Structurally identical nodes with different ids are different automaton
/// states. Ids from different automata must not be mixed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u32);

impl StateId {
    /// Position of the state in the owning arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A transition label: an input symbol, or the distinguished epsilon
/// sentinel traversed without consuming input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label<S> {
    Epsilon,
    Symbol(S),
}

impl<S: Symbol> Label<S> {
    /// True for the epsilon sentinel.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }
}

/// Successor(s) of a single transition entry.
///
/// A label maps either to one state or to an ordered collection of states
/// (nondeterministic branching on that label). Both shapes are consumed
/// uniformly through [`Target::iter`]. The `Many` order is the only
/// semantically meaningful insertion order in the model; it drives
/// epsilon-closure enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Single(StateId),
    Many(SmallVec<[StateId; 2]>),
}

impl Target {
    /// Target of a deterministic-looking edge.
    pub fn single(id: StateId) -> Self {
        Target::Single(id)
    }

    /// Target branching over an ordered list of states.
    ///
    /// An empty list is representable here but rejected with
    /// [`NfaError::MalformedAutomaton`](crate::NfaError) wherever the
    /// target is attached to a graph.
    pub fn many<I: IntoIterator<Item = StateId>>(ids: I) -> Self {
        Target::Many(ids.into_iter().collect())
    }

    /// View the successor states as a slice, in order.
    pub fn as_slice(&self) -> &[StateId] {
        match self {
            Target::Single(id) => std::slice::from_ref(id),
            Target::Many(ids) => ids.as_slice(),
        }
    }

    /// Iterate the successor states in order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.as_slice().iter().copied()
    }

    /// Number of successor states.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// A single automaton state node.
#[derive(Debug, Clone)]
pub struct State<S> {
    /// Whether a run ending at this node is successful. A property of this
    /// node only, never inherited through transitions.
    pub accepting: bool,

    /// Transition table, keyed by label.
    pub(crate) transitions: AHashMap<Label<S>, Target>,
}

impl<S: Symbol> State<S> {
    pub(crate) fn new(accepting: bool) -> Self {
        Self {
            accepting,
            transitions: AHashMap::default(),
        }
    }

    /// Look up the target for a label.
    pub fn transition(&self, label: &Label<S>) -> Option<&Target> {
        self.transitions.get(label)
    }

    /// Iterate all transition entries. Iteration order is unspecified.
    pub fn transitions(&self) -> impl Iterator<Item = (&Label<S>, &Target)> {
        self.transitions.iter()
    }

    /// Number of outgoing transition entries.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}
