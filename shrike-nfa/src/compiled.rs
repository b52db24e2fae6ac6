// Compiled transition cache
//
// Memoizes the move-and-close step per (frontier, symbol) pair so repeated
// evaluation over the same automaton skips recomputing closures. Results
// are identical to the uncompiled walk for every input and mode.

use crate::closure::canonical_key;
use crate::graph::Nfa;
use crate::state::StateId;
use crate::Symbol;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// A frontier with its derived data computed once.
#[derive(Clone)]
struct CachedFrontier {
    /// States in closure enumeration order.
    states: Arc<[StateId]>,

    /// Canonical identity-set key (sorted, deduplicated).
    key: Arc<[StateId]>,

    /// Whether any member state is accepting.
    accepting: bool,
}

impl CachedFrontier {
    fn new<S: Symbol>(nfa: &Nfa<S>, closed: Vec<StateId>) -> Self {
        let key: Arc<[StateId]> = canonical_key(&closed).into();
        let accepting = closed.iter().any(|&id| nfa.is_accepting(id));
        Self {
            states: closed.into(),
            key,
            accepting,
        }
    }
}

/// A compiled view of one automaton, rooted at a fixed state.
///
/// Borrowing the [`Nfa`] pins its structure: rewiring needs `&mut Nfa`,
/// which cannot coexist with a live compiled view, so evaluation never
/// observes a stale table. Build a fresh view after structural edits. The
/// table is a pure accelerator; it must never change an evaluation result.
pub struct CompiledNfa<'n, S: Symbol> {
    nfa: &'n Nfa<S>,
    root: StateId,
    start: CachedFrontier,
    table: RwLock<AHashMap<(Arc<[StateId]>, S), Option<CachedFrontier>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: Symbol> Nfa<S> {
    /// Compile the automaton for repeated evaluation from `root`.
    pub fn compile(&self, root: StateId) -> CompiledNfa<'_, S> {
        let start = CachedFrontier::new(self, self.epsilon_closure(&[root]));
        debug!(root = ?root, start_len = start.states.len(), "compiled automaton");
        CompiledNfa {
            nfa: self,
            root,
            start,
            table: RwLock::new(AHashMap::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl<'n, S: Symbol> CompiledNfa<'n, S> {
    /// Root state this view was compiled from.
    pub fn root(&self) -> StateId {
        self.root
    }

    /// Longest-match evaluation with the same contract as
    /// [`Nfa::match_len`], served from the memoized table.
    pub fn match_len<I>(&self, input: I, full: bool) -> Option<usize>
    where
        I: IntoIterator<Item = S>,
    {
        let mut input = input.into_iter();
        let mut frontier = self.start.clone();
        let mut best: Option<usize> = None;
        let mut consumed = 0usize;

        let exhausted = loop {
            if frontier.accepting {
                best = Some(consumed);
            }
            let Some(symbol) = input.next() else {
                break true;
            };
            match self.step(&frontier, symbol) {
                Some(next) => {
                    frontier = next;
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

    /// One memoized move-and-close step. `None` is the dead outcome: no
    /// branch can consume `symbol` from this frontier.
    fn step(&self, frontier: &CachedFrontier, symbol: S) -> Option<CachedFrontier> {
        let lookup = (frontier.key.clone(), symbol);
        if let Some(entry) = self.table.read().get(&lookup) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return entry.clone();
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let moved = self.nfa.move_set(&frontier.states, &lookup.1);
        let entry = if moved.is_empty() {
            None
        } else {
            Some(CachedFrontier::new(
                self.nfa,
                self.nfa.epsilon_closure(&moved),
            ))
        };
        trace!(
            frontier_len = frontier.states.len(),
            dead = entry.is_none(),
            "filled table entry"
        );
        self.table.write().insert(lookup, entry.clone());
        entry
    }

    /// Table usage counters.
    pub fn stats(&self) -> CompiledStats {
        CompiledStats {
            entries: self.table.read().len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<S: Symbol> fmt::Debug for CompiledNfa<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("CompiledNfa")
            .field("root", &self.root)
            .field("entries", &stats.entries)
            .field("hits", &stats.hits)
            .field("misses", &stats.misses)
            .finish()
    }
}

/// Usage counters for a compiled view's transition table.
#[derive(Debug, Clone)]
pub struct CompiledStats {
    /// Distinct (frontier, symbol) pairs resolved so far.
    pub entries: usize,

    /// Lookups served from the table.
    pub hits: u64,

    /// Lookups that had to run move-and-close.
    pub misses: u64,
}

impl CompiledStats {
    /// Fraction of lookups served from the table.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
