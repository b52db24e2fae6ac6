// Shrike NFA - state graph model and longest-match simulation
//
// This crate implements the nondeterministic-finite-automaton core:
// - Mutable, possibly cyclic state graphs held in an arena (graph)
// - Breadth-first epsilon-closure enumeration (closure)
// - Set-valued longest-match simulation with full and prefix modes (engine)
// - A memoized transition table for repeated evaluation (compiled)

mod closure;
mod compiled;
mod engine;
mod graph;
mod state;

#[cfg(test)]
mod match_tests;

pub use closure::canonical_key;
pub use compiled::{CompiledNfa, CompiledStats};
pub use graph::Nfa;
pub use state::{Label, State, StateId, Target};

use std::fmt;
use std::hash::Hash;

use thiserror::Error;

/// Input symbol requirements. Blanket-implemented, so any cloneable,
/// hashable type can label transitions.
pub trait Symbol: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Symbol for T {}

/// Errors that can occur while building or rewiring an automaton
#[derive(Debug, Error)]
pub enum NfaError {
    /// A transition target was neither a state nor a non-empty ordered
    /// collection of states belonging to the automaton.
    #[error("malformed automaton: {0}")]
    MalformedAutomaton(String),
}

/// Result type for automaton construction and mutation
pub type NfaResult<T> = Result<T, NfaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfa_error_display() {
        let err = NfaError::MalformedAutomaton("empty target set".to_string());
        assert!(err.to_string().contains("empty target set"));
    }
}
