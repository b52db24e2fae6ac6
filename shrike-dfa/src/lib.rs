// Shrike DFA - subset-construction conversion of Shrike NFAs
//
// This crate turns a nondeterministic automaton into an explicit
// deterministic one: every reachable frontier becomes a single state, no
// epsilon transitions survive, and each (state, symbol) pair has exactly
// one successor.

mod builder;
mod dfa;

pub use builder::DfaBuilder;
pub use dfa::{Dfa, DfaState};

use thiserror::Error;

/// Errors that can occur during subset construction
#[derive(Debug, Error)]
pub enum DfaError {
    /// Construction visited more distinct frontiers than the configured
    /// limit allows.
    #[error("DFA state limit exceeded: {states} states (max: {max})")]
    StateLimitExceeded { states: usize, max: usize },
}

/// Result type for DFA construction
pub type DfaResult<T> = Result<T, DfaError>;
