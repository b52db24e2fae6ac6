// Cross-cutting matching scenarios
//
// Scenario tests that exercise the graph model, closure engine, simulation
// engine, and compiled table together.

use crate::{Label, Nfa, StateId, Target};
use std::cell::Cell;
use std::rc::Rc;

/// Iterator wrapper counting how many symbols the engine actually pulled.
struct Counted<I> {
    inner: I,
    pulled: Rc<Cell<usize>>,
}

impl<I: Iterator> Iterator for Counted<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.pulled.set(self.pulled.get() + 1);
        self.inner.next()
    }
}

fn chain(nfa: &mut Nfa<char>, symbols: &[char]) -> StateId {
    let mut next = nfa.add_state();
    for &sym in symbols.iter().rev() {
        next = nfa
            .add_state_with([(Label::Symbol(sym), Target::single(next))])
            .unwrap();
    }
    next
}

/// All strings over `alphabet` of length at most `max_len`.
fn strings(alphabet: &[char], max_len: usize) -> Vec<Vec<char>> {
    let mut out = vec![Vec::new()];
    let mut layer = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next_layer = Vec::new();
        for s in &layer {
            for &c in alphabet {
                let mut t = s.clone();
                t.push(c);
                next_layer.push(t);
            }
        }
        out.extend(next_layer.iter().cloned());
        layer = next_layer;
    }
    out
}

#[test]
fn test_rejecting_leaf_never_matches() {
    let mut nfa: Nfa<char> = Nfa::new();
    let leaf = nfa.add_state();
    assert!(nfa.is_accepting(leaf));

    nfa.clear_accepting(leaf);
    assert_eq!(nfa.match_len(leaf, "".chars(), true), None);
    assert_eq!(nfa.match_len(leaf, "".chars(), false), None);
}

#[test]
fn test_epsilon_detour_is_transparent() {
    // a -> b directly, versus a -> (epsilon detour) -> b.
    let mut direct = Nfa::new();
    let direct_root = chain(&mut direct, &['a', 'b']);

    let mut detoured = Nfa::new();
    let tail = detoured.add_state();
    let after = detoured
        .add_state_with([(Label::Symbol('b'), Target::single(tail))])
        .unwrap();
    let hop2 = detoured
        .add_state_with([(Label::Epsilon, Target::single(after))])
        .unwrap();
    let hop1 = detoured
        .add_state_with([(Label::Epsilon, Target::single(hop2))])
        .unwrap();
    let detoured_root = detoured
        .add_state_with([(Label::Symbol('a'), Target::single(hop1))])
        .unwrap();

    for input in ["ab", "a", "b", "abb", ""] {
        for full in [true, false] {
            assert_eq!(
                detoured.match_len(detoured_root, input.chars(), full),
                direct.match_len(direct_root, input.chars(), full),
                "input {input:?} full {full}"
            );
        }
    }
}

#[test]
fn test_epsilon_back_edge_terminates_everywhere() {
    // hub -epsilon-> {a1, b1}; b1 -epsilon-> hub closes the cycle.
    let mut nfa = Nfa::new();
    let accept = nfa.add_state();
    let b1 = nfa
        .add_state_with([(Label::Symbol('b'), Target::single(accept))])
        .unwrap();
    let a1 = nfa
        .add_state_with([(Label::Symbol('a'), Target::single(b1))])
        .unwrap();
    let hub = nfa
        .add_state_with([(Label::Epsilon, Target::many([a1, b1]))])
        .unwrap();
    nfa.set_transition(b1, Label::Epsilon, Target::single(hub))
        .unwrap();

    assert_eq!(nfa.epsilon_closure(&[hub]), vec![hub, a1, b1]);
    assert_eq!(nfa.match_len(hub, "ab".chars(), true), Some(2));
    assert_eq!(nfa.match_len(hub, "b".chars(), true), Some(1));

    let compiled = nfa.compile(hub);
    assert_eq!(compiled.match_len("ab".chars(), true), Some(2));
}

#[test]
fn test_compiled_transparency_over_input_space() {
    let mut nfa = Nfa::new();
    let accept = nfa.add_state();
    let b1 = nfa
        .add_state_with([(Label::Symbol('b'), Target::single(accept))])
        .unwrap();
    let a1 = nfa
        .add_state_with([(Label::Symbol('a'), Target::single(b1))])
        .unwrap();
    let hub = nfa
        .add_state_with([(Label::Epsilon, Target::many([a1, b1]))])
        .unwrap();
    nfa.set_transition(b1, Label::Epsilon, Target::single(hub))
        .unwrap();
    nfa.set_transition(accept, Label::Symbol('a'), Target::many([accept, b1]))
        .unwrap();

    let compiled = nfa.compile(hub);
    for input in strings(&['a', 'b'], 4) {
        for full in [true, false] {
            assert_eq!(
                compiled.match_len(input.iter().copied(), full),
                nfa.match_len(hub, input.iter().copied(), full),
                "input {input:?} full {full}"
            );
        }
    }
}

#[test]
fn test_input_not_pulled_past_halt() {
    let mut nfa: Nfa<char> = Nfa::new();
    let root = nfa.add_state();

    let pulled = Rc::new(Cell::new(0));
    let input = Counted {
        inner: std::iter::repeat('x').take(10),
        pulled: pulled.clone(),
    };

    // The first pull already finds every branch stuck.
    assert_eq!(nfa.match_len(root, input, false), Some(0));
    assert_eq!(pulled.get(), 1);
}

#[test]
fn test_longest_accepting_length_wins_over_dead_ends() {
    // Three branches on 'a': an accepting short stop, a dead end after
    // 'b', and a longer branch accepting after 'bc'.
    let mut nfa = Nfa::new();
    let m3 = nfa.add_state();
    let m2 = nfa
        .add_state_with([(Label::Symbol('c'), Target::single(m3))])
        .unwrap();
    let m1 = nfa
        .add_state_with([(Label::Symbol('b'), Target::single(m2))])
        .unwrap();
    let d2 = nfa.add_state();
    nfa.clear_accepting(d2);
    let d1 = nfa
        .add_state_with([(Label::Symbol('b'), Target::single(d2))])
        .unwrap();
    let short = nfa.add_state();
    let root = nfa
        .add_state_with([(Label::Symbol('a'), Target::many([short, d1, m1]))])
        .unwrap();

    assert_eq!(nfa.match_len(root, "abc".chars(), false), Some(3));
    assert_eq!(nfa.match_len(root, "abc".chars(), true), Some(3));
    // At length 2 only the dead end and the unfinished long branch remain.
    assert_eq!(nfa.match_len(root, "ab".chars(), false), Some(1));
    assert_eq!(nfa.match_len(root, "ab".chars(), true), None);
}
