use std::collections::{HashMap, VecDeque};

use lexdfa::{determinize_minimize, Automaton, StateId, SymbolId};

const A: SymbolId = SymbolId::new(0);
const B: SymbolId = SymbolId::new(1);

fn s(x: u32) -> StateId {
    StateId::new(x)
}

// strings over {a, b} ending in "ab", with a redundant copy of every path
fn ends_in_ab() -> Automaton {
    let mut nfa = Automaton::new(2);
    for (first, last) in [(0, 2), (3, 5)] {
        nfa.add_transition(s(first), s(first), A);
        nfa.add_transition(s(first), s(first), B);
        nfa.add_transition(s(first), s(first + 1), A);
        nfa.add_transition(s(first + 1), s(last), B);
        nfa.mark_accepting(s(last));
    }
    nfa.add_epsilon_transition(s(0), s(3));
    nfa.add_epsilon_transition(s(5), s(6));
    nfa.mark_accepting(s(6));
    nfa.set_start_state(s(0));
    nfa
}

fn all_strings(max_len: usize) -> Vec<Vec<SymbolId>> {
    let mut strings = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &frontier {
            for symbol in [A, B] {
                let mut string: Vec<SymbolId> = prefix.clone();
                string.push(symbol);
                next.push(string);
            }
        }
        strings.extend(next.iter().cloned());
        frontier = next;
    }
    strings
}

// walks both automata from their start states in lockstep
fn isomorphic(a: &Automaton, b: &Automaton) -> bool {
    if a.number_of_states() != b.number_of_states() || a.number_of_symbols() != b.number_of_symbols() {
        return false;
    }

    let mut mapping: HashMap<StateId, StateId> = HashMap::new();
    let mut queue: VecDeque<(StateId, StateId)> = VecDeque::new();
    mapping.insert(a.start_state(), b.start_state());
    queue.push_back((a.start_state(), b.start_state()));

    while let Some((x, y)) = queue.pop_front() {
        if a.is_accepting(x) != b.is_accepting(y) {
            return false;
        }
        for symbol in a.symbols() {
            match (a.transition(x, symbol), b.transition(y, symbol)) {
                (None, None) => {}
                (Some(nx), Some(ny)) => match mapping.get(&nx) {
                    Some(mapped) if *mapped != ny => return false,
                    Some(_) => {}
                    None => {
                        mapping.insert(nx, ny);
                        queue.push_back((nx, ny));
                    }
                },
                _ => return false,
            }
        }
    }

    let mut targets: Vec<StateId> = mapping.values().copied().collect();
    targets.sort();
    targets.dedup();
    mapping.len() == a.number_of_states() && targets.len() == mapping.len()
}

#[test]
fn minimized_dfa_matches_nfa_language() {
    let nfa = ends_in_ab();
    let dfa = determinize_minimize(&nfa);
    println!("minimized = {:?}", dfa);

    assert!(dfa.is_deterministic());
    assert_eq!(dfa.number_of_states(), 3);

    for input in all_strings(6) {
        let expected = input.len() >= 2 && input[input.len() - 2..] == [A, B];
        assert_eq!(nfa.accepts(&input), expected, "nfa on {:?}", input);
        assert_eq!(dfa.accepts(&input), expected, "minimized dfa on {:?}", input);
    }
}

#[test]
fn minimizing_twice_changes_nothing() {
    let once = determinize_minimize(&ends_in_ab());
    let twice = determinize_minimize(&once);

    assert_eq!(once.number_of_states(), twice.number_of_states());
    assert_eq!(once.number_of_transitions(), twice.number_of_transitions());
    assert!(isomorphic(&once, &twice));
}

#[test]
fn equivalent_states_are_merged() {
    // (a|b)* spread over two interchangeable accepting states
    let mut dfa = Automaton::new(2);
    dfa.add_transition(s(0), s(1), A);
    dfa.add_transition(s(0), s(0), B);
    dfa.add_transition(s(1), s(0), A);
    dfa.add_transition(s(1), s(1), B);
    dfa.mark_accepting(s(0));
    dfa.mark_accepting(s(1));

    let minimal = determinize_minimize(&dfa);
    assert_eq!(minimal.number_of_states(), 1);
    assert!(minimal.is_accepting(minimal.start_state()));
    assert_eq!(minimal.transition(minimal.start_state(), A), Some(minimal.start_state()));
    assert_eq!(minimal.transition(minimal.start_state(), B), Some(minimal.start_state()));
}

#[test]
fn unreachable_accepting_states_disappear() {
    let mut nfa = Automaton::new(2);
    nfa.add_transition(s(0), s(1), A);
    nfa.mark_accepting(s(1));
    // never reached from the start state
    nfa.add_transition(s(2), s(3), B);
    nfa.mark_accepting(s(3));

    let minimal = determinize_minimize(&nfa);
    assert_eq!(minimal.number_of_states(), 2);
    assert!(minimal.accepts(&[A]));
    assert!(!minimal.accepts(&[B]));
    assert!(!minimal.accepts(&[]));
}

#[test]
fn empty_language() {
    let mut nfa = Automaton::new(2);
    nfa.add_transition(s(0), s(1), A);

    let minimal = determinize_minimize(&nfa);
    assert_eq!(minimal.number_of_states(), 1);
    assert_eq!(minimal.accepting_states().count(), 0);
    assert_eq!(minimal.number_of_transitions(), 0);
}

#[test]
fn empty_string_only() {
    let mut nfa = Automaton::new(2);
    nfa.add_state();
    nfa.mark_accepting(s(0));

    let minimal = determinize_minimize(&nfa);
    assert_eq!(minimal.number_of_states(), 1);
    assert!(minimal.accepts(&[]));
    assert!(!minimal.accepts(&[A]));
}
