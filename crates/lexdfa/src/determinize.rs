use log::debug;

use crate::automaton::{Automaton, StateId};
use crate::hash::hash_subset;
use crate::state_set::StateSet;
use crate::subset_table::SubsetTable;
use crate::worklist::Worklist;

/// Whether the start state itself seeds the initial subset, on top of its
/// epsilon closure. Brzozowski's algorithm needs `IgnoreStartState`: the
/// synthetic start of a reversed automaton only matters through its closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartStateOptions {
    IncludeStartState,
    IgnoreStartState,
}

/// Subset construction. State 0 of the result is the initial subset; states
/// are numbered in discovery order, and a state gets no edge on a symbol none
/// of its members can read.
pub fn determinize(nfa: &Automaton, start_state_options: StartStateOptions) -> Automaton {
    let closures = nfa.epsilon_closures();
    let mut result = Automaton::new(nfa.number_of_symbols());

    let mut subsets = SubsetTable::new();
    let mut worklist = Worklist::new();
    let mut next_state = StateId::new(0);

    let mut next_subset = StateSet::new();
    if nfa.number_of_states() > 0 {
        if start_state_options == StartStateOptions::IncludeStartState {
            next_subset.push(nfa.start_state());
        }
        next_subset.push_set(&closures[nfa.start_state()]);
    }
    let start = deterministic_state_for_subset(&mut subsets, &mut worklist, &mut next_subset, &mut next_state);
    result.set_start_state(start);

    while let Some((subset, state)) = worklist.pop() {
        result.ensure_state(state);
        if subsets.subset(subset).iter().any(|&member| nfa.is_accepting(member)) {
            result.mark_accepting(state);
        }

        for symbol in nfa.symbols() {
            for &member in subsets.subset(subset) {
                for &(label, target) in nfa.transitions(member) {
                    if label != Some(symbol) {
                        continue;
                    }
                    next_subset.push(target);
                    next_subset.push_set(&closures[target]);
                }
            }
            if next_subset.is_empty() {
                continue;
            }
            let target = deterministic_state_for_subset(&mut subsets, &mut worklist, &mut next_subset, &mut next_state);
            result.add_transition(state, target, symbol);
        }
    }

    debug!(
        "determinized {} nfa states into {} dfa states, {} transitions",
        nfa.number_of_states(),
        result.number_of_states(),
        result.number_of_transitions()
    );
    result
}

// moves `states` into the table (leaving it empty) and returns its deterministic
// state, queueing the subset if the state is new
fn deterministic_state_for_subset(
    table: &mut SubsetTable,
    worklist: &mut Worklist,
    states: &mut StateSet,
    next_state: &mut StateId,
) -> StateId {
    let mut subset = states.take();
    subset.canonicalize();
    let hash = hash_subset(subset.as_slice());

    let (state, handle, was_new) = table.lookup_or_insert(subset, hash, *next_state);
    if was_new {
        worklist.push(handle, state);
        next_state.0 += 1;
    }
    state
}

/// Brzozowski's algorithm: reverse, determinize, reverse, determinize. The
/// result is the minimal partial DFA for the language of `input`.
pub fn determinize_minimize(input: &Automaton) -> Automaton {
    let reversed = input.reverse();
    let dfa = determinize(&reversed, StartStateOptions::IgnoreStartState);
    drop(reversed);

    let reversed = dfa.reverse();
    let result = determinize(&reversed, StartStateOptions::IgnoreStartState);

    debug!(
        "minimized {} states to {} (intermediate dfa had {})",
        input.number_of_states(),
        result.number_of_states(),
        dfa.number_of_states()
    );
    result
}
