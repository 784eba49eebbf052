use bit_set::BitSet;
use lexdfa_util::make_type_idx;
use petgraph::graph::{Graph, NodeIndex};

use crate::state_set::StateSet;

make_type_idx!(pub StateId => FANode, StateSet);
make_type_idx!(pub SymbolId);

// indices instead of pointers, the graph is just a Vec of nodes
// a `None` label is an epsilon transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FANode {
    pub(crate) transitions: Vec<(Option<SymbolId>, StateId)>,
}

impl FANode {
    pub fn transitions(&self) -> &[(Option<SymbolId>, StateId)] {
        &self.transitions
    }
}

/// A finite automaton over the symbols `0..number_of_symbols`. The same type
/// holds NFAs (epsilon moves, several targets per symbol) and the DFAs
/// produced by [`crate::determinize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    pub(crate) nodes: Vec<FANode>,
    pub(crate) start_state: StateId,
    pub(crate) accepting: BitSet,
    pub(crate) number_of_symbols: u32,
}

impl Automaton {
    pub fn new(number_of_symbols: u32) -> Automaton {
        Automaton {
            nodes: Vec::new(),
            start_state: StateId::new(0),
            accepting: BitSet::new(),
            number_of_symbols,
        }
    }

    pub fn add_state(&mut self) -> StateId {
        StateId::from_push(&mut self.nodes, FANode::default())
    }

    pub fn ensure_state(&mut self, state: StateId) {
        if state.index() >= self.nodes.len() {
            self.nodes.resize(state.index() + 1, FANode::default());
        }
    }

    // symbols at or past `number_of_symbols` are stored, but subset
    // construction never reads them and `DfaTable` rejects them
    pub fn add_transition(&mut self, from: StateId, to: StateId, symbol: SymbolId) {
        self.push_transition(from, to, Some(symbol));
    }

    pub fn add_epsilon_transition(&mut self, from: StateId, to: StateId) {
        self.push_transition(from, to, None);
    }

    fn push_transition(&mut self, from: StateId, to: StateId, label: Option<SymbolId>) {
        self.ensure_state(from);
        self.ensure_state(to);
        self.nodes[from].transitions.push((label, to));
    }

    pub fn mark_accepting(&mut self, state: StateId) {
        self.ensure_state(state);
        self.accepting.insert(state.index());
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(state.index())
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.accepting.iter().map(|x| StateId::new(x as u32))
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.start_state = state;
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn number_of_states(&self) -> usize {
        self.nodes.len()
    }

    pub fn number_of_symbols(&self) -> u32 {
        self.number_of_symbols
    }

    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> {
        (0..self.number_of_symbols).map(SymbolId::new)
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.nodes.len() as u32).map(StateId::new)
    }

    pub fn transitions(&self, state: StateId) -> &[(Option<SymbolId>, StateId)] {
        &self.nodes[state].transitions
    }

    pub fn transition(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        self.nodes[state]
            .transitions
            .iter()
            .find(|(label, _)| *label == Some(symbol))
            .map(|(_, target)| *target)
    }

    pub fn transition_count(&self, state: StateId, symbol: SymbolId) -> usize {
        self.nodes[state]
            .transitions
            .iter()
            .filter(|(label, _)| *label == Some(symbol))
            .count()
    }

    pub fn number_of_transitions(&self) -> usize {
        self.nodes.iter().map(|node| node.transitions.len()).sum()
    }

    /// Drops every state and transition. The alphabet is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.accepting.clear();
        self.start_state = StateId::new(0);
    }

    pub fn is_deterministic(&self) -> bool {
        let mut seen = BitSet::with_capacity(self.number_of_symbols as usize);
        for node in &self.nodes {
            seen.clear();
            for (label, _) in &node.transitions {
                match label {
                    None => return false,
                    Some(symbol) => {
                        if !seen.insert(symbol.index()) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// For every state, the sorted set of states reachable through one or
    /// more epsilon transitions. A state is in its own closure only if it
    /// sits on an epsilon cycle.
    pub fn epsilon_closures(&self) -> Vec<StateSet> {
        let mut visited = BitSet::with_capacity(self.nodes.len());
        let mut stack: Vec<StateId> = Vec::new();

        self.states()
            .map(|state| {
                visited.clear();
                stack.clear();
                Self::push_epsilon_targets(&self.nodes[state], &mut stack);

                let mut closure = StateSet::new();
                while let Some(next) = stack.pop() {
                    if !visited.insert(next.index()) {
                        continue;
                    }
                    closure.push(next);
                    Self::push_epsilon_targets(&self.nodes[next], &mut stack);
                }
                closure.canonicalize();
                closure
            })
            .collect()
    }

    fn push_epsilon_targets(node: &FANode, stack: &mut Vec<StateId>) {
        stack.extend(
            node.transitions
                .iter()
                .filter(|(label, _)| label.is_none())
                .map(|(_, target)| *target),
        );
    }

    /// Builds an automaton for the reversed language. State `i` of `self` is
    /// state `i` of the result; one extra state is appended as the new start
    /// state, with epsilon moves to every state that was accepting. The old
    /// start state becomes the only accepting state.
    pub fn reverse(&self) -> Automaton {
        let mut reversed = Automaton::new(self.number_of_symbols);
        reversed.nodes.resize(self.nodes.len() + 1, FANode::default());

        for from in self.states() {
            for (label, to) in &self.nodes[from].transitions {
                reversed.nodes[*to].transitions.push((*label, from));
            }
        }

        let start = StateId::new(self.nodes.len() as u32);
        for accepting in self.accepting_states() {
            reversed.add_epsilon_transition(start, accepting);
        }
        reversed.start_state = start;
        if !self.nodes.is_empty() {
            reversed.mark_accepting(self.start_state);
        }
        reversed
    }

    /// Runs the automaton on `input`, tracking every reachable state.
    pub fn accepts(&self, input: &[SymbolId]) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let closures = self.epsilon_closures();
        let mut current = BitSet::with_capacity(self.nodes.len());
        current.insert(self.start_state.index());
        for state in &closures[self.start_state] {
            current.insert(state.index());
        }

        for symbol in input {
            let mut next = BitSet::with_capacity(self.nodes.len());
            for state in current.iter() {
                for (label, target) in &self.nodes[state].transitions {
                    if *label != Some(*symbol) {
                        continue;
                    }
                    next.insert(target.index());
                    for reached in &closures[*target] {
                        next.insert(reached.index());
                    }
                }
            }
            if next.is_empty() {
                return false;
            }
            current = next;
        }

        !current.is_disjoint(&self.accepting)
    }

    /// Graph view for DOT dumps; accepting states are drawn as `(n)`.
    pub fn to_graph(&self) -> Graph<String, String> {
        let mut graph = Graph::new();
        let indices: Vec<NodeIndex> = self
            .states()
            .map(|state| {
                let label = if self.is_accepting(state) {
                    format!("({})", state)
                } else {
                    state.to_string()
                };
                graph.add_node(label)
            })
            .collect();

        for from in self.states() {
            for (label, to) in &self.nodes[from].transitions {
                let label = match label {
                    Some(symbol) => symbol.to_string(),
                    None => "ε".to_string(),
                };
                graph.add_edge(indices[from.index()], indices[to.index()], label);
            }
        }
        graph
    }
}
