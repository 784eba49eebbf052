use crate::automaton::StateId;
use crate::subset_table::SubsetRef;

// deterministic states whose transitions have not been explored yet
#[derive(Debug, Default)]
pub(crate) struct Worklist {
    entries: Vec<(SubsetRef, StateId)>,
}

impl Worklist {
    pub(crate) fn new() -> Worklist {
        Worklist::default()
    }

    pub(crate) fn push(&mut self, subset: SubsetRef, state: StateId) {
        self.entries.push((subset, state));
    }

    pub(crate) fn pop(&mut self) -> Option<(SubsetRef, StateId)> {
        self.entries.pop()
    }
}
