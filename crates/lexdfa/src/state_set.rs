use std::slice;

use crate::automaton::StateId;

/// An ordered, growable list of NFA states. Duplicates are allowed until
/// [`StateSet::canonicalize`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSet {
    states: Vec<StateId>,
}

impl StateSet {
    pub fn new() -> StateSet {
        StateSet { states: Vec::new() }
    }

    pub fn push(&mut self, state: StateId) {
        self.states.push(state);
    }

    pub fn push_set(&mut self, other: &StateSet) {
        self.states.extend_from_slice(&other.states);
    }

    /// Moves the contents out, leaving `self` empty.
    pub fn take(&mut self) -> StateSet {
        std::mem::take(self)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, StateId> {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.states
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.states.contains(&state)
    }

    /// Sorts ascending and drops duplicates. Two sets hold the same states
    /// exactly when their canonical forms are equal element-wise.
    pub fn canonicalize(&mut self) {
        self.states.sort_unstable();
        self.states.dedup();
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        StateSet { states: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a StateId;
    type IntoIter = slice::Iter<'a, StateId>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[u32]) -> StateSet {
        ids.iter().copied().map(StateId::new).collect()
    }

    #[test]
    fn canonicalize_sorts_and_dedups() {
        let mut s = set(&[5, 1, 3, 1, 5, 5, 0]);
        s.canonicalize();
        assert_eq!(s, set(&[0, 1, 3, 5]));
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let mut s = set(&[9, 2, 2, 7]);
        s.canonicalize();
        let once = s.clone();
        s.canonicalize();
        assert_eq!(s, once);
    }

    #[test]
    fn permutations_share_a_canonical_form() {
        let mut a = set(&[4, 2, 8, 2]);
        let mut b = set(&[8, 8, 4, 2]);
        a.canonicalize();
        b.canonicalize();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut a = set(&[1, 2]);
        let mut b = set(&[3]);
        a.push_set(&b);
        let moved = b.take();

        assert!(b.is_empty());
        assert_eq!(moved, set(&[3]));
        assert_eq!(a.len(), 3);
        assert!(a.contains(StateId::new(3)));
    }
}
