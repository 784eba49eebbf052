//! Open-addressing hash table from canonical subsets to deterministic states.
//!
//! The table owns every subset handed to it. Subsets are stored in an arena
//! and the probe slots only carry a [`SubsetRef`] into it, so references stay
//! valid when the slot array is doubled and rehashed.

use log::trace;

use crate::automaton::StateId;
use crate::state_set::StateSet;

pub const INITIAL_CAPACITY: usize = 256;

/// Non-owning handle to a subset adopted by a [`SubsetTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetRef(u32);

#[derive(Debug, Clone, Copy)]
struct Slot {
    subset: SubsetRef,
    hash: u32,
    state: StateId,
}

#[derive(Debug, Default)]
pub struct SubsetTable {
    subsets: Vec<StateSet>,
    slots: Vec<Option<Slot>>,
    used: usize,
}

impl SubsetTable {
    pub fn new() -> SubsetTable {
        SubsetTable::default()
    }

    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn subset(&self, subset: SubsetRef) -> &StateSet {
        &self.subsets[subset.0 as usize]
    }

    /// Finds the state assigned to `subset`, or adopts `subset` under
    /// `candidate`. Returns `(state, handle, was_new)`; when an equal subset is
    /// already present the caller's buffer is dropped and `was_new` is false.
    ///
    /// `subset` must be canonical and `hash` must be its canonical hash.
    pub fn lookup_or_insert(
        &mut self,
        subset: StateSet,
        hash: u32,
        candidate: StateId,
    ) -> (StateId, SubsetRef, bool) {
        if 4 * (self.used + 1) > 3 * self.capacity() {
            self.grow();
        }

        let index = match self.probe(subset.as_slice(), hash) {
            Ok(slot) => return (slot.state, slot.subset, false),
            Err(index) => index,
        };

        let handle = SubsetRef(self.subsets.len() as u32);
        self.subsets.push(subset);
        self.slots[index] = Some(Slot {
            subset: handle,
            hash,
            state: candidate,
        });
        self.used += 1;
        (candidate, handle, true)
    }

    pub fn lookup(&self, subset: &[StateId], hash: u32) -> Option<StateId> {
        if self.slots.is_empty() {
            return None;
        }
        self.probe(subset, hash).ok().map(|slot| slot.state)
    }

    // Ok with the matching slot, or Err with the index of the first empty slot
    fn probe(&self, subset: &[StateId], hash: u32) -> Result<Slot, usize> {
        let mask = self.capacity() - 1;
        let mut index = hash as usize & mask;
        for _ in 0..self.capacity() {
            match &self.slots[index] {
                None => return Err(index),
                Some(slot) => {
                    if slot.hash == hash && self.subsets[slot.subset.0 as usize].as_slice() == subset {
                        return Ok(*slot);
                    }
                }
            }
            index = (index + 1) & mask;
        }

        // the load factor keeps at least a quarter of the slots empty
        panic!(
            "subset table probe wrapped around: {} of {} slots used",
            self.used,
            self.capacity()
        );
    }

    // doubles the slot array and rehashes every entry with its stored hash
    fn grow(&mut self) {
        let capacity = match self.capacity() {
            0 => INITIAL_CAPACITY,
            n => n * 2,
        };
        trace!("growing subset table from {} to {} slots", self.capacity(), capacity);

        let old = std::mem::replace(&mut self.slots, vec![None; capacity]);
        let mask = capacity - 1;
        for slot in old.into_iter().flatten() {
            let mut index = slot.hash as usize & mask;
            while self.slots[index].is_some() {
                index = (index + 1) & mask;
            }
            self.slots[index] = Some(slot);
        }
    }
}
