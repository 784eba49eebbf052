// 32-bit FNV-1a, http://www.isthe.com/chongo/tech/comp/fnv/index.html

use crate::automaton::StateId;

pub const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
pub const FNV_PRIME: u32 = 0x01000193;

fn fnv1a_step(hash: u32, byte: u8) -> u32 {
    (hash ^ byte as u32).wrapping_mul(FNV_PRIME)
}

pub fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().copied().fold(FNV_OFFSET_BASIS, fnv1a_step)
}

/// Hashes a canonical (sorted, deduplicated) subset over the little-endian
/// bytes of its state ids. Callers are responsible for canonicalizing first.
pub fn hash_subset(states: &[StateId]) -> u32 {
    states
        .iter()
        .flat_map(|state| state.0.to_le_bytes())
        .fold(FNV_OFFSET_BASIS, fnv1a_step)
}
