//! Hash slicing primitive — turns a key's hash into a path through the trie.

use std::hash::{Hash, Hasher};

/// Bits consumed per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Largest shift at which a [`BitmapNode`](crate::node::BitmapNode) may still
/// split two colliding keys into separate slots.
///
/// With a 32-bit folded hash and 5 bits consumed per level, shifts
/// 0, 5, 10, 15, 20, 25 each still have bits left to discriminate on;
/// beyond shift 25 fewer than 5 bits of hash remain, so a shift larger than
/// this forces a [`CollisionNode`](crate::node::CollisionNode).
pub const MAX_SPLIT_SHIFT: u32 = 25;

/// Folds a 64-bit digest down to 32 bits by XORing its halves.
///
/// `std::hash::Hash` implementations naturally produce 64-bit digests via
/// `Hasher`; this keeps the depth-ceiling analysis in terms of a 32-bit hash,
/// matching a six-level trie (shifts 0..=25) rather than a twelve-level one.
#[inline]
#[must_use]
pub const fn fold(digest: u64) -> u32 {
    ((digest >> 32) as u32) ^ (digest as u32)
}

/// Computes the folded 32-bit hash of `key` using a fresh `H`.
///
/// `H` is a stateless hasher *type*, not a stored instance (mirrored on
/// `imhamt`'s `Hamt<H: Hasher + Default, K, V>`): every call builds `H`
/// from its `Default` impl, so the same key always folds to the same
/// 32-bit hash for the lifetime of a given `H`, without the container
/// needing to carry hasher state around.
#[inline]
#[must_use]
pub fn hash_of<K: Hash + ?Sized, H: Hasher + Default>(key: &K) -> u32 {
    let mut hasher = H::default();
    key.hash(&mut hasher);
    fold(hasher.finish())
}

/// Extracts the 5-bit slice index at the given shift.
#[inline]
#[must_use]
pub const fn slice_index(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & 0x1f
}

/// Returns the single-bit mask for a slice index (0..31).
#[inline]
#[must_use]
pub const fn bit_mask(slice_index: u32) -> u32 {
    1 << slice_index
}

/// Returns the compact slot index of `bit` within `bitmap`: the number of
/// occupied slots that sort before it.
#[inline]
#[must_use]
pub const fn compact_index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}
