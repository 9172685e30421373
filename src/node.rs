//! HAMT trie node types.

use std::fmt;
use std::sync::Arc;

/// A trie node: either a bitmap-compressed branch or a collision fallback.
///
/// Two variants cover the whole structure:
/// - [`Bitmap`](Self::Bitmap) — a 32-way branch at some shift `s <= MAX_SPLIT_SHIFT`
/// - [`Collision`](Self::Collision) — a flat bucket for keys whose hashes are
///   identical all the way down, or that ran out of shift to split on
pub enum Node<K, V> {
    /// Bitmap-compressed branch.
    Bitmap(BitmapNode<K, V>),
    /// Linear bucket of colliding entries.
    Collision(CollisionNode<K, V>),
}

/// A bitmap-compressed node.
///
/// `bitmap` has one set bit per occupied slot; `slots` holds exactly
/// `bitmap.count_ones()` entries, ordered by ascending slice index.
pub struct BitmapNode<K, V> {
    /// Occupancy bitmap — bit `i` set means slice index `i` is occupied.
    pub bitmap: u32,
    /// Compact, densely packed slot storage, parallel to the set bits of `bitmap`.
    pub slots: Vec<Slot<K, V>>,
}

/// A single occupied position in a [`BitmapNode`]: either a direct key-value
/// leaf, or a pointer down to a child subtree.
pub enum Slot<K, V> {
    /// A key-value pair stored directly in this node.
    Leaf(K, V),
    /// A child subtree, reached when two or more keys share this slice index.
    Branch(Arc<Node<K, V>>),
}

/// A collision bucket: entries that are indistinguishable by hash slice at
/// the maximum shift, searched linearly by key equality. Ignores `shift` and
/// `hash` on lookup — two entries here may have different folded hashes if
/// they only agree on the bits consumed before the depth ceiling.
pub struct CollisionNode<K, V> {
    /// The colliding entries, in insertion order.
    pub entries: Vec<(K, V)>,
}

impl<K, V> BitmapNode<K, V> {
    /// Creates a node with a single leaf slot.
    pub fn singleton(bit: u32, key: K, value: V) -> Self {
        Self {
            bitmap: bit,
            slots: vec![Slot::Leaf(key, value)],
        }
    }

    /// Checks invariant 2 (`|slots| = 2 · popcount(bitmap)`, restated here in
    /// terms of the typed-sum slot layout as `|slots| = popcount(bitmap)`).
    ///
    /// Must never fail on correct input — see `HamtError`'s note on
    /// `StructuralInvariantViolation`. Logs before asserting so a host with
    /// a logger installed gets a diagnostic record of which node failed
    /// before the debug build panics.
    #[inline]
    pub fn debug_check_invariant(&self) {
        let expected = self.bitmap.count_ones() as usize;
        if self.slots.len() != expected {
            log::error!(
                "StructuralInvariantViolation: bitmap {:#034b} has {expected} set bits but {} slots",
                self.bitmap,
                self.slots.len(),
            );
        }
        debug_assert_eq!(self.slots.len(), expected);
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitmap(n) => f
                .debug_struct("Bitmap")
                .field("bitmap", &format_args!("{:#034b}", n.bitmap))
                .field("slots", &n.slots.len())
                .finish(),
            Self::Collision(n) => f
                .debug_struct("Collision")
                .field("entries", &n.entries.len())
                .finish(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Slot<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(k, v) => f.debug_tuple("Leaf").field(k).field(v).finish(),
            Self::Branch(_) => f.debug_tuple("Branch").finish(),
        }
    }
}
