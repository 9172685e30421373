//! Removal operation — path-copy delete, with single-child bitmap collapse.

use std::sync::Arc;

use crate::hash;
use crate::node::{BitmapNode, CollisionNode, Node, Slot};

/// What remains of a subtree after a key is removed from it.
pub enum Removed<K, V> {
    /// The subtree held exactly one entry and it was removed: nothing left.
    Empty,
    /// The subtree collapsed to a single surviving entry. Because a
    /// [`CollisionNode`] never holds fewer than two entries (invariant 5),
    /// the caller must reattach this pair as a direct [`Slot::Leaf`] rather
    /// than keep pointing at a subtrie.
    Leaf(K, V),
    /// The subtree still has two or more entries, reachable through a new
    /// (path-copied) node.
    Node(Arc<Node<K, V>>),
}

/// Outcome of a `without` call.
pub enum WithoutOutcome<K, V> {
    /// Key was not found — the caller should report `KeyMissing`.
    NotFound,
    /// Key was removed; see [`Removed`] for what's left of the subtree.
    Removed(Removed<K, V>),
}

/// Removes `key` from the subtree rooted at `node`.
pub fn without<K, V>(node: &Arc<Node<K, V>>, hash: u32, key: &K, shift: u32) -> WithoutOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    match node.as_ref() {
        Node::Bitmap(bm) => without_bitmap(bm, hash, key, shift),
        Node::Collision(c) => without_collision(c, key),
    }
}

fn without_bitmap<K, V>(bm: &BitmapNode<K, V>, hash: u32, key: &K, shift: u32) -> WithoutOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    let slice = hash::slice_index(hash, shift);
    let bit = hash::bit_mask(slice);

    if bm.bitmap & bit == 0 {
        return WithoutOutcome::NotFound;
    }

    let pos = hash::compact_index(bm.bitmap, bit);

    match &bm.slots[pos] {
        Slot::Branch(child) => {
            match without(child, hash, key, shift + hash::BITS_PER_LEVEL) {
                WithoutOutcome::NotFound => WithoutOutcome::NotFound,
                WithoutOutcome::Removed(Removed::Empty) => {
                    if bm.bitmap.count_ones() == 1 {
                        WithoutOutcome::Removed(Removed::Empty)
                    } else {
                        WithoutOutcome::Removed(Removed::Node(without_slot(bm, bit, pos)))
                    }
                }
                WithoutOutcome::Removed(Removed::Leaf(k, v)) => {
                    // Child collapsed to a single entry — inline it as a
                    // leaf in this slot instead of keeping a subtrie.
                    let mut slots = clone_slots(&bm.slots);
                    slots[pos] = Slot::Leaf(k, v);
                    let new_bitmap = BitmapNode {
                        bitmap: bm.bitmap,
                        slots,
                    };
                    new_bitmap.debug_check_invariant();
                    WithoutOutcome::Removed(Removed::Node(Arc::new(Node::Bitmap(new_bitmap))))
                }
                WithoutOutcome::Removed(Removed::Node(new_child)) => {
                    let mut slots = clone_slots(&bm.slots);
                    slots[pos] = Slot::Branch(new_child);
                    let new_bitmap = BitmapNode {
                        bitmap: bm.bitmap,
                        slots,
                    };
                    new_bitmap.debug_check_invariant();
                    WithoutOutcome::Removed(Removed::Node(Arc::new(Node::Bitmap(new_bitmap))))
                }
            }
        }
        Slot::Leaf(k, _) => {
            if k != key {
                return WithoutOutcome::NotFound;
            }
            if bm.bitmap.count_ones() == 1 {
                WithoutOutcome::Removed(Removed::Empty)
            } else {
                WithoutOutcome::Removed(Removed::Node(without_slot(bm, bit, pos)))
            }
        }
    }
}

fn without_collision<K, V>(c: &CollisionNode<K, V>, key: &K) -> WithoutOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    let Some(pos) = c.entries.iter().position(|(k, _)| k == key) else {
        return WithoutOutcome::NotFound;
    };

    let mut entries = c.entries.clone();
    entries.remove(pos);

    match entries.len() {
        0 => WithoutOutcome::Removed(Removed::Empty),
        // A CollisionNode never holds fewer than two entries (invariant 5):
        // the lone survivor is handed back to the caller to reattach as a
        // plain leaf, not kept wrapped in a one-entry bucket.
        1 => {
            let (k, v) = entries.into_iter().next().expect("one entry remains");
            WithoutOutcome::Removed(Removed::Leaf(k, v))
        }
        _ => WithoutOutcome::Removed(Removed::Node(Arc::new(Node::Collision(CollisionNode { entries })))),
    }
}

fn without_slot<K: Clone, V: Clone>(bm: &BitmapNode<K, V>, bit: u32, pos: usize) -> Arc<Node<K, V>> {
    let mut slots = Vec::with_capacity(bm.slots.len() - 1);
    slots.extend(clone_slots(&bm.slots[..pos]));
    slots.extend(clone_slots(&bm.slots[pos + 1..]));
    let new_bitmap = BitmapNode {
        bitmap: bm.bitmap & !bit,
        slots,
    };
    new_bitmap.debug_check_invariant();
    Arc::new(Node::Bitmap(new_bitmap))
}

fn clone_slots<K: Clone, V: Clone>(slots: &[Slot<K, V>]) -> Vec<Slot<K, V>> {
    slots
        .iter()
        .map(|s| match s {
            Slot::Leaf(k, v) => Slot::Leaf(k.clone(), v.clone()),
            Slot::Branch(child) => Slot::Branch(Arc::clone(child)),
        })
        .collect()
}
