//! Insertion operation — path-copy associate, building new nodes bottom-up.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::hash;
use crate::node::{BitmapNode, CollisionNode, Node, Slot};

/// Outcome of an `assoc`: the new node, and whether a key was added or an
/// existing one updated (the container uses this to adjust its size).
pub struct AssocOutcome<K, V> {
    /// The new (possibly reference-shared) subtree root.
    pub node: Arc<Node<K, V>>,
    /// `true` if this call introduced a new key, `false` if it overwrote one.
    pub inserted: bool,
}

/// Associates `key` with `value` in the subtree rooted at `node`.
pub fn assoc<K, V, H>(node: &Arc<Node<K, V>>, hash: u32, key: K, value: V, shift: u32) -> AssocOutcome<K, V>
where
    K: Eq + Clone + Hash,
    V: PartialEq + Clone,
    H: Hasher + Default,
{
    match node.as_ref() {
        Node::Bitmap(bm) => assoc_bitmap::<K, V, H>(node, bm, hash, key, value, shift),
        Node::Collision(c) => assoc_collision(node, c, key, value),
    }
}

fn assoc_bitmap<K, V, H>(
    node: &Arc<Node<K, V>>,
    bm: &BitmapNode<K, V>,
    hash: u32,
    key: K,
    value: V,
    shift: u32,
) -> AssocOutcome<K, V>
where
    K: Eq + Clone + Hash,
    V: PartialEq + Clone,
    H: Hasher + Default,
{
    let slice = hash::slice_index(hash, shift);
    let bit = hash::bit_mask(slice);
    let pos = hash::compact_index(bm.bitmap, bit);

    if bm.bitmap & bit == 0 {
        // Empty slot — insert a new leaf here, no recursion needed.
        let mut slots = Vec::with_capacity(bm.slots.len() + 1);
        slots.extend(clone_slots(&bm.slots[..pos]));
        slots.push(Slot::Leaf(key, value));
        slots.extend(clone_slots(&bm.slots[pos..]));
        let new_bitmap = BitmapNode {
            bitmap: bm.bitmap | bit,
            slots,
        };
        new_bitmap.debug_check_invariant();
        return AssocOutcome {
            node: Arc::new(Node::Bitmap(new_bitmap)),
            inserted: true,
        };
    }

    match &bm.slots[pos] {
        Slot::Branch(child) => {
            let outcome = assoc::<K, V, H>(child, hash, key, value, shift + hash::BITS_PER_LEVEL);
            let mut slots = clone_slots(&bm.slots);
            slots[pos] = Slot::Branch(outcome.node);
            AssocOutcome {
                node: Arc::new(Node::Bitmap(BitmapNode {
                    bitmap: bm.bitmap,
                    slots,
                })),
                inserted: outcome.inserted,
            }
        }
        Slot::Leaf(existing_key, existing_value) => {
            if *existing_key == key {
                if *existing_value == value {
                    return AssocOutcome {
                        node: Arc::clone(node),
                        inserted: false,
                    };
                }
                let mut slots = clone_slots(&bm.slots);
                slots[pos] = Slot::Leaf(key, value);
                return AssocOutcome {
                    node: Arc::new(Node::Bitmap(BitmapNode {
                        bitmap: bm.bitmap,
                        slots,
                    })),
                    inserted: false,
                };
            }

            // Two different keys landed in the same slice — split into a
            // child subtree (or a collision bucket past the depth ceiling).
            let existing_hash = hash::hash_of::<K, H>(existing_key);
            let child = create_node(
                shift + hash::BITS_PER_LEVEL,
                existing_key.clone(),
                existing_value.clone(),
                existing_hash,
                hash,
                key,
                value,
            );
            let mut slots = clone_slots(&bm.slots);
            slots[pos] = Slot::Branch(child);
            AssocOutcome {
                node: Arc::new(Node::Bitmap(BitmapNode {
                    bitmap: bm.bitmap,
                    slots,
                })),
                inserted: true,
            }
        }
    }
}

fn assoc_collision<K, V>(node: &Arc<Node<K, V>>, c: &CollisionNode<K, V>, key: K, value: V) -> AssocOutcome<K, V>
where
    K: Eq + Clone,
    V: PartialEq + Clone,
{
    if let Some(pos) = c.entries.iter().position(|(k, _)| *k == key) {
        if c.entries[pos].1 == value {
            return AssocOutcome {
                node: Arc::clone(node),
                inserted: false,
            };
        }
        let mut entries = c.entries.clone();
        entries[pos].1 = value;
        return AssocOutcome {
            node: Arc::new(Node::Collision(CollisionNode { entries })),
            inserted: false,
        };
    }

    let mut entries = c.entries.clone();
    entries.push((key, value));
    AssocOutcome {
        node: Arc::new(Node::Collision(CollisionNode { entries })),
        inserted: true,
    }
}

/// Builds a fresh subtree holding two leaves that diverged (or collided) at
/// `shift`, splitting further while slice indices still differ and shift has
/// not passed [`hash::MAX_SPLIT_SHIFT`].
///
/// Mirrors the reference `_create_node`: when the two keys still land in
/// different slices, they are placed directly as sibling leaves, ordered by
/// ascending slice index (an internal layout detail, never exposed to callers).
#[allow(clippy::too_many_arguments)]
fn create_node<K, V>(
    shift: u32,
    key1: K,
    val1: V,
    hash1: u32,
    hash2: u32,
    key2: K,
    val2: V,
) -> Arc<Node<K, V>>
where
    K: Eq + Clone,
    V: Clone,
{
    if shift > hash::MAX_SPLIT_SHIFT {
        return Arc::new(Node::Collision(CollisionNode {
            entries: vec![(key1, val1), (key2, val2)],
        }));
    }

    let slice1 = hash::slice_index(hash1, shift);
    let slice2 = hash::slice_index(hash2, shift);

    if slice1 == slice2 {
        let child = create_node(shift + hash::BITS_PER_LEVEL, key1, val1, hash1, hash2, key2, val2);
        Arc::new(Node::Bitmap(BitmapNode {
            bitmap: hash::bit_mask(slice1),
            slots: vec![Slot::Branch(child)],
        }))
    } else {
        let bitmap = hash::bit_mask(slice1) | hash::bit_mask(slice2);
        let slots = if slice1 < slice2 {
            vec![Slot::Leaf(key1, val1), Slot::Leaf(key2, val2)]
        } else {
            vec![Slot::Leaf(key2, val2), Slot::Leaf(key1, val1)]
        };
        Arc::new(Node::Bitmap(BitmapNode { bitmap, slots }))
    }
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
