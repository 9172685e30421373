//! Lookup operation — traverses the trie to find a key.

use crate::hash;
use crate::node::{Node, Slot};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns a reference to the value if found.
pub fn find<'a, K, V>(node: &'a Node<K, V>, hash: u32, key: &K, shift: u32) -> Option<&'a V>
where
    K: Eq,
{
    match node {
        Node::Bitmap(bm) => {
            let slice = hash::slice_index(hash, shift);
            let bit = hash::bit_mask(slice);

            if bm.bitmap & bit == 0 {
                return None;
            }

            let pos = hash::compact_index(bm.bitmap, bit);
            match &bm.slots[pos] {
                Slot::Leaf(k, v) => {
                    if k == key {
                        Some(v)
                    } else {
                        None
                    }
                }
                Slot::Branch(child) => find(child, hash, key, shift + hash::BITS_PER_LEVEL),
            }
        }
        Node::Collision(c) => c.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
    }
}
