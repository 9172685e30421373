//! Container facade — owns the root node and entry count, exposes the
//! persistent API described in the crate-level documentation.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops;
use std::sync::Arc;

use crate::error::HamtError;
use crate::hash;
use crate::iter::{Iter, Keys, Values};
use crate::node::{BitmapNode, Node};
use crate::ops::get::find;
use crate::ops::insert::{assoc, AssocOutcome};
use crate::ops::remove::{without, Removed, WithoutOutcome};

/// Persistent hash map based on a Hash Array Mapped Trie.
///
/// `H` is a stateless hasher *type* (`H: Hasher + Default`), not a stored
/// instance: every hash computation builds a fresh `H` from its `Default`
/// impl, mirroring `imhamt`'s `Hamt<H, K, V>` rather than `std::HashMap`'s
/// `BuildHasher` instance field. This keeps the container itself a plain
/// value — two `Hamt`s with the same `H` always hash a given key the same
/// way, with nothing to seed or carry around.
///
/// Every write (`insert`, `remove`) returns a new `Hamt`; `self` is left
/// untouched and remains valid. Unchanged subtries are shared between the
/// old and new trees via `Arc`, so a single-key mutation allocates only
/// along the path from the root to the changed slot.
pub struct Hamt<K, V, H = DefaultHasher> {
    root: Option<Arc<Node<K, V>>>,
    size: usize,
    hasher: PhantomData<fn() -> H>,
}

impl<K, V, H> Clone for Hamt<K, V, H> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
            hasher: PhantomData,
        }
    }
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V, H> Hamt<K, V, H> {
    /// Creates an empty container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            size: 0,
            hasher: PhantomData,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the container holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns an iterator over `(&K, &V)` pairs, in slot order.
    ///
    /// Order is an implementation detail of the hash function and bitmap
    /// layout; callers must not rely on it.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_ref())
    }

    /// Returns an iterator over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }
}

impl<K, V, H> Default for Hamt<K, V, H> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Eq + Hash
// ---------------------------------------------------------------------------

impl<K: Eq + Hash, V, H: Hasher + Default> Hamt<K, V, H> {
    /// Returns a reference to the value associated with `key`, or `None`.
    ///
    /// This is the defaulted/optional lookup's building block; see
    /// [`Hamt::get_or`] and [`Hamt::try_get`] for the other two lookup
    /// shapes.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let root = self.root.as_ref()?;
        find(root, hash::hash_of::<K, H>(key), key, 0)
    }

    /// Returns the value associated with `key`, or `default` if absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Returns the value associated with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`HamtError::KeyMissing`] if `key` is absent.
    pub fn try_get(&self, key: &K) -> Result<&V, HamtError> {
        self.get(key).ok_or(HamtError::KeyMissing)
    }

    /// Returns `true` if the container contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: Eq + Hash + Clone, V: Clone (+ PartialEq where the
// node algebra's same-value fast path needs it)
// ---------------------------------------------------------------------------

impl<K: Eq + Hash + Clone, V: Clone + PartialEq, H: Hasher + Default> Hamt<K, V, H> {
    /// Associates `key` with `value`, returning a new container.
    ///
    /// The size grows by one if `key` was absent, or stays the same if it
    /// replaces an existing entry. If `value` equals the key's current
    /// value, the new container shares its root with `self` (no allocation
    /// beyond the new `Hamt` handle).
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let hash = hash::hash_of::<K, H>(&key);
        let AssocOutcome { node, inserted } = match &self.root {
            Some(root) => assoc::<K, V, H>(root, hash, key, value, 0),
            None => AssocOutcome {
                node: Arc::new(Node::Bitmap(BitmapNode::singleton(
                    hash::bit_mask(hash::slice_index(hash, 0)),
                    key,
                    value,
                ))),
                inserted: true,
            },
        };
        Self {
            root: Some(node),
            size: if inserted { self.size + 1 } else { self.size },
            hasher: PhantomData,
        }
    }

    /// Replaces the value at an existing `key`, returning a new container.
    ///
    /// Unlike [`Hamt::insert`], this never creates a new key.
    ///
    /// # Errors
    ///
    /// Returns [`HamtError::KeyMissing`] if `key` is absent.
    pub fn replace(&self, key: &K, value: V) -> Result<Self, HamtError> {
        if self.contains_key(key) {
            Ok(self.insert(key.clone(), value))
        } else {
            Err(HamtError::KeyMissing)
        }
    }

    /// Updates the value at `key` via `f`, removing the key if `f` returns
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`HamtError::KeyMissing`] if `key` is absent.
    pub fn update<F>(&self, key: &K, f: F) -> Result<Self, HamtError>
    where
        F: FnOnce(&V) -> Option<V>,
    {
        let current = self.get(key).ok_or(HamtError::KeyMissing)?;
        match f(current) {
            Some(new_value) => Ok(self.insert(key.clone(), new_value)),
            None => self.remove(key),
        }
    }
}

// ---------------------------------------------------------------------------
// Remove — K: Eq + Hash + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K: Eq + Hash + Clone, V: Clone, H: Hasher + Default> Hamt<K, V, H> {
    /// Removes `key`, returning a new container with size one less.
    ///
    /// # Errors
    ///
    /// Returns [`HamtError::KeyMissing`] if `key` is absent. On error, no
    /// new container is produced and `self` is untouched — the size
    /// decrement never happens without a confirmed removal.
    pub fn remove(&self, key: &K) -> Result<Self, HamtError> {
        let Some(root) = self.root.as_ref() else {
            return Err(HamtError::KeyMissing);
        };
        let hash = hash::hash_of::<K, H>(key);
        match without(root, hash, key, 0) {
            WithoutOutcome::NotFound => Err(HamtError::KeyMissing),
            WithoutOutcome::Removed(Removed::Empty) => Ok(Self {
                root: None,
                size: self.size - 1,
                hasher: PhantomData,
            }),
            // The root is always a BitmapNode (or absent): every write path
            // wraps its result in `Node::Bitmap`, so a CollisionNode can
            // only ever appear below the top level. A lone survivor
            // collapsing all the way to the root is therefore unreachable
            // in practice, but is still handled correctly rather than
            // assumed away.
            WithoutOutcome::Removed(Removed::Leaf(k, v)) => {
                let bit = hash::bit_mask(hash::slice_index(hash, 0));
                Ok(Self {
                    root: Some(Arc::new(Node::Bitmap(BitmapNode::singleton(bit, k, v)))),
                    size: self.size - 1,
                    hasher: PhantomData,
                })
            }
            WithoutOutcome::Removed(Removed::Node(new_root)) => Ok(Self {
                root: Some(new_root),
                size: self.size - 1,
                hasher: PhantomData,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for Hamt<K, V, H> {
    /// Renders `HAMT({})` when empty, `HAMT({k1: v1, k2: v2, ...})` when
    /// populated, in iteration order — not part of the equality contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HAMT({{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k:?}: {v:?}")?;
        }
        write!(f, "}})")
    }
}

impl<K: Eq + Hash, V: PartialEq, H: Hasher + Default> PartialEq for Hamt<K, V, H> {
    /// Two containers are equal iff they have the same size and agree on
    /// every key. Insertion order never affects equality.
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Eq + Hash, V: Eq, H: Hasher + Default> Eq for Hamt<K, V, H> {}

impl<K: Eq + Hash + Clone, V: Clone + PartialEq, H: Hasher + Default> FromIterator<(K, V)> for Hamt<K, V, H> {
    /// Later duplicates overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map = map.insert(k, v);
        }
        map
    }
}

impl<K: Eq + Hash + Clone, V: Clone + PartialEq, H: Hasher + Default> Extend<(K, V)> for Hamt<K, V, H> {
    /// Performs no in-place node mutation: internally rebuilds `self` by
    /// repeated [`Hamt::insert`] and re-points the handle at the final root.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let mut next = self.clone();
        for (k, v) in iter {
            next = next.insert(k, v);
        }
        *self = next;
    }
}

impl<K: Eq + Hash + Clone, V: Clone + PartialEq, H: Hasher + Default, S> From<HashMap<K, V, S>> for Hamt<K, V, H> {
    fn from(map: HashMap<K, V, S>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Eq + Hash, V, H: Hasher + Default> ops::Index<&K> for Hamt<K, V, H> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is absent; prefer [`Hamt::try_get`] to handle absence.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, H> IntoIterator for &'a Hamt<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
