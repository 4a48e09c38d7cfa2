/*!
 * Concurrent Set
 * Deduplicated, unordered collection safe for unsynchronized multi-thread access
 */

use crate::shard::{optimal_shards, ContentionProfile};
use ahash::RandomState;
use dashmap::mapref::multiple::RefMulti;
use dashmap::DashMap;
use std::fmt;
use std::hash::Hash;

/// Concurrency-safe set of unique values.
///
/// Backed by a sharded concurrent hash map whose unit value slot marks
/// presence. Any number of threads may call any operation on the same
/// instance without external locking; operations on the same element are
/// linearizable through its shard's lock.
///
/// Traversal (`iter`, `to_vec`, `for_each_while`, `Debug`) is weakly
/// consistent: it walks shards one at a time without freezing the whole
/// map, so under concurrent mutation it may miss elements inserted during
/// the walk or include elements removed during it. It never yields a torn
/// or fabricated element. Iteration order is unspecified and may differ
/// between calls even when the contents have not changed.
///
/// Equality is whatever `T`'s `Eq + Hash` says it is. Callers wanting
/// identity semantics for pointer-like elements key by address (e.g. a
/// newtype over `Arc` hashing the allocation pointer); the set never
/// substitutes one equality for the other.
pub struct ConcurrentSet<T> {
    items: DashMap<T, (), RandomState>,
}

impl<T: Eq + Hash> ConcurrentSet<T> {
    /// Create an empty set sized for the medium-contention profile.
    pub fn new() -> Self {
        Self::with_profile(ContentionProfile::Medium)
    }

    /// Create an empty set pre-sized for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: DashMap::with_capacity_and_hasher_and_shard_amount(
                capacity,
                RandomState::new(),
                optimal_shards(ContentionProfile::Medium),
            ),
        }
    }

    /// Create an empty set with a shard count chosen for `profile`.
    pub fn with_profile(profile: ContentionProfile) -> Self {
        Self {
            items: DashMap::with_capacity_and_hasher_and_shard_amount(
                0,
                RandomState::new(),
                optimal_shards(profile),
            ),
        }
    }

    /// Ensure `item` is a member. Idempotent: inserting a present item
    /// changes nothing. Returns true if the item was newly inserted.
    #[inline]
    pub fn insert(&self, item: T) -> bool {
        self.items.insert(item, ()).is_none()
    }

    /// Ensure `item` is not a member. Removing an absent item is a no-op,
    /// not an error. Returns true if the item was present.
    #[inline]
    pub fn remove(&self, item: &T) -> bool {
        self.items.remove(item).is_some()
    }

    /// True iff `item` is a member at the instant of the check. Blocks
    /// only on the item's shard lock, never on whole-map traversal.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains_key(item)
    }

    /// Number of members, summed over shards on every call (not cached).
    /// May be stale by the time it is read if mutations race the call.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True iff the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all members. Shards are cleared one at a time, so a clear
    /// racing concurrent inserts may leave those inserts behind; absent
    /// racing mutators the set is empty when this returns.
    pub fn clear(&self) {
        self.items.clear()
    }

    /// Weakly consistent traversal over the members.
    ///
    /// Holds one shard's read lock at a time. The caller must not insert
    /// into or remove from this set while holding a yielded reference;
    /// mutation from other threads is fine.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.iter(),
        }
    }

    /// Snapshot of the members into a `Vec`, in unspecified order.
    /// Same weak consistency as [`iter`](Self::iter).
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().map(|item| item.key().clone()).collect()
    }

    /// Call `f` once per member, in unspecified order, stopping the
    /// first time `f` returns false. Uses the same weakly consistent
    /// traversal as [`iter`](Self::iter); concurrent mutation from other
    /// threads is not locked out. `f` must not mutate this set.
    pub fn for_each_while<F>(&self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        for item in self.iter() {
            if !f(item.key()) {
                return;
            }
        }
    }
}

impl<T: Eq + Hash> Default for ConcurrentSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + fmt::Debug> fmt::Debug for ConcurrentSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for item in self.iter() {
            set.entry(item.key());
        }
        set.finish()
    }
}

impl<T: Eq + Hash> Extend<T> for ConcurrentSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Eq + Hash> FromIterator<T> for ConcurrentSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a ConcurrentSet<T> {
    type Item = ItemRef<'a, T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a set's members. See
/// [`ConcurrentSet::iter`] for the consistency contract.
pub struct Iter<'a, T> {
    inner: dashmap::iter::Iter<'a, T, (), RandomState>,
}

impl<'a, T: Eq + Hash> Iterator for Iter<'a, T> {
    type Item = ItemRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|inner| ItemRef { inner })
    }
}

/// Shared reference to a member, holding its shard's read lock while
/// alive. Dereferences to the element.
pub struct ItemRef<'a, T> {
    inner: RefMulti<'a, T, (), RandomState>,
}

impl<'a, T: Eq + Hash> ItemRef<'a, T> {
    /// The referenced element.
    #[inline]
    pub fn key(&self) -> &T {
        self.inner.key()
    }
}

impl<'a, T: Eq + Hash> std::ops::Deref for ItemRef<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.inner.key()
    }
}
