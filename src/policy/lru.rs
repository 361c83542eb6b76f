//! # Least Recently Used (LRU) cache
//!
//! Fixed-capacity key-value cache that evicts the least-recently-touched
//! entry whenever an insertion would exceed capacity. Every primary
//! operation is O(1) amortized.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                           │
//!   │                                                                 │
//!   │   ┌───────────────────────────────────────────────────────┐     │
//!   │   │  FxHashMap<K, Entry<V>>                               │     │
//!   │   │                                                       │     │
//!   │   │  ┌─────────┬──────────────────────────────┐           │     │
//!   │   │  │   Key   │  Entry { node: SlotId, value }│          │     │
//!   │   │  ├─────────┼──────────────────────────────┤           │     │
//!   │   │  │  key_1  │  ───────────────────────┐    │           │     │
//!   │   │  │  key_2  │  ───────────────┐       │    │           │     │
//!   │   │  └─────────┴─────────────────┼───────┼────┘           │     │
//!   │   └──────────────────────────────┼───────┼────────────────┘     │
//!   │                                  │       │                      │
//!   │   ┌──────────────────────────────┼───────┼────────────────┐     │
//!   │   │  RecencyRing<K>              ▼       ▼                │     │
//!   │   │                                                       │     │
//!   │   │   head ─► [key_1] ◄──► [key_2] ◄──► [key_3] ─┐        │     │
//!   │   │     ▲       (MRU)                    (LRU)   │        │     │
//!   │   │     └────────────────────────────────────────┘        │     │
//!   │   └───────────────────────────────────────────────────────┘     │
//!   └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ring stores keys in recency order (most-recent at the head, the tail
//! is `head.prev`); the map stores each key's value next to the opaque
//! handle of its ring node. Handles never cross the public API boundary —
//! the map resolves positions only through the ring's own operations.
//!
//! ## Operations
//!
//! | Method            | Complexity | Touch? | Description                        |
//! |-------------------|------------|--------|------------------------------------|
//! | `insert(k, v)`    | O(1)*      | yes    | Insert or update, may evict LRU    |
//! | `insert_with(k,f)`| O(1)*      | yes    | Construct the value in place       |
//! | `get(&k)`         | O(1)       | yes    | Borrow value, promote to MRU       |
//! | `peek(&k)`        | O(1)       | no     | Borrow value, order untouched      |
//! | `contains(&k)`    | O(1)       | no     | Presence probe                     |
//! | `remove(&k)`      | O(1)       | no     | Remove entry by key                |
//! | `pop_lru()`       | O(1)       | -      | Remove and return the LRU entry    |
//! | `peek_lru()`      | O(1)       | no     | Borrow the LRU entry               |
//! | `touch(&k)`       | O(1)       | yes    | Promote without returning a value  |
//! | `recency_rank(&k)`| O(n)       | no     | Position in recency order (0=MRU)  |
//! | `clear()`         | O(n)       | -      | Drop all entries, keep capacity    |
//!
//! A *touch* is an `insert` or a successful `get`/`touch`; `contains`,
//! `peek`, and `remove` never reorder surviving entries.
//!
//! ## Eviction
//!
//! ```text
//!   insert(D) into a full cache (capacity = 3):
//!
//!   Before:  head ─► [A] ◄──► [B] ◄──► [C] ◄─ tail
//!   1. push D at the head          [D] [A] [B] [C]   (len 4 > capacity 3)
//!   2. pop the tail, drop its key  [D] [A] [B]
//! ```
//!
//! Capacity can only ever be exceeded by exactly one, so a single tail pop
//! restores the bound. A capacity of 0 means the cache stores nothing:
//! `insert` is a no-op and every lookup misses.
//!
//! ## Design Rationale
//!
//! - **Arena handles, no raw pointers**: ring nodes live in a slot arena
//!   with generation-checked `SlotId` handles, so the map's back-references
//!   into the ring are validated rather than trusted.
//! - **Keys in the ring, values in the map**: eviction needs the tail's key
//!   to erase the map entry; storing the key in the node makes that one
//!   lookup. Values stay inline in the map entry (no `Arc` indirection).
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded by design. Almost every read (`get`)
//! also mutates recency order, so sharing across threads requires one
//! exclusive lock around the whole cache; that serialization is the
//! caller's job.
//!
//! ## Example
//!
//! ```
//! use ringcache::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(3);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! cache.insert(3, "three");
//!
//! // Reading key 1 promotes it, so key 2 is now the eviction candidate.
//! assert_eq!(cache.get(&1), Some(&"one"));
//! cache.insert(4, "four");
//!
//! assert!(!cache.contains(&2));
//! assert!(cache.contains(&1));
//! ```

use std::fmt;
use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;

use crate::ds::{RecencyRing, SlotId};
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Index entry: the value plus a non-owning handle to the key's ring node.
///
/// The ring owns the node's lifetime; the handle only locates it.
#[derive(Debug)]
struct Entry<V> {
    node: SlotId,
    value: V,
}

/// Fixed-capacity LRU cache over an arena-backed circular recency ring.
///
/// Most-recently-touched entries sit at the ring's head; the tail is always
/// the eviction candidate. Capacity is fixed at construction and never
/// resized; a capacity of 0 accepts nothing.
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    capacity: usize,
    ring: RecencyRing<K>,
    map: FxHashMap<K, Entry<V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with the given capacity.
    ///
    /// A capacity of 0 creates a cache that accepts no entries: every
    /// `insert` is a no-op and every lookup returns `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ring: RecencyRing::with_capacity(capacity),
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the fixed maximum capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns `true` if the key is present. Never reorders entries.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// existed.
    ///
    /// An existing key is overwritten in place and promoted to
    /// most-recently-used — that counts as a touch whether or not the new
    /// value differs. A new key lands at the ring head; if the cache is now
    /// over capacity the tail entry is evicted. With capacity 0 nothing is
    /// ever stored.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "updated"), Some("first"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_with(key, || value)
    }

    /// Inserts a value constructed in place by `make`, returning the
    /// previous value if the key existed.
    ///
    /// Same new/existing-key semantics as [`insert`](Self::insert). The
    /// closure only runs when the value will actually be stored, so a
    /// zero-capacity cache never constructs anything.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let mut cache: LruCache<u32, Vec<u8>> = LruCache::new(8);
    /// cache.insert_with(1, || vec![0; 512]);
    /// assert_eq!(cache.get(&1).map(Vec::len), Some(512));
    /// ```
    pub fn insert_with<F>(&mut self, key: K, make: F) -> Option<V>
    where
        F: FnOnce() -> V,
    {
        if self.capacity == 0 {
            return None;
        }

        if let Some(entry) = self.map.get_mut(&key) {
            let previous = mem::replace(&mut entry.value, make());
            let node = entry.node;
            let promoted = self.ring.move_to_front(node);
            debug_assert!(promoted.is_ok());
            self.validate_invariants();
            return Some(previous);
        }

        let value = make();
        let node = self.ring.push_front(key.clone());
        self.map.insert(key, Entry { node, value });

        // Capacity is exceeded by at most one, so a single eviction
        // restores the bound.
        if self.map.len() > self.capacity {
            self.evict_lru();
        }

        self.validate_invariants();
        None
    }

    /// Returns a reference to the value, promoting the entry to
    /// most-recently-used.
    ///
    /// The reference stays valid until the next mutating call.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert(1, "value");
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let node = self.map.get(key)?.node;
        let promoted = self.ring.move_to_front(node);
        debug_assert!(promoted.is_ok());
        self.map.get(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value, promoting the entry.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.map.get(key)?.node;
        let promoted = self.ring.move_to_front(node);
        debug_assert!(promoted.is_ok());
        self.map.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns a reference to the value without promoting the entry.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Peek leaves key 1 as the eviction candidate.
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|entry| &entry.value)
    }

    /// Removes the entry for `key`, returning its value if it was present.
    ///
    /// The recency order of the remaining entries is unchanged. Removing an
    /// absent key is a no-op returning `None`.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.map.remove(key)?;
        let removed = self.ring.remove(entry.node);
        debug_assert!(removed.is_ok());
        self.validate_invariants();
        Some(entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let popped = self.evict_lru();
        self.validate_invariants();
        popped
    }

    /// Returns the least recently used entry without removing or promoting
    /// it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let key = self.ring.back().ok()?;
        let entry = self.map.get(key)?;
        Some((key, &entry.value))
    }

    /// Marks an entry as recently used without returning its value.
    ///
    /// Returns `true` if the key was found.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.map.get(key) {
            Some(entry) => {
                let promoted = self.ring.move_to_front(entry.node);
                debug_assert!(promoted.is_ok());
                true
            }
            None => false,
        }
    }

    /// Returns the position of `key` in recency order (0 = most recent).
    ///
    /// O(n): walks the ring. Never reorders entries.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = self.map.get(key)?.node;
        self.ring.iter_ids().position(|id| id == target)
    }

    /// Drops every entry. Capacity is retained.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.map.clear();
        self.validate_invariants();
    }

    /// Iterates entries in recency order, most recent first. Does not count
    /// as a touch.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.ring
            .iter()
            .filter_map(move |key| self.map.get(key).map(|entry| (key, &entry.value)))
    }

    /// Removes the tail entry from both the ring and the map.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let key = self.ring.pop_back().ok()?;
        let entry = self.map.remove(&key)?;
        Some((key, entry.value))
    }

    /// Validate internal invariants (debug builds only).
    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.check_invariants().is_ok());
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Verifies the cache-level invariants: the map and the ring agree on
    /// the key set, sizes match, the capacity bound holds, and every map
    /// entry's handle resolves to its own key in the ring.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.ring.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but ring holds {} nodes",
                self.map.len(),
                self.ring.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        for (key, entry) in &self.map {
            match self.ring.get(entry.node) {
                Some(ring_key) if ring_key == key => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "index entry handle resolves to a different key",
                    ));
                }
                None => {
                    return Err(InvariantError::new("index entry holds a stale handle"));
                }
            }
        }
        self.ring.check_invariants()?;
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with capacity 0, which accepts no entries.
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
