//! # Cache trait hierarchy
//!
//! Defines the trait layers for the cache surface, separating the
//! operations every cache supports from the ones that only make sense for
//! a recency-ordered policy.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len / is_empty / capacity              │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │                                         │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K])                     │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! [`LruCache`](crate::policy::lru::LruCache) implements all three.

/// Core cache operations that any cache supports, regardless of eviction
/// policy.
///
/// # Example
///
/// ```
/// use ringcache::traits::CoreCache;
/// use ringcache::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity, an entry may be evicted according to
    /// the cache's eviction policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update internal access state depending on the eviction policy.
    /// Use [`contains`](Self::contains) to check existence without
    /// affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use ringcache::traits::{CoreCache, MutableCache};
/// use ringcache::policy::lru::LruCache;
///
/// fn invalidate<C: MutableCache<u64, &'static str>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCache::new(10);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// invalidate(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair, returning the removed value if
    /// the key existed.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning `Option<V>` per key in input order.
    ///
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that respect access order.
///
/// Entries are ordered by recency; the least recently touched entry is
/// evicted first.
///
/// # Example
///
/// ```
/// use ringcache::traits::{CoreCache, LruCacheTrait};
/// use ringcache::policy::lru::LruCache;
///
/// let mut cache: LruCache<u64, &str> = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// // Key 1 is the eviction candidate until it is touched.
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
/// assert!(cache.touch(&1));
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 2);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry, or `None` if the
    /// cache is empty.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it or
    /// updating its access state.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched.
    fn touch(&mut self, key: &K) -> bool;

    /// Returns the recency rank of a key (0 = most recent), or `None` if
    /// the key is not present.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::lru::LruCache;

    #[test]
    fn default_is_empty_tracks_len() {
        let mut cache: LruCache<u32, u32> = LruCache::new(4);
        assert!(CoreCache::is_empty(&cache));
        cache.insert(1, 1);
        assert!(!CoreCache::is_empty(&cache));
    }

    #[test]
    fn default_remove_batch_preserves_input_order() {
        let mut cache = LruCache::new(4);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(3, "three");

        let removed = cache.remove_batch(&[3, 42, 1]);
        assert_eq!(removed, vec![Some("three"), None, Some("one")]);
        assert_eq!(cache.len(), 1);
    }
}
