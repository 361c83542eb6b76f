// ==============================================
// LRU CACHE PROPERTY TESTS (integration)
// ==============================================
//
// End-to-end behavioral properties of the cache: eviction order, promotion
// on read, capacity bounds, and index/ring consistency across operation
// sequences. These exercise the public surface only.

use ringcache::policy::lru::LruCache;

// ==============================================
// Capacity Bound
// ==============================================

mod capacity_bound {
    use super::*;

    #[test]
    fn c_plus_one_inserts_evict_the_first_key() {
        const CAPACITY: usize = 16;
        let mut cache = LruCache::new(CAPACITY);

        for i in 0..=CAPACITY as u64 {
            cache.insert(i, i);
        }

        assert_eq!(cache.len(), CAPACITY);
        assert_eq!(cache.get(&0), None, "first-inserted key must be evicted");
        for i in 1..=CAPACITY as u64 {
            assert_eq!(cache.get(&i), Some(&i), "key {} should have survived", i);
        }
    }

    #[test]
    fn len_never_exceeds_capacity() {
        let mut cache = LruCache::new(8);
        for i in 0..100u32 {
            cache.insert(i, i);
            assert!(cache.len() <= cache.capacity());
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn single_slot_displacement() {
        // Capacity 1: a long run of distinct puts leaves only the last key
        // retrievable.
        let mut cache = LruCache::new(1);
        cache.insert(1, 1);
        assert_eq!(cache.get(&1), Some(&1));

        for i in 0..=1000 {
            cache.insert(i, i);
        }
        for i in 0..1000 {
            assert_eq!(cache.get(&i), None);
        }
        assert_eq!(cache.get(&1000), Some(&1000));
    }
}

// ==============================================
// Promotion on Read
// ==============================================

mod promotion {
    use super::*;

    #[test]
    fn get_protects_an_entry_from_eviction() {
        let mut cache = LruCache::new(3);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(3, 3);

        cache.get(&1);
        cache.insert(4, 4);

        assert_eq!(cache.get(&2), None, "key 2 was LRU after key 1 was read");
        assert_eq!(cache.get(&1), Some(&1));
        assert_eq!(cache.get(&3), Some(&3));
        assert_eq!(cache.get(&4), Some(&4));
    }

    #[test]
    fn contains_and_peek_do_not_protect() {
        let mut cache = LruCache::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);

        assert!(cache.contains(&1));
        assert_eq!(cache.peek(&1), Some(&1));

        cache.insert(3, 3);
        assert!(!cache.contains(&1), "probing key 1 must not have promoted it");
        assert!(cache.contains(&2));
    }
}

// ==============================================
// Overwrite Semantics
// ==============================================

mod overwrite {
    use super::*;

    #[test]
    fn overwrite_keeps_both_keys_and_promotes() {
        let mut cache = LruCache::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(1, 10);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.recency_rank(&1), Some(0), "overwrite is a touch");
        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.get(&2), Some(&2));
    }

    #[test]
    fn overwrite_with_equal_value_still_touches() {
        let mut cache = LruCache::new(2);
        cache.insert(1, 7);
        cache.insert(2, 7);
        cache.insert(1, 7);

        cache.insert(3, 3);
        assert!(cache.contains(&1), "equal-value overwrite still promotes");
        assert!(!cache.contains(&2));
    }
}

// ==============================================
// Zero-Capacity Cache
// ==============================================

mod zero_capacity {
    use super::*;

    #[test]
    fn nothing_is_ever_stored() {
        let mut cache = LruCache::new(0);
        for i in 0..100u32 {
            cache.insert(i, i);
            assert_eq!(cache.get(&i), None);
            assert_eq!(cache.len(), 0);
        }
    }
}

// ==============================================
// Removal
// ==============================================

mod removal {
    use super::*;

    #[test]
    fn remove_is_idempotent() {
        let mut cache = LruCache::new(4);
        assert_eq!(cache.remove(&1), None);

        cache.insert(1, 100);
        assert_eq!(cache.remove(&1), Some(100));
        assert_eq!(cache.remove(&1), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn remove_on_absent_key_changes_nothing() {
        let mut cache = LruCache::new(4);
        cache.insert(1, 1);
        cache.insert(2, 2);

        for i in 10..1000 {
            assert_eq!(cache.remove(&i), None);
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.recency_rank(&2), Some(0));
        assert_eq!(cache.recency_rank(&1), Some(1));
    }

    #[test]
    fn removed_slot_frees_room_without_eviction() {
        let mut cache = LruCache::new(2);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.remove(&1);

        cache.insert(3, 3);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }
}

// ==============================================
// Round-Trip Stress
// ==============================================

mod stress {
    use super::*;

    fn run_round_trip(n: u64, batch: u64) {
        let mut cache = LruCache::new(n as usize);
        let mut next = 0u64;
        while next < 2 * n {
            let end = (next + batch).min(2 * n);
            for i in next..end {
                cache.insert(i, i);
            }
            next = end;
        }

        assert_eq!(cache.len(), n as usize);
        for i in 0..n {
            assert_eq!(cache.get(&i), None, "key {} should have been evicted", i);
        }
        for i in n..2 * n {
            assert_eq!(cache.get(&i), Some(&i), "key {} should be present", i);
        }
    }

    #[test]
    fn last_n_of_2n_survive() {
        // Insertion batch size must not matter.
        run_round_trip(1000, 1);
        run_round_trip(1000, 7);
        run_round_trip(1000, 1000);
    }

    #[test]
    fn large_sweep() {
        run_round_trip(10_000, 256);
    }
}

// ==============================================
// Index / Ring Consistency
// ==============================================

mod consistency {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn random_operation_sequences_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut cache: LruCache<u16, u32> = LruCache::new(32);

        for round in 0..10_000u32 {
            let key = rng.gen_range(0..64u16);
            match rng.gen_range(0..6u8) {
                0 | 1 => {
                    cache.insert(key, round);
                }
                2 => {
                    cache.get(&key);
                }
                3 => {
                    cache.remove(&key);
                }
                4 => {
                    cache.touch(&key);
                }
                _ => {
                    cache.peek(&key);
                }
            }

            if round % 512 == 0 {
                cache.check_invariants().unwrap();
            }
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn iteration_agrees_with_recency_rank() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut cache: LruCache<u16, u16> = LruCache::new(16);
        for _ in 0..500 {
            let key = rng.gen_range(0..32u16);
            cache.insert(key, key);
        }

        for (rank, (key, _)) in cache.iter().enumerate() {
            assert_eq!(cache.recency_rank(key), Some(rank));
        }
    }
}
