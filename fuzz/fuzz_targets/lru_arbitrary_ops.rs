#![no_main]

use libfuzzer_sys::fuzz_target;
use ringcache::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// The first byte selects the capacity (including 0), the rest drive random
// insert, get, peek, contains, remove, touch, pop_lru, clear sequences.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 17);
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1] % 32;

        match op {
            0 | 1 => {
                cache.insert(key, u32::from(data[idx]));
                if capacity == 0 {
                    assert_eq!(cache.len(), 0);
                } else {
                    // A fresh insert is always the most recent entry.
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            }
            2 => {
                let hit = cache.get(&key).is_some();
                if hit {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
                assert_eq!(hit, cache.contains(&key));
            }
            3 => {
                // peek must not promote
                let rank_before = cache.recency_rank(&key);
                let _ = cache.peek(&key);
                assert_eq!(cache.recency_rank(&key), rank_before);
            }
            4 => {
                let was_present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), was_present);
                assert!(!cache.contains(&key));
            }
            5 => {
                assert_eq!(cache.touch(&key), cache.contains(&key));
            }
            6 => {
                let old_len = cache.len();
                let popped = cache.pop_lru();
                if popped.is_some() {
                    assert_eq!(cache.len(), old_len - 1);
                } else {
                    assert_eq!(old_len, 0);
                }
            }
            7 => {
                cache.clear();
                assert!(cache.is_empty());
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        idx += 2;
    }

    cache.check_invariants().unwrap();
});
