#![no_main]

use libfuzzer_sys::fuzz_target;
use ringcache::ds::RecencyRing;

// Fuzz arbitrary operation sequences on RecencyRing
//
// Tests random sequences of push_front, push_back, pop_front, pop_back,
// move_to_front, move_to_back, remove, get, clear operations, including
// stale-handle probes after nodes have been freed.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut ring: RecencyRing<u32> = RecencyRing::new();
    let mut all_ids = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 10;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                // push_front
                let id = ring.push_front(value);
                all_ids.push(id);

                assert_eq!(ring.front(), Ok(&value));
                assert_eq!(ring.front_id(), Some(id));
                assert!(ring.contains(id));
            }
            1 => {
                // push_back
                let id = ring.push_back(value);
                all_ids.push(id);

                assert_eq!(ring.back(), Ok(&value));
                assert_eq!(ring.back_id(), Some(id));
                assert!(ring.contains(id));
            }
            2 => {
                // pop_front
                let old_len = ring.len();
                let popped = ring.pop_front();

                if popped.is_ok() {
                    assert_eq!(ring.len(), old_len - 1);
                } else {
                    assert_eq!(old_len, 0);
                }
            }
            3 => {
                // pop_back
                let old_len = ring.len();
                let popped = ring.pop_back();

                if popped.is_ok() {
                    assert_eq!(ring.len(), old_len - 1);
                } else {
                    assert_eq!(old_len, 0);
                }
            }
            4 => {
                // move_to_front: handle may have gone stale, both outcomes
                // must leave the ring sound
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let was_live = ring.contains(id);

                    let moved = ring.move_to_front(id);
                    assert_eq!(moved.is_ok(), was_live);
                    if moved.is_ok() {
                        assert_eq!(ring.front_id(), Some(id));
                    }
                }
            }
            5 => {
                // move_to_back
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let was_live = ring.contains(id);

                    let moved = ring.move_to_back(id);
                    assert_eq!(moved.is_ok(), was_live);
                    if moved.is_ok() {
                        assert_eq!(ring.back_id(), Some(id));
                    }
                }
            }
            6 => {
                // remove
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let old_len = ring.len();

                    if ring.remove(id).is_ok() {
                        assert_eq!(ring.len(), old_len - 1);
                        assert!(!ring.contains(id));
                        // Once removed, the handle is dead for good.
                        assert!(ring.remove(id).is_err());
                    }
                }
            }
            7 => {
                // get (read-only)
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    assert_eq!(ring.get(id).is_some(), ring.contains(id));
                }
            }
            8 => {
                // emptiness consistency
                if ring.is_empty() {
                    assert_eq!(ring.len(), 0);
                    assert!(ring.front().is_err());
                    assert!(ring.back().is_err());
                    assert_eq!(ring.front_id(), None);
                } else {
                    assert!(ring.front().is_ok());
                    assert!(ring.back().is_ok());
                }
            }
            9 => {
                // clear
                ring.clear();
                all_ids.clear();

                assert!(ring.is_empty());
                assert!(ring.front().is_err());
                assert!(ring.back().is_err());
            }
            _ => unreachable!(),
        }

        // Exact-length traversal in both directions.
        assert_eq!(ring.iter().count(), ring.len());
        assert_eq!(ring.iter_rev().count(), ring.len());

        idx += 2;
    }

    ring.check_invariants().unwrap();
});
