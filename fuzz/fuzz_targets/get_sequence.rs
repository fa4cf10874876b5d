#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::prelude::*;

// Drive every policy with the same arbitrary key sequence.
//
// Keys with the high bit set make the source fail. After each get the
// counters, the capacity bound and the internal invariants are checked.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = (data[0] as usize % 16).max(2);
    let source = |k: &u8| {
        if *k >= 0x80 {
            Err(*k)
        } else {
            Ok(u32::from(*k) * 3)
        }
    };

    let single = SingleCache::new(source);
    let unbounded = UnboundedCache::new(source);
    let fifo = FifoCache::new(capacity, source).unwrap();
    let lru = LruCache::new(capacity, source).unwrap();

    for (i, &key) in data[1..].iter().enumerate() {
        let lookups = i as u64 + 1;

        for result in [single.get(&key), unbounded.get(&key), fifo.get(&key), lru.get(&key)] {
            match result {
                Ok(value) => assert_eq!(*value, u32::from(key) * 3),
                Err(err) => assert_eq!(err, key),
            }
        }

        assert_eq!(single.stat().lookups(), lookups);
        assert_eq!(unbounded.stat().lookups(), lookups);
        assert_eq!(fifo.stat().lookups(), lookups);
        assert_eq!(lru.stat().lookups(), lookups);

        assert!(single.size() <= 1);
        assert!(fifo.size() <= capacity);
        assert!(lru.size() <= capacity);

        assert!(single.check_invariants().is_ok());
        assert!(unbounded.check_invariants().is_ok());
        assert!(fifo.check_invariants().is_ok());
        assert!(lru.check_invariants().is_ok());
    }
});
