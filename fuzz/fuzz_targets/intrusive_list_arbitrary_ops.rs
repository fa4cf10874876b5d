#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use memokit::ds::{IntrusiveList, SlotId};

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Mirrors push_front, pop_back, move_to_front and remove against a deque of
// (id, value) pairs, head first, and compares both directions of iteration.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut model: VecDeque<(SlotId, u32)> = VecDeque::new();
    let mut seen_ids: Vec<SlotId> = Vec::new();

    for pair in data.chunks_exact(2) {
        let value = u32::from(pair[1]);

        match pair[0] % 4 {
            0 => {
                let id = list.push_front(value);
                model.push_front((id, value));
                seen_ids.push(id);
                assert_eq!(list.front_id(), Some(id));
            }
            1 => {
                let expected = model.pop_back().map(|(_, v)| v);
                assert_eq!(list.pop_back(), expected);
            }
            2 => {
                if seen_ids.is_empty() {
                    continue;
                }
                let id = seen_ids[value as usize % seen_ids.len()];
                let pos = model.iter().position(|(i, _)| *i == id);
                assert_eq!(list.move_to_front(id), pos.is_some());
                if let Some(pos) = pos {
                    if let Some(entry) = model.remove(pos) {
                        model.push_front(entry);
                    }
                    assert_eq!(list.front_id(), Some(id));
                }
            }
            3 => {
                if seen_ids.is_empty() {
                    continue;
                }
                let id = seen_ids[value as usize % seen_ids.len()];
                let expected = model
                    .iter()
                    .position(|(i, _)| *i == id)
                    .and_then(|pos| model.remove(pos))
                    .map(|(_, v)| v);
                assert_eq!(list.remove(id), expected);
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        assert_eq!(list.is_empty(), model.is_empty());
        assert_eq!(list.back_id(), model.back().map(|(id, _)| *id));

        let forward: Vec<u32> = list.iter().copied().collect();
        let expected: Vec<u32> = model.iter().map(|(_, v)| *v).collect();
        assert_eq!(forward, expected);

        let backward: Vec<u32> = list.iter_rev().copied().collect();
        let expected_rev: Vec<u32> = model.iter().rev().map(|(_, v)| *v).collect();
        assert_eq!(backward, expected_rev);
    }
});
