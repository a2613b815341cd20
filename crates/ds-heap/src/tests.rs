//! Unit tests for ds-heap.

use ds_core::Day;

use crate::{Handle, HeapError, IndexedHeap};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Queue one item per wake day, payload = wake day, period = 1.
fn heap_of(wakes: &[u64]) -> (IndexedHeap<u64>, Vec<Handle>) {
    let mut heap = IndexedHeap::new();
    let handles = wakes
        .iter()
        .map(|&w| heap.schedule(w, Day(w), 1).unwrap())
        .collect();
    (heap, handles)
}

/// Extract everything, returning payloads in extraction order.
fn drain_payloads(heap: &mut IndexedHeap<u64>) -> Vec<u64> {
    let mut out = Vec::new();
    while let Some(h) = heap.extract_min() {
        out.push(*heap.get(h).unwrap());
        heap.check_invariants();
    }
    out
}

// ── Basic operations ──────────────────────────────────────────────────────────

#[cfg(test)]
mod basics {
    use super::*;

    #[test]
    fn sorted_extraction() {
        let (mut heap, _) = heap_of(&[5, 3, 8, 1, 9]);
        heap.check_invariants();
        assert_eq!(drain_payloads(&mut heap), vec![1, 3, 5, 8, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn empty_heap_peek_and_extract_are_none() {
        let mut heap: IndexedHeap<u64> = IndexedHeap::new();
        assert!(heap.peek_min().is_none());
        assert!(heap.peek_wake().is_none());
        assert!(heap.extract_min().is_none());
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn peek_does_not_mutate() {
        let (heap, handles) = heap_of(&[4, 2, 6]);
        assert_eq!(heap.peek_min(), Some(handles[1]));
        assert_eq!(heap.peek_min(), Some(handles[1]));
        assert_eq!(heap.peek_wake(), Some(Day(2)));
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn size_conservation() {
        let (mut heap, handles) = heap_of(&[10, 20, 30, 40, 50, 60, 70]);
        assert_eq!(heap.len(), 7);
        heap.delete(handles[3]).unwrap();
        heap.extract_min().unwrap();
        heap.delete(handles[6]).unwrap();
        assert_eq!(heap.len(), 7 - 3);
        heap.check_invariants();
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut heap = IndexedHeap::with_capacity(2);
        for w in (0..100u64).rev() {
            heap.schedule(w, Day(w), 1).unwrap();
        }
        assert!(heap.capacity() >= 100);
        heap.check_invariants();
        assert_eq!(drain_payloads(&mut heap), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn extracted_record_stays_alive_until_released() {
        let (mut heap, handles) = heap_of(&[1, 2]);
        let h = heap.extract_min().unwrap();
        assert_eq!(h, handles[0]);
        assert!(!heap.contains(h));
        assert_eq!(heap.get(h), Some(&1));
        assert_eq!(heap.live_count(), 2);

        assert_eq!(heap.release(h).unwrap(), 1);
        assert_eq!(heap.get(h), None);
        assert_eq!(heap.live_count(), 1);
    }

    #[test]
    fn drain_sorted_detaches_everything() {
        let (mut heap, _) = heap_of(&[3, 1, 2]);
        let order: Vec<u64> = heap
            .drain_sorted()
            .into_iter()
            .map(|h| *heap.get(h).unwrap())
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(heap.is_empty());
        assert_eq!(heap.live_count(), 3);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn arena_index_refuses_to_wrap() {
        use crate::heap::arena_index;

        assert_eq!(arena_index(0), Ok(0));
        assert_eq!(arena_index(u32::MAX as usize), Ok(u32::MAX));
        let past = u32::MAX as usize + 1;
        assert_eq!(arena_index(past), Err(HeapError::ArenaFull(past)));
    }
}

// ── Arbitrary delete ──────────────────────────────────────────────────────────

#[cfg(test)]
mod delete {
    use super::*;

    #[test]
    fn delete_by_handle_preserves_order() {
        let (mut heap, handles) = heap_of(&[5, 3, 8, 1, 9, 2]);
        heap.delete(handles[2]).unwrap(); // key 8
        heap.check_invariants();
        assert_eq!(drain_payloads(&mut heap), vec![1, 2, 3, 5, 9]);
    }

    #[test]
    fn delete_last_slot_truncates() {
        let (mut heap, handles) = heap_of(&[1, 2, 3]);
        // Ascending inserts never move, so the last handle sits in the last slot.
        heap.delete(handles[2]).unwrap();
        heap.check_invariants();
        assert_eq!(heap.len(), 2);
        assert_eq!(drain_payloads(&mut heap), vec![1, 2]);
    }

    #[test]
    fn delete_root() {
        let (mut heap, handles) = heap_of(&[4, 1, 7, 3]);
        heap.delete(handles[1]).unwrap();
        heap.check_invariants();
        assert_eq!(heap.peek_wake(), Some(Day(3)));
    }

    #[test]
    fn delete_that_requires_bubble_up() {
        //            1
        //       10        2
        //     11  12    3   4
        // Deleting 11 moves 4 (the last item) under 10, where it must rise.
        let (mut heap, handles) = heap_of(&[1, 10, 2, 11, 12, 3, 4]);
        heap.check_invariants();
        heap.delete(handles[3]).unwrap();
        heap.check_invariants();
        assert_eq!(drain_payloads(&mut heap), vec![1, 2, 3, 4, 10, 12]);
    }

    #[test]
    fn deleted_item_can_be_reinserted() {
        let (mut heap, handles) = heap_of(&[5, 6, 7]);
        heap.delete(handles[1]).unwrap();
        heap.set_wake(handles[1], Day(1)).unwrap();
        heap.insert(handles[1]).unwrap();
        heap.check_invariants();
        assert_eq!(heap.peek_min(), Some(handles[1]));
    }

    #[test]
    fn double_delete_is_not_member() {
        let (mut heap, handles) = heap_of(&[1, 2, 3]);
        heap.delete(handles[1]).unwrap();
        let err = heap.delete(handles[1]).unwrap_err();
        assert!(matches!(err, HeapError::NotMember { handle, .. } if handle == handles[1]));
    }

    #[test]
    fn delete_never_inserted_is_not_member() {
        let mut heap = IndexedHeap::new();
        let h = heap.spawn(0u64, Day(3), 1).unwrap();
        assert!(matches!(heap.delete(h), Err(HeapError::NotMember { .. })));
    }

    #[test]
    fn delete_foreign_handle_is_not_member() {
        let (mut a, _) = heap_of(&[1]);
        let (_, b_handles) = heap_of(&[1]);
        assert!(matches!(a.delete(b_handles[0]), Err(HeapError::NotMember { .. })));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn delete_released_handle_is_not_member() {
        let (mut heap, handles) = heap_of(&[1, 2]);
        heap.delete(handles[0]).unwrap();
        heap.release(handles[0]).unwrap();
        // Reuse the arena record; the old handle must not alias the new item.
        let fresh = heap.schedule(99, Day(0), 1).unwrap();
        assert_eq!(fresh.index(), handles[0].index());
        assert_ne!(fresh.generation(), handles[0].generation());
        assert!(matches!(heap.delete(handles[0]), Err(HeapError::NotMember { .. })));
        assert!(heap.contains(fresh));
    }
}

// ── Membership contract ───────────────────────────────────────────────────────

#[cfg(test)]
mod membership {
    use super::*;

    #[test]
    fn duplicate_insert_rejected() {
        let (mut heap, handles) = heap_of(&[1, 2]);
        assert_eq!(
            heap.insert(handles[0]),
            Err(HeapError::DuplicateMembership(handles[0]))
        );
        assert_eq!(heap.len(), 2);
        heap.check_invariants();
    }

    #[test]
    fn insert_after_extract_is_allowed() {
        let (mut heap, _) = heap_of(&[1, 2]);
        let h = heap.extract_min().unwrap();
        assert_eq!(heap.rearm(h, Day(1)).unwrap(), Day(2));
        heap.insert(h).unwrap();
        assert_eq!(heap.len(), 2);
        heap.check_invariants();
    }

    #[test]
    fn insert_foreign_handle_is_stale() {
        let (mut a, _) = heap_of(&[]);
        let (_, b_handles) = heap_of(&[4]);
        assert_eq!(a.insert(b_handles[0]), Err(HeapError::StaleHandle(b_handles[0])));
    }

    #[test]
    fn queued_items_cannot_be_released_or_rearmed() {
        let (mut heap, handles) = heap_of(&[1]);
        assert_eq!(heap.release(handles[0]), Err(HeapError::Queued(handles[0])));
        assert_eq!(heap.rearm(handles[0], Day(0)), Err(HeapError::Queued(handles[0])));
        assert_eq!(heap.set_wake(handles[0], Day(0)), Err(HeapError::Queued(handles[0])));
    }

    #[test]
    fn zero_period_rejected() {
        let mut heap = IndexedHeap::new();
        assert_eq!(heap.spawn(0u64, Day(0), 0), Err(HeapError::ZeroPeriod));
        let h = heap.spawn(0u64, Day(0), 3).unwrap();
        assert_eq!(heap.set_period(h, 0), Err(HeapError::ZeroPeriod));
        assert_eq!(heap.period(h), Some(3));
    }

    #[test]
    fn set_period_applies_at_next_rearm() {
        let mut heap = IndexedHeap::new();
        let h = heap.schedule(0u64, Day(0), 10).unwrap();
        heap.set_period(h, 20).unwrap();
        let h = heap.extract_min().unwrap();
        assert_eq!(heap.rearm(h, Day(5)).unwrap(), Day(25));
    }

    #[test]
    fn payload_mutation_while_queued() {
        let (mut heap, handles) = heap_of(&[3, 1]);
        *heap.get_mut(handles[0]).unwrap() = 300;
        heap.check_invariants();
        assert_eq!(drain_payloads(&mut heap), vec![1, 300]);
    }
}

// ── Tie-break ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ties {
    use super::*;

    #[test]
    fn equal_wake_days_extract_in_insertion_order() {
        let mut heap = IndexedHeap::new();
        for id in 0..20u64 {
            heap.schedule(id, Day(7), 1).unwrap();
        }
        assert_eq!(drain_payloads(&mut heap), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn reinsert_goes_behind_existing_equals() {
        let mut heap = IndexedHeap::new();
        let first = heap.schedule(0u64, Day(3), 1).unwrap();
        heap.schedule(1u64, Day(3), 1).unwrap();
        heap.delete(first).unwrap();
        heap.insert(first).unwrap();
        assert_eq!(drain_payloads(&mut heap), vec![1, 0]);
    }

    #[test]
    fn ties_survive_arbitrary_delete() {
        let mut heap = IndexedHeap::new();
        let handles: Vec<Handle> = (0..9u64)
            .map(|id| heap.schedule(id, Day(1), 1).unwrap())
            .collect();
        heap.delete(handles[4]).unwrap();
        heap.delete(handles[0]).unwrap();
        heap.check_invariants();
        assert_eq!(drain_payloads(&mut heap), vec![1, 2, 3, 5, 6, 7, 8]);
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod render {
    use super::*;

    #[test]
    fn empty_tree_renders_nothing() {
        let heap: IndexedHeap<u64> = IndexedHeap::new();
        assert_eq!(heap.render_tree(), "");
    }

    #[test]
    fn three_node_tree() {
        let (heap, _) = heap_of(&[1, 2, 3]);
        assert_eq!(heap.render_tree(), ",-- D3\nD1\n`-- D2\n");
    }

    #[test]
    fn every_item_appears_once() {
        let (heap, _) = heap_of(&[5, 3, 8, 1, 9, 2, 7]);
        let tree = heap.render_tree();
        assert_eq!(tree.lines().count(), 7);
        for w in [1, 2, 3, 5, 7, 8, 9] {
            assert!(tree.contains(&format!("D{w}\n")), "missing D{w} in\n{tree}");
        }
    }
}

// ── Randomized operation sequences ────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u64),
        Extract,
        /// Delete the n-th (mod len) currently queued item.
        Delete(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u64..50).prop_map(Op::Insert),
            1 => Just(Op::Extract),
            1 => any::<usize>().prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn matches_reference_model(ops in prop::collection::vec(op(), 0..200)) {
            let mut heap = IndexedHeap::new();
            // Reference: (wake, insertion order) → handle.
            let mut model: BTreeMap<(u64, u64), Handle> = BTreeMap::new();
            let mut order = 0u64;
            let mut inserted = 0usize;
            let mut removed = 0usize;

            for op in ops {
                match op {
                    Op::Insert(w) => {
                        let h = heap.schedule(order, Day(w), 1).unwrap();
                        model.insert((w, order), h);
                        order += 1;
                        inserted += 1;
                    }
                    Op::Extract => {
                        let expected = model.pop_first().map(|(_, h)| h);
                        let got = heap.extract_min();
                        prop_assert_eq!(got, expected);
                        if got.is_some() {
                            removed += 1;
                        }
                    }
                    Op::Delete(n) => {
                        if !model.is_empty() {
                            let key = *model.keys().nth(n % model.len()).unwrap();
                            let h = model.remove(&key).unwrap();
                            heap.delete(h).unwrap();
                            prop_assert!(!heap.contains(h));
                            removed += 1;
                        }
                    }
                }
                heap.check_invariants();
                prop_assert_eq!(heap.len(), inserted - removed);
                prop_assert_eq!(heap.peek_min(), model.values().next().copied());
            }
        }
    }
}
