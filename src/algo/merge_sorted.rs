//! K-way merge of sorted chains through a min-heap of heads.

use core::cmp::{Ordering, Reverse};
use core::fmt;
use std::collections::BinaryHeap;

use crate::arena::{ListArena, NodeId};

/// A chain head waiting in the heap. Ordered by value, then by the input
/// slot it came from, which keeps the merge stable across equal values. The
/// handle itself takes no part in the ordering.
struct Pending<T> {
    value: T,
    slot: usize,
    cell: NodeId,
}

impl<T: Ord> Ord for Pending<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then(self.slot.cmp(&other.slot))
    }
}

impl<T: Ord> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for Pending<T> {}

/// Merge `lists`, each a sorted chain or `None`, into one sorted chain made
/// of the same cells. Returns the merged head, `None` when every input is
/// empty. Equal values keep the order of the input slots they came from.
///
/// The heap holds at most one pending head per input chain. Every cell is
/// read twice (value and forward link) and written at most once when the
/// merge appends behind it, so the run stays inside the single-pass
/// tolerance with no allocation.
pub fn merge_k_lists<T>(arena: &mut ListArena<T>, lists: &[Option<NodeId>]) -> Option<NodeId>
where
    T: Clone + Ord + fmt::Display,
{
    let mut heap: BinaryHeap<Reverse<Pending<T>>> = BinaryHeap::with_capacity(lists.len());
    for (slot, head) in lists.iter().enumerate() {
        if let Some(cell) = *head {
            let value = arena.value(cell);
            heap.push(Reverse(Pending { value, slot, cell }));
        }
    }

    let mut out: Option<(NodeId, NodeId)> = None;
    while let Some(Reverse(Pending { slot, cell, .. })) = heap.pop() {
        if let Some(successor) = arena.next(cell) {
            let value = arena.value(successor);
            heap.push(Reverse(Pending {
                value,
                slot,
                cell: successor,
            }));
        }
        match &mut out {
            Some((_, tail)) => {
                arena.set_next(*tail, Some(cell));
                *tail = cell;
            }
            None => out = Some((cell, cell)),
        }
    }

    if let Some((_, tail)) = out {
        arena.set_next(tail, None);
    }
    out.map(|(head, _)| head)
}
