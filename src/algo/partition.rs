//! Stable partition of a chain around a pivot value.

use core::fmt;

use crate::arena::{ListArena, NodeId};

/// Rearrange the chain so every cell with a value strictly below `pivot`
/// precedes every cell with a value at or above it, preserving the relative
/// order inside both groups. Returns the new head.
///
/// Single sweep building two sub-chains out of the existing cells, then one
/// splice. Each cell is read twice (value and forward link) and written at
/// most once as a sub-chain tail, so the run stays inside the single-pass
/// tolerance with no allocation.
pub fn partition_list<T>(arena: &mut ListArena<T>, head: Option<NodeId>, pivot: T) -> Option<NodeId>
where
    T: Clone + Ord + fmt::Display,
{
    // (head, tail) of each sub-chain as it grows.
    let mut below: Option<(NodeId, NodeId)> = None;
    let mut at_or_above: Option<(NodeId, NodeId)> = None;

    let mut cur = head;
    while let Some(cell) = cur {
        cur = arena.next(cell);
        let group = if arena.value(cell) < pivot {
            &mut below
        } else {
            &mut at_or_above
        };
        match group {
            Some((_, tail)) => {
                arena.set_next(*tail, Some(cell));
                *tail = cell;
            }
            None => *group = Some((cell, cell)),
        }
    }

    match (below, at_or_above) {
        (Some((bh, bt)), Some((ah, at))) => {
            arena.set_next(bt, Some(ah));
            arena.set_next(at, None);
            Some(bh)
        }
        (Some((bh, bt)), None) => {
            arena.set_next(bt, None);
            Some(bh)
        }
        (None, Some((ah, at))) => {
            arena.set_next(at, None);
            Some(ah)
        }
        (None, None) => None,
    }
}
