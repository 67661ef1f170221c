//! Cycle detection via the two-speed walk.

use core::fmt;

use crate::arena::{ListArena, NodeId};

/// Find the cell where the cycle reachable from `head` begins, or `None`
/// when the chain terminates.
///
/// Floyd's walk: a slow and a double-speed pointer either meet inside the
/// cycle or the fast one falls off the end. After a meeting, one pointer
/// restarts at the head and both advance in step; they meet again exactly at
/// the cycle entry. Read-only: the ledger records no mutations and no
/// creations, and the walk needs no marking of visited cells.
pub fn detect_cycle_start<T: Clone + fmt::Display>(
    arena: &ListArena<T>,
    head: Option<NodeId>,
) -> Option<NodeId> {
    let head = head?;
    let mut slow = head;
    let mut fast = head;
    loop {
        slow = arena.next(slow)?;
        fast = arena.next(arena.next(fast)?)?;
        if slow == fast {
            break;
        }
    }

    let mut from_head = head;
    let mut from_meeting = slow;
    while from_head != from_meeting {
        from_head = arena
            .next(from_head)
            .expect("the distance from head to the entry is finite");
        from_meeting = arena
            .next(from_meeting)
            .expect("a cell inside the cycle always has a successor");
    }
    Some(from_head)
}
