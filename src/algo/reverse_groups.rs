//! Reversal of a chain in fixed-size groups.

use core::fmt;

use crate::arena::{ListArena, NodeId};

use super::AlgoError;

/// Reverse every complete group of `k` cells, leaving a short tail group in
/// its original order. Returns the new head.
///
/// Groups are processed back to front: each group first probes that `k`
/// cells exist, recurses on the remainder, and then reverses itself with the
/// processed remainder's head as the seed. Seeding means the group's last
/// cell is written once with its final target instead of being patched
/// after the fact, which is what keeps every cell at one probe read, one
/// reversal read, and one write. No allocation.
///
/// `k == 0` is rejected; `k == 1` and `k` beyond the chain length are
/// no-ops.
pub fn reverse_k_group<T: Clone + fmt::Display>(
    arena: &mut ListArena<T>,
    head: Option<NodeId>,
    k: usize,
) -> Result<Option<NodeId>, AlgoError> {
    if k == 0 {
        return Err(AlgoError::ZeroCount { what: "k" });
    }
    if k == 1 {
        return Ok(head);
    }
    Ok(reverse_groups(arena, head, k))
}

fn reverse_groups<T: Clone + fmt::Display>(
    arena: &mut ListArena<T>,
    head: Option<NodeId>,
    k: usize,
) -> Option<NodeId> {
    let head = head?;

    // Probe k cells ahead; a short group stays as it is.
    let mut after_group = Some(head);
    for _ in 0..k {
        match after_group {
            Some(cell) => after_group = arena.next(cell),
            None => return Some(head),
        }
    }

    let rest = reverse_groups(arena, after_group, k);

    let mut prev = rest;
    let mut cur = Some(head);
    for _ in 0..k {
        let cell = cur.expect("the probe counted k cells in this group");
        let next = arena.next(cell);
        arena.set_next(cell, prev);
        prev = Some(cell);
        cur = next;
    }
    prev
}
