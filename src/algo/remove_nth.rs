//! Remove the n-th cell from the end in one forward pass.

use core::fmt;

use crate::arena::{ListArena, NodeId};

use super::AlgoError;

/// Remove the `n`-th cell from the end (1-based) and return the new head.
///
/// Classic two-pointer walk: a lookahead advances `n` steps, then both
/// pointers move in step until the lookahead falls off the tail, leaving the
/// trailing pointer just before the victim. No cell is read more than twice
/// and only the splice cell is written, so the run stays inside the
/// single-pass tolerance with no allocation.
///
/// `n == 0` and `n` greater than the list length are rejected; an empty list
/// therefore rejects every `n`.
pub fn remove_nth_from_end<T: Clone + fmt::Display>(
    arena: &mut ListArena<T>,
    head: Option<NodeId>,
    n: usize,
) -> Result<Option<NodeId>, AlgoError> {
    if n == 0 {
        return Err(AlgoError::ZeroCount { what: "n" });
    }
    let Some(head) = head else {
        return Err(AlgoError::CountExceedsLength { n, len: 0 });
    };

    // Advance the lookahead n steps; falling off early means n > length.
    let mut lead = Some(head);
    let mut remaining = n;
    while remaining > 0 {
        let Some(cell) = lead else {
            return Err(AlgoError::CountExceedsLength {
                n,
                len: n - remaining,
            });
        };
        lead = arena.next(cell);
        remaining -= 1;
    }

    // Lookahead fell off exactly at the tail: the head itself is the victim.
    let Some(mut lead) = lead else {
        return Ok(arena.next(head));
    };

    let mut trail = head;
    while let Some(ahead) = arena.next(lead) {
        lead = ahead;
        trail = arena.next(trail).expect("trail stays n cells behind lead");
    }

    let victim = arena.next(trail).expect("lead stopped n cells past trail");
    let after = arena.next(victim);
    arena.set_next(trail, after);
    Ok(Some(head))
}
