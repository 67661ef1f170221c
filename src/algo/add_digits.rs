//! Addition of two little-endian digit chains.

use crate::arena::{ListArena, NodeId};

/// Add two numbers stored as digit chains, least significant digit first,
/// and return the freshly allocated sum chain in the same layout.
///
/// One sweep over both inputs with a running carry. Input cells are read
/// twice each (value and forward link) and never written; the output is
/// allocated through the tracked allocator, one cell per sum digit, so the
/// creation tally equals the output length.
///
/// Two empty inputs yield `None`; digits must be 0 through 9.
pub fn add_two_numbers(
    arena: &mut ListArena<u8>,
    first: Option<NodeId>,
    second: Option<NodeId>,
) -> Option<NodeId> {
    let mut p1 = first;
    let mut p2 = second;
    let mut carry = 0u8;
    let mut out: Option<(NodeId, NodeId)> = None;

    while p1.is_some() || p2.is_some() || carry > 0 {
        let mut sum = carry;
        if let Some(cell) = p1 {
            let digit = arena.value(cell);
            debug_assert!(digit < 10, "digit chains carry one decimal digit per cell");
            sum += digit;
            p1 = arena.next(cell);
        }
        if let Some(cell) = p2 {
            let digit = arena.value(cell);
            debug_assert!(digit < 10, "digit chains carry one decimal digit per cell");
            sum += digit;
            p2 = arena.next(cell);
        }
        carry = sum / 10;

        let cell = arena.alloc(sum % 10);
        match &mut out {
            Some((_, tail)) => {
                arena.set_next(*tail, Some(cell));
                *tail = cell;
            }
            None => out = Some((cell, cell)),
        }
    }

    out.map(|(head, _)| head)
}
