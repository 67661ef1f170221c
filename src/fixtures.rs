//! Fixture builders and read-back helpers.
//!
//! Builders assemble test shapes out of untracked allocations and untracked
//! link wiring, then reset the ledger on their way out, so an algorithm
//! always starts its graded run from zeroed counts. Read-back helpers pause
//! the ledger while they walk: assertions about the result must not disturb
//! the counts the run under test produced.

use core::fmt;

use hashbrown::HashMap;

use crate::arena::{ListArena, NodeId};

/// One item of a multilevel fixture: a value plus an optional child level
/// hung off the cell's auxiliary link.
pub struct MultilevelItem<T> {
    value: T,
    children: Vec<MultilevelItem<T>>,
}

/// An item with no child level.
pub fn leaf<T>(value: T) -> MultilevelItem<T> {
    MultilevelItem {
        value,
        children: Vec::new(),
    }
}

/// An item whose auxiliary link points at a child level.
pub fn parent<T>(value: T, children: Vec<MultilevelItem<T>>) -> MultilevelItem<T> {
    MultilevelItem { value, children }
}

/// Build a singly linked chain. Returns the head, `None` for no values.
pub fn build_list<T: Clone>(arena: &mut ListArena<T>, values: &[T]) -> Option<NodeId> {
    let mut head = None;
    let mut tail: Option<NodeId> = None;
    for value in values {
        let cell = arena.alloc_untracked(value.clone());
        match tail {
            Some(t) => arena.set_next_untracked(t, Some(cell)),
            None => head = Some(cell),
        }
        tail = Some(cell);
    }
    arena.ledger().reset();
    head
}

/// Build a doubly linked chain with `prev` links mirroring `next`.
pub fn build_doubly_list<T: Clone>(arena: &mut ListArena<T>, values: &[T]) -> Option<NodeId> {
    let mut head = None;
    let mut tail: Option<NodeId> = None;
    for value in values {
        let cell = arena.alloc_untracked(value.clone());
        match tail {
            Some(t) => {
                arena.set_next_untracked(t, Some(cell));
                arena.set_prev_untracked(cell, Some(t));
            }
            None => head = Some(cell),
        }
        tail = Some(cell);
    }
    arena.ledger().reset();
    head
}

/// Build a singly linked chain whose tail links back to the cell at
/// `cycle_index` (0-based), forming a cycle.
///
/// Panics if `cycle_index` is out of range, which includes any index on an
/// empty `values`.
pub fn build_with_cycle<T: Clone>(
    arena: &mut ListArena<T>,
    values: &[T],
    cycle_index: usize,
) -> Option<NodeId> {
    assert!(
        cycle_index < values.len(),
        "cycle entry {} out of range for {} values",
        cycle_index,
        values.len()
    );
    let cells: Vec<NodeId> = values
        .iter()
        .map(|value| arena.alloc_untracked(value.clone()))
        .collect();
    for pair in cells.windows(2) {
        arena.set_next_untracked(pair[0], Some(pair[1]));
    }
    let tail = *cells.last().expect("values is non-empty here");
    arena.set_next_untracked(tail, Some(cells[cycle_index]));
    arena.ledger().reset();
    Some(cells[0])
}

/// Build a singly linked chain with auxiliary cross-references. `aux[i]`
/// names the 0-based chain index cell `i` points at, `None` for no link.
/// Self-references are allowed.
pub fn build_list_with_aux<T: Clone>(
    arena: &mut ListArena<T>,
    values: &[T],
    aux: &[Option<usize>],
) -> Option<NodeId> {
    assert_eq!(
        values.len(),
        aux.len(),
        "one aux entry per value required"
    );
    let cells: Vec<NodeId> = values
        .iter()
        .map(|value| arena.alloc_untracked(value.clone()))
        .collect();
    for pair in cells.windows(2) {
        arena.set_next_untracked(pair[0], Some(pair[1]));
    }
    for (i, target) in aux.iter().enumerate() {
        if let Some(t) = *target {
            assert!(t < cells.len(), "aux target {} out of range", t);
            arena.set_aux_untracked(cells[i], Some(cells[t]));
        }
    }
    arena.ledger().reset();
    cells.first().copied()
}

/// Build a multilevel doubly linked structure: each level is a doubly linked
/// chain, and a parent's auxiliary link points at the head of its child
/// level. Child heads carry no `prev` until a flatten splices them in.
pub fn build_multilevel<T: Clone>(
    arena: &mut ListArena<T>,
    items: &[MultilevelItem<T>],
) -> Option<NodeId> {
    let head = build_level(arena, items);
    arena.ledger().reset();
    head
}

fn build_level<T: Clone>(arena: &mut ListArena<T>, items: &[MultilevelItem<T>]) -> Option<NodeId> {
    let mut head = None;
    let mut tail: Option<NodeId> = None;
    for item in items {
        let cell = arena.alloc_untracked(item.value.clone());
        match tail {
            Some(t) => {
                arena.set_next_untracked(t, Some(cell));
                arena.set_prev_untracked(cell, Some(t));
            }
            None => head = Some(cell),
        }
        if !item.children.is_empty() {
            let child_head = build_level(arena, &item.children);
            arena.set_aux_untracked(cell, child_head);
        }
        tail = Some(cell);
    }
    head
}

/// Collect values along `next` links, head first. The chain must be acyclic.
/// Recording is paused for the walk.
pub fn to_sequence<T: Clone + fmt::Display>(
    arena: &ListArena<T>,
    head: Option<NodeId>,
) -> Vec<T> {
    let _pause = arena.ledger().pause();
    let mut out = Vec::new();
    let mut cur = head;
    while let Some(cell) = cur {
        out.push(arena.value(cell));
        cur = arena.next(cell);
    }
    out
}

/// Collect values tail first by walking to the end and returning along
/// `prev` links. Mirrors [`to_sequence`] reversed exactly when the chain's
/// backward links are intact.
pub fn to_sequence_rev<T: Clone + fmt::Display>(
    arena: &ListArena<T>,
    head: Option<NodeId>,
) -> Vec<T> {
    let _pause = arena.ledger().pause();
    let mut out = Vec::new();
    let Some(head) = head else {
        return out;
    };
    let mut tail = head;
    while let Some(next) = arena.next(tail) {
        tail = next;
    }
    let mut cur = Some(tail);
    while let Some(cell) = cur {
        out.push(arena.value(cell));
        cur = arena.prev(cell);
    }
    out
}

/// The cell `index` steps from `head`, or `None` if the chain is shorter.
/// Recording is paused for the walk.
pub fn nth_node<T: Clone + fmt::Display>(
    arena: &ListArena<T>,
    head: Option<NodeId>,
    index: usize,
) -> Option<NodeId> {
    let _pause = arena.ledger().pause();
    let mut cur = head;
    for _ in 0..index {
        cur = arena.next(cur?);
    }
    cur
}

/// The last cell of an acyclic chain. Recording is paused for the walk.
pub fn tail_of<T: Clone + fmt::Display>(
    arena: &ListArena<T>,
    head: Option<NodeId>,
) -> Option<NodeId> {
    let _pause = arena.ledger().pause();
    let mut tail = head?;
    while let Some(next) = arena.next(tail) {
        tail = next;
    }
    Some(tail)
}

/// Auxiliary topology of a chain: for each cell in `next` order, the chain
/// index its aux link points at, or `None` when there is no aux link or the
/// target is outside the chain. Two chains with equal snapshots have the
/// same aux shape. Recording is paused for the walk.
pub fn aux_snapshot<T: Clone + fmt::Display>(
    arena: &ListArena<T>,
    head: Option<NodeId>,
) -> Vec<Option<usize>> {
    let _pause = arena.ledger().pause();
    let mut order = Vec::new();
    let mut cur = head;
    while let Some(cell) = cur {
        order.push(cell);
        cur = arena.next(cell);
    }
    let index: HashMap<NodeId, usize> = order
        .iter()
        .copied()
        .enumerate()
        .map(|(i, cell)| (cell, i))
        .collect();
    order
        .iter()
        .map(|&cell| arena.aux(cell).and_then(|t| index.get(&t).copied()))
        .collect()
}
