//! Instrumented cell arena: slotmap-backed storage for linked-node cells.
//!
//! Cells live in a [`SlotMap`] and are addressed by [`NodeId`], a newtype over
//! the slotmap key. Handles are `Copy`, stay valid while the arena lives, and
//! give cells stable identity even when links form cycles or several cells
//! point at the same target, which `Rc`-based nodes only manage with weak
//! references and `Box`-based nodes cannot express at all.
//!
//! Every link and value accessor routes through the arena's [`Ledger`]. Reads
//! record one access; writes record one access and one mutation. The untracked
//! escape hatches ([`ListArena::alloc_untracked`], [`Ledger::pause`]) exist so
//! fixtures and assertions can touch cells without skewing the counts.

use core::fmt;

use slotmap::{DefaultKey, SlotMap};

use crate::ledger::{Ledger, Op};

/// Stable, copyable identity of one cell in a [`ListArena`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(DefaultKey);

/// One linked-node cell: a value plus three optional outgoing links.
///
/// `next` carries singly- and doubly-linked chains, `prev` the backward
/// direction, and `aux` whatever the structure at hand needs (a child level,
/// a random cross-reference).
#[derive(Debug)]
struct Node<T> {
    serial: u64,
    value: T,
    next: Option<NodeId>,
    prev: Option<NodeId>,
    aux: Option<NodeId>,
}

/// Arena of instrumented cells plus the [`Ledger`] their accesses land in.
///
/// Single-threaded by design; the embedded ledger is `!Send + !Sync` and the
/// arena inherits that.
pub struct ListArena<T> {
    slots: SlotMap<DefaultKey, Node<T>>,
    ledger: Ledger,
    next_serial: u64,
}

impl<T> ListArena<T> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::new(),
            ledger: Ledger::new(),
            next_serial: 0,
        }
    }

    /// The ledger this arena records into.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Number of live cells, tracked or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.slots.contains_key(node.0)
    }

    /// The cell's serial number: the key its accesses are counted under.
    /// Reading it is metadata, not a tracked access.
    pub fn serial(&self, node: NodeId) -> u64 {
        self.node(node).serial
    }

    /// Allocate a cell with no links and count it in the ledger. Creation
    /// counting ignores [`Ledger::pause`]; structure built for a fixture
    /// should use [`ListArena::alloc_untracked`].
    pub fn alloc(&mut self, value: T) -> NodeId {
        let id = self.alloc_untracked(value);
        self.ledger.record_creation();
        id
    }

    /// Allocate a cell without touching the creation tally.
    pub fn alloc_untracked(&mut self, value: T) -> NodeId {
        let serial = self.next_serial;
        self.next_serial += 1;
        NodeId(self.slots.insert(Node {
            serial,
            value,
            next: None,
            prev: None,
            aux: None,
        }))
    }

    /// Untracked iteration over all live cells, in arbitrary order. Yields
    /// each cell's handle, its serial, and its value.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, u64, &T)> {
        self.slots
            .iter()
            .map(|(key, cell)| (NodeId(key), cell.serial, &cell.value))
    }

    fn node(&self, node: NodeId) -> &Node<T> {
        self.slots
            .get(node.0)
            .expect("NodeId is stale or belongs to another arena")
    }
}

/// Tracked accessors. Values must be `Clone` so reads can hand them out by
/// value, and `Display` so they render into the event log.
impl<T: Clone + fmt::Display> ListArena<T> {
    /// Read the cell's value. Records one access.
    pub fn value(&self, node: NodeId) -> T {
        let cell = self.node(node);
        self.ledger.record_access(cell.serial, Op::ReadValue, &cell.value);
        cell.value.clone()
    }

    /// Read the cell's forward link. Records one access.
    pub fn next(&self, node: NodeId) -> Option<NodeId> {
        let cell = self.node(node);
        self.ledger.record_access(cell.serial, Op::ReadNext, &cell.value);
        cell.next
    }

    /// Read the cell's backward link. Records one access.
    pub fn prev(&self, node: NodeId) -> Option<NodeId> {
        let cell = self.node(node);
        self.ledger.record_access(cell.serial, Op::ReadPrev, &cell.value);
        cell.prev
    }

    /// Read the cell's auxiliary link. Records one access.
    pub fn aux(&self, node: NodeId) -> Option<NodeId> {
        let cell = self.node(node);
        self.ledger.record_access(cell.serial, Op::ReadAux, &cell.value);
        cell.aux
    }

    /// Overwrite the cell's value. Records one access and one mutation; the
    /// event line carries the new value.
    pub fn set_value(&mut self, node: NodeId, value: T) {
        let cell = self
            .slots
            .get_mut(node.0)
            .expect("NodeId is stale or belongs to another arena");
        cell.value = value;
        self.ledger
            .record_access(cell.serial, Op::WriteValue, &cell.value);
        self.ledger.record_mutation();
    }

    /// Redirect the cell's forward link. Records one access and one mutation.
    pub fn set_next(&mut self, node: NodeId, target: Option<NodeId>) {
        let cell = self
            .slots
            .get_mut(node.0)
            .expect("NodeId is stale or belongs to another arena");
        cell.next = target;
        self.ledger
            .record_access(cell.serial, Op::WriteNext, &cell.value);
        self.ledger.record_mutation();
    }

    /// Redirect the cell's backward link. Records one access and one mutation.
    pub fn set_prev(&mut self, node: NodeId, target: Option<NodeId>) {
        let cell = self
            .slots
            .get_mut(node.0)
            .expect("NodeId is stale or belongs to another arena");
        cell.prev = target;
        self.ledger
            .record_access(cell.serial, Op::WritePrev, &cell.value);
        self.ledger.record_mutation();
    }

    /// Redirect the cell's auxiliary link. Records one access and one mutation.
    pub fn set_aux(&mut self, node: NodeId, target: Option<NodeId>) {
        let cell = self
            .slots
            .get_mut(node.0)
            .expect("NodeId is stale or belongs to another arena");
        cell.aux = target;
        self.ledger
            .record_access(cell.serial, Op::WriteAux, &cell.value);
        self.ledger.record_mutation();
    }
}

/// Untracked link wiring for fixture construction. [`Ledger::pause`] cannot
/// cover these: the guard holds a shared borrow of the arena, and setters
/// need `&mut self`.
impl<T> ListArena<T> {
    /// Set the forward link, recording nothing.
    pub fn set_next_untracked(&mut self, node: NodeId, target: Option<NodeId>) {
        self.node_mut(node).next = target;
    }

    /// Set the backward link, recording nothing.
    pub fn set_prev_untracked(&mut self, node: NodeId, target: Option<NodeId>) {
        self.node_mut(node).prev = target;
    }

    /// Set the auxiliary link, recording nothing.
    pub fn set_aux_untracked(&mut self, node: NodeId, target: Option<NodeId>) {
        self.node_mut(node).aux = target;
    }

    fn node_mut(&mut self, node: NodeId) -> &mut Node<T> {
        self.slots
            .get_mut(node.0)
            .expect("NodeId is stale or belongs to another arena")
    }
}

impl<T> Default for ListArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
