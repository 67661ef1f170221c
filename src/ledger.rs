//! Observation ledger: per-cell access counts, the mutation tally, and the
//! event log.
//!
//! Every tracked read or write of a cell flows through [`Ledger::record_access`],
//! which bumps the cell's access count and appends a formatted event line.
//! Link and value writes additionally call [`Ledger::record_mutation`]. The
//! ledger lives inside the arena and is updated through `&self`, so counters
//! use `Cell` and the collections use `RefCell`.
//!
//! Tracking can be suspended (see [`Ledger::pause`]) so fixture construction
//! and read-back helpers do not pollute the counts they exist to verify.
//! Cell creations are the exception: [`Ledger::record_creation`] ignores the
//! tracking flag, and construction that must stay invisible goes through the
//! arena's untracked allocator instead.

use core::cell::{Cell, RefCell};
use core::fmt;

use hashbrown::HashMap;

use crate::reentrancy::DebugReentrancy;

/// The eight tracked cell operations.
///
/// `Read*` ops bump the access count only. `Write*` ops are also counted into
/// the ledger's mutation tally by the arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Op {
    ReadValue,
    ReadNext,
    ReadPrev,
    ReadAux,
    WriteValue,
    WriteNext,
    WritePrev,
    WriteAux,
}

impl Op {
    /// The event-log spelling of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::ReadValue => "read_value",
            Op::ReadNext => "read_next",
            Op::ReadPrev => "read_prev",
            Op::ReadAux => "read_aux",
            Op::WriteValue => "write_value",
            Op::WriteNext => "write_next",
            Op::WritePrev => "write_prev",
            Op::WriteAux => "write_aux",
        }
    }

    /// True for the four mutating operations.
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Op::WriteValue | Op::WriteNext | Op::WritePrev | Op::WriteAux
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated observations for one arena.
///
/// Counts are keyed by cell serial number, not by handle, so they survive the
/// cell outliving or re-entering lists and read naturally in the event log.
#[derive(Debug)]
pub struct Ledger {
    cells_created: Cell<u64>,
    link_mutations: Cell<u64>,
    access_counts: RefCell<HashMap<u64, u64>>,
    events: RefCell<Vec<String>>,
    tracking: Cell<bool>,
    reentrancy: DebugReentrancy,
}

impl Ledger {
    /// A fresh ledger with tracking enabled.
    pub fn new() -> Self {
        Self {
            cells_created: Cell::new(0),
            link_mutations: Cell::new(0),
            access_counts: RefCell::new(HashMap::new()),
            events: RefCell::new(Vec::new()),
            tracking: Cell::new(true),
            reentrancy: DebugReentrancy::new(),
        }
    }

    /// Record one access to the cell with the given serial, appending an
    /// event line of the form
    /// `read_next on cell[3]=7 (access #2)`.
    ///
    /// Returns the cell's access count after recording. When tracking is
    /// suspended this is a no-op and the current count is returned unchanged.
    pub fn record_access(&self, serial: u64, op: Op, value: impl fmt::Display) -> u64 {
        if !self.tracking.get() {
            return self.access_count(serial);
        }
        // Formatting `value` runs user code mid-record; the guard turns a
        // callback into a loud debug panic. Neither RefCell is held while
        // formatting, so a release build merely interleaves log lines.
        let _g = self.reentrancy.enter();
        let count = {
            let mut counts = self.access_counts.borrow_mut();
            let slot = counts.entry(serial).or_insert(0);
            *slot += 1;
            *slot
        };
        let line = format!("{} on cell[{}]={} (access #{})", op, serial, value, count);
        self.events.borrow_mut().push(line);
        count
    }

    /// Record one pointer or value mutation. No-op while tracking is
    /// suspended.
    pub fn record_mutation(&self) {
        if !self.tracking.get() {
            return;
        }
        self.link_mutations.set(self.link_mutations.get() + 1);
    }

    /// Record one cell creation. Deliberately independent of the tracking
    /// flag; untracked construction must use the arena's untracked allocator.
    pub fn record_creation(&self) {
        self.cells_created.set(self.cells_created.get() + 1);
    }

    /// Highest access count over all cells, or 0 if nothing was recorded.
    pub fn max_access_count(&self) -> u64 {
        self.hottest_cell().map_or(0, |(_, count)| count)
    }

    /// The most-accessed cell as `(serial, count)`, smallest serial on ties,
    /// or `None` if nothing was recorded.
    pub fn hottest_cell(&self) -> Option<(u64, u64)> {
        self.access_counts
            .borrow()
            .iter()
            .map(|(&serial, &count)| (serial, count))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
    }

    /// Access count for one cell serial, 0 if never touched.
    pub fn access_count(&self, serial: u64) -> u64 {
        self.access_counts
            .borrow()
            .get(&serial)
            .copied()
            .unwrap_or(0)
    }

    /// Total cells allocated through the tracked allocator.
    pub fn total_cells_created(&self) -> u64 {
        self.cells_created.get()
    }

    /// Total write operations recorded.
    pub fn total_link_mutations(&self) -> u64 {
        self.link_mutations.get()
    }

    /// A copy of the event log, oldest first.
    pub fn event_log(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Whether accesses are currently being recorded.
    pub fn is_tracking(&self) -> bool {
        self.tracking.get()
    }

    /// Enable or disable recording. Prefer [`Ledger::pause`] for scoped
    /// suspension.
    pub fn set_tracking(&self, on: bool) {
        self.tracking.set(on);
    }

    /// Suspend recording until the returned guard drops. Nesting is fine;
    /// each guard restores the flag it saw.
    pub fn pause(&self) -> TrackingPause<'_> {
        let was_tracking = self.tracking.replace(false);
        TrackingPause {
            ledger: self,
            was_tracking,
        }
    }

    /// Clear all counts, the mutation and creation tallies, and the event
    /// log, and re-enable tracking.
    pub fn reset(&self) {
        self.cells_created.set(0);
        self.link_mutations.set(0);
        self.access_counts.borrow_mut().clear();
        self.events.borrow_mut().clear();
        self.tracking.set(true);
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`Ledger::pause`]; restores the previous tracking
/// state on drop.
pub struct TrackingPause<'a> {
    ledger: &'a Ledger,
    was_tracking: bool,
}

impl<'a> Drop for TrackingPause<'a> {
    fn drop(&mut self) {
        self.ledger.tracking.set(self.was_tracking);
    }
}
