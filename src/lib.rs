//! traced-list: single-threaded, arena-based linked-node cells whose every
//! read and write is counted, so that classic in-place list transforms can
//! be checked against access and space budgets.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: make "one pass, O(1) extra space" a testable property instead of
//!   a code-review claim, in safe layers that can be reasoned about
//!   independently.
//! - Layers:
//!   - Ledger: observation layer; per-cell access counts, the mutation and
//!     creation tallies, and a formatted event log, all updated through
//!     `&self` via interior mutability.
//!   - ListArena<T>: structural layer; slotmap-backed cells addressed by
//!     copyable `NodeId` handles, with every value and link accessor
//!     routed through the arena's ledger.
//!   - CompliancePolicy: verdict layer; turns ledger totals into named
//!     pass/fail verdicts with a violation message.
//!   - algo: the eight transforms under observation, written to their
//!     stated budget profiles.
//!   - fixtures: untracked construction and paused read-back, so test
//!     scaffolding never pollutes the counts it asserts on.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (no atomics); the marker
//!   lives in the ledger and the arena inherits it.
//! - Handles are generational slotmap keys behind a small `NodeId` wrapper:
//!   `Copy`, stable across relinking, and safe to hold through cycles and
//!   shared targets, which is what `Rc`/`Box` node representations cannot
//!   offer without weak-pointer ceremony.
//! - Cells are never freed while the arena lives; an unlinked cell merely
//!   becomes unreachable from the chain heads.
//! - Per-cell counts are keyed by creation serial, not by handle, so event
//!   lines stay readable.
//!
//! Counting semantics
//! - A read records one access against the cell it is made on, never
//!   against the link target.
//! - A write records one access plus one mutation; the event line carries
//!   the cell's value after the operation.
//! - Creations are tallied independently of the tracking flag. Fixture
//!   construction therefore uses the untracked allocator and untracked link
//!   wiring and hands over a freshly reset ledger; `Ledger::pause` covers
//!   read-back, which needs `&self` only.
//!
//! Reentrancy policy
//! - Recording formats user values through `Display` mid-update. A `Display`
//!   impl that calls back into a tracked operation trips a debug-only
//!   reentrancy guard; release builds merely interleave event lines because
//!   no `RefCell` borrow is held while formatting.
//!
//! Notes and non-goals
//! - Verdicts are heuristic budget checks over aggregate counts, not proofs
//!   of algorithmic behavior.
//! - No timing, no metrics export, no persistence; the event log is an
//!   in-memory `Vec<String>`.
//! - Fixture builders panic on malformed shape tables; they are test
//!   scaffolding, not a validating parser.
//! - The transforms reject invalid count arguments with `AlgoError` and
//!   treat empty inputs as no-ops everywhere else.

pub mod algo;
pub mod arena;
pub mod compliance;
pub mod fixtures;
pub mod ledger;
mod reentrancy;

// Public surface
pub use algo::{
    add_two_numbers, copy_list_with_aux, detect_cycle_start, flatten_multilevel, merge_k_lists,
    partition_list, remove_nth_from_end, reverse_k_group, AlgoError,
};
pub use arena::{ListArena, NodeId};
pub use compliance::{
    CellBudget, CompliancePolicy, Verdict, MUTATION_SLACK_FACTOR, SINGLE_PASS_TOLERANCE,
};
pub use ledger::{Ledger, Op, TrackingPause};
