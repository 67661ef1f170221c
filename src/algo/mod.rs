//! The transforms under observation: classic in-place linked-list algorithms
//! written against the instrumented arena.
//!
//! Each function takes the arena plus cell handles and returns the resulting
//! head (or the detected cell). All of them reuse the cells they are given;
//! the only ones that allocate are digit addition, which builds its sum list,
//! and list copying, whose entire point is a one-clone-per-cell duplicate.
//! Function docs state the access profile the compliance oracle can expect.

mod add_digits;
mod copy_aux;
mod detect_cycle;
mod flatten;
mod merge_sorted;
mod partition;
mod remove_nth;
mod reverse_groups;

pub use add_digits::add_two_numbers;
pub use copy_aux::copy_list_with_aux;
pub use detect_cycle::detect_cycle_start;
pub use flatten::flatten_multilevel;
pub use merge_sorted::merge_k_lists;
pub use partition::partition_list;
pub use remove_nth::remove_nth_from_end;
pub use reverse_groups::reverse_k_group;

use thiserror::Error;

/// Argument errors for transforms that take a count.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlgoError {
    /// A count argument that must be positive was zero.
    #[error("{what} must be at least 1")]
    ZeroCount { what: &'static str },
    /// The requested position does not exist in the list.
    #[error("position {n} from the end exceeds the list length {len}")]
    CountExceedsLength { n: usize, len: usize },
}
