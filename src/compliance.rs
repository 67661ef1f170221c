//! Compliance oracle: turns ledger totals into pass/fail verdicts.
//!
//! Two properties are checked. *Single pass* holds when no cell was accessed
//! more than a small tolerance; a fixed tolerance (rather than exactly one
//! access per cell) absorbs the handful of legitimate re-touches every
//! in-place transform needs at seams, such as re-reading a splice point
//! before writing it. *Bounded space* holds when cell creations fit the
//! declared budget and the mutation tally stays under a slack multiple of
//! the expected pointer writes.
//!
//! Both verdicts are heuristics over aggregate counts. They cannot prove an
//! implementation is one-pass; they catch the common regressions, such as a
//! restart from the head or a hidden copy of the input, cheaply and with a
//! message naming the worst offender.

use core::fmt;

use crate::ledger::Ledger;

/// Highest per-cell access count that still counts as a single pass.
pub const SINGLE_PASS_TOLERANCE: u64 = 3;

/// Multiplier applied to the expected mutation count before it is enforced.
pub const MUTATION_SLACK_FACTOR: u64 = 2;

/// Thresholds for the two verdicts. [`CompliancePolicy::default`] gives the
/// standard tolerances; tests for algorithms with legitimately hotter cells
/// construct their own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompliancePolicy {
    pub single_pass_tolerance: u64,
    pub mutation_slack_factor: u64,
}

impl CompliancePolicy {
    pub const fn new(single_pass_tolerance: u64, mutation_slack_factor: u64) -> Self {
        Self {
            single_pass_tolerance,
            mutation_slack_factor,
        }
    }

    /// Single-pass verdict: no cell may exceed the access tolerance.
    pub fn single_pass(&self, ledger: &Ledger) -> Verdict {
        match ledger.hottest_cell() {
            Some((serial, count)) if count > self.single_pass_tolerance => Verdict::fail(
                "single_pass",
                format!(
                    "cell[{}] saw {} accesses, tolerance is {}",
                    serial, count, self.single_pass_tolerance
                ),
            ),
            _ => Verdict::pass("single_pass"),
        }
    }

    /// Bounded-space verdict: creations must fit `budget` and mutations must
    /// stay within the slack factor of `expected_mutations`.
    pub fn bounded_space(
        &self,
        ledger: &Ledger,
        expected_mutations: u64,
        budget: CellBudget,
    ) -> Verdict {
        let mut problems = Vec::new();

        let created = ledger.total_cells_created();
        match budget {
            CellBudget::None if created > 0 => {
                problems.push(format!("created {} cells, budget allows none", created));
            }
            CellBudget::AtMost(limit) if created > limit => {
                problems.push(format!(
                    "created {} cells, budget allows at most {}",
                    created, limit
                ));
            }
            _ => {}
        }

        let cap = expected_mutations.saturating_mul(self.mutation_slack_factor);
        let mutations = ledger.total_link_mutations();
        if mutations > cap {
            problems.push(format!(
                "recorded {} mutations, cap is {} ({}x slack over {} expected)",
                mutations, cap, self.mutation_slack_factor, expected_mutations
            ));
        }

        if problems.is_empty() {
            Verdict::pass("bounded_space")
        } else {
            Verdict::fail("bounded_space", problems.join("; "))
        }
    }
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self::new(SINGLE_PASS_TOLERANCE, MUTATION_SLACK_FACTOR)
    }
}

/// How many cell creations a run is allowed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellBudget {
    /// Strictly in-place: no cell may be created.
    None,
    /// Up to this many creations, such as one clone per input cell.
    AtMost(u64),
    /// Creations are not under test.
    Unbounded,
}

/// Outcome of one compliance check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub name: &'static str,
    pub holds: bool,
    pub violation: Option<String>,
}

impl Verdict {
    pub fn pass(name: &'static str) -> Self {
        Self {
            name,
            holds: true,
            violation: None,
        }
    }

    pub fn fail(name: &'static str, violation: String) -> Self {
        Self {
            name,
            holds: false,
            violation: Some(violation),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.holds {
            write!(f, "[PASS] {}", self.name)
        } else {
            write!(
                f,
                "[FAIL] {}: {}",
                self.name,
                self.violation.as_deref().unwrap_or("violated")
            )
        }
    }
}
