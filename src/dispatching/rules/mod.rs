//! Built-in dispatching rules.
//!
//! - **Queue**: arrival time (FIFO)
//! - **Due-date**: due date (EDD)
//! - **Time-based**: processing time (SPT)
//!
//! # Score Convention
//! All rules return lower scores for higher priority candidates.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{Candidate, DispatchingRule, RuleScore};

/// First In First Out.
///
/// Prioritizes operations of orders that arrived earlier.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalTime;

impl DispatchingRule for ArrivalTime {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.order.arrival_time
    }
}

/// Earliest Due Date.
///
/// Prioritizes operations of orders that are due earlier.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct DueDate;

impl DispatchingRule for DueDate {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.order.due_date
    }
}

/// Shortest Processing Time.
///
/// Scores the operation's duration on the candidate machine, so the same
/// operation ranks differently on a fast and a slow machine.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct ProcessTime;

impl DispatchingRule for ProcessTime {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore {
        candidate.process_time
    }
}
