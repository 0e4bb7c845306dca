//! Dispatching rules and policies.
//!
//! A dispatch policy ranks feasible `(operation, machine)` pairs and picks
//! the one to commit next. The deterministic policies are compositions of
//! scoring rules evaluated in sequence, with a final total tie-break on
//! `(order_id, machine_id)`, so the outcome never depends on input order.
//!
//! | Policy | Keys (ascending) |
//! |--------|------------------|
//! | FIFO | arrival time → order id → machine id |
//! | EDD | due date → arrival time → order id → machine id |
//! | SPT | process time → order id → machine id |
//! | Random | uniform operation, then uniform machine |
//!
//! # Usage
//!
//! ```
//! use dfjsp::dispatching::{rules, RuleEngine};
//!
//! let edd = RuleEngine::new()
//!     .with_rule(rules::DueDate)
//!     .with_rule(rules::ArrivalTime);
//! assert_eq!(edd.rule_names(), vec!["EDD", "FIFO"]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
mod policy;
pub mod rules;

pub use engine::RuleEngine;
pub use policy::{Policy, Selector};

use crate::models::{Order, Time};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A feasible dispatch: one ready operation on one idle eligible machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// Index of the operation in the engine's ready list.
    pub operation: usize,
    /// Order owning the operation.
    pub order: &'a Order,
    /// Stage the operation performs.
    pub stage: &'a str,
    /// Idle machine able to perform the stage.
    pub machine_id: &'a str,
    /// Processing time of the stage on that machine (s).
    pub process_time: Time,
    /// Earliest start on that machine (s).
    pub start_time: Time,
}

/// A dispatching rule that scores candidates.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EDD").
    fn name(&self) -> &'static str;

    /// Scores one candidate. Lower = dispatched first.
    fn evaluate(&self, candidate: &Candidate<'_>) -> RuleScore;
}
