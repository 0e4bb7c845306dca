//! Rolling-horizon dispatching.
//!
//! Each call reads one snapshot of the shop floor, resolves which orders
//! have an operation ready, and greedily commits `(operation, machine)`
//! pairs under the active policy until no idle eligible machine remains.
//!
//! # Components
//!
//! - `eligibility`: per-order readiness and candidate machines
//! - `engine`: the greedy assignment loop
//! - `dispatcher`: stateful facade holding policy and random source
//! - `summary`: snapshot status counts
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Brandimarte (1993), "Routing and scheduling in a flexible job shop by tabu search"

mod dispatcher;
mod eligibility;
mod engine;
mod summary;

pub use dispatcher::Scheduler;
pub use eligibility::{resolve, resolve_all, Eligibility, ReadyOperation};
pub use engine::{generate_schedule, AssignmentEngine};
pub use summary::SnapshotSummary;
