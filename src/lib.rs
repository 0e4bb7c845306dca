//! Dynamic flexible job-shop dispatcher.
//!
//! Given a snapshot of the shop floor (orders, machine status, routing
//! table, current time) produces the set of operation-to-machine
//! assignments to start now, under a selectable dispatch policy.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Order`, `MachineStatus`, `RoutingTable`,
//!   `Schedule`, `RoutingGap`
//! - **`snapshot`**: Validated, immutable view of one scheduling call
//! - **`platform`**: Source of snapshots (`Platform` trait, `StaticPlatform`)
//! - **`dispatching`**: Dispatch policies (FIFO, EDD, SPT, Random) and rules
//! - **`scheduler`**: Eligibility resolution and the greedy assignment engine
//! - **`validation`**: Structural integrity checks on snapshot tables
//! - **`config`**: TOML scheduler configuration
//!
//! # Example
//!
//! ```
//! use dfjsp::models::{MachineStatus, Order, RoutingEntry};
//! use dfjsp::{Policy, Scheduler, Snapshot};
//!
//! let snapshot = Snapshot::new(
//!     vec![Order::new("1", "0", 0.0, 40.0), Order::new("2", "0", 5.0, 20.0)],
//!     vec![MachineStatus::idle("M1")],
//!     vec![RoutingEntry::new("0", "0", "M1", 8.0)],
//!     10.0,
//! )
//! .unwrap();
//!
//! let mut scheduler = Scheduler::new(Policy::Edd);
//! let schedule = scheduler.generate_schedule(&snapshot);
//! assert_eq!(schedule.entries[0].task_id, "2-0");
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod platform;
pub mod scheduler;
pub mod snapshot;
pub mod validation;

pub use config::SchedulerConfig;
pub use dispatching::Policy;
pub use error::{Result, ScheduleError};
pub use models::{RoutingGap, RoutingGapKind, Schedule, ScheduleEntry};
pub use platform::{Platform, StaticPlatform};
pub use scheduler::{generate_schedule, Scheduler, SnapshotSummary};
pub use snapshot::Snapshot;
pub use validation::{ValidationError, ValidationErrorKind};
