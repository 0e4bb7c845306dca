//! Shop-floor domain models.
//!
//! Typed records for the tables the simulation platform reports, plus the
//! schedule the dispatcher returns. The platform's absent-value convention
//! (`None`/`""`) is mapped to `Option` once, at the snapshot boundary.
//!
//! | Model | Platform table | Meaning |
//! |-------|----------------|---------|
//! | `Order` | orders | job progressing through stages |
//! | `MachineStatus` | machine status | current occupancy |
//! | `RoutingEntry` / `RoutingTable` | MBOM | stage → machines × durations |
//! | `Schedule` | schedule output | `(task_id, machine_id, start_time)` rows |

mod ident;
mod machine;
mod order;
mod routing;
mod schedule;

pub use ident::{compare_ids, task_belongs_to, task_id, Time};
pub use machine::MachineStatus;
pub use order::Order;
pub use routing::{MachineOption, NextStage, RoutingEntry, RoutingTable, StageRoute};
pub use schedule::{RoutingGap, RoutingGapKind, Schedule, ScheduleEntry};
