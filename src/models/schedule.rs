//! Schedule (dispatch decision) model.
//!
//! A schedule is the set of operations dispatched in one call: each entry
//! puts one task on one machine at a start time. Orders that could not be
//! routed are reported next to the entries as routing gaps.
//!
//! # Invariants
//! - Each `machine_id` appears at most once.
//! - Each `task_id` (hence each order) appears at most once.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ident::Time;

/// Dispatch decisions for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Dispatched operations, in commit order.
    pub entries: Vec<ScheduleEntry>,
    /// Orders excluded because their routing is incomplete.
    pub routing_gaps: Vec<RoutingGap>,
}

/// One dispatched operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Task identifier `"{order_id}-{stage}"`.
    pub task_id: String,
    /// Machine the task is placed on.
    pub machine_id: String,
    /// Planned start (s).
    pub start_time: Time,
    /// Owning order (denormalized for query convenience).
    pub order_id: String,
    /// Stage of the owning order's routing.
    pub stage: String,
    /// Processing time on the chosen machine (s).
    pub process_time: Time,
}

/// An order excluded from dispatch because its next operation cannot be
/// determined or placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingGap {
    pub order_id: String,
    pub product_type: String,
    /// Stage the order needs next, when known.
    pub stage: Option<String>,
    pub kind: RoutingGapKind,
}

/// Classification of routing gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutingGapKind {
    /// The product type has no routing rows at all.
    UnknownProductType,
    /// The order's recorded stage is not a stage of its product type.
    UnknownStage,
    /// None of the stage's machines exist on the shop floor.
    NoKnownMachine,
    /// The order records a stage but no end time, so it is unknown
    /// whether that stage has finished.
    MissingEndTime,
}

impl ScheduleEntry {
    pub fn new(
        order_id: impl Into<String>,
        stage: impl Into<String>,
        machine_id: impl Into<String>,
        start_time: Time,
        process_time: Time,
    ) -> Self {
        let order_id = order_id.into();
        let stage = stage.into();
        Self {
            task_id: super::ident::task_id(&order_id, &stage),
            machine_id: machine_id.into(),
            start_time,
            order_id,
            stage,
            process_time,
        }
    }

    /// Planned completion (s).
    #[inline]
    pub fn end_time(&self) -> Time {
        self.start_time + self.process_time
    }
}

impl RoutingGap {
    pub fn new(
        order_id: impl Into<String>,
        product_type: impl Into<String>,
        stage: Option<String>,
        kind: RoutingGapKind,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product_type: product_type.into(),
            stage,
            kind,
        }
    }
}

impl fmt::Display for RoutingGapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RoutingGapKind::UnknownProductType => "product type has no routing",
            RoutingGapKind::UnknownStage => "stage not in routing",
            RoutingGapKind::NoKnownMachine => "no eligible machine on the shop floor",
            RoutingGapKind::MissingEndTime => "stage recorded without end time",
        };
        f.write_str(text)
    }
}

impl fmt::Display for RoutingGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "order {} (product {}, stage {}): {}",
            self.order_id,
            self.product_type,
            self.stage.as_deref().unwrap_or("-"),
            self.kind
        )
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    pub fn add_routing_gap(&mut self, gap: RoutingGap) {
        self.routing_gaps.push(gap);
    }

    /// Number of dispatched operations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every ready order could be routed.
    pub fn has_routing_gaps(&self) -> bool {
        !self.routing_gaps.is_empty()
    }

    /// Finds the entry for a task.
    pub fn entry_for_task(&self, task_id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.task_id == task_id)
    }

    /// Finds the entry dispatched to a machine.
    pub fn entry_for_machine(&self, machine_id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.machine_id == machine_id)
    }

    /// Finds the entry for an order.
    pub fn entry_for_order(&self, order_id: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.order_id == order_id)
    }

    /// Latest planned completion among the entries (s).
    pub fn horizon(&self) -> Option<Time> {
        self.entries
            .iter()
            .map(ScheduleEntry::end_time)
            .max_by(|a, b| a.total_cmp(b))
    }

    /// `(task_id, machine_id, start_time)` triples, the platform's output rows.
    pub fn triples(&self) -> impl Iterator<Item = (&str, &str, Time)> {
        self.entries
            .iter()
            .map(|e| (e.task_id.as_str(), e.machine_id.as_str(), e.start_time))
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule: {} assignment(s)", self.entries.len())?;
        for e in &self.entries {
            writeln!(
                f,
                "  {} -> {} @ {:.3} (+{:.3})",
                e.task_id, e.machine_id, e.start_time, e.process_time
            )?;
        }
        if !self.routing_gaps.is_empty() {
            writeln!(f, "Routing gaps: {}", self.routing_gaps.len())?;
            for gap in &self.routing_gaps {
                writeln!(f, "  {gap}")?;
            }
        }
        Ok(())
    }
}
