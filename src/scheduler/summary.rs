//! Snapshot status summary.
//!
//! Observational view of a snapshot for diagnostics. Nothing in the
//! dispatcher depends on it.
//!
//! | Field | Definition |
//! |-------|-----------|
//! | not_started | arrived orders with no recorded stage |
//! | in_progress | orders whose current operation has not finished |
//! | ready | orders with a dispatchable next operation |
//! | stuck | orders blocked by a routing gap |
//! | overdue | orders past their due date at snapshot time |
//! | utilization | busy machines / all machines |

use std::fmt;

use super::eligibility::{resolve, Eligibility};
use crate::models::Time;
use crate::snapshot::Snapshot;

/// Counts describing one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSummary {
    /// Snapshot time (s).
    pub time: Time,
    pub order_count: usize,
    pub not_arrived: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub ready: usize,
    pub stuck: usize,
    pub complete: usize,
    pub overdue: usize,
    pub machine_count: usize,
    pub idle_machines: usize,
    pub busy_machines: usize,
    pub product_types: usize,
    pub routing_stages: usize,
    /// System-wide fulfillment rate carried on the order rows.
    pub fulfillment_rate: Option<f64>,
}

impl SnapshotSummary {
    /// Computes the summary of a snapshot.
    pub fn calculate(snapshot: &Snapshot) -> Self {
        let now = snapshot.now();
        let mut summary = Self {
            time: now,
            order_count: snapshot.orders().len(),
            not_arrived: 0,
            not_started: 0,
            in_progress: 0,
            ready: 0,
            stuck: 0,
            complete: 0,
            overdue: 0,
            machine_count: snapshot.machines().len(),
            idle_machines: snapshot.idle_machines().count(),
            busy_machines: 0,
            product_types: snapshot.routing().product_count(),
            routing_stages: snapshot.routing().stage_count(),
            fulfillment_rate: snapshot.fulfillment_rate(),
        };
        summary.busy_machines = summary.machine_count - summary.idle_machines;

        for order in snapshot.orders() {
            if order.is_overdue_at(now) {
                summary.overdue += 1;
            }
            if order.is_unstarted() && order.arrival_time <= now {
                summary.not_started += 1;
            }
            match resolve(order, snapshot) {
                Ok(Eligibility::Ready(_)) => summary.ready += 1,
                Ok(Eligibility::InProgress) => summary.in_progress += 1,
                Ok(Eligibility::NotArrived) => summary.not_arrived += 1,
                Ok(Eligibility::Complete) => summary.complete += 1,
                Err(_) => summary.stuck += 1,
            }
        }

        summary
    }

    /// Busy machines / all machines (0.0 when there are no machines).
    pub fn utilization(&self) -> f64 {
        if self.machine_count == 0 {
            0.0
        } else {
            self.busy_machines as f64 / self.machine_count as f64
        }
    }
}

impl fmt::Display for SnapshotSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Shop floor at t={:.3} ===", self.time)?;
        writeln!(
            f,
            "Orders: {} (ready {}, in progress {}, not started {}, not arrived {}, stuck {}, complete {}, overdue {})",
            self.order_count,
            self.ready,
            self.in_progress,
            self.not_started,
            self.not_arrived,
            self.stuck,
            self.complete,
            self.overdue
        )?;
        writeln!(
            f,
            "Machines: {} (idle {}, busy {}, utilization {:.1}%)",
            self.machine_count,
            self.idle_machines,
            self.busy_machines,
            self.utilization() * 100.0
        )?;
        writeln!(
            f,
            "Routing: {} product type(s), {} stage(s)",
            self.product_types, self.routing_stages
        )?;
        match self.fulfillment_rate {
            Some(rate) => writeln!(f, "Fulfillment rate: {:.1}%", rate * 100.0),
            None => writeln!(f, "Fulfillment rate: n/a"),
        }
    }
}
