//! Immutable state snapshot.
//!
//! A snapshot is one coherent cut of the shop floor: orders, machine
//! occupancy, routing and the current time. It is validated once when it
//! is built; everything downstream reads it without re-checking.

use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::models::{MachineStatus, Order, RoutingEntry, RoutingTable, Time};
use crate::platform::Platform;
use crate::validation::validate_snapshot;

/// A validated, read-only view of the shop floor at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    orders: Vec<Order>,
    machines: Vec<MachineStatus>,
    routing: RoutingTable,
    now: Time,
}

impl Snapshot {
    /// Builds a snapshot from the platform's tables.
    ///
    /// Empty strings are mapped to absent values, identical duplicate
    /// machine rows are collapsed, and the result is validated.
    ///
    /// # Errors
    /// [`ScheduleError::InconsistentSnapshot`] with every detected issue.
    pub fn new(
        mut orders: Vec<Order>,
        mut machines: Vec<MachineStatus>,
        routing: Vec<RoutingEntry>,
        now: Time,
    ) -> Result<Self> {
        orders.iter_mut().for_each(Order::normalize);
        machines.iter_mut().for_each(MachineStatus::normalize);

        if let Err(errors) = validate_snapshot(&orders, &machines, &routing, now) {
            tracing::error!(issues = errors.len(), "rejecting inconsistent snapshot");
            return Err(ScheduleError::InconsistentSnapshot(errors));
        }

        if let Some(rate) = orders.first().map(|o| o.fulfillment_rate) {
            if !(0.0..=1.0).contains(&rate) {
                tracing::warn!(rate, "fulfillment rate outside [0, 1]");
            }
        }

        let mut seen = std::collections::HashSet::new();
        machines.retain(|m| seen.insert(m.machine_id.clone()));

        Ok(Self {
            orders,
            machines,
            routing: RoutingTable::from_entries(&routing),
            now,
        })
    }

    /// Captures a snapshot from a platform.
    pub fn capture<P: Platform + ?Sized>(platform: &P) -> Result<Self> {
        Self::new(
            platform.orders(),
            platform.machine_status(),
            platform.routing_table(),
            platform.current_time(),
        )
    }

    /// Orders in platform order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Machines, one row per machine id.
    pub fn machines(&self) -> &[MachineStatus] {
        &self.machines
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    /// Snapshot time (s).
    pub fn now(&self) -> Time {
        self.now
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.order_id == order_id)
    }

    pub fn machine(&self, machine_id: &str) -> Option<&MachineStatus> {
        self.machines.iter().find(|m| m.machine_id == machine_id)
    }

    /// Idle machines.
    pub fn idle_machines(&self) -> impl Iterator<Item = &MachineStatus> {
        self.machines.iter().filter(|m| m.is_idle())
    }

    /// System-wide fulfillment rate, taken from the first order row and
    /// clamped to `[0, 1]`.
    ///
    /// Returns `None` when there are no orders to carry it or the value is
    /// not a number.
    pub fn fulfillment_rate(&self) -> Option<f64> {
        self.orders
            .first()
            .map(|o| o.fulfillment_rate)
            .filter(|rate| !rate.is_nan())
            .map(|rate| rate.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_normalizes_and_dedups() {
        let mut order = Order::new("1", "0", 0.0, 10.0);
        order.current_stage = Some(String::new());
        let mut idle = MachineStatus::idle("M2");
        idle.task_id = Some(String::new());

        let snapshot = Snapshot::new(
            vec![order],
            vec![MachineStatus::idle("M1"), MachineStatus::idle("M1"), idle],
            vec![RoutingEntry::new("0", "0", "M1", 3.0)],
            2.0,
        )
        .unwrap();

        assert!(snapshot.order("1").unwrap().is_unstarted());
        assert_eq!(snapshot.machines().len(), 2);
        assert_eq!(snapshot.idle_machines().count(), 2);
        assert!(snapshot.routing().has_product("0"));
        assert_eq!(snapshot.now(), 2.0);
    }

    #[test]
    fn test_snapshot_rejects_invalid_input() {
        let err = Snapshot::new(vec![], vec![], vec![], f64::NAN).unwrap_err();
        assert!(matches!(err, ScheduleError::InconsistentSnapshot(_)));
    }

    #[test]
    fn test_fulfillment_rate() {
        let snapshot = Snapshot::new(
            vec![Order::new("1", "0", 0.0, 10.0).with_fulfillment_rate(0.4)],
            vec![],
            vec![],
            0.0,
        )
        .unwrap();
        assert_eq!(snapshot.fulfillment_rate(), Some(0.4));

        let empty = Snapshot::new(vec![], vec![], vec![], 0.0).unwrap();
        assert!(empty.fulfillment_rate().is_none());
    }

    #[test]
    fn test_out_of_range_fulfillment_rate_is_clamped() {
        let over = Snapshot::new(
            vec![Order::new("1", "0", 0.0, 10.0).with_fulfillment_rate(1.0000001)],
            vec![],
            vec![],
            0.0,
        )
        .unwrap();
        assert_eq!(over.fulfillment_rate(), Some(1.0));

        let negative = Snapshot::new(
            vec![Order::new("1", "0", 0.0, 10.0).with_fulfillment_rate(-3.0)],
            vec![],
            vec![],
            0.0,
        )
        .unwrap();
        assert_eq!(negative.fulfillment_rate(), Some(0.0));

        let nan = Snapshot::new(
            vec![Order::new("1", "0", 0.0, 10.0).with_fulfillment_rate(f64::NAN)],
            vec![],
            vec![],
            0.0,
        )
        .unwrap();
        assert!(nan.fulfillment_rate().is_none());
    }
}
