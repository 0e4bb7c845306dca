//! Platform boundary.
//!
//! The simulation platform owns time and the live shop-floor tables. The
//! dispatcher only reads them, one coherent cut per call, and hands back
//! decisions the platform is responsible for applying.

use serde::{Deserialize, Serialize};

use crate::models::{MachineStatus, Order, RoutingEntry, Time};

/// Read-only source of shop-floor state.
pub trait Platform {
    /// Arrived orders that are not finished yet.
    fn orders(&self) -> Vec<Order>;

    /// Occupancy of every machine.
    fn machine_status(&self) -> Vec<MachineStatus>;

    /// MBOM rows.
    fn routing_table(&self) -> Vec<RoutingEntry>;

    /// Simulation time (s), non-decreasing across calls.
    fn current_time(&self) -> Time;
}

/// In-memory platform holding tables set by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPlatform {
    pub orders: Vec<Order>,
    pub machines: Vec<MachineStatus>,
    pub routing: Vec<RoutingEntry>,
    pub current_time: Time,
}

impl StaticPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    pub fn set_machine_status(&mut self, machines: Vec<MachineStatus>) {
        self.machines = machines;
    }

    pub fn set_routing_table(&mut self, routing: Vec<RoutingEntry>) {
        self.routing = routing;
    }

    pub fn set_current_time(&mut self, time: Time) {
        self.current_time = time;
    }

    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    pub fn with_machines(mut self, machines: Vec<MachineStatus>) -> Self {
        self.machines = machines;
        self
    }

    pub fn with_routing(mut self, routing: Vec<RoutingEntry>) -> Self {
        self.routing = routing;
        self
    }

    pub fn with_time(mut self, time: Time) -> Self {
        self.current_time = time;
        self
    }
}

impl Platform for StaticPlatform {
    fn orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    fn machine_status(&self) -> Vec<MachineStatus> {
        self.machines.clone()
    }

    fn routing_table(&self) -> Vec<RoutingEntry> {
        self.routing.clone()
    }

    fn current_time(&self) -> Time {
        self.current_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    #[test]
    fn test_static_platform_setters() {
        let mut platform = StaticPlatform::new();
        platform.set_orders(vec![Order::new("1", "0", 0.0, 10.0)]);
        platform.set_machine_status(vec![MachineStatus::idle("M1")]);
        platform.set_routing_table(vec![RoutingEntry::new("0", "0", "M1", 2.0)]);
        platform.set_current_time(3.5);

        let snapshot = Snapshot::capture(&platform).unwrap();
        assert_eq!(snapshot.orders().len(), 1);
        assert_eq!(snapshot.machines().len(), 1);
        assert_eq!(snapshot.now(), 3.5);
    }

    #[test]
    fn test_platform_tables_from_json() {
        let json = r#"{
            "orders": [{"order_id": "1", "product_type": "0", "arrival_time": 0.0, "due_date": 50.0}],
            "machines": [{"machine_id": "M1", "task_id": null}],
            "routing": [{"product_type": "0", "stage": "0", "machine_id": "M1", "process_time(s)": 8.0}],
            "current_time": 1.0
        }"#;
        let platform: StaticPlatform = serde_json::from_str(json).unwrap();
        let snapshot = Snapshot::capture(&platform).unwrap();
        assert_eq!(snapshot.routing().process_time("0", "0", "M1"), Some(8.0));
    }
}
