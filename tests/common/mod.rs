//! Shared fixtures and proptest strategies.

#![allow(dead_code)]

use dfjsp::models::{MachineStatus, Order, RoutingEntry};
use dfjsp::Snapshot;
use proptest::prelude::*;

/// Machines present on the generated shop floor. `M5` only appears in
/// routing rows, so some stages have no known machine.
pub const MACHINES: [&str; 4] = ["M1", "M2", "M3", "M4"];

/// Raw parameters of one generated snapshot.
#[derive(Debug, Clone)]
pub struct ShopFloor {
    pub orders: Vec<Order>,
    pub machines: Vec<MachineStatus>,
    pub routing: Vec<RoutingEntry>,
    pub now: f64,
}

impl ShopFloor {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.orders.clone(),
            self.machines.clone(),
            self.routing.clone(),
            self.now,
        )
        .expect("generated snapshot is consistent")
    }

    /// Same floor with every table in reverse row order.
    pub fn reversed(&self) -> Self {
        let mut floor = self.clone();
        floor.orders.reverse();
        floor.machines.reverse();
        floor.routing.reverse();
        floor
    }
}

/// `(product, stage, machine, process_time)` routing rows.
pub fn routing_strategy() -> impl Strategy<Value = Vec<RoutingEntry>> {
    prop::collection::vec((0u8..3, 0u8..3, 1u8..=5, 1u32..20), 1..16).prop_map(|rows| {
        rows.into_iter()
            .map(|(p, s, m, t)| {
                RoutingEntry::new(p.to_string(), s.to_string(), format!("M{m}"), t as f64)
            })
            .collect()
    })
}

/// One row per machine in [`MACHINES`]: idle (optionally with a release
/// time) or busy on a task of an order that is not in the table.
fn machines_strategy() -> impl Strategy<Value = Vec<MachineStatus>> {
    prop::collection::vec((any::<bool>(), prop::option::of(0u32..80)), MACHINES.len()).prop_map(
        |rows| {
            rows.into_iter()
                .zip(MACHINES)
                .enumerate()
                .map(|(i, ((busy, end), id))| {
                    if busy {
                        MachineStatus::busy(id, format!("b{i}-0"), 0.0, 100.0)
                    } else {
                        MachineStatus {
                            end_time: end.map(f64::from),
                            ..MachineStatus::idle(id)
                        }
                    }
                })
                .collect()
        },
    )
}

/// Orders `"1"..="n"`; product `"3"` never has routing rows. Some orders
/// record a stage without an end time.
fn orders_strategy() -> impl Strategy<Value = Vec<Order>> {
    prop::collection::vec(
        (
            0u8..4,
            0u32..50,
            0u32..100,
            prop::option::of((0u8..3, prop::option::of(0u32..100))),
        ),
        0..10,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (product, arrival, slack, progress))| {
                let arrival = f64::from(arrival);
                let order = Order::new(
                    (i + 1).to_string(),
                    product.to_string(),
                    arrival,
                    arrival + f64::from(slack),
                );
                match progress {
                    Some((stage, Some(end))) => {
                        let end = f64::from(end);
                        order.with_operation(stage.to_string(), "M1", (end - 5.0).max(0.0), end)
                    }
                    Some((stage, None)) => Order {
                        end_time: None,
                        ..order.with_operation(stage.to_string(), "M1", 0.0, 0.0)
                    },
                    None => order,
                }
            })
            .collect()
    })
}

pub fn shop_floor_strategy() -> impl Strategy<Value = ShopFloor> {
    (
        orders_strategy(),
        machines_strategy(),
        routing_strategy(),
        0u32..60,
    )
        .prop_map(|(orders, machines, routing, now)| ShopFloor {
            orders,
            machines,
            routing,
            now: f64::from(now),
        })
}

/// Product `"0"`: stage `"0"` on M1 (10) or M2 (5), stage `"1"` on M3 (4).
pub fn two_stage_routing() -> Vec<RoutingEntry> {
    vec![
        RoutingEntry::new("0", "0", "M1", 10.0),
        RoutingEntry::new("0", "0", "M2", 5.0),
        RoutingEntry::new("0", "1", "M3", 4.0),
    ]
}

pub fn idle_machines(ids: &[&str]) -> Vec<MachineStatus> {
    ids.iter().map(|id| MachineStatus::idle(*id)).collect()
}
