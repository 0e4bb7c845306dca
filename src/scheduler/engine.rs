//! Greedy assignment engine.
//!
//! # Algorithm
//!
//! 1. Resolve every order: ready operations and routing gaps.
//! 2. Collect idle machines with their availability time.
//! 3. Build the feasible pairs: each undispatched ready operation × each of
//!    its candidate machines that is still idle.
//! 4. Let the policy pick one pair; start = max(now, machine availability).
//! 5. Commit: the machine leaves the idle set, the operation leaves the
//!    ready set, the entry is appended.
//! 6. Repeat from 3 until no feasible pair remains.
//!
//! Each machine and each order is committed at most once per call.
//!
//! # Complexity
//! O(r × o × c) where r = committed entries, o = ready operations,
//! c = candidates per operation.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use std::collections::BTreeMap;

use rand::Rng;

use super::eligibility::{resolve_all, ReadyOperation};
use crate::dispatching::{Candidate, Policy};
use crate::models::{Schedule, ScheduleEntry, Time};
use crate::snapshot::Snapshot;

/// Greedy dispatcher driven by one policy.
///
/// # Example
///
/// ```
/// use dfjsp::models::{MachineStatus, Order, RoutingEntry};
/// use dfjsp::scheduler::AssignmentEngine;
/// use dfjsp::{Policy, Snapshot};
/// use rand::SeedableRng;
///
/// let snapshot = Snapshot::new(
///     vec![Order::new("1", "0", 0.0, 100.0)],
///     vec![MachineStatus::idle("M1"), MachineStatus::idle("M2")],
///     vec![
///         RoutingEntry::new("0", "0", "M1", 10.0),
///         RoutingEntry::new("0", "0", "M2", 5.0),
///     ],
///     3.0,
/// )
/// .unwrap();
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let schedule = AssignmentEngine::new(Policy::Spt).schedule(&snapshot, &mut rng);
/// assert_eq!(schedule.entries[0].machine_id, "M2");
/// assert_eq!(schedule.entries[0].start_time, 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentEngine {
    policy: Policy,
}

impl AssignmentEngine {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Dispatches ready operations onto idle machines.
    ///
    /// `rng` is only consulted by [`Policy::Random`].
    pub fn schedule<R: Rng + ?Sized>(&self, snapshot: &Snapshot, rng: &mut R) -> Schedule {
        let now = snapshot.now();
        let (ready, gaps) = resolve_all(snapshot);

        let mut schedule = Schedule::new();
        for gap in gaps {
            tracing::warn!(
                order_id = %gap.order_id,
                product_type = %gap.product_type,
                stage = gap.stage.as_deref().unwrap_or("-"),
                kind = ?gap.kind,
                "order excluded: routing gap"
            );
            schedule.add_routing_gap(gap);
        }

        // machine_id → earliest start, for machines not yet committed
        let mut idle: BTreeMap<&str, Time> = snapshot
            .idle_machines()
            .map(|m| (m.machine_id.as_str(), m.available_from(now)))
            .collect();
        let mut dispatched = vec![false; ready.len()];
        let selector = self.policy.selector();

        tracing::debug!(
            policy = %self.policy,
            ready = ready.len(),
            idle = idle.len(),
            now,
            "dispatch round started"
        );

        loop {
            let candidates = feasible_pairs(&ready, &dispatched, &idle);
            let Some(pick) = selector.select(&candidates, rng) else {
                break;
            };
            let chosen = candidates[pick];

            let entry = ScheduleEntry::new(
                chosen.order.order_id.as_str(),
                chosen.stage,
                chosen.machine_id,
                chosen.start_time,
                chosen.process_time,
            );
            tracing::debug!(
                task_id = %entry.task_id,
                machine_id = %entry.machine_id,
                start_time = entry.start_time,
                "operation dispatched"
            );

            idle.remove(chosen.machine_id);
            dispatched[chosen.operation] = true;
            schedule.add_entry(entry);
        }

        tracing::info!(
            policy = %self.policy,
            assignments = schedule.len(),
            routing_gaps = schedule.routing_gaps.len(),
            "schedule generated"
        );
        schedule
    }
}

/// Feasible `(operation, machine)` pairs, in operation then machine order.
fn feasible_pairs<'a>(
    ready: &'a [ReadyOperation<'a>],
    dispatched: &[bool],
    idle: &BTreeMap<&str, Time>,
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();
    for (i, op) in ready.iter().enumerate() {
        if dispatched[i] {
            continue;
        }
        for option in &op.candidates {
            if let Some(&available) = idle.get(option.machine_id.as_str()) {
                candidates.push(Candidate {
                    operation: i,
                    order: op.order,
                    stage: op.stage,
                    machine_id: &option.machine_id,
                    process_time: option.process_time,
                    start_time: available,
                });
            }
        }
    }
    candidates
}

/// Generates the schedule for one snapshot under `policy`.
///
/// Pure function of its inputs; `rng` only matters for [`Policy::Random`].
pub fn generate_schedule<R: Rng + ?Sized>(
    policy: Policy,
    snapshot: &Snapshot,
    rng: &mut R,
) -> Schedule {
    AssignmentEngine::new(policy).schedule(snapshot, rng)
}
