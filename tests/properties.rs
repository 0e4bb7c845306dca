mod common;

use std::collections::HashSet;

use common::shop_floor_strategy;
use dfjsp::scheduler::{resolve, Eligibility};
use dfjsp::{generate_schedule, Policy};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn policy_strategy() -> impl Strategy<Value = Policy> {
    prop::sample::select(Policy::ALL.to_vec())
}

fn deterministic_policy_strategy() -> impl Strategy<Value = Policy> {
    prop::sample::select(vec![Policy::Fifo, Policy::Edd, Policy::Spt])
}

proptest! {
    /// Property: no machine, task or order appears twice in one schedule
    #[test]
    fn no_double_booking(floor in shop_floor_strategy(), policy in policy_strategy(), seed in any::<u64>()) {
        let snapshot = floor.snapshot();
        let schedule = generate_schedule(policy, &snapshot, &mut StdRng::seed_from_u64(seed));

        let mut machines = HashSet::new();
        let mut tasks = HashSet::new();
        let mut orders = HashSet::new();
        for entry in &schedule.entries {
            prop_assert!(machines.insert(entry.machine_id.as_str()), "machine {} booked twice", entry.machine_id);
            prop_assert!(tasks.insert(entry.task_id.as_str()), "task {} dispatched twice", entry.task_id);
            prop_assert!(orders.insert(entry.order_id.as_str()), "order {} dispatched twice", entry.order_id);
        }
    }

    /// Property: every assignment goes to an idle machine and starts no
    /// earlier than the snapshot time or the machine's release
    #[test]
    fn start_time_floor(floor in shop_floor_strategy(), policy in policy_strategy()) {
        let snapshot = floor.snapshot();
        let schedule = generate_schedule(policy, &snapshot, &mut StdRng::seed_from_u64(0));

        for entry in &schedule.entries {
            let machine = snapshot.machine(&entry.machine_id).expect("scheduled machine exists");
            prop_assert!(machine.is_idle());
            prop_assert!(entry.start_time >= snapshot.now());
            prop_assert_eq!(entry.start_time, machine.available_from(snapshot.now()));
        }
    }

    /// Property: each assignment is the order's next stage on a machine
    /// the routing table lists for it
    #[test]
    fn eligibility_respected(floor in shop_floor_strategy(), policy in policy_strategy()) {
        let snapshot = floor.snapshot();
        let schedule = generate_schedule(policy, &snapshot, &mut StdRng::seed_from_u64(1));

        for entry in &schedule.entries {
            let order = snapshot.order(&entry.order_id).expect("scheduled order exists");
            let ready = match resolve(order, &snapshot) {
                Ok(Eligibility::Ready(op)) => op,
                other => return Err(TestCaseError::fail(format!("order {} not ready: {other:?}", order.order_id))),
            };
            prop_assert_eq!(ready.stage, entry.stage.as_str());
            prop_assert_eq!(&ready.task_id, &entry.task_id);
            prop_assert_eq!(
                snapshot.routing().process_time(&order.product_type, &entry.stage, &entry.machine_id),
                Some(entry.process_time)
            );
        }
    }

    /// Property: orders whose current operation has not finished are never dispatched
    #[test]
    fn in_flight_orders_excluded(floor in shop_floor_strategy(), policy in policy_strategy()) {
        let snapshot = floor.snapshot();
        let schedule = generate_schedule(policy, &snapshot, &mut StdRng::seed_from_u64(2));

        for order in snapshot.orders() {
            let stalled = order.current_stage.is_some() && order.end_time.is_none();
            if stalled || order.is_running_at(snapshot.now()) || order.arrival_time > snapshot.now() {
                prop_assert!(schedule.entry_for_order(&order.order_id).is_none());
            }
        }
    }

    /// Property: when the call returns, no idle machine is left that a
    /// still-undispatched ready operation could use
    #[test]
    fn dispatch_is_maximal(floor in shop_floor_strategy(), policy in policy_strategy()) {
        let snapshot = floor.snapshot();
        let schedule = generate_schedule(policy, &snapshot, &mut StdRng::seed_from_u64(3));

        for order in snapshot.orders() {
            if schedule.entry_for_order(&order.order_id).is_some() {
                continue;
            }
            if let Ok(Eligibility::Ready(op)) = resolve(order, &snapshot) {
                for option in &op.candidates {
                    let machine = snapshot.machine(&option.machine_id).expect("candidate exists");
                    prop_assert!(
                        !machine.is_idle() || schedule.entry_for_machine(&machine.machine_id).is_some(),
                        "{} left unassigned while {} idle", op.task_id, machine.machine_id
                    );
                }
            }
        }
    }

    /// Property: deterministic policies ignore the random source and the
    /// row order of the input tables
    #[test]
    fn deterministic_policies_are_stable(
        floor in shop_floor_strategy(),
        policy in deterministic_policy_strategy(),
        a in any::<u64>(),
        b in any::<u64>(),
    ) {
        let snapshot = floor.snapshot();
        let first = generate_schedule(policy, &snapshot, &mut StdRng::seed_from_u64(a));
        let second = generate_schedule(policy, &snapshot, &mut StdRng::seed_from_u64(b));
        prop_assert_eq!(&first, &second);

        let reversed = generate_schedule(policy, &floor.reversed().snapshot(), &mut StdRng::seed_from_u64(a));
        prop_assert_eq!(first.entries, reversed.entries);
    }

    /// Property: the random policy is reproducible under a fixed seed
    #[test]
    fn random_policy_is_seeded(floor in shop_floor_strategy(), seed in any::<u64>()) {
        let snapshot = floor.snapshot();
        let first = generate_schedule(Policy::Random, &snapshot, &mut StdRng::seed_from_u64(seed));
        let second = generate_schedule(Policy::Random, &snapshot, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(first, second);
    }
}
