//! Stateful scheduler facade.
//!
//! Holds the active policy and a caller-seeded random source between calls.
//! Apart from the random source's position it keeps no state: each call
//! reads one snapshot and returns one schedule.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::engine::AssignmentEngine;
use super::summary::SnapshotSummary;
use crate::config::SchedulerConfig;
use crate::dispatching::Policy;
use crate::error::Result;
use crate::models::Schedule;
use crate::platform::Platform;
use crate::snapshot::Snapshot;

/// Rolling-horizon scheduler.
///
/// # Example
///
/// ```
/// use dfjsp::models::{MachineStatus, Order, RoutingEntry};
/// use dfjsp::platform::StaticPlatform;
/// use dfjsp::{Policy, Scheduler};
///
/// let platform = StaticPlatform::new()
///     .with_orders(vec![Order::new("1", "0", 0.0, 50.0)])
///     .with_machines(vec![MachineStatus::idle("M1")])
///     .with_routing(vec![RoutingEntry::new("0", "0", "M1", 4.0)])
///     .with_time(2.0);
///
/// let mut scheduler = Scheduler::new(Policy::Fifo);
/// let schedule = scheduler.generate_from_platform(&platform).unwrap();
/// assert_eq!(schedule.entries[0].task_id, "1-0");
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    policy: Policy,
    rng: StdRng,
}

impl Scheduler {
    /// Creates a scheduler with seed 0.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Creates a scheduler from configuration.
    ///
    /// # Errors
    /// [`ScheduleError::PolicyMisconfiguration`](crate::ScheduleError::PolicyMisconfiguration)
    /// on an unknown policy name.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self> {
        Ok(Self::new(config.policy()?).with_seed(config.seed))
    }

    /// Reseeds the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Selects the policy for subsequent calls.
    pub fn set_policy(&mut self, policy: Policy) {
        tracing::debug!(from = %self.policy, to = %policy, "dispatch policy changed");
        self.policy = policy;
    }

    /// Selects the policy by name.
    ///
    /// # Errors
    /// [`ScheduleError::PolicyMisconfiguration`](crate::ScheduleError::PolicyMisconfiguration)
    /// on an unknown name; the active policy is left unchanged.
    pub fn set_policy_by_name(&mut self, name: &str) -> Result<()> {
        let policy = name.parse()?;
        self.set_policy(policy);
        Ok(())
    }

    /// The active policy.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Generates the schedule for a validated snapshot.
    pub fn generate_schedule(&mut self, snapshot: &Snapshot) -> Schedule {
        AssignmentEngine::new(self.policy).schedule(snapshot, &mut self.rng)
    }

    /// Captures a snapshot from the platform and schedules it.
    ///
    /// # Errors
    /// [`ScheduleError::InconsistentSnapshot`](crate::ScheduleError::InconsistentSnapshot)
    /// when the platform tables are structurally invalid. No schedule is
    /// produced in that case.
    pub fn generate_from_platform<P: Platform + ?Sized>(&mut self, platform: &P) -> Result<Schedule> {
        let snapshot = Snapshot::capture(platform)?;
        Ok(self.generate_schedule(&snapshot))
    }

    /// Status summary of the platform's current state.
    pub fn platform_summary<P: Platform + ?Sized>(&self, platform: &P) -> Result<SnapshotSummary> {
        Ok(SnapshotSummary::calculate(&Snapshot::capture(platform)?))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}
