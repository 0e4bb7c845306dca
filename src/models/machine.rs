//! Machine occupancy model.
//!
//! A machine is idle iff it carries no `task_id`. At most one operation
//! occupies a machine at any instant.

use serde::{Deserialize, Serialize};

use super::ident::{task_belongs_to, Time};

/// Current occupancy of one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineStatus {
    /// Unique machine identifier.
    pub machine_id: String,
    /// Task currently on the machine. `None` = idle.
    #[serde(default)]
    pub task_id: Option<String>,
    /// Start of the occupying task.
    #[serde(default)]
    pub start_time: Option<Time>,
    /// End of the occupying task.
    #[serde(default)]
    pub end_time: Option<Time>,
}

impl MachineStatus {
    /// Creates an idle machine.
    pub fn idle(machine_id: impl Into<String>) -> Self {
        Self {
            machine_id: machine_id.into(),
            task_id: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Creates a machine occupied by `task_id` over `[start_time, end_time]`.
    pub fn busy(
        machine_id: impl Into<String>,
        task_id: impl Into<String>,
        start_time: Time,
        end_time: Time,
    ) -> Self {
        Self {
            machine_id: machine_id.into(),
            task_id: Some(task_id.into()),
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.task_id.is_none()
    }

    /// Earliest time a new operation may start on this machine.
    ///
    /// Never earlier than `now`. Busy machines report their end time.
    pub fn available_from(&self, now: Time) -> Time {
        self.end_time.map_or(now, |end| end.max(now))
    }

    /// Whether the occupying task belongs to `order_id`.
    pub fn holds_order(&self, order_id: &str) -> bool {
        self.task_id
            .as_deref()
            .is_some_and(|task| task_belongs_to(task, order_id))
    }

    /// Maps the platform's `""` convention to `None`.
    pub(crate) fn normalize(&mut self) {
        if self.task_id.as_deref() == Some("") {
            self.task_id = None;
        }
    }
}
