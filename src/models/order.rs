//! Order (job) model.
//!
//! An order is one unit of production work moving through the stages of
//! its product type's routing. The platform reports the *most recent*
//! operation on every row: `current_stage`, `assigned_machine`,
//! `start_time` and `end_time` keep the values of the last stage that was
//! started until the next one begins. Whether that stage is still running
//! can only be told by comparing `end_time` with the snapshot time.

use serde::{Deserialize, Serialize};

use super::ident::{task_id, Time};

/// An order as reported by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub order_id: String,
    /// Routing table key.
    pub product_type: String,
    /// When the order arrived on the shop floor.
    pub arrival_time: Time,
    /// Promised completion time.
    pub due_date: Time,
    /// Stage of the most recent operation. `None` = never started.
    #[serde(default)]
    pub current_stage: Option<String>,
    /// Machine of the most recent operation.
    #[serde(default)]
    pub assigned_machine: Option<String>,
    /// Start of the most recent operation.
    #[serde(default)]
    pub start_time: Option<Time>,
    /// End of the most recent operation.
    #[serde(default)]
    pub end_time: Option<Time>,
    /// System-wide completed/arrived ratio, repeated on every row.
    #[serde(default)]
    pub fulfillment_rate: f64,
}

impl Order {
    /// Creates an order that has not started any operation.
    pub fn new(
        order_id: impl Into<String>,
        product_type: impl Into<String>,
        arrival_time: Time,
        due_date: Time,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product_type: product_type.into(),
            arrival_time,
            due_date,
            current_stage: None,
            assigned_machine: None,
            start_time: None,
            end_time: None,
            fulfillment_rate: 0.0,
        }
    }

    /// Records the most recent operation.
    pub fn with_operation(
        mut self,
        stage: impl Into<String>,
        machine_id: impl Into<String>,
        start_time: Time,
        end_time: Time,
    ) -> Self {
        self.current_stage = Some(stage.into());
        self.assigned_machine = Some(machine_id.into());
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    /// Sets the fulfillment rate carried on this row.
    pub fn with_fulfillment_rate(mut self, rate: f64) -> Self {
        self.fulfillment_rate = rate;
        self
    }

    /// Whether no operation has ever started.
    pub fn is_unstarted(&self) -> bool {
        self.current_stage.is_none()
    }

    /// Whether the most recent operation ends after `now`.
    pub fn is_running_at(&self, now: Time) -> bool {
        self.current_stage.is_some() && self.end_time.is_some_and(|end| end > now)
    }

    /// Whether the order is past its due date at `now`.
    pub fn is_overdue_at(&self, now: Time) -> bool {
        now > self.due_date
    }

    /// Task id of the most recent operation, if any.
    pub fn current_task_id(&self) -> Option<String> {
        self.current_stage
            .as_deref()
            .map(|stage| task_id(&self.order_id, stage))
    }

    /// Maps the platform's `""` convention to `None`.
    pub(crate) fn normalize(&mut self) {
        if self.current_stage.as_deref() == Some("") {
            self.current_stage = None;
        }
        if self.assigned_machine.as_deref() == Some("") {
            self.assigned_machine = None;
        }
    }
}
