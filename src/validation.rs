//! Snapshot validation.
//!
//! Checks structural integrity of the platform tables once, before any
//! dispatching. Detects:
//! - Duplicate order IDs and malformed identifiers
//! - Machines reported twice with conflicting occupancy
//! - A task occupying two machines at once
//! - Negative, NaN or infinite time values
//! - Inverted intervals (`start > end`, `arrival > due`)
//! - Invalid processing times
//!
//! Every issue is collected, so the caller sees the whole picture at once.
//! Problems confined to one order (a product type missing from the routing
//! table, a stage recorded without an end time) are *not* structural: they
//! are reported as routing gaps and the rest of the floor is still
//! dispatched. The fulfillment rate is a reporting figure and is not checked.

use std::collections::{HashMap, HashSet};

use crate::models::{MachineStatus, Order, RoutingEntry, Time};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two orders share the same ID.
    DuplicateId,
    /// An identifier is empty, or a stage id contains the task separator `-`.
    MalformedId,
    /// A machine is reported twice with different occupancy, or one task
    /// occupies two machines.
    ConflictingOccupancy,
    /// A time value is negative, NaN or infinite.
    InvalidTime,
    /// An interval ends before it starts.
    InvertedInterval,
    /// A routing row has an unusable processing time.
    InvalidProcessTime,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

#[inline]
fn is_valid_time(t: Time) -> bool {
    t.is_finite() && t >= 0.0
}

/// Validates the tables of one snapshot.
///
/// Checks:
/// 1. The snapshot time is a valid time
/// 2. Orders: unique non-empty IDs, valid times, `arrival <= due`,
///    `start <= end`
/// 3. Machines: non-empty IDs, duplicates agree, valid times,
///    no task on two machines
/// 4. Routing rows: non-empty keys, stage ids without `-`, valid process times
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(
    orders: &[Order],
    machines: &[MachineStatus],
    routing: &[RoutingEntry],
    now: Time,
) -> ValidationResult {
    let mut errors = Vec::new();

    if !is_valid_time(now) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTime,
            format!("Snapshot time {now} is not a valid time"),
        ));
    }

    validate_orders(orders, &mut errors);
    validate_machines(machines, &mut errors);
    validate_routing(routing, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_orders(orders: &[Order], errors: &mut Vec<ValidationError>) {
    let mut order_ids = HashSet::new();

    for order in orders {
        let id = &order.order_id;
        if id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedId,
                "Order with empty ID",
            ));
        } else if !order_ids.insert(id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate order ID: {id}"),
            ));
        }

        if order.product_type.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedId,
                format!("Order '{id}' has an empty product type"),
            ));
        }

        let times = [
            ("arrival_time", Some(order.arrival_time)),
            ("due_date", Some(order.due_date)),
            ("start_time", order.start_time),
            ("end_time", order.end_time),
        ];
        let mut times_ok = true;
        for (field, value) in times {
            if let Some(t) = value {
                if !is_valid_time(t) {
                    times_ok = false;
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidTime,
                        format!("Order '{id}' has invalid {field}: {t}"),
                    ));
                }
            }
        }

        if times_ok {
            if order.arrival_time > order.due_date {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedInterval,
                    format!(
                        "Order '{id}' is due ({}) before it arrives ({})",
                        order.due_date, order.arrival_time
                    ),
                ));
            }
            if let (Some(start), Some(end)) = (order.start_time, order.end_time) {
                if start > end {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvertedInterval,
                        format!("Order '{id}' operation ends ({end}) before it starts ({start})"),
                    ));
                }
            }
        }

    }
}

fn validate_machines(machines: &[MachineStatus], errors: &mut Vec<ValidationError>) {
    let mut seen: HashMap<&str, &MachineStatus> = HashMap::new();
    let mut task_owner: HashMap<&str, &str> = HashMap::new();

    for machine in machines {
        let id = machine.machine_id.as_str();
        if id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedId,
                "Machine with empty ID",
            ));
            continue;
        }

        if let Some(previous) = seen.get(id) {
            if *previous != machine {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ConflictingOccupancy,
                    format!("Machine '{id}' is reported twice with different occupancy"),
                ));
            }
            continue;
        }
        seen.insert(id, machine);

        for (field, value) in [("start_time", machine.start_time), ("end_time", machine.end_time)] {
            if let Some(t) = value {
                if !is_valid_time(t) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidTime,
                        format!("Machine '{id}' has invalid {field}: {t}"),
                    ));
                }
            }
        }
        if let (Some(start), Some(end)) = (machine.start_time, machine.end_time) {
            if start > end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedInterval,
                    format!("Machine '{id}' task ends ({end}) before it starts ({start})"),
                ));
            }
        }

        if let Some(task) = machine.task_id.as_deref() {
            if let Some(other) = task_owner.insert(task, id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ConflictingOccupancy,
                    format!("Task '{task}' occupies both '{other}' and '{id}'"),
                ));
            }
        }
    }
}

fn validate_routing(routing: &[RoutingEntry], errors: &mut Vec<ValidationError>) {
    for entry in routing {
        if entry.product_type.is_empty() || entry.stage.is_empty() || entry.machine_id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedId,
                format!(
                    "Routing row ({:?}, {:?}, {:?}) has an empty key",
                    entry.product_type, entry.stage, entry.machine_id
                ),
            ));
        } else if entry.stage.contains('-') {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedId,
                format!(
                    "Stage '{}' of product '{}' contains the task separator '-'",
                    entry.stage, entry.product_type
                ),
            ));
        }

        if !is_valid_time(entry.process_time) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProcessTime,
                format!(
                    "Routing row ({}, {}, {}) has invalid process time {}",
                    entry.product_type, entry.stage, entry.machine_id, entry.process_time
                ),
            ));
        }
    }
}
