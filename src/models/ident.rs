//! Identifier helpers.
//!
//! The platform reports every key (order, product type, stage, machine) as a
//! string, and most of them are decimal numbers (`"0"`, `"1"`, ... `"10"`).
//! Plain lexicographic ordering would put `"10"` before `"9"`, so every
//! place that orders identifiers goes through [`compare_ids`].

use std::cmp::Ordering;

/// Time in simulation seconds since the platform's epoch.
pub type Time = f64;

/// Natural total order over identifiers.
///
/// - Both numeric: compared as integers, then lexicographically
///   (so `"01"` and `"1"` still have a defined order).
/// - Numeric ids sort before non-numeric ones.
/// - Both non-numeric: lexicographic.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Builds the task identifier `"{order_id}-{stage}"`.
#[inline]
pub fn task_id(order_id: &str, stage: &str) -> String {
    format!("{order_id}-{stage}")
}

/// Whether a task id belongs to the given order.
///
/// Stage ids never contain `-`, so the order id is everything before the
/// last separator.
pub fn task_belongs_to(task_id: &str, order_id: &str) -> bool {
    task_id
        .rsplit_once('-')
        .is_some_and(|(owner, _)| owner == order_id)
}
