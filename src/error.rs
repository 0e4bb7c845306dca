//! Error types.
//!
//! Only call-fatal conditions are errors. Orders that cannot be routed are
//! not errors: they come back as [`RoutingGap`](crate::models::RoutingGap)
//! entries next to the schedule.

use crate::validation::ValidationError;

/// Fatal dispatcher errors.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The snapshot is structurally invalid; no schedule is produced.
    #[error("inconsistent snapshot ({} issue(s)): {}", .0.len(), join_messages(.0))]
    InconsistentSnapshot(Vec<ValidationError>),

    /// An unknown dispatch policy was requested.
    #[error("unknown dispatch policy '{0}' (expected fifo, edd, spt or random)")]
    PolicyMisconfiguration(String),

    /// The scheduler configuration could not be parsed.
    #[error("invalid scheduler configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl ScheduleError {
    /// Validation issues carried by an `InconsistentSnapshot` error.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ScheduleError::InconsistentSnapshot(errors) => errors,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
