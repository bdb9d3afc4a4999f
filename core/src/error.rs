//! Error types for the planner core.

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::day_record::ListKind;

/// Errors that can occur while loading, editing or saving a day record.
///
/// A missing record file is not an error: the store substitutes the
/// default record instead.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Record for {date} is corrupt: {reason}")]
    CorruptRecord { date: NaiveDate, reason: String },

    #[error("Could not read record for {date}: {source}")]
    ReadFailure {
        date: NaiveDate,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write record for {date}: {source}")]
    WriteFailure {
        date: NaiveDate,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} has no item at position {index}")]
    ItemNotFound { kind: ListKind, index: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, PlannerError::CorruptRecord { .. })
    }
}

/// Result type alias for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
