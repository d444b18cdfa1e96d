use crate::resource::Role;
use polars::prelude::PolarsError;
use std::io;
use thiserror::Error;

/// Failures local to one phase of one work item. A scheduling run records
/// these as absent assignments and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("no {role} resources in the pool")]
    NoCandidates { role: Role },

    #[error("no free block for resource {resource_id} after {attempts} attempts")]
    SearchExhausted { resource_id: String, attempts: u32 },

    #[error("all {candidates} {role} resources exhausted their availability search")]
    AllCandidatesExhausted { role: Role, candidates: usize },

    #[error("{role} effort of {effort_days} days needs no block")]
    NoEffort { role: Role, effort_days: f64 },

    #[error("{role} effort of {effort_days} days exceeds the {max} day limit")]
    EffortTooLarge {
        role: Role,
        effort_days: f64,
        max: f64,
    },

    #[error("block for resource {resource_id} runs past the last representable date")]
    DateOutOfRange { resource_id: String },
}

impl ScheduleError {
    /// True when no resource of the requested role could take the work.
    pub fn is_no_resource_available(&self) -> bool {
        matches!(
            self,
            ScheduleError::NoCandidates { .. } | ScheduleError::AllCandidatesExhausted { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("calendar requires at least one working day")]
    NoWorkingDays,
}

/// Structural problems with input data. These abort before any scheduling.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("unknown resource type '{0}' (expected DEV or TESTER)")]
    UnknownRole(String),

    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("work item {work_id} has invalid {field} {value}")]
    InvalidEffort {
        work_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type IngestResult<T> = Result<T, IngestError>;
