//! Input boundary: every string encoding is normalised into typed entities
//! here, once, before the scheduling core sees it.

use crate::calendar::MAX_EFFORT_DAYS;
use crate::error::{IngestError, IngestResult};
use crate::resource::Resource;
use crate::scheduler::AssignmentResult;
use crate::work_item::WorkItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

pub mod tabular;

pub use tabular::{
    load_resources_from_csv, load_work_items_from_csv, read_resources_csv, read_work_items_csv,
    save_results_to_csv, write_results_csv,
};

/// Resources and work items as handed over by the upstream collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
}

impl PlanSnapshot {
    pub fn validate(&self) -> IngestResult<()> {
        validate_resources(&self.resources)?;
        validate_work_items(&self.work_items)
    }
}

pub fn validate_resources(resources: &[Resource]) -> IngestResult<()> {
    let mut seen_ids = HashSet::with_capacity(resources.len());
    for resource in resources {
        if resource.id.trim().is_empty() {
            return Err(IngestError::InvalidData(format!(
                "resource '{}' requires a non-empty id",
                resource.name
            )));
        }
        if !seen_ids.insert(resource.id.as_str()) {
            return Err(IngestError::InvalidData(format!(
                "duplicate resource id {}",
                resource.id
            )));
        }
    }
    Ok(())
}

/// Effort must be finite, non-negative and at most [`MAX_EFFORT_DAYS`].
pub(crate) fn effort_in_range(value: f64) -> bool {
    value.is_finite() && (0.0..=MAX_EFFORT_DAYS).contains(&value)
}

pub fn validate_work_item(item: &WorkItem) -> IngestResult<()> {
    for (field, value) in [
        ("dev_effort", item.dev_effort),
        ("tester_effort", item.tester_effort),
    ] {
        if !effort_in_range(value) {
            return Err(IngestError::InvalidEffort {
                work_id: item.id.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}

pub fn validate_work_items(items: &[WorkItem]) -> IngestResult<()> {
    let mut seen_ids = HashSet::with_capacity(items.len());
    for item in items {
        if !seen_ids.insert(item.id.as_str()) {
            return Err(IngestError::InvalidData(format!(
                "duplicate work item id {}",
                item.id
            )));
        }
        validate_work_item(item)?;
    }
    Ok(())
}

pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> IngestResult<PlanSnapshot> {
    let file = File::open(path)?;
    let plan: PlanSnapshot = serde_json::from_reader(file)?;
    plan.validate()?;
    Ok(plan)
}

pub fn save_plan_to_json<P: AsRef<Path>>(plan: &PlanSnapshot, path: P) -> IngestResult<()> {
    plan.validate()?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, plan)?;
    Ok(())
}

pub fn save_results_to_json<P: AsRef<Path>>(
    results: &[AssignmentResult],
    path: P,
) -> IngestResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}

pub fn parse_date(input: &str) -> IngestResult<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| IngestError::InvalidDate {
        input: trimmed.to_string(),
        reason: e.to_string(),
    })
}

/// Splits a leave schedule given as `2025-08-06,2025-08-07` or
/// `['2025-08-06', '2025-08-07']` into dates. Blank input means no leave.
pub fn parse_leave_schedule(input: &str) -> IngestResult<Vec<NaiveDate>> {
    input
        .trim()
        .trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace())
        .split(',')
        .map(|part| part.trim().trim_matches(|c: char| c == '\'' || c == '"').trim())
        .filter(|part| !part.is_empty())
        .map(parse_date)
        .collect()
}
