use super::{
    effort_in_range, parse_leave_schedule, validate_resources, validate_work_items,
};
use crate::error::{IngestError, IngestResult};
use crate::resource::{Resource, Role};
use crate::scheduler::{AssignmentResult, PhaseAssignment};
use crate::work_item::WorkItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Row of the resources sheet. Spreadsheet headings and snake-case names are
/// both accepted.
#[derive(Debug, Deserialize)]
struct ResourceCsvRecord {
    #[serde(rename = "Resource ID", alias = "id")]
    id: String,
    #[serde(rename = "Name", alias = "name")]
    name: String,
    #[serde(rename = "Type", alias = "type", alias = "role")]
    role: String,
    #[serde(rename = "Leave Schedule", alias = "leave_schedule", default)]
    leave_schedule: String,
}

impl ResourceCsvRecord {
    fn into_resource(self) -> IngestResult<Resource> {
        let role: Role = self.role.parse()?;
        let leave = parse_leave_schedule(&self.leave_schedule)?;
        Ok(Resource::new(self.id, self.name, role).with_leave(leave))
    }
}

#[derive(Debug, Deserialize)]
struct WorkItemCsvRecord {
    #[serde(rename = "Jira ID", alias = "id")]
    id: String,
    #[serde(rename = "Task", alias = "name")]
    name: String,
    #[serde(rename = "Dev Effort", alias = "dev_effort", default)]
    dev_effort: String,
    #[serde(rename = "Tester Effort", alias = "tester_effort", default)]
    tester_effort: String,
    #[serde(rename = "Priority", alias = "priority", default)]
    priority: String,
}

impl WorkItemCsvRecord {
    fn into_work_item(self) -> IngestResult<WorkItem> {
        let dev_effort = parse_effort(&self.id, "dev_effort", &self.dev_effort)?;
        let tester_effort = parse_effort(&self.id, "tester_effort", &self.tester_effort)?;
        let priority = parse_priority(&self.priority)?;
        Ok(WorkItem::new(self.id, self.name, dev_effort, tester_effort).with_priority(priority))
    }
}

#[derive(Default, Serialize)]
struct ResultCsvRecord {
    work_id: String,
    work_name: String,
    priority: i32,
    dev_name: String,
    dev_effort: f64,
    dev_start: String,
    dev_end: String,
    tester_name: String,
    tester_effort: f64,
    test_start: String,
    test_end: String,
}

impl From<&AssignmentResult> for ResultCsvRecord {
    fn from(result: &AssignmentResult) -> Self {
        let (dev_name, dev_start, dev_end) = phase_columns(result.developer.as_ref());
        let (tester_name, test_start, test_end) = phase_columns(result.tester.as_ref());
        Self {
            work_id: result.work_id.clone(),
            work_name: result.work_name.clone(),
            priority: result.priority,
            dev_name,
            dev_effort: result.dev_effort,
            dev_start,
            dev_end,
            tester_name,
            tester_effort: result.tester_effort,
            test_start,
            test_end,
        }
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub fn read_resources_csv<R: Read>(reader: R) -> IngestResult<Vec<Resource>> {
    let mut reader = csv_reader(reader);
    let mut resources = Vec::new();
    for record in reader.deserialize::<ResourceCsvRecord>() {
        resources.push(record?.into_resource()?);
    }
    validate_resources(&resources)?;
    Ok(resources)
}

pub fn read_work_items_csv<R: Read>(reader: R) -> IngestResult<Vec<WorkItem>> {
    let mut reader = csv_reader(reader);
    let mut items = Vec::new();
    for record in reader.deserialize::<WorkItemCsvRecord>() {
        items.push(record?.into_work_item()?);
    }
    validate_work_items(&items)?;
    Ok(items)
}

pub fn load_resources_from_csv<P: AsRef<Path>>(path: P) -> IngestResult<Vec<Resource>> {
    read_resources_csv(File::open(path)?)
}

pub fn load_work_items_from_csv<P: AsRef<Path>>(path: P) -> IngestResult<Vec<WorkItem>> {
    read_work_items_csv(File::open(path)?)
}

pub fn write_results_csv<W: Write>(writer: W, results: &[AssignmentResult]) -> IngestResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for result in results {
        writer.serialize(ResultCsvRecord::from(result))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_results_to_csv<P: AsRef<Path>>(
    results: &[AssignmentResult],
    path: P,
) -> IngestResult<()> {
    write_results_csv(File::create(path)?, results)
}

fn phase_columns(phase: Option<&PhaseAssignment>) -> (String, String, String) {
    match phase {
        Some(phase) => (
            phase.resource_name.clone(),
            format_date(phase.start),
            format_date(phase.end),
        ),
        None => Default::default(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_effort(work_id: &str, field: &'static str, input: &str) -> IngestResult<f64> {
    if input.trim().is_empty() {
        return Ok(0.0);
    }
    let value = input.trim().parse::<f64>().map_err(|e| {
        IngestError::InvalidData(format!(
            "work item {work_id} has unparseable {field} '{input}': {e}"
        ))
    })?;
    if !effort_in_range(value) {
        return Err(IngestError::InvalidEffort {
            work_id: work_id.to_string(),
            field,
            value,
        });
    }
    Ok(value)
}

fn parse_priority(input: &str) -> IngestResult<i32> {
    if input.trim().is_empty() {
        return Ok(0);
    }
    input
        .trim()
        .parse::<i32>()
        .map_err(|e| IngestError::InvalidData(format!("invalid priority '{input}': {e}")))
}
