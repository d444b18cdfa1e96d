//! Display-side helpers. The core hands out `NaiveDate`s; everything here
//! turns them into strings for people.

use crate::resource::Resource;
use crate::scheduler::{AssignmentResult, PhaseAssignment};
use crate::work_item::WorkItem;
use chrono::NaiveDate;
use polars::prelude::*;

/// `04-Aug-25` style rendering used on screen.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d-%b-%y").to_string()
}

pub fn join_display_dates<'a, I>(dates: I) -> String
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    dates
        .into_iter()
        .map(|date| format_display_date(*date))
        .collect::<Vec<_>>()
        .join(", ")
}

fn string_column(name: &'static str, values: Vec<String>) -> Column {
    Series::new(PlSmallStr::from_static(name), values).into_column()
}

fn phase_name(phase: Option<&PhaseAssignment>) -> String {
    phase
        .map(|p| p.resource_name.clone())
        .unwrap_or_else(|| "none".to_string())
}

fn phase_date(phase: Option<&PhaseAssignment>, pick: fn(&PhaseAssignment) -> NaiveDate) -> String {
    phase.map(|p| format_display_date(pick(p))).unwrap_or_default()
}

pub fn results_frame(results: &[AssignmentResult]) -> PolarsResult<DataFrame> {
    let mut work_id = Vec::with_capacity(results.len());
    let mut work_name = Vec::with_capacity(results.len());
    let mut dev_name = Vec::with_capacity(results.len());
    let mut dev_effort = Vec::with_capacity(results.len());
    let mut dev_start = Vec::with_capacity(results.len());
    let mut dev_end = Vec::with_capacity(results.len());
    let mut tester_name = Vec::with_capacity(results.len());
    let mut tester_effort = Vec::with_capacity(results.len());
    let mut test_start = Vec::with_capacity(results.len());
    let mut test_end = Vec::with_capacity(results.len());

    for result in results {
        let developer = result.developer.as_ref();
        let tester = result.tester.as_ref();
        work_id.push(result.work_id.clone());
        work_name.push(result.work_name.clone());
        dev_name.push(phase_name(developer));
        dev_effort.push(result.dev_effort);
        dev_start.push(phase_date(developer, |p| p.start));
        dev_end.push(phase_date(developer, |p| p.end));
        tester_name.push(phase_name(tester));
        tester_effort.push(result.tester_effort);
        test_start.push(phase_date(tester, |p| p.start));
        test_end.push(phase_date(tester, |p| p.end));
    }

    DataFrame::new(vec![
        string_column("work_id", work_id),
        string_column("work_name", work_name),
        string_column("dev_name", dev_name),
        Series::new(PlSmallStr::from_static("dev_effort"), dev_effort).into_column(),
        string_column("dev_start", dev_start),
        string_column("dev_end", dev_end),
        string_column("tester_name", tester_name),
        Series::new(PlSmallStr::from_static("tester_effort"), tester_effort).into_column(),
        string_column("test_start", test_start),
        string_column("test_end", test_end),
    ])
}

pub fn resources_frame(resources: &[Resource]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        string_column("id", resources.iter().map(|r| r.id.clone()).collect()),
        string_column("name", resources.iter().map(|r| r.name.clone()).collect()),
        string_column(
            "type",
            resources.iter().map(|r| r.role.as_str().to_string()).collect(),
        ),
        string_column(
            "blocked_dates",
            resources
                .iter()
                .map(|r| join_display_dates(r.blocked_dates.iter()))
                .collect(),
        ),
    ])
}

pub fn work_items_frame(items: &[WorkItem]) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        string_column("id", items.iter().map(|w| w.id.clone()).collect()),
        string_column("name", items.iter().map(|w| w.name.clone()).collect()),
        Series::new(
            PlSmallStr::from_static("dev_effort"),
            items.iter().map(|w| w.dev_effort).collect::<Vec<f64>>(),
        )
        .into_column(),
        Series::new(
            PlSmallStr::from_static("tester_effort"),
            items.iter().map(|w| w.tester_effort).collect::<Vec<f64>>(),
        )
        .into_column(),
        Series::new(
            PlSmallStr::from_static("priority"),
            items.iter().map(|w| w.priority).collect::<Vec<i32>>(),
        )
        .into_column(),
    ])
}

fn cell_text(column: &Column, row_idx: usize) -> String {
    match column.get(row_idx) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(other) => other.to_string(),
    }
}

/// ASCII grid of a frame, one row per line.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cells: Vec<Vec<String>> = (0..df.height())
        .map(|row_idx| columns.iter().map(|c| cell_text(c, row_idx)).collect())
        .collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (ci, value) in values.iter().enumerate() {
            let pad = widths[ci].saturating_sub(value.chars().count());
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
