use crate::calendar::BusinessCalendar;
use crate::config::SchedulerConfig;
use crate::error::ScheduleError;
use crate::resource::{Resource, Role};
use crate::selector::{Assignment, ResourceSelector};
use crate::work_item::WorkItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One phase (development or testing) of a scheduled work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAssignment {
    pub resource_id: String,
    pub resource_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub business_days: usize,
}

impl PhaseAssignment {
    fn from_assignment(assignment: Assignment) -> Option<Self> {
        Some(Self {
            start: assignment.start()?,
            end: assignment.end()?,
            business_days: assignment.block.len(),
            resource_id: assignment.resource_id,
            resource_name: assignment.resource_name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub work_id: String,
    pub work_name: String,
    pub priority: i32,
    pub dev_effort: f64,
    pub tester_effort: f64,
    pub developer: Option<PhaseAssignment>,
    pub tester: Option<PhaseAssignment>,
}

impl AssignmentResult {
    /// `"<item> => Dev: <name> (<start> to <end>), Tester: <name> (<start> to <end>)"`,
    /// with `none` in place of anything that was not assigned.
    pub fn log_line(&self) -> String {
        format!(
            "{} => Dev: {}, Tester: {}",
            self.work_name,
            describe_phase(self.developer.as_ref()),
            describe_phase(self.tester.as_ref())
        )
    }
}

fn describe_phase(phase: Option<&PhaseAssignment>) -> String {
    match phase {
        Some(phase) => format!(
            "{} ({} to {})",
            phase.resource_name,
            phase.start.format("%Y-%m-%d"),
            phase.end.format("%Y-%m-%d")
        ),
        None => "none (none to none)".to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub results: Vec<AssignmentResult>,
    pub log: Vec<String>,
}

/// Greedy single pass over work items in input order.
pub struct Scheduler<'a> {
    calendar: &'a BusinessCalendar,
    selector: ResourceSelector<'a>,
}

impl<'a> Scheduler<'a> {
    pub fn new(calendar: &'a BusinessCalendar, config: &SchedulerConfig) -> Self {
        Self {
            calendar,
            selector: ResourceSelector::new(calendar, config.max_search_attempts),
        }
    }

    /// Schedules every item against `pool`, growing the chosen resources'
    /// blocked dates as it goes. Always yields one result per item.
    ///
    /// The development phase of every item starts looking on
    /// `reference_date`. Testing starts on the business day after development
    /// ends, or on `reference_date` when no development block exists.
    pub fn schedule(
        &self,
        pool: &mut [Resource],
        work_items: &[WorkItem],
        reference_date: NaiveDate,
    ) -> ScheduleOutcome {
        let mut outcome = ScheduleOutcome::default();

        for item in work_items {
            let developer = self.assign_phase(
                pool,
                item,
                reference_date,
                item.dev_effort,
                Role::Developer,
            );

            let tester_start = match &developer {
                Some(phase) => self.calendar.following_business_day(phase.end),
                None => {
                    warn!(
                        work_id = %item.id,
                        %reference_date,
                        "no developer block; anchoring testing on the reference date"
                    );
                    self.calendar.next_business_day(reference_date)
                }
            };
            let tester = match tester_start {
                Some(start) => {
                    self.assign_phase(pool, item, start, item.tester_effort, Role::Tester)
                }
                None => {
                    warn!(work_id = %item.id, "no business day left to start testing");
                    None
                }
            };

            let result = AssignmentResult {
                work_id: item.id.clone(),
                work_name: item.name.clone(),
                priority: item.priority,
                dev_effort: item.dev_effort,
                tester_effort: item.tester_effort,
                developer,
                tester,
            };
            let line = result.log_line();
            info!("{line}");
            outcome.log.push(line);
            outcome.results.push(result);
        }

        outcome
    }

    fn assign_phase(
        &self,
        pool: &mut [Resource],
        item: &WorkItem,
        start: NaiveDate,
        effort_days: f64,
        role: Role,
    ) -> Option<PhaseAssignment> {
        match self
            .selector
            .assign_best_resource(pool, start, effort_days, role)
        {
            Ok(assignment) => PhaseAssignment::from_assignment(assignment),
            Err(err @ ScheduleError::NoEffort { .. }) => {
                info!(work_id = %item.id, "{err}");
                None
            }
            Err(err) => {
                warn!(work_id = %item.id, "{err}");
                None
            }
        }
    }
}
