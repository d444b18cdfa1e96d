use crate::calendar::BusinessCalendar;
use crate::config::SchedulerConfig;
use crate::error::IngestResult;
use crate::ingest;
use crate::resource::Resource;
use crate::scheduler::{AssignmentResult, Scheduler};
use crate::work_item::WorkItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The state one scheduling run leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRun {
    pub reference_date: NaiveDate,
    /// Working copy of the pool after every block was committed.
    pub resources: Vec<Resource>,
    pub results: Vec<AssignmentResult>,
    pub log: Vec<String>,
}

/// Input snapshot plus the outcome of the most recent run.
///
/// The loaded resources are never mutated: every run schedules against a
/// fresh clone, so repeated runs produce the same results.
#[derive(Debug, Clone)]
pub struct RunContext {
    config: SchedulerConfig,
    calendar: BusinessCalendar,
    initial_resources: Vec<Resource>,
    work_items: Vec<WorkItem>,
    last_run: Option<ScheduleRun>,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            config: SchedulerConfig::default(),
            calendar: BusinessCalendar::default(),
            initial_resources: Vec::new(),
            work_items: Vec::new(),
            last_run: None,
        }
    }
}

impl RunContext {
    pub fn new(config: SchedulerConfig) -> IngestResult<Self> {
        let calendar = config.build_calendar()?;
        Ok(Self {
            config,
            calendar,
            ..Self::default()
        })
    }

    pub fn with_plan(
        config: SchedulerConfig,
        resources: Vec<Resource>,
        work_items: Vec<WorkItem>,
    ) -> IngestResult<Self> {
        let mut context = Self::new(config)?;
        context.replace_plan(resources, work_items)?;
        Ok(context)
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    pub fn set_config(&mut self, config: SchedulerConfig) -> IngestResult<()> {
        self.calendar = config.build_calendar()?;
        self.config = config;
        self.last_run = None;
        Ok(())
    }

    /// Validates and installs new input, discarding any previous run.
    pub fn replace_plan(
        &mut self,
        resources: Vec<Resource>,
        work_items: Vec<WorkItem>,
    ) -> IngestResult<()> {
        ingest::validate_resources(&resources)?;
        ingest::validate_work_items(&work_items)?;
        self.initial_resources = resources;
        self.work_items = work_items;
        self.last_run = None;
        Ok(())
    }

    /// Current input as a serialisable snapshot.
    pub fn plan(&self) -> ingest::PlanSnapshot {
        ingest::PlanSnapshot {
            resources: self.initial_resources.clone(),
            work_items: self.work_items.clone(),
        }
    }

    pub fn set_resources(&mut self, resources: Vec<Resource>) -> IngestResult<()> {
        ingest::validate_resources(&resources)?;
        self.initial_resources = resources;
        self.last_run = None;
        Ok(())
    }

    pub fn set_work_items(&mut self, work_items: Vec<WorkItem>) -> IngestResult<()> {
        ingest::validate_work_items(&work_items)?;
        self.work_items = work_items;
        self.last_run = None;
        Ok(())
    }

    pub fn initial_resources(&self) -> &[Resource] {
        &self.initial_resources
    }

    pub fn work_items(&self) -> &[WorkItem] {
        &self.work_items
    }

    pub fn last_run(&self) -> Option<&ScheduleRun> {
        self.last_run.as_ref()
    }

    /// Schedules every work item against a fresh copy of the loaded
    /// resources, with `reference_date` as "today" for the whole run.
    pub fn run(&mut self, reference_date: NaiveDate) -> &ScheduleRun {
        let mut resources = self.initial_resources.clone();
        let scheduler = Scheduler::new(&self.calendar, &self.config);
        let outcome = scheduler.schedule(&mut resources, &self.work_items, reference_date);
        info!(
            %reference_date,
            items = outcome.results.len(),
            resources = resources.len(),
            "scheduling run complete"
        );

        self.last_run.insert(ScheduleRun {
            reference_date,
            resources,
            results: outcome.results,
            log: outcome.log,
        })
    }
}
