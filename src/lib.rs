pub mod availability;
pub mod calendar;
pub mod config;
pub mod context;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod ingest;
pub mod report;
pub mod resource;
pub mod scheduler;
pub mod selector;
pub mod work_item;

pub use availability::{AvailabilitySearch, BusinessDayBlock};
pub use calendar::{
    BusinessCalendar, BusinessCalendarConfig, HOURS_PER_EFFORT_DAY, MAX_EFFORT_DAYS,
};
pub use config::SchedulerConfig;
pub use context::{RunContext, ScheduleRun};
pub use error::{CalendarError, IngestError, IngestResult, ScheduleError};
pub use ingest::{
    PlanSnapshot, load_plan_from_json, load_resources_from_csv, load_work_items_from_csv,
    save_plan_to_json, save_results_to_csv, save_results_to_json,
};
pub use resource::{BlockedDates, Resource, Role};
pub use scheduler::{AssignmentResult, PhaseAssignment, ScheduleOutcome, Scheduler};
pub use selector::{Assignment, ResourceSelector};
pub use work_item::WorkItem;
