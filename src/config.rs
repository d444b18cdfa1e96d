use crate::calendar::{BusinessCalendar, BusinessCalendarConfig};
use crate::error::{CalendarError, IngestResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Environment variable naming a JSON file with a [`SchedulerConfig`].
pub const CONFIG_PATH_ENV: &str = "STAFF_SCHEDULER_CONFIG";

/// Candidate start dates tried per resource before giving up, roughly ten
/// years of business days.
pub const DEFAULT_MAX_SEARCH_ATTEMPTS: u32 = 2600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub max_search_attempts: u32,
    pub calendar: BusinessCalendarConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_search_attempts: DEFAULT_MAX_SEARCH_ATTEMPTS,
            calendar: BusinessCalendarConfig::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> IngestResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.build_calendar()?;
        Ok(config)
    }

    /// Reads the file named by `STAFF_SCHEDULER_CONFIG`, or the defaults when
    /// the variable is unset.
    pub fn from_env() -> IngestResult<Self> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn build_calendar(&self) -> Result<BusinessCalendar, CalendarError> {
        BusinessCalendar::from_config(&self.calendar)
    }
}
