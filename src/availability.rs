use crate::calendar::BusinessCalendar;
use crate::error::ScheduleError;
use crate::resource::Resource;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Ordered business days assigned to one resource for one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessDayBlock(Vec<NaiveDate>);

impl BusinessDayBlock {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self(dates)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.0.last().copied()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn is_free_for(&self, resource: &Resource) -> bool {
        self.0.iter().all(|date| !resource.is_blocked(date))
    }
}

pub struct AvailabilitySearch<'a> {
    calendar: &'a BusinessCalendar,
    max_attempts: u32,
}

impl<'a> AvailabilitySearch<'a> {
    pub fn new(calendar: &'a BusinessCalendar, max_attempts: u32) -> Self {
        Self {
            calendar,
            max_attempts,
        }
    }

    /// Earliest block of `effort_days` starting on or after `start` that
    /// avoids every date the resource already has blocked.
    ///
    /// Candidate start dates advance one business day at a time. The search
    /// gives up after `max_attempts` candidates with
    /// [`ScheduleError::SearchExhausted`], or with
    /// [`ScheduleError::DateOutOfRange`] once candidates run off the calendar.
    pub fn earliest_block(
        &self,
        resource: &Resource,
        start: NaiveDate,
        effort_days: f64,
    ) -> Result<BusinessDayBlock, ScheduleError> {
        let out_of_range = || ScheduleError::DateOutOfRange {
            resource_id: resource.id.clone(),
        };
        let mut attempt = self
            .calendar
            .next_business_day(start)
            .ok_or_else(out_of_range)?;

        for _ in 0..self.max_attempts {
            let dates = self
                .calendar
                .business_day_block(attempt, effort_days)
                .ok_or_else(out_of_range)?;
            let block = BusinessDayBlock::new(dates);
            if block.is_free_for(resource) {
                return Ok(block);
            }
            trace!(resource = %resource.id, %attempt, "candidate block overlaps blocked dates");
            attempt = self
                .calendar
                .following_business_day(attempt)
                .ok_or_else(out_of_range)?;
        }

        Err(ScheduleError::SearchExhausted {
            resource_id: resource.id.clone(),
            attempts: self.max_attempts,
        })
    }
}
