use crate::error::CalendarError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One effort-day is worth this many working hours.
pub const HOURS_PER_EFFORT_DAY: f64 = 8.0;

/// Largest effort, in effort-days, a single phase may ask for.
pub const MAX_EFFORT_DAYS: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    holidays: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendarConfig {
    working_days: Vec<Weekday>,
    #[serde(default)]
    holidays: Vec<NaiveDate>,
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self {
            holidays: HashSet::new(),
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        }
    }
}

impl BusinessCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn from_config(config: &BusinessCalendarConfig) -> Result<Self, CalendarError> {
        let working_set: HashSet<Weekday> = config.working_days.iter().copied().collect();
        if working_set.is_empty() {
            return Err(CalendarError::NoWorkingDays);
        }
        let non_working_days = Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !working_set.contains(day))
            .collect();

        Ok(Self {
            holidays: config.holidays.iter().copied().collect(),
            non_working_days,
        })
    }

    pub fn to_config(&self) -> BusinessCalendarConfig {
        BusinessCalendarConfig::from(self)
    }

    /// Add an organisation-wide holiday
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// True on the non-working days of the week (Saturday and Sunday by default)
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.non_working_days.contains(&date.weekday())
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.holidays.contains(&date)
    }

    /// Returns `date` itself when it is a business day, otherwise the first
    /// business day after it. `None` when that day lies past `NaiveDate::MAX`.
    pub fn next_business_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut current = date;
        while !self.is_business_day(current) {
            current = current.succ_opt()?;
        }
        Some(current)
    }

    /// First business day strictly after `date`.
    pub fn following_business_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.next_business_day(date.succ_opt()?)
    }

    /// Contiguous run of business days covering `effort_days` worth of
    /// 8-hour days, starting at the first business day on or after `start`.
    ///
    /// Each business day credits a full day of hours, so a fractional effort
    /// rounds up: 2.5 days yields three dates. Zero effort yields no dates.
    /// `None` when the block would run past the last representable date.
    pub fn business_day_block(
        &self,
        start: NaiveDate,
        effort_days: f64,
    ) -> Option<Vec<NaiveDate>> {
        let required_hours = effort_days * HOURS_PER_EFFORT_DAY;
        let mut allocated_hours = 0.0;
        let mut days = Vec::new();
        if required_hours.is_nan() || required_hours <= 0.0 {
            return Some(days);
        }

        let mut current = self.next_business_day(start)?;
        loop {
            if self.is_business_day(current) {
                days.push(current);
                allocated_hours += HOURS_PER_EFFORT_DAY;
            }
            if allocated_hours >= required_hours {
                return Some(days);
            }
            current = current.succ_opt()?;
        }
    }
}

impl BusinessCalendarConfig {
    pub fn new<I, J>(working_days: I, holidays: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        let mut working: Vec<Weekday> = working_days.into_iter().collect();
        working.sort_by_key(|wd| wd.num_days_from_monday());
        working.dedup_by(|a, b| a.num_days_from_monday() == b.num_days_from_monday());

        let mut holidays: Vec<NaiveDate> = holidays.into_iter().collect();
        holidays.sort();
        holidays.dedup();

        Self {
            working_days: working,
            holidays,
        }
    }

    pub fn working_days(&self) -> &[Weekday] {
        &self.working_days
    }

    pub fn holidays(&self) -> &[NaiveDate] {
        &self.holidays
    }
}

impl Default for BusinessCalendarConfig {
    fn default() -> Self {
        BusinessCalendarConfig::from(&BusinessCalendar::default())
    }
}

impl From<&BusinessCalendar> for BusinessCalendarConfig {
    fn from(calendar: &BusinessCalendar) -> Self {
        let working = BusinessCalendar::ALL_WEEKDAYS
            .into_iter()
            .filter(|day| !calendar.non_working_days.contains(day));
        Self::new(working, calendar.holidays.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_config_is_monday_to_friday() {
        let config = BusinessCalendarConfig::default();
        assert_eq!(
            config.working_days(),
            &[
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri
            ]
        );
        assert!(config.holidays().is_empty());
    }

    #[test]
    fn block_skips_holiday_without_crediting_hours() {
        let mut cal = BusinessCalendar::default();
        // Wednesday 2025-08-06
        cal.add_holiday(d(2025, 8, 6));
        let block = cal.business_day_block(d(2025, 8, 5), 2.0);
        assert_eq!(block, Some(vec![d(2025, 8, 5), d(2025, 8, 7)]));
    }

    #[test]
    fn stepping_past_the_last_date_yields_none() {
        let seven_day_week = BusinessCalendarConfig::new(
            [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            Vec::new(),
        );
        let cal = BusinessCalendar::from_config(&seven_day_week).unwrap();
        assert_eq!(cal.next_business_day(NaiveDate::MAX), Some(NaiveDate::MAX));
        assert_eq!(cal.following_business_day(NaiveDate::MAX), None);
        assert_eq!(
            cal.business_day_block(NaiveDate::MAX, 1.0),
            Some(vec![NaiveDate::MAX])
        );
        assert_eq!(cal.business_day_block(NaiveDate::MAX, 2.0), None);
        assert_eq!(cal.business_day_block(NaiveDate::MAX, 0.0), Some(Vec::new()));
    }

    #[test]
    fn empty_working_week_is_rejected() {
        let config = BusinessCalendarConfig::new(Vec::new(), Vec::new());
        assert_eq!(
            BusinessCalendar::from_config(&config),
            Err(CalendarError::NoWorkingDays)
        );
    }
}
