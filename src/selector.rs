use crate::availability::{AvailabilitySearch, BusinessDayBlock};
use crate::calendar::{BusinessCalendar, MAX_EFFORT_DAYS};
use crate::error::ScheduleError;
use crate::resource::{Resource, Role};
use chrono::NaiveDate;
use tracing::debug;

/// The resource picked for a phase and the block committed to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub resource_id: String,
    pub resource_name: String,
    pub block: BusinessDayBlock,
}

impl Assignment {
    pub fn start(&self) -> Option<NaiveDate> {
        self.block.start()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.block.end()
    }
}

pub struct ResourceSelector<'a> {
    search: AvailabilitySearch<'a>,
}

impl<'a> ResourceSelector<'a> {
    pub fn new(calendar: &'a BusinessCalendar, max_search_attempts: u32) -> Self {
        Self {
            search: AvailabilitySearch::new(calendar, max_search_attempts),
        }
    }

    /// Picks the resource of `role` whose earliest free block finishes first
    /// and commits that block to its blocked dates.
    ///
    /// Ties on the end date go to the resource listed first in `pool`. Only
    /// the chosen resource is mutated.
    pub fn assign_best_resource(
        &self,
        pool: &mut [Resource],
        start: NaiveDate,
        effort_days: f64,
        role: Role,
    ) -> Result<Assignment, ScheduleError> {
        if effort_days.is_nan() || effort_days <= 0.0 {
            return Err(ScheduleError::NoEffort { role, effort_days });
        }
        if effort_days > MAX_EFFORT_DAYS {
            return Err(ScheduleError::EffortTooLarge {
                role,
                effort_days,
                max: MAX_EFFORT_DAYS,
            });
        }

        let mut candidates = 0;
        let mut best: Option<(usize, BusinessDayBlock, NaiveDate)> = None;

        for (idx, resource) in pool.iter().enumerate() {
            if resource.role != role {
                continue;
            }
            candidates += 1;

            let block = match self.search.earliest_block(resource, start, effort_days) {
                Ok(block) => block,
                Err(err) => {
                    debug!(resource = %resource.id, error = %err, "skipping candidate");
                    continue;
                }
            };
            let Some(end) = block.end() else {
                continue;
            };
            debug!(resource = %resource.id, %end, days = block.len(), "candidate block");

            let improves = match &best {
                Some((_, _, best_end)) => end < *best_end,
                None => true,
            };
            if improves {
                best = Some((idx, block, end));
            }
        }

        if candidates == 0 {
            return Err(ScheduleError::NoCandidates { role });
        }
        let Some((idx, block, _)) = best else {
            return Err(ScheduleError::AllCandidatesExhausted { role, candidates });
        };

        let chosen = &mut pool[idx];
        let added = chosen.block_dates(block.dates());
        debug!(
            resource = %chosen.id,
            start = ?block.start(),
            end = ?block.end(),
            added,
            "committed block"
        );

        Ok(Assignment {
            resource_id: chosen.id.clone(),
            resource_name: chosen.name.clone(),
            block,
        })
    }
}
