use chrono::NaiveDate;
use staff_scheduler::{AvailabilitySearch, BusinessCalendar, Resource, Role, ScheduleError};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn free_resource_gets_block_at_start() {
    let cal = BusinessCalendar::default();
    let search = AvailabilitySearch::new(&cal, 100);
    let dev = Resource::new("r2", "Dev 2", Role::Developer);

    let block = search.earliest_block(&dev, d(2025, 8, 4), 2.5).unwrap();
    assert_eq!(block.dates(), &[d(2025, 8, 4), d(2025, 8, 5), d(2025, 8, 6)]);
}

#[test]
fn block_shifts_past_leave_day() {
    let cal = BusinessCalendar::default();
    let search = AvailabilitySearch::new(&cal, 100);
    // On leave Wednesday 2025-08-06
    let dev = Resource::new("r1", "Dev 1", Role::Developer).with_leave([d(2025, 8, 6)]);

    let block = search.earliest_block(&dev, d(2025, 8, 4), 2.5).unwrap();
    assert_eq!(block.dates(), &[d(2025, 8, 7), d(2025, 8, 8), d(2025, 8, 11)]);
    assert!(block.dates().iter().all(|date| !dev.is_blocked(date)));
}

#[test]
fn short_block_fits_before_leave() {
    let cal = BusinessCalendar::default();
    let search = AvailabilitySearch::new(&cal, 100);
    let dev = Resource::new("r1", "Dev 1", Role::Developer).with_leave([d(2025, 8, 6)]);

    let block = search.earliest_block(&dev, d(2025, 8, 4), 2.0).unwrap();
    assert_eq!(block.start(), Some(d(2025, 8, 4)));
    assert_eq!(block.end(), Some(d(2025, 8, 5)));
}

#[test]
fn weekend_start_is_normalised() {
    let cal = BusinessCalendar::default();
    let search = AvailabilitySearch::new(&cal, 100);
    let tester = Resource::new("r3", "Tester 1", Role::Tester);

    let block = search.earliest_block(&tester, d(2025, 8, 9), 1.0).unwrap();
    assert_eq!(block.dates(), &[d(2025, 8, 11)]);
}

#[test]
fn search_is_deterministic() {
    let cal = BusinessCalendar::default();
    let search = AvailabilitySearch::new(&cal, 100);
    let dev = Resource::new("r1", "Dev 1", Role::Developer)
        .with_leave([d(2025, 8, 5), d(2025, 8, 12), d(2025, 8, 19)]);

    let first = search.earliest_block(&dev, d(2025, 8, 4), 4.0).unwrap();
    let second = search.earliest_block(&dev, d(2025, 8, 4), 4.0).unwrap();
    assert_eq!(first, second);
    assert!(first.dates().iter().all(|date| !dev.is_blocked(date)));
}

#[test]
fn fully_blocked_span_exhausts_search() {
    let cal = BusinessCalendar::default();
    let search = AvailabilitySearch::new(&cal, 5);
    let leave = (0..30).map(|offset| d(2025, 8, 4) + chrono::Duration::days(offset));
    let dev = Resource::new("r1", "Dev 1", Role::Developer).with_leave(leave);

    let err = search.earliest_block(&dev, d(2025, 8, 4), 1.0).unwrap_err();
    assert_eq!(
        err,
        ScheduleError::SearchExhausted {
            resource_id: "r1".into(),
            attempts: 5
        }
    );
    assert!(!err.is_no_resource_available());
}
