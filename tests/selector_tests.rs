use chrono::NaiveDate;
use staff_scheduler::{BusinessCalendar, Resource, ResourceSelector, Role, ScheduleError};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_pool() -> Vec<Resource> {
    vec![
        Resource::new("r1", "Dev 1", Role::Developer).with_leave([d(2025, 8, 6)]),
        Resource::new("r2", "Dev 2", Role::Developer),
        Resource::new("r3", "Tester 1", Role::Tester).with_leave([d(2025, 8, 8)]),
        Resource::new("r4", "Tester 2", Role::Tester),
    ]
}

#[test]
fn earliest_finisher_wins_and_block_is_committed() {
    let cal = BusinessCalendar::default();
    let selector = ResourceSelector::new(&cal, 100);
    let mut pool = sample_pool();
    let before = pool.clone();

    let assignment = selector
        .assign_best_resource(&mut pool, d(2025, 8, 4), 2.5, Role::Developer)
        .unwrap();

    assert_eq!(assignment.resource_id, "r2");
    assert_eq!(assignment.resource_name, "Dev 2");
    assert_eq!(assignment.start(), Some(d(2025, 8, 4)));
    assert_eq!(assignment.end(), Some(d(2025, 8, 6)));

    let chosen = &pool[1];
    for date in assignment.block.dates() {
        assert!(chosen.is_blocked(date), "{date} not committed");
    }
    assert_eq!(pool[0], before[0]);
    assert_eq!(pool[2], before[2]);
    assert_eq!(pool[3], before[3]);
}

#[test]
fn ties_go_to_first_listed_resource() {
    let cal = BusinessCalendar::default();
    let selector = ResourceSelector::new(&cal, 100);

    for _ in 0..5 {
        let mut pool = vec![
            Resource::new("b", "Zed", Role::Tester),
            Resource::new("a", "Alice", Role::Tester),
        ];
        let assignment = selector
            .assign_best_resource(&mut pool, d(2025, 8, 7), 1.0, Role::Tester)
            .unwrap();
        assert_eq!(assignment.resource_id, "b");
        assert!(pool[1].blocked_dates.is_empty());
    }
}

#[test]
fn committed_dates_are_not_double_booked() {
    let cal = BusinessCalendar::default();
    let selector = ResourceSelector::new(&cal, 100);
    let mut pool = vec![Resource::new("r1", "Dev 1", Role::Developer)];

    let first = selector
        .assign_best_resource(&mut pool, d(2025, 8, 4), 2.0, Role::Developer)
        .unwrap();
    let second = selector
        .assign_best_resource(&mut pool, d(2025, 8, 4), 2.0, Role::Developer)
        .unwrap();

    assert_eq!(first.end(), Some(d(2025, 8, 5)));
    assert_eq!(second.start(), Some(d(2025, 8, 6)));
    assert_eq!(second.end(), Some(d(2025, 8, 7)));
    assert_eq!(pool[0].blocked_dates.len(), 4);
}

#[test]
fn missing_role_reports_no_candidates() {
    let cal = BusinessCalendar::default();
    let selector = ResourceSelector::new(&cal, 100);
    let mut pool = vec![Resource::new("r1", "Dev 1", Role::Developer)];

    let err = selector
        .assign_best_resource(&mut pool, d(2025, 8, 4), 1.0, Role::Tester)
        .unwrap_err();
    assert_eq!(err, ScheduleError::NoCandidates { role: Role::Tester });
    assert!(err.is_no_resource_available());
    assert!(pool[0].blocked_dates.is_empty());
}

#[test]
fn zero_effort_touches_nobody() {
    let cal = BusinessCalendar::default();
    let selector = ResourceSelector::new(&cal, 100);
    let mut pool = sample_pool();
    let before = pool.clone();

    let err = selector
        .assign_best_resource(&mut pool, d(2025, 8, 4), 0.0, Role::Developer)
        .unwrap_err();
    assert!(matches!(err, ScheduleError::NoEffort { role: Role::Developer, .. }));
    assert_eq!(pool, before);
}

#[test]
fn exhausted_candidates_are_skipped() {
    let cal = BusinessCalendar::default();
    let selector = ResourceSelector::new(&cal, 3);
    let leave = (0..20).map(|offset| d(2025, 8, 4) + chrono::Duration::days(offset));
    let mut pool = vec![
        Resource::new("r1", "Dev 1", Role::Developer).with_leave(leave.clone()),
        Resource::new("r2", "Dev 2", Role::Developer).with_leave([d(2025, 8, 4)]),
    ];

    let assignment = selector
        .assign_best_resource(&mut pool, d(2025, 8, 4), 1.0, Role::Developer)
        .unwrap();
    assert_eq!(assignment.resource_id, "r2");
    assert_eq!(assignment.start(), Some(d(2025, 8, 5)));

    let mut blocked_pool = vec![Resource::new("r1", "Dev 1", Role::Developer).with_leave(leave)];
    let err = selector
        .assign_best_resource(&mut blocked_pool, d(2025, 8, 4), 1.0, Role::Developer)
        .unwrap_err();
    assert_eq!(
        err,
        ScheduleError::AllCandidatesExhausted {
            role: Role::Developer,
            candidates: 1
        }
    );
    assert!(err.is_no_resource_available());
}

#[test]
fn effort_above_the_limit_touches_nobody() {
    let cal = BusinessCalendar::default();
    let selector = ResourceSelector::new(&cal, 100);
    let mut pool = sample_pool();
    let before = pool.clone();

    let err = selector
        .assign_best_resource(&mut pool, d(2025, 8, 4), 1.0e8, Role::Developer)
        .unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::EffortTooLarge { role: Role::Developer, .. }
    ));
    assert_eq!(pool, before);
}
