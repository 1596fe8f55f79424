use attendly::core::analysis::{missing_checkouts, week_timesheet};
use attendly::core::schedule::{CalculationContext, DaySchedule, WeeklySchedule};
use chrono::{NaiveDate, Weekday};
use pretty_assertions::assert_eq;

mod common;
use common::block;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

#[test]
fn checkout_anomaly_flags_clock_in_without_clock_out() {
    let b = block(
        "1001",
        &[
            ("2024-03-04", "09:00", "17:00", 480),
            ("2024-03-05", "09:02", "-", 0),
            ("2024-03-06", "-", "-", 0),
        ],
    );

    let anomalies = missing_checkouts(&[b]);

    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].person_id, "1001");
    assert_eq!(anomalies[0].date, "2024-03-05");
    assert_eq!(anomalies[0].check_in, "09:02");
}

#[test]
fn checkout_anomaly_ignores_days_without_a_date() {
    // Padding days carry "-" dates; a stray check-in there is not actionable.
    let b = block("1001", &[("-", "09:00", "-", 0)]);
    assert_eq!(missing_checkouts(&[b]).len(), 0);
}

#[test]
fn checkout_anomaly_scans_every_block_in_the_batch() {
    let clean = block("1001", &[("2024-03-04", "09:00", "17:00", 480)]);
    let forgot = block("1002", &[("2024-03-04", "08:55", "", 0)]);

    let anomalies = missing_checkouts(&[clean, forgot]);

    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].person_id, "1002");
}

#[test]
fn timesheet_always_yields_seven_days() {
    let days = week_timesheet("1001", None, None, &CalculationContext::default(), monday());

    assert_eq!(days.len(), 7);
    assert_eq!(days[0].date, "2024-03-04");
    assert_eq!(days[0].day_name, "Monday");
    assert_eq!(days[6].date, "2024-03-10");
    assert_eq!(days[6].day_name, "Sunday");
}

#[test]
fn timesheet_compares_punches_against_the_plan() {
    // Monday: in ten minutes late, out on time. Default plan is 09:00-17:00.
    let b = block("1001", &[("2024-03-04", "09:10", "17:00", 470)]);
    let days = week_timesheet(
        "1001",
        None,
        Some(&b),
        &CalculationContext::default(),
        monday(),
    );

    let mon = &days[0];
    assert_eq!(mon.status, "worked");
    assert_eq!(mon.actual_minutes, 470);
    assert_eq!(mon.planned_minutes, 480);
    assert_eq!(mon.diff_minutes, -10);
    assert_eq!(mon.late_minutes, 10);
    assert_eq!(mon.early_departure_minutes, 0);

    // Tuesday has no punch row: absent under a working plan.
    let tue = &days[1];
    assert_eq!(tue.status, "absent");
    assert_eq!(tue.check_in, "-");
    assert_eq!(tue.actual_minutes, 0);
}

#[test]
fn timesheet_marks_planned_rest_days() {
    let mut week = WeeklySchedule::default();
    week.set_day(Weekday::Sat, DaySchedule::rest());
    let mut context = CalculationContext::default();
    context
        .department_schedules
        .insert("Operations".to_string(), week);

    let days = week_timesheet("1001", Some("Operations"), None, &context, monday());

    let sat = &days[5];
    assert_eq!(sat.status, "rest");
    assert_eq!(sat.planned_minutes, 0);
}

#[test]
fn timesheet_reports_early_departure() {
    let b = block("1001", &[("2024-03-04", "09:00", "16:20", 440)]);
    let days = week_timesheet(
        "1001",
        None,
        Some(&b),
        &CalculationContext::default(),
        monday(),
    );

    assert_eq!(days[0].early_departure_minutes, 40);
    assert_eq!(days[0].late_minutes, 0);
    assert_eq!(days[0].diff_minutes, -40);
}

#[test]
fn timesheet_matches_date_cells_with_appended_times() {
    let b = block("1001", &[("2024-03-04 00:00:00", "09:00", "17:00", 480)]);
    let days = week_timesheet(
        "1001",
        None,
        Some(&b),
        &CalculationContext::default(),
        monday(),
    );

    assert_eq!(days[0].status, "worked");
    assert_eq!(days[0].actual_minutes, 480);
}
