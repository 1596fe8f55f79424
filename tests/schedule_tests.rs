use attendly::core::schedule::{
    monday_of_week, CalculationContext, DaySchedule, WeeklySchedule,
};
use chrono::{NaiveDate, Weekday};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn week_with(weekday: Weekday, plan: DaySchedule) -> WeeklySchedule {
    let mut week = WeeklySchedule::default();
    week.set_day(weekday, plan);
    week
}

#[test]
fn individual_schedule_wins_over_departmental() {
    let monday = date(2024, 3, 4);
    let mut context = CalculationContext::default();
    context.individual_schedules.insert(
        ("1001".to_string(), monday),
        week_with(Weekday::Mon, DaySchedule::working("08:00", "16:00")),
    );
    context.department_schedules.insert(
        "Operations".to_string(),
        week_with(Weekday::Mon, DaySchedule::working("10:00", "18:00")),
    );
    context
        .employee_departments
        .insert("1001".to_string(), "Operations".to_string());

    let resolved = context.resolve_day_schedule("1001", Some("Operations"), monday);
    assert_eq!(resolved, DaySchedule::working("08:00", "16:00"));
}

#[test]
fn missing_day_in_individual_week_falls_through_to_department() {
    let monday = date(2024, 3, 4);
    let tuesday = date(2024, 3, 5);
    let mut context = CalculationContext::default();
    // Individual week exists but only defines Monday.
    context.individual_schedules.insert(
        ("1001".to_string(), monday),
        week_with(Weekday::Mon, DaySchedule::working("08:00", "16:00")),
    );
    context.department_schedules.insert(
        "Operations".to_string(),
        week_with(Weekday::Tue, DaySchedule::working("10:00", "18:00")),
    );
    context
        .employee_departments
        .insert("1001".to_string(), "Operations".to_string());

    let resolved = context.resolve_day_schedule("1001", None, tuesday);
    assert_eq!(resolved, DaySchedule::working("10:00", "18:00"));
}

#[test]
fn unknown_employee_and_department_get_office_hours() {
    let context = CalculationContext::default();
    let resolved = context.resolve_day_schedule("9999", None, date(2024, 3, 6));
    assert_eq!(resolved, DaySchedule::default_office_hours());
    assert!(!resolved.is_rest);
}

#[test]
fn department_from_sheet_is_used_when_store_has_no_mapping() {
    let mut context = CalculationContext::default();
    context.department_schedules.insert(
        "Security".to_string(),
        week_with(Weekday::Wed, DaySchedule::working("20:00", "04:00")),
    );

    let resolved = context.resolve_day_schedule("1001", Some("Security"), date(2024, 3, 6));
    assert_eq!(resolved, DaySchedule::working("20:00", "04:00"));
}

#[test]
fn stored_department_mapping_overrides_sheet_department() {
    let mut context = CalculationContext::default();
    context
        .employee_departments
        .insert("1001".to_string(), "Kitchen".to_string());
    context.department_schedules.insert(
        "Kitchen".to_string(),
        week_with(Weekday::Wed, DaySchedule::working("06:00", "14:00")),
    );
    context.department_schedules.insert(
        "Security".to_string(),
        week_with(Weekday::Wed, DaySchedule::working("20:00", "04:00")),
    );

    let resolved = context.resolve_day_schedule("1001", Some("Security"), date(2024, 3, 6));
    assert_eq!(resolved, DaySchedule::working("06:00", "14:00"));
}

#[test]
fn only_an_explicit_entry_counts_as_rest() {
    let mut context = CalculationContext::default();
    context.department_schedules.insert(
        "Operations".to_string(),
        week_with(Weekday::Sat, DaySchedule::rest()),
    );
    context
        .employee_departments
        .insert("1001".to_string(), "Operations".to_string());

    // Saturday has an explicit rest entry.
    let saturday = context.resolve_day_schedule("1001", None, date(2024, 3, 9));
    assert!(saturday.is_rest);

    // Friday has no entry at all: that is "no schedule", not rest, so the
    // chain continues to the default.
    let friday = context.resolve_day_schedule("1001", None, date(2024, 3, 8));
    assert!(!friday.is_rest);
    assert_eq!(friday, DaySchedule::default_office_hours());
}

#[test]
fn individual_lookup_is_keyed_by_the_monday_of_the_week() {
    let monday = date(2024, 3, 4);
    let thursday = date(2024, 3, 7);
    let mut context = CalculationContext::default();
    context.individual_schedules.insert(
        ("1001".to_string(), monday),
        week_with(Weekday::Thu, DaySchedule::working("12:00", "20:00")),
    );

    assert_eq!(monday_of_week(thursday), monday);
    let resolved = context.resolve_day_schedule("1001", None, thursday);
    assert_eq!(resolved, DaySchedule::working("12:00", "20:00"));

    // The same weekday one week later misses the override.
    let next_thursday = date(2024, 3, 14);
    let resolved = context.resolve_day_schedule("1001", None, next_thursday);
    assert_eq!(resolved, DaySchedule::default_office_hours());
}
