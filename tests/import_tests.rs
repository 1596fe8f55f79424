use attendly::core::schedule::DaySchedule;
use attendly::services::import::{parse_shift_cell, plan_from_cells};
use pretty_assertions::assert_eq;

#[test]
fn am_pm_range_maps_to_twenty_four_hour_times() {
    let (plan, intent) = parse_shift_cell("8am - 4pm");
    assert!(intent);
    assert_eq!(plan, DaySchedule::working("08:00", "16:00"));
}

#[test]
fn minutes_inside_am_pm_times_are_kept() {
    let (plan, intent) = parse_shift_cell("8:30am - 5pm");
    assert!(intent);
    assert_eq!(plan, DaySchedule::working("08:30", "17:00"));
}

#[test]
fn bare_numbers_read_as_twenty_four_hour_times() {
    let (plan, intent) = parse_shift_cell("10 - 18");
    assert!(intent);
    assert_eq!(plan, DaySchedule::working("10:00", "18:00"));
}

#[test]
fn overnight_ranges_keep_both_endpoints() {
    let (plan, intent) = parse_shift_cell("6pm - 3am");
    assert!(intent);
    assert_eq!(plan, DaySchedule::working("18:00", "03:00"));
}

#[test]
fn noon_and_midnight_edge_cases() {
    let (plan, _) = parse_shift_cell("12am - 12pm");
    assert_eq!(plan, DaySchedule::working("00:00", "12:00"));
}

#[test]
fn leave_words_mean_rest() {
    for cell in ["off", "OFF", "repos", "congé", "Congé payé", ""] {
        let (plan, intent) = parse_shift_cell(cell);
        assert!(intent, "cell {:?} should carry intent", cell);
        assert!(plan.is_rest, "cell {:?} should be rest", cell);
    }
}

#[test]
fn unreadable_range_falls_back_to_rest() {
    let (plan, intent) = parse_shift_cell("morning - late");
    assert!(intent);
    assert!(plan.is_rest);
}

#[test]
fn unannotated_text_keeps_office_hours_without_intent() {
    let (plan, intent) = parse_shift_cell("training");
    assert!(!intent);
    assert_eq!(plan, DaySchedule::default_office_hours());
}

#[test]
fn week_row_is_read_monday_first() {
    let cells: Vec<String> = vec![
        "8am - 4pm".to_string(),
        "8am - 4pm".to_string(),
        "off".to_string(),
        "10 - 18".to_string(),
        "8am - 4pm".to_string(),
        "".to_string(),
        "".to_string(),
    ];

    let (schedule, any_intent) = plan_from_cells(&cells);
    assert!(any_intent);

    assert_eq!(
        schedule.days.get("Monday"),
        Some(&DaySchedule::working("08:00", "16:00"))
    );
    assert!(schedule.days.get("Wednesday").unwrap().is_rest);
    assert_eq!(
        schedule.days.get("Thursday"),
        Some(&DaySchedule::working("10:00", "18:00"))
    );
    assert!(schedule.days.get("Saturday").unwrap().is_rest);
    assert!(schedule.days.get("Sunday").unwrap().is_rest);
}

#[test]
fn short_rows_pad_missing_days_as_rest() {
    let cells: Vec<String> = vec!["8am - 4pm".to_string()];
    let (schedule, any_intent) = plan_from_cells(&cells);

    assert!(any_intent);
    assert_eq!(schedule.days.len(), 7);
    assert!(schedule.days.get("Sunday").unwrap().is_rest);
}

#[test]
fn all_unannotated_cells_mean_no_intent() {
    let cells: Vec<String> = (0..7).map(|_| "see manager".to_string()).collect();
    let (_, any_intent) = plan_from_cells(&cells);
    assert!(!any_intent);
}
