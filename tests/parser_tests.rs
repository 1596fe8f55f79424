use attendly::core::grid::Grid;
use attendly::core::parser::{parse, MISSING, UNKNOWN};
use pretty_assertions::assert_eq;

mod common;
use common::{e, n, standard_week_grid, t};

#[test]
fn block_count_matches_person_id_rows() {
    let grid = Grid::new(vec![
        vec![t("Attendance Export")],
        vec![t("Person ID"), t("1001")],
        vec![t("Date"), t("2024-03-04")],
        vec![t("Person ID"), t("1002")],
        vec![t("Date"), t("2024-03-04")],
        vec![t("some trailing note")],
    ]);

    let report = parse(&grid);

    assert_eq!(report.blocks.len(), 2);
    assert_eq!(report.blocks[0].person_id, "1001");
    assert_eq!(report.blocks[1].person_id, "1002");
}

#[test]
fn empty_grid_yields_empty_report() {
    let report = parse(&Grid::default());
    assert_eq!(report.blocks.len(), 0);
    assert_eq!(report.warnings.len(), 0);
}

#[test]
fn grid_without_person_id_rows_is_a_valid_empty_result() {
    let grid = Grid::new(vec![
        vec![t("Date"), t("2024-03-04")],
        vec![t("Check-in1"), t("09:00")],
    ]);
    assert_eq!(parse(&grid).blocks.len(), 0);
}

#[test]
fn identity_fields_read_three_cells_right_of_their_label() {
    let report = parse(&standard_week_grid());
    let block = &report.blocks[0];

    assert_eq!(block.name, "Alice Durand");
    assert_eq!(block.department, "Operations");
    // Labels absent from the sheet keep the sentinel.
    assert_eq!(block.position, UNKNOWN);
    assert_eq!(block.joining_date, UNKNOWN);
}

#[test]
fn identity_offset_out_of_bounds_defaults_to_unknown() {
    let grid = Grid::new(vec![
        vec![t("Person ID"), t("1001"), t("Employee Name")],
        vec![t("Date"), t("2024-03-04")],
    ]);
    let report = parse(&grid);
    assert_eq!(report.blocks[0].name, UNKNOWN);
}

#[test]
fn parallel_sequences_share_one_length() {
    // Ragged rows: 3 dates, 2 check-ins, 4 check-outs, 1 attended value.
    let grid = Grid::new(vec![
        vec![t("Person ID"), t("1001")],
        vec![t("Date"), t("2024-03-04"), t("2024-03-05"), t("2024-03-06")],
        vec![t("Check-in1"), t("09:00"), t("09:05")],
        vec![t("Check-out1"), t("17:00"), t("17:00"), t("17:00"), t("17:00")],
        vec![t("Attended"), n(480.0)],
    ]);

    let report = parse(&grid);
    let block = &report.blocks[0];

    assert_eq!(block.dates.len(), 3);
    assert_eq!(block.check_ins.len(), 3);
    assert_eq!(block.check_outs.len(), 3);
    assert_eq!(block.attended_minutes.len(), 3);
    assert_eq!(block.statuses.len(), 3);
    assert_eq!(block.check_ins[2], MISSING);
    assert_eq!(block.attended_minutes[1], 0);
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("uneven lengths")));
}

#[test]
fn report_range_header_rebuilds_dates_from_column_position() {
    let grid = Grid::new(vec![
        vec![t("Attendance Report  From: 2024-03-04  To: 2024-03-08")],
        vec![t("Person ID"), t("1001")],
        // Per-column date text is junk; positions are what counts.
        vec![t("Date"), t("Mon"), t("Tue"), e(), t("Thu")],
        vec![t("Check-in1"), t("09:00"), t("09:00"), t("-"), t("09:00")],
    ]);

    let report = parse(&grid);
    let block = &report.blocks[0];

    assert_eq!(
        block.dates,
        vec!["2024-03-04", "2024-03-05", "-", "2024-03-07"]
    );
}

#[test]
fn without_range_header_raw_date_text_is_kept() {
    let grid = Grid::new(vec![
        vec![t("Person ID"), t("1001")],
        vec![t("Date"), t("2024-03-04"), t("bad date")],
    ]);
    let report = parse(&grid);
    assert_eq!(report.blocks[0].dates, vec!["2024-03-04", "bad date"]);
}

#[test]
fn malformed_minute_cells_degrade_to_zero_with_a_warning() {
    let grid = Grid::new(vec![
        vec![t("Person ID"), t("1001")],
        vec![t("Date"), t("2024-03-04"), t("2024-03-05"), t("2024-03-06")],
        vec![t("Attended"), t("480"), t("n/a"), t("-")],
    ]);

    let report = parse(&grid);
    let block = &report.blocks[0];

    assert_eq!(block.attended_minutes, vec![480, 0, 0]);
    // One warning for the unreadable cell; "-" degrades silently.
    let minute_warnings = report
        .warnings
        .iter()
        .filter(|w| w.contains("attended-minutes"))
        .count();
    assert_eq!(minute_warnings, 1);
}

#[test]
fn unrecognized_label_rows_are_ignored() {
    let grid = Grid::new(vec![
        vec![t("Person ID"), t("1001")],
        vec![t("Date"), t("2024-03-04")],
        vec![t("Badge Serial"), t("XYZ-1")],
        vec![t("Check-in1"), t("09:00")],
    ]);

    let report = parse(&grid);
    assert_eq!(report.blocks[0].check_ins, vec!["09:00"]);
}

#[test]
fn summary_row_requires_an_exact_label() {
    let grid = Grid::new(vec![
        vec![t("Person ID"), t("1001")],
        vec![t("Date"), t("2024-03-04")],
        vec![t("Summary"), t("present all week")],
    ]);

    let report = parse(&grid);
    assert_eq!(report.blocks[0].summary, "present all week");
}

#[test]
fn numeric_person_id_cells_read_as_integers() {
    let grid = Grid::new(vec![
        vec![t("Person ID"), n(1001.0)],
        vec![t("Date"), t("2024-03-04")],
    ]);
    assert_eq!(parse(&grid).blocks[0].person_id, "1001");
}

#[test]
fn standard_week_grid_parses_clean() {
    let report = parse(&standard_week_grid());
    assert_eq!(report.blocks.len(), 1);
    assert_eq!(report.warnings.len(), 0);

    let block = &report.blocks[0];
    assert_eq!(block.dates.len(), 5);
    assert_eq!(block.attended_minutes, vec![480; 5]);
    assert_eq!(block.statuses, vec!["OK"; 5]);
}
