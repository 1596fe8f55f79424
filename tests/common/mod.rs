#![allow(dead_code)]

use attendly::core::grid::{Cell, Grid};
use attendly::core::parser::AttendanceBlock;

pub fn t(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn n(value: f64) -> Cell {
    Cell::Number(value)
}

pub fn e() -> Cell {
    Cell::Empty
}

/// Build an attendance block directly, one tuple per day:
/// (date, check_in, check_out, attended_minutes).
pub fn block(person_id: &str, days: &[(&str, &str, &str, i64)]) -> AttendanceBlock {
    AttendanceBlock {
        person_id: person_id.to_string(),
        name: "Test Person".to_string(),
        department: "Operations".to_string(),
        position: "Agent".to_string(),
        joining_date: "2020-01-01".to_string(),
        dates: days.iter().map(|d| d.0.to_string()).collect(),
        check_ins: days.iter().map(|d| d.1.to_string()).collect(),
        check_outs: days.iter().map(|d| d.2.to_string()).collect(),
        attended_minutes: days.iter().map(|d| d.3).collect(),
        statuses: days.iter().map(|_| "-".to_string()).collect(),
        summary: String::new(),
    }
}

/// One-employee export grid: identity row, a date row for 2024-03-04..08
/// (Monday through Friday), punches at 09:00/17:00 and 480 attended minutes
/// per day.
pub fn standard_week_grid() -> Grid {
    Grid::new(vec![
        vec![
            t("Person ID"),
            t("1001"),
            e(),
            t("Employee Name"),
            e(),
            e(),
            t("Alice Durand"),
            t("Department"),
            e(),
            e(),
            t("Operations"),
        ],
        vec![
            t("Date"),
            t("2024-03-04"),
            t("2024-03-05"),
            t("2024-03-06"),
            t("2024-03-07"),
            t("2024-03-08"),
        ],
        vec![
            t("Check-in1"),
            t("09:00"),
            t("09:00"),
            t("09:00"),
            t("09:00"),
            t("09:00"),
        ],
        vec![
            t("Check-out1"),
            t("17:00"),
            t("17:00"),
            t("17:00"),
            t("17:00"),
            t("17:00"),
        ],
        vec![t("Attended (min)"), n(480.0), n(480.0), n(480.0), n(480.0), n(480.0)],
        vec![t("Status"), t("OK"), t("OK"), t("OK"), t("OK"), t("OK")],
    ])
}
