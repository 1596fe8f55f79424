use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::grid::{Cell, Grid};

/// Sentinel for identity fields the sheet did not provide.
pub const UNKNOWN: &str = "unknown";
/// Marker for a missing day-level cell (date, clock time or status).
pub const MISSING: &str = "-";

/// Identity labels found on a "Person ID" row and the fixed offset from the
/// label cell to its value cell. The export writes the value three columns
/// to the right of each label regardless of which column the label lands in.
const IDENTITY_OFFSET: &[(&str, usize)] = &[
    ("Employee Name", 3),
    ("Department", 3),
    ("Joining Date", 3),
    ("Position", 3),
];

/// One employee's raw attendance for the reporting period, reconstructed
/// from the label-driven rows of the export.
///
/// The four day-level sequences are parallel: index `i` across `dates`,
/// `check_ins`, `check_outs`, `attended_minutes` and `statuses` refers to
/// the same calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceBlock {
    pub person_id: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub joining_date: String,
    pub dates: Vec<String>,
    pub check_ins: Vec<String>,
    pub check_outs: Vec<String>,
    pub attended_minutes: Vec<i64>,
    pub statuses: Vec<String>,
    pub summary: String,
}

impl AttendanceBlock {
    fn new(person_id: String) -> Self {
        Self {
            person_id,
            name: UNKNOWN.to_string(),
            department: UNKNOWN.to_string(),
            position: UNKNOWN.to_string(),
            joining_date: UNKNOWN.to_string(),
            dates: Vec::new(),
            check_ins: Vec::new(),
            check_outs: Vec::new(),
            attended_minutes: Vec::new(),
            statuses: Vec::new(),
            summary: String::new(),
        }
    }
}

/// Parser output: the employee blocks in sheet order plus the soft warnings
/// collected along the way. Bad cells degrade to markers instead of failing
/// the batch, but every degradation is recorded here so data quality stays
/// auditable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReport {
    pub blocks: Vec<AttendanceBlock>,
    pub warnings: Vec<String>,
}

/// Parse a raw attendance grid into per-employee blocks.
///
/// A block starts at a row whose first cell is exactly "Person ID" and runs
/// until the next such row or the end of the grid. Day-level rows are
/// recognized by loosely matching the first cell; anything unrecognized is
/// skipped. A grid without a single "Person ID" row parses to an empty
/// report, which is a valid outcome, not an error.
pub fn parse(grid: &Grid) -> ParsedReport {
    let mut report = ParsedReport::default();
    let base_date = find_base_date(grid);
    let mut current: Option<AttendanceBlock> = None;

    for (idx, row) in grid.rows.iter().enumerate() {
        let first = row.first().and_then(Cell::as_text).unwrap_or_default();

        if first == "Person ID" {
            if let Some(block) = current.take() {
                flush(block, &mut report);
            }
            let person_id = row
                .get(1)
                .and_then(Cell::as_text)
                .unwrap_or_else(|| UNKNOWN.to_string());
            let mut block = AttendanceBlock::new(person_id);
            read_identity_cells(row, &mut block);
            current = Some(block);
            continue;
        }

        let Some(block) = current.as_mut() else {
            // Preamble rows before the first employee (titles, the report
            // range header) carry no day data.
            continue;
        };

        let key = first.to_lowercase();
        if key.contains("date") && key.len() < 10 {
            block.dates = day_cells(row, base_date);
        } else if key.contains("check-in1") {
            block.check_ins = text_cells(row);
        } else if key.contains("check-out1") {
            block.check_outs = text_cells(row);
        } else if key.contains("attended") {
            block.attended_minutes = minute_cells(row, idx, &mut report.warnings);
        } else if key.contains("status") {
            block.statuses = text_cells(row);
        } else if first == "Summary" {
            block.summary = row.get(1).and_then(Cell::as_text).unwrap_or_default();
        }
    }

    if let Some(block) = current.take() {
        flush(block, &mut report);
    }

    report
}

/// The export carries one free-text header cell with the report range, e.g.
/// "Att. report From: 2024-03-01 To: 2024-03-31". When present, the embedded
/// from-date anchors every day column: column position is trustworthy in
/// these exports even when the per-column date text is not.
fn find_base_date(grid: &Grid) -> Option<NaiveDate> {
    let pattern = Regex::new(r"From:\s*(\d{4}-\d{2}-\d{2})").ok()?;
    for row in &grid.rows {
        let Some(first) = row.first().and_then(Cell::as_text) else {
            continue;
        };
        if first.contains("From:") && first.contains("To:") {
            if let Some(caps) = pattern.captures(&first) {
                if let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
                    return Some(date);
                }
            }
        }
    }
    None
}

fn read_identity_cells(row: &[Cell], block: &mut AttendanceBlock) {
    for (i, cell) in row.iter().enumerate() {
        let Some(label) = cell.as_text() else { continue };
        for (name, offset) in IDENTITY_OFFSET {
            if label == *name {
                let value = row
                    .get(i + offset)
                    .and_then(Cell::as_text)
                    .unwrap_or_else(|| UNKNOWN.to_string());
                match *name {
                    "Employee Name" => block.name = value,
                    "Department" => block.department = value,
                    "Joining Date" => block.joining_date = value,
                    "Position" => block.position = value,
                    _ => unreachable!(),
                }
            }
        }
    }
}

/// Day-column cells of a label row, excluding the label itself.
fn text_cells(row: &[Cell]) -> Vec<String> {
    row.iter()
        .skip(1)
        .map(|c| c.as_text().unwrap_or_else(|| MISSING.to_string()))
        .collect()
}

fn day_cells(row: &[Cell], base_date: Option<NaiveDate>) -> Vec<String> {
    let raw = text_cells(row);
    let Some(base) = base_date else {
        return raw;
    };
    // Rebuild each day's real date from the column offset; the raw cell text
    // is kept only as a presence marker.
    raw.iter()
        .enumerate()
        .map(|(i, cell)| {
            if cell == MISSING {
                MISSING.to_string()
            } else {
                (base + Duration::days(i as i64)).format("%Y-%m-%d").to_string()
            }
        })
        .collect()
}

fn minute_cells(row: &[Cell], row_idx: usize, warnings: &mut Vec<String>) -> Vec<i64> {
    row.iter()
        .skip(1)
        .enumerate()
        .map(|(col, cell)| match cell {
            Cell::Empty => 0,
            Cell::Text(s) if s.trim() == MISSING || s.trim().is_empty() => 0,
            other => match other.as_number() {
                Some(n) if n >= 0.0 => n as i64,
                Some(_) => 0,
                None => {
                    warnings.push(format!(
                        "row {}: unreadable attended-minutes cell {:?} in column {}, using 0",
                        row_idx + 1,
                        other.as_text().unwrap_or_default(),
                        col + 1
                    ));
                    0
                }
            },
        })
        .collect()
}

/// Close an employee block and append it, normalizing the parallel sequences
/// to the length of the dates row so index `i` always refers to one day.
fn flush(mut block: AttendanceBlock, report: &mut ParsedReport) {
    let n = block.dates.len();
    let mut resized = false;

    resized |= resize_text(&mut block.check_ins, n);
    resized |= resize_text(&mut block.check_outs, n);
    resized |= resize_text(&mut block.statuses, n);
    if block.attended_minutes.len() != n {
        block.attended_minutes.resize(n, 0);
        resized = true;
    }

    if resized {
        let warning = format!(
            "employee {}: day rows had uneven lengths, normalized to {} day(s)",
            block.person_id, n
        );
        log::warn!("{warning}");
        report.warnings.push(warning);
    }

    report.blocks.push(block);
}

fn resize_text(seq: &mut Vec<String>, n: usize) -> bool {
    if seq.len() == n {
        return false;
    }
    seq.resize(n, MISSING.to_string());
    true
}
