//! Best-effort import of planner spreadsheets whose day cells hold free-form
//! shift text ("8am - 4pm", "10 - 18", "off", "congé"). This is an adapter
//! that feeds the schedule store; the statistics core never sees any of it.

use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::core::grid::{Cell, Grid};
use crate::core::schedule::{DaySchedule, WeeklySchedule, DAY_NAMES};
use crate::database::models::Employee;
use crate::database::repositories::ScheduleRepository;

/// Outcome of one import run. Row-level problems land in `logs`; only
/// storage failures count as `errors`. Neither aborts the rest of the file.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub updated: usize,
    pub logs: Vec<String>,
    pub errors: Vec<String>,
}

/// Interpret one free-form shift cell.
///
/// Empty and leave-style text mean an explicit rest day; "start - end" text
/// is parsed with am/pm awareness; anything else keeps the default office
/// hours, which is what the planner sheets mean by an unannotated day.
/// Returns the day plan and whether the cell carried recognizable intent.
pub fn parse_shift_cell(raw: &str) -> (DaySchedule, bool) {
    let value = raw.trim().to_lowercase();

    if value.is_empty() {
        return (DaySchedule::rest(), true);
    }
    if value.contains("conge") || value.contains("congé") {
        return (DaySchedule::rest(), true);
    }
    if value.contains("off") || value.contains("repos") {
        return (DaySchedule::rest(), true);
    }
    if value.contains('-') {
        if let Some((start, end)) = parse_shift_range(&value) {
            return (
                DaySchedule {
                    start: Some(start),
                    end: Some(end),
                    is_rest: false,
                },
                true,
            );
        }
        // Unreadable range: treat as rest rather than invent hours.
        log::warn!("unparsable shift range '{}', falling back to rest", raw.trim());
        return (DaySchedule::rest(), true);
    }

    (DaySchedule::default_office_hours(), false)
}

fn parse_shift_range(value: &str) -> Option<(String, String)> {
    let (left, right) = value.split_once('-')?;
    let start = parse_shift_time(left)?;
    let end = parse_shift_time(right)?;
    Some((start, end))
}

/// "8am" -> "08:00", "4pm" -> "16:00", "10:30" -> "10:30". Bare numbers are
/// read as 24-hour times; 12am maps to midnight.
fn parse_shift_time(raw: &str) -> Option<String> {
    let raw = raw.to_lowercase();
    let is_pm = raw.contains("pm");
    let is_am = raw.contains("am");

    let digits = Regex::new(r"\d+").ok()?;
    let mut numbers = digits.find_iter(&raw);
    let mut hour: u32 = numbers.next()?.as_str().parse().ok()?;
    let minute: u32 = numbers
        .next()
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    if is_pm && hour < 12 {
        hour += 12;
    }
    if is_am && hour == 12 {
        hour = 0;
    }
    if hour > 23 || minute > 59 {
        return None;
    }

    Some(format!("{:02}:{:02}", hour, minute))
}

/// Assemble a weekly plan from seven day cells, Monday first. The second
/// return value says whether any cell carried real planning intent; rows
/// where nothing did are not worth saving.
pub fn plan_from_cells(cells: &[String]) -> (WeeklySchedule, bool) {
    let mut schedule = WeeklySchedule::default();
    let mut any_intent = false;

    for (i, day) in DAY_NAMES.iter().enumerate() {
        let raw = cells.get(i).map(String::as_str).unwrap_or("");
        let (plan, had_intent) = parse_shift_cell(raw);
        any_intent |= had_intent;
        schedule.days.insert((*day).to_string(), plan);
    }

    (schedule, any_intent)
}

/// Import a planner grid: first row is the header, one data row per
/// employee, seven day columns following the name column. Rows that match a
/// known employee are saved as that employee's individual schedule for the
/// given week.
pub async fn import_plannings(
    grid: &Grid,
    week_monday: NaiveDate,
    target_department: Option<&str>,
    employees: &[Employee],
    schedules: &ScheduleRepository,
) -> Result<ImportOutcome> {
    let mut outcome = ImportOutcome::default();

    let Some(header) = grid.rows.first() else {
        outcome.logs.push("empty import file".to_string());
        return Ok(outcome);
    };

    let name_col = find_name_column(header);
    let day_start = name_col + 1;
    if day_start + 7 > header.len() {
        anyhow::bail!("planner grid needs seven day columns after the name column");
    }

    for row in grid.rows.iter().skip(1) {
        let raw_name = row
            .get(name_col)
            .and_then(Cell::as_text)
            .unwrap_or_default();
        let lowered = raw_name.to_lowercase();
        if raw_name.is_empty() || lowered == "nan" || lowered == "none" || lowered == "total" {
            continue;
        }

        let Some(employee) = match_employee(&raw_name, target_department, employees) else {
            outcome
                .logs
                .push(format!("skipped '{}': no matching employee", raw_name));
            continue;
        };

        let cells: Vec<String> = (day_start..day_start + 7)
            .map(|col| row.get(col).and_then(Cell::as_text).unwrap_or_default())
            .collect();
        let (schedule, any_intent) = plan_from_cells(&cells);
        if !any_intent {
            outcome
                .logs
                .push(format!("skipped '{}': no planning data in row", raw_name));
            continue;
        }

        match schedules
            .save_weekly(&employee.person_id, week_monday, &schedule)
            .await
        {
            Ok(()) => {
                outcome.updated += 1;
                outcome.logs.push(format!(
                    "updated schedule for {}",
                    employee.name.as_deref().unwrap_or(&employee.person_id)
                ));
            }
            Err(err) => outcome.errors.push(format!(
                "failed to save schedule for {}: {}",
                employee.person_id, err
            )),
        }
    }

    Ok(outcome)
}

fn find_name_column(header: &[Cell]) -> usize {
    for (i, cell) in header.iter().enumerate() {
        if let Some(text) = cell.as_text() {
            let lowered = text.to_lowercase();
            if lowered.contains("nom") || lowered.contains("name") || lowered.contains("employee") {
                return i;
            }
        }
    }
    0
}

/// Exact person-id or name match first, then containment either way, with an
/// optional department filter on the fuzzy pass.
fn match_employee<'a>(
    raw_name: &str,
    target_department: Option<&str>,
    employees: &'a [Employee],
) -> Option<&'a Employee> {
    let lowered = raw_name.to_lowercase();

    for employee in employees {
        if employee.person_id == raw_name {
            return Some(employee);
        }
        if let Some(name) = &employee.name {
            if name.to_lowercase() == lowered {
                return Some(employee);
            }
        }
    }

    for employee in employees {
        let Some(name) = &employee.name else { continue };
        let name_lowered = name.to_lowercase();
        if !name_lowered.contains(&lowered) && !lowered.contains(&name_lowered) {
            continue;
        }
        if let Some(target) = target_department {
            let dept = employee.department.as_deref().unwrap_or("");
            if !dept.to_lowercase().contains(&target.to_lowercase()) {
                continue;
            }
        }
        return Some(employee);
    }

    None
}
