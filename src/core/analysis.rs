//! Day-level analyses over parsed attendance blocks: punch anomalies and
//! the per-week timesheet detail. Pure over their inputs, like the rest of
//! the core.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::core::parser::{AttendanceBlock, MISSING};
use crate::core::schedule::{day_name, CalculationContext};
use crate::core::stats::{parse_clock_time, planned_minutes, NO_PUNCH};

/// A day where someone clocked in but never clocked out. These are almost
/// always forgotten badge swipes and get chased up by hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutAnomaly {
    pub person_id: String,
    pub name: String,
    pub date: String,
    pub check_in: String,
}

/// Scan a batch for days with a check-in and no check-out. Days without a
/// usable date are ignored; they are already reported elsewhere.
pub fn missing_checkouts(blocks: &[AttendanceBlock]) -> Vec<CheckoutAnomaly> {
    let mut anomalies = Vec::new();

    for block in blocks {
        for (i, date) in block.dates.iter().enumerate() {
            let date = date.trim();
            if date.is_empty() || date == MISSING {
                continue;
            }
            let check_in = block.check_ins.get(i).map(|s| s.trim()).unwrap_or(MISSING);
            let check_out = block.check_outs.get(i).map(|s| s.trim()).unwrap_or(MISSING);

            if !NO_PUNCH.contains(&check_in) && NO_PUNCH.contains(&check_out) {
                anomalies.push(CheckoutAnomaly {
                    person_id: block.person_id.clone(),
                    name: block.name.clone(),
                    date: date.to_string(),
                    check_in: check_in.to_string(),
                });
            }
        }
    }

    anomalies
}

/// One day of the timesheet view: punches, resolved plan and the deltas
/// between them. Minute fields are zero when the comparison does not apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetDay {
    pub date: String,
    pub day_name: String,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub actual_minutes: i64,
    pub planned_minutes: i64,
    pub planned_start: Option<String>,
    pub planned_end: Option<String>,
    pub diff_minutes: i64,
    pub late_minutes: i64,
    pub early_departure_minutes: i64,
}

/// Build the seven-day timesheet for one employee's week.
///
/// Unlike the statistics engine, actual minutes here come from the punch
/// pair itself (check-out minus check-in, wrapped past midnight), because
/// this view exists to eyeball punches against the plan. A missing block or
/// a day with no matching punch row still yields a row.
pub fn week_timesheet(
    person_id: &str,
    department: Option<&str>,
    block: Option<&AttendanceBlock>,
    context: &CalculationContext,
    monday: NaiveDate,
) -> Vec<TimesheetDay> {
    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let date_str = date.format("%Y-%m-%d").to_string();

            // Punch rows are matched by date prefix; exports sometimes
            // append a time component to the date cell.
            let idx = block.and_then(|b| {
                b.dates.iter().position(|d| d.trim().starts_with(&date_str))
            });
            let check_in = block
                .zip(idx)
                .and_then(|(b, i)| b.check_ins.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| MISSING.to_string());
            let check_out = block
                .zip(idx)
                .and_then(|(b, i)| b.check_outs.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| MISSING.to_string());

            let schedule = context.resolve_day_schedule(person_id, department, date);
            let has_clocked_in = !NO_PUNCH.contains(&check_in.as_str());
            let has_clocked_out = !NO_PUNCH.contains(&check_out.as_str());

            let actual = if has_clocked_in && has_clocked_out {
                punch_pair_minutes(&check_in, &check_out).unwrap_or(0)
            } else {
                0
            };
            let planned = if schedule.is_rest {
                0
            } else {
                planned_minutes(&schedule).unwrap_or(0)
            };

            let mut diff = 0;
            let mut late = 0;
            let mut early = 0;
            if actual > 0 && planned > 0 {
                diff = actual - planned;
                if let (Some(t_in), Some(start)) = (
                    parse_clock_time(&check_in),
                    schedule.start.as_deref().and_then(parse_clock_time),
                ) {
                    late = (t_in - start).num_minutes().max(0);
                }
                if let (Some(t_out), Some(end)) = (
                    parse_clock_time(&check_out),
                    schedule.end.as_deref().and_then(parse_clock_time),
                ) {
                    early = (end - t_out).num_minutes().max(0);
                }
            }

            let status = if has_clocked_in {
                "worked"
            } else if schedule.is_rest {
                "rest"
            } else {
                "absent"
            };

            TimesheetDay {
                date: date_str,
                day_name: day_name(date.weekday()).to_string(),
                check_in,
                check_out,
                status: status.to_string(),
                actual_minutes: actual,
                planned_minutes: planned,
                planned_start: schedule.start.clone(),
                planned_end: schedule.end.clone(),
                diff_minutes: diff,
                late_minutes: late,
                early_departure_minutes: early,
            }
        })
        .collect()
}

/// Minutes between two punches, wrapping shifts that cross midnight.
fn punch_pair_minutes(check_in: &str, check_out: &str) -> Option<i64> {
    let t_in = parse_clock_time(check_in)?;
    let t_out = parse_clock_time(check_out)?;
    let mut minutes = (t_out - t_in).num_minutes();
    if minutes < 0 {
        minutes += 1440;
    }
    Some(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punch_pair_wraps_past_midnight() {
        assert_eq!(punch_pair_minutes("22:00", "06:00"), Some(480));
        assert_eq!(punch_pair_minutes("09:00", "17:30"), Some(510));
        assert_eq!(punch_pair_minutes("garbage", "17:00"), None);
    }
}
