use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::parser::AttendanceBlock;
use crate::core::schedule::CalculationContext;

/// Clock-in markers that mean "no punch recorded". Matched case-sensitively
/// against the trimmed cell value.
pub(crate) const NO_PUNCH: [&str; 4] = ["-", "", "nan", "None"];

/// Aggregate attendance metrics for one employee over one reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeStatistics {
    pub total_hours: f64,
    pub total_days_worked: i64,
    pub total_days_absent: i64,
    pub total_weekends: i64,
    pub total_late_minutes: i64,
    pub count_lates: i64,
    pub total_overtime_minutes: i64,
    pub total_undertime_minutes: i64,
    pub average_hours_per_day: f64,
}

/// Aggregates over a whole batch, for the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStatistics {
    pub total_employees: i64,
    pub total_hours: f64,
    pub avg_hours_per_employee: f64,
    pub total_days_worked: i64,
    pub total_days_absent: i64,
    pub attendance_rate: f64,
}

/// Compute one employee's statistics from their parsed block and the
/// pre-loaded schedule context.
///
/// Pure function of its inputs: no state survives between employees, and
/// calling it twice with the same block and context yields identical output.
/// A manual override, when supplied, replaces the computed result entirely;
/// it exists for display corrections and never feeds back into any other
/// employee's computation. Days that cannot be accounted for are skipped
/// and noted in `warnings`, same policy as the parser.
pub fn compute_statistics(
    block: &AttendanceBlock,
    context: &CalculationContext,
    manual_override: Option<&EmployeeStatistics>,
    warnings: &mut Vec<String>,
) -> EmployeeStatistics {
    if let Some(manual) = manual_override {
        return manual.clone();
    }

    let mut total_minutes: i64 = 0;
    let mut stats = EmployeeStatistics::default();
    let department = if block.department == crate::core::parser::UNKNOWN {
        None
    } else {
        Some(block.department.as_str())
    };

    for (i, date_cell) in block.dates.iter().enumerate() {
        let Some(date) = parse_day_date(date_cell) else {
            // No usable calendar date means no weekday, so neither schedule
            // resolution nor the Sunday rule can apply. Skip the day. The
            // "-"/"nan" markers are routine padding; anything else failing
            // to parse is worth surfacing.
            let trimmed = date_cell.trim();
            if !NO_PUNCH.contains(&trimmed) {
                let warning = format!(
                    "employee {}: unreadable date cell '{}', day skipped",
                    block.person_id, trimmed
                );
                log::warn!("{warning}");
                warnings.push(warning);
            }
            continue;
        };

        let schedule = context.resolve_day_schedule(&block.person_id, department, date);

        let check_in = block
            .check_ins
            .get(i)
            .map(|s| s.trim())
            .unwrap_or("-");
        let has_clocked_in = !NO_PUNCH.contains(&check_in);
        let minutes = block.attended_minutes.get(i).copied().unwrap_or(0).max(0);

        if minutes > 0 || has_clocked_in {
            stats.total_days_worked += 1;
            total_minutes += minutes;

            if !schedule.is_rest {
                if has_clocked_in {
                    if let (Some(actual), Some(planned)) = (
                        parse_clock_time(check_in),
                        schedule.start.as_deref().and_then(parse_clock_time),
                    ) {
                        if actual > planned {
                            let late = (actual - planned).num_minutes();
                            if late > 0 {
                                stats.total_late_minutes += late;
                                stats.count_lates += 1;
                            }
                        }
                    }
                }

                if minutes > 0 {
                    if let Some(planned_minutes) = planned_minutes(&schedule) {
                        let delta = minutes - planned_minutes;
                        if delta > 0 {
                            stats.total_overtime_minutes += delta;
                        } else if delta < 0 {
                            stats.total_undertime_minutes += -delta;
                        }
                    }
                }
            }
        } else if schedule.is_rest || date.weekday() == Weekday::Sun {
            // Sunday counts as rest for absence purposes regardless of the
            // schedule; see the planner docs before "fixing" this.
            stats.total_weekends += 1;
        } else {
            stats.total_days_absent += 1;
        }
    }

    stats.total_hours = round2(total_minutes as f64 / 60.0);
    stats.average_hours_per_day = if stats.total_days_worked > 0 {
        round2(stats.total_hours / stats.total_days_worked as f64)
    } else {
        0.0
    };

    stats
}

/// Compute statistics for every block in a batch against one shared
/// context, collecting the per-day warnings alongside the results.
pub fn compute_batch(
    blocks: &[AttendanceBlock],
    context: &CalculationContext,
    overrides: &HashMap<String, EmployeeStatistics>,
) -> (Vec<EmployeeStatistics>, Vec<String>) {
    let mut warnings = Vec::new();
    let statistics = blocks
        .iter()
        .map(|block| {
            compute_statistics(
                block,
                context,
                overrides.get(&block.person_id),
                &mut warnings,
            )
        })
        .collect();
    (statistics, warnings)
}

/// Batch-level aggregates over already-computed per-employee statistics.
pub fn global_statistics(all: &[EmployeeStatistics]) -> GlobalStatistics {
    let total_employees = all.len() as i64;
    let total_hours: f64 = all.iter().map(|s| s.total_hours).sum();
    let total_days_worked: i64 = all.iter().map(|s| s.total_days_worked).sum();
    let total_days_absent: i64 = all.iter().map(|s| s.total_days_absent).sum();
    let accounted = total_days_worked + total_days_absent;

    GlobalStatistics {
        total_employees,
        total_hours: round2(total_hours),
        avg_hours_per_employee: if total_employees > 0 {
            round2(total_hours / total_employees as f64)
        } else {
            0.0
        },
        total_days_worked,
        total_days_absent,
        attendance_rate: if accounted > 0 {
            round2(total_days_worked as f64 / accounted as f64 * 100.0)
        } else {
            0.0
        },
    }
}

/// Planned working minutes for a non-rest day, wrapping shifts that end past
/// midnight. `None` when either endpoint is missing or unreadable.
pub(crate) fn planned_minutes(schedule: &crate::core::schedule::DaySchedule) -> Option<i64> {
    let start = schedule.start.as_deref().and_then(parse_clock_time)?;
    let end = schedule.end.as_deref().and_then(parse_clock_time)?;
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 1440;
    }
    Some(minutes)
}

/// Parse the leading "YYYY-MM-DD" of a date cell, tolerating trailing time
/// components the export sometimes appends.
fn parse_day_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if NO_PUNCH.contains(&trimmed) {
        return None;
    }
    let head: String = trimmed.chars().take(10).collect();
    NaiveDate::parse_from_str(&head, "%Y-%m-%d").ok()
}

/// Parse a clock time, keeping only the leading "HH:MM" so that seconds or
/// stray suffixes in hand-edited cells do not break the comparison.
pub(crate) fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let head: String = value.trim().chars().take(5).collect();
    NaiveTime::parse_from_str(&head, "%H:%M").ok()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
