use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Weekday names used as keys in persisted weekly schedules, Monday first.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Planned working window for one weekday, or an explicit rest day.
///
/// `start`/`end` are naive "HH:MM" time-of-day strings; only an explicit
/// `is_rest` marks a rest day, never a missing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub start: Option<String>,
    pub end: Option<String>,
    pub is_rest: bool,
}

impl DaySchedule {
    pub fn working(start: &str, end: &str) -> Self {
        Self {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            is_rest: false,
        }
    }

    pub fn rest() -> Self {
        Self {
            start: None,
            end: None,
            is_rest: true,
        }
    }

    /// The blanket fallback applied when neither an individual nor a
    /// departmental schedule defines the day.
    pub fn default_office_hours() -> Self {
        Self::working("09:00", "17:00")
    }
}

/// Seven-entry (at most) mapping of weekday name to planned day. Days the
/// planner never filled in are simply absent, which is different from an
/// explicit rest day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(flatten)]
    pub days: HashMap<String, DaySchedule>,
}

impl WeeklySchedule {
    pub fn day(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.days.get(day_name(weekday))
    }

    pub fn set_day(&mut self, weekday: Weekday, schedule: DaySchedule) {
        self.days.insert(day_name(weekday).to_string(), schedule);
    }
}

pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Monday of the ISO week containing `date`.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Read-only snapshot of every schedule a batch computation can need,
/// fetched from the store exactly once per batch. Statistics for many
/// employees over many days resolve against this in memory; nothing here is
/// mutated while a batch runs.
#[derive(Debug, Clone, Default)]
pub struct CalculationContext {
    /// Department name -> departmental default schedule.
    pub department_schedules: HashMap<String, WeeklySchedule>,
    /// (employee id, Monday of week) -> individual override schedule.
    pub individual_schedules: HashMap<(String, NaiveDate), WeeklySchedule>,
    /// Employee id -> department, for the departmental fallback.
    pub employee_departments: HashMap<String, String>,
}

impl CalculationContext {
    /// Resolve the planned schedule for one employee on one date.
    ///
    /// Precedence: the individual schedule for that employee's week wins
    /// over the departmental default, which wins over blanket 09:00-17:00
    /// office hours. A week that exists but has no entry for the weekday
    /// falls through to the next level.
    pub fn resolve_day_schedule(
        &self,
        employee_id: &str,
        department: Option<&str>,
        date: NaiveDate,
    ) -> DaySchedule {
        let weekday = date.weekday();
        let monday = monday_of_week(date);

        if let Some(week) = self
            .individual_schedules
            .get(&(employee_id.to_string(), monday))
        {
            if let Some(day) = week.day(weekday) {
                return day.clone();
            }
        }

        // The stored department mapping is authoritative; the department
        // printed on the sheet is only a fallback for employees the store
        // has never seen.
        let dept = self
            .employee_departments
            .get(employee_id)
            .map(String::as_str)
            .or(department);

        if let Some(week) = dept.and_then(|d| self.department_schedules.get(d)) {
            if let Some(day) = week.day(weekday) {
                return day.clone();
            }
        }

        DaySchedule::default_office_hours()
    }
}
