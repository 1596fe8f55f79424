use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::stats::EmployeeStatistics;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub person_id: String,
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub joining_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDay {
    pub id: i64,
    pub employee_id: i64,
    pub day: NaiveDate,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub minutes: i32,
    pub status: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeeklyScheduleRow {
    pub person_id: String,
    pub week_monday: NaiveDate,
    pub data_json: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DepartmentScheduleRow {
    pub department: String,
    pub data_json: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScheduleTemplateRow {
    pub name: String,
    pub data_json: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeReportRow {
    pub person_id: String,
    pub total_hours: f64,
    pub total_days_worked: i32,
    pub total_days_absent: i32,
    pub total_weekends: i32,
    pub total_late_minutes: i32,
    pub count_lates: i32,
    pub total_overtime_minutes: i32,
    pub total_undertime_minutes: i32,
    pub average_hours_per_day: f64,
    pub is_manual: bool,
    pub updated_at: NaiveDateTime,
}

impl EmployeeReportRow {
    pub fn statistics(&self) -> EmployeeStatistics {
        EmployeeStatistics {
            total_hours: self.total_hours,
            total_days_worked: self.total_days_worked as i64,
            total_days_absent: self.total_days_absent as i64,
            total_weekends: self.total_weekends as i64,
            total_late_minutes: self.total_late_minutes as i64,
            count_lates: self.count_lates as i64,
            total_overtime_minutes: self.total_overtime_minutes as i64,
            total_undertime_minutes: self.total_undertime_minutes as i64,
            average_hours_per_day: self.average_hours_per_day,
        }
    }
}
