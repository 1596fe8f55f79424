use std::collections::HashMap;

use anyhow::Result;
use sqlx::MySqlPool;

use crate::core::stats::EmployeeStatistics;
use crate::database::models::EmployeeReportRow;

#[derive(Clone)]
pub struct ReportRepository {
    pool: MySqlPool,
}

impl ReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Store the latest statistics for one employee. Computed rows never
    /// overwrite a manual override; saving with `is_manual` set replaces
    /// whatever was there and pins the row.
    pub async fn upsert_statistics(
        &self,
        person_id: &str,
        stats: &EmployeeStatistics,
        is_manual: bool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO employee_reports (
                person_id, total_hours, total_days_worked, total_days_absent,
                total_weekends, total_late_minutes, count_lates,
                total_overtime_minutes, total_undertime_minutes,
                average_hours_per_day, is_manual
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                total_hours = IF(is_manual AND NOT VALUES(is_manual), total_hours, VALUES(total_hours)),
                total_days_worked = IF(is_manual AND NOT VALUES(is_manual), total_days_worked, VALUES(total_days_worked)),
                total_days_absent = IF(is_manual AND NOT VALUES(is_manual), total_days_absent, VALUES(total_days_absent)),
                total_weekends = IF(is_manual AND NOT VALUES(is_manual), total_weekends, VALUES(total_weekends)),
                total_late_minutes = IF(is_manual AND NOT VALUES(is_manual), total_late_minutes, VALUES(total_late_minutes)),
                count_lates = IF(is_manual AND NOT VALUES(is_manual), count_lates, VALUES(count_lates)),
                total_overtime_minutes = IF(is_manual AND NOT VALUES(is_manual), total_overtime_minutes, VALUES(total_overtime_minutes)),
                total_undertime_minutes = IF(is_manual AND NOT VALUES(is_manual), total_undertime_minutes, VALUES(total_undertime_minutes)),
                average_hours_per_day = IF(is_manual AND NOT VALUES(is_manual), average_hours_per_day, VALUES(average_hours_per_day)),
                is_manual = is_manual OR VALUES(is_manual)
            "#,
        )
        .bind(person_id)
        .bind(stats.total_hours)
        .bind(stats.total_days_worked)
        .bind(stats.total_days_absent)
        .bind(stats.total_weekends)
        .bind(stats.total_late_minutes)
        .bind(stats.count_lates)
        .bind(stats.total_overtime_minutes)
        .bind(stats.total_undertime_minutes)
        .bind(stats.average_hours_per_day)
        .bind(is_manual)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Clear a manual override so the next batch recomputes the row.
    pub async fn clear_override(&self, person_id: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE employee_reports SET is_manual = 0 WHERE person_id = ? AND is_manual = 1",
        )
        .bind(person_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Manual overrides keyed by person id, loaded once per batch alongside
    /// the calculation context.
    pub async fn manual_overrides(&self) -> Result<HashMap<String, EmployeeStatistics>> {
        let rows = sqlx::query_as::<_, EmployeeReportRow>(
            "SELECT person_id, total_hours, total_days_worked, total_days_absent, \
                    total_weekends, total_late_minutes, count_lates, \
                    total_overtime_minutes, total_undertime_minutes, \
                    average_hours_per_day, is_manual, updated_at \
             FROM employee_reports WHERE is_manual = 1",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let stats = row.statistics();
                (row.person_id, stats)
            })
            .collect())
    }

    pub async fn get_report(&self, person_id: &str) -> Result<Option<EmployeeReportRow>> {
        let row = sqlx::query_as::<_, EmployeeReportRow>(
            "SELECT person_id, total_hours, total_days_worked, total_days_absent, \
                    total_weekends, total_late_minutes, count_lates, \
                    total_overtime_minutes, total_undertime_minutes, \
                    average_hours_per_day, is_manual, updated_at \
             FROM employee_reports WHERE person_id = ?",
        )
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
